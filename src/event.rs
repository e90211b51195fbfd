//! Log callback system.
//!
//! The library never prints. Hosts that want to see what the engine is doing
//! install a callback; without one, log records are not even formatted.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, OnceLock};

/// Log level for debug callbacks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

type LogCallback = Box<dyn Fn(LogLevel, &str) + Send + Sync + 'static>;

static INSTALLED: AtomicBool = AtomicBool::new(false);

fn log_callback() -> &'static Mutex<Option<LogCallback>> {
    static CALLBACK: OnceLock<Mutex<Option<LogCallback>>> = OnceLock::new();
    CALLBACK.get_or_init(|| Mutex::new(None))
}

/// Set the global log callback.
pub fn set_log_callback<F>(callback: F)
where
    F: Fn(LogLevel, &str) + Send + Sync + 'static,
{
    let mut guard = log_callback().lock().expect("log callback lock");
    *guard = Some(Box::new(callback));
    INSTALLED.store(true, Ordering::Release);
}

/// Remove the global log callback.
pub fn clear_log_callback() {
    let mut guard = log_callback().lock().expect("log callback lock");
    *guard = None;
    INSTALLED.store(false, Ordering::Release);
}

/// Whether a log callback is installed.
#[must_use]
pub fn log_enabled() -> bool {
    INSTALLED.load(Ordering::Acquire)
}

/// Emit a log record.
pub fn emit_log(level: LogLevel, message: &str) {
    if !log_enabled() {
        return;
    }
    if let Ok(guard) = log_callback().lock() {
        if let Some(callback) = guard.as_ref() {
            callback(level, message);
        }
    }
}

/// Emit a log record, formatting it only when someone is listening.
pub(crate) fn emit_log_with(level: LogLevel, message: impl FnOnce() -> String) {
    if log_enabled() {
        emit_log(level, &message());
    }
}

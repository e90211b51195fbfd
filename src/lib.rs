//! `bidi_line` - Visual reordering of bidirectional text.
//!
//! Takes per-character embedding levels (from the Unicode Bidirectional
//! Algorithm's resolution phases) and answers the questions a line renderer
//! asks: which runs appear in which order, where a character lands on
//! screen, and which character sits at a screen position. Rule L2 of
//! UAX #9 is applied over level runs, with the trailing-whitespace rule
//! (L1) handled per line without touching the paragraph's levels.
//!
//! ```
//! use bidi_line::{BidiLayout, Paragraph};
//!
//! let para = Paragraph::resolve("abc אבג def", Some(0))?;
//! let line = para.line(0, 7)?;
//! assert_eq!(line.visual_map()?, vec![0, 1, 2, 3, 6, 5, 4]);
//! # Ok::<(), bidi_line::Error>(())
//! ```

// Crate-level lint configuration
#![forbid(unsafe_code)]
#![allow(clippy::cast_possible_truncation)] // Mark flag bits fit in a byte
#![allow(clippy::cast_sign_loss)] // Run adjustments are range checked
#![allow(clippy::cast_possible_wrap)] // Flag bits widened into i32
#![allow(clippy::module_name_repetitions)] // Allow runs::RunSequence etc
#![allow(clippy::missing_errors_doc)] // Errors are documented on the enum
#![allow(clippy::missing_panics_doc)] // Panics only on internal invariants
#![allow(clippy::doc_markdown)] // Allow technical names without backticks
#![allow(clippy::use_self)] // Allow explicit type names in impl blocks
#![allow(clippy::collapsible_if)] // Sometimes nested ifs are clearer
#![allow(clippy::cast_lossless)] // as casts are fine for primitive widening
#![allow(clippy::items_after_statements)] // Common pattern in tests
#![allow(clippy::needless_collect)] // Collect for assertions is clear

pub mod class;
pub mod error;
pub mod event;
pub mod layout;
pub mod level;
pub mod mapping;
pub mod options;
pub mod primitive;
pub mod runs;
pub mod unicode;
mod write;

// Re-export core types at crate root
pub use error::{Error, Result};
pub use event::{LogLevel, clear_log_callback, emit_log, log_enabled, set_log_callback};
pub use layout::{BidiLayout, Line, LogicalRun, Paragraph, ParagraphInfo, VisualRun};
pub use level::{Direction, MAX_EXPLICIT_LEVEL, MAX_LEVEL};
pub use mapping::NOWHERE;
pub use options::{InsertPoint, MarkFlags, ReorderOptions};
pub use primitive::{invert_map, reorder_logical, reorder_visual};
pub use runs::{Run, RunSequence};
pub use unicode::{ResolvedText, resolve_levels};

//! Error types for bidi_line.

use std::fmt;

/// Result type alias for reordering operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for reordering operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// Two parallel per-character arrays disagree in length.
    LengthMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },
    /// A level above the accepted maximum.
    InvalidLevel { index: usize, level: u8 },
    /// Line range outside `0 <= start <= limit <= length`.
    InvalidLine {
        start: usize,
        limit: usize,
        length: usize,
    },
    /// Line range spans more than one paragraph.
    LineCrossesParagraph { start: usize, limit: usize },
    /// Paragraph boundaries that do not tile the text.
    InvalidParagraph { start: usize, limit: usize },
    /// Character or visual position out of bounds.
    IndexOutOfBounds { index: usize, length: usize },
    /// Visual run index out of bounds.
    RunIndexOutOfBounds { index: usize, count: usize },
    /// Mark insertion point outside the text.
    InvalidInsertPoint { position: usize, length: usize },
    /// No run owns a logical index. Runs always partition the text, so this
    /// signals a broken internal invariant.
    RunNotFound { index: usize },
    /// Level resolution through `unicode-bidi` failed.
    Resolve(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LengthMismatch {
                what,
                expected,
                actual,
            } => write!(f, "{what} has length {actual}, expected {expected}"),
            Self::InvalidLevel { index, level } => {
                write!(f, "invalid embedding level {level} at index {index}")
            }
            Self::InvalidLine {
                start,
                limit,
                length,
            } => write!(f, "line {start}..{limit} out of range for length {length}"),
            Self::LineCrossesParagraph { start, limit } => {
                write!(f, "line {start}..{limit} crosses a paragraph boundary")
            }
            Self::InvalidParagraph { start, limit } => {
                write!(f, "paragraph {start}..{limit} does not tile the text")
            }
            Self::IndexOutOfBounds { index, length } => {
                write!(f, "index {index} out of bounds for length {length}")
            }
            Self::RunIndexOutOfBounds { index, count } => {
                write!(f, "run index {index} out of bounds for {count} runs")
            }
            Self::InvalidInsertPoint { position, length } => {
                write!(f, "insert point {position} out of range for length {length}")
            }
            Self::RunNotFound { index } => {
                write!(f, "internal error: no run contains logical index {index}")
            }
            Self::Resolve(msg) => write!(f, "level resolution failed: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

//! Embedding levels and run directions.
//!
//! Levels are plain `u8` values as produced by the level-resolution pass.
//! The parity of a level gives its direction: even levels are left-to-right,
//! odd levels are right-to-left.

use unicode_bidi::level::{MAX_EXPLICIT_DEPTH, MAX_IMPLICIT_DEPTH};

/// Highest level an explicit embedding can reach (UAX #9, BD2).
pub const MAX_EXPLICIT_LEVEL: u8 = MAX_EXPLICIT_DEPTH;

/// Highest level accepted anywhere: implicit resolution may raise an
/// explicit level by one.
pub const MAX_LEVEL: u8 = MAX_IMPLICIT_DEPTH;

/// Whether `level` is a right-to-left level.
#[inline]
#[must_use]
pub const fn is_rtl(level: u8) -> bool {
    level & 1 == 1
}

/// Directional classification of a paragraph, line or run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Every effective level is even.
    Ltr,
    /// Every effective level is odd.
    Rtl,
    /// Levels of both parities are present.
    Mixed,
}

impl Direction {
    /// Direction of a single level.
    #[must_use]
    pub const fn from_level(level: u8) -> Self {
        if is_rtl(level) { Self::Rtl } else { Self::Ltr }
    }

    #[must_use]
    pub const fn is_mixed(self) -> bool {
        matches!(self, Self::Mixed)
    }

    /// Classify a set of levels. An empty set is left-to-right.
    pub fn classify(levels: impl IntoIterator<Item = u8>) -> Self {
        let mut even = false;
        let mut odd = false;
        for level in levels {
            if is_rtl(level) {
                odd = true;
            } else {
                even = true;
            }
            if even && odd {
                return Self::Mixed;
            }
        }
        if odd { Self::Rtl } else { Self::Ltr }
    }
}

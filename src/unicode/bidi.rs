//! Level resolution front-end (UAX #9, rules P and X through I).
//!
//! Resolving levels is not this crate's job; `unicode-bidi` does it. This
//! module adapts its byte-indexed output into the per-`char` levels and
//! paragraph boundaries the reordering engine consumes.

use unicode_bidi::{BidiClass, BidiInfo, Level, bidi_class};

use crate::class::is_trailing_ws_class;
use crate::error::{Error, Result};
use crate::layout::ParagraphInfo;
use crate::level::MAX_EXPLICIT_LEVEL;

/// Per-`char` resolved levels plus paragraph boundaries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedText {
    /// Embedding level per Unicode scalar value (`char`).
    pub levels: Vec<u8>,
    /// Paragraphs in order; they tile `0..levels.len()`.
    pub paragraphs: Vec<ParagraphInfo>,
}

/// Resolve embedding levels for `text`.
///
/// `base_level` forces the paragraph level; `None` detects it per paragraph
/// from the first strong character (rules P2 and P3).
pub fn resolve_levels(text: &str, base_level: Option<u8>) -> Result<ResolvedText> {
    let default_level = match base_level {
        Some(level) if level > MAX_EXPLICIT_LEVEL => {
            return Err(Error::InvalidLevel { index: 0, level });
        }
        Some(level) => Some(Level::new(level).map_err(|e| Error::Resolve(format!("{e:?}")))?),
        None => None,
    };

    if text.is_empty() {
        return Ok(ResolvedText {
            levels: Vec::new(),
            paragraphs: vec![ParagraphInfo {
                start: 0,
                limit: 0,
                level: base_level.unwrap_or(0),
            }],
        });
    }

    let bidi = BidiInfo::new(text, default_level);

    let mut levels = Vec::with_capacity(text.chars().count());
    for (byte_idx, _) in text.char_indices() {
        // `unicode-bidi` stores one level per byte, repeated for every byte of
        // a multi-byte code point; the first byte is representative.
        levels.push(bidi.levels[byte_idx].number());
    }

    let mut paragraphs = Vec::with_capacity(bidi.paragraphs.len());
    let mut start = 0;
    for para in &bidi.paragraphs {
        let limit = start + text[para.range.clone()].chars().count();
        paragraphs.push(ParagraphInfo {
            start,
            limit,
            level: para.level.number(),
        });
        start = limit;
    }

    let classes: Vec<BidiClass> = text.chars().map(bidi_class).collect();
    reset_separators(&classes, &mut levels, &paragraphs);

    Ok(ResolvedText { levels, paragraphs })
}

/// Rule L1 for separators: segment and paragraph separators, and the
/// whitespace run before each, take the paragraph level. Whitespace at the
/// very end of the text is left to the per-line trailing boundary.
fn reset_separators(classes: &[BidiClass], levels: &mut [u8], paragraphs: &[ParagraphInfo]) {
    for para in paragraphs {
        let mut resetting = false;
        for i in (para.start..para.limit).rev() {
            let class = classes[i];
            if matches!(class, BidiClass::B | BidiClass::S) {
                resetting = true;
            } else if !(resetting && is_trailing_ws_class(class)) {
                resetting = false;
                continue;
            }
            levels[i] = para.level;
        }
    }
}

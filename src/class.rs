//! Character classification consumed by the reordering engine.
//!
//! Only three questions are ever asked about a character: is it a paragraph
//! separator, does it belong to the trailing-whitespace classes of rule L1,
//! and is it a bidi control that may be dropped from the visual result.
//! Classes default to the Unicode Character Database via `unicode-bidi`, but
//! callers may supply their own per-character classes instead.

use unicode_bidi::{BidiClass, bidi_class};

/// LEFT-TO-RIGHT MARK.
pub const LRM: char = '\u{200E}';
/// RIGHT-TO-LEFT MARK.
pub const RLM: char = '\u{200F}';

/// Look up the bidi class of every character.
#[must_use]
pub fn classify(text: &[char]) -> Vec<BidiClass> {
    text.iter().map(|&ch| bidi_class(ch)).collect()
}

/// Paragraph separator (class B).
#[inline]
#[must_use]
pub const fn is_paragraph_separator(class: BidiClass) -> bool {
    matches!(class, BidiClass::B)
}

/// Classes that rule L1 resets to the paragraph level at the end of a line:
/// separators, whitespace, boundary neutrals and explicit formatting codes.
#[inline]
#[must_use]
pub const fn is_trailing_ws_class(class: BidiClass) -> bool {
    matches!(
        class,
        BidiClass::B
            | BidiClass::S
            | BidiClass::WS
            | BidiClass::BN
            | BidiClass::LRE
            | BidiClass::LRO
            | BidiClass::RLE
            | BidiClass::RLO
            | BidiClass::PDF
            | BidiClass::LRI
            | BidiClass::RLI
            | BidiClass::FSI
            | BidiClass::PDI
    )
}

/// Bidi control characters removed under
/// [`ReorderOptions::REMOVE_CONTROLS`](crate::ReorderOptions::REMOVE_CONTROLS):
/// ZWNJ, ZWJ, LRM, RLM, the embedding/override codes and the isolates.
#[inline]
#[must_use]
pub const fn is_bidi_control(ch: char) -> bool {
    matches!(
        ch,
        '\u{200C}'..='\u{200F}' | '\u{202A}'..='\u{202E}' | '\u{2066}'..='\u{2069}'
    )
}

/// Number of bidi control characters in `text`.
#[must_use]
pub fn count_controls(text: &[char]) -> usize {
    text.iter().filter(|&&ch| is_bidi_control(ch)).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_uses_unicode_data() {
        let text: Vec<char> = "a א 1\n".chars().collect();
        assert_eq!(
            classify(&text),
            vec![
                BidiClass::L,
                BidiClass::WS,
                BidiClass::R,
                BidiClass::WS,
                BidiClass::EN,
                BidiClass::B
            ]
        );
    }

    #[test]
    fn trailing_ws_classes() {
        assert!(is_trailing_ws_class(BidiClass::WS));
        assert!(is_trailing_ws_class(BidiClass::PDI));
        assert!(is_trailing_ws_class(BidiClass::BN));
        assert!(!is_trailing_ws_class(BidiClass::L));
        assert!(!is_trailing_ws_class(BidiClass::ON));
        assert!(!is_trailing_ws_class(BidiClass::EN));
    }

    #[test]
    fn bidi_controls() {
        for ch in [LRM, RLM, '\u{200C}', '\u{200D}', '\u{202A}', '\u{202E}', '\u{2066}', '\u{2069}'] {
            assert!(is_bidi_control(ch), "{ch:?} should be a control");
        }
        for ch in ['a', ' ', '\u{061C}', '\u{202F}', '\u{2065}'] {
            assert!(!is_bidi_control(ch), "{ch:?} should not be a control");
        }
        let text: Vec<char> = "a\u{200E}b\u{202B}c\u{202C}".chars().collect();
        assert_eq!(count_controls(&text), 3);
    }
}

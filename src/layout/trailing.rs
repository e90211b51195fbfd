//! Trailing-whitespace boundary (UAX #9, rule L1).

use unicode_bidi::BidiClass;

use crate::class::{is_paragraph_separator, is_trailing_ws_class};

/// Index from which characters are treated as if they were at `para_level`.
///
/// Whitespace, boundary neutrals and explicit codes at the end of the text
/// are reset to the paragraph level, and the run of `para_level` characters
/// just before them merges into the same trailing run. A text ending in a
/// paragraph separator needs no reset: the separator already sits at the
/// paragraph level.
///
/// `floor` is the start of the last paragraph. The whitespace scan never
/// passes it, so separators and whitespace of earlier paragraphs keep their
/// own levels. The merge may pass it: those characters are already at
/// `para_level`.
///
/// `dir_props` and `levels` must have the same length.
pub(crate) fn trailing_ws_start(
    dir_props: &[BidiClass],
    levels: &[u8],
    para_level: u8,
    floor: usize,
) -> usize {
    debug_assert_eq!(dir_props.len(), levels.len());
    let length = levels.len();
    match dir_props.last() {
        None => return 0,
        Some(&last) if is_paragraph_separator(last) => return length,
        Some(_) => {}
    }

    let mut start = length;
    while start > floor && is_trailing_ws_class(dir_props[start - 1]) {
        start -= 1;
    }
    while start > 0 && levels[start - 1] == para_level {
        start -= 1;
    }
    start
}

#[cfg(test)]
mod tests {
    use super::*;
    use BidiClass::{B, L, R, S, WS};

    #[test]
    fn empty_text_has_boundary_zero() {
        assert_eq!(trailing_ws_start(&[], &[], 0, 0), 0);
    }

    #[test]
    fn paragraph_separator_keeps_full_length() {
        assert_eq!(trailing_ws_start(&[R, WS, B], &[1, 1, 0], 0, 0), 3);
    }

    #[test]
    fn stops_at_preceding_run_of_other_level() {
        // RTL letter followed by two spaces that resolution left at levels 0 and 1.
        assert_eq!(trailing_ws_start(&[R, WS, WS], &[1, 0, 1], 0, 0), 1);
    }

    #[test]
    fn merges_preceding_para_level_run() {
        // The run before the whitespace is already at the paragraph level, so
        // the whole text collapses into the trailing run.
        assert_eq!(trailing_ws_start(&[L, WS, WS], &[0, 0, 1], 0, 0), 0);
    }

    #[test]
    fn merge_stops_at_first_other_level() {
        assert_eq!(trailing_ws_start(&[L, R, L, L, WS], &[0, 1, 0, 0, 1], 0, 0), 2);
    }

    #[test]
    fn no_trailing_whitespace() {
        assert_eq!(trailing_ws_start(&[L, R], &[0, 1], 0, 0), 2);
    }

    #[test]
    fn segment_separator_counts_as_whitespace() {
        assert_eq!(trailing_ws_start(&[R, R, S], &[1, 1, 1], 0, 0), 2);
    }

    #[test]
    fn rtl_paragraph_merges_odd_run() {
        assert_eq!(trailing_ws_start(&[L, R, WS], &[2, 1, 2], 1, 0), 1);
    }

    #[test]
    fn whitespace_scan_stops_at_last_paragraph() {
        // "ب\n " : an RTL paragraph, then a paragraph holding one space.
        assert_eq!(trailing_ws_start(&[R, B, WS], &[1, 1, 0], 0, 2), 2);
        assert_eq!(trailing_ws_start(&[WS, B, WS], &[0, 0, 0], 0, 2), 0);
    }

    #[test]
    fn merge_crosses_into_earlier_paragraph_at_same_level() {
        // "a\nאב\nג " : the merge runs back over the RTL paragraph to "\n" at 0.
        let props = [L, B, R, R, B, R, WS];
        assert_eq!(trailing_ws_start(&props, &[0, 0, 1, 1, 1, 1, 1], 1, 5), 2);
    }
}

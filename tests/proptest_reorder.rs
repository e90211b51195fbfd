//! Property-based tests for run construction and index mapping.
//!
//! Uses proptest to verify invariants that must hold for any level array.

use bidi_line::class::is_trailing_ws_class;
use bidi_line::{
    BidiLayout, Direction, InsertPoint, MarkFlags, NOWHERE, Paragraph, ReorderOptions, invert_map,
    reorder_logical, reorder_visual,
};
use proptest::prelude::*;
use unicode_bidi::BidiClass;

// ============================================================================
// Strategies
// ============================================================================

/// Characters covering the classes the engine cares about: strong letters,
/// a number, whitespace, a segment separator and an embedding control.
const ALPHABET: &[char] = &['a', 'b', 'א', 'ب', '1', ' ', ' ', '\t', '\u{202B}', '\u{202C}'];

/// Text plus a level array of the same length.
fn text_and_levels(max_len: usize, max_level: u8) -> impl Strategy<Value = (String, Vec<u8>)> {
    prop::collection::vec((prop::sample::select(ALPHABET), 0..=max_level), 0..max_len).prop_map(
        |pairs| {
            let text: String = pairs.iter().map(|&(ch, _)| ch).collect();
            let levels: Vec<u8> = pairs.into_iter().map(|(_, level)| level).collect();
            (text, levels)
        },
    )
}

/// Resolved levels never drop below the paragraph level.
fn paragraph() -> impl Strategy<Value = Paragraph> {
    (text_and_levels(48, 4), 0u8..=2).prop_map(|((text, levels), para_level)| {
        let levels = levels.into_iter().map(|l| l + para_level).collect();
        Paragraph::new(&text, levels, para_level).unwrap()
    })
}

/// A non-empty paragraph and a subrange of it.
fn paragraph_with_range() -> impl Strategy<Value = (Paragraph, usize, usize)> {
    paragraph()
        .prop_filter("non-empty", |para| !para.is_empty())
        .prop_flat_map(|para| {
            let len = para.len();
            (Just(para), 0..=len)
                .prop_flat_map(move |(para, start)| (Just(para), Just(start), start..=len))
        })
}

/// The alphabet above with a paragraph separator in place of the second
/// space.
const MULTI_PARAGRAPH_ALPHABET: &[char] =
    &['a', 'b', 'א', 'ب', '1', ' ', '\n', '\t', '\u{202B}', '\u{202C}'];

/// Text resolved into one or more paragraphs, with a detected or forced
/// base level.
fn resolved_paragraph() -> impl Strategy<Value = Paragraph> {
    (
        prop::collection::vec(prop::sample::select(MULTI_PARAGRAPH_ALPHABET), 1..48),
        prop::option::of(0u8..=1),
    )
        .prop_map(|(chars, base_level)| {
            let text: String = chars.into_iter().collect();
            Paragraph::resolve(&text, base_level).unwrap()
        })
}

/// Reference boundary: strip trailing whitespace classes, then any run at
/// the paragraph level before them.
fn reference_trailing(dir_props: &[BidiClass], levels: &[u8], para_level: u8) -> usize {
    if dir_props.last() == Some(&BidiClass::B) {
        return levels.len();
    }
    let mut start = levels.len();
    while start > 0 && is_trailing_ws_class(dir_props[start - 1]) {
        start -= 1;
    }
    while start > 0 && levels[start - 1] == para_level {
        start -= 1;
    }
    start
}

// ============================================================================
// Run Partition
// ============================================================================

proptest! {
    /// Runs cover every logical index exactly once.
    #[test]
    fn runs_partition_the_text(para in paragraph()) {
        let runs = para.runs().unwrap();
        let mut spans: Vec<(usize, usize)> = runs
            .spans()
            .map(|(_, length, run)| (run.start(), length))
            .collect();
        spans.sort_unstable();
        let mut next = 0;
        for (start, length) in spans {
            prop_assert_eq!(start, next, "runs must be contiguous");
            next = start + length;
        }
        prop_assert_eq!(next, para.len());
        prop_assert_eq!(runs.visual_length(), para.len());
    }

    /// Run limits increase strictly (the empty text has a single empty run).
    #[test]
    fn run_limits_increase(para in paragraph()) {
        let runs = para.runs().unwrap();
        let limits: Vec<usize> = runs.iter().map(|run| run.limit()).collect();
        if para.is_empty() {
            prop_assert_eq!(limits, vec![0]);
        } else {
            prop_assert!(limits.windows(2).all(|w| w[0] < w[1]));
        }
    }
}

// ============================================================================
// Permutation
// ============================================================================

proptest! {
    /// Logical and visual maps are inverse permutations.
    #[test]
    fn maps_are_inverse(para in paragraph()) {
        let logical = para.logical_map().unwrap();
        let visual = para.visual_map().unwrap();
        prop_assert_eq!(logical.len(), para.len());
        prop_assert_eq!(visual.len(), para.len());
        for (i, &v) in logical.iter().enumerate() {
            prop_assert_eq!(visual[v], i);
        }
    }

    /// Single lookups agree with the full maps.
    #[test]
    fn lookups_agree_with_maps(para in paragraph()) {
        let logical = para.logical_map().unwrap();
        let visual = para.visual_map().unwrap();
        for i in 0..para.len() {
            prop_assert_eq!(para.visual_index(i).unwrap(), Some(logical[i]));
            prop_assert_eq!(para.logical_index(i).unwrap(), Some(visual[i]));
        }
    }

    /// The run path and the primitive path agree on effective levels.
    #[test]
    fn run_path_matches_primitive(para in paragraph().prop_filter("non-empty", |p| !p.is_empty())) {
        let levels = para.levels();
        prop_assert_eq!(reorder_visual(&levels[..]), Some(para.visual_map().unwrap()));
        prop_assert_eq!(reorder_logical(&levels[..]), Some(para.logical_map().unwrap()));
    }

    /// Primitive maps invert each other.
    #[test]
    fn primitive_maps_are_inverse(levels in prop::collection::vec(0u8..=8, 1..64)) {
        let logical = reorder_logical(&levels).unwrap();
        let visual = reorder_visual(&levels).unwrap();
        prop_assert_eq!(invert_map(&logical), visual);
    }

    /// Any negative level makes the primitive functions give up.
    #[test]
    fn primitive_rejects_negative_levels(
        levels in prop::collection::vec(0i16..=8, 1..32),
        at in any::<prop::sample::Index>(),
        bad in -100i16..0,
    ) {
        let mut levels = levels;
        let index = at.index(levels.len());
        levels[index] = bad;
        prop_assert_eq!(reorder_logical(&levels), None);
        prop_assert_eq!(reorder_visual(&levels), None);
    }
}

// ============================================================================
// Trivial Direction
// ============================================================================

proptest! {
    /// One parity everywhere means identity or full reversal.
    #[test]
    fn single_parity_is_closed_form(
        (text, levels) in text_and_levels(40, 2),
        rtl in any::<bool>(),
    ) {
        let parity = u8::from(rtl);
        let levels: Vec<u8> = levels.into_iter().map(|l| l * 2 + parity).collect();
        let para = Paragraph::new(&text, levels, parity).unwrap();
        let len = para.len();
        prop_assert_eq!(para.direction(), if rtl { Direction::Rtl } else { Direction::Ltr });
        prop_assert_eq!(para.run_count().unwrap(), 1);
        for i in 0..len {
            let expected = if rtl { len - 1 - i } else { i };
            prop_assert_eq!(para.visual_index(i).unwrap(), Some(expected));
        }
    }
}

// ============================================================================
// Trailing Whitespace
// ============================================================================

proptest! {
    /// The boundary matches the reference scan for mixed paragraphs.
    #[test]
    fn trailing_boundary_matches_reference(para in paragraph()) {
        prop_assume!(para.direction() == Direction::Mixed);
        let expected = reference_trailing(para.dir_props(), &para.levels(), para.para_level());
        prop_assert_eq!(para.trailing_ws_start(), expected);
    }

    /// Everything at or after the boundary is whitespace or at the paragraph
    /// level.
    #[test]
    fn trailing_suffix_is_whitespace_or_para_level(para in paragraph()) {
        let levels = para.levels();
        for i in para.trailing_ws_start()..para.len() {
            prop_assert_eq!(levels[i], para.para_level());
        }
        if para.direction() == Direction::Mixed {
            let raw: Vec<u8> = (0..para.len()).map(|i| para.level_at(i).unwrap()).collect();
            prop_assert_eq!(&raw[..], &levels[..]);
        }
    }
}

// ============================================================================
// Multi-Paragraph Text
// ============================================================================

proptest! {
    /// Over the whole text, the run path agrees with rule L2 applied to the
    /// effective levels.
    #[test]
    fn resolved_text_matches_primitive(para in resolved_paragraph()) {
        let levels = para.levels();
        prop_assert_eq!(reorder_visual(&levels[..]), Some(para.visual_map().unwrap()));
        prop_assert_eq!(reorder_logical(&levels[..]), Some(para.logical_map().unwrap()));
    }

    /// Every character sits in a run at its own effective level.
    #[test]
    fn runs_carry_effective_levels(para in resolved_paragraph()) {
        let runs = para.runs().unwrap();
        for (_, length, run) in runs.spans() {
            for logical in run.start()..run.start() + length {
                prop_assert_eq!(para.level_at(logical).unwrap(), run.level());
            }
        }
        for logical in 0..para.len() {
            prop_assert_eq!(para.logical_run(logical).unwrap().level, para.levels()[logical]);
        }
    }

    /// Each paragraph, cut as a line, reorders like its own levels say.
    #[test]
    fn paragraph_lines_match_primitive(para in resolved_paragraph()) {
        for info in para.paragraphs() {
            let line = para.line(info.start, info.limit).unwrap();
            prop_assert_eq!(
                reorder_visual(&line.levels()[..]),
                Some(line.visual_map().unwrap())
            );
        }
    }
}

// ============================================================================
// Lines
// ============================================================================

proptest! {
    /// Lines of a single-direction paragraph lend the parent's arrays.
    #[test]
    fn trivial_lines_share_parent_arrays(
        (text, levels) in text_and_levels(40, 2),
        cut in any::<prop::sample::Index>(),
    ) {
        let levels: Vec<u8> = levels.into_iter().map(|l| l * 2).collect();
        let para = Paragraph::new(&text, levels, 0).unwrap();
        let len = para.len();
        let start = cut.index(len + 1);
        let line = para.line(start, len).unwrap();
        prop_assert!(line.shares_levels());
        prop_assert!(std::ptr::eq(line.text(), &para.text()[start..len]));
        prop_assert_eq!(&line.levels()[..], &para.levels()[start..len]);
    }

    /// A line's maps are a permutation of its own range.
    #[test]
    fn line_maps_are_inverse((para, start, limit) in paragraph_with_range()) {
        let line = para.line(start, limit).unwrap();
        let logical = line.logical_map().unwrap();
        let visual = line.visual_map().unwrap();
        prop_assert_eq!(logical.len(), limit - start);
        for (i, &v) in logical.iter().enumerate() {
            prop_assert_eq!(visual[v], i);
        }
        if !line.is_empty() {
            prop_assert_eq!(reorder_visual(&line.levels()[..]), Some(visual));
        }
    }

    /// Projecting a line never changes the parent.
    #[test]
    fn lines_leave_parent_untouched((para, start, limit) in paragraph_with_range()) {
        let before = para.levels().into_owned();
        let boundary = para.trailing_ws_start();
        let line = para.line(start, limit).unwrap();
        let _ = line.visual_map().unwrap();
        prop_assert_eq!(&para.levels()[..], &before[..]);
        prop_assert_eq!(para.trailing_ws_start(), boundary);
    }
}

// ============================================================================
// Marks and Controls
// ============================================================================

proptest! {
    /// Marks add visual slots that map nowhere.
    #[test]
    fn marks_extend_the_visual_side(
        para in paragraph().prop_filter("non-empty", |p| !p.is_empty()),
        picks in prop::collection::vec((any::<prop::sample::Index>(), 1u8..16), 1..4),
    ) {
        let len = para.len();
        let points = picks
            .iter()
            .map(|(at, bits)| InsertPoint::new(at.index(len), MarkFlags::from_bits_truncate(*bits)))
            .collect();
        let para = para
            .with_insert_points(points)
            .unwrap()
            .with_options(ReorderOptions::INSERT_MARKS);
        let marks = para.runs().unwrap().mark_count();
        let visual = para.visual_map().unwrap();
        prop_assert_eq!(visual.len(), len + marks);
        prop_assert_eq!(visual.iter().filter(|&&v| v == NOWHERE).count(), marks);
        prop_assert_eq!(invert_map(&visual), para.logical_map().unwrap());
        for (v, &logical) in visual.iter().enumerate() {
            let expected = (logical != NOWHERE).then_some(logical);
            prop_assert_eq!(para.logical_index(v).unwrap(), expected);
        }
        prop_assert_eq!(para.reordered_text().unwrap().chars().count(), len + marks);
    }

    /// Removed controls leave holes on the logical side.
    #[test]
    fn removed_controls_map_nowhere(para in paragraph()) {
        let para = para.with_options(ReorderOptions::REMOVE_CONTROLS);
        let controls = para
            .text()
            .iter()
            .filter(|&&ch| bidi_line::class::is_bidi_control(ch))
            .count();
        let logical = para.logical_map().unwrap();
        let visual = para.visual_map().unwrap();
        prop_assert_eq!(para.result_length().unwrap(), para.len() - controls);
        prop_assert_eq!(visual.len(), para.len() - controls);
        prop_assert_eq!(logical.iter().filter(|&&v| v == NOWHERE).count(), controls);
        for (i, &v) in logical.iter().enumerate() {
            let expected = (v != NOWHERE).then_some(v);
            prop_assert_eq!(para.visual_index(i).unwrap(), expected);
            if v != NOWHERE {
                prop_assert_eq!(visual[v], i);
                prop_assert_eq!(para.logical_index(v).unwrap(), Some(i));
            }
        }
    }
}

//! Fuzz target for the level-array reordering functions.
//!
//! Arbitrary signed levels must either be rejected with `None` or produce
//! two maps that invert each other.

#![no_main]

use bidi_line::{MAX_LEVEL, invert_map, reorder_logical, reorder_visual};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|levels: Vec<i8>| {
    let logical = reorder_logical(&levels);
    let visual = reorder_visual(&levels);
    let valid = !levels.is_empty()
        && levels
            .iter()
            .all(|&l| l >= 0 && i16::from(l) <= i16::from(MAX_LEVEL));
    assert_eq!(logical.is_some(), valid);
    assert_eq!(visual.is_some(), valid);

    if let (Some(logical), Some(visual)) = (logical, visual) {
        assert_eq!(invert_map(&logical), visual);
    }
});

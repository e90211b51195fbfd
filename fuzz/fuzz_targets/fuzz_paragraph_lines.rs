//! Fuzz target for paragraph resolution and line projection.
//!
//! Resolves arbitrary text, cuts a line out of one of its paragraphs, and
//! checks that the line's maps are inverse permutations.

#![no_main]

use arbitrary::Arbitrary;
use bidi_line::{BidiLayout, NOWHERE, Paragraph, ReorderOptions};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct Input<'a> {
    text: &'a str,
    base_level: Option<u8>,
    start: u16,
    width: u16,
    remove_controls: bool,
}

fuzz_target!(|input: Input<'_>| {
    let base_level = input.base_level.map(|l| l % 4);
    let Ok(para) = Paragraph::resolve(input.text, base_level) else {
        return;
    };
    let para = if input.remove_controls {
        para.with_options(ReorderOptions::REMOVE_CONTROLS)
    } else {
        para
    };
    if para.is_empty() {
        return;
    }

    let start = usize::from(input.start) % para.len();
    let Some(info) = para.paragraph_index(start).and_then(|i| para.paragraph(i)) else {
        return;
    };
    let limit = (start + usize::from(input.width)).min(info.limit);
    let Ok(line) = para.line(start, limit) else {
        return;
    };

    let logical = line.logical_map().expect("logical map");
    let visual = line.visual_map().expect("visual map");
    assert_eq!(visual.len(), line.result_length().expect("result length"));
    for (i, &v) in logical.iter().enumerate() {
        if v != NOWHERE {
            assert_eq!(visual[v], i);
        }
    }
    let _ = line.reordered_text();
});

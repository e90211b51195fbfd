//! Writing text in visual order.

use crate::class::{LRM, RLM, is_bidi_control};
use crate::layout::source::Context;
use crate::mapping::displayed;
use crate::options::MarkFlags;
use crate::runs::RunSequence;

/// Characters in display order. Marks are written where runs request them,
/// LRM taking precedence over RLM on the same side.
pub(crate) fn reordered_text(ctx: &Context<'_>, runs: &RunSequence) -> String {
    let marks = ctx.marks_active();
    let controls = !marks && ctx.controls_active();
    let mut out = String::with_capacity(ctx.len() + runs.mark_count());
    for (_, length, run) in runs.spans() {
        let flags = if marks { run.marks() } else { MarkFlags::empty() };
        if flags.contains(MarkFlags::LRM_BEFORE) {
            out.push(LRM);
        } else if flags.contains(MarkFlags::RLM_BEFORE) {
            out.push(RLM);
        }
        out.extend(
            displayed(run, length)
                .map(|logical| ctx.text[logical])
                .filter(|&ch| !(controls && is_bidi_control(ch))),
        );
        if flags.contains(MarkFlags::LRM_AFTER) {
            out.push(LRM);
        } else if flags.contains(MarkFlags::RLM_AFTER) {
            out.push(RLM);
        }
    }
    out
}

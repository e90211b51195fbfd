//! Logical/visual index mapping over finalized runs.
//!
//! Positions are character indices. When marks are inserted the visual side
//! is longer than the logical side; when controls are removed it is shorter.

use crate::class::is_bidi_control;
use crate::layout::source::Context;
use crate::runs::{Run, RunSequence};

/// Map entry for a position with no counterpart: an inserted mark on the
/// visual side or a removed control on the logical side.
pub const NOWHERE: usize = usize::MAX;

/// Runs at or below this count are searched linearly.
const LINEAR_SEARCH_RUNS: usize = 10;

/// Logical indices of `run` in the order they are displayed.
pub(crate) fn displayed(run: &Run, length: usize) -> impl Iterator<Item = usize> {
    let start = run.start();
    let rtl = run.is_rtl();
    (0..length).map(move |offset| {
        if rtl {
            start + length - 1 - offset
        } else {
            start + offset
        }
    })
}

/// Visual position of `logical` before marks or control removal.
pub(crate) fn visual_index(runs: &RunSequence, logical: usize) -> Option<usize> {
    runs.spans().find_map(|(visual_start, length, run)| {
        let offset = logical.checked_sub(run.start())?;
        if offset >= length {
            None
        } else if run.is_rtl() {
            Some(visual_start + length - offset - 1)
        } else {
            Some(visual_start + offset)
        }
    })
}

/// Shift `visual` by the marks emitted before it.
pub(crate) fn add_marks(runs: &RunSequence, visual: usize) -> Option<usize> {
    let mut marks = 0;
    for run in runs {
        let flags = run.marks();
        if flags.has_before() {
            marks += 1;
        }
        if visual < run.limit() {
            return Some(visual + marks);
        }
        if flags.has_after() {
            marks += 1;
        }
    }
    None
}

/// Shift `visual` back by the controls removed before it. Controls
/// themselves have no visual position.
pub(crate) fn remove_controls(
    ctx: &Context<'_>,
    runs: &RunSequence,
    logical: usize,
    visual: usize,
) -> Option<usize> {
    if is_bidi_control(ctx.text[logical]) {
        return None;
    }
    let mut controls = 0;
    for (_, length, run) in runs.spans() {
        if visual >= run.limit() {
            controls += run.removed_controls();
            continue;
        }
        if run.removed_controls() == 0 {
            return Some(visual - controls);
        }
        // Controls displayed ahead of `logical` within this run.
        let start = run.start();
        let ahead = if run.is_rtl() {
            logical + 1..start + length
        } else {
            start..logical
        };
        controls += ctx.text[ahead]
            .iter()
            .filter(|&&ch| is_bidi_control(ch))
            .count();
        return Some(visual - controls);
    }
    None
}

/// Logical index shown at `visual`, a position in the adjusted result.
pub(crate) fn logical_index(ctx: &Context<'_>, runs: &RunSequence, visual: usize) -> Option<usize> {
    let visual = if ctx.marks_active() {
        strip_marks(runs, visual)?
    } else if ctx.controls_active() {
        return restore_controls(ctx, runs, visual);
    } else {
        visual
    };

    let slice = runs.as_slice();
    let index = if slice.len() <= LINEAR_SEARCH_RUNS {
        slice.iter().position(|run| visual < run.limit())?
    } else {
        let index = slice.partition_point(|run| run.limit() <= visual);
        (index < slice.len()).then_some(index)?
    };
    let run = &slice[index];
    if run.is_rtl() {
        Some(run.start() + run.limit() - visual - 1)
    } else {
        Some(run.start() + visual - runs.visual_start(index))
    }
}

/// Undo [`add_marks`]; `None` if `visual` is a mark.
fn strip_marks(runs: &RunSequence, visual: usize) -> Option<usize> {
    let mut marks = 0;
    for (visual_start, length, run) in runs.spans() {
        let flags = run.marks();
        if flags.has_before() {
            if visual <= visual_start + marks {
                return None;
            }
            marks += 1;
        }
        if visual < run.limit() + marks {
            return Some(visual - marks);
        }
        if flags.has_after() {
            if visual == visual_start + length + marks {
                return None;
            }
            marks += 1;
        }
    }
    None
}

/// Walk the displayed characters, skipping controls, to the `visual`-th one.
fn restore_controls(ctx: &Context<'_>, runs: &RunSequence, visual: usize) -> Option<usize> {
    let mut controls = 0;
    for (_, length, run) in runs.spans() {
        let removed = run.removed_controls();
        if visual + controls + removed >= run.limit() {
            controls += removed;
            continue;
        }
        return displayed(run, length)
            .filter(|&logical| !is_bidi_control(ctx.text[logical]))
            .nth(visual + controls - (run.limit() - length));
    }
    None
}

/// `map[logical] = visual` over the whole text.
pub(crate) fn logical_map(ctx: &Context<'_>, runs: &RunSequence) -> Vec<usize> {
    let mut map = vec![NOWHERE; ctx.len()];
    walk(ctx, runs, |logical, visual| {
        if let Some(logical) = logical {
            map[logical] = visual;
        }
    });
    map
}

/// `map[visual] = logical` over the adjusted result.
pub(crate) fn visual_map(ctx: &Context<'_>, runs: &RunSequence, result_length: usize) -> Vec<usize> {
    let mut map = Vec::with_capacity(result_length);
    walk(ctx, runs, |logical, _| map.push(logical.unwrap_or(NOWHERE)));
    debug_assert_eq!(map.len(), result_length);
    map
}

/// Visit every slot of the adjusted result in visual order. Marks are
/// reported as `None`; removed controls are not reported.
fn walk(ctx: &Context<'_>, runs: &RunSequence, mut visit: impl FnMut(Option<usize>, usize)) {
    let marks = ctx.marks_active();
    let controls = !marks && ctx.controls_active();
    let mut visual = 0;
    let mut emit = |logical: Option<usize>| {
        visit(logical, visual);
        visual += 1;
    };
    for (_, length, run) in runs.spans() {
        let flags = if marks { run.marks() } else { Default::default() };
        if flags.has_before() {
            emit(None);
        }
        for logical in displayed(run, length) {
            if controls && is_bidi_control(ctx.text[logical]) {
                continue;
            }
            emit(Some(logical));
        }
        if flags.has_after() {
            emit(None);
        }
    }
}

//! Level runs in visual order.
//!
//! A run is a maximal span of characters at one embedding level. Runs are
//! built from the level array in one scan, reordered by rule L2, and then
//! finalized: each run's `limit` becomes the visual position just past it.

mod reorder;

use std::ops::Index;

use crate::class::is_bidi_control;
use crate::error::{Error, Result};
use crate::event::{LogLevel, emit_log_with};
use crate::layout::source::Context;
use crate::level::{MAX_LEVEL, is_rtl};
use crate::options::MarkFlags;

/// One run of same-level characters.
///
/// `insert_remove` packs the mark/control adjustment for the run: positive
/// values are [`MarkFlags`] bits, negative values count removed controls.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Run {
    start: usize,
    limit: usize,
    level: u8,
    insert_remove: i32,
}

impl Run {
    /// A run whose `limit` still holds its length.
    const fn new(start: usize, length: usize, level: u8) -> Self {
        Self {
            start,
            limit: length,
            level,
            insert_remove: 0,
        }
    }

    /// Logical index of the run's first character.
    #[must_use]
    pub const fn start(&self) -> usize {
        self.start
    }

    /// Visual position just past the run, counted in characters.
    #[must_use]
    pub const fn limit(&self) -> usize {
        self.limit
    }

    #[must_use]
    pub const fn level(&self) -> u8 {
        self.level
    }

    #[must_use]
    pub const fn is_rtl(&self) -> bool {
        is_rtl(self.level)
    }

    #[must_use]
    pub const fn insert_remove(&self) -> i32 {
        self.insert_remove
    }

    /// Marks inserted around the run.
    #[must_use]
    pub fn marks(&self) -> MarkFlags {
        if self.insert_remove > 0 {
            MarkFlags::from_bits_truncate(self.insert_remove as u8)
        } else {
            MarkFlags::empty()
        }
    }

    /// Number of controls removed from the run.
    #[must_use]
    pub const fn removed_controls(&self) -> usize {
        if self.insert_remove < 0 {
            self.insert_remove.unsigned_abs() as usize
        } else {
            0
        }
    }
}

/// The finalized runs of a paragraph or line, in visual order.
///
/// Runs partition the logical range, and their limits increase strictly up
/// to the character count.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunSequence {
    runs: Vec<Run>,
}

impl RunSequence {
    pub(crate) fn build(ctx: &Context<'_>) -> Result<Self> {
        let length = ctx.len();
        let runs = if ctx.direction.is_mixed() {
            mixed_runs(ctx)
        } else {
            // Covers the empty text too.
            vec![Run::new(0, length, ctx.para_level)]
        };
        let mut sequence = Self { runs };

        for point in ctx.insert_points {
            let index = sequence.run_containing(point.position)?;
            sequence.runs[index].insert_remove |= i32::from(point.flags.bits());
        }
        if ctx.controls_active() {
            for (logical, &ch) in ctx.text.iter().enumerate() {
                if is_bidi_control(ch) {
                    let index = sequence.run_containing(logical)?;
                    sequence.runs[index].insert_remove -= 1;
                }
            }
        }

        emit_log_with(LogLevel::Debug, || {
            format!(
                "runs: {} over {} chars ({:?}), trailing ws at {}, {} mark(s), {} control(s) removed",
                sequence.len(),
                length,
                ctx.direction,
                ctx.trailing_ws_start,
                sequence.mark_count(),
                ctx.control_count
            )
        });
        Ok(sequence)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.runs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Run> {
        self.runs.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Run> {
        self.runs.iter()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Run] {
        &self.runs
    }

    /// Visual position of the first character of run `index`.
    #[must_use]
    pub(crate) fn visual_start(&self, index: usize) -> usize {
        if index == 0 { 0 } else { self.runs[index - 1].limit }
    }

    /// Number of characters in run `index`.
    #[must_use]
    pub(crate) fn run_length(&self, index: usize) -> usize {
        self.runs[index].limit - self.visual_start(index)
    }

    /// Total characters covered by the runs.
    #[must_use]
    pub fn visual_length(&self) -> usize {
        self.runs.last().map_or(0, |run| run.limit)
    }

    /// `(visual_start, length, run)` for every run, in visual order.
    pub fn spans(&self) -> impl Iterator<Item = (usize, usize, &Run)> {
        let mut visual_start = 0;
        self.runs.iter().map(move |run| {
            let start = visual_start;
            visual_start = run.limit;
            (start, run.limit - start, run)
        })
    }

    /// Marks added to the visual result, at most one on each side of a run.
    #[must_use]
    pub fn mark_count(&self) -> usize {
        self.runs.iter().map(|run| run.marks().mark_count()).sum()
    }

    /// Index of the run holding `logical_index`.
    pub(crate) fn run_containing(&self, logical_index: usize) -> Result<usize> {
        self.spans()
            .position(|(_, length, run)| {
                logical_index >= run.start && logical_index - run.start < length
            })
            .ok_or(Error::RunNotFound {
                index: logical_index,
            })
    }
}

impl Index<usize> for RunSequence {
    type Output = Run;

    fn index(&self, index: usize) -> &Run {
        &self.runs[index]
    }
}

impl<'a> IntoIterator for &'a RunSequence {
    type Item = &'a Run;
    type IntoIter = std::slice::Iter<'a, Run>;

    fn into_iter(self) -> Self::IntoIter {
        self.runs.iter()
    }
}

/// Scan, reorder and finalize the runs of mixed-direction text.
fn mixed_runs(ctx: &Context<'_>) -> Vec<Run> {
    let levels = ctx.levels;
    let length = levels.len();
    let limit = ctx.trailing_ws_start;

    let mut runs = Vec::new();
    let mut min_level = MAX_LEVEL;
    let mut max_level = 0;
    let mut i = 0;
    while i < limit {
        let start = i;
        let level = levels[i];
        min_level = min_level.min(level);
        max_level = max_level.max(level);
        i += 1;
        while i < limit && levels[i] == level {
            i += 1;
        }
        runs.push(Run::new(start, i - start, level));
    }

    if runs.len() == 1 && limit == length {
        return vec![Run::new(0, length, levels[0])];
    }

    // Trailing whitespace forms its own run at the level of the last
    // paragraph; the stored levels do not carry it.
    if limit < length {
        let trailing_level = ctx.trailing_level();
        runs.push(Run::new(limit, length - limit, trailing_level));
        min_level = min_level.min(trailing_level);
        max_level = max_level.max(trailing_level);
    }

    reorder::reorder_runs(&mut runs, min_level, max_level);

    let mut visual_limit = 0;
    for run in &mut runs {
        visual_limit += run.limit;
        run.limit = visual_limit;
    }
    runs
}

//! Paragraphs, lines and the query surface they share.
//!
//! A [`Paragraph`] owns resolved text. A [`Line`] is a view over a subrange
//! of one paragraph. Both answer the same questions through [`BidiLayout`]:
//! the runs in visual order, single-index logical/visual lookups, and full
//! index maps.

mod line;
mod paragraph;
mod trailing;

use std::borrow::Cow;
use std::cell::OnceCell;

use unicode_bidi::BidiClass;

pub use line::Line;
pub use paragraph::{Paragraph, ParagraphInfo};
pub(crate) use trailing::trailing_ws_start;

use crate::error::{Error, Result};
use crate::level::Direction;
use crate::mapping;
use crate::options::ReorderOptions;
use crate::runs::RunSequence;
use crate::write;

pub(crate) mod source {
    use super::{BidiClass, Direction, OnceCell, ParagraphInfo, ReorderOptions, RunSequence};
    use crate::options::InsertPoint;

    /// Borrowed snapshot of everything the run and mapping code reads.
    #[derive(Clone, Copy, Debug)]
    pub struct Context<'a> {
        pub(crate) text: &'a [char],
        pub(crate) dir_props: &'a [BidiClass],
        pub(crate) levels: &'a [u8],
        pub(crate) para_level: u8,
        /// Empty for lines: a line lies within one paragraph.
        pub(crate) paragraphs: &'a [ParagraphInfo],
        pub(crate) direction: Direction,
        pub(crate) trailing_ws_start: usize,
        pub(crate) options: ReorderOptions,
        /// Only populated when marks are being inserted.
        pub(crate) insert_points: &'a [InsertPoint],
        /// Zero unless controls are being removed.
        pub(crate) control_count: usize,
    }

    impl Context<'_> {
        pub(crate) fn len(&self) -> usize {
            self.levels.len()
        }

        pub(crate) fn para_level_at(&self, index: usize) -> u8 {
            let idx = self.paragraphs.partition_point(|p| p.limit <= index);
            self.paragraphs
                .get(idx)
                .or_else(|| self.paragraphs.last())
                .map_or(self.para_level, |p| p.level)
        }

        /// Level of the implicit trailing-whitespace run.
        pub(crate) fn trailing_level(&self) -> u8 {
            self.para_level_at(self.len().saturating_sub(1))
        }

        /// Level the runs use for `index`. From the trailing boundary on, a
        /// mixed text reads as one run at the trailing level; a single-direction
        /// text reads as the level of the paragraph holding `index`.
        pub(crate) fn effective_level(&self, index: usize) -> u8 {
            if !self.direction.is_mixed() {
                self.para_level_at(index)
            } else if index < self.trailing_ws_start {
                self.levels[index]
            } else {
                self.trailing_level()
            }
        }

        pub(crate) fn marks_active(&self) -> bool {
            !self.insert_points.is_empty()
        }

        pub(crate) fn controls_active(&self) -> bool {
            self.control_count > 0
        }
    }

    pub trait Source {
        fn context(&self) -> Context<'_>;
        fn run_cache(&self) -> &OnceCell<RunSequence>;
    }
}

/// A run in visual order, as reported by [`BidiLayout::visual_run`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VisualRun {
    pub logical_start: usize,
    pub length: usize,
    pub level: u8,
}

impl VisualRun {
    /// Direction in which the run's characters are laid out.
    #[must_use]
    pub const fn direction(&self) -> Direction {
        Direction::from_level(self.level)
    }
}

/// The same-level run holding a logical position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LogicalRun {
    /// Logical index just past the run.
    pub limit: usize,
    pub level: u8,
}

/// Reordering queries shared by paragraphs and lines.
///
/// Runs are computed on first use and cached for the lifetime of the object.
/// Single-index lookups answer `Ok(None)` when a position has no counterpart
/// (a removed control, or an inserted mark).
pub trait BidiLayout: source::Source {
    /// Number of characters.
    fn len(&self) -> usize {
        self.context().len()
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn text(&self) -> &[char] {
        self.context().text
    }

    fn dir_props(&self) -> &[BidiClass] {
        self.context().dir_props
    }

    fn para_level(&self) -> u8 {
        self.context().para_level
    }

    fn direction(&self) -> Direction {
        self.context().direction
    }

    /// Index from which levels are implicitly the paragraph level.
    fn trailing_ws_start(&self) -> usize {
        self.context().trailing_ws_start
    }

    fn options(&self) -> ReorderOptions {
        self.context().options
    }

    /// Effective level of one character.
    fn level_at(&self, index: usize) -> Result<u8> {
        let ctx = self.context();
        if index >= ctx.len() {
            return Err(Error::IndexOutOfBounds {
                index,
                length: ctx.len(),
            });
        }
        Ok(ctx.effective_level(index))
    }

    /// Effective levels, with the trailing-whitespace override applied.
    ///
    /// Borrowed when no override is needed; the stored levels are never
    /// modified.
    fn levels(&self) -> Cow<'_, [u8]> {
        let ctx = self.context();
        let start = ctx.trailing_ws_start;
        if start >= ctx.len() {
            return Cow::Borrowed(ctx.levels);
        }
        let mut levels = Vec::with_capacity(ctx.len());
        levels.extend_from_slice(&ctx.levels[..start]);
        levels.extend((start..ctx.len()).map(|i| ctx.effective_level(i)));
        Cow::Owned(levels)
    }

    /// The runs in visual order, computing them on first access.
    fn runs(&self) -> Result<&RunSequence> {
        let cache = self.run_cache();
        if let Some(runs) = cache.get() {
            return Ok(runs);
        }
        let runs = RunSequence::build(&self.context())?;
        Ok(cache.get_or_init(|| runs))
    }

    fn run_count(&self) -> Result<usize> {
        Ok(self.runs()?.len())
    }

    /// Length of the visual result: marks added, controls removed.
    fn result_length(&self) -> Result<usize> {
        let ctx = self.context();
        if ctx.marks_active() {
            Ok(ctx.len() + self.runs()?.mark_count())
        } else {
            Ok(ctx.len() - ctx.control_count)
        }
    }

    /// The `run_index`-th run in visual order.
    fn visual_run(&self, run_index: usize) -> Result<VisualRun> {
        let runs = self.runs()?;
        let run = runs.get(run_index).ok_or(Error::RunIndexOutOfBounds {
            index: run_index,
            count: runs.len(),
        })?;
        Ok(VisualRun {
            logical_start: run.start(),
            length: runs.run_length(run_index),
            level: run.level(),
        })
    }

    /// The run holding `logical_position`.
    fn logical_run(&self, logical_position: usize) -> Result<LogicalRun> {
        let ctx = self.context();
        if logical_position >= ctx.len() {
            return Err(Error::IndexOutOfBounds {
                index: logical_position,
                length: ctx.len(),
            });
        }
        let runs = self.runs()?;
        let run_index = runs.run_containing(logical_position)?;
        Ok(LogicalRun {
            limit: runs[run_index].start() + runs.run_length(run_index),
            level: self.level_at(logical_position)?,
        })
    }

    /// Visual position of the character at `logical_index`.
    fn visual_index(&self, logical_index: usize) -> Result<Option<usize>> {
        let ctx = self.context();
        let length = ctx.len();
        if logical_index >= length {
            return Err(Error::IndexOutOfBounds {
                index: logical_index,
                length,
            });
        }
        let visual = match ctx.direction {
            Direction::Ltr => Some(logical_index),
            Direction::Rtl => Some(length - logical_index - 1),
            Direction::Mixed => mapping::visual_index(self.runs()?, logical_index),
        };
        let Some(visual) = visual else {
            return Ok(None);
        };
        if ctx.marks_active() {
            Ok(mapping::add_marks(self.runs()?, visual))
        } else if ctx.controls_active() {
            Ok(mapping::remove_controls(&ctx, self.runs()?, logical_index, visual))
        } else {
            Ok(Some(visual))
        }
    }

    /// Logical position of the character shown at `visual_index`.
    fn logical_index(&self, visual_index: usize) -> Result<Option<usize>> {
        let ctx = self.context();
        let result_length = self.result_length()?;
        if visual_index >= result_length {
            return Err(Error::IndexOutOfBounds {
                index: visual_index,
                length: result_length,
            });
        }
        if !ctx.marks_active() && !ctx.controls_active() {
            match ctx.direction {
                Direction::Ltr => return Ok(Some(visual_index)),
                Direction::Rtl => return Ok(Some(ctx.len() - visual_index - 1)),
                Direction::Mixed => {}
            }
        }
        Ok(mapping::logical_index(&ctx, self.runs()?, visual_index))
    }

    /// `map[logical] = visual`, with [`NOWHERE`](crate::NOWHERE) for removed controls.
    fn logical_map(&self) -> Result<Vec<usize>> {
        Ok(mapping::logical_map(&self.context(), self.runs()?))
    }

    /// `map[visual] = logical`, with [`NOWHERE`](crate::NOWHERE) for inserted marks.
    fn visual_map(&self) -> Result<Vec<usize>> {
        let runs = self.runs()?;
        Ok(mapping::visual_map(&self.context(), runs, self.result_length()?))
    }

    /// The text in visual order, with marks written and controls dropped as
    /// the options request. Characters are not mirrored or shaped.
    fn reordered_text(&self) -> Result<String> {
        Ok(write::reordered_text(&self.context(), self.runs()?))
    }
}

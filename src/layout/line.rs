//! Line projection over a paragraph subrange.

use std::borrow::Cow;
use std::cell::OnceCell;

use unicode_bidi::BidiClass;

use super::paragraph::Paragraph;
use super::source::{Context, Source};
use super::{BidiLayout, trailing_ws_start};
use crate::class::count_controls;
use crate::error::{Error, Result};
use crate::event::{LogLevel, emit_log_with};
use crate::level::Direction;
use crate::options::InsertPoint;
use crate::runs::RunSequence;

/// A line: the characters `start..limit` of a [`Paragraph`], reordered on
/// their own.
///
/// Text and classes are borrowed from the paragraph. Levels are borrowed too
/// when the paragraph is unidirectional; a mixed paragraph hands the line a
/// private copy, because the line's trailing whitespace is overridden to the
/// paragraph level independently of its siblings. The override is never
/// written into either array.
#[derive(Debug)]
pub struct Line<'p> {
    parent: &'p Paragraph,
    start: usize,
    text: &'p [char],
    dir_props: &'p [BidiClass],
    levels: Cow<'p, [u8]>,
    para_level: u8,
    direction: Direction,
    trailing_ws_start: usize,
    insert_points: Vec<InsertPoint>,
    control_count: usize,
    runs: OnceCell<RunSequence>,
}

impl<'p> Line<'p> {
    pub(super) fn project(parent: &'p Paragraph, start: usize, limit: usize) -> Result<Self> {
        let length = parent.len();
        if start > limit || limit > length {
            return Err(Error::InvalidLine {
                start,
                limit,
                length,
            });
        }
        if start < limit && parent.paragraph_index(start) != parent.paragraph_index(limit - 1) {
            return Err(Error::LineCrossesParagraph { start, limit });
        }

        let line_length = limit - start;
        let text = &parent.text()[start..limit];
        let dir_props = &parent.dir_props()[start..limit];
        let parent_levels = &parent.raw_levels()[start..limit];
        let mut para_level = parent.para_level_at(start);

        let insert_points = if parent.marks_inserted() {
            parent
                .insert_points()
                .iter()
                .filter(|p| (start..limit).contains(&p.position))
                .map(|p| InsertPoint::new(p.position - start, p.flags))
                .collect()
        } else {
            Vec::new()
        };
        let control_count = if parent.controls_removed() {
            count_controls(text)
        } else {
            0
        };

        let (levels, direction, trailing) = if parent.direction().is_mixed() {
            let levels = parent_levels.to_vec();
            let mut trailing = trailing_ws_start(dir_props, &levels, para_level, 0);
            let direction = line_direction(&levels, trailing, para_level);
            match direction {
                Direction::Ltr => {
                    para_level = (para_level + 1) & !1;
                    trailing = 0;
                }
                Direction::Rtl => {
                    para_level |= 1;
                    trailing = 0;
                }
                Direction::Mixed => {}
            }
            (Cow::Owned(levels), direction, trailing)
        } else {
            // The parent's levels are all implicitly its paragraph level;
            // clip its boundary into the line.
            let parent_trailing = parent.trailing_ws_start();
            let trailing = if parent_trailing <= start {
                0
            } else if parent_trailing < limit {
                parent_trailing - start
            } else {
                line_length
            };
            (Cow::Borrowed(parent_levels), parent.direction(), trailing)
        };

        emit_log_with(LogLevel::Debug, || {
            format!("line {start}..{limit}: {direction:?}, trailing ws at {trailing}")
        });

        Ok(Self {
            parent,
            start,
            text,
            dir_props,
            levels,
            para_level,
            direction,
            trailing_ws_start: trailing,
            insert_points,
            control_count,
            runs: OnceCell::new(),
        })
    }

    /// Start of the line in paragraph coordinates.
    #[must_use]
    pub fn start(&self) -> usize {
        self.start
    }

    /// Limit of the line in paragraph coordinates.
    #[must_use]
    pub fn limit(&self) -> usize {
        self.start + self.text.len()
    }

    #[must_use]
    pub fn parent(&self) -> &'p Paragraph {
        self.parent
    }

    /// Whether the line reads its levels straight from the paragraph.
    #[must_use]
    pub fn shares_levels(&self) -> bool {
        matches!(self.levels, Cow::Borrowed(_))
    }
}

/// Direction of a line cut from a mixed paragraph.
fn line_direction(levels: &[u8], trailing: usize, para_level: u8) -> Direction {
    if trailing == 0 {
        // Everything is at the paragraph level.
        return Direction::from_level(para_level);
    }
    let parity = levels[0] & 1;
    if trailing < levels.len() && para_level & 1 != parity {
        // The trailing run at the paragraph level differs from the first character.
        return Direction::Mixed;
    }
    if levels[1..trailing].iter().all(|&level| level & 1 == parity) {
        Direction::from_level(parity)
    } else {
        Direction::Mixed
    }
}

impl Source for Line<'_> {
    fn context(&self) -> Context<'_> {
        Context {
            text: self.text,
            dir_props: self.dir_props,
            levels: &self.levels,
            para_level: self.para_level,
            paragraphs: &[],
            direction: self.direction,
            trailing_ws_start: self.trailing_ws_start,
            options: self.parent.options(),
            insert_points: &self.insert_points,
            control_count: self.control_count,
        }
    }

    fn run_cache(&self) -> &OnceCell<RunSequence> {
        &self.runs
    }
}

impl BidiLayout for Line<'_> {}

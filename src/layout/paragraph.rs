//! Paragraph state: resolved text owned by the caller of the engine.

use std::cell::OnceCell;

use unicode_bidi::BidiClass;

use super::line::Line;
use super::source::{Context, Source};
use super::{BidiLayout, trailing_ws_start};
use crate::class::{classify, count_controls};
use crate::error::{Error, Result};
use crate::event::{LogLevel, emit_log_with};
use crate::level::{Direction, MAX_EXPLICIT_LEVEL, MAX_LEVEL};
use crate::options::{InsertPoint, ReorderOptions};
use crate::runs::RunSequence;
use crate::unicode::resolve_levels;

/// One paragraph of a multi-paragraph text, in character indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ParagraphInfo {
    pub start: usize,
    pub limit: usize,
    pub level: u8,
}

/// Resolved text: characters, their classes and embedding levels.
///
/// The arrays are fixed once the paragraph is built; lines borrow them.
/// Derived state (direction, trailing-whitespace boundary, control count) is
/// recomputed whenever a `with_*` method changes an input.
///
/// # Examples
///
/// ```
/// use bidi_line::{BidiLayout, Paragraph};
///
/// let para = Paragraph::new("abc", vec![0, 1, 1], 0).unwrap();
/// assert_eq!(para.visual_map().unwrap(), vec![0, 2, 1]);
/// ```
#[derive(Clone, Debug)]
pub struct Paragraph {
    text: Vec<char>,
    dir_props: Vec<BidiClass>,
    levels: Vec<u8>,
    para_level: u8,
    paragraphs: Vec<ParagraphInfo>,
    direction: Direction,
    trailing_ws_start: usize,
    options: ReorderOptions,
    insert_points: Vec<InsertPoint>,
    control_count: usize,
    runs: OnceCell<RunSequence>,
}

impl Paragraph {
    /// Build a paragraph from levels resolved elsewhere.
    ///
    /// Character classes come from the Unicode Character Database; use
    /// [`with_dir_props`](Self::with_dir_props) to supply different ones.
    pub fn new(text: &str, levels: Vec<u8>, para_level: u8) -> Result<Self> {
        let text: Vec<char> = text.chars().collect();
        if levels.len() != text.len() {
            return Err(Error::LengthMismatch {
                what: "levels",
                expected: text.len(),
                actual: levels.len(),
            });
        }
        if para_level > MAX_EXPLICIT_LEVEL {
            return Err(Error::InvalidLevel {
                index: 0,
                level: para_level,
            });
        }
        if let Some((index, &level)) = levels.iter().enumerate().find(|&(_, &l)| l > MAX_LEVEL) {
            return Err(Error::InvalidLevel { index, level });
        }

        let dir_props = classify(&text);
        let paragraphs = vec![ParagraphInfo {
            start: 0,
            limit: text.len(),
            level: para_level,
        }];
        let mut para = Self {
            text,
            dir_props,
            levels,
            para_level,
            paragraphs,
            direction: Direction::Ltr,
            trailing_ws_start: 0,
            options: ReorderOptions::empty(),
            insert_points: Vec::new(),
            control_count: 0,
            runs: OnceCell::new(),
        };
        para.refresh();
        Ok(para)
    }

    /// Resolve `text` with `unicode-bidi` and build a paragraph from it.
    ///
    /// `base_level` forces the paragraph level; `None` detects it from the
    /// first strong character of each paragraph.
    pub fn resolve(text: &str, base_level: Option<u8>) -> Result<Self> {
        let resolved = resolve_levels(text, base_level)?;
        let para_level = resolved.paragraphs.first().map_or(0, |p| p.level);
        Self::new(text, resolved.levels, para_level)?.with_paragraphs(resolved.paragraphs)
    }

    /// Replace the per-character classes.
    pub fn with_dir_props(mut self, dir_props: Vec<BidiClass>) -> Result<Self> {
        if dir_props.len() != self.text.len() {
            return Err(Error::LengthMismatch {
                what: "dir_props",
                expected: self.text.len(),
                actual: dir_props.len(),
            });
        }
        self.dir_props = dir_props;
        self.refresh();
        Ok(self)
    }

    /// Split the text into several paragraphs. They must tile the text in
    /// order; the first one's level becomes the base paragraph level.
    pub fn with_paragraphs(mut self, paragraphs: Vec<ParagraphInfo>) -> Result<Self> {
        let mut expected_start = 0;
        for para in &paragraphs {
            let tiles = para.start == expected_start
                && para.start <= para.limit
                && (para.start < para.limit || self.text.is_empty());
            if !tiles || para.level > MAX_EXPLICIT_LEVEL {
                return Err(Error::InvalidParagraph {
                    start: para.start,
                    limit: para.limit,
                });
            }
            expected_start = para.limit;
        }
        if paragraphs.is_empty() || expected_start != self.text.len() {
            return Err(Error::InvalidParagraph {
                start: expected_start,
                limit: self.text.len(),
            });
        }
        self.para_level = paragraphs[0].level;
        self.paragraphs = paragraphs;
        self.refresh();
        Ok(self)
    }

    /// Record mark insertion points. They take effect with
    /// [`ReorderOptions::INSERT_MARKS`].
    pub fn with_insert_points(mut self, insert_points: Vec<InsertPoint>) -> Result<Self> {
        if let Some(point) = insert_points.iter().find(|p| p.position >= self.text.len()) {
            return Err(Error::InvalidInsertPoint {
                position: point.position,
                length: self.text.len(),
            });
        }
        self.insert_points = insert_points;
        self.refresh();
        Ok(self)
    }

    #[must_use]
    pub fn with_options(mut self, options: ReorderOptions) -> Self {
        self.options = options;
        self.refresh();
        self
    }

    fn refresh(&mut self) {
        self.runs = OnceCell::new();
        self.direction = Direction::classify(
            self.paragraphs
                .iter()
                .map(|p| p.level)
                .chain(self.levels.iter().copied()),
        );
        self.trailing_ws_start = if self.direction.is_mixed() {
            let (last_start, last_level) = self
                .paragraphs
                .last()
                .map_or((0, self.para_level), |p| (p.start, p.level));
            trailing_ws_start(&self.dir_props, &self.levels, last_level, last_start)
        } else {
            // Every level is implicitly the paragraph level.
            0
        };
        self.control_count = if self.controls_removed() {
            count_controls(&self.text)
        } else {
            0
        };
        emit_log_with(LogLevel::Debug, || {
            format!(
                "paragraph: {} chars, {} paragraph(s), {:?}, trailing ws at {}",
                self.text.len(),
                self.paragraphs.len(),
                self.direction,
                self.trailing_ws_start
            )
        });
    }

    pub(crate) fn marks_inserted(&self) -> bool {
        self.options.contains(ReorderOptions::INSERT_MARKS) && !self.insert_points.is_empty()
    }

    pub(crate) fn controls_removed(&self) -> bool {
        self.options.contains(ReorderOptions::REMOVE_CONTROLS) && !self.marks_inserted()
    }

    /// Insert points, whether or not marks are enabled.
    #[must_use]
    pub fn insert_points(&self) -> &[InsertPoint] {
        &self.insert_points
    }

    #[must_use]
    pub fn paragraphs(&self) -> &[ParagraphInfo] {
        &self.paragraphs
    }

    #[must_use]
    pub fn paragraph_count(&self) -> usize {
        self.paragraphs.len()
    }

    #[must_use]
    pub fn paragraph(&self, index: usize) -> Option<&ParagraphInfo> {
        self.paragraphs.get(index)
    }

    /// Index of the paragraph holding character `char_index`.
    #[must_use]
    pub fn paragraph_index(&self, char_index: usize) -> Option<usize> {
        if char_index >= self.text.len() {
            return None;
        }
        Some(self.paragraphs.partition_point(|p| p.limit <= char_index))
    }

    /// Level of the paragraph holding `char_index`.
    #[must_use]
    pub fn para_level_at(&self, char_index: usize) -> u8 {
        self.context().para_level_at(char_index)
    }

    /// Project the line `start..limit`. The line must lie within one
    /// paragraph.
    pub fn line(&self, start: usize, limit: usize) -> Result<Line<'_>> {
        Line::project(self, start, limit)
    }

    pub(crate) fn raw_levels(&self) -> &[u8] {
        &self.levels
    }
}

impl Source for Paragraph {
    fn context(&self) -> Context<'_> {
        Context {
            text: &self.text,
            dir_props: &self.dir_props,
            levels: &self.levels,
            para_level: self.para_level,
            paragraphs: &self.paragraphs,
            direction: self.direction,
            trailing_ws_start: self.trailing_ws_start,
            options: self.options,
            insert_points: if self.marks_inserted() {
                &self.insert_points[..]
            } else {
                &[]
            },
            control_count: self.control_count,
        }
    }

    fn run_cache(&self) -> &OnceCell<RunSequence> {
        &self.runs
    }
}

impl BidiLayout for Paragraph {}

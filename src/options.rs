//! Reordering options and directional mark insertion points.

use bitflags::bitflags;

bitflags! {
    /// Options that change how logical and visual positions correspond.
    ///
    /// With neither flag set, every character appears exactly once in the
    /// visual order. When both are set, mark insertion wins and controls are
    /// left in place.
    #[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
    pub struct ReorderOptions: u32 {
        /// Account for LRM/RLM marks inserted at the recorded insertion points.
        const INSERT_MARKS    = 0x01;
        /// Drop bidi control characters from the visual result.
        const REMOVE_CONTROLS = 0x02;
    }
}

bitflags! {
    /// Marks to insert around a run in visual order.
    #[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
    pub struct MarkFlags: u8 {
        const LRM_BEFORE = 0x01;
        const LRM_AFTER  = 0x02;
        const RLM_BEFORE = 0x04;
        const RLM_AFTER  = 0x08;
    }
}

impl MarkFlags {
    /// Either mark before the run.
    pub const BEFORE: Self = Self::LRM_BEFORE.union(Self::RLM_BEFORE);
    /// Either mark after the run.
    pub const AFTER: Self = Self::LRM_AFTER.union(Self::RLM_AFTER);

    /// Whether a mark is emitted before the run.
    #[must_use]
    pub const fn has_before(self) -> bool {
        self.intersects(Self::BEFORE)
    }

    /// Whether a mark is emitted after the run.
    #[must_use]
    pub const fn has_after(self) -> bool {
        self.intersects(Self::AFTER)
    }

    /// Number of visual slots these flags add: at most one before and one after.
    #[must_use]
    pub const fn mark_count(self) -> usize {
        self.has_before() as usize + self.has_after() as usize
    }
}

/// A request, recorded by the shaping layer, to surround the run holding
/// `position` with directional marks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct InsertPoint {
    /// Logical index of a character inside the run.
    pub position: usize,
    pub flags: MarkFlags,
}

impl InsertPoint {
    #[must_use]
    pub const fn new(position: usize, flags: MarkFlags) -> Self {
        Self { position, flags }
    }
}

//! Reordering straight from a level array, without paragraph state.
//!
//! These functions validate their input: an empty array, a negative level,
//! or a level above [`MAX_LEVEL`] gives `None`. They share nothing with the
//! run-based path in [`crate::runs`] and work one character at a time.

use crate::event::{LogLevel, emit_log_with};
use crate::level::MAX_LEVEL;
use crate::mapping::NOWHERE;

/// Identity map plus the level range, or `None` for unusable levels.
fn prepare_reorder<L>(levels: &[L]) -> Option<(Vec<usize>, u8, u8)>
where
    L: Copy + Into<i16>,
{
    if levels.is_empty() {
        return None;
    }
    let mut min_level = MAX_LEVEL;
    let mut max_level = 0;
    for (index, &level) in levels.iter().enumerate() {
        let level: i16 = level.into();
        let Some(level) = u8::try_from(level).ok().filter(|&l| l <= MAX_LEVEL) else {
            emit_log_with(LogLevel::Warn, || {
                format!("primitive reorder: invalid level {level} at index {index}")
            });
            return None;
        };
        min_level = min_level.min(level);
        max_level = max_level.max(level);
    }
    Some(((0..levels.len()).collect(), min_level, max_level))
}

fn level_at<L: Copy + Into<i16>>(levels: &[L], index: usize) -> i16 {
    levels[index].into()
}

/// Calls `reverse(start, limit)` for each maximal interval of levels at or
/// above each threshold, from the highest level down to the lowest odd one.
fn for_each_interval<L, F>(levels: &[L], min_level: u8, max_level: u8, mut reverse: F)
where
    L: Copy + Into<i16>,
    F: FnMut(usize, usize),
{
    let length = levels.len();
    let lowest = i16::from(min_level | 1);
    let mut threshold = i16::from(max_level);
    while threshold >= lowest {
        let mut start = 0;
        loop {
            while start < length && level_at(levels, start) < threshold {
                start += 1;
            }
            if start >= length {
                break;
            }
            let mut limit = start + 1;
            while limit < length && level_at(levels, limit) >= threshold {
                limit += 1;
            }
            reverse(start, limit);
            if limit == length {
                break;
            }
            start = limit + 1;
        }
        threshold -= 1;
    }
}

/// `map[logical] = visual` for a line with the given levels.
///
/// Reversals are applied to index values (`start + limit - 1 - value`), so
/// no entries move.
///
/// ```
/// use bidi_line::reorder_logical;
///
/// assert_eq!(reorder_logical(&[0u8, 1, 1, 0]), Some(vec![0, 2, 1, 3]));
/// assert_eq!(reorder_logical(&[0i16, -1]), None);
/// ```
#[must_use]
pub fn reorder_logical<L>(levels: &[L]) -> Option<Vec<usize>>
where
    L: Copy + Into<i16>,
{
    let (mut map, min_level, max_level) = prepare_reorder(levels)?;
    if min_level == max_level && min_level & 1 == 0 {
        return Some(map);
    }
    for_each_interval(levels, min_level, max_level, |start, limit| {
        let sum_of_ends = start + limit - 1;
        for value in &mut map[start..limit] {
            *value = sum_of_ends - *value;
        }
    });
    Some(map)
}

/// `map[visual] = logical` for a line with the given levels.
///
/// ```
/// use bidi_line::reorder_visual;
///
/// assert_eq!(reorder_visual(&[2u8, 2, 1, 1]), Some(vec![3, 2, 0, 1]));
/// ```
#[must_use]
pub fn reorder_visual<L>(levels: &[L]) -> Option<Vec<usize>>
where
    L: Copy + Into<i16>,
{
    let (mut map, min_level, max_level) = prepare_reorder(levels)?;
    if min_level == max_level && min_level & 1 == 0 {
        return Some(map);
    }
    for_each_interval(levels, min_level, max_level, |start, limit| {
        let (mut first, mut last) = (start, limit - 1);
        while first < last {
            map.swap(first, last);
            first += 1;
            last -= 1;
        }
    });
    Some(map)
}

/// Invert an index map.
///
/// `NOWHERE` entries are skipped. The result is as long as the largest
/// value plus one; slots nothing maps to hold `NOWHERE`. When two entries
/// share a value the lower index wins.
#[must_use]
pub fn invert_map(map: &[usize]) -> Vec<usize> {
    let Some(max) = map.iter().copied().filter(|&v| v != NOWHERE).max() else {
        return Vec::new();
    };
    let mut inverse = vec![NOWHERE; max + 1];
    for (index, &value) in map.iter().enumerate().rev() {
        if value != NOWHERE {
            inverse[value] = index;
        }
    }
    inverse
}

//! Rule L2 over level runs.

use super::Run;

/// Reverse runs into visual order.
///
/// `runs` arrive in logical order with `limit` holding each run's length.
/// Each run carries its own level, so the trailing-whitespace run takes part
/// in the threshold passes like any other. In a single paragraph its level
/// is the minimum and it only moves in the final pass.
/// Only run order changes; characters inside a run are never touched.
pub(super) fn reorder_runs(runs: &mut [Run], min_level: u8, max_level: u8) {
    if max_level <= (min_level | 1) {
        return;
    }

    // Levels down to `min_level + 1` are reversed stretch by stretch; an odd
    // `min_level` is covered by reversing the whole sequence at the end.
    let lowest = min_level + 1;
    let run_count = runs.len();

    for threshold in (lowest..max_level).rev() {
        let mut first = 0;
        loop {
            while first < run_count && runs[first].level < threshold {
                first += 1;
            }
            if first >= run_count {
                break;
            }
            let mut limit = first + 1;
            while limit < run_count && runs[limit].level >= threshold {
                limit += 1;
            }
            reverse(runs, first, limit - 1);
            if limit == run_count {
                break;
            }
            first = limit + 1;
        }
    }

    if min_level & 1 == 1 {
        reverse(runs, 0, run_count - 1);
    }
}

fn reverse(runs: &mut [Run], mut first: usize, mut last: usize) {
    while first < last {
        runs.swap(first, last);
        first += 1;
        last -= 1;
    }
}

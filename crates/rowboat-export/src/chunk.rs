// SPDX-FileCopyrightText: 2026 Rowboat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Pure sheet-chunk planning.
//!
//! A sheet holds at most `row_limit` physical rows; one is spent on the
//! header, leaving `row_limit - 1` data rows per chunk. The planner is kept
//! separate from the writer so the partition arithmetic is testable without
//! materializing millions of rows.

use std::ops::Range;

/// Partitions `total_rows` data rows into per-sheet index ranges.
///
/// Returns an empty plan for an empty result (the writer emits the
/// placeholder sheet instead). `row_limit` must be at least 2 so every
/// sheet can hold a header and at least one data row.
pub fn chunk_bounds(total_rows: usize, row_limit: usize) -> Vec<Range<usize>> {
    debug_assert!(row_limit >= 2, "row_limit must leave room for the header");
    let per_sheet = row_limit - 1;
    let mut bounds = Vec::new();
    let mut start = 0;
    while start < total_rows {
        let end = (start + per_sheet).min(total_rows);
        bounds.push(start..end);
        start = end;
    }
    bounds
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn empty_result_has_no_chunks() {
        assert!(chunk_bounds(0, 1_048_576).is_empty());
    }

    #[test]
    fn single_partial_chunk() {
        assert_eq!(chunk_bounds(5, 1_048_576), vec![0..5]);
    }

    #[test]
    fn exact_fit_does_not_spill() {
        // row_limit 4 -> 3 data rows per sheet.
        assert_eq!(chunk_bounds(3, 4), vec![0..3]);
        assert_eq!(chunk_bounds(6, 4), vec![0..3, 3..6]);
    }

    #[test]
    fn spec_partition_shape() {
        // 2 * (limit - 1) + 5 rows -> exactly 3 sheets: two full, one of 5.
        let limit = 1_048_576;
        let rows = 2 * (limit - 1) + 5;
        let bounds = chunk_bounds(rows, limit);
        assert_eq!(bounds.len(), 3);
        assert_eq!(bounds[0].len(), limit - 1);
        assert_eq!(bounds[1].len(), limit - 1);
        assert_eq!(bounds[2].len(), 5);
    }

    proptest! {
        #[test]
        fn chunks_cover_every_row_exactly_once(
            total in 0usize..10_000,
            limit in 2usize..512,
        ) {
            let bounds = chunk_bounds(total, limit);
            // Contiguous, ordered, complete.
            let mut expected_start = 0;
            for range in &bounds {
                prop_assert_eq!(range.start, expected_start);
                prop_assert!(range.len() <= limit - 1);
                prop_assert!(!range.is_empty());
                expected_start = range.end;
            }
            prop_assert_eq!(expected_start, total);
            // Every chunk except the last is full.
            if let Some((_last, full)) = bounds.split_last() {
                for range in full {
                    prop_assert_eq!(range.len(), limit - 1);
                }
            }
        }
    }
}

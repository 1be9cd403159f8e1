//! Column candidate counting and branch column selection.
//!
//! At every search node the engine needs, for each active column, the number
//! of active rows that satisfy it. That count is a pure reduction over the
//! active sub-matrix, so it sits behind the [`ColumnCounter`] trait with a
//! sequential backend and a rayon data-parallel backend; the search is
//! agnostic to which one supplies the counts.

use rayon::prelude::*;

use crate::cover::CoverMatrix;

/// Supplies per-column candidate counts over the active sub-matrix.
pub trait ColumnCounter {
    /// Returns `counts` aligned with `active_cols`: `counts[i]` is the number
    /// of rows in `active_rows` with a 1 in column `active_cols[i]`.
    fn column_counts(
        &self,
        cover: &CoverMatrix,
        active_rows: &[usize],
        active_cols: &[usize],
    ) -> Vec<usize>;
}

/// Plain single-threaded reduction.
#[derive(Debug, Clone, Copy, Default)]
pub struct SequentialCounter;

impl ColumnCounter for SequentialCounter {
    fn column_counts(
        &self,
        cover: &CoverMatrix,
        active_rows: &[usize],
        active_cols: &[usize],
    ) -> Vec<usize> {
        active_cols
            .iter()
            .map(|&col| count_column(cover, active_rows, col))
            .collect()
    }
}

/// Rayon-backed reduction; one task per active column.
///
/// The cover matrix is read-only, so sharing it across the pool is free.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParallelCounter;

impl ColumnCounter for ParallelCounter {
    fn column_counts(
        &self,
        cover: &CoverMatrix,
        active_rows: &[usize],
        active_cols: &[usize],
    ) -> Vec<usize> {
        active_cols
            .par_iter()
            .map(|&col| count_column(cover, active_rows, col))
            .collect()
    }
}

#[inline]
fn count_column(cover: &CoverMatrix, active_rows: &[usize], col: usize) -> usize {
    active_rows
        .iter()
        .filter(|&&row| cover.is_set(row, col))
        .count()
}

/// Picks the active column with the fewest candidate rows.
///
/// Ties break toward the lowest column index; `active_cols` is kept in
/// ascending order, so keeping the first strict minimum pins that rule. A
/// returned count of 0 marks an infeasible branch. `None` only when there are
/// no active columns at all.
pub fn select_column<C: ColumnCounter + ?Sized>(
    counter: &C,
    cover: &CoverMatrix,
    active_rows: &[usize],
    active_cols: &[usize],
) -> Option<(usize, usize)> {
    let counts = counter.column_counts(cover, active_rows, active_cols);
    debug_assert_eq!(counts.len(), active_cols.len());

    let mut best: Option<(usize, usize)> = None;
    for (&col, &count) in active_cols.iter().zip(&counts) {
        if best.is_none_or(|(_, best_count)| count < best_count) {
            best = Some((col, count));
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cover::build_cover;
    use crate::puzzle::{Puzzle, SAMPLE_9X9};

    #[test]
    fn sequential_and_parallel_counts_agree() {
        let puzzle = Puzzle::parse(SAMPLE_9X9).unwrap();
        let cover = build_cover(&puzzle);
        let rows: Vec<usize> = (0..cover.matrix.rows()).collect();
        let cols: Vec<usize> = (0..cover.matrix.cols()).collect();

        let sequential = SequentialCounter.column_counts(&cover.matrix, &rows, &cols);
        let parallel = ParallelCounter.column_counts(&cover.matrix, &rows, &cols);
        assert_eq!(sequential, parallel);

        // also with a sparse active set
        let some_rows: Vec<usize> = rows.iter().copied().step_by(7).collect();
        let some_cols: Vec<usize> = cols.iter().copied().step_by(5).collect();
        assert_eq!(
            SequentialCounter.column_counts(&cover.matrix, &some_rows, &some_cols),
            ParallelCounter.column_counts(&cover.matrix, &some_rows, &some_cols)
        );
    }

    #[test]
    fn ties_break_toward_the_lowest_column() {
        // a fully empty 4x4 grid: every cell constraint counts 4
        let puzzle = Puzzle::parse("................").unwrap();
        let cover = build_cover(&puzzle);
        let rows: Vec<usize> = (0..cover.matrix.rows()).collect();
        let cols: Vec<usize> = (0..cover.matrix.cols()).collect();

        let (col, count) = select_column(&SequentialCounter, &cover.matrix, &rows, &cols).unwrap();
        assert_eq!(col, 0);
        assert_eq!(count, 4);
    }

    #[test]
    fn exhausted_columns_report_zero() {
        let puzzle = Puzzle::parse(SAMPLE_9X9).unwrap();
        let cover = build_cover(&puzzle);
        let cols: Vec<usize> = (0..cover.matrix.cols()).collect();

        // no active rows left: every column is infeasible
        let (col, count) = select_column(&SequentialCounter, &cover.matrix, &[], &cols).unwrap();
        assert_eq!(col, 0);
        assert_eq!(count, 0);
    }

    #[test]
    fn no_active_columns_yields_none() {
        let puzzle = Puzzle::parse(SAMPLE_9X9).unwrap();
        let cover = build_cover(&puzzle);
        assert!(select_column(&SequentialCounter, &cover.matrix, &[0, 1], &[]).is_none());
    }
}

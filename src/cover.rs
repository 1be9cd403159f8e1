//! Exact-cover matrix construction.
//!
//! Each candidate digit placement becomes one matrix row (a possibility) and
//! each of the four constraint classes contributes `grid_width^2` columns:
//!
//! - cell occupied: `row * w + col`
//! - row digit:     `w^2 + row * w + (digit - 1)`
//! - column digit:  `2 * w^2 + col * w + (digit - 1)`
//! - block digit:   `3 * w^2 + block * w + (digit - 1)`
//!
//! A filled cell emits exactly one possibility; an empty cell emits one per
//! digit, ascending. Possibilities are generated in row-major cell order, so
//! possibility index order is fixed and the search is deterministic.

use log::debug;

use crate::puzzle::Puzzle;

/// One candidate placement: digit goes into (row, col).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Possibility {
    pub row: usize,
    pub col: usize,
    pub digit: u8,
}

/// Dense 0/1 matrix, rows = possibilities, columns = constraints.
///
/// Immutable once built; the search only reads it.
#[derive(Debug, Clone)]
pub struct CoverMatrix {
    bits: Vec<u8>,
    rows: usize,
    cols: usize,
}

impl CoverMatrix {
    pub(crate) fn zeroed(rows: usize, cols: usize) -> Self {
        Self {
            bits: vec![0; rows * cols],
            rows,
            cols,
        }
    }

    /// Number of possibility rows.
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of constraint columns.
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// True if possibility `row` satisfies constraint `col`.
    #[inline]
    pub fn is_set(&self, row: usize, col: usize) -> bool {
        self.bits[row * self.cols + col] != 0
    }

    #[inline]
    pub(crate) fn set(&mut self, row: usize, col: usize) {
        self.bits[row * self.cols + col] = 1;
    }
}

/// The cover matrix plus the table naming each of its rows.
#[derive(Debug, Clone)]
pub struct Cover {
    pub matrix: CoverMatrix,
    pub possibilities: Vec<Possibility>,
}

/// The four constraint columns satisfied by a possibility.
pub fn constraint_columns(
    possibility: Possibility,
    grid_width: usize,
    block_width: usize,
) -> [usize; 4] {
    let Possibility { row, col, digit } = possibility;
    let w2 = grid_width * grid_width;
    let digit = digit as usize - 1;
    let block = (row / block_width) * (grid_width / block_width) + col / block_width;
    [
        row * grid_width + col,
        w2 + row * grid_width + digit,
        2 * w2 + col * grid_width + digit,
        3 * w2 + block * grid_width + digit,
    ]
}

/// Builds the cover matrix and possibility table for a puzzle.
pub fn build_cover(puzzle: &Puzzle) -> Cover {
    let w = puzzle.grid_width();
    let givens = puzzle.given_count();
    let n_possibilities = (w * w - givens) * w + givens;
    let n_constraints = 4 * w * w;

    let mut matrix = CoverMatrix::zeroed(n_possibilities, n_constraints);
    let mut possibilities = Vec::with_capacity(n_possibilities);

    for row in 0..w {
        for col in 0..w {
            let given = puzzle.get(row, col);
            let digits = if given != 0 {
                given..=given
            } else {
                1..=w as u8
            };
            for digit in digits {
                let possibility = Possibility { row, col, digit };
                for c in constraint_columns(possibility, w, puzzle.block_width()) {
                    matrix.set(possibilities.len(), c);
                }
                possibilities.push(possibility);
            }
        }
    }

    debug_assert_eq!(possibilities.len(), n_possibilities);
    debug!(
        "cover matrix built: {} possibilities x {} constraints",
        n_possibilities, n_constraints
    );

    Cover {
        matrix,
        possibilities,
    }
}

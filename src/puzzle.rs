//! Puzzle grid representation, validation, and text formats.
//!
//! A puzzle is a flat row-major array of cell values where 0 marks an empty
//! cell. `block_width` squared must equal `grid_width`, so the classic 9x9
//! puzzle has 3x3 blocks and a 4x4 puzzle has 2x2 blocks.

use std::fmt;

use rustc_hash::FxHashSet;

/// The sample 9x9 puzzle used by the CLI and benchmarks when no file is given.
pub const SAMPLE_9X9: &str = "\
    050070083\
    004000060\
    000050000\
    830600000\
    000900100\
    000000000\
    507000300\
    000302000\
    100000000";

/// Configuration errors detected before any solving starts.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ConfigError {
    /// The grid is empty or too wide for one-byte cell values.
    #[display("grid width must be in 1..=255")]
    WidthOutOfRange,
    /// `block_width` squared does not equal `grid_width`.
    #[display("block width {block_width} squared must equal grid width {grid_width}")]
    UnsquareBlock {
        grid_width: usize,
        block_width: usize,
    },
    /// The cell buffer does not hold `grid_width` squared values.
    #[display("expected {expected} cells for a {grid_width}x{grid_width} grid, got {got}")]
    WrongCellCount {
        grid_width: usize,
        expected: usize,
        got: usize,
    },
    /// A cell value lies outside `0..=grid_width`.
    #[display("cell ({row}, {col}) holds {digit}, outside 0..={grid_width}")]
    DigitOutOfRange {
        row: usize,
        col: usize,
        digit: u8,
        grid_width: usize,
    },
    /// Two fixed cells claim the same digit in a row, column, or block.
    #[display("given digit {digit} at ({row}, {col}) repeats an earlier given")]
    ConflictingGiven { row: usize, col: usize, digit: u8 },
    /// Puzzle text is not a square character grid.
    #[display("puzzle text has {got} cells, which is not a square grid with square blocks")]
    UnsquareText { got: usize },
    /// Puzzle text contains something other than a digit, `.`, or whitespace.
    #[display("invalid character {found:?} in puzzle text")]
    BadCharacter { found: char },
}

/// A validated puzzle grid.
///
/// Construction checks every precondition the solver relies on, so a `Puzzle`
/// value can always be turned into a cover matrix directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Puzzle {
    cells: Vec<u8>,
    grid_width: usize,
    block_width: usize,
}

impl Puzzle {
    /// Creates a puzzle from row-major cells, rejecting invalid configurations.
    pub fn new(cells: Vec<u8>, grid_width: usize, block_width: usize) -> Result<Self, ConfigError> {
        if grid_width == 0 || grid_width > u8::MAX as usize {
            return Err(ConfigError::WidthOutOfRange);
        }
        if block_width * block_width != grid_width {
            return Err(ConfigError::UnsquareBlock {
                grid_width,
                block_width,
            });
        }
        let expected = grid_width * grid_width;
        if cells.len() != expected {
            return Err(ConfigError::WrongCellCount {
                grid_width,
                expected,
                got: cells.len(),
            });
        }
        for (i, &digit) in cells.iter().enumerate() {
            if digit as usize > grid_width {
                return Err(ConfigError::DigitOutOfRange {
                    row: i / grid_width,
                    col: i % grid_width,
                    digit,
                    grid_width,
                });
            }
        }

        let puzzle = Self {
            cells,
            grid_width,
            block_width,
        };
        puzzle.check_givens()?;
        Ok(puzzle)
    }

    /// Parses a compact character grid: one digit per cell, `.` or `0` for
    /// empty, whitespace ignored. Grid and block widths are inferred from the
    /// cell count.
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let mut cells = Vec::new();
        for ch in text.chars() {
            if ch.is_whitespace() {
                continue;
            }
            match ch {
                '.' => cells.push(0),
                '0'..='9' => cells.push(ch as u8 - b'0'),
                found => return Err(ConfigError::BadCharacter { found }),
            }
        }

        let grid_width = int_sqrt(cells.len());
        let block_width = grid_width.and_then(int_sqrt);
        match (grid_width, block_width) {
            (Some(grid_width), Some(block_width)) if grid_width > 0 => {
                Self::new(cells, grid_width, block_width)
            }
            _ => Err(ConfigError::UnsquareText { got: cells.len() }),
        }
    }

    /// Builds a completed puzzle from solver output without re-validation.
    ///
    /// Only called with cells reconstructed from an exact cover, which the
    /// search already guarantees to be complete and conflict-free.
    pub(crate) fn from_solved_cells(cells: Vec<u8>, grid_width: usize, block_width: usize) -> Self {
        debug_assert_eq!(cells.len(), grid_width * grid_width);
        debug_assert!(cells.iter().all(|&d| d != 0 && d as usize <= grid_width));
        Self {
            cells,
            grid_width,
            block_width,
        }
    }

    /// Side length of the grid.
    #[inline]
    pub fn grid_width(&self) -> usize {
        self.grid_width
    }

    /// Side length of one block.
    #[inline]
    pub fn block_width(&self) -> usize {
        self.block_width
    }

    /// Row-major cell values, 0 for empty.
    #[inline]
    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    /// Value at `(row, col)`, 0 for empty.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> u8 {
        self.cells[row * self.grid_width + col]
    }

    /// The block index of `(row, col)`, counting left to right, top down.
    #[inline]
    pub fn block_of(&self, row: usize, col: usize) -> usize {
        (row / self.block_width) * (self.grid_width / self.block_width) + col / self.block_width
    }

    /// Number of filled cells.
    pub fn given_count(&self) -> usize {
        self.cells.iter().filter(|&&d| d != 0).count()
    }

    /// Rejects puzzles where two givens claim the same digit in a unit.
    fn check_givens(&self) -> Result<(), ConfigError> {
        // keys: (unit class, unit index, digit)
        let mut seen: FxHashSet<(u8, usize, u8)> = FxHashSet::default();
        for row in 0..self.grid_width {
            for col in 0..self.grid_width {
                let digit = self.get(row, col);
                if digit == 0 {
                    continue;
                }
                if !seen.insert((0, row, digit))
                    || !seen.insert((1, col, digit))
                    || !seen.insert((2, self.block_of(row, col), digit))
                {
                    return Err(ConfigError::ConflictingGiven { row, col, digit });
                }
            }
        }
        Ok(())
    }
}

impl fmt::Display for Puzzle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_cells(&self.cells, self.grid_width))
    }
}

/// Formats row-major cells as text, one grid row per line.
///
/// Empty cells show as `_`; values are right-aligned to the width of the
/// largest digit so multi-digit grids stay columnar.
pub fn format_cells(cells: &[u8], grid_width: usize) -> String {
    let cell_width = grid_width.to_string().len();
    let mut out = String::new();
    for row in 0..grid_width {
        for col in 0..grid_width {
            if col > 0 {
                out.push(' ');
            }
            match cells[row * grid_width + col] {
                0 => out.push_str(&"_".repeat(cell_width)),
                digit => out.push_str(&format!("{digit:>cell_width$}")),
            }
        }
        out.push('\n');
    }
    out
}

/// Integer square root, `None` if `n` is not a perfect square.
fn int_sqrt(n: usize) -> Option<usize> {
    let root = (n as f64).sqrt().round() as usize;
    (root * root == n).then_some(root)
}

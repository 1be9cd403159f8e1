//! Reconstruction of the solved grid and the replayable solving path.
//!
//! The solving path maps the search's select/deselect events onto grid
//! actions, preserving event order exactly, backtracked attempts included.
//! Events on given cells are skipped: the path describes the work done on
//! originally-empty cells, so replaying it against the input grid produces
//! the completed grid and unwinding it restores the input exactly.

use std::fmt;

use crate::cover::Possibility;
use crate::puzzle::Puzzle;
use crate::solver::SearchEvent;

/// What a path step does to its cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Write the digit into the cell.
    Insert,
    /// Clear the digit back out (a backtracked attempt).
    Remove,
}

/// One step of the solving path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub action: Action,
    pub row: usize,
    pub col: usize,
    pub digit: u8,
}

impl Step {
    /// Applies this step to row-major cells.
    #[inline]
    pub fn apply(&self, cells: &mut [u8], grid_width: usize) {
        cells[self.row * grid_width + self.col] = match self.action {
            Action::Insert => self.digit,
            Action::Remove => 0,
        };
    }

    /// Reverses this step, for unwinding a path back to the starting grid.
    #[inline]
    pub fn undo(&self, cells: &mut [u8], grid_width: usize) {
        cells[self.row * grid_width + self.col] = match self.action {
            Action::Insert => 0,
            Action::Remove => self.digit,
        };
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = match self.action {
            Action::Insert => "ins",
            Action::Remove => "rem",
        };
        write!(f, "{verb} ({}, {}) {}", self.row, self.col, self.digit)
    }
}

/// Writes each selected possibility into a fresh grid.
///
/// The exact cover guarantees exactly one digit per cell, so the result is a
/// complete grid.
pub fn build_final_grid(
    puzzle: &Puzzle,
    possibilities: &[Possibility],
    solution: &[usize],
) -> Puzzle {
    let w = puzzle.grid_width();
    let mut cells = vec![0u8; w * w];
    for &index in solution {
        let Possibility { row, col, digit } = possibilities[index];
        debug_assert_eq!(cells[row * w + col], 0, "cell covered twice");
        cells[row * w + col] = digit;
    }
    Puzzle::from_solved_cells(cells, w, puzzle.block_width())
}

/// Maps the event log onto grid actions, in event order.
///
/// Selects become inserts and deselects become removes; events whose
/// possibility sits on a given cell are dropped.
pub fn build_solving_path(
    puzzle: &Puzzle,
    possibilities: &[Possibility],
    events: &[(SearchEvent, usize)],
) -> Vec<Step> {
    events
        .iter()
        .filter_map(|&(event, index)| {
            let Possibility { row, col, digit } = possibilities[index];
            if puzzle.get(row, col) != 0 {
                return None;
            }
            let action = match event {
                SearchEvent::Select => Action::Insert,
                SearchEvent::Deselect => Action::Remove,
            };
            Some(Step {
                action,
                row,
                col,
                digit,
            })
        })
        .collect()
}

/// Plays a path forward over the puzzle's cells.
pub fn replay(puzzle: &Puzzle, path: &[Step]) -> Vec<u8> {
    let mut cells = puzzle.cells().to_vec();
    for step in path {
        step.apply(&mut cells, puzzle.grid_width());
    }
    cells
}

/// Unwinds a path from the completed cells back to the starting grid.
pub fn unwind(completed: &[u8], grid_width: usize, path: &[Step]) -> Vec<u8> {
    let mut cells = completed.to_vec();
    for step in path.iter().rev() {
        step.undo(&mut cells, grid_width);
    }
    cells
}

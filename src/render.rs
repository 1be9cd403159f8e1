//! Step-by-step text replay of a solving path.
//!
//! A pure consumer of the solver's output contract: it only walks the path
//! and reprints the grid, so solver correctness never depends on it.

use std::thread;
use std::time::Duration;

use xdoku::puzzle::format_cells;
use xdoku::{Puzzle, Step};

/// The grid text after each step of the path, in path order.
pub fn frames(puzzle: &Puzzle, path: &[Step]) -> Vec<String> {
    let mut cells = puzzle.cells().to_vec();
    path.iter()
        .map(|step| {
            step.apply(&mut cells, puzzle.grid_width());
            format_cells(&cells, puzzle.grid_width())
        })
        .collect()
}

/// Reprints the grid after every step, pausing between steps.
pub fn replay(puzzle: &Puzzle, path: &[Step], delay: Duration) {
    for (step, frame) in path.iter().zip(frames(puzzle, path)) {
        println!("{step}");
        println!("{frame}");
        thread::sleep(delay);
    }
}

//! Exact-cover Sudoku solver.
//!
//! Fills classic Sudoku grids (and square generalizations: any grid whose
//! side is the square of its block width) by reducing the puzzle to an exact
//! cover problem and searching it with Knuth's Algorithm X, branching on the
//! constraint with the fewest remaining candidates. Besides the completed
//! grid, solving yields the full ordered trace of insertions and backtracked
//! removals, which consumers can replay step by step.

pub mod counting;
pub mod cover;
pub mod path;
pub mod puzzle;
pub mod solver;

use std::time::{Duration, Instant};

pub use counting::{ColumnCounter, ParallelCounter, SequentialCounter};
pub use path::{Action, Step};
pub use puzzle::{ConfigError, Puzzle};

/// A completed grid together with its replayable solving path.
#[derive(Debug, Clone)]
pub struct Solution {
    /// The fully filled grid.
    pub grid: Puzzle,
    /// Every insert and backtracked remove, in search order.
    pub path: Vec<Step>,
}

/// Result of [`solve`]: the solution if one exists, plus time spent searching.
#[derive(Debug, Clone)]
pub struct SolveOutcome {
    /// `None` when the search exhausted every branch without a cover.
    pub solution: Option<Solution>,
    /// Wall-clock time of the search itself, excluding cover construction.
    pub elapsed: Duration,
}

/// Solves a validated puzzle with the given count backend.
pub fn solve<C: ColumnCounter + ?Sized>(puzzle: &Puzzle, counter: &C) -> SolveOutcome {
    let cover = cover::build_cover(puzzle);

    let start = Instant::now();
    let solver::SearchResult { solution, events } = solver::search(&cover.matrix, counter);
    let elapsed = start.elapsed();

    let solution = solution.map(|selected| Solution {
        grid: path::build_final_grid(puzzle, &cover.possibilities, &selected),
        path: path::build_solving_path(puzzle, &cover.possibilities, &events),
    });
    SolveOutcome { solution, elapsed }
}

/// Validates raw cells and solves sequentially: the plain contract entry.
pub fn solve_grid(
    cells: Vec<u8>,
    grid_width: usize,
    block_width: usize,
) -> Result<SolveOutcome, ConfigError> {
    let puzzle = Puzzle::new(cells, grid_width, block_width)?;
    Ok(solve(&puzzle, &SequentialCounter))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashSet;

    /// A complete, valid 9x9 grid (rows are shifted copies of 1..=9).
    const COMPLETE_9X9: &str = "\
        123456789\
        456789123\
        789123456\
        234567891\
        567891234\
        891234567\
        345678912\
        678912345\
        912345678";

    /// Asserts each row, column, and block holds each digit exactly once.
    fn assert_valid_solution(grid: &Puzzle) {
        let w = grid.grid_width();
        let mut seen: FxHashSet<(u8, usize, u8)> = FxHashSet::default();
        for row in 0..w {
            for col in 0..w {
                let digit = grid.get(row, col);
                assert!(digit >= 1 && digit as usize <= w, "({row}, {col})");
                assert!(seen.insert((0, row, digit)), "row {row} repeats {digit}");
                assert!(seen.insert((1, col, digit)), "col {col} repeats {digit}");
                assert!(
                    seen.insert((2, grid.block_of(row, col), digit)),
                    "block repeats {digit}"
                );
            }
        }
    }

    #[test]
    fn solves_the_sample_puzzle() {
        let puzzle = Puzzle::parse(puzzle::SAMPLE_9X9).unwrap();
        let outcome = solve(&puzzle, &SequentialCounter);
        let solution = outcome.solution.expect("sample is solvable");
        assert_valid_solution(&solution.grid);

        // givens survive into the completed grid
        assert_eq!(solution.grid.get(0, 1), 5);
        assert_eq!(solution.grid.get(8, 0), 1);
    }

    #[test]
    fn replaying_the_path_reproduces_the_completed_grid() {
        let puzzle = Puzzle::parse(puzzle::SAMPLE_9X9).unwrap();
        let solution = solve(&puzzle, &SequentialCounter).solution.unwrap();

        let replayed = path::replay(&puzzle, &solution.path);
        assert_eq!(replayed, solution.grid.cells());

        let unwound = path::unwind(solution.grid.cells(), 9, &solution.path);
        assert_eq!(unwound, puzzle.cells());
    }

    #[test]
    fn solving_is_deterministic() {
        let puzzle = Puzzle::parse(puzzle::SAMPLE_9X9).unwrap();
        let first = solve(&puzzle, &SequentialCounter).solution.unwrap();
        let second = solve(&puzzle, &SequentialCounter).solution.unwrap();
        assert_eq!(first.grid, second.grid);
        assert_eq!(first.path, second.path);
    }

    #[test]
    fn parallel_counting_changes_nothing() {
        let puzzle = Puzzle::parse(puzzle::SAMPLE_9X9).unwrap();
        let sequential = solve(&puzzle, &SequentialCounter).solution.unwrap();
        let parallel = solve(&puzzle, &ParallelCounter).solution.unwrap();
        assert_eq!(sequential.grid, parallel.grid);
        assert_eq!(sequential.path, parallel.path);
    }

    #[test]
    fn fills_an_empty_4x4_grid() {
        let puzzle = Puzzle::new(vec![0; 16], 4, 2).unwrap();
        let solution = solve(&puzzle, &SequentialCounter).solution.unwrap();
        assert_valid_solution(&solution.grid);
    }

    #[test]
    fn a_single_forced_cell_takes_one_insert() {
        let mut cells: Vec<u8> = COMPLETE_9X9
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| c as u8 - b'0')
            .collect();
        cells[4 * 9 + 4] = 0; // blank the center; only 9 fits there
        let puzzle = Puzzle::new(cells, 9, 3).unwrap();

        let solution = solve(&puzzle, &SequentialCounter).solution.unwrap();
        assert_valid_solution(&solution.grid);
        let trace: Vec<String> = solution.path.iter().map(Step::to_string).collect();
        insta::assert_snapshot!(trace.join("\n"), @"ins (4, 4) 9");
    }

    #[test]
    fn a_complete_grid_returns_unchanged_with_an_empty_path() {
        let puzzle = Puzzle::parse(COMPLETE_9X9).unwrap();
        let solution = solve(&puzzle, &SequentialCounter).solution.unwrap();
        assert_eq!(solution.grid, puzzle);
        assert!(solution.path.is_empty());
    }

    #[test]
    fn a_consistent_but_unsolvable_grid_reports_no_solution() {
        // no two givens conflict, yet cell (1, 1) sees all four digits
        let puzzle = Puzzle::parse("34.. ...1 .... .2..").unwrap();
        let outcome = solve(&puzzle, &SequentialCounter);
        assert!(outcome.solution.is_none());
    }

    #[test]
    fn solve_grid_rejects_bad_configurations_up_front() {
        assert!(matches!(
            solve_grid(vec![0; 36], 6, 2),
            Err(ConfigError::UnsquareBlock { .. })
        ));

        let mut cells = vec![0; 81];
        cells[0] = 7;
        cells[8] = 7; // same row, twice
        assert!(matches!(
            solve_grid(cells, 9, 3),
            Err(ConfigError::ConflictingGiven { .. })
        ));
    }

    #[test]
    fn solve_grid_solves_from_raw_cells() {
        let cells: Vec<u8> = puzzle::SAMPLE_9X9
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| c as u8 - b'0')
            .collect();
        let outcome = solve_grid(cells, 9, 3).unwrap();
        assert_valid_solution(&outcome.solution.unwrap().grid);
    }
}

//! Exact-cover Sudoku solver CLI.
//!
//! Solves puzzles by reduction to exact cover (Knuth's Algorithm X) and can
//! replay the search trace step by step, insertions and backtracked removals
//! alike. Puzzles are read from a file as compact character grids, or the
//! built-in sample is used.

mod render;

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, Subcommand};

use xdoku::puzzle::SAMPLE_9X9;
use xdoku::{solve, ParallelCounter, Puzzle, SequentialCounter, SolveOutcome};

/// Solves grid puzzles via exact cover and replays the search trace.
#[derive(Parser)]
#[command(name = "xdoku")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Solve a puzzle and print the completed grid.
    Solve {
        /// Puzzle file: one character per cell, `.` or `0` for empty,
        /// whitespace ignored. The built-in sample when omitted.
        file: Option<PathBuf>,
        /// Count branch candidates on the rayon thread pool.
        #[arg(long)]
        parallel: bool,
    },
    /// Solve a puzzle, then replay every search step as text.
    Replay {
        /// Puzzle file; the built-in sample when omitted.
        file: Option<PathBuf>,
        /// Count branch candidates on the rayon thread pool.
        #[arg(long)]
        parallel: bool,
        /// Pause between steps, in milliseconds.
        #[arg(long, default_value_t = 100)]
        delay_ms: u64,
    },
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Some(Command::Solve { file, parallel }) => run_solve(file.as_deref(), parallel),
        Some(Command::Replay {
            file,
            parallel,
            delay_ms,
        }) => run_replay(file.as_deref(), parallel, delay_ms),
        // default: solve the sample sequentially
        None => run_solve(None, false),
    }
}

/// Solves and prints the completed grid with the elapsed search time.
fn run_solve(file: Option<&Path>, parallel: bool) -> ExitCode {
    let Some(puzzle) = load_puzzle(file) else {
        return ExitCode::FAILURE;
    };
    let outcome = solve_with(&puzzle, parallel);
    report(&outcome)
}

/// Solves, replays the whole search trace, then prints the final grid.
fn run_replay(file: Option<&Path>, parallel: bool, delay_ms: u64) -> ExitCode {
    let Some(puzzle) = load_puzzle(file) else {
        return ExitCode::FAILURE;
    };
    let outcome = solve_with(&puzzle, parallel);
    if let Some(solution) = &outcome.solution {
        render::replay(&puzzle, &solution.path, Duration::from_millis(delay_ms));
    }
    report(&outcome)
}

fn solve_with(puzzle: &Puzzle, parallel: bool) -> SolveOutcome {
    if parallel {
        solve(puzzle, &ParallelCounter)
    } else {
        solve(puzzle, &SequentialCounter)
    }
}

fn report(outcome: &SolveOutcome) -> ExitCode {
    match &outcome.solution {
        Some(solution) => {
            print!("{}", solution.grid);
            println!("solved in {:.4?}", outcome.elapsed);
            ExitCode::SUCCESS
        }
        None => {
            println!("no solution found ({:.4?} searched)", outcome.elapsed);
            ExitCode::FAILURE
        }
    }
}

/// Reads and parses the puzzle, or the built-in sample when no file is given.
fn load_puzzle(file: Option<&Path>) -> Option<Puzzle> {
    let text = match file {
        Some(path) => match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) => {
                eprintln!("cannot read {}: {e}", path.display());
                return None;
            }
        },
        None => SAMPLE_9X9.to_string(),
    };
    match Puzzle::parse(&text) {
        Ok(puzzle) => Some(puzzle),
        Err(e) => {
            eprintln!("invalid puzzle: {e}");
            None
        }
    }
}

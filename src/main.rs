//! Puzzle Search
//!
//! Runs depth-first or breadth-first search on one of the bundled puzzle
//! domains and prints every step of the solution path. Set `RUST_LOG=debug`
//! to see search statistics.

use std::process::ExitCode;
use std::time::Instant;

use clap::{Parser, Subcommand};

use puzzle_search::klotski::{Klotski, CLASSIC_LAYOUT};
use puzzle_search::mn_puzzle::MnPuzzle;
use puzzle_search::peg_solitaire::PegSolitaire;
use puzzle_search::word_ladder::WordLadder;
use puzzle_search::{PuzzleOps, Strategy};

/// Solves puzzles by searching their state space.
#[derive(Parser)]
#[command(name = "puzzle-search")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Search strategy.
    #[arg(short, long, value_enum, default_value_t = Strategy::BreadthFirst, global = true)]
    strategy: Strategy,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Peg solitaire: one argument per row, '*' peg, '.' empty, '#' unused.
    Peg {
        #[arg(required = true)]
        rows: Vec<String>,
    },
    /// Sliding tiles: rows separated by '/', '*' is the blank.
    Sliding {
        /// Starting grid, e.g. "*23/145".
        #[arg(long)]
        from: String,
        /// Target grid, e.g. "123/45*".
        #[arg(long)]
        to: String,
    },
    /// Word ladder over an inline word list.
    Ladder {
        from: String,
        to: String,
        /// Comma-separated allowed words.
        #[arg(short, long, value_delimiter = ',', required = true)]
        words: Vec<String>,
    },
    /// Three Kingdoms sliding blocks: five rows of four cells, '.' empty,
    /// one letter per piece.
    Klotski {
        #[arg(default_value = CLASSIC_LAYOUT)]
        layout: String,
    },
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match build_puzzle(cli.command) {
        Ok(puzzle) => run_solver(puzzle.as_ref(), cli.strategy),
        Err(e) => {
            eprintln!("Invalid puzzle: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Builds the requested puzzle behind the type-erased interface.
fn build_puzzle(command: Command) -> puzzle_search::error::Result<Box<dyn PuzzleOps>> {
    let puzzle: Box<dyn PuzzleOps> = match command {
        Command::Peg { rows } => Box::new(PegSolitaire::from_rows(rows.as_slice())?),
        Command::Sliding { from, to } => Box::new(MnPuzzle::parse(&from, &to)?),
        Command::Ladder { from, to, words } => Box::new(WordLadder::new(&from, &to, words)?),
        Command::Klotski { layout } => Box::new(layout.parse::<Klotski>()?),
    };
    Ok(puzzle)
}

/// Solves the puzzle and prints the result.
fn run_solver(puzzle: &dyn PuzzleOps, strategy: Strategy) -> ExitCode {
    println!("Solving with {:?} search:\n{}\n", strategy, puzzle.describe());

    let start = Instant::now();
    let solution = puzzle.solve(strategy);
    let elapsed = start.elapsed();

    match solution {
        Some(steps) => {
            print!("{}", format_solution(&steps));
            println!("Solved in {} moves ({:.2?})", steps.len() - 1, elapsed);
            ExitCode::SUCCESS
        }
        None => {
            println!("No solution ({:.2?})", elapsed);
            ExitCode::FAILURE
        }
    }
}

/// Formats a solution path as numbered steps.
fn format_solution(steps: &[String]) -> String {
    let mut output = String::new();
    for (i, step) in steps.iter().enumerate() {
        output.push_str(&format!("Step {}:\n{}\n\n", i, step));
    }
    output
}

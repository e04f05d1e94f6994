//! Puzzle Search Library
//!
//! A generic state-space search engine. Any type implementing [`Puzzle`] can
//! be solved by depth-first or breadth-first search; solutions come back as a
//! chain of [`SolutionNode`]s.
//!
//! The bundled domains (peg solitaire, sliding tiles, word ladders and the
//! Three Kingdoms sliding blocks) only implement the trait; the solvers never
//! depend on them.

pub mod error;
pub mod klotski;
pub mod mn_puzzle;
pub mod node;
pub mod peg_solitaire;
pub mod puzzle;
mod solver;
pub mod word_ladder;

use std::fmt::Display;

pub use error::PuzzleError;
pub use node::{count_nodes, SolutionNode};
pub use puzzle::{display_key, Puzzle};
pub use solver::{breadth_first_search, breadth_first_solve, depth_first_search, depth_first_solve};

/// Which traversal to run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Strategy {
    /// First solution found; not necessarily the shortest.
    #[value(name = "depth", alias = "dfs")]
    DepthFirst,
    /// Shortest solution.
    #[default]
    #[value(name = "breadth", alias = "bfs")]
    BreadthFirst,
}

impl Strategy {
    /// Runs the selected solver.
    pub fn solve<P: Puzzle>(self, puzzle: P) -> Option<SolutionNode<P>> {
        match self {
            Strategy::DepthFirst => depth_first_solve(puzzle),
            Strategy::BreadthFirst => breadth_first_solve(puzzle),
        }
    }
}

/// Trait that erases the concrete puzzle type for dynamic dispatch.
///
/// Lets a driver hold any domain behind `Box<dyn PuzzleOps>` without knowing
/// its key type.
pub trait PuzzleOps {
    /// Solves a copy of this configuration and renders each step of the
    /// solution path.
    fn solve(&self, strategy: Strategy) -> Option<Vec<String>>;
    fn describe(&self) -> String;
}

impl<P: Puzzle + Clone + Display> PuzzleOps for P {
    fn solve(&self, strategy: Strategy) -> Option<Vec<String>> {
        let solution = strategy.solve(self.clone())?;
        Some(solution.iter().map(ToString::to_string).collect())
    }

    fn describe(&self) -> String {
        self.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mn_puzzle::MnPuzzle;
    use crate::peg_solitaire::PegSolitaire;
    use crate::word_ladder::WordLadder;

    #[test]
    fn test_strategy_dispatch() {
        let puzzle = MnPuzzle::parse("*23/145", "123/45*").unwrap();

        let bfs = Strategy::BreadthFirst.solve(puzzle.clone()).unwrap();
        let dfs = Strategy::DepthFirst.solve(puzzle).unwrap();

        assert_eq!(bfs.depth(), 3);
        assert!(dfs.depth() >= bfs.depth());
    }

    #[test]
    fn test_puzzle_ops_over_mixed_domains() {
        let puzzles: Vec<Box<dyn PuzzleOps>> = vec![
            Box::new(WordLadder::new("on", "no", ["on", "no", "oo"]).unwrap()),
            Box::new("* * . *".parse::<PegSolitaire>().unwrap()),
        ];

        let lengths: Vec<Option<usize>> = puzzles
            .iter()
            .map(|puzzle| puzzle.solve(Strategy::BreadthFirst).map(|steps| steps.len()))
            .collect();
        assert_eq!(lengths, [Some(3), Some(3)]);

        assert_eq!(puzzles[0].describe(), "From 'on' to 'no'");
    }

    #[test]
    fn test_unsolvable_puzzle_ops_returns_none() {
        let puzzle: Box<dyn PuzzleOps> = Box::new("* * . * *".parse::<PegSolitaire>().unwrap());
        assert!(puzzle.solve(Strategy::DepthFirst).is_none());
    }
}

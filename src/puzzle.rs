//! The capability every searchable puzzle implements.
//!
//! The solvers only ever talk to this trait. A puzzle is one immutable
//! configuration; moving produces new configurations through [`Puzzle::extensions`].

use std::fmt::Display;
use std::hash::Hash;

/// A configuration in an implicit, possibly cyclic, search graph.
pub trait Puzzle: Sized {
    /// Identity used for visited-set de-duplication.
    ///
    /// Equal configurations must produce equal keys. Distinct configurations
    /// reachable within one search must not collide, or the solvers will prune
    /// states that were never explored.
    type Key: Eq + Hash;

    /// All configurations reachable by exactly one legal move.
    ///
    /// Order matters: it decides which branch is explored first and, for
    /// depth-first search, which solution is reported.
    fn extensions(&self) -> Vec<Self>;

    /// Whether this configuration is an accepted solution.
    fn is_solved(&self) -> bool;

    /// Whether this configuration is provably unsolvable and can be pruned
    /// without looking at its extensions.
    fn fail_fast(&self) -> bool {
        false
    }

    /// Computes the de-duplication key for this configuration.
    fn canonical_key(&self) -> Self::Key;
}

/// Textual canonical key for puzzles whose `Display` output already
/// identifies a configuration.
#[inline]
pub fn display_key<P: Display>(puzzle: &P) -> String {
    puzzle.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Countdown(u32);

    impl Puzzle for Countdown {
        type Key = u32;

        fn extensions(&self) -> Vec<Self> {
            self.0.checked_sub(1).map(Countdown).into_iter().collect()
        }

        fn is_solved(&self) -> bool {
            self.0 == 0
        }

        fn canonical_key(&self) -> u32 {
            self.0
        }
    }

    #[test]
    fn test_fail_fast_defaults_to_false() {
        assert!(!Countdown(3).fail_fast());
        assert!(!Countdown(0).fail_fast());
    }

    #[test]
    fn test_display_key_is_deterministic() {
        assert_eq!(display_key(&"on"), display_key(&"on"));
        assert_ne!(display_key(&"on"), display_key(&"no"));
    }
}

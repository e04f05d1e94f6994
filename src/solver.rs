//! Generic depth-first and breadth-first solvers.
//!
//! Both searches:
//! - run on an explicit frontier, never on the native call stack
//! - keep one `FxHashSet` of canonical keys per call; a configuration is
//!   recorded when it is first discovered and never explored again
//! - report "no solution" as `None`
//!
//! Nothing here knows about any concrete puzzle.

use std::collections::VecDeque;

use log::{debug, trace};
use rustc_hash::FxHashSet;

use crate::node::SolutionNode;
use crate::puzzle::Puzzle;

/// Counters collected during one search and reported through `log`.
#[derive(Debug, Default, Clone, Copy)]
struct SearchStats {
    /// Configurations whose extensions were generated.
    expanded: usize,
    /// Configurations dropped by `fail_fast`.
    pruned: usize,
    /// Extensions skipped because their key was already visited.
    seen: usize,
    /// Largest frontier size observed.
    peak_frontier: usize,
}

impl SearchStats {
    fn report(&self, search: &str, path_len: Option<usize>) {
        match path_len {
            Some(len) => debug!(
                "{search}: solved in {} steps ({} expanded, {} pruned, {} seen, peak frontier {})",
                len - 1,
                self.expanded,
                self.pruned,
                self.seen,
                self.peak_frontier
            ),
            None => debug!(
                "{search}: no solution ({} expanded, {} pruned, {} seen, peak frontier {})",
                self.expanded, self.pruned, self.seen, self.peak_frontier
            ),
        }
    }
}

/// An entry on the depth-first stack.
struct Frame<P> {
    puzzle: P,
    /// Set once the extensions of this configuration have been pushed.
    ///
    /// The expanded frames still on the stack are exactly the route from the
    /// start to the top of the stack.
    expanded: bool,
}

/// Finds a solution by depth-first search and returns it as a node chain.
///
/// The first solved extension encountered wins, so the result depends on the
/// order of [`Puzzle::extensions`] and is not necessarily the shortest.
pub fn depth_first_solve<P: Puzzle>(puzzle: P) -> Option<SolutionNode<P>> {
    depth_first_search(puzzle).and_then(SolutionNode::from_path)
}

/// Finds a solution by breadth-first search and returns it as a node chain.
///
/// The returned path uses the fewest possible moves.
pub fn breadth_first_solve<P: Puzzle>(puzzle: P) -> Option<SolutionNode<P>> {
    breadth_first_search(puzzle).and_then(SolutionNode::from_path)
}

/// Depth-first search returning the path from `puzzle` to a solved
/// configuration.
///
/// Uses iterative backtracking with a stack to avoid recursion depth limits.
pub fn depth_first_search<P: Puzzle>(puzzle: P) -> Option<Vec<P>> {
    if puzzle.is_solved() {
        debug!("depth-first: start configuration is already solved");
        return Some(vec![puzzle]);
    }

    let mut stats = SearchStats::default();
    let mut visited: FxHashSet<P::Key> = FxHashSet::default();
    visited.insert(puzzle.canonical_key());

    let mut search_stack = vec![Frame {
        puzzle,
        expanded: false,
    }];

    while let Some(frame) = search_stack.last_mut() {
        // everything below this configuration has been explored
        if frame.expanded {
            search_stack.pop();
            continue;
        }

        if frame.puzzle.fail_fast() {
            stats.pruned += 1;
            search_stack.pop();
            continue;
        }

        let extensions = frame.puzzle.extensions();
        frame.expanded = true;
        stats.expanded += 1;
        trace!(
            "depth-first: expanding depth {} with {} extensions",
            search_stack.len() - 1,
            extensions.len()
        );

        let stack_len = search_stack.len();
        for extension in extensions {
            if extension.is_solved() {
                let mut path = route(search_stack);
                path.push(extension);
                stats.report("depth-first", Some(path.len()));
                return Some(path);
            }

            let key = extension.canonical_key();
            if visited.contains(&key) {
                stats.seen += 1;
                continue;
            }
            visited.insert(key);

            search_stack.push(Frame {
                puzzle: extension,
                expanded: false,
            });
        }
        stats.peak_frontier = stats.peak_frontier.max(search_stack.len());

        // dead end: no extensions, or all of them already visited
        if search_stack.len() == stack_len {
            search_stack.pop();
        }
    }

    stats.report("depth-first", None);
    None
}

/// Collects the route from the start to the top of the depth-first stack.
fn route<P>(search_stack: Vec<Frame<P>>) -> Vec<P> {
    search_stack
        .into_iter()
        .filter(|frame| frame.expanded)
        .map(|frame| frame.puzzle)
        .collect()
}

/// A configuration discovered by the breadth-first search.
struct Discovered<P> {
    puzzle: P,
    /// Index of the configuration this one extends, `None` for the start.
    parent: Option<usize>,
}

/// Breadth-first search returning the shortest path from `puzzle` to a solved
/// configuration.
///
/// Candidate paths are stored as parent links into an arena of discovered
/// configurations and rebuilt once a solution is dequeued. Only extensions are
/// tested with `fail_fast`; the start configuration is always expanded.
pub fn breadth_first_search<P: Puzzle>(puzzle: P) -> Option<Vec<P>> {
    let mut stats = SearchStats::default();
    let mut visited: FxHashSet<P::Key> = FxHashSet::default();
    visited.insert(puzzle.canonical_key());

    let mut discovered = vec![Discovered {
        puzzle,
        parent: None,
    }];
    let mut frontier = VecDeque::from([0usize]);

    while let Some(current) = frontier.pop_front() {
        if discovered[current].puzzle.is_solved() {
            let path = trace_back(discovered, current);
            stats.report("breadth-first", Some(path.len()));
            return Some(path);
        }

        let extensions = discovered[current].puzzle.extensions();
        stats.expanded += 1;
        trace!(
            "breadth-first: expanding entry {current} with {} extensions",
            extensions.len()
        );

        for extension in extensions {
            let key = extension.canonical_key();
            if visited.contains(&key) {
                stats.seen += 1;
                continue;
            }
            visited.insert(key);

            // recorded as visited so no other route re-enqueues it
            if extension.fail_fast() {
                stats.pruned += 1;
                continue;
            }

            discovered.push(Discovered {
                puzzle: extension,
                parent: Some(current),
            });
            frontier.push_back(discovered.len() - 1);
        }
        stats.peak_frontier = stats.peak_frontier.max(frontier.len());
    }

    stats.report("breadth-first", None);
    None
}

/// Rebuilds the path ending at `goal` by following parent links.
///
/// Parents are always discovered before their children, so keeping the
/// marked entries in arena order yields the path from the start.
fn trace_back<P>(mut discovered: Vec<Discovered<P>>, goal: usize) -> Vec<P> {
    discovered.truncate(goal + 1);

    let mut on_path = vec![false; discovered.len()];
    let mut cursor = Some(goal);
    while let Some(index) = cursor {
        on_path[index] = true;
        cursor = discovered[index].parent;
    }

    discovered
        .into_iter()
        .zip(on_path)
        .filter_map(|(entry, keep)| keep.then_some(entry.puzzle))
        .collect()
}

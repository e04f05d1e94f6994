//! Solution trees.
//!
//! A [`SolutionNode`] owns one configuration and an ordered list of child
//! nodes. The solvers only ever build linear chains (one child per node), but
//! the type holds arbitrary branching trees.
//!
//! Every traversal here (construction, counting, rendering, comparison and
//! drop) uses an explicit stack, so a chain as long as the search space allows
//! never touches the native recursion limit.

use std::fmt;

/// A configuration together with the nodes it extends to.
#[derive(Debug)]
pub struct SolutionNode<P> {
    puzzle: P,
    children: Vec<SolutionNode<P>>,
}

impl<P> SolutionNode<P> {
    /// Creates a leaf node.
    pub fn new(puzzle: P) -> Self {
        Self {
            puzzle,
            children: Vec::new(),
        }
    }

    /// Creates a node that owns the given children.
    pub fn with_children(puzzle: P, children: Vec<SolutionNode<P>>) -> Self {
        Self { puzzle, children }
    }

    /// Turns an ordered path into a chain of nodes.
    ///
    /// The first configuration becomes the root and the last one the only
    /// leaf. Returns `None` for an empty path.
    pub fn from_path(path: Vec<P>) -> Option<Self> {
        let mut remaining = path.into_iter().rev();
        let mut node = SolutionNode::new(remaining.next()?);

        // build bottom-up so each parent takes ownership of the finished child
        for puzzle in remaining {
            node = SolutionNode::with_children(puzzle, vec![node]);
        }

        Some(node)
    }

    pub fn puzzle(&self) -> &P {
        &self.puzzle
    }

    pub fn children(&self) -> &[SolutionNode<P>] {
        &self.children
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Counts this node and all of its descendants.
    pub fn node_count(&self) -> usize {
        let mut count = 0;
        let mut pending = vec![self];

        while let Some(node) = pending.pop() {
            count += 1;
            pending.extend(node.children.iter());
        }

        count
    }

    /// Number of edges along the first-child chain starting at this node.
    pub fn depth(&self) -> usize {
        self.iter().count() - 1
    }

    /// Walks the first-child chain, yielding configurations from this node
    /// down to the leaf.
    ///
    /// For chains built by the solvers this is the solution path in order.
    pub fn iter(&self) -> PathIter<'_, P> {
        PathIter { next: Some(self) }
    }
}

/// Counts the nodes in a tree.
///
/// An absent tree counts as zero nodes.
pub fn count_nodes<P>(node: Option<&SolutionNode<P>>) -> usize {
    node.map_or(0, SolutionNode::node_count)
}

/// Iterator over the configurations of a first-child chain.
pub struct PathIter<'a, P> {
    next: Option<&'a SolutionNode<P>>,
}

impl<'a, P> Iterator for PathIter<'a, P> {
    type Item = &'a P;

    fn next(&mut self) -> Option<&'a P> {
        let node = self.next?;
        self.next = node.children.first();
        Some(&node.puzzle)
    }
}

impl<'a, P> IntoIterator for &'a SolutionNode<P> {
    type Item = &'a P;
    type IntoIter = PathIter<'a, P>;

    fn into_iter(self) -> PathIter<'a, P> {
        self.iter()
    }
}

impl<P> Drop for SolutionNode<P> {
    fn drop(&mut self) {
        // detach descendants before they drop so no drop call nests
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}

impl<P: PartialEq> PartialEq for SolutionNode<P> {
    fn eq(&self, other: &Self) -> bool {
        let mut pending = vec![(self, other)];

        while let Some((left, right)) = pending.pop() {
            if left.puzzle != right.puzzle || left.children.len() != right.children.len() {
                return false;
            }
            pending.extend(left.children.iter().zip(right.children.iter()));
        }

        true
    }
}

impl<P: Eq> Eq for SolutionNode<P> {}

/// Renders the configuration, a blank line, then each child's rendering
/// separated by newlines.
impl<P: fmt::Display> fmt::Display for SolutionNode<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        enum Step<'a, P> {
            Node(&'a SolutionNode<P>),
            Separator,
        }

        let mut pending = vec![Step::Node(self)];

        while let Some(step) = pending.pop() {
            match step {
                Step::Separator => f.write_str("\n")?,
                Step::Node(node) => {
                    write!(f, "{}\n\n", node.puzzle)?;
                    // reversed so the first child is popped first
                    for (index, child) in node.children.iter().enumerate().rev() {
                        pending.push(Step::Node(child));
                        if index > 0 {
                            pending.push(Step::Separator);
                        }
                    }
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_path_builds_linear_chain() {
        let root = SolutionNode::from_path(vec!["on", "oo", "no"]).unwrap();

        assert_eq!(*root.puzzle(), "on");
        assert_eq!(root.children().len(), 1);
        let child = &root.children()[0];
        assert_eq!(*child.puzzle(), "oo");
        assert_eq!(child.children().len(), 1);
        let leaf = &child.children()[0];
        assert_eq!(*leaf.puzzle(), "no");
        assert!(leaf.is_leaf());

        assert_eq!(root.iter().copied().collect::<Vec<_>>(), ["on", "oo", "no"]);
        assert_eq!(root.depth(), 2);
    }

    #[test]
    fn test_from_empty_path_is_none() {
        assert!(SolutionNode::<u8>::from_path(Vec::new()).is_none());
    }

    #[test]
    fn test_count_nodes_on_three_node_chain() {
        let root = SolutionNode::from_path(vec![1, 2, 3]).unwrap();
        assert_eq!(count_nodes(Some(&root)), 3);
    }

    #[test]
    fn test_count_nodes_on_absent_tree_is_zero() {
        assert_eq!(count_nodes::<u8>(None), 0);
    }

    #[test]
    fn test_count_nodes_on_branching_tree() {
        let tree = SolutionNode::with_children(
            'a',
            vec![
                SolutionNode::with_children('b', vec![SolutionNode::new('d')]),
                SolutionNode::new('c'),
            ],
        );
        assert_eq!(count_nodes(Some(&tree)), 4);
        assert_eq!(tree.iter().collect::<String>(), "abd");
    }

    #[test]
    fn test_display_chain() {
        let root = SolutionNode::from_path(vec!["first", "second", "third"]).unwrap();
        assert_eq!(root.to_string(), "first\n\nsecond\n\nthird\n\n");
    }

    #[test]
    fn test_display_branching_tree() {
        let tree = SolutionNode::with_children(
            "root",
            vec![
                SolutionNode::with_children("left", vec![SolutionNode::new("deep")]),
                SolutionNode::new("right"),
            ],
        );
        insta::assert_snapshot!(tree.to_string().trim_end(), @r"
        root

        left

        deep


        right
        ");
    }

    #[test]
    fn test_equality_is_structural() {
        let a = SolutionNode::from_path(vec![1, 2, 3]).unwrap();
        let b = SolutionNode::from_path(vec![1, 2, 3]).unwrap();
        let c = SolutionNode::from_path(vec![1, 2, 4]).unwrap();
        let d = SolutionNode::from_path(vec![1, 2]).unwrap();

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, d);
    }

    #[test]
    fn test_deep_chain_does_not_overflow_stack() {
        let length = 500_000;
        let root = SolutionNode::from_path((0..length).collect()).unwrap();

        assert_eq!(root.node_count(), length);
        assert_eq!(root.depth(), length - 1);
        assert_eq!(root.iter().last(), Some(&(length - 1)));

        let twin = SolutionNode::from_path((0..length).collect()).unwrap();
        assert!(root == twin);
        assert!(root.to_string().starts_with("0\n\n1\n\n"));
        // both chains drop here
    }
}

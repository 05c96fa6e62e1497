//! Red-black invariant checker.
//!
//! These routines observe the tree read-only and report the first broken
//! invariant they find. A violation is always a defect in the tree code,
//! never a consequence of what the caller inserted or removed, which is why
//! [`RedBlackTree::assert_invariants`] panics instead of returning an error.
//!
//! The checks are:
//! 1. Every link is either the sentinel or a node whose parent link points back.
//! 2. The root is black.
//! 3. No red node has a red child.
//! 4. Both subtrees of every node have the same black-height.
//! 5. An in-order walk yields strictly increasing keys.
//! 6. The number of reachable nodes equals [`RedBlackTree::len`].

use std::fmt;

use super::RedBlackTree;
use super::node::{Color, NodeIndex, SENTINEL};

/// A broken red-black tree invariant.
///
/// # Examples
///
/// ```rust
/// use rbmap::tree::{InvariantViolation, RedBlackTree};
///
/// let mut tree = RedBlackTree::new();
/// for key in 0..100 {
///     tree.insert(key, ()).unwrap();
/// }
/// assert_eq!(tree.validate(), Ok(()));
///
/// let error = InvariantViolation::BlackHeightMismatch { left: 2, right: 3 };
/// assert_eq!(
///     format!("{error}"),
///     "black-height differs between subtrees: left 2, right 3"
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvariantViolation {
    /// The root node is red.
    RedRoot,
    /// A red node has a red child.
    RedChildOfRed,
    /// The two subtrees of some node have different black-heights.
    BlackHeightMismatch {
        /// Black-height of the left subtree.
        left: usize,
        /// Black-height of the right subtree.
        right: usize,
    },
    /// The in-order key sequence is not strictly increasing.
    OutOfOrder,
    /// A child's parent link does not point back at its parent, or a link
    /// leads outside the arena.
    BrokenParentLink,
    /// The number of nodes reachable from the root differs from the arena size.
    LengthMismatch {
        /// Number of entries the tree reports.
        expected: usize,
        /// Number of nodes reachable from the root.
        actual: usize,
    },
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RedRoot => write!(formatter, "root is red"),
            Self::RedChildOfRed => write!(formatter, "red node has a red child"),
            Self::BlackHeightMismatch { left, right } => write!(
                formatter,
                "black-height differs between subtrees: left {left}, right {right}"
            ),
            Self::OutOfOrder => write!(formatter, "keys are not in strictly increasing order"),
            Self::BrokenParentLink => write!(formatter, "parent and child links disagree"),
            Self::LengthMismatch { expected, actual } => write!(
                formatter,
                "tree holds {expected} entries but {actual} nodes are reachable"
            ),
        }
    }
}

impl std::error::Error for InvariantViolation {}

impl<K: Ord, V> RedBlackTree<K, V> {
    /// Checks every red-black invariant.
    ///
    /// # Errors
    ///
    /// Returns the first [`InvariantViolation`] found.
    ///
    /// # Complexity
    ///
    /// O(N)
    pub fn validate(&self) -> Result<(), InvariantViolation> {
        if self.root != SENTINEL && self.root >= self.nodes.len() {
            return Err(InvariantViolation::BrokenParentLink);
        }
        if self.is_red(self.root) {
            return Err(InvariantViolation::RedRoot);
        }
        if self.parent(self.root) != SENTINEL {
            return Err(InvariantViolation::BrokenParentLink);
        }

        let reachable = self.check_structure()?;
        if reachable != self.len() {
            return Err(InvariantViolation::LengthMismatch {
                expected: self.len(),
                actual: reachable,
            });
        }

        let mut keys = self.keys();
        if let Some(mut previous) = keys.next() {
            for key in keys {
                if previous >= key {
                    return Err(InvariantViolation::OutOfOrder);
                }
                previous = key;
            }
        }

        self.black_height().map(|_| ())
    }

    /// Panics with the violated invariant if [`validate`](Self::validate) fails.
    ///
    /// # Panics
    ///
    /// Panics if any red-black invariant does not hold.
    pub fn assert_invariants(&self) {
        if let Err(violation) = self.validate() {
            panic!("red-black tree invariant violated: {violation}");
        }
    }
}

impl<K, V> RedBlackTree<K, V> {
    /// Returns the black-height of the root: the number of black nodes on
    /// any path from the root down to a sentinel, counting the root.
    ///
    /// # Errors
    ///
    /// Returns [`InvariantViolation::BlackHeightMismatch`] if any node's two
    /// subtrees disagree.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rbmap::tree::RedBlackTree;
    ///
    /// let mut tree = RedBlackTree::new();
    /// assert_eq!(tree.black_height(), Ok(0));
    ///
    /// tree.insert(1, ()).unwrap();
    /// assert_eq!(tree.black_height(), Ok(1));
    /// ```
    pub fn black_height(&self) -> Result<usize, InvariantViolation> {
        self.subtree_black_height(self.root)
    }

    fn subtree_black_height(&self, index: NodeIndex) -> Result<usize, InvariantViolation> {
        if index == SENTINEL {
            return Ok(0);
        }
        let left = self.subtree_black_height(self.left(index))?;
        let right = self.subtree_black_height(self.right(index))?;
        if left != right {
            return Err(InvariantViolation::BlackHeightMismatch { left, right });
        }
        Ok(usize::from(self.color(index) == Color::Black) + left)
    }

    /// Walks every reachable node once, checking link consistency and the
    /// red rule, and returns how many nodes it saw.
    fn check_structure(&self) -> Result<usize, InvariantViolation> {
        let mut visited = 0;
        let mut stack = Vec::new();
        if self.root != SENTINEL {
            stack.push(self.root);
        }

        while let Some(index) = stack.pop() {
            if index >= self.nodes.len() {
                return Err(InvariantViolation::BrokenParentLink);
            }
            visited += 1;
            if visited > self.nodes.len() {
                // Some node is reachable twice, so the links contain a cycle.
                return Err(InvariantViolation::BrokenParentLink);
            }

            for child in [self.left(index), self.right(index)] {
                if child == SENTINEL {
                    continue;
                }
                if child >= self.nodes.len() || self.parent(child) != index {
                    return Err(InvariantViolation::BrokenParentLink);
                }
                if self.is_red(index) && self.is_red(child) {
                    return Err(InvariantViolation::RedChildOfRed);
                }
                stack.push(child);
            }
        }

        Ok(visited)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn tree_of(keys: impl IntoIterator<Item = i32>) -> RedBlackTree<i32, ()> {
        let mut tree = RedBlackTree::new();
        for key in keys {
            tree.insert(key, ()).unwrap();
        }
        tree
    }

    #[rstest]
    fn test_empty_tree_is_valid() {
        let tree: RedBlackTree<i32, ()> = RedBlackTree::new();
        assert_eq!(tree.validate(), Ok(()));
        assert_eq!(tree.black_height(), Ok(0));
    }

    #[rstest]
    fn test_detects_red_root() {
        let mut tree = tree_of([1, 2, 3]);
        let root = tree.root;
        tree.set_color(root, Color::Red);
        assert_eq!(tree.validate(), Err(InvariantViolation::RedRoot));
    }

    #[rstest]
    fn test_detects_red_child_of_red() {
        let mut tree = tree_of([2, 1, 3, 4]);
        let three = tree.right(tree.root);
        tree.set_color(three, Color::Red);
        assert_eq!(tree.validate(), Err(InvariantViolation::RedChildOfRed));
    }

    #[rstest]
    fn test_detects_black_height_mismatch() {
        let mut tree = tree_of([2, 1, 3]);
        let left = tree.left(tree.root);
        tree.set_color(left, Color::Black);
        assert_eq!(
            tree.validate(),
            Err(InvariantViolation::BlackHeightMismatch { left: 1, right: 0 })
        );
    }

    #[rstest]
    fn test_detects_out_of_order_keys() {
        let mut tree = tree_of([2, 1, 3]);
        let left = tree.left(tree.root);
        tree.node_mut(left).key = 5;
        assert_eq!(tree.validate(), Err(InvariantViolation::OutOfOrder));
    }

    #[rstest]
    fn test_detects_broken_parent_link() {
        let mut tree = tree_of([2, 1, 3]);
        let left = tree.left(tree.root);
        let right = tree.right(tree.root);
        tree.set_parent(left, right);
        assert_eq!(tree.validate(), Err(InvariantViolation::BrokenParentLink));
    }

    #[rstest]
    fn test_detects_unreachable_node() {
        let mut tree = tree_of([2, 1, 3]);
        let root = tree.root;
        tree.set_child(root, super::super::node::Side::Right, SENTINEL);
        // The right child is red, so black-heights still agree.
        assert_eq!(
            tree.validate(),
            Err(InvariantViolation::LengthMismatch {
                expected: 3,
                actual: 2
            })
        );
    }

    #[rstest]
    #[should_panic(expected = "red-black tree invariant violated: root is red")]
    fn test_assert_invariants_panics() {
        let mut tree = tree_of([1]);
        let root = tree.root;
        tree.set_color(root, Color::Red);
        tree.assert_invariants();
    }

    #[rstest]
    fn test_black_height_grows_logarithmically() {
        let tree = tree_of(0..1_000);
        let black_height = tree.black_height().unwrap();
        assert!(black_height >= 5);
        assert!(black_height <= 11);
    }
}

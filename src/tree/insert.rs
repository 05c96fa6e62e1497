//! Insertion and the insertion fixup.
//!
//! A new key always enters the tree as a red leaf. That can break only the
//! red rule (a red node under a red parent) or the root rule, and the fixup
//! below repairs both by recoloring and at most two rotations.

use std::cmp::Ordering;

use super::RedBlackTree;
use super::node::{Color, Node, NodeIndex, SENTINEL, Side};
use crate::error::TreeError;

impl<K: Ord, V> RedBlackTree<K, V> {
    /// Inserts a key-value pair into the tree.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::DuplicateKey`] if the key is already present.
    /// The tree is left untouched in that case.
    ///
    /// # Complexity
    ///
    /// O(log N)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rbmap::tree::RedBlackTree;
    /// use rbmap::TreeError;
    ///
    /// let mut tree = RedBlackTree::new();
    /// tree.insert(2, 200).unwrap();
    /// tree.insert(1, 100).unwrap();
    ///
    /// assert_eq!(tree.traverse(), vec![1, 2]);
    /// assert_eq!(tree.insert(1, 111), Err(TreeError::DuplicateKey));
    /// assert_eq!(tree.get(&1), Some(&100));
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Result<(), TreeError> {
        let mut parent = SENTINEL;
        let mut side = Side::Left;
        let mut current = self.root;

        while current != SENTINEL {
            parent = current;
            side = match key.cmp(&self.node(current).key) {
                Ordering::Less => Side::Left,
                Ordering::Greater => Side::Right,
                Ordering::Equal => {
                    tracing::debug!(len = self.len(), "insert rejected: duplicate key");
                    return Err(TreeError::DuplicateKey);
                }
            };
            current = self.child(current, side);
        }

        let index = self.nodes.len();
        self.nodes.push(Node::new_red(key, value, parent));
        if parent == SENTINEL {
            self.root = index;
        } else {
            self.set_child(parent, side, index);
        }

        self.insert_fixup(index);

        #[cfg(feature = "verify")]
        self.assert_invariants();

        Ok(())
    }
}

impl<K, V> RedBlackTree<K, V> {
    /// Restores the red rule upward from the freshly inserted `node`.
    fn insert_fixup(&mut self, mut node: NodeIndex) {
        while self.is_red(node) && self.is_red(self.parent(node)) {
            // A red parent is never the root, so the grandparent is real and black.
            let mut parent = self.parent(node);
            let grandparent = self.parent(parent);
            let side = self.side_of(parent, grandparent);
            let uncle = self.child(grandparent, side.opposite());

            if self.is_red(uncle) {
                tracing::trace!("insert fixup: red uncle, pushing violation up");
                self.set_color(parent, Color::Black);
                self.set_color(uncle, Color::Black);
                self.set_color(grandparent, Color::Red);
                node = grandparent;
                continue;
            }

            if node == self.child(parent, side.opposite()) {
                tracing::trace!("insert fixup: inner child, straightening");
                self.rotate(parent, side);
                std::mem::swap(&mut node, &mut parent);
            }

            tracing::trace!("insert fixup: outer child, rotating grandparent");
            self.rotate(grandparent, side.opposite());
            self.set_color(parent, Color::Black);
            self.set_color(grandparent, Color::Red);
        }

        let root = self.root;
        self.set_color(root, Color::Black);
    }
}

//! Deletion, transplant and the deletion fixup.
//!
//! Removing a black node leaves one path short of a black node. The fixup
//! treats the position the removed node vacated as carrying an "extra
//! black" and moves that deficiency up the tree (recoloring) or resolves it
//! locally (at most three rotations).

use std::borrow::Borrow;

use super::RedBlackTree;
use super::node::{Color, Node, NodeIndex, SENTINEL};
use crate::error::TreeError;

impl<K: Ord, V> RedBlackTree<K, V> {
    /// Removes a key from the tree, returning its value.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::KeyNotFound`] if the key is absent. The tree is
    /// left untouched in that case.
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
    /// tree.insert(1, 100).unwrap();
    /// tree.insert(2, 200).unwrap();
    ///
    /// assert_eq!(tree.remove(&1), Ok(100));
    /// assert_eq!(tree.traverse(), vec![2]);
    /// assert_eq!(tree.remove(&1), Err(TreeError::KeyNotFound));
    /// ```
    pub fn remove<Q>(&mut self, key: &Q) -> Result<V, TreeError>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.remove_entry(key).map(|(_, value)| value)
    }

    /// Removes a key from the tree, returning the stored key and its value.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::KeyNotFound`] if the key is absent.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rbmap::tree::RedBlackTree;
    ///
    /// let mut tree = RedBlackTree::new();
    /// tree.insert("apple".to_string(), 3).unwrap();
    ///
    /// assert_eq!(tree.remove_entry("apple"), Ok(("apple".to_string(), 3)));
    /// assert!(tree.is_empty());
    /// ```
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Result<(K, V), TreeError>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let Some(target) = self.find(key) else {
            tracing::debug!(len = self.len(), "remove rejected: key not found");
            return Err(TreeError::KeyNotFound);
        };

        let Node { key, value, .. } = self.remove_node(target);

        #[cfg(feature = "verify")]
        self.assert_invariants();

        Ok((key, value))
    }
}

impl<K, V> RedBlackTree<K, V> {
    /// Unlinks the entry stored at `target`, rebalances, and frees one arena slot.
    ///
    /// The returned node carries the key and value that were stored at
    /// `target`, whichever slot physically held them at the end.
    fn remove_node(&mut self, target: NodeIndex) -> Node<K, V> {
        // With two real children the in-order successor, which has no left
        // child, is the node that actually leaves the tree.
        let vacated = if self.left(target) == SENTINEL || self.right(target) == SENTINEL {
            target
        } else {
            self.minimum(self.right(target))
        };
        let removed_color = self.color(vacated);

        let replacement = if self.left(vacated) == SENTINEL {
            self.right(vacated)
        } else {
            self.left(vacated)
        };
        let parent = self.transplant(vacated, replacement);

        if vacated != target {
            self.swap_payload(target, vacated);
        }

        if removed_color == Color::Black {
            self.remove_fixup(replacement, parent);
        }

        self.release(vacated)
    }

    /// Puts `replacement` where `vacated` hangs and returns their shared parent.
    ///
    /// `replacement` may be [`SENTINEL`]. The returned parent is what the
    /// deletion fixup starts from, since the sentinel carries no parent link.
    fn transplant(&mut self, vacated: NodeIndex, replacement: NodeIndex) -> NodeIndex {
        let parent = self.parent(vacated);
        self.replace_child(parent, vacated, replacement);
        self.set_parent(replacement, parent);
        parent
    }

    /// Restores the black rule at `node`, a position one black short.
    ///
    /// `node` may be [`SENTINEL`]; `parent` is always its real parent unless
    /// `node` is the root.
    fn remove_fixup(&mut self, mut node: NodeIndex, mut parent: NodeIndex) {
        while node != self.root && self.is_black(node) {
            let side = self.side_of(node, parent);
            let mut sibling = self.child(parent, side.opposite());

            if self.is_red(sibling) {
                tracing::trace!("remove fixup: red sibling, rotating parent");
                self.rotate(parent, side);
                self.set_color(parent, Color::Red);
                self.set_color(sibling, Color::Black);
                sibling = self.child(parent, side.opposite());
            }

            let near = self.child(sibling, side);
            let far = self.child(sibling, side.opposite());

            if self.is_black(near) && self.is_black(far) {
                tracing::trace!("remove fixup: black nephews, pushing deficiency up");
                self.set_color(sibling, Color::Red);
                node = parent;
                parent = self.parent(node);
                continue;
            }

            if self.is_black(far) {
                tracing::trace!("remove fixup: red near nephew, rotating sibling");
                self.rotate(sibling, side.opposite());
                self.set_color(near, Color::Black);
                self.set_color(sibling, Color::Red);
                sibling = self.child(parent, side.opposite());
            }

            tracing::trace!("remove fixup: red far nephew, rotating parent");
            self.rotate(parent, side);
            self.set_color(sibling, self.color(parent));
            self.set_color(parent, Color::Black);
            let far = self.child(sibling, side.opposite());
            self.set_color(far, Color::Black);
            node = self.root;
        }

        self.set_color(node, Color::Black);
    }

    /// Exchanges the key and value of two distinct real nodes.
    fn swap_payload(&mut self, first: NodeIndex, second: NodeIndex) {
        debug_assert_ne!(first, second);
        let (low, high) = if first < second {
            (first, second)
        } else {
            (second, first)
        };
        let (head, tail) = self.nodes.split_at_mut(high);
        let (low_node, high_node) = (&mut head[low], &mut tail[0]);
        std::mem::swap(&mut low_node.key, &mut high_node.key);
        std::mem::swap(&mut low_node.value, &mut high_node.value);
    }

    /// Frees the arena slot of a node no longer linked into the tree.
    ///
    /// The last arena node moves into the hole, and the links pointing at
    /// it are redirected, so the arena stays dense.
    fn release(&mut self, index: NodeIndex) -> Node<K, V> {
        let last = self.nodes.len() - 1;
        let node = self.nodes.swap_remove(index);

        if index != last {
            let parent = self.parent(index);
            self.replace_child(parent, last, index);
            let (left, right) = (self.left(index), self.right(index));
            self.set_parent(left, index);
            self.set_parent(right, index);
        }

        node
    }
}

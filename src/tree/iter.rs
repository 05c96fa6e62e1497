//! In-order traversal.
//!
//! [`Iter`] walks the tree lazily with an explicit stack of pending
//! ancestors, so traversal depth never touches the call stack. Each call to
//! [`RedBlackTree::iter`] starts a fresh walk.

use std::iter::FusedIterator;

use super::RedBlackTree;
use super::node::{Node, NodeIndex, SENTINEL};

impl<K, V> RedBlackTree<K, V> {
    /// Returns an iterator over entries in ascending key order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rbmap::tree::RedBlackTree;
    ///
    /// let mut tree = RedBlackTree::new();
    /// tree.insert(3, "three").unwrap();
    /// tree.insert(1, "one").unwrap();
    /// tree.insert(2, "two").unwrap();
    ///
    /// let entries: Vec<(&i32, &&str)> = tree.iter().collect();
    /// assert_eq!(entries, vec![(&1, &"one"), (&2, &"two"), (&3, &"three")]);
    /// ```
    #[must_use]
    pub fn iter(&self) -> Iter<'_, K, V> {
        let mut iter = Iter {
            nodes: &self.nodes,
            stack: Vec::new(),
            remaining: self.nodes.len(),
        };
        iter.descend_left(self.root);
        iter
    }

    /// Returns an iterator over keys in ascending order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.iter().map(|(key, _)| key)
    }

    /// Returns an iterator over values in key order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rbmap::tree::RedBlackTree;
    ///
    /// let mut tree = RedBlackTree::new();
    /// for key in 1..=3 {
    ///     tree.insert(key, key * 10).unwrap();
    /// }
    ///
    /// let sum: i32 = tree.values().sum();
    /// assert_eq!(sum, 60);
    /// ```
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.iter().map(|(_, value)| value)
    }

    /// Returns the keys in ascending order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rbmap::tree::RedBlackTree;
    ///
    /// let mut tree = RedBlackTree::new();
    /// tree.insert(2, 200).unwrap();
    /// tree.insert(1, 100).unwrap();
    ///
    /// assert_eq!(tree.traverse(), vec![1, 2]);
    /// ```
    #[must_use]
    pub fn traverse(&self) -> Vec<K>
    where
        K: Clone,
    {
        self.keys().cloned().collect()
    }
}

// =============================================================================
// Iterator Implementation
// =============================================================================

/// An iterator over key-value pairs of a [`RedBlackTree`], in key order.
pub struct Iter<'a, K, V> {
    nodes: &'a [Node<K, V>],
    /// Nodes whose left subtree has been pushed but which are not yet yielded.
    stack: Vec<NodeIndex>,
    remaining: usize,
}

impl<K, V> Iter<'_, K, V> {
    fn descend_left(&mut self, mut index: NodeIndex) {
        while index != SENTINEL {
            self.stack.push(index);
            index = self.nodes[index].left;
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.stack.pop()?;
        let nodes = self.nodes;
        let node = &nodes[index];
        self.descend_left(node.right);
        self.remaining -= 1;
        Some((&node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

/// An owning iterator over key-value pairs of a [`RedBlackTree`], in key order.
pub struct IntoIter<K, V> {
    slots: Vec<Option<(K, V)>>,
    order: std::vec::IntoIter<NodeIndex>,
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.order.next()?;
        self.slots[index].take()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.order.size_hint()
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {
    fn len(&self) -> usize {
        self.order.len()
    }
}

impl<K, V> FusedIterator for IntoIter<K, V> {}

impl<K, V> IntoIterator for RedBlackTree<K, V> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack = Vec::new();
        let mut current = self.root;
        while current != SENTINEL || !stack.is_empty() {
            while current != SENTINEL {
                stack.push(current);
                current = self.nodes[current].left;
            }
            if let Some(index) = stack.pop() {
                order.push(index);
                current = self.nodes[index].right;
            }
        }

        let slots = self
            .nodes
            .into_iter()
            .map(|node| Some((node.key, node.value)))
            .collect();
        IntoIter {
            slots,
            order: order.into_iter(),
        }
    }
}

impl<'a, K, V> IntoIterator for &'a RedBlackTree<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

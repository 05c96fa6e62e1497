//! The tree handle and its read-only operations.

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;

use super::node::{Node, NodeIndex, SENTINEL, Side};
use crate::error::TreeError;

// =============================================================================
// RedBlackTree Definition
// =============================================================================

/// An ordered map backed by a red-black tree stored in an arena.
///
/// Keys must implement `Ord`. Each key maps to exactly one value: inserting
/// a key that is already present is rejected with
/// [`TreeError::DuplicateKey`] rather than overwriting.
///
/// # Time Complexity
///
/// | Operation                   | Complexity |
/// |-----------------------------|------------|
/// | `new`                       | O(1)       |
/// | `get` / `lookup`            | O(log N)   |
/// | `insert`                    | O(log N)   |
/// | `remove`                    | O(log N)   |
/// | `min` / `max`               | O(log N)   |
/// | `successor` / `predecessor` | O(log N)   |
/// | `iter` / `traverse`         | O(N)       |
/// | `len` / `is_empty`          | O(1)       |
///
/// # Examples
///
/// ```rust
/// use rbmap::tree::RedBlackTree;
///
/// let mut tree = RedBlackTree::new();
/// for index in 0..6 {
///     tree.insert(index, index * 10).unwrap();
/// }
/// tree.remove(&3).unwrap();
///
/// assert_eq!(tree.traverse(), vec![0, 1, 2, 4, 5]);
/// assert_eq!(tree.lookup(&4), Ok(&40));
/// ```
#[derive(Clone)]
pub struct RedBlackTree<K, V> {
    /// Every node of the tree; links are indices into this arena.
    pub(crate) nodes: Vec<Node<K, V>>,
    /// Index of the root, or `SENTINEL` when empty.
    pub(crate) root: NodeIndex,
}

static_assertions::assert_impl_all!(RedBlackTree<i32, String>: Send, Sync);
static_assertions::assert_not_impl_any!(RedBlackTree<std::rc::Rc<i32>, i32>: Send, Sync);

impl<K, V> RedBlackTree<K, V> {
    /// Creates a new empty tree.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rbmap::tree::RedBlackTree;
    ///
    /// let tree: RedBlackTree<i32, String> = RedBlackTree::new();
    /// assert!(tree.is_empty());
    /// ```
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            nodes: Vec::new(),
            root: SENTINEL,
        }
    }

    /// Creates an empty tree with room for `capacity` entries before the
    /// arena reallocates.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            root: SENTINEL,
        }
    }

    /// Returns the number of entries in the tree.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the tree contains no entries.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.root == SENTINEL
    }

    /// Removes every entry, keeping the arena's allocation.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.root = SENTINEL;
    }

    /// Returns the entry with the smallest key.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rbmap::tree::RedBlackTree;
    ///
    /// let mut tree = RedBlackTree::new();
    /// tree.insert(3, "three").unwrap();
    /// tree.insert(1, "one").unwrap();
    ///
    /// assert_eq!(tree.min(), Some((&1, &"one")));
    /// assert_eq!(tree.max(), Some((&3, &"three")));
    /// ```
    #[must_use]
    pub fn min(&self) -> Option<(&K, &V)> {
        self.entry(self.minimum(self.root))
    }

    /// Returns the entry with the largest key.
    #[must_use]
    pub fn max(&self) -> Option<(&K, &V)> {
        self.entry(self.maximum(self.root))
    }

    /// Returns the number of nodes on the longest path from the root down to
    /// a leaf, or 0 for an empty tree.
    ///
    /// The red-black invariants bound it by `2 * log2(len + 1)`.
    #[must_use]
    pub fn height(&self) -> usize {
        self.subtree_height(self.root)
    }

    fn subtree_height(&self, index: NodeIndex) -> usize {
        if index == SENTINEL {
            0
        } else {
            1 + self
                .subtree_height(self.left(index))
                .max(self.subtree_height(self.right(index)))
        }
    }

    pub(crate) fn entry(&self, index: NodeIndex) -> Option<(&K, &V)> {
        (index != SENTINEL).then(|| {
            let node = self.node(index);
            (&node.key, &node.value)
        })
    }
}

impl<K: Ord, V> RedBlackTree<K, V> {
    /// Locates the node holding `key`.
    pub(crate) fn find<Q>(&self, key: &Q) -> Option<NodeIndex>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut current = self.root;
        while current != SENTINEL {
            current = match key.cmp(self.node(current).key.borrow()) {
                Ordering::Less => self.left(current),
                Ordering::Greater => self.right(current),
                Ordering::Equal => return Some(current),
            };
        }
        None
    }

    /// Returns a reference to the value corresponding to the key.
    ///
    /// The key may be any borrowed form of the tree's key type, but the
    /// ordering on the borrowed form must match the ordering on the key type.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rbmap::tree::RedBlackTree;
    ///
    /// let mut tree = RedBlackTree::new();
    /// tree.insert("hello".to_string(), 42).unwrap();
    ///
    /// assert_eq!(tree.get("hello"), Some(&42));
    /// assert_eq!(tree.get("world"), None);
    /// ```
    #[must_use]
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find(key).map(|index| &self.node(index).value)
    }

    /// Returns a mutable reference to the value corresponding to the key.
    ///
    /// Only the value is reachable; keys cannot be changed in place.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find(key).map(|index| &mut self.node_mut(index).value)
    }

    /// Returns the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::KeyNotFound`] if the key is absent.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rbmap::tree::RedBlackTree;
    /// use rbmap::TreeError;
    ///
    /// let mut tree = RedBlackTree::new();
    /// tree.insert(1, 100).unwrap();
    /// tree.remove(&1).unwrap();
    ///
    /// assert_eq!(tree.lookup(&1), Err(TreeError::KeyNotFound));
    /// ```
    pub fn lookup<Q>(&self, key: &Q) -> Result<&V, TreeError>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.get(key).ok_or(TreeError::KeyNotFound)
    }

    /// Returns `true` if the tree contains the key.
    #[must_use]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find(key).is_some()
    }

    /// Returns the entry with the smallest key strictly greater than `key`.
    ///
    /// `key` itself does not need to be present.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rbmap::tree::RedBlackTree;
    ///
    /// let mut tree = RedBlackTree::new();
    /// for key in [10, 20, 30] {
    ///     tree.insert(key, ()).unwrap();
    /// }
    ///
    /// assert_eq!(tree.successor(&10).map(|(key, _)| *key), Some(20));
    /// assert_eq!(tree.successor(&15).map(|(key, _)| *key), Some(20));
    /// assert_eq!(tree.successor(&30), None);
    /// ```
    #[must_use]
    pub fn successor<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.entry(self.bound_neighbor(key, Side::Right))
    }

    /// Returns the entry with the largest key strictly less than `key`.
    ///
    /// `key` itself does not need to be present.
    #[must_use]
    pub fn predecessor<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.entry(self.bound_neighbor(key, Side::Left))
    }

    /// Finds the in-order neighbour of `key` on `side` with a single descent.
    ///
    /// A present key hands over to the parent-link walk of `neighbor`.
    fn bound_neighbor<Q>(&self, key: &Q, side: Side) -> NodeIndex
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut candidate = SENTINEL;
        let mut current = self.root;
        while current != SENTINEL {
            let toward = match key.cmp(self.node(current).key.borrow()) {
                Ordering::Less => Side::Left,
                Ordering::Greater => Side::Right,
                Ordering::Equal => return self.neighbor(current, side),
            };
            if toward == side.opposite() {
                candidate = current;
            }
            current = self.child(current, toward);
        }
        candidate
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<K, V> Default for RedBlackTree<K, V> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<K: PartialEq, V: PartialEq> PartialEq for RedBlackTree<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<K: Eq, V: Eq> Eq for RedBlackTree<K, V> {}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for RedBlackTree<K, V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_map().entries(self.iter()).finish()
    }
}

impl<K: fmt::Display, V: fmt::Display> fmt::Display for RedBlackTree<K, V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{{")?;
        let mut first = true;
        for (key, value) in self {
            if first {
                first = false;
            } else {
                write!(formatter, ", ")?;
            }
            write!(formatter, "{key}: {value}")?;
        }
        write!(formatter, "}}")
    }
}

// =============================================================================
// Tests
// =============================================================================

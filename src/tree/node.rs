//! Node and sentinel representation.
//!
//! Nodes live in an arena (`Vec<Node<K, V>>`) owned by the tree and refer to
//! each other by [`NodeIndex`]. The reserved index [`SENTINEL`] stands for
//! every absent link: a missing child, the root's parent, or an empty tree.
//! All accessors below accept [`SENTINEL`] and answer for it as a black leaf,
//! so the rotation and fixup code never special-cases leaves.

use super::RedBlackTree;

/// Position of a node inside the tree's arena.
pub(crate) type NodeIndex = usize;

/// The reserved index standing for "no node".
///
/// No arena slot backs it. Its color reads as [`Color::Black`] and writing
/// to it is a no-op.
pub(crate) const SENTINEL: NodeIndex = NodeIndex::MAX;

// =============================================================================
// Color and Side
// =============================================================================

/// The color of a Red-Black Tree node.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) enum Color {
    Red,
    Black,
}

/// Which child slot a node occupies under its parent.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) enum Side {
    Left,
    Right,
}

impl Side {
    /// Returns the mirrored side.
    #[inline]
    pub(crate) const fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

// =============================================================================
// Node Definition
// =============================================================================

/// Internal node structure for the Red-Black Tree.
#[derive(Clone, Debug)]
pub(crate) struct Node<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    pub(crate) color: Color,
    pub(crate) parent: NodeIndex,
    pub(crate) left: NodeIndex,
    pub(crate) right: NodeIndex,
}

impl<K, V> Node<K, V> {
    /// Creates a new red leaf hanging under `parent`.
    pub(crate) const fn new_red(key: K, value: V, parent: NodeIndex) -> Self {
        Self {
            key,
            value,
            color: Color::Red,
            parent,
            left: SENTINEL,
            right: SENTINEL,
        }
    }

    #[inline]
    const fn child(&self, side: Side) -> NodeIndex {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    #[inline]
    const fn child_mut(&mut self, side: Side) -> &mut NodeIndex {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }
}

// =============================================================================
// Sentinel-aware Accessors
// =============================================================================

impl<K, V> RedBlackTree<K, V> {
    #[inline]
    pub(crate) fn node(&self, index: NodeIndex) -> &Node<K, V> {
        &self.nodes[index]
    }

    #[inline]
    pub(crate) fn node_mut(&mut self, index: NodeIndex) -> &mut Node<K, V> {
        &mut self.nodes[index]
    }

    #[inline]
    pub(crate) fn color(&self, index: NodeIndex) -> Color {
        if index == SENTINEL {
            Color::Black
        } else {
            self.nodes[index].color
        }
    }

    #[inline]
    pub(crate) fn is_red(&self, index: NodeIndex) -> bool {
        self.color(index) == Color::Red
    }

    #[inline]
    pub(crate) fn is_black(&self, index: NodeIndex) -> bool {
        self.color(index) == Color::Black
    }

    #[inline]
    pub(crate) fn set_color(&mut self, index: NodeIndex, color: Color) {
        if index != SENTINEL {
            self.nodes[index].color = color;
        }
    }

    #[inline]
    pub(crate) fn parent(&self, index: NodeIndex) -> NodeIndex {
        if index == SENTINEL {
            SENTINEL
        } else {
            self.nodes[index].parent
        }
    }

    #[inline]
    pub(crate) fn set_parent(&mut self, index: NodeIndex, parent: NodeIndex) {
        if index != SENTINEL {
            self.nodes[index].parent = parent;
        }
    }

    #[inline]
    pub(crate) fn child(&self, index: NodeIndex, side: Side) -> NodeIndex {
        if index == SENTINEL {
            SENTINEL
        } else {
            self.nodes[index].child(side)
        }
    }

    #[inline]
    pub(crate) fn left(&self, index: NodeIndex) -> NodeIndex {
        self.child(index, Side::Left)
    }

    #[inline]
    pub(crate) fn right(&self, index: NodeIndex) -> NodeIndex {
        self.child(index, Side::Right)
    }

    /// Sets a child link of a real node. The child's parent link is left alone.
    #[inline]
    pub(crate) fn set_child(&mut self, index: NodeIndex, side: Side, child: NodeIndex) {
        *self.nodes[index].child_mut(side) = child;
    }

    /// Returns the side `index` hangs on under `parent`.
    ///
    /// `index` may be [`SENTINEL`]; it is then matched against the parent's
    /// left link first.
    #[inline]
    pub(crate) fn side_of(&self, index: NodeIndex, parent: NodeIndex) -> Side {
        if self.left(parent) == index {
            Side::Left
        } else {
            Side::Right
        }
    }

    /// Points whichever link of `parent` referenced `old` at `new` instead.
    ///
    /// A [`SENTINEL`] parent means `old` was the root.
    pub(crate) fn replace_child(&mut self, parent: NodeIndex, old: NodeIndex, new: NodeIndex) {
        if parent == SENTINEL {
            self.root = new;
        } else {
            let side = self.side_of(old, parent);
            self.set_child(parent, side, new);
        }
    }

    /// Descends from `subtree` along `side` as far as possible.
    ///
    /// Returns [`SENTINEL`] for an empty subtree.
    pub(crate) fn extreme(&self, subtree: NodeIndex, side: Side) -> NodeIndex {
        if subtree == SENTINEL {
            return SENTINEL;
        }
        let mut current = subtree;
        loop {
            let next = self.child(current, side);
            if next == SENTINEL {
                return current;
            }
            current = next;
        }
    }

    #[inline]
    pub(crate) fn minimum(&self, subtree: NodeIndex) -> NodeIndex {
        self.extreme(subtree, Side::Left)
    }

    #[inline]
    pub(crate) fn maximum(&self, subtree: NodeIndex) -> NodeIndex {
        self.extreme(subtree, Side::Right)
    }

    /// Returns the in-order neighbour of a real node: the successor for
    /// `Side::Right`, the predecessor for `Side::Left`.
    pub(crate) fn neighbor(&self, index: NodeIndex, side: Side) -> NodeIndex {
        let child = self.child(index, side);
        if child != SENTINEL {
            return self.extreme(child, side.opposite());
        }
        let mut current = index;
        let mut parent = self.parent(index);
        while parent != SENTINEL && current == self.child(parent, side) {
            current = parent;
            parent = self.parent(parent);
        }
        parent
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_side_opposite() {
        assert_eq!(Side::Left.opposite(), Side::Right);
        assert_eq!(Side::Right.opposite(), Side::Left);
    }

    #[rstest]
    fn test_new_red_node_has_sentinel_children() {
        let node = Node::new_red(1, "one", SENTINEL);
        assert_eq!(node.color, Color::Red);
        assert_eq!(node.left, SENTINEL);
        assert_eq!(node.right, SENTINEL);
        assert_eq!(node.parent, SENTINEL);
    }

    #[rstest]
    fn test_sentinel_reads_as_black_leaf() {
        let mut tree: RedBlackTree<i32, i32> = RedBlackTree::new();
        assert_eq!(tree.color(SENTINEL), Color::Black);
        assert_eq!(tree.left(SENTINEL), SENTINEL);
        assert_eq!(tree.right(SENTINEL), SENTINEL);
        assert_eq!(tree.parent(SENTINEL), SENTINEL);

        // Writes through the sentinel are dropped.
        tree.set_color(SENTINEL, Color::Red);
        tree.set_parent(SENTINEL, 0);
        assert_eq!(tree.color(SENTINEL), Color::Black);
        assert_eq!(tree.parent(SENTINEL), SENTINEL);
    }

    #[rstest]
    fn test_extreme_of_empty_subtree_is_sentinel() {
        let tree: RedBlackTree<i32, i32> = RedBlackTree::new();
        assert_eq!(tree.minimum(SENTINEL), SENTINEL);
        assert_eq!(tree.maximum(SENTINEL), SENTINEL);
    }

    #[rstest]
    fn test_neighbor_walks_in_order() {
        let mut tree = RedBlackTree::new();
        for key in [50, 30, 70, 20, 40, 60, 80] {
            tree.insert(key, ()).unwrap();
        }

        let mut keys = Vec::new();
        let mut current = tree.minimum(tree.root);
        while current != SENTINEL {
            keys.push(tree.node(current).key);
            current = tree.neighbor(current, Side::Right);
        }
        assert_eq!(keys, vec![20, 30, 40, 50, 60, 70, 80]);

        let mut keys = Vec::new();
        let mut current = tree.maximum(tree.root);
        while current != SENTINEL {
            keys.push(tree.node(current).key);
            current = tree.neighbor(current, Side::Left);
        }
        assert_eq!(keys, vec![80, 70, 60, 50, 40, 30, 20]);
    }
}

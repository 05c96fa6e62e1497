//! Rotation primitives.
//!
//! A rotation changes the local shape of the tree without changing the
//! in-order sequence of keys. Colors are never touched here; the fixups
//! recolor separately.
//!
//! ```text
//!        pivot                     riser
//!        /   \    rotate_left      /   \
//!       a    riser   ------>    pivot   c
//!            /   \              /   \
//!          inner  c            a   inner
//! ```

use super::RedBlackTree;
use super::node::{NodeIndex, SENTINEL, Side};

impl<K, V> RedBlackTree<K, V> {
    /// Rotates `pivot` down toward `side`.
    ///
    /// `Side::Left` is [`rotate_left`](Self::rotate_left), `Side::Right` is
    /// [`rotate_right`](Self::rotate_right).
    #[inline]
    pub(crate) fn rotate(&mut self, pivot: NodeIndex, side: Side) {
        match side {
            Side::Left => self.rotate_left(pivot),
            Side::Right => self.rotate_right(pivot),
        }
    }

    /// Promotes the right child of `pivot` into its place.
    pub(crate) fn rotate_left(&mut self, pivot: NodeIndex) {
        let riser = self.right(pivot);
        debug_assert_ne!(riser, SENTINEL, "rotate_left needs a right child");

        let inner = self.left(riser);
        self.set_child(pivot, Side::Right, inner);
        self.set_parent(inner, pivot);

        let parent = self.parent(pivot);
        self.set_parent(riser, parent);
        self.replace_child(parent, pivot, riser);

        self.set_child(riser, Side::Left, pivot);
        self.set_parent(pivot, riser);
    }

    /// Promotes the left child of `pivot` into its place.
    pub(crate) fn rotate_right(&mut self, pivot: NodeIndex) {
        let riser = self.left(pivot);
        debug_assert_ne!(riser, SENTINEL, "rotate_right needs a left child");

        let inner = self.right(riser);
        self.set_child(pivot, Side::Left, inner);
        self.set_parent(inner, pivot);

        let parent = self.parent(pivot);
        self.set_parent(riser, parent);
        self.replace_child(parent, pivot, riser);

        self.set_child(riser, Side::Right, pivot);
        self.set_parent(pivot, riser);
    }
}

#[cfg(test)]
mod tests {
    use super::super::node::Color;
    use super::*;
    use rstest::rstest;

    /// Builds the tree `2 (1, 4 (3, 5))` by hand, all black, without fixups.
    fn right_heavy() -> RedBlackTree<i32, ()> {
        let mut tree = RedBlackTree::new();
        for key in [2, 1, 4, 3, 5] {
            tree.insert(key, ()).unwrap();
        }
        for index in 0..tree.nodes.len() {
            tree.set_color(index, Color::Black);
        }
        tree
    }

    fn shape(tree: &RedBlackTree<i32, ()>, index: NodeIndex) -> String {
        if index == SENTINEL {
            return ".".to_string();
        }
        format!(
            "{}({},{})",
            tree.node(index).key,
            shape(tree, tree.left(index)),
            shape(tree, tree.right(index))
        )
    }

    #[rstest]
    fn test_rotate_left_at_root_promotes_right_child() {
        let mut tree = right_heavy();
        let before = tree.traverse();
        assert_eq!(shape(&tree, tree.root), "2(1(.,.),4(3(.,.),5(.,.)))");

        tree.rotate_left(tree.root);

        assert_eq!(shape(&tree, tree.root), "4(2(1(.,.),3(.,.)),5(.,.))");
        assert_eq!(tree.traverse(), before);
        assert_eq!(tree.parent(tree.root), SENTINEL);
    }

    #[rstest]
    fn test_rotate_right_undoes_rotate_left() {
        let mut tree = right_heavy();
        let original = shape(&tree, tree.root);

        tree.rotate_left(tree.root);
        tree.rotate_right(tree.root);

        assert_eq!(shape(&tree, tree.root), original);
    }

    #[rstest]
    fn test_rotate_keeps_parent_links_consistent() {
        let mut tree = right_heavy();
        let four = tree.right(tree.root);

        tree.rotate(four, Side::Right);

        let three = tree.right(tree.root);
        assert_eq!(tree.node(three).key, 3);
        assert_eq!(tree.parent(three), tree.root);
        assert_eq!(tree.parent(four), three);
        assert_eq!(tree.right(three), four);
        assert_eq!(tree.left(four), SENTINEL);
        assert_eq!(tree.traverse(), vec![1, 2, 3, 4, 5]);
    }

    #[rstest]
    fn test_rotate_does_not_recolor() {
        let mut tree = right_heavy();
        let four = tree.right(tree.root);
        tree.set_color(four, Color::Red);

        tree.rotate_left(tree.root);

        assert_eq!(tree.color(tree.root), Color::Red);
        assert_eq!(tree.node(tree.root).key, 4);
    }
}

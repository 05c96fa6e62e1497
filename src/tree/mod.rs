//! Ordered map backed by a mutable red-black tree.
//!
//! This module provides [`RedBlackTree`], an ordered map whose nodes live in
//! an arena owned by the tree and link to each other by index.
//!
//! # Overview
//!
//! - O(log N) insert, remove, get, min/max, successor/predecessor
//! - O(N) in-order traversal, lazily through [`Iter`]
//! - O(1) len and `is_empty`
//!
//! Keys are unique: inserting a present key or removing an absent one is
//! rejected with a [`TreeError`](crate::TreeError) and leaves the tree as it
//! was.
//!
//! # Examples
//!
//! ```rust
//! use rbmap::tree::RedBlackTree;
//!
//! let mut tree = RedBlackTree::new();
//! tree.insert(3, "three").unwrap();
//! tree.insert(1, "one").unwrap();
//! tree.insert(2, "two").unwrap();
//!
//! // Entries are always in sorted order
//! let keys: Vec<&i32> = tree.keys().collect();
//! assert_eq!(keys, vec![&1, &2, &3]);
//!
//! assert_eq!(tree.remove(&2), Ok("two"));
//! assert_eq!(tree.traverse(), vec![1, 3]);
//! ```
//!
//! # Internal Structure
//!
//! The tree maintains the following invariants after every operation:
//! 1. Every node is either red or black
//! 2. The root is black
//! 3. All leaves (the sentinel) are black
//! 4. Red nodes have only black children
//! 5. Every path from a node down to a leaf has the same number of black nodes
//!
//! These invariants ensure the tree height is at most `2 * log2(N + 1)`.
//! With the `invariant` feature (on by default) they can be checked with
//! [`RedBlackTree::validate`]; the `verify` feature checks them after every
//! mutation.

mod insert;
mod iter;
mod map;
mod node;
mod remove;
mod rotation;

#[cfg(feature = "invariant")]
mod invariant;

#[cfg(feature = "serde")]
mod serialize;

pub use iter::IntoIter;
pub use iter::Iter;
pub use map::RedBlackTree;

#[cfg(feature = "invariant")]
pub use invariant::InvariantViolation;

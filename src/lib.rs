//! # rbmap
//!
//! An in-memory ordered map built on a self-balancing red-black tree.
//!
//! ## Overview
//!
//! [`RedBlackTree`](tree::RedBlackTree) keeps unique, totally ordered keys
//! with arbitrary values and supports insertion, deletion, point lookup,
//! min/max, successor/predecessor and full in-order traversal. Every
//! mutation runs in worst-case O(log N).
//!
//! Nodes live in an arena owned by the tree and link to each other by
//! index, with one reserved index standing in for every absent child or
//! parent. The crate contains no `unsafe` code.
//!
//! ## Feature Flags
//!
//! - `invariant` (default): the invariant checker
//!   ([`RedBlackTree::validate`](tree::RedBlackTree::validate))
//! - `verify`: assert every invariant after each `insert`/`remove`
//! - `serde`: `Serialize`/`Deserialize` as a map
//! - `full`: enable all of the above except `verify`
//!
//! ## Example
//!
//! ```rust
//! use rbmap::prelude::*;
//!
//! let mut tree = RedBlackTree::new();
//! tree.insert(1, 100).unwrap();
//! tree.insert(2, 200).unwrap();
//! tree.remove(&1).unwrap();
//!
//! assert_eq!(tree.traverse(), vec![2]);
//! assert_eq!(tree.lookup(&1), Err(TreeError::KeyNotFound));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// # Usage
///
/// ```rust
/// use rbmap::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::TreeError;
    pub use crate::tree::*;
}

mod error;
pub mod tree;

pub use error::TreeError;

//! Error types for tree operations.
//!
//! Both errors describe a precondition the caller violated. They are detected
//! before any structural change begins, so a tree that returned an error is
//! exactly as it was before the call.

/// Represents a rejected operation on a [`RedBlackTree`](crate::tree::RedBlackTree).
///
/// # Examples
///
/// ```rust
/// use rbmap::TreeError;
/// use rbmap::tree::RedBlackTree;
///
/// let mut tree = RedBlackTree::new();
/// tree.insert(1, "one").unwrap();
///
/// assert_eq!(tree.insert(1, "uno"), Err(TreeError::DuplicateKey));
/// assert_eq!(tree.remove(&2), Err(TreeError::KeyNotFound));
/// assert_eq!(format!("{}", TreeError::KeyNotFound), "key not found in tree");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TreeError {
    /// The key passed to `insert` is already present.
    DuplicateKey,
    /// The key passed to `remove` or `lookup` is absent.
    KeyNotFound,
}

impl std::fmt::Display for TreeError {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateKey => write!(formatter, "duplicate key: the tree already holds this key"),
            Self::KeyNotFound => write!(formatter, "key not found in tree"),
        }
    }
}

impl std::error::Error for TreeError {}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(TreeError::DuplicateKey, "duplicate key: the tree already holds this key")]
    #[case(TreeError::KeyNotFound, "key not found in tree")]
    fn test_tree_error_display(#[case] error: TreeError, #[case] expected: &str) {
        assert_eq!(format!("{error}"), expected);
    }

    #[rstest]
    fn test_tree_error_equality() {
        assert_eq!(TreeError::DuplicateKey, TreeError::DuplicateKey);
        assert_ne!(TreeError::DuplicateKey, TreeError::KeyNotFound);
    }

    #[rstest]
    fn test_tree_error_is_error_trait() {
        fn assert_error<E: std::error::Error>(_: &E) {}

        assert_error(&TreeError::KeyNotFound);
    }
}

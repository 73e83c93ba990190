//! An ordered map implemented with an AVL tree that keeps a balance factor
//! per node, and a check whether all leaves of a binary tree lie at the same
//! depth.
//!
//! ```
//! use avlbst::{equal_paths, AvlTreeMap, BinaryNode};
//!
//! let mut map = AvlTreeMap::new();
//! for key in [10, 20, 30] {
//!     map.insert(key, key * 2);
//! }
//! assert_eq!(map.height(), 2);
//! assert!(map.is_balanced());
//!
//! let tree = BinaryNode::new(1, Some(BinaryNode::leaf(2)), Some(BinaryNode::leaf(3)));
//! assert!(equal_paths(Some(&tree)));
//! ```

mod equal_paths;
mod error;
mod map;

pub use equal_paths::{equal_paths, BinaryNode, BinaryTree};
pub use error::KeyError;
pub use map::AvlTreeMap;

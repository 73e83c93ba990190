//! Checks whether all leaves of a binary tree are at the same depth.

/// A binary tree node that can hand out its children.
pub trait BinaryTree {
    fn left(&self) -> Option<&Self>;
    fn right(&self) -> Option<&Self>;

    /// Returns true if the node has no children.
    fn is_leaf(&self) -> bool {
        self.left().is_none() && self.right().is_none()
    }
}

/// A plain binary tree node owning its children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryNode<T> {
    pub key: T,
    pub left: Option<Box<BinaryNode<T>>>,
    pub right: Option<Box<BinaryNode<T>>>,
}

impl<T> BinaryNode<T> {
    pub fn new(key: T, left: Option<Self>, right: Option<Self>) -> Self {
        Self {
            key,
            left: left.map(Box::new),
            right: right.map(Box::new),
        }
    }

    pub fn leaf(key: T) -> Self {
        Self::new(key, None, None)
    }
}

impl<T> BinaryTree for BinaryNode<T> {
    fn left(&self) -> Option<&Self> {
        self.left.as_deref()
    }

    fn right(&self) -> Option<&Self> {
        self.right.as_deref()
    }
}

/// Returns true if every root-to-leaf path has the same length.
/// An empty tree and a single node trivially pass.
///
/// ```
/// use avlbst::{equal_paths, BinaryNode};
///
/// let balanced = BinaryNode::new(1, Some(BinaryNode::leaf(2)), Some(BinaryNode::leaf(3)));
/// assert!(equal_paths(Some(&balanced)));
///
/// let lopsided = BinaryNode::new(1, Some(BinaryNode::leaf(2)), None);
/// assert!(equal_paths(Some(&lopsided)));
///
/// let uneven = BinaryNode::new(
///     1,
///     Some(BinaryNode::new(2, Some(BinaryNode::leaf(4)), None)),
///     Some(BinaryNode::leaf(3)),
/// );
/// assert!(!equal_paths(Some(&uneven)));
/// ```
pub fn equal_paths<N: BinaryTree>(root: Option<&N>) -> bool {
    let mut leaf_depth = None;
    match root {
        None => true,
        Some(node) => check_paths(node, 0, &mut leaf_depth),
    }
}

// The first leaf found fixes the depth every other leaf must match.
fn check_paths<N: BinaryTree>(node: &N, depth: usize, leaf_depth: &mut Option<usize>) -> bool {
    if node.is_leaf() {
        return *leaf_depth.get_or_insert(depth) == depth;
    }
    if let Some(left) = node.left() {
        if !check_paths(left, depth + 1, leaf_depth) {
            return false;
        }
    }
    match node.right() {
        Some(right) => check_paths(right, depth + 1, leaf_depth),
        None => true,
    }
}

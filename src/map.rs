use std::cmp::{self, Ordering};
use std::collections::VecDeque;
use std::fmt;
use std::iter::FromIterator;
use std::mem;
use std::ptr::NonNull;

use crate::error::KeyError;

/// An ordered map implemented with an AVL tree.
///
/// Every node stores a balance factor, the height of its right subtree minus
/// the height of its left subtree, which rotations keep within `-1..=1`.
///
/// ```
/// use avlbst::AvlTreeMap;
/// let mut map = AvlTreeMap::new();
/// map.insert(10, "ten");
/// map.insert(20, "twenty");
/// map.insert(30, "thirty");
/// assert_eq!(map.get(&20), Some(&"twenty"));
/// assert_eq!(map.insert(20, "TWENTY"), Some("twenty"));
/// assert_eq!(map.remove(&10), Some("ten"));
/// assert!(map.get(&10).is_none());
/// ```
pub struct AvlTreeMap<K: Ord, V> {
    root: Link<K, V>,
    num_nodes: usize,
}

struct Node<K, V> {
    key: K,
    value: V,
    left: Link<K, V>,
    right: Link<K, V>,
    parent: Link<K, V>,
    balance: i8,
}

type NodePtr<K, V> = NonNull<Node<K, V>>;
type Link<K, V> = Option<NodePtr<K, V>>;
type LinkPtr<K, V> = NonNull<Link<K, V>>;

enum InsertPos<K, V> {
    Occupied(NodePtr<K, V>),
    Vacant(Link<K, V>, LinkPtr<K, V>),
}

#[allow(clippy::enum_variant_names)]
enum Direction {
    FromParent,
    FromLeft,
    FromRight,
}

impl<K: Ord, V> AvlTreeMap<K, V> {
    /// Creates an empty map.
    /// No memory is allocated until the first item is inserted.
    pub fn new() -> Self {
        Self {
            root: None,
            num_nodes: 0,
        }
    }

    /// Returns true if the map contains no elements.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Returns the number of elements in the map.
    pub fn len(&self) -> usize {
        self.num_nodes
    }

    /// Returns the number of nodes on the longest path from the root to a leaf.
    /// An empty map has height 0.
    pub fn height(&self) -> usize {
        Self::subtree_height(self.root)
    }

    /// Recomputes all subtree heights and returns whether every node satisfies
    /// the AVL condition.
    pub fn is_balanced(&self) -> bool {
        Self::balanced_height(self.root).is_some()
    }

    /// Clears the map, deallocating all memory.
    pub fn clear(&mut self) {
        self.postorder(|node_ptr| unsafe { Node::destroy(node_ptr) });
        self.root = None;
        self.num_nodes = 0;
    }

    /// Returns a reference to the value corresponding to the key.
    pub fn get(&self, key: &K) -> Option<&V> {
        self.find(key)
            .map(|node_ptr| &unsafe { &*node_ptr.as_ptr() }.value)
    }

    /// Returns a mutable reference to the value corresponding to the key.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        self.find(key)
            .map(|node_ptr| &mut unsafe { &mut *node_ptr.as_ptr() }.value)
    }

    /// Returns references to the key-value pair corresponding to the key.
    pub fn get_key_value(&self, key: &K) -> Option<(&K, &V)> {
        self.find(key).map(|node_ptr| {
            let node = unsafe { &*node_ptr.as_ptr() };
            (&node.key, &node.value)
        })
    }

    /// Returns true if the map contains a value for the key.
    pub fn contains_key(&self, key: &K) -> bool {
        self.find(key).is_some()
    }

    /// Returns a reference to the value corresponding to the key,
    /// or [`KeyError`] if the key is not in the map.
    pub fn try_get(&self, key: &K) -> Result<&V, KeyError> {
        self.get(key).ok_or(KeyError)
    }

    /// Returns the entry with the largest key strictly less than `key`.
    /// Returns `None` if `key` is not in the map or is its smallest key.
    pub fn predecessor(&self, key: &K) -> Option<(&K, &V)> {
        let node_ptr = self.find(key)?;
        Self::predecessor_node(node_ptr).map(|pred_ptr| {
            let node = unsafe { &*pred_ptr.as_ptr() };
            (&node.key, &node.value)
        })
    }

    /// Inserts a key-value pair into the map.
    /// If the key was already present, its value is overwritten in place and
    /// the old value is returned. The tree shape is left untouched then.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        match self.find_insert_pos(&key) {
            InsertPos::Occupied(node_ptr) => Some(mem::replace(
                unsafe { &mut (*node_ptr.as_ptr()).value },
                value,
            )),
            InsertPos::Vacant(parent, mut link_ptr) => {
                let node_ptr = Node::create(parent, key, value);
                unsafe {
                    *link_ptr.as_mut() = Some(node_ptr);
                }
                self.num_nodes += 1;
                self.retrace_insert(node_ptr);
                None
            }
        }
    }

    /// Removes a key from the map.
    /// Returns the value at the key if the key was previously in the map.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.remove_entry(key).map(|(_, value)| value)
    }

    /// Removes a key from the map.
    /// Returns the stored key and value if the key was previously in the map.
    pub fn remove_entry(&mut self, key: &K) -> Option<(K, V)> {
        let node_ptr = self.find(key)?;
        debug_assert!(self.num_nodes >= 1);
        self.unlink_node(node_ptr);
        self.num_nodes -= 1;
        let node = unsafe { Node::unbox(node_ptr) };
        Some((node.key, node.value))
    }

    /// Calls `f` for every entry in ascending key order.
    pub fn traverse_in_order<F: FnMut(&K, &V)>(&self, mut f: F) {
        self.inorder(|node_ptr| {
            let node = unsafe { node_ptr.as_ref() };
            f(&node.key, &node.value);
        });
    }

    /// Calls `f` for every entry, visiting each node before its subtrees.
    pub fn traverse_pre_order<F: FnMut(&K, &V)>(&self, mut f: F) {
        self.preorder(|node_ptr| {
            let node = unsafe { node_ptr.as_ref() };
            f(&node.key, &node.value);
        });
    }

    /// Calls `f` for every entry, level by level from the root,
    /// left to right within a level.
    pub fn traverse_level_order<F: FnMut(&K, &V)>(&self, mut f: F) {
        let mut queue: VecDeque<NodePtr<K, V>> = self.root.into_iter().collect();
        while let Some(node_ptr) = queue.pop_front() {
            let node = unsafe { node_ptr.as_ref() };
            f(&node.key, &node.value);
            queue.extend(node.left);
            queue.extend(node.right);
        }
    }

    /// Asserts that the internal tree structure is consistent:
    /// parent links, key order, stored balance factors, the AVL condition
    /// and the node count.
    #[cfg(any(test, feature = "consistency_check"))]
    pub fn check_consistency(&self) {
        unsafe {
            // Check root link
            if let Some(root_ptr) = self.root {
                assert!(root_ptr.as_ref().parent.is_none());
            }

            // Check tree nodes
            let mut num_nodes = 0;
            self.preorder(|node_ptr| {
                let node = node_ptr.as_ref();

                // Check link for left child node
                if let Some(left_ptr) = node.left {
                    assert!(left_ptr.as_ref().parent == Some(node_ptr));
                    assert!(left_ptr.as_ref().key < node.key);
                }

                // Check link for right child node
                if let Some(right_ptr) = node.right {
                    assert!(right_ptr.as_ref().parent == Some(node_ptr));
                    assert!(right_ptr.as_ref().key > node.key);
                }

                // Check stored balance against actual heights
                let left_height = Self::subtree_height(node.left) as i64;
                let right_height = Self::subtree_height(node.right) as i64;
                assert_eq!(i64::from(node.balance), right_height - left_height);

                // Check AVL condition (nearly balance)
                assert!((-1..=1).contains(&node.balance));

                num_nodes += 1;
            });

            // Check number of nodes
            assert_eq!(num_nodes, self.num_nodes);

            // Check global key order
            let mut prev: Link<K, V> = None;
            self.inorder(|node_ptr| {
                if let Some(prev_ptr) = prev {
                    assert!(prev_ptr.as_ref().key < node_ptr.as_ref().key);
                }
                prev = Some(node_ptr);
            });
        }
    }

    /// Returns the keys and balance factors in pre-order.
    /// Pre-order keys of a search tree determine its shape.
    #[cfg(test)]
    pub(crate) fn shape(&self) -> Vec<(K, i8)>
    where
        K: Clone,
    {
        let mut shape = Vec::with_capacity(self.num_nodes);
        self.preorder(|node_ptr| {
            let node = unsafe { node_ptr.as_ref() };
            shape.push((node.key.clone(), node.balance));
        });
        shape
    }

    fn find(&self, key: &K) -> Link<K, V> {
        let mut current = self.root;
        while let Some(node_ptr) = current {
            current = unsafe {
                match key.cmp(&node_ptr.as_ref().key) {
                    Ordering::Equal => break,
                    Ordering::Less => node_ptr.as_ref().left,
                    Ordering::Greater => node_ptr.as_ref().right,
                }
            }
        }
        current
    }

    fn find_insert_pos(&mut self, key: &K) -> InsertPos<K, V> {
        let mut parent: Link<K, V> = None;
        let mut link_ptr: LinkPtr<K, V> = LinkPtr::from(&mut self.root);
        unsafe {
            while let Some(mut node_ptr) = *link_ptr.as_ref() {
                link_ptr = match key.cmp(&node_ptr.as_ref().key) {
                    Ordering::Equal => return InsertPos::Occupied(node_ptr),
                    Ordering::Less => LinkPtr::from(&mut node_ptr.as_mut().left),
                    Ordering::Greater => LinkPtr::from(&mut node_ptr.as_mut().right),
                };
                parent = Some(node_ptr);
            }
        }
        InsertPos::Vacant(parent, link_ptr)
    }

    /// Returns the in-order predecessor of a node.
    fn predecessor_node(node_ptr: NodePtr<K, V>) -> Link<K, V> {
        unsafe {
            // Rightmost node of the left subtree
            if let Some(mut current) = node_ptr.as_ref().left {
                while let Some(right_ptr) = current.as_ref().right {
                    current = right_ptr;
                }
                return Some(current);
            }

            // Closest ancestor reached from its right subtree
            let mut child = node_ptr;
            let mut parent = node_ptr.as_ref().parent;
            while let Some(parent_ptr) = parent {
                if parent_ptr.as_ref().right == Some(child) {
                    return Some(parent_ptr);
                }
                child = parent_ptr;
                parent = parent_ptr.as_ref().parent;
            }
            None
        }
    }

    /// Detaches a node from the tree and restores balance above it.
    /// The node itself stays allocated; the caller frees it.
    fn unlink_node(&mut self, node_ptr: NodePtr<K, V>) {
        unsafe {
            // Node with two children trades places with its predecessor,
            // which has no right child
            if node_ptr.as_ref().left.is_some() && node_ptr.as_ref().right.is_some() {
                if let Some(pred_ptr) = Self::predecessor_node(node_ptr) {
                    log::trace!("swap node with its predecessor before unlinking");
                    self.swap_nodes(node_ptr, pred_ptr);
                }
            }
            debug_assert!(node_ptr.as_ref().left.is_none() || node_ptr.as_ref().right.is_none());

            // Node to-unlink is stem or leaf, splice in its only child
            let child = node_ptr.as_ref().left.or(node_ptr.as_ref().right);
            let parent = node_ptr.as_ref().parent;
            if let Some(mut child_ptr) = child {
                child_ptr.as_mut().parent = parent;
            }
            match parent {
                None => {
                    log::trace!("unlink root node");
                    self.root = child;
                }
                Some(mut parent_ptr) => {
                    // Parent node lost height on one side
                    if parent_ptr.as_ref().left == Some(node_ptr) {
                        parent_ptr.as_mut().left = child;
                        self.retrace_remove(parent_ptr, 1);
                    } else {
                        parent_ptr.as_mut().right = child;
                        self.retrace_remove(parent_ptr, -1);
                    }
                }
            }
        }
    }

    /// Exchanges the tree positions of two nodes, keeping each node's key and
    /// value in its own allocation. Balance factors belong to the position and
    /// are exchanged as well.
    fn swap_nodes(&mut self, first: NodePtr<K, V>, second: NodePtr<K, V>) {
        if first == second {
            return;
        }
        unsafe {
            // If one node is the parent of the other, it is the upper one
            let (mut upper, mut lower) = if first.as_ref().parent == Some(second) {
                (second, first)
            } else {
                (first, second)
            };

            let upper_parent = upper.as_ref().parent;
            let upper_left = upper.as_ref().left;
            let upper_right = upper.as_ref().right;
            let lower_parent = lower.as_ref().parent;
            let lower_left = lower.as_ref().left;
            let lower_right = lower.as_ref().right;
            let upper_is_left = match upper_parent {
                Some(parent_ptr) => parent_ptr.as_ref().left == Some(upper),
                None => false,
            };
            let lower_is_left = match lower_parent {
                Some(parent_ptr) => parent_ptr.as_ref().left == Some(lower),
                None => false,
            };

            if lower_parent == Some(upper) {
                // Upper becomes the child of lower on the same side
                upper.as_mut().parent = Some(lower);
                if upper_left == Some(lower) {
                    lower.as_mut().left = Some(upper);
                    lower.as_mut().right = upper_right;
                } else {
                    lower.as_mut().left = upper_left;
                    lower.as_mut().right = Some(upper);
                }
            } else {
                upper.as_mut().parent = lower_parent;
                lower.as_mut().left = upper_left;
                lower.as_mut().right = upper_right;
                if let Some(mut parent_ptr) = lower_parent {
                    if lower_is_left {
                        parent_ptr.as_mut().left = Some(upper);
                    } else {
                        parent_ptr.as_mut().right = Some(upper);
                    }
                }
            }
            lower.as_mut().parent = upper_parent;
            upper.as_mut().left = lower_left;
            upper.as_mut().right = lower_right;

            match upper_parent {
                None => self.root = Some(lower),
                Some(mut parent_ptr) => {
                    if upper_is_left {
                        parent_ptr.as_mut().left = Some(lower);
                    } else {
                        parent_ptr.as_mut().right = Some(lower);
                    }
                }
            }

            for mut child_ptr in [lower.as_ref().left, lower.as_ref().right].into_iter().flatten() {
                child_ptr.as_mut().parent = Some(lower);
            }
            for mut child_ptr in [upper.as_ref().left, upper.as_ref().right].into_iter().flatten() {
                child_ptr.as_mut().parent = Some(upper);
            }

            let balance = upper.as_ref().balance;
            upper.as_mut().balance = lower.as_ref().balance;
            lower.as_mut().balance = balance;
        }
    }

    /// Updates balance factors from a freshly attached leaf up to the root.
    /// Stops at the first ancestor whose height did not change, or after the
    /// first rotation, which is enough to restore balance after a single insert.
    fn retrace_insert(&mut self, node_ptr: NodePtr<K, V>) {
        let mut child = node_ptr;
        let mut current = unsafe { node_ptr.as_ref().parent };
        while let Some(mut ancestor_ptr) = current {
            unsafe {
                if ancestor_ptr.as_ref().left == Some(child) {
                    ancestor_ptr.as_mut().balance -= 1;
                } else {
                    ancestor_ptr.as_mut().balance += 1;
                }
                match ancestor_ptr.as_ref().balance {
                    0 => break,
                    -2 | 2 => {
                        self.rebalance(ancestor_ptr);
                        break;
                    }
                    _ => {}
                }
                child = ancestor_ptr;
                current = ancestor_ptr.as_ref().parent;
            }
        }
    }

    /// Updates balance factors after a subtree below `start` got shorter.
    /// `diff` is +1 if the left subtree shrank and -1 if the right one did.
    /// Unlike insertion, this may rotate at several levels.
    fn retrace_remove(&mut self, start: NodePtr<K, V>, diff: i8) {
        let mut current = start;
        let mut diff = diff;
        loop {
            let subtree_root = unsafe {
                current.as_mut().balance += diff;
                match current.as_ref().balance {
                    // Was 0 before, height unchanged
                    -1 | 1 => break,
                    0 => current,
                    _ => {
                        let new_root = self.rebalance(current);
                        // Single rotation over a balanced child keeps the height
                        if new_root.as_ref().balance != 0 {
                            break;
                        }
                        new_root
                    }
                }
            };

            // Subtree rooted at subtree_root is one level shorter
            match unsafe { subtree_root.as_ref().parent } {
                None => break,
                Some(parent_ptr) => {
                    diff = if unsafe { parent_ptr.as_ref().left } == Some(subtree_root) {
                        1
                    } else {
                        -1
                    };
                    current = parent_ptr;
                }
            }
        }
    }

    /// Restores the AVL condition at a node with balance -2 or +2.
    /// Returns the root of the rotated subtree.
    fn rebalance(&mut self, node_ptr: NodePtr<K, V>) -> NodePtr<K, V> {
        unsafe {
            let balance = node_ptr.as_ref().balance;
            debug_assert!(balance == -2 || balance == 2);
            log::trace!("rebalance node with balance {}", balance);
            match balance {
                -2 => {
                    // Left-heavy; zig-zag if the left child leans right
                    if let Some(left_ptr) = node_ptr.as_ref().left {
                        if left_ptr.as_ref().balance > 0 {
                            self.rotate_left(left_ptr);
                        }
                    }
                    self.rotate_right(node_ptr)
                }
                2 => {
                    // Right-heavy; zig-zag if the right child leans left
                    if let Some(right_ptr) = node_ptr.as_ref().right {
                        if right_ptr.as_ref().balance < 0 {
                            self.rotate_right(right_ptr);
                        }
                    }
                    self.rotate_left(node_ptr)
                }
                _ => node_ptr,
            }
        }
    }

    /// Promotes the right child into the node's position.
    /// Only the balances of the two nodes involved change, and they are
    /// derived from their previous values.
    fn rotate_left(&mut self, mut node_ptr: NodePtr<K, V>) -> NodePtr<K, V> {
        unsafe {
            if let Some(mut right_ptr) = node_ptr.as_ref().right {
                node_ptr.as_mut().right = right_ptr.as_ref().left;
                if let Some(mut right_left_ptr) = right_ptr.as_mut().left {
                    right_left_ptr.as_mut().parent = Some(node_ptr);
                }

                right_ptr.as_mut().parent = node_ptr.as_ref().parent;
                match node_ptr.as_ref().parent {
                    None => self.root = Some(right_ptr),
                    Some(mut parent_ptr) => {
                        if parent_ptr.as_ref().left == Some(node_ptr) {
                            parent_ptr.as_mut().left = Some(right_ptr);
                        } else {
                            parent_ptr.as_mut().right = Some(right_ptr);
                        }
                    }
                }

                right_ptr.as_mut().left = Some(node_ptr);
                node_ptr.as_mut().parent = Some(right_ptr);

                let node_balance = node_ptr.as_ref().balance - 1 - cmp::max(right_ptr.as_ref().balance, 0);
                node_ptr.as_mut().balance = node_balance;
                right_ptr.as_mut().balance += cmp::min(node_balance, 0) - 1;
                log::trace!(
                    "rotate left, balances now {} and {}",
                    right_ptr.as_ref().balance,
                    node_balance
                );
                return right_ptr;
            }
            node_ptr
        }
    }

    /// Promotes the left child into the node's position.
    fn rotate_right(&mut self, mut node_ptr: NodePtr<K, V>) -> NodePtr<K, V> {
        unsafe {
            if let Some(mut left_ptr) = node_ptr.as_ref().left {
                node_ptr.as_mut().left = left_ptr.as_ref().right;
                if let Some(mut left_right_ptr) = left_ptr.as_ref().right {
                    left_right_ptr.as_mut().parent = Some(node_ptr);
                }

                left_ptr.as_mut().parent = node_ptr.as_ref().parent;
                match node_ptr.as_ref().parent {
                    None => self.root = Some(left_ptr),
                    Some(mut parent_ptr) => {
                        if parent_ptr.as_ref().left == Some(node_ptr) {
                            parent_ptr.as_mut().left = Some(left_ptr);
                        } else {
                            parent_ptr.as_mut().right = Some(left_ptr);
                        }
                    }
                }

                left_ptr.as_mut().right = Some(node_ptr);
                node_ptr.as_mut().parent = Some(left_ptr);

                let node_balance = node_ptr.as_ref().balance + 1 - cmp::min(left_ptr.as_ref().balance, 0);
                node_ptr.as_mut().balance = node_balance;
                left_ptr.as_mut().balance += cmp::max(node_balance, 0) + 1;
                log::trace!(
                    "rotate right, balances now {} and {}",
                    left_ptr.as_ref().balance,
                    node_balance
                );
                return left_ptr;
            }
            node_ptr
        }
    }

    fn subtree_height(link: Link<K, V>) -> usize {
        match link {
            None => 0,
            Some(node_ptr) => unsafe {
                1 + cmp::max(
                    Self::subtree_height(node_ptr.as_ref().left),
                    Self::subtree_height(node_ptr.as_ref().right),
                )
            },
        }
    }

    // Height of the subtree, or None if any node in it violates the AVL condition.
    fn balanced_height(link: Link<K, V>) -> Option<usize> {
        match link {
            None => Some(0),
            Some(node_ptr) => {
                let (left, right) = unsafe { (node_ptr.as_ref().left, node_ptr.as_ref().right) };
                let left_height = Self::balanced_height(left)?;
                let right_height = Self::balanced_height(right)?;
                if left_height.abs_diff(right_height) > 1 {
                    return None;
                }
                Some(1 + cmp::max(left_height, right_height))
            }
        }
    }

    fn preorder<F: FnMut(NodePtr<K, V>)>(&self, f: F) {
        self.traverse(f, |_| {}, |_| {});
    }

    fn inorder<F: FnMut(NodePtr<K, V>)>(&self, f: F) {
        self.traverse(|_| {}, f, |_| {});
    }

    fn postorder<F: FnMut(NodePtr<K, V>)>(&self, f: F) {
        self.traverse(|_| {}, |_| {}, f);
    }

    fn traverse<Pre, In, Post>(&self, mut preorder: Pre, mut inorder: In, mut postorder: Post)
    where
        Pre: FnMut(NodePtr<K, V>),
        In: FnMut(NodePtr<K, V>),
        Post: FnMut(NodePtr<K, V>),
    {
        if let Some(mut node_ptr) = self.root {
            let mut dir = Direction::FromParent;
            loop {
                match dir {
                    Direction::FromParent => {
                        preorder(node_ptr);
                        if let Some(left_ptr) = unsafe { node_ptr.as_ref().left } {
                            node_ptr = left_ptr;
                        } else {
                            dir = Direction::FromLeft;
                        }
                    }
                    Direction::FromLeft => {
                        inorder(node_ptr);
                        if let Some(right_ptr) = unsafe { node_ptr.as_ref().right } {
                            node_ptr = right_ptr;
                            dir = Direction::FromParent;
                        } else {
                            dir = Direction::FromRight;
                        }
                    }
                    Direction::FromRight => {
                        // Post order traversal is used for node deletion,
                        // so make sure not to use node pointer after postorder call.
                        if let Some(parent_ptr) = unsafe { node_ptr.as_ref().parent } {
                            if Some(node_ptr) == unsafe { parent_ptr.as_ref().left } {
                                dir = Direction::FromLeft;
                            } else {
                                dir = Direction::FromRight;
                            }
                            postorder(node_ptr);
                            node_ptr = parent_ptr;
                        } else {
                            postorder(node_ptr);
                            break;
                        }
                    }
                }
            }
        }
    }
}

impl<K: Ord, V> Drop for AvlTreeMap<K, V> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<K: Ord, V> Default for AvlTreeMap<K, V> {
    /// Creates an empty map.
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord + fmt::Debug, V: fmt::Debug> fmt::Debug for AvlTreeMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut map = f.debug_map();
        self.traverse_in_order(|key, value| {
            map.entry(key, value);
        });
        map.finish()
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for AvlTreeMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<K: Ord, V> Extend<(K, V)> for AvlTreeMap<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        iter.into_iter().for_each(move |(key, value)| {
            self.insert(key, value);
        });
    }
}

impl<K, V> Node<K, V> {
    fn create(parent: Link<K, V>, key: K, value: V) -> NodePtr<K, V> {
        let boxed = Box::new(Node {
            key,
            value,
            parent,
            left: None,
            right: None,
            balance: 0,
        });
        NodePtr::from(Box::leak(boxed))
    }

    unsafe fn unbox(node_ptr: NodePtr<K, V>) -> Box<Node<K, V>> {
        Box::from_raw(node_ptr.as_ptr())
    }

    unsafe fn destroy(node_ptr: NodePtr<K, V>) {
        drop(Self::unbox(node_ptr));
    }
}

//! A plain mutable BST. Operations modify the tree in place through
//! `&mut self` and report absence with `Option` rather than panicking.
//!
//! Duplicate keys are allowed: an inserted key equal to an existing one is
//! routed to the right subtree, so repeated inserts of the same key form a
//! right-leaning chain and [`remove`][Tree::remove] deletes one occurrence
//! per call.
//!
//! # Examples
//!
//! ```
//! use simple_bst::tree::Tree;
//!
//! let mut tree = Tree::new();
//!
//! // Nothing in here yet.
//! assert_eq!(tree.find(&1), None);
//!
//! // `insert` returns `&mut Self` so calls can be chained.
//! tree.insert(2).insert(1).insert(3);
//! assert_eq!(tree.find(&1), Some(&1));
//!
//! // In-order traversal yields the keys in ascending order.
//! assert_eq!(tree.in_order(), vec![1, 2, 3]);
//!
//! // Removing a node returns its key.
//! assert_eq!(tree.remove(&1), Some(1));
//! assert_eq!(tree.remove(&1), None);
//! assert_eq!(tree.find(&1), None);
//! ```

use std::cmp::Ordering;
use std::collections::VecDeque;
use std::mem;

/// A `Node` has a key that is used for searching/sorting and owns its two
/// optional children. A node is created only by insertion and destroyed only
/// by removal (or when the whole tree is dropped).
#[derive(Debug, Clone)]
struct Node<K> {
    key: K,
    left: Option<Box<Node<K>>>,
    right: Option<Box<Node<K>>>,
}

impl<K> Node<K> {
    fn new(key: K) -> Self {
        Self {
            key,
            left: None,
            right: None,
        }
    }
}

/// An unbalanced Binary Search Tree. This can be used for inserting,
/// finding, traversing, and deleting keys.
///
/// References returned by [`find`][Tree::find] and
/// [`find_second_highest`][Tree::find_second_highest] are read-only
/// snapshots borrowed from the tree; the borrow checker prevents them from
/// outliving a subsequent mutation, and they expose no way to alter a key
/// in place.
#[derive(Debug, Clone)]
pub struct Tree<K> {
    root: Option<Box<Node<K>>>,
}

impl<K> Default for Tree<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> Tree<K> {
    /// Generates a new, empty `Tree`.
    pub fn new() -> Self {
        Self { root: None }
    }

    /// Returns `true` if the tree contains no nodes.
    ///
    /// # Examples
    ///
    /// ```
    /// use simple_bst::tree::Tree;
    ///
    /// let mut tree = Tree::new();
    /// assert!(tree.is_empty());
    ///
    /// tree.insert(1);
    /// assert!(!tree.is_empty());
    /// ```
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Inserts the given key into the tree as a new leaf and returns
    /// `&mut Self` so that calls can be chained. Keys less than a visited
    /// node descend left; keys greater than or equal descend right, so
    /// duplicates are kept and accumulate in the right subtree.
    ///
    /// Descends iteratively, so insertion uses `O(height)` time and `O(1)`
    /// auxiliary space. Never fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use simple_bst::tree::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(2).insert(1).insert(2);
    ///
    /// // Both copies of 2 are kept.
    /// assert_eq!(tree.in_order(), vec![1, 2, 2]);
    /// ```
    pub fn insert(&mut self, key: K) -> &mut Self
    where
        K: Ord,
    {
        let mut slot = &mut self.root;
        while let Some(node) = slot {
            slot = match key.cmp(&node.key) {
                Ordering::Less => &mut node.left,
                Ordering::Equal | Ordering::Greater => &mut node.right,
            };
        }
        *slot = Some(Box::new(Node::new(key)));
        self
    }

    /// Potentially finds the given key in this tree, returning a reference
    /// to the stored copy. If no node has the corresponding key, `None` is
    /// returned — absence is a normal outcome, not an error.
    ///
    /// # Examples
    ///
    /// ```
    /// use simple_bst::tree::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(1);
    ///
    /// assert_eq!(tree.find(&1), Some(&1));
    /// assert_eq!(tree.find(&42), None);
    /// ```
    pub fn find(&self, key: &K) -> Option<&K>
    where
        K: Ord,
    {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            match key.cmp(&node.key) {
                Ordering::Less => current = node.left.as_deref(),
                Ordering::Equal => return Some(&node.key),
                Ordering::Greater => current = node.right.as_deref(),
            }
        }
        None
    }

    /// Visits every node depth-first, emitting each node's key before
    /// either of its children, and returns the keys in visit order.
    ///
    /// # Examples
    ///
    /// ```
    /// use simple_bst::tree::Tree;
    ///
    /// let mut tree = Tree::new();
    /// for x in [5, 3, 8, 1, 4, 7, 9] {
    ///     tree.insert(x);
    /// }
    ///
    /// assert_eq!(tree.pre_order(), vec![5, 3, 1, 4, 8, 7, 9]);
    /// ```
    pub fn pre_order(&self) -> Vec<K>
    where
        K: Clone,
    {
        let mut keys = Vec::new();
        pre_order(self.root.as_deref(), &mut keys);
        keys
    }

    /// Visits every node depth-first, emitting each node's key between its
    /// left and right children, and returns the keys in visit order. By the
    /// BST invariant this is ascending sorted order (non-decreasing when
    /// duplicates are present).
    ///
    /// # Examples
    ///
    /// ```
    /// use simple_bst::tree::Tree;
    ///
    /// let mut tree = Tree::new();
    /// for x in [5, 3, 8, 1, 4, 7, 9] {
    ///     tree.insert(x);
    /// }
    ///
    /// assert_eq!(tree.in_order(), vec![1, 3, 4, 5, 7, 8, 9]);
    /// ```
    pub fn in_order(&self) -> Vec<K>
    where
        K: Clone,
    {
        let mut keys = Vec::new();
        in_order(self.root.as_deref(), &mut keys);
        keys
    }

    /// Visits every node depth-first, emitting each node's key after both
    /// of its children, and returns the keys in visit order.
    ///
    /// # Examples
    ///
    /// ```
    /// use simple_bst::tree::Tree;
    ///
    /// let mut tree = Tree::new();
    /// for x in [5, 3, 8, 1, 4, 7, 9] {
    ///     tree.insert(x);
    /// }
    ///
    /// assert_eq!(tree.post_order(), vec![1, 4, 3, 7, 9, 8, 5]);
    /// ```
    pub fn post_order(&self) -> Vec<K>
    where
        K: Clone,
    {
        let mut keys = Vec::new();
        post_order(self.root.as_deref(), &mut keys);
        keys
    }

    /// Visits every node breadth-first (level by level, left to right) and
    /// returns the keys in visit order. Uses an explicit FIFO queue, so the
    /// auxiliary space is `O(width)` rather than `O(height)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use simple_bst::tree::Tree;
    ///
    /// let mut tree = Tree::new();
    /// for x in [5, 3, 8, 1, 4, 7, 9] {
    ///     tree.insert(x);
    /// }
    ///
    /// assert_eq!(tree.bfs(), vec![5, 3, 8, 1, 4, 7, 9]);
    /// ```
    pub fn bfs(&self) -> Vec<K>
    where
        K: Clone,
    {
        let mut keys = Vec::new();
        let mut queue = VecDeque::new();
        if let Some(root) = self.root.as_deref() {
            queue.push_back(root);
        }
        while let Some(node) = queue.pop_front() {
            keys.push(node.key.clone());
            if let Some(left) = node.left.as_deref() {
                queue.push_back(left);
            }
            if let Some(right) = node.right.as_deref() {
                queue.push_back(right);
            }
        }
        keys
    }

    /// Deletes one node containing the given key from the tree and returns
    /// the removed node's original key, or `None` if no node has the key
    /// (in which case the tree is unchanged). The BST invariant is
    /// preserved across every removal case:
    ///
    /// - a leaf is dropped outright,
    /// - a node with one child is replaced by that child,
    /// - a node with two children takes on the key of its in-order
    ///   successor (the leftmost node of its right subtree), and the
    ///   successor's node is unlinked instead.
    ///
    /// # Examples
    ///
    /// ```
    /// use simple_bst::tree::Tree;
    ///
    /// let mut tree = Tree::new();
    /// for x in [5, 3, 8, 1, 4, 7, 9] {
    ///     tree.insert(x);
    /// }
    ///
    /// // 3 has two children; its successor 4 takes its place.
    /// assert_eq!(tree.remove(&3), Some(3));
    /// assert_eq!(tree.in_order(), vec![1, 4, 5, 7, 8, 9]);
    ///
    /// // Removing an absent key is a no-op.
    /// assert_eq!(tree.remove(&100), None);
    /// assert_eq!(tree.in_order(), vec![1, 4, 5, 7, 8, 9]);
    /// ```
    pub fn remove(&mut self, key: &K) -> Option<K>
    where
        K: Ord,
    {
        let (root, removed) = remove(self.root.take(), key);
        self.root = root;
        removed
    }

    /// Returns `true` if for every node the heights of its left and right
    /// subtrees differ by at most one. The empty tree is balanced.
    ///
    /// Computed in one post-order pass: each subtree reports its height
    /// upward, or short-circuits as soon as any imbalance is seen, so no
    /// subtree's height is ever computed twice.
    ///
    /// # Examples
    ///
    /// ```
    /// use simple_bst::tree::Tree;
    ///
    /// let mut tree = Tree::new();
    /// for x in [5, 3, 8, 1, 4, 7, 9] {
    ///     tree.insert(x);
    /// }
    /// assert!(tree.is_balanced());
    ///
    /// // Ascending inserts degenerate into a right-leaning chain.
    /// let mut chain = Tree::new();
    /// for x in [1, 2, 3, 4, 5] {
    ///     chain.insert(x);
    /// }
    /// assert!(!chain.is_balanced());
    /// ```
    pub fn is_balanced(&self) -> bool {
        balanced_height(self.root.as_deref()).is_some()
    }

    /// Finds the second-highest key in the tree, or `None` if the tree has
    /// fewer than two nodes.
    ///
    /// Walks the right spine to the maximum node. If that node has a left
    /// subtree, the answer is the largest key in it (the maximum's in-order
    /// predecessor); otherwise it is the key of the maximum's parent on the
    /// spine.
    ///
    /// # Examples
    ///
    /// ```
    /// use simple_bst::tree::Tree;
    ///
    /// let mut tree = Tree::new();
    /// for x in [5, 3, 8, 1, 4, 7, 9] {
    ///     tree.insert(x);
    /// }
    ///
    /// // 9 is the maximum and has no left subtree, so its parent 8 is next.
    /// assert_eq!(tree.find_second_highest(), Some(&8));
    ///
    /// let mut single = Tree::new();
    /// single.insert(1);
    /// assert_eq!(single.find_second_highest(), None);
    /// ```
    pub fn find_second_highest(&self) -> Option<&K> {
        let root = self.root.as_deref()?;
        if root.left.is_none() && root.right.is_none() {
            return None;
        }

        let mut parent = None;
        let mut current = root;
        while let Some(right) = current.right.as_deref() {
            parent = Some(current);
            current = right;
        }

        match current.left.as_deref() {
            Some(mut predecessor) => {
                while let Some(right) = predecessor.right.as_deref() {
                    predecessor = right;
                }
                Some(&predecessor.key)
            }
            None => parent.map(|p| &p.key),
        }
    }
}

fn pre_order<K: Clone>(node: Option<&Node<K>>, keys: &mut Vec<K>) {
    if let Some(node) = node {
        keys.push(node.key.clone());
        pre_order(node.left.as_deref(), keys);
        pre_order(node.right.as_deref(), keys);
    }
}

fn in_order<K: Clone>(node: Option<&Node<K>>, keys: &mut Vec<K>) {
    if let Some(node) = node {
        in_order(node.left.as_deref(), keys);
        keys.push(node.key.clone());
        in_order(node.right.as_deref(), keys);
    }
}

fn post_order<K: Clone>(node: Option<&Node<K>>, keys: &mut Vec<K>) {
    if let Some(node) = node {
        post_order(node.left.as_deref(), keys);
        post_order(node.right.as_deref(), keys);
        keys.push(node.key.clone());
    }
}

/// Removes one node holding `key` from the subtree rooted at `node`,
/// returning the (possibly replaced) subtree root and the removed node's
/// original key. Each level consumes its owned subtree and hands back the
/// rebuilt one, so relinking is just reassigning the returned root.
fn remove<K: Ord>(node: Option<Box<Node<K>>>, key: &K) -> (Option<Box<Node<K>>>, Option<K>) {
    let mut node = match node {
        Some(node) => node,
        // Reached an empty slot: the key isn't in the tree.
        None => return (None, None),
    };

    match key.cmp(&node.key) {
        Ordering::Less => {
            let (left, removed) = remove(node.left.take(), key);
            node.left = left;
            (Some(node), removed)
        }
        Ordering::Greater => {
            let (right, removed) = remove(node.right.take(), key);
            node.right = right;
            (Some(node), removed)
        }
        Ordering::Equal => match (node.left.take(), node.right.take()) {
            (None, None) => (None, Some(node.key)),
            (Some(child), None) | (None, Some(child)) => (Some(child), Some(node.key)),
            (left, Some(right)) => {
                // Two children: pull up the in-order successor's key and
                // unlink the successor's node. The successor has no left
                // child by construction, so unlinking it never recurses
                // back into this case.
                let (right, successor_key) = remove_leftmost(right);
                node.left = left;
                node.right = right;
                let removed = mem::replace(&mut node.key, successor_key);
                (Some(node), Some(removed))
            }
        },
    }
}

/// Unlinks the leftmost node of the subtree rooted at `node`, returning the
/// rebuilt subtree and the unlinked node's key.
fn remove_leftmost<K>(mut node: Box<Node<K>>) -> (Option<Box<Node<K>>>, K) {
    match node.left.take() {
        Some(left) => {
            let (left, key) = remove_leftmost(left);
            node.left = left;
            (Some(node), key)
        }
        None => (node.right.take(), node.key),
    }
}

/// Returns the height of the subtree rooted at `node` if every node in it
/// is height-balanced, or `None` as soon as any imbalance is found. The
/// empty subtree has height 0, a leaf height 1.
fn balanced_height<K>(node: Option<&Node<K>>) -> Option<usize> {
    let node = match node {
        Some(node) => node,
        None => return Some(0),
    };

    let left = balanced_height(node.left.as_deref())?;
    let right = balanced_height(node.right.as_deref())?;
    if left.max(right) - left.min(right) > 1 {
        None
    } else {
        Some(left.max(right) + 1)
    }
}

//! A mutable Binary Search Tree over values with explicit rebalancing.
//!
//! The tree is built once from a sorted sequence (see [`Tree::from_sorted`])
//! and then mutated in place. `insert` and `delete` do **not** rebalance;
//! after a run of mutations the tree can be arbitrarily lopsided until the
//! caller invokes [`Tree::rebalance`], which rebuilds the whole node graph
//! to minimal height.
//!
//! # Examples
//!
//! ```
//! use rebalance_bst::tree::Tree;
//!
//! let mut tree = Tree::from_sorted(vec![1, 2, 3, 4, 5, 6, 7]);
//! assert_eq!(tree.inorder(), vec![1, 2, 3, 4, 5, 6, 7]);
//!
//! // A run of ascending inserts degenerates into a list ...
//! for x in 8..=15 {
//!     tree.insert(x);
//! }
//! assert!(!tree.is_balanced());
//!
//! // ... until the caller asks for a rebuild.
//! tree.rebalance();
//! assert!(tree.is_balanced());
//! assert_eq!(tree.height(), 3);
//! ```

use std::cmp::Ordering;
use std::collections::VecDeque;
use std::fmt;
use std::mem;

/// An ownership edge: each child slot either owns one node or is empty.
type Link<T> = Option<Box<Node<T>>>;

/// A `Node` stores one value and owns up to two children. All values in the
/// left subtree are less than this node's value; the right subtree holds the
/// rest. Nodes carry no parent pointer.
pub struct Node<T> {
    data: T,
    left: Link<T>,
    right: Link<T>,
}

impl<T: Clone> Clone for Node<T> {
    fn clone(&self) -> Self {
        Self {
            data: self.data.clone(),
            left: self.left.clone(),
            right: self.right.clone(),
        }
    }
}

impl<T> Node<T> {
    fn new(data: T) -> Self {
        Self {
            data,
            left: None,
            right: None,
        }
    }

    /// The value stored in this node.
    pub fn data(&self) -> &T {
        &self.data
    }

    /// This node's left child, if it has one.
    pub fn left(&self) -> Option<&Node<T>> {
        self.left.as_deref()
    }

    /// This node's right child, if it has one.
    pub fn right(&self) -> Option<&Node<T>> {
        self.right.as_deref()
    }

    /// The height of the subtree rooted at this node: the number of edges on
    /// the longest downward path. A leaf has height `0`; a missing child
    /// contributes `-1` so that the arithmetic works out.
    pub fn height(&self) -> isize {
        1 + link_height(&self.left).max(link_height(&self.right))
    }
}

impl<T: fmt::Debug> fmt::Debug for Node<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("data", &self.data)
            .field("left", &self.left())
            .field("right", &self.right())
            .finish()
    }
}

/// A Binary Search Tree that keeps whatever shape its mutations give it.
/// Balance is restored only on an explicit [`rebalance`][Tree::rebalance]
/// call, never as a side effect of `insert` or `delete`.
pub struct Tree<T> {
    root: Link<T>,
}

impl<T> Default for Tree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for Tree<T> {
    fn clone(&self) -> Self {
        Self {
            root: self.root.clone(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Tree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tree").field("root", &self.root()).finish()
    }
}

impl<T> Tree<T> {
    /// Generates a new, empty `Tree`.
    pub fn new() -> Self {
        Self { root: None }
    }

    /// Builds a minimal-height tree from values that are already sorted
    /// ascending and free of duplicates. The middle element (lower middle
    /// for even lengths) becomes the root and each half is built the same
    /// way. An empty input yields an empty tree.
    ///
    /// The caller is responsible for the sorted-unique precondition; it is
    /// not checked, and an input violating it produces a tree that breaks
    /// the search-order invariant.
    ///
    /// # Examples
    ///
    /// ```
    /// use rebalance_bst::tree::Tree;
    ///
    /// let tree = Tree::from_sorted(vec![1, 2, 3, 4, 5, 6, 7]);
    ///
    /// assert_eq!(tree.root().map(|n| *n.data()), Some(4));
    /// assert_eq!(tree.preorder(), vec![4, 2, 1, 3, 6, 5, 7]);
    /// ```
    pub fn from_sorted(values: Vec<T>) -> Self {
        let len = values.len();
        let mut values = values.into_iter();
        Self {
            root: build_sorted(&mut values, len),
        }
    }

    /// The root node, if the tree is non-empty.
    pub fn root(&self) -> Option<&Node<T>> {
        self.root.as_deref()
    }

    /// Whether the tree holds no values at all.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Inserts a value, descending left on strictly-less and right
    /// otherwise. Because the tie goes right, inserting a value that is
    /// already present is accepted and the duplicate ends up in the right
    /// subtree of its twin. No rebalancing happens.
    ///
    /// # Examples
    ///
    /// ```
    /// use rebalance_bst::tree::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(10);
    ///
    /// assert_eq!(tree.root().map(|n| *n.data()), Some(10));
    /// assert_eq!(tree.height(), 0);
    /// ```
    pub fn insert(&mut self, value: T)
    where
        T: Ord,
    {
        self.root = insert_link(self.root.take(), value);
    }

    /// Removes the first node found with the given value, reattaching its
    /// children so the search order holds. Deleting a value that is not in
    /// the tree is a silent no-op.
    ///
    /// A node with two children keeps its place in the graph: it takes over
    /// the value of its in-order successor (the leftmost node of its right
    /// subtree) and the displaced value is deleted out of the right subtree,
    /// so exactly one node leaves the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use rebalance_bst::tree::Tree;
    ///
    /// let mut tree = Tree::from_sorted(vec![1, 2, 3, 4, 5, 6, 7]);
    /// tree.delete(&4);
    ///
    /// // The root took its successor's value.
    /// assert_eq!(tree.root().map(|n| *n.data()), Some(5));
    /// assert_eq!(tree.inorder(), vec![1, 2, 3, 5, 6, 7]);
    /// ```
    pub fn delete(&mut self, value: &T)
    where
        T: Ord,
    {
        self.root = delete_link(self.root.take(), value);
    }

    /// Finds the node holding the given value, or `None` if no node does.
    /// The returned reference is read-only; the tree's order invariant would
    /// not survive callers editing values in place.
    ///
    /// # Examples
    ///
    /// ```
    /// use rebalance_bst::tree::Tree;
    ///
    /// let tree = Tree::from_sorted(vec![1, 2, 3]);
    ///
    /// assert_eq!(tree.find(&3).map(|n| *n.data()), Some(3));
    /// assert!(tree.find(&42).is_none());
    /// ```
    pub fn find(&self, value: &T) -> Option<&Node<T>>
    where
        T: Ord,
    {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            current = match value.cmp(&node.data) {
                Ordering::Less => node.left.as_deref(),
                Ordering::Equal => return Some(node),
                Ordering::Greater => node.right.as_deref(),
            };
        }
        None
    }

    /// Counts the edges between the root and the given node, resolving the
    /// node by its value. Returns `None` when the value is not reachable in
    /// this tree (including a node borrowed from some other tree).
    ///
    /// With duplicates in the tree this reports the depth of the first node
    /// matching the value on the descent path, which is not necessarily the
    /// exact node that was passed in.
    pub fn depth(&self, node: &Node<T>) -> Option<usize>
    where
        T: Ord,
    {
        let mut current = self.root.as_deref();
        let mut edges = 0;
        while let Some(n) = current {
            current = match node.data.cmp(&n.data) {
                Ordering::Less => n.left.as_deref(),
                Ordering::Equal => return Some(edges),
                Ordering::Greater => n.right.as_deref(),
            };
            edges += 1;
        }
        None
    }

    /// The height of the whole tree: `-1` when empty, `0` for a single
    /// node, and so on. See [`Node::height`] for subtree heights.
    pub fn height(&self) -> isize {
        link_height(&self.root)
    }

    /// Whether the heights of the root's two subtrees differ by at most
    /// one. This check is deliberately shallow: it inspects only the top
    /// split, so a tree can pass while holding wildly unbalanced subtrees
    /// further down. An empty tree is balanced.
    pub fn is_balanced(&self) -> bool {
        match &self.root {
            None => true,
            Some(node) => (link_height(&node.left) - link_height(&node.right)).abs() <= 1,
        }
    }

    /// Rebuilds the tree to minimal height. The current values are drained
    /// in sorted order (in-order over a valid tree is ascending) and the
    /// construction from [`from_sorted`][Tree::from_sorted] runs over them;
    /// the old node graph is dropped wholesale. No rotations are involved.
    pub fn rebalance(&mut self) {
        let mut values = Vec::new();
        drain_sorted(self.root.take(), &mut values);
        let len = values.len();
        let mut values = values.into_iter();
        self.root = build_sorted(&mut values, len);
    }

    /// The values in ascending order: left subtree, node, right subtree.
    ///
    /// # Examples
    ///
    /// ```
    /// use rebalance_bst::tree::Tree;
    ///
    /// let mut tree = Tree::new();
    /// for x in [5, 3, 8, 1] {
    ///     tree.insert(x);
    /// }
    /// assert_eq!(tree.inorder(), vec![1, 3, 5, 8]);
    /// ```
    pub fn inorder(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.inorder_with(|node| node.data.clone())
    }

    /// In-order traversal with a per-node transform in place of the default
    /// value extraction.
    pub fn inorder_with<'a, U, F>(&'a self, mut visit: F) -> Vec<U>
    where
        F: FnMut(&'a Node<T>) -> U,
    {
        let mut out = Vec::new();
        inorder_link(&self.root, &mut visit, &mut out);
        out
    }

    /// The values in pre-order: node, left subtree, right subtree.
    pub fn preorder(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.preorder_with(|node| node.data.clone())
    }

    /// Pre-order traversal with a per-node transform.
    pub fn preorder_with<'a, U, F>(&'a self, mut visit: F) -> Vec<U>
    where
        F: FnMut(&'a Node<T>) -> U,
    {
        let mut out = Vec::new();
        preorder_link(&self.root, &mut visit, &mut out);
        out
    }

    /// The values in post-order: left subtree, right subtree, node.
    pub fn postorder(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.postorder_with(|node| node.data.clone())
    }

    /// Post-order traversal with a per-node transform.
    pub fn postorder_with<'a, U, F>(&'a self, mut visit: F) -> Vec<U>
    where
        F: FnMut(&'a Node<T>) -> U,
    {
        let mut out = Vec::new();
        postorder_link(&self.root, &mut visit, &mut out);
        out
    }

    /// The values level by level, left to right within a level. Returns
    /// `None` (rather than an empty `Vec`) when the tree is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use rebalance_bst::tree::Tree;
    ///
    /// let tree = Tree::from_sorted(vec![1, 2, 3, 4, 5, 6, 7]);
    /// assert_eq!(tree.level_order(), Some(vec![4, 2, 6, 1, 3, 5, 7]));
    ///
    /// assert_eq!(Tree::<i32>::new().level_order(), None);
    /// ```
    pub fn level_order(&self) -> Option<Vec<T>>
    where
        T: Clone,
    {
        self.level_order_with(|node| node.data.clone())
    }

    /// Breadth-first traversal with a per-node transform: a FIFO queue is
    /// seeded with the root and present children are enqueued left first.
    pub fn level_order_with<'a, U, F>(&'a self, mut visit: F) -> Option<Vec<U>>
    where
        F: FnMut(&'a Node<T>) -> U,
    {
        let root = self.root.as_deref()?;
        let mut out = Vec::new();
        let mut queue = VecDeque::new();
        queue.push_back(root);
        while let Some(node) = queue.pop_front() {
            out.push(visit(node));
            if let Some(left) = node.left.as_deref() {
                queue.push_back(left);
            }
            if let Some(right) = node.right.as_deref() {
                queue.push_back(right);
            }
        }
        Some(out)
    }

    /// Iterates over the values in ascending order without materializing
    /// them.
    ///
    /// # Examples
    ///
    /// ```
    /// use rebalance_bst::tree::Tree;
    ///
    /// let tree = Tree::from_sorted(vec![1, 2, 3]);
    /// assert!(tree.iter().copied().eq(1..=3));
    /// ```
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            stack: Vec::new(),
            current: self.root.as_deref(),
        }
    }
}

impl<'a, T> IntoIterator for &'a Tree<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An in-order iterator over a [`Tree`], yielding references to the values
/// in ascending order. Created by [`Tree::iter`].
pub struct Iter<'a, T> {
    stack: Vec<&'a Node<T>>,
    current: Option<&'a Node<T>>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.current {
            self.stack.push(node);
            self.current = node.left.as_deref();
        }
        let node = self.stack.pop()?;
        self.current = node.right.as_deref();
        Some(&node.data)
    }
}

/// Renders the tree sideways with box-drawing characters, the right subtree
/// above its parent and the left below. Purely diagnostic output.
impl<T: fmt::Display> fmt::Display for Tree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.root {
            None => Ok(()),
            Some(node) => fmt_node(node, f, "", true),
        }
    }
}

fn fmt_node<T: fmt::Display>(
    node: &Node<T>,
    f: &mut fmt::Formatter<'_>,
    prefix: &str,
    is_left: bool,
) -> fmt::Result {
    if let Some(right) = node.right.as_deref() {
        let deeper = format!("{}{}", prefix, if is_left { "│   " } else { "    " });
        fmt_node(right, f, &deeper, false)?;
    }
    writeln!(
        f,
        "{}{}{}",
        prefix,
        if is_left { "└── " } else { "┌── " },
        node.data
    )?;
    if let Some(left) = node.left.as_deref() {
        let deeper = format!("{}{}", prefix, if is_left { "    " } else { "│   " });
        fmt_node(left, f, &deeper, true)?;
    }
    Ok(())
}

fn link_height<T>(link: &Link<T>) -> isize {
    link.as_ref().map_or(-1, |node| node.height())
}

/// Consumes `len` values off the iterator, building the lower-middle one
/// into the subtree root. Visiting the values in order with the left
/// partition sized `(len - 1) / 2` yields the same shape as splitting a
/// slice at that index.
fn build_sorted<T, I>(values: &mut I, len: usize) -> Link<T>
where
    I: Iterator<Item = T>,
{
    if len == 0 {
        return None;
    }
    let left_len = (len - 1) / 2;
    let left = build_sorted(values, left_len);
    let data = values.next()?;
    let right = build_sorted(values, len - left_len - 1);
    Some(Box::new(Node { data, left, right }))
}

fn insert_link<T: Ord>(link: Link<T>, value: T) -> Link<T> {
    match link {
        None => Some(Box::new(Node::new(value))),
        Some(mut node) => {
            if value < node.data {
                node.left = insert_link(node.left.take(), value);
            } else {
                // Ties go right, so duplicate values are accepted.
                node.right = insert_link(node.right.take(), value);
            }
            Some(node)
        }
    }
}

fn delete_link<T: Ord>(link: Link<T>, value: &T) -> Link<T> {
    let mut node = link?;
    match value.cmp(&node.data) {
        Ordering::Less => node.left = delete_link(node.left.take(), value),
        Ordering::Greater => node.right = delete_link(node.right.take(), value),
        Ordering::Equal => {
            return match (node.left.take(), node.right.take()) {
                // At most one child: splice it into this node's slot.
                (None, right) => right,
                (left, None) => left,
                (left, Some(mut right)) => {
                    // Two children: this node keeps its identity but takes
                    // over its in-order successor's value. The displaced
                    // value sits at the leftmost node of the right subtree
                    // and gets deleted out of it, removing exactly one node.
                    swap_with_leftmost(&mut node.data, &mut right);
                    node.left = left;
                    node.right = delete_link(Some(right), value);
                    Some(node)
                }
            };
        }
    }
    Some(node)
}

/// Swaps `data` with the value of the leftmost node below `node`.
fn swap_with_leftmost<T>(data: &mut T, node: &mut Node<T>) {
    match node.left.as_deref_mut() {
        Some(left) => swap_with_leftmost(data, left),
        None => mem::swap(data, &mut node.data),
    }
}

/// Moves every value out of the subtree into `out`, smallest first.
fn drain_sorted<T>(link: Link<T>, out: &mut Vec<T>) {
    if let Some(node) = link {
        let Node { data, left, right } = *node;
        drain_sorted(left, out);
        out.push(data);
        drain_sorted(right, out);
    }
}

fn inorder_link<'a, T, U, F>(link: &'a Link<T>, visit: &mut F, out: &mut Vec<U>)
where
    F: FnMut(&'a Node<T>) -> U,
{
    if let Some(node) = link {
        inorder_link(&node.left, visit, out);
        out.push(visit(node));
        inorder_link(&node.right, visit, out);
    }
}

fn preorder_link<'a, T, U, F>(link: &'a Link<T>, visit: &mut F, out: &mut Vec<U>)
where
    F: FnMut(&'a Node<T>) -> U,
{
    if let Some(node) = link {
        out.push(visit(node));
        preorder_link(&node.left, visit, out);
        preorder_link(&node.right, visit, out);
    }
}

fn postorder_link<'a, T, U, F>(link: &'a Link<T>, visit: &mut F, out: &mut Vec<U>)
where
    F: FnMut(&'a Node<T>) -> U,
{
    if let Some(node) = link {
        postorder_link(&node.left, visit, out);
        postorder_link(&node.right, visit, out);
        out.push(visit(node));
    }
}

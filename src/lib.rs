//! This crate provides a Binary Search Tree (BST) that is balanced only
//! when asked to be.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and delete stored values. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` stores a value and
//! sometimes has child `Node`s. The most important invariants of a BST are:
//!
//! 1. For every `Node` in a BST, all the `Node`s in its left subtree have a
//!    value less than its own value.
//! 2. For every `Node` in a BST, all the `Node`s in its right subtree have a
//!    value greater than its own value.
//!
//! > Note that some `Node`s have no children. These `Node`s are called "leaf nodes".
//!
//! The benefits of these invariants are many. For instance, searching for
//! values in the tree takes `O(height)` (where `height` is defined as the
//! longest path from the root `Node` to a leaf `Node`). With clever
//! construction the height of a BST can be limited to `O(lg N)` where `N`
//! is the number of nodes in the tree. BSTs also naturally support sorted
//! iteration by visiting the left subtree, then the subtree root, then the
//! right subtree.
//!
//! ## Explicit rebalancing
//!
//! Unlike an AVL or red-black tree, the [`Tree`][tree::Tree] here performs
//! no rotations. It is built at minimal height from a sorted sequence, and
//! afterwards `insert` and `delete` leave the shape wherever the mutations
//! put it. The caller decides when a rebuild is worth the `O(N)` cost and
//! triggers it with [`rebalance`][tree::Tree::rebalance]; the (shallow)
//! [`is_balanced`][tree::Tree::is_balanced] predicate helps pick that
//! moment.

#![deny(missing_docs)]

pub mod tree;

pub use tree::{Iter, Node, Tree};

//! This crate exposes a plain (unbalanced) Binary Search Tree (BST)
//! mostly for educational purposes.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and delete stored records. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` will typically store
//! some sort of key and will sometimes have child `Node`s. The most
//! important invariants of a BST are:
//!
//! 1. For every `Node` in a BST, all the `Node`s in its left subtree have a
//!    key less than its own key.
//! 2. For every `Node` in a BST, all the `Node`s in its right subtree have a
//!    key greater than or equal to its own key (duplicate keys are routed
//!    to the right subtree).
//!
//! > Note that some `Node`s have no children. These `Node`s are called "leaf nodes".
//!
//! The benefits of these invariants are many. For instance, searching for
//! keys in the tree takes `O(height)` (where `height` is defined as the longest
//! path from the root `Node` to a leaf `Node`). BSTs also naturally support
//! sorted iteration by visiting the left subtree, then the subtree root, then
//! the right subtree.
//!
//! The tree here does no rebalancing, so `height` is `O(N)` in the worst
//! case (inserting keys in ascending order produces a right-leaning chain).
//! In exchange every operation is easy to follow, which is the point:
//! alongside insert/find/delete the tree exposes all three depth-first
//! traversal orders, breadth-first traversal, a height-balance check, and a
//! second-highest-key query.

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

pub mod tree;

pub use tree::Tree;

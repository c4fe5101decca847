//! # An AVL tree with parent links
//!
//! `balanced_tree` provides [`BalancedTree`], a sorted collection backed by a
//! self-balancing binary search tree.  Insertion, removal, lookup and
//! membership tests all run in `O(log n)`.  Equal elements are kept side by
//! side rather than merged, so the tree doubles as a sorted multiset.
//!
//! Nodes are kept in a slot arena and link to their children and parent by
//! index, so rotations never move ownership and dropping the tree frees each
//! node exactly once.  [`BalancedTree::check`] walks a tree and reports the
//! first broken invariant as an [`InvariantError`].
//!
//! Rotations and rebalancing decisions are reported at `trace` level through
//! the [`log`](https://docs.rs/log) facade.
//!
//! With the `serde` feature, a tree serializes as the sequence of its elements
//! in order.

mod avl;
pub use avl::{BalancedTree, Iter, NodeRef};

mod error;
pub use error::InvariantError;

#[cfg(feature = "serde")]
mod serde_seq;

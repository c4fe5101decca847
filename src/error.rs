//! # Invariant errors.
//!
//! An `InvariantError` is returned by [`BalancedTree::check`] when the tree's
//! internal structure is inconsistent.  Operations on the tree never fail; a
//! violation found here is a bug in the balancing code (or a non-total `Ord`
//! on the element type).
//!
//! Each variant names the arena slot of the offending node rather than its
//! value, so reporting does not require `T: Debug`.
//!
//! [`BalancedTree::check`]: crate::BalancedTree::check

use thiserror::Error;

/// The first invariant violation found while walking a tree.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvariantError {
    #[error("node in slot {slot} sorts before its in-order predecessor")]
    OutOfOrder { slot: usize },
    #[error("node in slot {slot} caches child heights that disagree with its children")]
    StaleHeight { slot: usize },
    #[error("node in slot {slot} has balance factor {balance}")]
    Unbalanced { slot: usize, balance: i8 },
    #[error("node in slot {slot} has a parent link that does not point back to it")]
    BrokenParentLink { slot: usize },
    #[error("tree records {recorded} elements but {counted} are reachable")]
    LenMismatch { counted: usize, recorded: usize },
    #[error("arena holds {live} nodes but only {reachable} are reachable from the root")]
    LeakedSlots { live: usize, reachable: usize },
}

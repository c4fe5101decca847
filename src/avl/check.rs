use super::{BalancedTree, NodeId, OptId};
use crate::InvariantError;
use InvariantError::*;

impl<T: Ord> BalancedTree<T> {
    /// Walks the whole tree and verifies its structural invariants.
    ///
    /// The tree's own operations maintain these, so a violation means a
    /// bug, or an `Ord` implementation that is not a total order.  Checked:
    /// - elements are in non-decreasing order from left to right;
    /// - every node's cached subtree heights match its children;
    /// - every node's balance factor lies in `-1..=1`;
    /// - every child's parent link points back at its parent, and the root
    ///   has none;
    /// - the recorded length matches the number of reachable nodes, and no
    ///   stored node is unreachable.
    ///
    /// # Examples
    /// ```
    /// use balanced_tree::BalancedTree;
    ///
    /// let t: BalancedTree<_> = (0..100).collect();
    /// assert_eq!(t.check(), Ok(()));
    /// ```
    pub fn check(&self) -> Result<(), InvariantError> {
        if let Some(root) = self.root {
            if self.nodes[root].parent.is_some() {
                return Err(BrokenParentLink { slot: root.slot() });
            }
        }

        let mut walk = Walk {
            tree: self,
            prev: None,
            count: 0,
        };
        walk.subtree(self.root)?;

        if walk.count != self.len {
            return Err(LenMismatch {
                counted: walk.count,
                recorded: self.len,
            });
        }

        if self.nodes.len() != walk.count {
            return Err(LeakedSlots {
                live: self.nodes.len(),
                reachable: walk.count,
            });
        }

        Ok(())
    }
}

// in-order walk state
struct Walk<'a, T> {
    tree: &'a BalancedTree<T>,
    prev: Option<&'a T>,
    count: usize,
}

impl<'a, T: Ord> Walk<'a, T> {
    // Checks the subtree at id and returns its height.
    fn subtree(&mut self, id: OptId) -> Result<i8, InvariantError> {
        let Some(id) = id else {
            return Ok(0);
        };

        let tree = self.tree;
        let n = &tree.nodes[id];
        self.chk_parent_link(id, n.left)?;
        self.chk_parent_link(id, n.right)?;

        let left_ht = self.subtree(n.left)?;

        if self.prev.is_some_and(|p| n.value < *p) {
            return Err(OutOfOrder { slot: id.slot() });
        }
        self.prev = Some(&n.value);
        self.count += 1;

        let right_ht = self.subtree(n.right)?;

        if (left_ht, right_ht) != (n.left_ht, n.right_ht) {
            return Err(StaleHeight { slot: id.slot() });
        }

        if !n.is_bal() {
            return Err(Unbalanced {
                slot: id.slot(),
                balance: n.bal(),
            });
        }

        Ok(left_ht.max(right_ht) + 1)
    }

    fn chk_parent_link(
        &self,
        parent: NodeId,
        child: OptId,
    ) -> Result<(), InvariantError> {
        match child {
            Some(c) if self.tree.nodes[c].parent != Some(parent) => {
                Err(BrokenParentLink { slot: c.slot() })
            }
            _ => Ok(()),
        }
    }
}

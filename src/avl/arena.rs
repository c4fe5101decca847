//! Slot storage for tree nodes.
//!
//! Nodes refer to each other by [`NodeId`] rather than by pointer, so a
//! rotation only rewrites indices and never moves ownership around.  Vacated
//! slots go on a free list and are reused by later allocations.

use std::ops::{Index, IndexMut};

/// Index of an occupied slot in an [`Arena`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct NodeId(usize);

impl NodeId {
    pub(crate) fn slot(self) -> usize {
        self.0
    }
}

#[derive(Clone)]
pub(crate) struct Arena<N> {
    slots: Vec<Option<N>>,
    free: Vec<NodeId>,
}

impl<N> Arena<N> {
    pub(crate) fn new() -> Self {
        Arena {
            slots: Vec::new(),
            free: Vec::new(),
        }
    }

    /// Stores `node` in a vacant slot (or a new one) and returns its id.
    pub(crate) fn alloc(&mut self, node: N) -> NodeId {
        match self.free.pop() {
            Some(id) => {
                debug_assert!(self.slots[id.0].is_none());
                self.slots[id.0] = Some(node);
                id
            }

            None => {
                self.slots.push(Some(node));
                NodeId(self.slots.len() - 1)
            }
        }
    }

    /// Vacates the slot and hands back its node.
    ///
    /// Panics if the slot is already vacant.
    pub(crate) fn remove(&mut self, id: NodeId) -> N {
        match self.slots[id.0].take() {
            Some(n) => {
                self.free.push(id);
                n
            }
            None => panic!("arena slot {} is already vacant", id.0),
        }
    }

    /// Number of occupied slots.
    pub(crate) fn len(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    #[cfg(test)]
    pub(crate) fn slots(&self) -> usize {
        self.slots.len()
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
    }
}

impl<N> Index<NodeId> for Arena<N> {
    type Output = N;

    fn index(&self, id: NodeId) -> &N {
        match &self.slots[id.0] {
            Some(n) => n,
            None => panic!("arena slot {} is vacant", id.0),
        }
    }
}

impl<N> IndexMut<NodeId> for Arena<N> {
    fn index_mut(&mut self, id: NodeId) -> &mut N {
        match &mut self.slots[id.0] {
            Some(n) => n,
            None => panic!("arena slot {} is vacant", id.0),
        }
    }
}

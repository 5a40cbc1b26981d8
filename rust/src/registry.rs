//! Identifier registry mapping task IDs to arena indices.
//!
//! Every node of a graph, sentinels included, is registered exactly once, so a
//! duplicate ID is detected by a single hash lookup.

use rustc_hash::FxHashMap;

use crate::models::TaskId;

/// Index of a node in the graph arena (u32 for compact storage).
pub type NodeIndex = u32;

/// TaskId -> NodeIndex mapping. Indices are dense, assigned in registration
/// order and never reused; the arena owns the reverse direction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskIdRegistry {
    to_index: FxHashMap<TaskId, NodeIndex>,
}

impl TaskIdRegistry {
    /// Create a new registry with pre-allocated capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            to_index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    /// Register an ID, returning its new index, or `None` if it is already registered.
    pub fn register(&mut self, id: TaskId) -> Option<NodeIndex> {
        if self.to_index.contains_key(&id) {
            return None;
        }
        let index = self.to_index.len() as NodeIndex;
        self.to_index.insert(id, index);
        Some(index)
    }

    #[inline]
    pub fn get(&self, id: &TaskId) -> Option<NodeIndex> {
        self.to_index.get(id).copied()
    }

    #[inline]
    pub fn contains(&self, id: &TaskId) -> bool {
        self.to_index.contains_key(id)
    }
}

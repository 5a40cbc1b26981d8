//! Arena-backed directed graph over tasks.
//!
//! Nodes live in dense vectors addressed by [`NodeIndex`]; edges are adjacency
//! lists of indices in both directions. Nodes are never removed, so an index
//! stays valid for the lifetime of the graph and its clones.

use rustc_hash::FxHashMap;
use std::collections::VecDeque;
use std::sync::Arc;

use crate::models::{TaskDependencyId, TaskId, TaskNode};
use crate::registry::{NodeIndex, TaskIdRegistry};

/// A directed graph whose nodes carry a shared reference to their task.
///
/// Cloning copies the structure (registry, adjacency, edge ids) but shares the
/// immutable [`TaskNode`]s.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Digraph {
    registry: TaskIdRegistry,
    tasks: Vec<Arc<TaskNode>>,
    predecessors: Vec<Vec<NodeIndex>>,
    successors: Vec<Vec<NodeIndex>>,
    /// IDs of caller-supplied edges. Sentinel edges have none.
    edge_ids: FxHashMap<(NodeIndex, NodeIndex), TaskDependencyId>,
    edge_count: usize,
}

impl Digraph {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            registry: TaskIdRegistry::with_capacity(capacity),
            tasks: Vec::with_capacity(capacity),
            predecessors: Vec::with_capacity(capacity),
            successors: Vec::with_capacity(capacity),
            edge_ids: FxHashMap::default(),
            edge_count: 0,
        }
    }

    /// Add a node. Returns `None` (and changes nothing) if the ID is taken.
    pub fn add_node(&mut self, task: Arc<TaskNode>) -> Option<NodeIndex> {
        let index = self.registry.register(task.id)?;
        self.tasks.push(task);
        self.predecessors.push(Vec::new());
        self.successors.push(Vec::new());
        Some(index)
    }

    /// Add the edge `predecessor -> successor`. Returns false if it already existed.
    pub fn add_edge(
        &mut self,
        predecessor: NodeIndex,
        successor: NodeIndex,
        id: Option<TaskDependencyId>,
    ) -> bool {
        if self.has_edge(predecessor, successor) {
            return false;
        }
        self.successors[predecessor as usize].push(successor);
        self.predecessors[successor as usize].push(predecessor);
        if let Some(id) = id {
            self.edge_ids.insert((predecessor, successor), id);
        }
        self.edge_count += 1;
        true
    }

    /// Remove the edge `predecessor -> successor`. Returns false if it did not exist.
    pub fn remove_edge(&mut self, predecessor: NodeIndex, successor: NodeIndex) -> bool {
        if !self.has_edge(predecessor, successor) {
            return false;
        }
        self.successors[predecessor as usize].retain(|&s| s != successor);
        self.predecessors[successor as usize].retain(|&p| p != predecessor);
        self.edge_ids.remove(&(predecessor, successor));
        self.edge_count -= 1;
        true
    }

    #[inline]
    pub fn has_edge(&self, predecessor: NodeIndex, successor: NodeIndex) -> bool {
        self.successors
            .get(predecessor as usize)
            .is_some_and(|succs| succs.contains(&successor))
    }

    #[inline]
    pub fn index_of(&self, id: &TaskId) -> Option<NodeIndex> {
        self.registry.get(id)
    }

    #[inline]
    pub fn contains(&self, id: &TaskId) -> bool {
        self.registry.contains(id)
    }

    #[inline]
    pub fn id_of(&self, index: NodeIndex) -> TaskId {
        self.tasks[index as usize].id
    }

    #[inline]
    pub fn task(&self, index: NodeIndex) -> &Arc<TaskNode> {
        &self.tasks[index as usize]
    }

    #[inline]
    pub fn predecessors(&self, index: NodeIndex) -> &[NodeIndex] {
        &self.predecessors[index as usize]
    }

    #[inline]
    pub fn successors(&self, index: NodeIndex) -> &[NodeIndex] {
        &self.successors[index as usize]
    }

    pub fn edge_id(&self, predecessor: NodeIndex, successor: NodeIndex) -> Option<TaskDependencyId> {
        self.edge_ids.get(&(predecessor, successor)).copied()
    }

    pub fn node_count(&self) -> usize {
        self.tasks.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// All node indices in insertion order.
    pub fn node_indices(&self) -> impl Iterator<Item = NodeIndex> {
        0..self.tasks.len() as NodeIndex
    }

    /// All nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &Arc<TaskNode>> {
        self.tasks.iter()
    }

    /// All edges as `(predecessor, successor)` index pairs, grouped by predecessor.
    pub fn edges(&self) -> impl Iterator<Item = (NodeIndex, NodeIndex)> + '_ {
        self.successors
            .iter()
            .enumerate()
            .flat_map(|(p, succs)| succs.iter().map(move |&s| (p as NodeIndex, s)))
    }

    /// Topological order via Kahn's algorithm, or `None` if the graph has a cycle.
    ///
    /// Ties are broken by insertion order so the result is deterministic.
    pub fn topological_order(&self) -> Option<Vec<NodeIndex>> {
        let n = self.tasks.len();
        let mut in_degree: Vec<usize> = self.predecessors.iter().map(|p| p.len()).collect();

        let mut queue: VecDeque<NodeIndex> = self
            .node_indices()
            .filter(|&i| in_degree[i as usize] == 0)
            .collect();

        let mut result: Vec<NodeIndex> = Vec::with_capacity(n);

        while let Some(node) = queue.pop_front() {
            result.push(node);
            for &succ in &self.successors[node as usize] {
                let degree = &mut in_degree[succ as usize];
                *degree -= 1;
                if *degree == 0 {
                    queue.push_back(succ);
                }
            }
        }

        if result.len() != n {
            return None;
        }
        Some(result)
    }

    /// Nodes reachable from `from` following edges forward, `from` included.
    pub fn descendants(&self, from: NodeIndex) -> Vec<bool> {
        self.reachable(from, &self.successors)
    }

    /// Nodes from which `to` is reachable, `to` included.
    pub fn ancestors(&self, to: NodeIndex) -> Vec<bool> {
        self.reachable(to, &self.predecessors)
    }

    /// True if there is a directed path from `from` to `to` (a node reaches itself).
    pub fn has_path(&self, from: NodeIndex, to: NodeIndex) -> bool {
        if from == to {
            return true;
        }
        let mut visited = vec![false; self.tasks.len()];
        let mut queue: VecDeque<NodeIndex> = VecDeque::new();
        visited[from as usize] = true;
        queue.push_back(from);

        while let Some(node) = queue.pop_front() {
            for &succ in &self.successors[node as usize] {
                if succ == to {
                    return true;
                }
                if !visited[succ as usize] {
                    visited[succ as usize] = true;
                    queue.push_back(succ);
                }
            }
        }
        false
    }

    fn reachable(&self, origin: NodeIndex, adjacency: &[Vec<NodeIndex>]) -> Vec<bool> {
        let mut visited = vec![false; self.tasks.len()];
        let mut queue: VecDeque<NodeIndex> = VecDeque::new();
        visited[origin as usize] = true;
        queue.push_back(origin);

        while let Some(node) = queue.pop_front() {
            for &next in &adjacency[node as usize] {
                if !visited[next as usize] {
                    visited[next as usize] = true;
                    queue.push_back(next);
                }
            }
        }
        visited
    }
}

//! The task dependency graph engine.
//!
//! A [`TaskDependencyGraph`] is a DAG over task IDs plus two reserved sentinel
//! nodes (virtual start, virtual end). Every task without a predecessor hangs
//! off the virtual start, every task without a successor leads into the
//! virtual end. All queries are computed from the current graph state; nothing
//! is cached across mutations.
//!
//! - [`critical_path`] computes the duration-only critical path.
//! - [`schedule`] computes planned starting times honouring earliest starts.
//! - [`subgraph`] extracts the part of the graph between two milestones.

mod critical_path;
#[cfg(test)]
pub(crate) mod fixtures;
mod schedule;
mod subgraph;

pub use critical_path::DurationTiming;

use rustc_hash::FxHashMap;
use std::sync::Arc;

use crate::config::GraphConfig;
use crate::digraph::Digraph;
use crate::error::{Endpoint, GraphError};
use crate::models::{
    AddEdgeToGraphPreviewResponse, AddNodeToGraphPreviewResponse, TaskDependencyEdge, TaskId,
    TaskNode, Timestamp,
};
use crate::registry::NodeIndex;
use crate::{log_mutation, log_rejection};

/// Arena index of the virtual start node. It is always inserted first.
pub(crate) const START: NodeIndex = 0;
/// Arena index of the virtual end node. It is always inserted second.
pub(crate) const END: NodeIndex = 1;

/// Directed acyclic graph of tasks with sentinel wiring.
///
/// Invariants after every successful public call:
/// 1. the graph is acyclic
/// 2. every task without a real predecessor has exactly one edge from the virtual start
/// 3. every task without a real successor has exactly one edge to the virtual end
/// 4. the sentinels are only connected to each other when there are no tasks
/// 5. no task uses a sentinel ID
#[derive(Clone, Debug)]
pub struct TaskDependencyGraph {
    graph: Digraph,
    starting_time_of_run: Timestamp,
    config: GraphConfig,
}

impl TaskDependencyGraph {
    /// Build a graph from tasks, dependencies and the time the run starts.
    ///
    /// Fails if a task ID is used twice (or is a sentinel ID), if a dependency
    /// references an unknown task, or if the dependencies contain a cycle.
    pub fn new<T>(
        task_list: impl IntoIterator<Item = T>,
        dependency_list: impl IntoIterator<Item = TaskDependencyEdge>,
        starting_time_of_run: Timestamp,
    ) -> Result<Self, GraphError>
    where
        T: Into<Arc<TaskNode>>,
    {
        Self::with_config(
            task_list,
            dependency_list,
            starting_time_of_run,
            GraphConfig::default(),
        )
    }

    /// Same as [`TaskDependencyGraph::new`] with explicit configuration.
    pub fn with_config<T>(
        task_list: impl IntoIterator<Item = T>,
        dependency_list: impl IntoIterator<Item = TaskDependencyEdge>,
        starting_time_of_run: Timestamp,
        config: GraphConfig,
    ) -> Result<Self, GraphError>
    where
        T: Into<Arc<TaskNode>>,
    {
        let mut tdg = Self::empty(starting_time_of_run, config);

        for task in task_list {
            let task: Arc<TaskNode> = task.into();
            let id = task.id;
            if tdg.graph.add_node(task).is_none() {
                log_rejection!(tdg.config.verbosity, "Rejected task {}: id already in use", id);
                return Err(GraphError::IdentityConflict(id));
            }
        }

        for edge in dependency_list {
            let (predecessor, successor) = tdg.validate_edge(&edge)?;
            tdg.graph.add_edge(predecessor, successor, Some(edge.id));
        }

        tdg.wire_sentinels();
        log_mutation!(
            tdg.config.verbosity,
            "Built graph with {} tasks and {} edges",
            tdg.graph.node_count() - 2,
            tdg.graph.edge_count()
        );
        Ok(tdg)
    }

    /// A graph containing only the two sentinels.
    fn empty(starting_time_of_run: Timestamp, config: GraphConfig) -> Self {
        let mut graph = Digraph::with_capacity(2);
        graph.add_node(Arc::new(TaskNode::artificial_startnode()));
        graph.add_node(Arc::new(TaskNode::artificial_endnode()));
        Self {
            graph,
            starting_time_of_run,
            config,
        }
    }

    /// Connect every source to the virtual start and every sink to the virtual end.
    fn wire_sentinels(&mut self) {
        let real_nodes: Vec<NodeIndex> = self.real_node_indices().collect();
        if real_nodes.is_empty() {
            self.graph.add_edge(START, END, None);
            return;
        }
        self.graph.remove_edge(START, END);
        for node in real_nodes {
            if self.graph.predecessors(node).is_empty() {
                self.graph.add_edge(START, node, None);
            }
            if self.graph.successors(node).is_empty() {
                self.graph.add_edge(node, END, None);
            }
        }
    }

    /// Add a task without any dependencies. It is wired to both sentinels.
    pub fn add_task(&mut self, task: impl Into<Arc<TaskNode>>) -> Result<(), GraphError> {
        let task: Arc<TaskNode> = task.into();
        let id = task.id;
        let Some(node) = self.graph.add_node(task) else {
            log_rejection!(self.config.verbosity, "Rejected task {}: id already in use", id);
            return Err(GraphError::IdentityConflict(id));
        };
        self.graph.remove_edge(START, END);
        self.graph.add_edge(START, node, None);
        self.graph.add_edge(node, END, None);
        log_mutation!(self.config.verbosity, "Added task {}", id);
        Ok(())
    }

    /// Add a dependency between two existing tasks.
    ///
    /// All-or-nothing: on error the graph is unchanged. On success the
    /// predecessor loses its edge to the virtual end and the successor loses
    /// its edge from the virtual start.
    pub fn add_edge(&mut self, edge: TaskDependencyEdge) -> Result<(), GraphError> {
        let (predecessor, successor) = self.validate_edge(&edge)?;
        if !self.graph.add_edge(predecessor, successor, Some(edge.id)) {
            log_rejection!(
                self.config.verbosity,
                "Edge {} -> {} already exists",
                edge.task_predecessor,
                edge.task_successor
            );
            return Ok(());
        }
        if self.graph.remove_edge(predecessor, END) {
            log_mutation!(
                self.config.verbosity,
                "Removed edge {} -> END",
                edge.task_predecessor
            );
        }
        if self.graph.remove_edge(START, successor) {
            log_mutation!(
                self.config.verbosity,
                "Removed edge START -> {}",
                edge.task_successor
            );
        }
        log_mutation!(
            self.config.verbosity,
            "Added edge {} -> {}",
            edge.task_predecessor,
            edge.task_successor
        );
        Ok(())
    }

    /// Check whether `task` could be added, without adding it.
    pub fn preview_add_task(&self, task: &TaskNode) -> AddNodeToGraphPreviewResponse {
        if self.graph.contains(&task.id) {
            return AddNodeToGraphPreviewResponse::cannot_add(
                GraphError::IdentityConflict(task.id).to_string(),
            );
        }
        AddNodeToGraphPreviewResponse::can_add()
    }

    /// Check whether `edge` could be added, without adding it.
    pub fn preview_add_edge(&self, edge: &TaskDependencyEdge) -> AddEdgeToGraphPreviewResponse {
        match self.validate_edge(edge) {
            Ok(_) => AddEdgeToGraphPreviewResponse::can_add(),
            Err(e) => AddEdgeToGraphPreviewResponse::cannot_add(e.to_string()),
        }
    }

    /// Resolve both endpoints and make sure the edge keeps the graph acyclic.
    ///
    /// Reads the graph only. A new edge `p -> s` closes a cycle exactly when
    /// `s` already reaches `p`.
    fn validate_edge(&self, edge: &TaskDependencyEdge) -> Result<(NodeIndex, NodeIndex), GraphError> {
        let result = self.resolve_edge(edge);
        if let Err(e) = &result {
            log_rejection!(self.config.verbosity, "Rejected edge {}: {}", edge.id, e);
        }
        result
    }

    fn resolve_edge(&self, edge: &TaskDependencyEdge) -> Result<(NodeIndex, NodeIndex), GraphError> {
        let predecessor =
            self.graph
                .index_of(&edge.task_predecessor)
                .ok_or(GraphError::UnknownEdgeEndpoint {
                    id: edge.task_predecessor,
                    endpoint: Endpoint::Predecessor,
                })?;
        let successor =
            self.graph
                .index_of(&edge.task_successor)
                .ok_or(GraphError::UnknownEdgeEndpoint {
                    id: edge.task_successor,
                    endpoint: Endpoint::Successor,
                })?;

        for id in [edge.task_predecessor, edge.task_successor] {
            if id.is_sentinel() {
                return Err(GraphError::ReservedIdentity(id));
            }
        }

        if self.graph.has_path(successor, predecessor) {
            return Err(GraphError::CycleViolation {
                predecessor: edge.task_predecessor,
                successor: edge.task_successor,
            });
        }

        Ok((predecessor, successor))
    }

    /// Look up a node (sentinels included).
    pub(crate) fn resolve(&self, task_id: &TaskId) -> Result<NodeIndex, GraphError> {
        self.graph
            .index_of(task_id)
            .ok_or(GraphError::UnknownTask(*task_id))
    }

    /// Indices of all real (non-sentinel) nodes in insertion order.
    pub(crate) fn real_node_indices(&self) -> impl Iterator<Item = NodeIndex> {
        self.graph.node_indices().filter(|&i| i != START && i != END)
    }

    /// Nodes in topological order.
    pub(crate) fn topological_order(&self) -> Vec<NodeIndex> {
        match self.graph.topological_order() {
            Some(order) => order,
            None => unreachable!("every mutation rejects edges that close a cycle"),
        }
    }

    /// Display label for every node: task names, `START` and `END` for the sentinels.
    pub fn labels(&self) -> FxHashMap<TaskId, String> {
        self.graph
            .nodes()
            .map(|task| (task.id, task.name.clone()))
            .collect()
    }

    /// A structural copy of the underlying graph. Tasks are shared, not copied.
    pub fn get_digraph_copy(&self) -> Digraph {
        self.graph.clone()
    }

    pub fn starting_time_of_run(&self) -> Timestamp {
        self.starting_time_of_run
    }

    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    pub fn contains_task(&self, task_id: &TaskId) -> bool {
        self.graph.contains(task_id)
    }

    /// The task bound to `task_id` (sentinels included).
    pub fn task(&self, task_id: &TaskId) -> Option<&Arc<TaskNode>> {
        self.graph.index_of(task_id).map(|i| self.graph.task(i))
    }

    /// All real tasks in insertion order.
    pub fn tasks(&self) -> impl Iterator<Item = &Arc<TaskNode>> {
        self.real_node_indices().map(|i| self.graph.task(i))
    }

    /// Caller-supplied dependencies currently in the graph (sentinel edges excluded).
    pub fn dependency_edges(&self) -> Vec<TaskDependencyEdge> {
        self.graph
            .edges()
            .filter_map(|(p, s)| {
                self.graph.edge_id(p, s).map(|id| {
                    TaskDependencyEdge::new(id, self.graph.id_of(p), self.graph.id_of(s))
                })
            })
            .collect()
    }

    /// Every edge, sentinel edges included, as `(predecessor, successor)` IDs.
    pub fn edges(&self) -> Vec<(TaskId, TaskId)> {
        self.graph
            .edges()
            .map(|(p, s)| (self.graph.id_of(p), self.graph.id_of(s)))
            .collect()
    }

    /// True if the edge exists. Unknown IDs simply have no edges.
    pub fn has_edge(&self, predecessor: &TaskId, successor: &TaskId) -> bool {
        match (self.graph.index_of(predecessor), self.graph.index_of(successor)) {
            (Some(p), Some(s)) => self.graph.has_edge(p, s),
            _ => false,
        }
    }

    /// True if a directed path leads from `from` to `to`.
    pub fn has_path(&self, from: &TaskId, to: &TaskId) -> Result<bool, GraphError> {
        let from = self.resolve(from)?;
        let to = self.resolve(to)?;
        Ok(self.graph.has_path(from, to))
    }

    /// Number of nodes, the two sentinels included.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of edges, sentinel edges included.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }
}

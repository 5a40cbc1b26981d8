//! Milestone-bounded sub-graph extraction.

use super::TaskDependencyGraph;
use crate::error::{Endpoint, GraphError};
use crate::models::TaskId;
use crate::registry::NodeIndex;
use crate::{log_mutation, log_rejection};

impl TaskDependencyGraph {
    /// A new graph holding every node and edge on a path from `start_id` to `end_id`.
    ///
    /// Both endpoints must exist and be milestones, and `end_id` must be
    /// reachable from `start_id`. Tasks are shared with this graph; the
    /// structure is independent.
    ///
    /// The result gets fresh sentinels and none of this graph's sentinel
    /// edges. Within the span `start_id` is the only node without
    /// predecessors and `end_id` the only one without successors, so the new
    /// graph holds exactly two sentinel edges: START -> `start_id` and
    /// `end_id` -> END. This holds even when `start_id` had real
    /// predecessors here.
    pub fn extract_sub_graph(
        &self,
        start_id: &TaskId,
        end_id: &TaskId,
    ) -> Result<TaskDependencyGraph, GraphError> {
        let result = self.check_sub_graph_bounds(start_id, end_id);
        if let Err(e) = &result {
            log_rejection!(self.config.verbosity, "Cannot extract sub graph: {}", e);
        }
        let (start, end) = result?;

        let descendants = self.graph.descendants(start);
        let ancestors = self.graph.ancestors(end);
        let retained: Vec<bool> = descendants
            .iter()
            .zip(&ancestors)
            .map(|(&d, &a)| d && a)
            .collect();

        let mut sub = Self::empty(self.starting_time_of_run, self.config.clone());
        for node in self.real_node_indices().filter(|&i| retained[i as usize]) {
            sub.graph.add_node(self.graph.task(node).clone());
        }
        for (p, s) in self.graph.edges() {
            if !(retained[p as usize] && retained[s as usize]) {
                continue;
            }
            // both endpoints were just added
            if let (Some(sp), Some(ss)) = (
                sub.graph.index_of(&self.graph.id_of(p)),
                sub.graph.index_of(&self.graph.id_of(s)),
            ) {
                sub.graph.add_edge(sp, ss, self.graph.edge_id(p, s));
            }
        }
        sub.wire_sentinels();

        log_mutation!(
            self.config.verbosity,
            "Extracted sub graph {} -> {} with {} tasks",
            start_id,
            end_id,
            sub.graph.node_count() - 2
        );
        Ok(sub)
    }

    fn check_sub_graph_bounds(
        &self,
        start_id: &TaskId,
        end_id: &TaskId,
    ) -> Result<(NodeIndex, NodeIndex), GraphError> {
        let start = self
            .graph
            .index_of(start_id)
            .ok_or(GraphError::UnknownSubGraphEndpoint {
                id: *start_id,
                endpoint: Endpoint::Start,
            })?;
        let end = self
            .graph
            .index_of(end_id)
            .ok_or(GraphError::UnknownSubGraphEndpoint {
                id: *end_id,
                endpoint: Endpoint::End,
            })?;

        for (node, id, endpoint) in [
            (start, start_id, Endpoint::Start),
            (end, end_id, Endpoint::End),
        ] {
            if !self.graph.task(node).is_milestone {
                return Err(GraphError::MilestoneConstraintViolation { id: *id, endpoint });
            }
        }

        if !self.graph.has_path(start, end) {
            return Err(GraphError::NoPathExists {
                start: *start_id,
                end: *end_id,
            });
        }
        Ok((start, end))
    }
}

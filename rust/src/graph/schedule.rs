//! Constrained forward pass: planned starting times.

use super::{TaskDependencyGraph, END, START};
use crate::error::GraphError;
use crate::log_pass;
use crate::models::{ScheduledTaskNode, TaskId, Timestamp};

impl TaskDependencyGraph {
    /// Planned start of every node, indexed by node.
    ///
    /// A node starts once all predecessors have finished, but never before its
    /// own earliest start. A pushed-back start propagates to all successors.
    /// Fails if a finish lies beyond the representable time range.
    pub(crate) fn planned_starting_times(&self) -> Result<Vec<Timestamp>, GraphError> {
        let mut starts = vec![self.starting_time_of_run; self.graph.node_count()];

        for node in self.topological_order() {
            if node == START {
                continue;
            }
            let task = self.graph.task(node);
            let mut latest_finish: Option<Timestamp> = None;
            for &p in self.graph.predecessors(node) {
                let predecessor = self.graph.task(p);
                let finish = starts[p as usize]
                    .checked_add_signed(predecessor.planned_duration)
                    .ok_or(GraphError::TimeOverflow {
                        task: predecessor.id,
                    })?;
                latest_finish = latest_finish.max(Some(finish));
            }
            let after_predecessors = latest_finish.unwrap_or(self.starting_time_of_run);

            let start = match task.earliest_starttime {
                Some(earliest) if earliest > after_predecessors => {
                    log_pass!(
                        self.config.verbosity,
                        "{} pushed back from {} to {}",
                        task.name,
                        after_predecessors,
                        earliest
                    );
                    earliest
                }
                _ => after_predecessors,
            };
            starts[node as usize] = start;
        }
        Ok(starts)
    }

    /// Time at which `task_id` is planned to start.
    ///
    /// The virtual start begins with the run; the start of the virtual end is
    /// the planned finish of the whole run.
    pub fn calculate_planned_starting_time_of_task(
        &self,
        task_id: &TaskId,
    ) -> Result<Timestamp, GraphError> {
        let node = self.resolve(task_id)?;
        Ok(self.planned_starting_times()?[node as usize])
    }

    /// Planned finish of the last task (the run start if there are no tasks).
    pub fn planned_finishing_time_of_run(&self) -> Result<Timestamp, GraphError> {
        Ok(self.planned_starting_times()?[END as usize])
    }

    /// Copies of all real tasks with their planned start, ordered by that start.
    ///
    /// Ties keep the order in which the tasks were added.
    pub fn create_list_of_task_node_copies_with_planned_starting_time(
        &self,
    ) -> Result<Vec<ScheduledTaskNode>, GraphError> {
        let starts = self.planned_starting_times()?;
        let mut scheduled: Vec<ScheduledTaskNode> = self
            .real_node_indices()
            .map(|node| ScheduledTaskNode {
                task: self.graph.task(node).as_ref().clone(),
                planned_starting_time: starts[node as usize],
            })
            .collect();
        scheduled.sort_by_key(|s| s.planned_starting_time);
        Ok(scheduled)
    }
}

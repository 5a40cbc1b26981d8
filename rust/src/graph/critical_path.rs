//! Duration-only critical path.
//!
//! Classic forward/backward pass over a topological order, weighting every node
//! with its planned duration (sentinels weigh nothing). Earliest starts are
//! ignored: the result is the path carrying the most work, not necessarily the
//! path that determines the real finish time.

use chrono::TimeDelta;
use rustc_hash::FxHashMap;

use super::{TaskDependencyGraph, END};
use crate::error::GraphError;
use crate::log_pass;
use crate::models::TaskId;

/// Timing of one node measured in work content from the virtual start.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DurationTiming {
    /// Longest duration sum of all predecessor chains.
    pub earliest_start: TimeDelta,
    pub earliest_finish: TimeDelta,
    /// Latest finish that does not stretch the critical path.
    pub latest_finish: TimeDelta,
    pub slack: TimeDelta,
}

impl DurationTiming {
    /// Zero slack means the node lies on at least one longest path.
    pub fn is_critical(&self) -> bool {
        self.slack.is_zero()
    }
}

impl TaskDependencyGraph {
    /// Forward and backward pass, indexed by node.
    ///
    /// Fails if a duration sum leaves the range of `TimeDelta`.
    pub(crate) fn duration_timings(&self) -> Result<Vec<DurationTiming>, GraphError> {
        let order = self.topological_order();
        let n = self.graph.node_count();
        let duration = |i: u32| self.graph.task(i).planned_duration;
        let overflow = |i: u32| GraphError::TimeOverflow {
            task: self.graph.id_of(i),
        };

        // Forward pass: earliest finish by duration
        let mut earliest_finish = vec![TimeDelta::zero(); n];
        for &node in &order {
            let earliest_start = self
                .graph
                .predecessors(node)
                .iter()
                .map(|&p| earliest_finish[p as usize])
                .max()
                .unwrap_or_else(TimeDelta::zero);
            earliest_finish[node as usize] = earliest_start
                .checked_add(&duration(node))
                .ok_or_else(|| overflow(node))?;
        }

        let length = earliest_finish[END as usize];

        // Backward pass: latest finish that keeps the total length
        let mut latest_finish = vec![length; n];
        for &node in order.iter().rev() {
            let mut tightest: Option<TimeDelta> = None;
            for &s in self.graph.successors(node) {
                let lf = latest_finish[s as usize]
                    .checked_sub(&duration(s))
                    .ok_or_else(|| overflow(s))?;
                tightest = Some(tightest.map_or(lf, |t| t.min(lf)));
            }
            if let Some(lf) = tightest {
                latest_finish[node as usize] = lf;
            }
        }

        // Both differences stay within [0, length] once the passes succeeded.
        let timings: Vec<DurationTiming> = (0..n)
            .map(|i| DurationTiming {
                earliest_start: earliest_finish[i] - duration(i as u32),
                earliest_finish: earliest_finish[i],
                latest_finish: latest_finish[i],
                slack: latest_finish[i] - earliest_finish[i],
            })
            .collect();

        log_pass!(
            self.config.verbosity,
            "Critical path length {} min over {} nodes",
            length.num_minutes(),
            n
        );
        Ok(timings)
    }

    /// True if `task_id` lies on a longest-by-duration path from START to END.
    pub fn is_on_critical_path(&self, task_id: &TaskId) -> Result<bool, GraphError> {
        let node = self.resolve(task_id)?;
        let timing = self.duration_timings()?[node as usize];
        log_pass!(
            self.config.verbosity,
            "{}: earliest finish {} min, slack {} min",
            task_id,
            timing.earliest_finish.num_minutes(),
            timing.slack.num_minutes()
        );
        Ok(timing.is_critical())
    }

    /// Longest duration sum over all paths from START up to, not including, `task_id`.
    ///
    /// Zero for the virtual start. For the virtual end this is the length of
    /// the critical path.
    pub fn calculate_planned_duration_of_predecessor_tasks_on_critical_path(
        &self,
        task_id: &TaskId,
    ) -> Result<TimeDelta, GraphError> {
        let node = self.resolve(task_id)?;
        Ok(self.duration_timings()?[node as usize].earliest_start)
    }

    /// Duration timing of every node, sentinels included.
    pub fn critical_path_timings(&self) -> Result<FxHashMap<TaskId, DurationTiming>, GraphError> {
        Ok(self
            .duration_timings()?
            .into_iter()
            .enumerate()
            .map(|(i, timing)| (self.graph.id_of(i as u32), timing))
            .collect())
    }

    /// Total duration of the critical path.
    pub fn critical_path_length(&self) -> Result<TimeDelta, GraphError> {
        Ok(self.duration_timings()?[END as usize].earliest_start)
    }

    /// Real tasks on the critical path, in insertion order.
    pub fn critical_path_tasks(&self) -> Result<Vec<TaskId>, GraphError> {
        let timings = self.duration_timings()?;
        Ok(self
            .real_node_indices()
            .filter(|&i| timings[i as usize].is_critical())
            .map(|i| self.graph.id_of(i))
            .collect())
    }
}

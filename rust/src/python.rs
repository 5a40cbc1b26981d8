//! Python bindings.
//!
//! IDs cross the boundary as UUID strings, durations as `datetime.timedelta`
//! and timestamps as offset-aware `datetime.datetime`. Every [`GraphError`]
//! surfaces as `ValueError`.

use chrono::TimeDelta;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use std::collections::HashMap;
use std::str::FromStr;

use crate::config::GraphConfig;
use crate::error::GraphError;
use crate::graph::TaskDependencyGraph;
use crate::models::{
    AddEdgeToGraphPreviewResponse, AddNodeToGraphPreviewResponse, ScheduledTaskNode,
    TaskDependencyEdge, TaskDependencyId, TaskId, TaskNode, Timestamp,
};

impl From<GraphError> for PyErr {
    fn from(e: GraphError) -> Self {
        PyValueError::new_err(e.to_string())
    }
}

fn parse_task_id(s: &str) -> PyResult<TaskId> {
    TaskId::from_str(s).map_err(|e| PyValueError::new_err(format!("Invalid task id {s:?}: {e}")))
}

fn parse_dependency_id(s: &str) -> PyResult<TaskDependencyId> {
    TaskDependencyId::from_str(s)
        .map_err(|e| PyValueError::new_err(format!("Invalid dependency id {s:?}: {e}")))
}

/// A task (PyO3 wrapper).
#[pyclass(name = "TaskNode")]
#[derive(Clone, Debug)]
pub struct PyTaskNode {
    inner: TaskNode,
}

#[pymethods]
impl PyTaskNode {
    #[new]
    #[pyo3(signature = (
        external_id,
        name,
        planned_duration,
        id=None,
        phase=None,
        tags=None,
        earliest_starttime=None,
        is_milestone=false
    ))]
    #[allow(clippy::too_many_arguments)]
    fn new(
        external_id: String,
        name: String,
        planned_duration: TimeDelta,
        id: Option<&str>,
        phase: Option<String>,
        tags: Option<Vec<String>>,
        earliest_starttime: Option<Timestamp>,
        is_milestone: bool,
    ) -> PyResult<Self> {
        if planned_duration < TimeDelta::zero() {
            return Err(PyValueError::new_err("planned_duration must not be negative"));
        }
        let id = match id {
            Some(s) => parse_task_id(s)?,
            None => TaskId::new_v4(),
        };
        let mut task = TaskNode::new(id, external_id, name, planned_duration);
        task.phase = phase;
        task.tags = tags.unwrap_or_default().into_iter().collect();
        task.earliest_starttime = earliest_starttime;
        task.is_milestone = is_milestone;
        Ok(Self { inner: task })
    }

    #[getter]
    fn id(&self) -> String {
        self.inner.id.to_string()
    }

    #[getter]
    fn external_id(&self) -> &str {
        &self.inner.external_id
    }

    #[getter]
    fn name(&self) -> &str {
        &self.inner.name
    }

    #[getter]
    fn phase(&self) -> Option<&str> {
        self.inner.phase.as_deref()
    }

    #[getter]
    fn tags(&self) -> Vec<String> {
        self.inner.tags.iter().cloned().collect()
    }

    #[getter]
    fn planned_duration(&self) -> TimeDelta {
        self.inner.planned_duration
    }

    #[getter]
    fn earliest_starttime(&self) -> Option<Timestamp> {
        self.inner.earliest_starttime
    }

    #[getter]
    fn is_milestone(&self) -> bool {
        self.inner.is_milestone
    }

    fn __repr__(&self) -> String {
        format!(
            "TaskNode(id={}, name={:?}, planned_duration={}min, is_milestone={})",
            self.inner.id,
            self.inner.name,
            self.inner.planned_duration.num_minutes(),
            self.inner.is_milestone
        )
    }
}

/// A dependency between two tasks (PyO3 wrapper).
#[pyclass(name = "TaskDependencyEdge")]
#[derive(Clone, Debug)]
pub struct PyTaskDependencyEdge {
    inner: TaskDependencyEdge,
}

#[pymethods]
impl PyTaskDependencyEdge {
    #[new]
    #[pyo3(signature = (task_predecessor, task_successor, id=None))]
    fn new(task_predecessor: &str, task_successor: &str, id: Option<&str>) -> PyResult<Self> {
        let id = match id {
            Some(s) => parse_dependency_id(s)?,
            None => TaskDependencyId::new_v4(),
        };
        Ok(Self {
            inner: TaskDependencyEdge::new(
                id,
                parse_task_id(task_predecessor)?,
                parse_task_id(task_successor)?,
            ),
        })
    }

    #[getter]
    fn id(&self) -> String {
        self.inner.id.to_string()
    }

    #[getter]
    fn task_predecessor(&self) -> String {
        self.inner.task_predecessor.to_string()
    }

    #[getter]
    fn task_successor(&self) -> String {
        self.inner.task_successor.to_string()
    }

    fn __repr__(&self) -> String {
        format!(
            "TaskDependencyEdge({} -> {})",
            self.inner.task_predecessor, self.inner.task_successor
        )
    }
}

/// A task copy with its planned start (PyO3 wrapper).
#[pyclass(name = "ScheduledTaskNode")]
#[derive(Clone, Debug)]
pub struct PyScheduledTaskNode {
    inner: ScheduledTaskNode,
}

#[pymethods]
impl PyScheduledTaskNode {
    #[getter]
    fn task(&self) -> PyTaskNode {
        PyTaskNode {
            inner: self.inner.task.clone(),
        }
    }

    #[getter]
    fn planned_starting_time(&self) -> Timestamp {
        self.inner.planned_starting_time
    }

    #[getter]
    fn planned_finishing_time(&self) -> PyResult<Timestamp> {
        self.inner.planned_finishing_time().ok_or_else(|| {
            GraphError::TimeOverflow {
                task: self.inner.id(),
            }
            .into()
        })
    }

    fn __repr__(&self) -> String {
        format!(
            "ScheduledTaskNode(name={:?}, planned_starting_time={})",
            self.inner.task.name, self.inner.planned_starting_time
        )
    }
}

#[pyclass(name = "AddNodeToGraphPreviewResponse")]
#[derive(Clone, Debug)]
pub struct PyAddNodeToGraphPreviewResponse {
    inner: AddNodeToGraphPreviewResponse,
}

#[pymethods]
impl PyAddNodeToGraphPreviewResponse {
    #[getter]
    fn can_be_added(&self) -> bool {
        self.inner.can_be_added()
    }

    #[getter]
    fn error_message(&self) -> Option<&str> {
        self.inner.error_message()
    }
}

#[pyclass(name = "AddEdgeToGraphPreviewResponse")]
#[derive(Clone, Debug)]
pub struct PyAddEdgeToGraphPreviewResponse {
    inner: AddEdgeToGraphPreviewResponse,
}

#[pymethods]
impl PyAddEdgeToGraphPreviewResponse {
    #[getter]
    fn can_be_added(&self) -> bool {
        self.inner.can_be_added()
    }

    #[getter]
    fn error_message(&self) -> Option<&str> {
        self.inner.error_message()
    }
}

/// The task dependency graph (PyO3 wrapper).
#[pyclass(name = "TaskDependencyGraph")]
#[derive(Clone, Debug)]
pub struct PyTaskDependencyGraph {
    inner: TaskDependencyGraph,
}

#[pymethods]
impl PyTaskDependencyGraph {
    /// Build a graph.
    ///
    /// Raises ValueError on duplicate task ids, unknown dependency endpoints or cycles.
    #[new]
    #[pyo3(signature = (task_list, dependency_list, starting_time_of_run, config=None))]
    fn new(
        task_list: Vec<PyTaskNode>,
        dependency_list: Vec<PyTaskDependencyEdge>,
        starting_time_of_run: Timestamp,
        config: Option<GraphConfig>,
    ) -> PyResult<Self> {
        let inner = TaskDependencyGraph::with_config(
            task_list.into_iter().map(|t| t.inner),
            dependency_list.into_iter().map(|e| e.inner),
            starting_time_of_run,
            config.unwrap_or_default(),
        )?;
        Ok(Self { inner })
    }

    fn add_task(&mut self, task: PyTaskNode) -> PyResult<()> {
        Ok(self.inner.add_task(task.inner)?)
    }

    fn add_edge(&mut self, edge: PyTaskDependencyEdge) -> PyResult<()> {
        Ok(self.inner.add_edge(edge.inner)?)
    }

    fn preview_add_task(&self, task: &PyTaskNode) -> PyAddNodeToGraphPreviewResponse {
        PyAddNodeToGraphPreviewResponse {
            inner: self.inner.preview_add_task(&task.inner),
        }
    }

    fn preview_add_edge(&self, edge: &PyTaskDependencyEdge) -> PyAddEdgeToGraphPreviewResponse {
        PyAddEdgeToGraphPreviewResponse {
            inner: self.inner.preview_add_edge(&edge.inner),
        }
    }

    fn is_on_critical_path(&self, task_id: &str) -> PyResult<bool> {
        Ok(self.inner.is_on_critical_path(&parse_task_id(task_id)?)?)
    }

    fn calculate_planned_duration_of_predecessor_tasks_on_critical_path(
        &self,
        task_id: &str,
    ) -> PyResult<TimeDelta> {
        Ok(self
            .inner
            .calculate_planned_duration_of_predecessor_tasks_on_critical_path(&parse_task_id(
                task_id,
            )?)?)
    }

    fn calculate_planned_starting_time_of_task(&self, task_id: &str) -> PyResult<Timestamp> {
        Ok(self
            .inner
            .calculate_planned_starting_time_of_task(&parse_task_id(task_id)?)?)
    }

    fn create_list_of_task_node_copies_with_planned_starting_time(
        &self,
    ) -> PyResult<Vec<PyScheduledTaskNode>> {
        Ok(self
            .inner
            .create_list_of_task_node_copies_with_planned_starting_time()?
            .into_iter()
            .map(|inner| PyScheduledTaskNode { inner })
            .collect())
    }

    fn extract_sub_graph(&self, start_id: &str, end_id: &str) -> PyResult<Self> {
        let inner = self
            .inner
            .extract_sub_graph(&parse_task_id(start_id)?, &parse_task_id(end_id)?)?;
        Ok(Self { inner })
    }

    fn labels(&self) -> HashMap<String, String> {
        self.inner
            .labels()
            .into_iter()
            .map(|(id, label)| (id.to_string(), label))
            .collect()
    }

    /// A structurally independent copy. Tasks are shared.
    fn get_digraph_copy(&self) -> Self {
        self.clone()
    }

    /// All edges, sentinel edges included, as `(predecessor, successor)` id pairs.
    fn edges(&self) -> Vec<(String, String)> {
        self.inner
            .edges()
            .into_iter()
            .map(|(p, s)| (p.to_string(), s.to_string()))
            .collect()
    }

    fn dependency_edges(&self) -> Vec<PyTaskDependencyEdge> {
        self.inner
            .dependency_edges()
            .into_iter()
            .map(|inner| PyTaskDependencyEdge { inner })
            .collect()
    }

    fn tasks(&self) -> Vec<PyTaskNode> {
        self.inner
            .tasks()
            .map(|t| PyTaskNode {
                inner: t.as_ref().clone(),
            })
            .collect()
    }

    fn critical_path_tasks(&self) -> PyResult<Vec<String>> {
        Ok(self
            .inner
            .critical_path_tasks()?
            .into_iter()
            .map(|id| id.to_string())
            .collect())
    }

    fn critical_path_length(&self) -> PyResult<TimeDelta> {
        Ok(self.inner.critical_path_length()?)
    }

    fn planned_finishing_time_of_run(&self) -> PyResult<Timestamp> {
        Ok(self.inner.planned_finishing_time_of_run()?)
    }

    #[getter]
    fn starting_time_of_run(&self) -> Timestamp {
        self.inner.starting_time_of_run()
    }

    fn __contains__(&self, task_id: &str) -> PyResult<bool> {
        Ok(self.inner.contains_task(&parse_task_id(task_id)?))
    }

    fn __len__(&self) -> usize {
        self.inner.tasks().count()
    }

    fn __repr__(&self) -> String {
        format!(
            "TaskDependencyGraph(tasks={}, edges={})",
            self.inner.node_count() - 2,
            self.inner.edge_count()
        )
    }
}

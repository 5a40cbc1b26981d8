//! Rust implementation of the task dependency graph.
//!
//! A DAG of tasks between a virtual start and a virtual end node, with a
//! duration-only critical path, a constrained forward pass for planned start
//! times, cycle-safe mutation and milestone-bounded sub-graph extraction.

// Allow clippy warning triggered by PyO3 macro expansion
#![allow(clippy::useless_conversion)]

use pyo3::prelude::*;

mod config;
pub mod digraph;
mod error;
pub mod graph;
pub mod logging;
mod models;
mod python;
pub mod registry;

pub use config::GraphConfig;
pub use digraph::Digraph;
pub use error::{Endpoint, GraphError};
pub use graph::{DurationTiming, TaskDependencyGraph};
pub use models::{
    AddEdgeToGraphPreviewResponse, AddNodeToGraphPreviewResponse, ScheduledTaskNode,
    TaskDependencyEdge, TaskDependencyId, TaskId, TaskNode, Timestamp, ARTIFICIAL_ENDNODE_NAME,
    ARTIFICIAL_STARTNODE_NAME, ID_OF_ARTIFICIAL_ENDNODE, ID_OF_ARTIFICIAL_STARTNODE,
};

use python::{
    PyAddEdgeToGraphPreviewResponse, PyAddNodeToGraphPreviewResponse, PyScheduledTaskNode,
    PyTaskDependencyEdge, PyTaskDependencyGraph, PyTaskNode,
};

/// The taskdependencygraph_rust Python module.
#[pymodule]
fn taskdependencygraph_rust(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Core data types
    m.add_class::<PyTaskNode>()?;
    m.add_class::<PyTaskDependencyEdge>()?;
    m.add_class::<PyScheduledTaskNode>()?;
    m.add_class::<PyAddNodeToGraphPreviewResponse>()?;
    m.add_class::<PyAddEdgeToGraphPreviewResponse>()?;

    // Config types
    m.add_class::<GraphConfig>()?;

    // Graph
    m.add_class::<PyTaskDependencyGraph>()?;

    // Sentinel ids
    m.add(
        "ID_OF_ARTIFICIAL_STARTNODE",
        ID_OF_ARTIFICIAL_STARTNODE.to_string(),
    )?;
    m.add("ID_OF_ARTIFICIAL_ENDNODE", ID_OF_ARTIFICIAL_ENDNODE.to_string())?;

    Ok(())
}

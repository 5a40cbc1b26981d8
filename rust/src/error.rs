//! Error types for graph construction, mutation and queries.

use thiserror::Error;

use crate::models::TaskId;

/// Which endpoint of an edge or sub-graph request an error refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Endpoint {
    Predecessor,
    Successor,
    Start,
    End,
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Endpoint::Predecessor => write!(f, "predecessor"),
            Endpoint::Successor => write!(f, "successor"),
            Endpoint::Start => write!(f, "start"),
            Endpoint::End => write!(f, "end"),
        }
    }
}

/// Errors returned by [`crate::TaskDependencyGraph`].
///
/// None of these leave a partially applied mutation behind.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("A node with id {0} already exists in the graph")]
    IdentityConflict(TaskId),
    #[error("The task {0} does not exist in the graph")]
    UnknownTask(TaskId),
    #[error("The {endpoint} {id} of the dependency does not exist in the graph")]
    UnknownEdgeEndpoint { id: TaskId, endpoint: Endpoint },
    #[error("{id} ({endpoint}) does not exist in the graph")]
    UnknownSubGraphEndpoint { id: TaskId, endpoint: Endpoint },
    #[error("The id {0} is reserved for the artificial start/end node and cannot be used in a dependency")]
    ReservedIdentity(TaskId),
    #[error("Adding the dependency {predecessor} -> {successor} would create a cycle")]
    CycleViolation {
        predecessor: TaskId,
        successor: TaskId,
    },
    #[error("{id} ({endpoint}) is not a milestone")]
    MilestoneConstraintViolation { id: TaskId, endpoint: Endpoint },
    #[error("There is no path between {start} and {end}")]
    NoPathExists { start: TaskId, end: TaskId },
    #[error("The planned times of task {task} exceed the representable time range")]
    TimeOverflow { task: TaskId },
}

impl GraphError {
    /// True for every variant caused by an id that is absent from the graph.
    pub fn is_unknown_reference(&self) -> bool {
        matches!(
            self,
            GraphError::UnknownTask(_)
                | GraphError::UnknownEdgeEndpoint { .. }
                | GraphError::UnknownSubGraphEndpoint { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_carry_searchable_keywords() {
        let id = TaskId::new_v4();
        let cycle = GraphError::CycleViolation {
            predecessor: id,
            successor: id,
        };
        assert!(cycle.to_string().contains("cycle"));

        let missing = GraphError::UnknownSubGraphEndpoint {
            id,
            endpoint: Endpoint::Start,
        };
        assert!(missing
            .to_string()
            .contains("(start) does not exist in the graph"));
        assert!(missing.is_unknown_reference());

        let milestone = GraphError::MilestoneConstraintViolation {
            id,
            endpoint: Endpoint::End,
        };
        assert!(milestone.to_string().contains("not a milestone"));
        assert!(!milestone.is_unknown_reference());

        let no_path = GraphError::NoPathExists { start: id, end: id };
        assert!(no_path.to_string().starts_with("There is no path between"));

        let overflow = GraphError::TimeOverflow { task: id };
        assert!(overflow.to_string().contains("time range"));
        assert!(!overflow.is_unknown_reference());
    }
}

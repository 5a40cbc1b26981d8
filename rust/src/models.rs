//! Core data types for the task dependency graph.

use chrono::{DateTime, FixedOffset, TimeDelta};
use std::collections::BTreeSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use uuid::Uuid;

/// An offset-aware point in time. Naive timestamps cannot be represented.
pub type Timestamp = DateTime<FixedOffset>;

/// Identifier of a task (node) in the graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(pub Uuid);

impl TaskId {
    /// Create a fresh random task ID.
    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }

    /// True for the two reserved sentinel IDs.
    pub fn is_sentinel(&self) -> bool {
        *self == ID_OF_ARTIFICIAL_STARTNODE || *self == ID_OF_ARTIFICIAL_ENDNODE
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl FromStr for TaskId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// Identifier of a dependency edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskDependencyId(pub Uuid);

impl TaskDependencyId {
    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for TaskDependencyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl FromStr for TaskDependencyId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// Reserved ID of the virtual start node.
pub const ID_OF_ARTIFICIAL_STARTNODE: TaskId =
    TaskId(Uuid::from_u128(0x00000000_0000_4000_8000_000000005747));

/// Reserved ID of the virtual end node.
pub const ID_OF_ARTIFICIAL_ENDNODE: TaskId =
    TaskId(Uuid::from_u128(0x00000000_0000_4000_8000_0000000e00d0));

/// Display name of the virtual start node.
pub const ARTIFICIAL_STARTNODE_NAME: &str = "START";

/// Display name of the virtual end node.
pub const ARTIFICIAL_ENDNODE_NAME: &str = "END";

/// A single unit of work.
///
/// Equality and hashing only consider `id`: two tasks with the same ID are the
/// same node even if their other fields differ.
#[derive(Clone, Debug)]
pub struct TaskNode {
    pub id: TaskId,
    /// Caller-supplied correlation key. Not required to be unique.
    pub external_id: String,
    pub name: String,
    pub phase: Option<String>,
    pub tags: BTreeSet<String>,
    pub planned_duration: TimeDelta,
    /// The task must not start before this time, regardless of its predecessors.
    pub earliest_starttime: Option<Timestamp>,
    pub is_milestone: bool,
}

impl TaskNode {
    /// `planned_duration` must not be negative. Callers crossing a trust
    /// boundary validate it first; debug builds assert it here.
    pub fn new(
        id: TaskId,
        external_id: impl Into<String>,
        name: impl Into<String>,
        planned_duration: TimeDelta,
    ) -> Self {
        debug_assert!(
            planned_duration >= TimeDelta::zero(),
            "planned_duration must not be negative"
        );
        Self {
            id,
            external_id: external_id.into(),
            name: name.into(),
            phase: None,
            tags: BTreeSet::new(),
            planned_duration,
            earliest_starttime: None,
            is_milestone: false,
        }
    }

    pub fn with_phase(mut self, phase: impl Into<String>) -> Self {
        self.phase = Some(phase.into());
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.insert(tag.into());
        self
    }

    pub fn with_earliest_starttime(mut self, earliest_starttime: Timestamp) -> Self {
        self.earliest_starttime = Some(earliest_starttime);
        self
    }

    pub fn as_milestone(mut self) -> Self {
        self.is_milestone = true;
        self
    }

    /// The zero-duration node every graph starts from.
    pub fn artificial_startnode() -> Self {
        Self::new(
            ID_OF_ARTIFICIAL_STARTNODE,
            ARTIFICIAL_STARTNODE_NAME,
            ARTIFICIAL_STARTNODE_NAME,
            TimeDelta::zero(),
        )
    }

    /// The zero-duration node every graph ends in.
    pub fn artificial_endnode() -> Self {
        Self::new(
            ID_OF_ARTIFICIAL_ENDNODE,
            ARTIFICIAL_ENDNODE_NAME,
            ARTIFICIAL_ENDNODE_NAME,
            TimeDelta::zero(),
        )
    }
}

impl PartialEq for TaskNode {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TaskNode {}

impl Hash for TaskNode {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// A precedence relation: `task_successor` may only start after `task_predecessor` finished.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TaskDependencyEdge {
    pub id: TaskDependencyId,
    pub task_predecessor: TaskId,
    pub task_successor: TaskId,
}

impl TaskDependencyEdge {
    pub fn new(id: TaskDependencyId, task_predecessor: TaskId, task_successor: TaskId) -> Self {
        Self {
            id,
            task_predecessor,
            task_successor,
        }
    }

    /// Create an edge with a fresh random ID.
    pub fn between(task_predecessor: TaskId, task_successor: TaskId) -> Self {
        Self::new(TaskDependencyId::new_v4(), task_predecessor, task_successor)
    }
}

/// A copy of a task together with the time it is planned to start.
#[derive(Clone, Debug)]
pub struct ScheduledTaskNode {
    pub task: TaskNode,
    pub planned_starting_time: Timestamp,
}

impl ScheduledTaskNode {
    pub fn id(&self) -> TaskId {
        self.task.id
    }

    /// Planned start plus planned duration, `None` if that lies beyond the
    /// representable time range.
    pub fn planned_finishing_time(&self) -> Option<Timestamp> {
        self.planned_starting_time
            .checked_add_signed(self.task.planned_duration)
    }
}

/// Answer to "could this task be added?" without actually adding it.
///
/// A negative answer always carries an error message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AddNodeToGraphPreviewResponse {
    can_be_added: bool,
    error_message: Option<String>,
}

impl AddNodeToGraphPreviewResponse {
    pub fn can_add() -> Self {
        Self {
            can_be_added: true,
            error_message: None,
        }
    }

    pub fn cannot_add(error_message: impl Into<String>) -> Self {
        Self {
            can_be_added: false,
            error_message: Some(error_message.into()),
        }
    }

    pub fn can_be_added(&self) -> bool {
        self.can_be_added
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }
}

/// Answer to "could this edge be added?" without actually adding it.
///
/// A negative answer always carries an error message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AddEdgeToGraphPreviewResponse {
    can_be_added: bool,
    error_message: Option<String>,
}

impl AddEdgeToGraphPreviewResponse {
    pub fn can_add() -> Self {
        Self {
            can_be_added: true,
            error_message: None,
        }
    }

    pub fn cannot_add(error_message: impl Into<String>) -> Self {
        Self {
            can_be_added: false,
            error_message: Some(error_message.into()),
        }
    }

    pub fn can_be_added(&self) -> bool {
        self.can_be_added
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }
}

//! Named example graphs shared by the unit tests.

use chrono::{FixedOffset, TimeDelta, TimeZone};

use super::TaskDependencyGraph;
use crate::models::{TaskDependencyEdge, TaskId, TaskNode, Timestamp};

pub(crate) fn utc(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> Timestamp {
    FixedOffset::east_opt(0)
        .unwrap()
        .with_ymd_and_hms(year, month, day, hour, minute, 0)
        .unwrap()
}

/// 2024-01-01T00:00Z, the run start of the lettered graphs.
pub(crate) fn run_start() -> Timestamp {
    utc(2024, 1, 1, 0, 0)
}

pub(crate) fn make_task(name: &str, minutes: i64) -> TaskNode {
    TaskNode::new(TaskId::new_v4(), name, name, TimeDelta::minutes(minutes))
}

pub(crate) fn edges(pairs: &[(&TaskNode, &TaskNode)]) -> Vec<TaskDependencyEdge> {
    pairs
        .iter()
        .map(|(p, s)| TaskDependencyEdge::between(p.id, s.id))
        .collect()
}

/// Lettered tasks, fresh IDs per instance.
pub(crate) struct Letters {
    pub a: TaskNode,
    pub a_fixed: TaskNode,
    pub b: TaskNode,
    pub b_fixed: TaskNode,
    pub c: TaskNode,
    pub d: TaskNode,
    pub g: TaskNode,
    pub h: TaskNode,
    pub h_fixed: TaskNode,
    pub i: TaskNode,
    pub j: TaskNode,
    pub k: TaskNode,
    pub l: TaskNode,
    pub m: TaskNode,
    pub n: TaskNode,
    pub n_milestone: TaskNode,
    pub o: TaskNode,
    pub p: TaskNode,
    pub q: TaskNode,
    pub r: TaskNode,
    pub s: TaskNode,
    pub s_milestone: TaskNode,
    pub t: TaskNode,
    pub u: TaskNode,
    pub v: TaskNode,
    pub w: TaskNode,
    pub w_milestone: TaskNode,
    pub x: TaskNode,
    pub y: TaskNode,
}

impl Letters {
    pub fn new() -> Self {
        Self {
            a: make_task("A", 5),
            a_fixed: make_task("A", 5).with_earliest_starttime(utc(2024, 1, 1, 23, 56)),
            b: make_task("B", 20).with_phase("phase name2"),
            b_fixed: make_task("B", 20).with_earliest_starttime(utc(2024, 1, 2, 0, 0)),
            c: make_task("C", 1),
            d: make_task("D", 4),
            g: make_task("G", 1),
            h: make_task("H", 10),
            h_fixed: make_task("H", 10).with_earliest_starttime(utc(2024, 1, 2, 0, 0)),
            i: make_task("I", 10),
            j: make_task("J", 20),
            k: make_task("K", 20),
            l: make_task("L", 5),
            m: make_task("M", 1),
            n: make_task("N", 2),
            n_milestone: make_task("N", 2).as_milestone(),
            o: make_task("O", 2),
            p: make_task("P", 5).with_earliest_starttime(utc(2024, 1, 2, 0, 0)),
            q: make_task("Q", 3).with_earliest_starttime(utc(2024, 1, 3, 0, 0)),
            r: make_task("R", 4),
            s: make_task("S", 20),
            s_milestone: make_task("S", 20).as_milestone(),
            t: make_task("T", 21),
            u: make_task("U", 22).with_earliest_starttime(utc(2024, 1, 3, 0, 26)),
            v: make_task("V", 23).with_earliest_starttime(utc(2024, 1, 4, 0, 0)),
            w: make_task("W", 17),
            w_milestone: make_task("W", 17).as_milestone(),
            x: make_task("X", 10),
            y: make_task("Y", 24 * 60),
        }
    }

    /// ```text
    ///     B(20)--->D(4)
    ///    /
    /// A(5)--->C(1)
    /// ```
    pub fn anna(&self) -> TaskDependencyGraph {
        self.diamond(&self.a, &self.b)
    }

    /// Anna with B not starting before 2024-01-02.
    pub fn bernd(&self) -> TaskDependencyGraph {
        self.diamond(&self.a, &self.b_fixed)
    }

    /// Bernd with A not starting before 2024-01-01T23:56.
    pub fn carmen(&self) -> TaskDependencyGraph {
        self.diamond(&self.a_fixed, &self.b_fixed)
    }

    fn diamond(&self, a: &TaskNode, b: &TaskNode) -> TaskDependencyGraph {
        TaskDependencyGraph::new(
            vec![a.clone(), b.clone(), self.c.clone(), self.d.clone()],
            edges(&[(a, b), (a, &self.c), (b, &self.d)]),
            run_start(),
        )
        .unwrap()
    }

    /// Two parallel paths, the lower one is critical (G->J->K->L).
    ///
    /// ```text
    ///      H(10)----I(10)
    ///     /             \
    /// G(1)               L(5)
    ///    \              /
    ///     J(20)----K(20)
    /// ```
    pub fn daniel(&self) -> TaskDependencyGraph {
        self.parallel(&self.h)
    }

    /// Daniel with H not starting before 2024-01-02.
    pub fn emily(&self) -> TaskDependencyGraph {
        self.parallel(&self.h_fixed)
    }

    fn parallel(&self, h: &TaskNode) -> TaskDependencyGraph {
        TaskDependencyGraph::new(
            vec![
                self.g.clone(),
                h.clone(),
                self.i.clone(),
                self.j.clone(),
                self.k.clone(),
                self.l.clone(),
            ],
            edges(&[
                (&self.g, h),
                (h, &self.i),
                (&self.i, &self.l),
                (&self.g, &self.j),
                (&self.j, &self.k),
                (&self.k, &self.l),
            ]),
            run_start(),
        )
        .unwrap()
    }

    /// ```text
    ///            O(2)-P(5, >= 01-02)         T(21)--V(23, >= 01-04)
    ///           /                   \       /                     \
    /// M(1)---N(2)                    S(20)                         W(17)
    ///          \                    /     \                       /
    ///           Q(3, >= 01-03)-R(4)        U(22, >= 01-03 00:26)--
    ///            \            /
    ///             X(10)-Y(1d)
    /// ```
    pub fn ferdinand(&self) -> TaskDependencyGraph {
        self.two_by_two(&self.n, &self.s, &self.w)
    }

    /// Ferdinand with milestones at N, S and W.
    pub fn ferdinand_with_milestones(&self) -> TaskDependencyGraph {
        self.two_by_two(&self.n_milestone, &self.s_milestone, &self.w_milestone)
    }

    fn two_by_two(&self, n: &TaskNode, s: &TaskNode, w: &TaskNode) -> TaskDependencyGraph {
        TaskDependencyGraph::new(
            vec![
                self.m.clone(),
                n.clone(),
                self.o.clone(),
                self.p.clone(),
                self.q.clone(),
                self.r.clone(),
                s.clone(),
                self.t.clone(),
                self.u.clone(),
                self.v.clone(),
                w.clone(),
                self.x.clone(),
                self.y.clone(),
            ],
            edges(&[
                (&self.m, n),
                (n, &self.o),
                (&self.o, &self.p),
                (&self.p, s),
                (s, &self.t),
                (&self.t, &self.v),
                (&self.v, w),
                (n, &self.q),
                (&self.q, &self.r),
                (&self.r, s),
                (s, &self.u),
                (&self.u, w),
                (&self.q, &self.x),
                (&self.x, &self.y),
                (&self.y, &self.r),
            ]),
            run_start(),
        )
        .unwrap()
    }
}

/// A graph built from numbered tasks, kept together with the tasks in input order.
pub(crate) struct NumberedGraph {
    pub tdg: TaskDependencyGraph,
    pub tasks: Vec<TaskNode>,
}

/// 2024-03-12T12:10Z
pub(crate) fn numbered_run_start() -> Timestamp {
    utc(2024, 3, 12, 12, 10)
}

/// 2024-03-12T05:00Z
pub(crate) fn early_numbered_run_start() -> Timestamp {
    utc(2024, 3, 12, 5, 0)
}

fn numbered(minutes: &[i64]) -> Vec<TaskNode> {
    minutes
        .iter()
        .enumerate()
        .map(|(i, &m)| {
            let n = i + 1;
            TaskNode::new(
                TaskId::new_v4(),
                n.to_string(),
                format!("name{}", n),
                TimeDelta::minutes(m),
            )
            .with_phase(format!("phase name{}", n))
            .with_tag(format!("tag{}", n))
        })
        .collect()
}

fn numbered_edges(tasks: &[TaskNode], pairs: &[(usize, usize)]) -> Vec<TaskDependencyEdge> {
    pairs
        .iter()
        .map(|&(p, s)| TaskDependencyEdge::between(tasks[p].id, tasks[s].id))
        .collect()
}

/// ```text
///       1(5)
///      /   \
///   2(20)  3(1)
///            \
///            4(4)
/// ```
pub(crate) fn simple_graph() -> NumberedGraph {
    let tasks = numbered(&[5, 20, 1, 4]);
    let tdg = TaskDependencyGraph::new(
        tasks.clone(),
        numbered_edges(&tasks, &[(0, 1), (0, 2), (2, 3)]),
        numbered_run_start(),
    )
    .unwrap();
    NumberedGraph { tdg, tasks }
}

/// Simple graph with 2 -> 4 added.
pub(crate) fn simple_graph_closed() -> NumberedGraph {
    let tasks = numbered(&[5, 20, 1, 4]);
    let tdg = TaskDependencyGraph::new(
        tasks.clone(),
        numbered_edges(&tasks, &[(0, 1), (0, 2), (2, 3), (1, 3)]),
        numbered_run_start(),
    )
    .unwrap();
    NumberedGraph { tdg, tasks }
}

/// Durations of the complex graph tasks, in input order.
const COMPLEX_MINUTES: [i64; 7] = [5, 2, 30, 4, 4, 30, 7];

/// ```text
///        1(5)
///       /   \
///    2(2)   3(30)
///       \   /
///        4(4)
///       /   \
///    5(4)   6(30)
///       \   /
///        7(7)
/// ```
const COMPLEX_EDGES: [(usize, usize); 8] = [
    (0, 1),
    (0, 2),
    (2, 3),
    (1, 3),
    (3, 4),
    (3, 5),
    (4, 6),
    (5, 6),
];

pub(crate) fn complex_graph() -> NumberedGraph {
    complex_graph_starting_at(numbered_run_start())
}

pub(crate) fn complex_graph_starting_at(starting_time_of_run: Timestamp) -> NumberedGraph {
    let tasks = numbered(&COMPLEX_MINUTES);
    let tdg = TaskDependencyGraph::new(
        tasks.clone(),
        numbered_edges(&tasks, &COMPLEX_EDGES),
        starting_time_of_run,
    )
    .unwrap();
    NumberedGraph { tdg, tasks }
}

/// The complex tasks fed in shuffled order, wired differently:
///
/// ```text
///        1
///       / \
///      2   3
///       \ /
///        4
///       / \
///      5   6
///      |
///      7
/// ```
///
/// The edge 1 -> 3 is listed twice.
pub(crate) fn shuffled_complex_graph(starting_time_of_run: Timestamp) -> NumberedGraph {
    let tasks = numbered(&COMPLEX_MINUTES);
    let shuffled: Vec<TaskNode> = [3, 2, 6, 1, 0, 5, 4]
        .iter()
        .map(|&i| tasks[i].clone())
        .collect();
    let tdg = TaskDependencyGraph::new(
        shuffled,
        numbered_edges(
            &tasks,
            &[(0, 1), (0, 2), (2, 3), (1, 3), (3, 4), (0, 2), (3, 5), (4, 6)],
        ),
        starting_time_of_run,
    )
    .unwrap();
    NumberedGraph { tdg, tasks }
}

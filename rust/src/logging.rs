//! Stderr event log of the graph engine, gated by `GraphConfig::verbosity`.
//!
//! Each event kind has a threshold; a line is written when the configured
//! verbosity reaches it. Lines are prefixed with the event kind so a run with
//! full verbosity can still be filtered with grep:
//!
//! ```text
//! [tdg mutation] Added task 3f2c...
//! [tdg rejection] Rejected edge 9a1b...: adding ... would create a cycle
//! [tdg pass] Critical path length 76 min over 8 nodes
//! ```
//!
//! Verbosity 0 writes nothing and formats nothing.

use std::fmt;

/// Committed tasks and edges, sentinel rewiring, extracted sub-graphs.
pub const LOG_MUTATIONS: u8 = 1;
/// Mutations and extractions refused by validation.
pub const LOG_REJECTIONS: u8 = 2;
/// Per-pass details of the critical path and schedule computations.
pub const LOG_PASSES: u8 = 3;

/// True if events at `threshold` are written under `verbosity`.
#[inline]
pub fn enabled(verbosity: u8, threshold: u8) -> bool {
    threshold != 0 && verbosity >= threshold
}

/// A single log line for an event of the given kind.
pub fn line(kind: &str, message: fmt::Arguments<'_>) -> String {
    format!("[tdg {kind}] {message}")
}

#[doc(hidden)]
#[macro_export]
macro_rules! __graph_event {
    ($threshold:expr, $kind:literal, $verbosity:expr, $($arg:tt)*) => {
        if $crate::logging::enabled($verbosity, $threshold) {
            eprintln!("{}", $crate::logging::line($kind, format_args!($($arg)*)));
        }
    };
}

/// A change that was committed to a graph.
#[macro_export]
macro_rules! log_mutation {
    ($verbosity:expr, $($arg:tt)*) => {
        $crate::__graph_event!($crate::logging::LOG_MUTATIONS, "mutation", $verbosity, $($arg)*)
    };
}

/// A change or extraction that validation refused.
#[macro_export]
macro_rules! log_rejection {
    ($verbosity:expr, $($arg:tt)*) => {
        $crate::__graph_event!($crate::logging::LOG_REJECTIONS, "rejection", $verbosity, $($arg)*)
    };
}

/// Internals of a forward or backward pass.
#[macro_export]
macro_rules! log_pass {
    ($verbosity:expr, $($arg:tt)*) => {
        $crate::__graph_event!($crate::logging::LOG_PASSES, "pass", $verbosity, $($arg)*)
    };
}

//! Errors raised while scheduling steps onto the bus.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BusError {
    /// No pending step is currently placeable, and no compaction or shift
    /// could free up room for one. This is a logic error in the recipe
    /// graph (e.g. a genuine cycle), not a user mistake about throughput.
    #[error("bus is stuck: {pending_count} step(s) remain but none are placeable and no further compaction is possible")]
    Stuck { pending_count: usize },
    #[error("taking {amount} from empty line {line}")]
    EmptyLine { line: usize },
    #[error("line {line} only has {available} available, tried to take {amount}")]
    Overdrawn { line: usize, available: String, amount: String },
}

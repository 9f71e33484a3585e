//! Layouter errors.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LayoutError {
    #[error("entity {name:?} landed at negative position ({x}, {y}) after flattening")]
    NegativePosition { name: String, x: i64, y: i64 },
    #[error("entities {first:?} and {second:?} both claim tile ({x}, {y})")]
    Overlap { x: i64, y: i64, first: String, second: String },
    #[error("cannot route a horizontal line across {0} consecutive occupied bus indices")]
    Route(usize),
    #[error("fluid compaction with overflow is not supported")]
    UnsupportedFluidOverflow,
}

//! Render errors.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("entity at ({x}, {y}) is out of bounds (negative position)")]
    OutOfBounds { x: i64, y: i64 },
    #[error("overlapping art at ({x}, {y}): tried to draw {new:?} over {existing:?}")]
    Conflict { x: i64, y: i64, existing: char, new: char },
}

//! Lossy ANSI ascii-art renderer for a laid-out blueprint,
//! intended to aid debugging and exploration of designs.

pub mod ansi;
pub mod error;
pub mod glyphs;
pub mod renderer;

pub use error::RenderError;
pub use renderer::render;

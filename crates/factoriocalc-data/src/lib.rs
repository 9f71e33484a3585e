//! Recipe database loader: parses the plain-text grammar into a
//! [`factoriocalc_core::registry::Registry`].

pub mod grammar;
pub mod loader;

pub use loader::{load_file, load_str};

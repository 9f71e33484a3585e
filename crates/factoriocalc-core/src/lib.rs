//! Factoriocalc Core -- rational arithmetic, recipe/building/module
//! records, the write-once registry, and the recipe resolver that every
//! later compiler stage depends on.
//!
//! # Key Types
//!
//! - [`rational::Rat`] -- the exact rational type used everywhere until
//!   the final rendering boundary.
//! - [`item::Item`] -- a cheap-to-clone, case-insensitive item name.
//! - [`records::{Building, Module, Recipe, ResolvedRecipe}`] -- the
//!   immutable data model.
//! - [`registry::Registry`] -- write-once store of every declared
//!   building/module/recipe, built via [`registry::RegistryBuilder`].
//! - [`resolver::resolve_recipe`] -- resolves a [`records::Recipe`]
//!   against a module priority list and beacon bonus.
//! - [`config::InvocationConfig`] -- the full invocation surface.

pub mod capacity;
pub mod config;
pub mod error;
pub mod item;
pub mod rational;
pub mod records;
pub mod registry;
pub mod resolver;

pub use capacity::{line_limit, BeltType, PIPE_LIMIT};
pub use config::InvocationConfig;
pub use error::{ConfigError, DemandError};
pub use item::Item;
pub use rational::{rat, ratio, Rat};
pub use records::{Building, Module, Recipe, ResolvedRecipe};
pub use registry::{Registry, RegistryBuilder};
pub use resolver::resolve_recipe;

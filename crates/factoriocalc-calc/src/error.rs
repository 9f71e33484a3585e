//! Errors produced while solving a demand tree or balancing oil.

use factoriocalc_core::{ConfigError, DemandError, Item};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CalcError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Demand(#[from] DemandError),
    #[error("oil balancing requires a {0:?} recipe in the database")]
    MissingOilRecipe(String),
    #[error("recipe {0} is required as a plain input but is declared `is virtual`")]
    UnexpectedVirtualRecipe(Item),
}

//! Error taxonomy shared by every stage of the compiler.
//!
//! Each stage gets its own error enum so callers can match on the precise
//! failure; the driver crate unifies them into one top-level error.

use crate::item::Item;
use crate::rational::Rat;
use thiserror::Error;

/// Malformed database line, duplicate declaration, unknown module, or a
/// recipe referencing an undeclared building.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("building {0:?} already declared")]
    DuplicateBuilding(String),
    #[error("recipe for {0:?} already declared")]
    DuplicateRecipe(String),
    #[error("module {0:?} already declared")]
    DuplicateModule(String),
    #[error("unknown module {0:?}")]
    UnknownModule(String),
    #[error("recipe {recipe:?} is built in {building:?}, but no such building is declared")]
    UnknownBuilding { recipe: String, building: String },
    #[error("malformed line {line_no} in {file:?}: {line:?}")]
    MalformedLine {
        file: String,
        line_no: usize,
        line: String,
    },
    #[error("could not read {path:?}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::sync::Arc<std::io::Error>,
    },
}

/// Request contains an item the registry cannot produce and which is not
/// listed as a stop item, or an oil surplus that cannot be disposed of.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DemandError {
    #[error("no recipe for {0} and it is not a stop item")]
    UnknownItem(Item),
    #[error("two processes for {item} disagree on resolved recipe")]
    ConflictingResolution { item: Item },
    #[error("unresolvable surplus of {item}: {amount}")]
    UnresolvableSurplus { item: Item, amount: Rat },
}

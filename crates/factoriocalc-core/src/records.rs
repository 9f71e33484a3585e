//! Immutable data records: [`Building`], [`Module`], [`Recipe`],
//! and the derived [`ResolvedRecipe`]. Loaded once by `factoriocalc-data`
//! and never mutated afterwards.

use crate::item::Item;
use crate::rational::Rat;
use std::collections::BTreeMap;

/// A building template: an assembler, furnace, chemical plant, refinery,
/// rocket silo, etc.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Building {
    pub name: String,
    /// Base crafting speed at zero modules/beacons.
    pub speed: Rat,
    pub module_slots: u32,
    pub can_beacon: bool,
}

/// A module: a speed/productivity/efficiency modifier installed in a
/// building's module slots. Effects are additive bonuses, not multipliers.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Module {
    pub name: String,
    pub speed_effect: Rat,
    pub productivity_effect: Rat,
}

/// A generic (unresolved) recipe: throughput and inputs are given at base
/// building speed, with no productivity or module bonuses applied.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Recipe {
    /// The recipe name, which is also the name of its (non-virtual) output
    /// item.
    pub name: Item,
    pub building: String,
    /// Outputs per second at base speed, one building, no productivity.
    pub throughput: Rat,
    /// Amount of each input consumed per output produced, before
    /// productivity.
    pub inputs: BTreeMap<Item, Rat>,
    pub can_prod: bool,
    /// Extra seconds added per output, unaffected by speed or productivity
    /// (used by recipes with a fixed delay component, e.g. rocket launches).
    pub delay: Rat,
    /// Inputs that are consumed per output regardless of productivity
    /// (productivity modules reduce the "real" inputs but not these).
    pub fixed_inputs: BTreeMap<Item, Rat>,
    /// True for bookkeeping recipes with no physical output (e.g. the
    /// synthetic oil cracking recipes the calculator stitches in).
    pub is_virtual: bool,
}

/// A [`Recipe`] frozen for one particular (module priority list, beacon
/// speed) resolution.
///
/// Invariant: `throughput = 1 / (delay + 1/(base_throughput * speed_factor *
/// prod_factor))`.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ResolvedRecipe {
    pub name: Item,
    pub building: String,
    pub throughput: Rat,
    pub inputs: BTreeMap<Item, Rat>,
    pub mods: Vec<String>,
}

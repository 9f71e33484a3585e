//! [`Process`]: the production of one item at a required throughput, the
//! unit the calculator, step splitter, and bus scheduler all operate on.

use crate::error::CalcError;
use factoriocalc_core::rational::rat;
use factoriocalc_core::{Item, Rat, ResolvedRecipe};
use std::collections::{BTreeMap, BTreeSet};

/// The production of a single item at a required throughput.
///
/// `recipe` is `None` for raw inputs (including the oil-balancing
/// pass-through items, which behave like raw inputs except for their
/// [`Process::extra_deps`]). `per_process_outputs` records how much of each
/// item one "run" of this process yields; it is `{item: 1}` for ordinary
/// processes and empty for bookkeeping-only virtual recipes (the oil
/// products / cracking processes), which have no physical output of their
/// own -- their real outputs are modelled as separate pass-through
/// processes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Process {
    pub item: Item,
    pub recipe: Option<ResolvedRecipe>,
    pub throughput: Rat,
    pub per_process_outputs: BTreeMap<Item, Rat>,
    /// Extra DAG dependencies beyond `recipe.inputs`, used to order the oil
    /// pass-through processes after their producer even though they have no
    /// recipe of their own to carry the link.
    pub extra_deps: BTreeSet<Item>,
}

impl Process {
    pub fn new(item: Item, recipe: Option<ResolvedRecipe>, throughput: Rat) -> Self {
        Self::with_virtual(item, recipe, throughput, false)
    }

    pub fn with_virtual(item: Item, recipe: Option<ResolvedRecipe>, throughput: Rat, is_virtual: bool) -> Self {
        let per_process_outputs = if is_virtual {
            BTreeMap::new()
        } else {
            let mut m = BTreeMap::new();
            m.insert(item.clone(), rat(1));
            m
        };
        Process {
            item,
            recipe,
            throughput,
            per_process_outputs,
            extra_deps: BTreeSet::new(),
        }
    }

    pub fn with_extra_deps(mut self, deps: impl IntoIterator<Item = Item>) -> Self {
        self.extra_deps.extend(deps);
        self
    }

    /// Buildings required to sustain `throughput`, or `None` for raw inputs.
    pub fn buildings(&self) -> Option<Rat> {
        self.recipe.as_ref().map(|r| self.throughput / r.throughput)
    }

    /// `{item: throughput required}` for each input, or `None` for raw
    /// inputs.
    pub fn inputs(&self) -> Option<BTreeMap<Item, Rat>> {
        self.recipe
            .as_ref()
            .map(|r| r.inputs.iter().map(|(item, per_unit)| (item.clone(), *per_unit * self.throughput)).collect())
    }

    /// Items this process depends on: its recipe's inputs plus any
    /// [`Process::extra_deps`].
    pub fn depends(&self) -> BTreeSet<Item> {
        let mut deps: BTreeSet<Item> = self
            .recipe
            .as_ref()
            .map(|r| r.inputs.keys().cloned().collect())
            .unwrap_or_default();
        deps.extend(self.extra_deps.iter().cloned());
        deps
    }
}

/// Merge `b` into `a`, summing throughput for items present in both. Two
/// processes for the same item must agree on their resolved recipe.
pub fn merge_into(a: &mut BTreeMap<Item, Process>, b: BTreeMap<Item, Process>) -> Result<(), CalcError> {
    for (item, incoming) in b {
        match a.get_mut(&item) {
            Some(existing) => {
                if existing.recipe != incoming.recipe {
                    return Err(factoriocalc_core::DemandError::ConflictingResolution { item }.into());
                }
                existing.throughput += incoming.throughput;
                existing.extra_deps.extend(incoming.extra_deps);
            }
            None => {
                a.insert(item, incoming);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use factoriocalc_core::rational::ratio;
    use std::collections::BTreeMap as Map;

    fn resolved(name: &str, throughput: Rat, inputs: Map<Item, Rat>) -> ResolvedRecipe {
        ResolvedRecipe {
            name: Item::new(name),
            building: "assembler".to_string(),
            throughput,
            inputs,
            mods: Vec::new(),
        }
    }

    #[test]
    fn raw_process_has_no_buildings_or_inputs() {
        let p = Process::new(Item::new("iron ore"), None, rat(10));
        assert_eq!(p.buildings(), None);
        assert_eq!(p.inputs(), None);
        assert!(p.depends().is_empty());
    }

    #[test]
    fn normal_process_computes_scaled_inputs_and_buildings() {
        let mut inputs = Map::new();
        inputs.insert(Item::new("iron plate"), rat(2));
        let recipe = resolved("gear", rat(2), inputs);
        let p = Process::new(Item::new("gear"), Some(recipe), rat(10));
        assert_eq!(p.buildings(), Some(rat(5)));
        assert_eq!(p.inputs().unwrap()[&Item::new("iron plate")], rat(20));
        assert_eq!(p.depends(), [Item::new("iron plate")].into_iter().collect());
    }

    #[test]
    fn virtual_process_has_no_self_output() {
        let recipe = resolved("oil products", rat(1), Map::new());
        let p = Process::with_virtual(Item::new("oil products"), Some(recipe), ratio(3, 2), true);
        assert!(p.per_process_outputs.is_empty());
    }

    #[test]
    fn merge_sums_throughput_for_matching_recipe() {
        let mut a = Map::new();
        a.insert(Item::new("iron ore"), Process::new(Item::new("iron ore"), None, rat(5)));
        let mut b = Map::new();
        b.insert(Item::new("iron ore"), Process::new(Item::new("iron ore"), None, rat(3)));
        merge_into(&mut a, b).unwrap();
        assert_eq!(a[&Item::new("iron ore")].throughput, rat(8));
    }

    #[test]
    fn merge_rejects_conflicting_recipes() {
        let mut inputs = Map::new();
        inputs.insert(Item::new("iron plate"), rat(2));
        let mut a = Map::new();
        a.insert(
            Item::new("gear"),
            Process::new(Item::new("gear"), Some(resolved("gear", rat(2), inputs.clone())), rat(4)),
        );
        let mut b = Map::new();
        b.insert(
            Item::new("gear"),
            Process::new(Item::new("gear"), Some(resolved("gear", rat(3), inputs)), rat(4)),
        );
        let err = merge_into(&mut a, b).unwrap_err();
        assert!(matches!(err, CalcError::Demand(factoriocalc_core::DemandError::ConflictingResolution { .. })));
    }
}

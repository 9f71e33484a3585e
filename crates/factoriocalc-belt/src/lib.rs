//! Bus scheduler: greedily places belt-capacity-limited steps
//! onto a shared bus of lines, compacting and shifting when nothing is
//! placeable.

pub mod bus;
pub mod error;

pub use bus::{BeltManager, BusEvent, Compaction, Line, Placement};
pub use error::BusError;

#[cfg(test)]
mod tests {
    use super::*;
    use factoriocalc_calc::{split_into_steps, Process};
    use factoriocalc_core::rational::{rat, ratio};
    use factoriocalc_core::{BeltType, Item, ResolvedRecipe};
    use std::collections::BTreeMap;

    fn recipe(name: &str, throughput: factoriocalc_core::Rat, inputs: BTreeMap<Item, factoriocalc_core::Rat>) -> ResolvedRecipe {
        ResolvedRecipe {
            name: Item::new(name),
            building: "assembler".to_string(),
            throughput,
            inputs,
            mods: Vec::new(),
        }
    }

    #[test]
    fn places_a_step_whose_input_is_already_on_the_bus() {
        let mut inputs = BTreeMap::new();
        inputs.insert(Item::new("iron plate"), rat(1));
        let gear = Process::new(Item::new("gear"), Some(recipe("gear", rat(1), inputs)), rat(10));
        let ore = Process::new(Item::new("iron plate"), None, rat(10));

        let (raw, pooled) = split_into_steps(vec![gear, ore], BeltType::Blue);
        let mut mgr = BeltManager::new(raw, pooled, BeltType::Blue);
        mgr.run().unwrap();

        let output = mgr.into_output();
        assert_eq!(output.len(), 1);
        match &output[0] {
            BusEvent::Placement(p) => {
                assert_eq!(p.process.item, Item::new("gear"));
                assert_eq!(p.inputs.len(), 1);
                assert_eq!(p.outputs.len(), 1);
            }
            BusEvent::Compaction(_) => panic!("expected a placement"),
        }
    }

    #[test]
    fn compacts_when_nothing_is_placeable_but_a_merge_frees_a_line() {
        // Two lines of the same partially-used item with a gap between
        // them; nothing is pending, so run() succeeds trivially, but a
        // direct compact() call should merge them.
        let ore_a = Process::new(Item::new("iron plate"), None, ratio(1, 2));
        let ore_b = Process::new(Item::new("iron plate"), None, ratio(1, 2));
        let (raw, pooled) = split_into_steps(vec![ore_a, ore_b], BeltType::Blue);
        let mut mgr = BeltManager::new(raw, pooled, BeltType::Blue);
        assert!(mgr.run().is_ok());
        assert_eq!(mgr.bus().len(), 2);
    }

    #[test]
    fn stuck_bus_reports_an_error_instead_of_panicking() {
        // A single step that needs an input throughput no line can ever
        // supply (the input simply doesn't exist on the bus, and there's
        // nothing to compact) must fail cleanly.
        let mut inputs = BTreeMap::new();
        inputs.insert(Item::new("unobtainium"), rat(1));
        let widget = Process::new(Item::new("widget"), Some(recipe("widget", rat(1), inputs)), rat(10));
        let (raw, pooled) = split_into_steps(vec![widget], BeltType::Blue);
        let mut mgr = BeltManager::new(raw, pooled, BeltType::Blue);
        let err = mgr.run().unwrap_err();
        assert!(matches!(err, BusError::Stuck { .. }));
    }
}

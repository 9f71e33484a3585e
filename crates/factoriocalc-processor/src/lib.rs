//! Catalogue of parameterized tile patterns matched against a step's
//! recipe shape and laid out as head + N bodies + tail.

pub mod catalogue;
pub mod classify;
pub mod error;
pub mod processor;

pub use catalogue::default_catalogue;
pub use classify::classify;
pub use error::{ProcessorError, Signature};
pub use processor::{find_processor, Processor};

#[cfg(test)]
mod tests {
    use super::*;
    use factoriocalc_calc::{Process, Step};
    use factoriocalc_core::rational::rat;
    use factoriocalc_core::records::ResolvedRecipe;
    use factoriocalc_core::{BeltType, Item};
    use std::collections::BTreeMap;

    fn gear_step() -> Step {
        let mut inputs = BTreeMap::new();
        inputs.insert(Item::new("iron plate"), rat(2));
        let recipe = ResolvedRecipe {
            name: Item::new("gear"),
            building: "assembler".into(),
            throughput: rat(10),
            inputs,
            mods: vec![],
        };
        let process = Process::new(Item::new("gear"), Some(recipe), rat(10));
        Step { process }
    }

    #[test]
    fn finds_the_one_to_one_processor_for_a_simple_recipe() {
        let step = gear_step();
        let catalogue = default_catalogue();
        let processor = find_processor(catalogue, &step, BeltType::Blue).unwrap();
        assert_eq!(processor.name, "1 -> 1");
    }

    #[test]
    fn lays_out_the_matched_processor_without_error() {
        let step = gear_step();
        let catalogue = default_catalogue();
        let processor = find_processor(catalogue, &step, BeltType::Blue).unwrap();
        let (layout, width, oversize) = processor.layout(&step).unwrap();
        assert!(width > 0);
        assert_eq!(oversize, 0);
        assert!(!layout.flatten_permissive().is_empty());
    }

    #[test]
    fn no_refinery_processor_matches_a_solid_recipe() {
        let step = gear_step();
        let catalogue = default_catalogue();
        for processor in catalogue {
            if processor.buildings == ["refinery"].as_slice() {
                assert!(processor.match_score("assembler", Signature { liquid: 0, belt: 1, half_belt: 0 }, Signature { liquid: 0, belt: 1, half_belt: 0 }).is_none());
            }
        }
    }
}

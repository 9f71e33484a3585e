//! Classifies a step's inputs/outputs into `(liquid, belt, half-belt)`
//! counts, the shape a [`crate::Processor`] is matched against.

use crate::error::Signature;
use factoriocalc_calc::Step;
use factoriocalc_core::capacity::line_limit;
use factoriocalc_core::BeltType;

fn classify_one(total: &std::collections::BTreeMap<factoriocalc_core::Item, factoriocalc_core::Rat>, belt_type: BeltType) -> Signature {
    let mut sig = Signature { liquid: 0, belt: 0, half_belt: 0 };
    for (item, &rate) in total {
        if item.is_liquid() {
            sig.liquid += 1;
            continue;
        }
        let limit = line_limit(item, belt_type);
        if rate * 2 <= limit {
            sig.half_belt += 1;
        } else {
            sig.belt += 1;
        }
    }
    sig
}

/// The `(inputs, outputs)` signature a step presents to the processor
/// matcher.
pub fn classify(step: &Step, belt_type: BeltType) -> (Signature, Signature) {
    let inputs = classify_one(&step.inputs(), belt_type);
    let outputs = classify_one(&step.outputs(), belt_type);
    (inputs, outputs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use factoriocalc_calc::Process;
    use factoriocalc_core::rational::rat;
    use factoriocalc_core::records::ResolvedRecipe;
    use factoriocalc_core::Item;
    use std::collections::BTreeMap;

    #[test]
    fn half_belt_items_are_distinguished_from_full_belt() {
        let mut inputs = BTreeMap::new();
        inputs.insert(Item::new("iron plate"), rat(10));
        let recipe = ResolvedRecipe {
            name: Item::new("gear"),
            building: "assembler".into(),
            throughput: rat(10),
            inputs,
            mods: vec![],
        };
        let process = Process::new(Item::new("gear"), Some(recipe), rat(10));
        let step = Step { process };
        let (sig_in, sig_out) = classify(&step, BeltType::Blue);
        assert_eq!(sig_in.half_belt, 1);
        assert_eq!(sig_out.half_belt, 1);
    }
}

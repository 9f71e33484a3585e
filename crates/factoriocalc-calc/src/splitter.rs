//! The step splitter: fragments a [`Process`] into belt/pipe
//! capacity-limited steps.

use crate::process::Process;
use factoriocalc_core::capacity::line_limit;
use factoriocalc_core::rational::rat;
use factoriocalc_core::{BeltType, Rat};

/// One belt/pipe-capacity-limited fragment of a [`Process`], scaled down
/// from its parent's throughput.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub process: Process,
}

impl Step {
    /// `{item: throughput}` for each input this step needs, or an empty map
    /// for raw-input steps.
    pub fn inputs(&self) -> std::collections::BTreeMap<factoriocalc_core::Item, Rat> {
        self.process.inputs().unwrap_or_default()
    }

    /// `{item: throughput}` for each output this step produces.
    pub fn outputs(&self) -> std::collections::BTreeMap<factoriocalc_core::Item, Rat> {
        self.process
            .per_process_outputs
            .iter()
            .map(|(item, per_unit)| (item.clone(), *per_unit * self.process.throughput))
            .collect()
    }
}

/// Split every process in `processes` into steps.3. Raw-input
/// processes (no recipe) are returned separately, in the order they were
/// given; the rest form an unordered pool.
pub fn split_into_steps(processes: Vec<Process>, belt_type: BeltType) -> (Vec<Step>, Vec<Step>) {
    let mut raw_steps = Vec::new();
    let mut pooled_steps = Vec::new();
    for process in processes {
        let steps = split_one(&process, belt_type);
        if process.recipe.is_none() {
            raw_steps.extend(steps);
        } else {
            pooled_steps.extend(steps);
        }
    }
    (raw_steps, pooled_steps)
}

fn split_one(process: &Process, belt_type: BeltType) -> Vec<Step> {
    let mut ratios: Vec<Rat> = Vec::new();

    if let Some(recipe) = &process.recipe {
        for (item, per_unit) in &recipe.inputs {
            let rate = *per_unit * process.throughput;
            ratios.push(rate / line_limit(item, belt_type));
        }
    }
    for (item, per_unit) in &process.per_process_outputs {
        let rate = *per_unit * process.throughput;
        ratios.push(rate / line_limit(item, belt_type));
    }

    let steps_needed = ratios.into_iter().fold(rat(0), |max, r| if r > max { r } else { max });
    if steps_needed <= rat(0) {
        return vec![Step { process: process.clone() }];
    }

    let full_steps = steps_needed.floor().to_integer();
    let per_full_step_throughput = process.throughput / steps_needed;

    let mut out = Vec::with_capacity(full_steps as usize + 1);
    for _ in 0..full_steps {
        out.push(Step {
            process: rescaled(process, per_full_step_throughput),
        });
    }
    let emitted = per_full_step_throughput * rat(full_steps);
    let remainder = process.throughput - emitted;
    if remainder > rat(0) {
        out.push(Step {
            process: rescaled(process, remainder),
        });
    }
    out
}

fn rescaled(process: &Process, throughput: Rat) -> Process {
    let mut scaled = process.clone();
    scaled.throughput = throughput;
    scaled
}

#[cfg(test)]
mod tests {
    use super::*;
    use factoriocalc_core::{Item, ResolvedRecipe};
    use std::collections::BTreeMap;

    fn recipe(inputs: BTreeMap<Item, Rat>) -> ResolvedRecipe {
        ResolvedRecipe {
            name: Item::new("widget"),
            building: "assembler".to_string(),
            throughput: rat(1),
            inputs,
            mods: Vec::new(),
        }
    }

    #[test]
    fn under_capacity_process_stays_whole() {
        let mut inputs = BTreeMap::new();
        inputs.insert(Item::new("iron plate"), rat(1));
        let p = Process::new(Item::new("widget"), Some(recipe(inputs)), rat(10));
        let (_, pooled) = split_into_steps(vec![p], BeltType::Blue);
        assert_eq!(pooled.len(), 1);
        assert_eq!(pooled[0].process.throughput, rat(10));
    }

    #[test]
    fn over_capacity_process_splits_into_full_steps_plus_remainder() {
        let mut inputs = BTreeMap::new();
        // one belt (45/s) of iron plate per widget; requesting 100/s needs
        // 100/45 = 2.222 belts.
        inputs.insert(Item::new("iron plate"), rat(1));
        let p = Process::new(Item::new("widget"), Some(recipe(inputs)), rat(100));
        let (_, pooled) = split_into_steps(vec![p], BeltType::Blue);
        assert_eq!(pooled.len(), 3);
        assert_eq!(pooled[0].process.throughput, rat(45));
        assert_eq!(pooled[1].process.throughput, rat(45));
        assert_eq!(pooled[2].process.throughput, rat(10));
        let total: Rat = pooled.iter().map(|s| s.process.throughput).sum();
        assert_eq!(total, rat(100));
    }

    #[test]
    fn raw_inputs_are_kept_separate_and_in_order() {
        let ore = Process::new(Item::new("iron ore"), None, rat(10));
        let copper = Process::new(Item::new("copper ore"), None, rat(5));
        let (raw, pooled) = split_into_steps(vec![ore, copper], BeltType::Blue);
        assert_eq!(raw.len(), 2);
        assert!(pooled.is_empty());
        assert_eq!(raw[0].process.item, Item::new("iron ore"));
        assert_eq!(raw[1].process.item, Item::new("copper ore"));
    }
}

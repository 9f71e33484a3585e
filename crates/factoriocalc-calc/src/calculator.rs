//! The recipe-tree calculator and oil balancer, grounded on the
//! original `Calculator.solve`/`solve_oil`/`solve_with_oil`.

use crate::error::CalcError;
use crate::process::{merge_into, Process};
use factoriocalc_core::rational::rat;
use factoriocalc_core::{resolve_recipe, InvocationConfig, Item, Rat, Registry};
use std::collections::{BTreeMap, BTreeSet};

const HEAVY_PER_PROCESS: i64 = 10;
const LIGHT_PER_PROCESS: i64 = 45;
const PETROL_PER_PROCESS: i64 = 55;

/// Resolves a demand tree against a frozen [`Registry`], and folds in the
/// oil-products special case.
pub struct Calculator {
    registry: Registry,
    stop_items: BTreeSet<Item>,
    module_priorities: Vec<String>,
    beacon_speed: Rat,
    oil_beacon_speed: Rat,
}

impl Calculator {
    pub fn new(registry: Registry, config: &InvocationConfig) -> Self {
        Calculator {
            registry,
            stop_items: config.stop_items.iter().cloned().collect(),
            module_priorities: config.module_priorities.clone(),
            beacon_speed: config.beacon_speed,
            oil_beacon_speed: config.effective_oil_beacon_speed(),
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Resolve `item` at the given `throughput` into a process tree:
    /// itself plus every transitive input, keyed by item.
    pub fn solve(&self, item: &Item, throughput: Rat) -> Result<BTreeMap<Item, Process>, CalcError> {
        if self.stop_items.contains(item) || !self.registry.has_recipe(item) {
            let mut result = BTreeMap::new();
            result.insert(item.clone(), Process::new(item.clone(), None, throughput));
            return Ok(result);
        }
        let recipe = self.registry.recipe(item).expect("has_recipe checked above");
        let resolved = resolve_recipe(&self.registry, recipe, &self.module_priorities, self.beacon_speed)?;
        let mut result = BTreeMap::new();
        result.insert(item.clone(), Process::with_virtual(item.clone(), Some(resolved.clone()), throughput, recipe.is_virtual));
        for (input, per_unit) in &resolved.inputs {
            let sub = self.solve(input, *per_unit * throughput)?;
            merge_into(&mut result, sub)?;
        }
        Ok(result)
    }

    /// Solve for every item in `items`, merging the resulting trees.
    pub fn solve_all(&self, items: &BTreeMap<Item, Rat>) -> Result<BTreeMap<Item, Process>, CalcError> {
        let mut results = BTreeMap::new();
        for (item, throughput) in items {
            let sub = self.solve(item, *throughput)?;
            merge_into(&mut results, sub)?;
        }
        Ok(results)
    }

    /// Replace bare `heavy oil`/`light oil`/`petroleum` demand with an `oil
    /// products` refinery process plus cracking processes, balancing the
    /// three streams. Returns the updated process map and any
    /// additional raw demand (crude oil, water) to fold back through
    /// [`Calculator::solve_all`].
    pub fn solve_oil(&self, mut processes: BTreeMap<Item, Process>) -> Result<(BTreeMap<Item, Process>, BTreeMap<Item, Rat>), CalcError> {
        let heavy = rat(HEAVY_PER_PROCESS);
        let light = rat(LIGHT_PER_PROCESS);
        let petrol = rat(PETROL_PER_PROCESS);

        let oil_products = Item::new("oil products");
        let heavy_crack_name = Item::new("heavy oil cracking");
        let light_crack_name = Item::new("light oil cracking");
        let heavy_oil = Item::new("heavy oil");
        let light_oil = Item::new("light oil");
        let petroleum = Item::new("petroleum");

        let refinery_recipe = self
            .registry
            .recipe(&oil_products)
            .ok_or_else(|| CalcError::MissingOilRecipe("oil products".to_string()))?;
        let refinery_resolved = resolve_recipe(&self.registry, refinery_recipe, &self.module_priorities, self.oil_beacon_speed)?;

        let heavy_crack_recipe = self
            .registry
            .recipe(&heavy_crack_name)
            .ok_or_else(|| CalcError::MissingOilRecipe("heavy oil cracking".to_string()))?;
        let heavy_crack_resolved = resolve_recipe(&self.registry, heavy_crack_recipe, &self.module_priorities, self.beacon_speed)?;

        let light_crack_recipe = self
            .registry
            .recipe(&light_crack_name)
            .ok_or_else(|| CalcError::MissingOilRecipe("light oil cracking".to_string()))?;
        let light_crack_resolved = resolve_recipe(&self.registry, light_crack_recipe, &self.module_priorities, self.beacon_speed)?;

        let light_per_heavy = rat(1) / heavy_crack_resolved.inputs[&heavy_oil];
        let petrol_per_light = rat(1) / light_crack_resolved.inputs[&light_oil];

        let mut excesses: BTreeMap<Item, Rat> = BTreeMap::new();
        let mut heavy_cracking = rat(0);
        let mut light_cracking = rat(0);

        let heavy_needed = processes.remove(&heavy_oil).map(|p| p.throughput).unwrap_or_else(|| rat(0));
        let light_needed = processes.remove(&light_oil).map(|p| p.throughput).unwrap_or_else(|| rat(0));
        let petrol_needed = processes.remove(&petroleum).map(|p| p.throughput).unwrap_or_else(|| rat(0));

        // Heavy oil has no other source, so it sets an absolute minimum on
        // oil processing.
        let mut oil_processing = heavy_needed / heavy;

        let extra_light = light_needed - oil_processing * light;
        if extra_light < rat(0) {
            excesses.insert(light_oil.clone(), extra_light);
        } else {
            let total_light_per_process = light + heavy * light_per_heavy;
            let processing_for_light = extra_light / total_light_per_process;
            let light_from_cracking = extra_light - processing_for_light * light;
            oil_processing += processing_for_light;
            heavy_cracking += light_from_cracking;
        }

        let extra_petrol = petrol_needed - oil_processing * petrol;
        if extra_petrol < rat(0) {
            excesses.insert(petroleum.clone(), extra_petrol);
        } else {
            let light_surplus = -*excesses.get(&light_oil).unwrap_or(&rat(0));
            let petrol_available = light_surplus * petrol_per_light;
            if petrol_available > extra_petrol {
                *excesses.entry(light_oil.clone()).or_insert_with(|| rat(0)) += extra_petrol / petrol_per_light;
                light_cracking += extra_petrol;
            } else {
                let extra_petrol = extra_petrol - petrol_available;
                light_cracking += petrol_available;
                excesses.remove(&light_oil);

                let total_petrol_per_process = petrol + petrol_per_light * (light + light_per_heavy * heavy);
                let processing_for_petrol = extra_petrol / total_petrol_per_process;
                let petrol_from_cracking = extra_petrol - processing_for_petrol * petrol;
                let light_to_crack = petrol_from_cracking / petrol_per_light;
                let light_from_cracking = light_to_crack - processing_for_petrol * light;

                oil_processing += processing_for_petrol;
                heavy_cracking += light_from_cracking;
                light_cracking += petrol_from_cracking;
            }
        }

        // Any surplus still on the books after cracking cannot be disposed
        // of automatically.
        for (item, amount) in &excesses {
            if *amount != rat(0) {
                return Err(factoriocalc_core::DemandError::UnresolvableSurplus {
                    item: item.clone(),
                    amount: *amount,
                }
                .into());
            }
        }

        let mut new_processes: BTreeMap<Item, Process> = BTreeMap::new();
        if oil_processing > rat(0) {
            new_processes.insert(
                oil_products.clone(),
                Process::with_virtual(oil_products.clone(), Some(refinery_resolved), oil_processing, true),
            );
        }
        if heavy_cracking > rat(0) {
            new_processes.insert(
                heavy_crack_name.clone(),
                Process::with_virtual(heavy_crack_name.clone(), Some(heavy_crack_resolved), heavy_cracking, true),
            );
        }
        if light_cracking > rat(0) {
            new_processes.insert(
                light_crack_name.clone(),
                Process::with_virtual(light_crack_name.clone(), Some(light_crack_resolved), light_cracking, true),
            );
        }
        if oil_processing > rat(0) {
            new_processes.insert(
                heavy_oil.clone(),
                Process::new(heavy_oil.clone(), None, oil_processing * heavy).with_extra_deps([oil_products.clone()]),
            );
            new_processes.insert(
                light_oil.clone(),
                Process::new(light_oil.clone(), None, oil_processing * light)
                    .with_extra_deps([oil_products.clone(), heavy_crack_name.clone()]),
            );
            new_processes.insert(
                petroleum.clone(),
                Process::new(petroleum.clone(), None, oil_processing * petrol)
                    .with_extra_deps([oil_products.clone(), light_crack_name.clone()]),
            );
        }

        let mut new_inputs: BTreeMap<Item, Rat> = excesses;
        for item in [&oil_products, &heavy_crack_name, &light_crack_name] {
            if let Some(process) = new_processes.get(item) {
                if let Some(inputs) = process.inputs() {
                    for (k, v) in inputs {
                        *new_inputs.entry(k).or_insert_with(|| rat(0)) += v;
                    }
                }
            }
        }

        merge_into(&mut processes, new_processes)?;
        Ok((processes, new_inputs))
    }

    /// `solve_all` followed by `solve_oil`, with the additional raw demand
    /// it surfaces folded back in.
    pub fn solve_with_oil(&self, items: &BTreeMap<Item, Rat>) -> Result<BTreeMap<Item, Process>, CalcError> {
        let results = self.solve_all(items)?;
        let (mut results, further_inputs) = self.solve_oil(results)?;
        if !further_inputs.is_empty() {
            let extra = self.solve_all(&further_inputs)?;
            merge_into(&mut results, extra)?;
        }
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use factoriocalc_core::rational::ratio;
    use factoriocalc_core::registry::RegistryBuilder;
    use factoriocalc_core::{Building, Recipe};
    use std::collections::BTreeMap as Map;

    fn building(name: &str, slots: u32) -> Building {
        Building {
            name: name.to_string(),
            speed: rat(1),
            module_slots: slots,
            can_beacon: true,
        }
    }

    fn simple_registry() -> Registry {
        let mut b = RegistryBuilder::new();
        b.register_building(building("assembler", 0)).unwrap();
        b.register_building(building("furnace", 0)).unwrap();
        b.register_recipe(Recipe {
            name: Item::new("iron plate"),
            building: "furnace".to_string(),
            throughput: rat(1),
            inputs: Map::new(),
            can_prod: false,
            delay: rat(0),
            fixed_inputs: Map::new(),
            is_virtual: false,
        })
        .unwrap();
        let mut inputs = Map::new();
        inputs.insert(Item::new("iron plate"), rat(2));
        b.register_recipe(Recipe {
            name: Item::new("gear"),
            building: "assembler".to_string(),
            throughput: rat(2),
            inputs,
            can_prod: false,
            delay: rat(0),
            fixed_inputs: Map::new(),
            is_virtual: false,
        })
        .unwrap();
        b.build().unwrap()
    }

    #[test]
    fn solves_a_simple_chain() {
        let cfg = InvocationConfig {
            module_priorities: Vec::new(),
            ..InvocationConfig::default()
        };
        let calc = Calculator::new(simple_registry(), &cfg);
        let result = calc.solve(&Item::new("gear"), rat(10)).unwrap();
        assert_eq!(result[&Item::new("gear")].throughput, rat(10));
        assert_eq!(result[&Item::new("iron plate")].throughput, rat(20));
        assert!(result[&Item::new("iron plate")].recipe.is_some());
    }

    #[test]
    fn stop_item_is_treated_as_raw() {
        let cfg = InvocationConfig {
            module_priorities: Vec::new(),
            stop_items: vec![Item::new("iron plate")],
            ..InvocationConfig::default()
        };
        let calc = Calculator::new(simple_registry(), &cfg);
        let result = calc.solve(&Item::new("gear"), rat(10)).unwrap();
        assert!(result[&Item::new("iron plate")].recipe.is_none());
    }

    fn oil_registry() -> Registry {
        let mut b = RegistryBuilder::new();
        b.register_building(building("refinery", 0)).unwrap();
        b.register_building(building("chemical plant", 0)).unwrap();

        let mut refinery_inputs = Map::new();
        refinery_inputs.insert(Item::new("crude oil"), rat(100));
        refinery_inputs.insert(Item::new("water"), rat(50));
        b.register_recipe(Recipe {
            name: Item::new("oil products"),
            building: "refinery".to_string(),
            throughput: rat(1),
            inputs: refinery_inputs,
            can_prod: false,
            delay: rat(0),
            fixed_inputs: Map::new(),
            is_virtual: true,
        })
        .unwrap();

        let mut heavy_crack_inputs = Map::new();
        heavy_crack_inputs.insert(Item::new("heavy oil"), ratio_40_30());
        heavy_crack_inputs.insert(Item::new("water"), rat(1));
        b.register_recipe(Recipe {
            name: Item::new("heavy oil cracking"),
            building: "chemical plant".to_string(),
            throughput: rat(30),
            inputs: heavy_crack_inputs,
            can_prod: false,
            delay: rat(0),
            fixed_inputs: Map::new(),
            is_virtual: true,
        })
        .unwrap();

        let mut light_crack_inputs = Map::new();
        light_crack_inputs.insert(Item::new("light oil"), ratio_30_20());
        light_crack_inputs.insert(Item::new("water"), ratio(3, 2));
        b.register_recipe(Recipe {
            name: Item::new("light oil cracking"),
            building: "chemical plant".to_string(),
            throughput: rat(20),
            inputs: light_crack_inputs,
            can_prod: false,
            delay: rat(0),
            fixed_inputs: Map::new(),
            is_virtual: true,
        })
        .unwrap();

        b.build().unwrap()
    }

    fn ratio_40_30() -> Rat {
        factoriocalc_core::rational::ratio(4, 3)
    }

    fn ratio_30_20() -> Rat {
        factoriocalc_core::rational::ratio(3, 2)
    }

    #[test]
    fn oil_split_meets_heavy_demand_exactly_and_raises_no_surplus_error() {
        let cfg = InvocationConfig {
            module_priorities: Vec::new(),
            ..InvocationConfig::default()
        };
        let calc = Calculator::new(oil_registry(), &cfg);
        let mut processes = BTreeMap::new();
        processes.insert(Item::new("heavy oil"), Process::new(Item::new("heavy oil"), None, rat(10)));
        processes.insert(Item::new("light oil"), Process::new(Item::new("light oil"), None, rat(40)));
        processes.insert(Item::new("petroleum"), Process::new(Item::new("petroleum"), None, rat(100)));

        let (processes, new_inputs) = calc.solve_oil(processes).unwrap();

        let oil_products = &processes[&Item::new("oil products")];
        assert!(oil_products.throughput > rat(0));
        // heavy oil demand is satisfied exactly by refinery output, with no
        // leftover raw "heavy oil" process remaining in the map under its
        // own un-cracked name.
        assert_eq!(
            processes[&Item::new("heavy oil")].throughput,
            oil_products.throughput * rat(HEAVY_PER_PROCESS)
        );
        assert!(new_inputs.contains_key(&Item::new("crude oil")));
        assert!(new_inputs.contains_key(&Item::new("water")));
        assert!(new_inputs[&Item::new("crude oil")] > rat(0));
    }

    #[test]
    fn oil_split_without_petroleum_demand_records_surplus_error() {
        let cfg = InvocationConfig {
            module_priorities: Vec::new(),
            ..InvocationConfig::default()
        };
        let calc = Calculator::new(oil_registry(), &cfg);
        let mut processes = BTreeMap::new();
        processes.insert(Item::new("heavy oil"), Process::new(Item::new("heavy oil"), None, rat(100)));
        let err = calc.solve_oil(processes).unwrap_err();
        assert!(matches!(err, CalcError::Demand(factoriocalc_core::DemandError::UnresolvableSurplus { .. })));
    }
}

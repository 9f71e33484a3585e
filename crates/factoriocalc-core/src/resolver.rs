//! The recipe resolver: turns a generic [`Recipe`] plus a
//! module priority list and beacon speed bonus into a frozen
//! [`ResolvedRecipe`].

use crate::error::ConfigError;
use crate::rational::{rat, Rat};
use crate::records::{Recipe, ResolvedRecipe};
use crate::registry::Registry;
use std::collections::BTreeMap;

/// Fill a building's module slots from `priorities` (repeats allowed),
/// skipping productivity-bearing modules when the recipe cannot take
/// productivity. Returns the list of module names actually installed, in
/// the order they were inserted.
fn pick_modules<'a>(
    registry: &'a Registry,
    priorities: &[String],
    slots: u32,
    can_prod: bool,
) -> Result<Vec<(&'a str, Rat, Rat)>, ConfigError> {
    let mut used = Vec::new();
    for name in priorities {
        if used.len() as u32 >= slots {
            break;
        }
        let module = registry
            .module(name)
            .ok_or_else(|| ConfigError::UnknownModule(name.clone()))?;
        if module.productivity_effect != rat(0) && !can_prod {
            continue;
        }
        used.push((module.name.as_str(), module.speed_effect, module.productivity_effect));
    }
    Ok(used)
}

/// Resolve `recipe` against `module_priorities` and beacon speed bonus
/// `beacon_speed`.
pub fn resolve_recipe(
    registry: &Registry,
    recipe: &Recipe,
    module_priorities: &[String],
    beacon_speed: Rat,
) -> Result<ResolvedRecipe, ConfigError> {
    let building = registry.building(&recipe.building).ok_or_else(|| {
        ConfigError::UnknownBuilding {
            recipe: recipe.name.to_string(),
            building: recipe.building.clone(),
        }
    })?;

    let installed = pick_modules(registry, module_priorities, building.module_slots, recipe.can_prod)?;

    let speed_bonus: Rat = installed.iter().map(|(_, speed, _)| *speed).sum();
    let prod_bonus: Rat = installed.iter().map(|(_, _, prod)| *prod).sum();
    let speed_factor = rat(1) + beacon_speed + speed_bonus;
    let prod_factor = rat(1) + prod_bonus;

    let base_rate = recipe.throughput * speed_factor * prod_factor;
    let effective_throughput = rat(1) / (recipe.delay + rat(1) / base_rate);

    let mut effective_inputs: BTreeMap<_, _> = recipe
        .inputs
        .iter()
        .map(|(item, amount)| (item.clone(), *amount / prod_factor))
        .collect();
    for (item, amount) in &recipe.fixed_inputs {
        *effective_inputs.entry(item.clone()).or_insert(rat(0)) += *amount;
    }

    Ok(ResolvedRecipe {
        name: recipe.name.clone(),
        building: recipe.building.clone(),
        throughput: effective_throughput,
        inputs: effective_inputs,
        mods: installed.into_iter().map(|(name, _, _)| name.to_string()).collect(),
    })
}

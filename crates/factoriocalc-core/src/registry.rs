//! Write-once registry of buildings, modules, and recipes.
//!
//! Two-phase lifecycle: accumulate declarations while parsing, then
//! [`RegistryBuilder::build`] validates cross references and freezes an
//! immutable [`Registry`]. Once built, a `Registry` is never mutated again
//! for the lifetime of a compilation run.

use crate::error::ConfigError;
use crate::item::Item;
use crate::records::{Building, Module, Recipe};
use std::collections::BTreeMap;

#[derive(Debug, Default)]
pub struct RegistryBuilder {
    buildings: BTreeMap<String, Building>,
    modules: BTreeMap<String, Module>,
    recipes: BTreeMap<Item, Recipe>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_building(&mut self, building: Building) -> Result<(), ConfigError> {
        let key = building.name.to_lowercase();
        if self.buildings.contains_key(&key) {
            return Err(ConfigError::DuplicateBuilding(key));
        }
        self.buildings.insert(key, building);
        Ok(())
    }

    pub fn register_module(&mut self, module: Module) -> Result<(), ConfigError> {
        let key = module.name.to_lowercase();
        if self.modules.contains_key(&key) {
            return Err(ConfigError::DuplicateModule(key));
        }
        self.modules.insert(key, module);
        Ok(())
    }

    pub fn register_recipe(&mut self, recipe: Recipe) -> Result<(), ConfigError> {
        if self.recipes.contains_key(&recipe.name) {
            return Err(ConfigError::DuplicateRecipe(recipe.name.to_string()));
        }
        self.recipes.insert(recipe.name.clone(), recipe);
        Ok(())
    }

    /// Validate that every recipe's building is declared, and freeze.
    pub fn build(self) -> Result<Registry, ConfigError> {
        for recipe in self.recipes.values() {
            let key = recipe.building.to_lowercase();
            if !self.buildings.contains_key(&key) {
                return Err(ConfigError::UnknownBuilding {
                    recipe: recipe.name.to_string(),
                    building: recipe.building.clone(),
                });
            }
        }
        Ok(Registry {
            buildings: self.buildings,
            modules: self.modules,
            recipes: self.recipes,
        })
    }
}

/// Immutable, write-once store of every building/module/recipe declared in
/// a recipe database. Cheap to clone-by-reference since every query takes
/// `&self`.
#[derive(Debug, Clone)]
pub struct Registry {
    buildings: BTreeMap<String, Building>,
    modules: BTreeMap<String, Module>,
    recipes: BTreeMap<Item, Recipe>,
}

impl Registry {
    pub fn building(&self, name: &str) -> Option<&Building> {
        self.buildings.get(&name.to_lowercase())
    }

    pub fn module(&self, name: &str) -> Option<&Module> {
        self.modules.get(&name.to_lowercase())
    }

    pub fn recipe(&self, item: &Item) -> Option<&Recipe> {
        self.recipes.get(item)
    }

    pub fn recipes(&self) -> impl Iterator<Item = &Recipe> {
        self.recipes.values()
    }

    pub fn has_recipe(&self, item: &Item) -> bool {
        self.recipes.contains_key(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rational::rat;
    use std::collections::BTreeMap as Map;

    fn assembler() -> Building {
        Building {
            name: "assembler".to_string(),
            speed: rat(1),
            module_slots: 4,
            can_beacon: true,
        }
    }

    #[test]
    fn rejects_duplicate_building() {
        let mut b = RegistryBuilder::new();
        b.register_building(assembler()).unwrap();
        let err = b.register_building(assembler()).unwrap_err();
        assert_eq!(err, ConfigError::DuplicateBuilding("assembler".to_string()));
    }

    #[test]
    fn rejects_recipe_with_unknown_building() {
        let mut b = RegistryBuilder::new();
        b.register_recipe(Recipe {
            name: Item::new("gear"),
            building: "assembler".to_string(),
            throughput: rat(1),
            inputs: Map::new(),
            can_prod: true,
            delay: rat(0),
            fixed_inputs: Map::new(),
            is_virtual: false,
        })
        .unwrap();
        let err = b.build().unwrap_err();
        assert!(matches!(err, ConfigError::UnknownBuilding { .. }));
    }

    #[test]
    fn building_and_recipe_lookup_is_case_insensitive() {
        let mut b = RegistryBuilder::new();
        b.register_building(assembler()).unwrap();
        b.register_recipe(Recipe {
            name: Item::new("Gear"),
            building: "Assembler".to_string(),
            throughput: rat(1),
            inputs: Map::new(),
            can_prod: true,
            delay: rat(0),
            fixed_inputs: Map::new(),
            is_virtual: false,
        })
        .unwrap();
        let reg = b.build().unwrap();
        assert!(reg.building("ASSEMBLER").is_some());
        assert!(reg.recipe(&Item::new("gear")).is_some());
    }
}

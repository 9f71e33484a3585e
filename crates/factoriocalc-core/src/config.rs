//! The invocation surface: every parameter a compilation run
//! takes, with the documented defaults. `serde`-deserializable so the CLI
//! front end can load it from RON/TOML, matching the `workspace.dependencies`
//! the teacher already carries for exactly this purpose.

use crate::capacity::BeltType;
use crate::item::Item;
use crate::rational::{rat, Rat};
use std::collections::BTreeMap;

/// Parameters expected by the core driver.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct InvocationConfig {
    /// Desired output rates, item -> items/sec.
    pub items: BTreeMap<Item, Rat>,
    /// Items always treated as raw inputs, regardless of recipe
    /// availability.
    #[serde(default)]
    pub stop_items: Vec<Item>,
    #[serde(default = "default_module_priorities")]
    pub module_priorities: Vec<String>,
    #[serde(default = "default_beacon_speed")]
    pub beacon_speed: Rat,
    pub oil_beacon_speed: Option<Rat>,
    pub beacon_module_name: Option<String>,
    #[serde(default)]
    pub belt_type: BeltType,
    #[serde(default)]
    pub show_conflicts: bool,
}

fn default_beacon_speed() -> Rat {
    rat(0)
}

fn default_module_priorities() -> Vec<String> {
    vec![
        "prod3".to_string(),
        "prod3".to_string(),
        "prod3".to_string(),
        "prod3".to_string(),
        "speed3".to_string(),
        "speed3".to_string(),
        "speed3".to_string(),
        "speed3".to_string(),
    ]
}

impl InvocationConfig {
    /// Effective beacon speed to use for oil-processing recipes: falls
    /// back to `beacon_speed` when `oil_beacon_speed` is unset.
    pub fn effective_oil_beacon_speed(&self) -> Rat {
        self.oil_beacon_speed.unwrap_or(self.beacon_speed)
    }
}

impl Default for InvocationConfig {
    fn default() -> Self {
        InvocationConfig {
            items: BTreeMap::new(),
            stop_items: Vec::new(),
            module_priorities: default_module_priorities(),
            beacon_speed: rat(0),
            oil_beacon_speed: None,
            beacon_module_name: None,
            belt_type: BeltType::Blue,
            show_conflicts: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_module_priorities_favor_productivity_then_speed() {
        let cfg = InvocationConfig::default();
        assert_eq!(
            cfg.module_priorities,
            vec!["prod3", "prod3", "prod3", "prod3", "speed3", "speed3", "speed3", "speed3"]
        );
    }

    #[test]
    fn oil_beacon_speed_falls_back_to_beacon_speed() {
        let mut cfg = InvocationConfig::default();
        cfg.beacon_speed = rat(2);
        assert_eq!(cfg.effective_oil_beacon_speed(), rat(2));
        cfg.oil_beacon_speed = Some(rat(4));
        assert_eq!(cfg.effective_oil_beacon_speed(), rat(4));
    }
}

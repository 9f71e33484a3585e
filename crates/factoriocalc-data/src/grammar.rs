//! Line-level grammar for the recipe database text format.
//!
//! Each non-blank, non-comment line is one of: an `include`, a building
//! declaration, a recipe declaration, or a module declaration. Parsing one
//! line never looks at neighbouring lines -- the grammar is entirely
//! line-local, matching the original `datafile.py` loader this format is
//! grounded on.

use factoriocalc_core::item::Item;
use factoriocalc_core::rational::{parse_rat, rat, Rat};
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// One parsed line of the recipe database.
#[derive(Debug, Clone, PartialEq)]
pub enum Entry {
    Include { path: String },
    Building(BuildingLine),
    Recipe(RecipeLine),
    Module(ModuleLine),
}

#[derive(Debug, Clone, PartialEq)]
pub struct BuildingLine {
    pub name: String,
    pub speed: Rat,
    pub module_slots: u32,
    pub can_beacon: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecipeLine {
    pub output_amount: Rat,
    pub name: String,
    pub time: Rat,
    pub building: String,
    pub inputs: BTreeMap<Item, Rat>,
    pub can_prod: bool,
    pub delay: Rat,
    pub fixed_inputs: BTreeMap<Item, Rat>,
    pub is_virtual: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModuleLine {
    pub name: String,
    pub speed_effect: Rat,
    pub productivity_effect: Rat,
}

fn include_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^include\s+(.+)$").unwrap())
}

fn building_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?i)^([^,]+?)\s+builds at\s+([0-9.]+(?:/[0-9.]+)?)(?:\s+with\s+(\d+)\s+modules?)?(,\s*not affected by beacons)?$",
        )
        .unwrap()
    })
}

fn module_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)^([^,]+?)\s+module affects speed\s+([^,]+?)(?:,\s*prod\s+([^,]+))?$").unwrap()
    })
}

fn recipe_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)^(?:(\d+)\s+)?(.+?)\s+takes\s+([0-9.]+)\s+in\s+([^,]+)((?:,\s*[^,]+)*)$")
            .unwrap()
    })
}

/// Parse a single already-trimmed, non-blank, non-comment line.
pub fn parse_line(line: &str) -> Option<Entry> {
    if let Some(caps) = include_re().captures(line) {
        return Some(Entry::Include {
            path: caps[1].trim().to_string(),
        });
    }
    if let Some(caps) = building_re().captures(line) {
        let name = caps[1].trim().to_lowercase();
        let speed = parse_rat(&caps[2])?;
        let module_slots = caps
            .get(3)
            .map(|m| m.as_str().parse::<u32>().unwrap_or(0))
            .unwrap_or(0);
        let can_beacon = caps.get(4).is_none();
        return Some(Entry::Building(BuildingLine {
            name,
            speed,
            module_slots,
            can_beacon,
        }));
    }
    if let Some(caps) = module_re().captures(line) {
        let name = caps[1].trim().to_lowercase();
        let speed_effect = parse_rat(caps[2].trim())?;
        let productivity_effect = caps
            .get(3)
            .map(|m| parse_rat(m.as_str().trim()))
            .unwrap_or(Some(rat(0)))?;
        return Some(Entry::Module(ModuleLine {
            name,
            speed_effect,
            productivity_effect,
        }));
    }
    if let Some(caps) = recipe_re().captures(line) {
        let output_amount = caps
            .get(1)
            .map(|m| parse_rat(m.as_str()))
            .unwrap_or(Some(rat(1)))?;
        let name = caps[2].trim().to_lowercase();
        let time = parse_rat(&caps[3])?;
        let building = caps[4].trim().to_lowercase();
        let rest = caps.get(5).map(|m| m.as_str()).unwrap_or("");

        let mut inputs = BTreeMap::new();
        let mut fixed_inputs = BTreeMap::new();
        let mut can_prod = false;
        let mut is_virtual = false;
        let mut delay = rat(0);

        for token in split_tokens(rest) {
            let token = token.trim();
            if token.is_empty() {
                continue;
            }
            if token.eq_ignore_ascii_case("can take productivity") {
                can_prod = true;
                continue;
            }
            if token.eq_ignore_ascii_case("is virtual") {
                is_virtual = true;
                continue;
            }
            if let Some(rest) = strip_ci_prefix(token, "plus ") {
                if let Some(amount_str) = rest.strip_suffix(" delay") {
                    delay = parse_rat(amount_str.trim())?;
                } else {
                    let (amount, item) = split_amount_item(rest)?;
                    *fixed_inputs.entry(Item::new(item)).or_insert(rat(0)) += amount / output_amount;
                }
                continue;
            }
            let (amount, item) = split_amount_item(token)?;
            *inputs.entry(Item::new(item)).or_insert(rat(0)) += amount / output_amount;
        }

        return Some(Entry::Recipe(RecipeLine {
            output_amount,
            name,
            time,
            building,
            inputs,
            can_prod,
            delay,
            fixed_inputs,
            is_virtual,
        }));
    }
    None
}

/// Split the comma-prefixed tail of a recipe line into trimmed tokens,
/// dropping the leading empty piece produced by each `, `.
fn split_tokens(rest: &str) -> Vec<String> {
    rest.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn strip_ci_prefix<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    if s.len() >= prefix.len() && s[..prefix.len()].eq_ignore_ascii_case(prefix) {
        Some(&s[prefix.len()..])
    } else {
        None
    }
}

/// Split `"3 iron plate"` into `(3, "iron plate")`.
fn split_amount_item(token: &str) -> Option<(Rat, String)> {
    let (amount_str, item) = token.split_once(' ')?;
    let amount = parse_rat(amount_str)?;
    Some((amount, item.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_building_line() {
        let entry = parse_line("Assembler builds at 1.25 with 4 modules").unwrap();
        assert_eq!(
            entry,
            Entry::Building(BuildingLine {
                name: "assembler".to_string(),
                speed: parse_rat("1.25").unwrap(),
                module_slots: 4,
                can_beacon: true,
            })
        );
    }

    #[test]
    fn parses_building_not_affected_by_beacons() {
        let entry = parse_line("Rocket silo builds at 1, not affected by beacons").unwrap();
        match entry {
            Entry::Building(b) => {
                assert_eq!(b.module_slots, 0);
                assert!(!b.can_beacon);
            }
            _ => panic!("expected building"),
        }
    }

    #[test]
    fn parses_divisor_speed() {
        let entry = parse_line("Furnace builds at 1.3/1 with 2 modules").unwrap();
        match entry {
            Entry::Building(b) => assert_eq!(b.speed, parse_rat("1.3").unwrap()),
            _ => panic!("expected building"),
        }
    }

    #[test]
    fn parses_module_line() {
        let entry = parse_line("prod 3 module affects speed -.15, prod .06").unwrap();
        assert_eq!(
            entry,
            Entry::Module(ModuleLine {
                name: "prod 3".to_string(),
                speed_effect: parse_rat("-.15").unwrap(),
                productivity_effect: parse_rat(".06").unwrap(),
            })
        );
    }

    #[test]
    fn parses_module_line_without_prod() {
        let entry = parse_line("speed 3 module affects speed .5").unwrap();
        match entry {
            Entry::Module(m) => {
                assert_eq!(m.speed_effect, parse_rat(".5").unwrap());
                assert_eq!(m.productivity_effect, rat(0));
            }
            _ => panic!("expected module"),
        }
    }

    #[test]
    fn parses_simple_recipe() {
        let entry = parse_line("Green circuit takes 0.5 in assembler, 1 iron plate, 3 copper wire, can take productivity").unwrap();
        match entry {
            Entry::Recipe(r) => {
                assert_eq!(r.name, "green circuit");
                assert_eq!(r.building, "assembler");
                assert_eq!(r.output_amount, rat(1));
                assert!(r.can_prod);
                assert_eq!(r.inputs[&Item::new("iron plate")], rat(1));
                assert_eq!(r.inputs[&Item::new("copper wire")], rat(3));
            }
            _ => panic!("expected recipe"),
        }
    }

    #[test]
    fn parses_recipe_with_output_amount() {
        let entry = parse_line("2 transport belt takes 0.5 in assembler, 1 iron plate, 1 gear").unwrap();
        match entry {
            Entry::Recipe(r) => {
                assert_eq!(r.output_amount, rat(2));
                // per-output input amount is divided by the output count
                assert_eq!(r.inputs[&Item::new("iron plate")], parse_rat(".5").unwrap());
            }
            _ => panic!("expected recipe"),
        }
    }

    #[test]
    fn parses_recipe_with_delay_and_fixed_inputs_and_virtual() {
        let entry = parse_line(
            "rocket launch takes 41.25 in rocket silo, plus 41.25 delay, plus 1 satellite, is virtual",
        )
        .unwrap();
        match entry {
            Entry::Recipe(r) => {
                assert_eq!(r.delay, parse_rat("41.25").unwrap());
                assert_eq!(r.fixed_inputs[&Item::new("satellite")], rat(1));
                assert!(r.is_virtual);
                assert!(r.inputs.is_empty());
            }
            _ => panic!("expected recipe"),
        }
    }

    #[test]
    fn parses_include_line() {
        let entry = parse_line("include base.txt").unwrap();
        assert_eq!(
            entry,
            Entry::Include {
                path: "base.txt".to_string()
            }
        );
    }

    #[test]
    fn rejects_garbage_line() {
        assert!(parse_line("this is not a valid entry").is_none());
    }
}

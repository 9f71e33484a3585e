//! Recipe database loader: resolves `include` directives and feeds parsed
//! lines into a [`RegistryBuilder`].

use crate::grammar::{parse_line, Entry};
use factoriocalc_core::error::ConfigError;
use factoriocalc_core::item::Item;
use factoriocalc_core::records::{Building, Module, Recipe};
use factoriocalc_core::registry::{Registry, RegistryBuilder};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Load a recipe database from `path`, following `include` directives
/// relative to the including file's directory, and freeze it into a
/// [`Registry`].
pub fn load_file(path: impl AsRef<Path>) -> Result<Registry, ConfigError> {
    let mut builder = RegistryBuilder::new();
    load_into(path.as_ref(), &mut builder)?;
    builder.build()
}

/// Load a recipe database from an in-memory string (no includes are
/// possible since there is no base directory), useful for tests and for
/// embedding default data.
pub fn load_str(text: &str) -> Result<Registry, ConfigError> {
    let mut builder = RegistryBuilder::new();
    feed_lines(text, "<memory>", &mut builder)?;
    builder.build()
}

fn load_into(path: &Path, builder: &mut RegistryBuilder) -> Result<(), ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
        path: path.display().to_string(),
        source: Arc::new(e),
    })?;
    tracing::debug!(path = %path.display(), "loading recipe database file");

    let dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
    for (line_no, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let entry = parse_line(line).ok_or_else(|| ConfigError::MalformedLine {
            file: path.display().to_string(),
            line_no: line_no + 1,
            line: line.to_string(),
        })?;
        match entry {
            Entry::Include { path: include_path } => {
                let resolved: PathBuf = dir.join(&include_path);
                load_into(&resolved, builder)?;
            }
            Entry::Building(b) => {
                builder.register_building(Building {
                    name: b.name,
                    speed: b.speed,
                    module_slots: b.module_slots,
                    can_beacon: b.can_beacon,
                })?;
            }
            Entry::Module(m) => {
                builder.register_module(Module {
                    name: m.name,
                    speed_effect: m.speed_effect,
                    productivity_effect: m.productivity_effect,
                })?;
            }
            Entry::Recipe(r) => {
                builder.register_recipe(Recipe {
                    name: Item::new(&r.name),
                    building: r.building,
                    throughput: r.output_amount / r.time,
                    inputs: r.inputs,
                    can_prod: r.can_prod,
                    delay: r.delay,
                    fixed_inputs: r.fixed_inputs,
                    is_virtual: r.is_virtual,
                })?;
            }
        }
    }
    Ok(())
}

fn feed_lines(text: &str, label: &str, builder: &mut RegistryBuilder) -> Result<(), ConfigError> {
    for (line_no, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let entry = parse_line(line).ok_or_else(|| ConfigError::MalformedLine {
            file: label.to_string(),
            line_no: line_no + 1,
            line: line.to_string(),
        })?;
        match entry {
            Entry::Include { .. } => {
                return Err(ConfigError::MalformedLine {
                    file: label.to_string(),
                    line_no: line_no + 1,
                    line: line.to_string(),
                })
            }
            Entry::Building(b) => builder.register_building(Building {
                name: b.name,
                speed: b.speed,
                module_slots: b.module_slots,
                can_beacon: b.can_beacon,
            })?,
            Entry::Module(m) => builder.register_module(Module {
                name: m.name,
                speed_effect: m.speed_effect,
                productivity_effect: m.productivity_effect,
            })?,
            Entry::Recipe(r) => builder.register_recipe(Recipe {
                name: Item::new(&r.name),
                building: r.building,
                throughput: r.output_amount / r.time,
                inputs: r.inputs,
                can_prod: r.can_prod,
                delay: r.delay,
                fixed_inputs: r.fixed_inputs,
                is_virtual: r.is_virtual,
            })?,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use factoriocalc_core::rational::rat;

    const SIMPLE_DB: &str = "\
# a tiny recipe database
Assembler builds at 1.25 with 4 modules
Furnace builds at 2, not affected by beacons

prod 3 module affects speed -.15, prod .06
speed 3 module affects speed .5

iron plate takes 3.2 in furnace
gear takes 0.5 in assembler, 2 iron plate
";

    #[test]
    fn loads_simple_database() {
        let registry = load_str(SIMPLE_DB).unwrap();
        assert!(registry.building("assembler").is_some());
        assert!(!registry.building("furnace").unwrap().can_beacon);
        assert!(registry.module("prod 3").is_some());
        let gear = registry.recipe(&Item::new("gear")).unwrap();
        assert_eq!(gear.throughput, rat(2));
        assert_eq!(gear.inputs[&Item::new("iron plate")], rat(2));
    }

    #[test]
    fn malformed_line_reports_location() {
        let err = load_str("this is not valid\n").unwrap_err();
        match err {
            ConfigError::MalformedLine { line_no, .. } => assert_eq!(line_no, 1),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn duplicate_recipe_is_rejected() {
        let db = "Assembler builds at 1 with 0 modules\ngear takes 1 in assembler\ngear takes 1 in assembler\n";
        let err = load_str(db).unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateRecipe(_)));
    }

    #[test]
    fn include_resolves_relative_to_including_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("base.txt"), "Assembler builds at 1 with 0 modules\n").unwrap();
        std::fs::write(
            dir.path().join("main.txt"),
            "include base.txt\ngear takes 1 in assembler\n",
        )
        .unwrap();
        let registry = load_file(dir.path().join("main.txt")).unwrap();
        assert!(registry.building("assembler").is_some());
        assert!(registry.recipe(&Item::new("gear")).is_some());
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_file("/nonexistent/path/does-not-exist.txt").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}

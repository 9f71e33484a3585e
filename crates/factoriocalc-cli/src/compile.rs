//! The full pipeline, strung together end to end: recipe
//! resolution, oil balancing, step splitting, bus scheduling, tile
//! layout, and blueprint/render output.

use crate::driver;
use crate::error::CompileError;
use factoriocalc_belt::BeltManager;
use factoriocalc_calc::{split_into_steps, Calculator};
use factoriocalc_core::{InvocationConfig, Registry};
use factoriocalc_layout::Entity;
use factoriocalc_processor::default_catalogue;

/// Everything a compilation run produces.
pub struct CompileOutput {
    pub entities: Vec<Entity>,
    pub blueprint_string: String,
    pub ascii_art: String,
    pub bus_width: i64,
}

/// `FACTORIOCALC_IGNORE_MISSING_PROCESS=1` swaps a missing processor
/// match for a minimal stub instead of failing the whole run, matching
/// the original's same-named escape hatch (useful while iterating on a
/// new recipe the catalogue doesn't cover yet).
pub const IGNORE_MISSING_PROCESS_ENV: &str = "FACTORIOCALC_IGNORE_MISSING_PROCESS";

pub fn compile(registry: Registry, config: &InvocationConfig) -> Result<CompileOutput, CompileError> {
    let calculator = Calculator::new(registry, config);
    let processes = calculator.solve_with_oil(&config.items)?;

    let (raw_steps, pooled_steps) = split_into_steps(processes.into_values().collect(), config.belt_type);

    let mut manager = BeltManager::new(raw_steps, pooled_steps, config.belt_type);
    manager.run()?;
    let events = manager.into_output();

    let catalogue = default_catalogue();
    let (layout, bus_width) = driver::layout_events(&events, config.belt_type, catalogue, config.beacon_module_name.as_deref())?;
    let entities = driver::finalize(&layout, config.show_conflicts)?;

    let blueprint_string = factoriocalc_blueprint::encode(&entities, "Generated", &[factoriocalc_layout::kind::ASSEMBLER])?;
    let ascii_art = factoriocalc_render::render(&entities, !config.show_conflicts)?;

    Ok(CompileOutput { entities, blueprint_string, ascii_art, bus_width })
}

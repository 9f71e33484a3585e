//! A parameterized tile pattern for one recipe shape, ported
//! from the original `Processor` class: matched on building type and
//! input/output signature, and laid out as head + N bodies + tail.

use crate::classify::classify;
use crate::error::{ProcessorError, Signature};
use factoriocalc_calc::Step;
use factoriocalc_core::rational::rat;
use factoriocalc_core::{BeltType, Rat};
use factoriocalc_layout::{Entity, Layout};
use std::collections::BTreeMap;

/// Worst-case throughput, in items/sec, of a single stack inserter. A
/// building whose per-item rate exceeds this is throttled down to match,
/// since no single inserter line can keep up otherwise. Conservative
/// default; override by constructing catalogue entries around a
/// different value if a layout is tuned for faster inserters.
pub const DEFAULT_MAX_INSERT_RATE: i64 = 10;

pub fn max_insert_rate() -> Rat {
    rat(DEFAULT_MAX_INSERT_RATE)
}

pub type LayoutFn = fn(&Entity) -> Layout;

pub fn empty_layout(_building: &Entity) -> Layout {
    Layout::new()
}

/// One entry in the processor catalogue.
pub struct Processor {
    pub name: &'static str,
    pub buildings: &'static [&'static str],
    pub inputs: Signature,
    pub outputs: Signature,
    pub head: LayoutFn,
    pub body: LayoutFn,
    pub tail: LayoutFn,
    pub head_width: i64,
    pub body_width: i64,
    pub tail_width: i64,
    pub base_buildings: Rat,
    pub per_body_buildings: Rat,
    /// Extra rows this processor's layout needs below the standard 7, e.g.
    /// the rocket silo's 4x4 footprint. Zero for every normal processor.
    pub oversize: i64,
}

impl Processor {
    /// `None` if this processor cannot serve a step with the given
    /// building/inputs/outputs; else `(unused, underused)`, lower is
    /// better.
    pub fn match_score(&self, building: &str, inputs: Signature, outputs: Signature) -> Option<(u32, u32)> {
        if !self.buildings.contains(&building) {
            return None;
        }
        let mut unused = 0;
        let mut underused = 0;
        for (have, need) in [(self.outputs, outputs), (self.inputs, inputs)] {
            if have.liquid < need.liquid {
                return None;
            }
            unused += have.liquid - need.liquid;
            if have.belt < need.belt {
                return None;
            }
            let remaining = have.belt - need.belt;
            if remaining + have.half_belt < need.half_belt {
                return None;
            }
            unused += remaining + have.half_belt - need.half_belt;
            underused += remaining.min(need.half_belt);
        }
        Some((unused, underused))
    }

    /// Number of body sections needed to meet `step`'s throughput, after
    /// throttling for the single-inserter rate cap.
    pub fn determine_bodies(&self, step: &Step) -> Result<u64, ProcessorError> {
        let recipe = step.process.recipe.as_ref().expect("matched step must have a resolved recipe");
        let mut throughput_per_building = recipe.throughput;

        let mut item_rates: Vec<Rat> = recipe
            .inputs
            .iter()
            .filter(|(item, _)| !item.is_liquid())
            .map(|(_, &per_output)| throughput_per_building * per_output)
            .collect();
        if !step.process.item.is_liquid() {
            item_rates.push(throughput_per_building);
        }
        if let Some(&max_rate) = item_rates.iter().max() {
            if max_rate > max_insert_rate() {
                throughput_per_building = throughput_per_building * max_insert_rate() / max_rate;
            }
        }

        let buildings_needed = step.process.throughput / throughput_per_building - self.base_buildings;
        if buildings_needed <= rat(0) || self.per_body_buildings <= rat(0) {
            return Ok(0);
        }
        let bodies = (buildings_needed / self.per_body_buildings).ceil().to_integer();
        Ok(bodies.max(0) as u64)
    }

    fn building_primitive(&self, step: &Step) -> Entity {
        let recipe = step.process.recipe.as_ref().expect("matched step must have a resolved recipe");
        let kind = building_entity_kind(&recipe.building);
        let mut entity = Entity::new(0, 0, kind);
        if recipe.building != "furnace" {
            entity = entity.with_attr("recipe", recipe.name.as_str());
        }
        if !recipe.mods.is_empty() {
            let mut counts: BTreeMap<String, i64> = BTreeMap::new();
            for m in &recipe.mods {
                *counts.entry(m.clone()).or_insert(0) += 1;
            }
            let items: BTreeMap<String, i64> = counts.into_iter().collect();
            entity = entity.with_attr("items", serde_json::to_value(items).unwrap());
        }
        entity
    }

    /// `(layout, width, oversize)` for `step`, which must already match
    /// this processor. `oversize` is the number of extra rows the caller
    /// must reserve below the standard step height.
    pub fn layout(&self, step: &Step) -> Result<(Layout, i64, i64), ProcessorError> {
        let building = self.building_primitive(step);
        let bodies = self.determine_bodies(step)?;

        let mut layout = Layout::new();
        layout.push_at(0, 0, (self.head)(&building));
        for i in 0..bodies {
            layout.push_at(self.head_width + i as i64 * self.body_width, 0, (self.body)(&building));
        }
        layout.push_at(self.head_width + bodies as i64 * self.body_width, 0, (self.tail)(&building));

        let width = self.head_width + bodies as i64 * self.body_width + self.tail_width;
        Ok((layout, width, self.oversize))
    }
}

fn building_entity_kind(generic_name: &str) -> &'static str {
    use factoriocalc_layout::kind;
    match generic_name {
        "furnace" => kind::FURNACE,
        "chemical plant" => kind::CHEMICAL_PLANT,
        "refinery" => kind::REFINERY,
        "rocket silo" => kind::ROCKET_SILO,
        "lab" => kind::LAB,
        _ => kind::ASSEMBLER,
    }
}

/// Finds the best-scoring processor in `catalogue` for `step`, under
/// `belt_type`'s belt-capacity classification.
pub fn find_processor<'a>(catalogue: &'a [Processor], step: &Step, belt_type: BeltType) -> Result<&'a Processor, ProcessorError> {
    let recipe = step.process.recipe.as_ref().expect("raw steps never reach the processor stage");
    let (inputs, outputs) = classify(step, belt_type);
    catalogue
        .iter()
        .filter_map(|p| p.match_score(&recipe.building, inputs, outputs).map(|score| (score, p)))
        .min_by_key(|(score, _)| *score)
        .map(|(_, p)| p)
        .ok_or(ProcessorError::NoMatch { building: recipe.building.clone(), inputs, outputs })
}

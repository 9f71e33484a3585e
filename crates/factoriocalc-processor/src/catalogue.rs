//! The hand-authored processor catalogue, grounded on the
//! original `processor.py`: one entry per distinct input/output shape
//! (belt counts, half-belts, fluids) a recipe can present, not one entry
//! per recipe.

use crate::error::Signature;
use crate::processor::Processor;
use factoriocalc_core::rational::{rat, ratio};
use factoriocalc_layout::{entity::kind, primitives, Entity, Layout, Orientation};
use serde_json::json;
use std::sync::OnceLock;

fn sig(liquid: u32, belt: u32, half_belt: u32) -> Signature {
    Signature { liquid, belt, half_belt }
}

fn pole_tail(_building: &Entity) -> Layout {
    let mut layout = Layout::new();
    let mut a = Layout::new();
    for e in primitives::medium_pole() {
        a.push(e);
    }
    layout.push_at(1, 1, a);
    let mut b = Layout::new();
    for e in primitives::medium_pole() {
        b.push(e);
    }
    layout.push_at(1, 5, b);
    layout
}

/// Basic 1-input/1-output recipe (smelting, gears, green circuits, ...),
/// running in any of the three "1-in-1-out belt" buildings.
fn one_to_one_head(_building: &Entity) -> Layout {
    let mut layout = Layout::new();
    let mut belt_in = Layout::new();
    for e in primitives::belt_run(0, 0, Orientation::Right, 3) {
        belt_in.push(e);
    }
    layout.push_at(1, 0, belt_in);
    layout.push(Entity::new(0, 1, kind::BELT).oriented(Orientation::Right));
    layout.push(Entity::new(1, 1, kind::BELT).oriented(Orientation::Up));
    {
        let mut p1 = Layout::new();
        for e in primitives::medium_pole() {
            p1.push(e);
        }
        layout.push_at(2, 1, p1);
        let mut p2 = Layout::new();
        for e in primitives::medium_pole() {
            p2.push(e);
        }
        layout.push_at(2, 5, p2);
    }
    layout.push(Entity::new(0, 6, kind::BELT).oriented(Orientation::Left));
    let mut belt_out = Layout::new();
    for e in primitives::belt_run(3, 6, Orientation::Left, 3) {
        belt_out.push(e);
    }
    layout.push_at(0, 0, belt_out);
    layout
}

fn one_to_one_body(building: &Entity) -> Layout {
    let mut layout = Layout::new();
    {
        let mut belt = Layout::new();
        for e in primitives::belt_run(0, 0, Orientation::Right, 6) {
            belt.push(e);
        }
        layout.push_at(0, 0, belt);
    }
    layout.push(Entity::new(0, 1, kind::INSERTER).oriented(Orientation::Up));
    {
        let mut pole = Layout::new();
        for e in primitives::medium_pole() {
            pole.push(e);
        }
        layout.push_at(2, 1, pole);
    }
    layout.push(Entity::new(3, 1, kind::INSERTER).oriented(Orientation::Up));
    layout.push_at(0, 2, Layout::from_entities(vec![building.clone()]));
    layout.push_at(3, 2, Layout::from_entities(vec![building.clone()]));
    layout.push(Entity::new(0, 5, kind::BELT).oriented(Orientation::Down));
    layout.push(Entity::new(1, 5, kind::SPLITTER).oriented(Orientation::Left).with_attr("output_priority", "right"));
    layout.push(Entity::new(2, 5, kind::INSERTER).oriented(Orientation::Up));
    {
        let mut pole = Layout::new();
        for e in primitives::medium_pole() {
            pole.push(e);
        }
        layout.push_at(3, 5, pole);
    }
    layout.push(Entity::new(4, 5, kind::INSERTER).oriented(Orientation::Up));
    layout.push(Entity::new(0, 6, kind::BELT).oriented(Orientation::Left));
    {
        let mut belt = Layout::new();
        for e in primitives::belt_run(5, 6, Orientation::Left, 4) {
            belt.push(e);
        }
        layout.push_at(0, 0, belt);
    }
    layout
}

/// Oil refining: 2 pipes in, 3 pipes out, the refinery building.
fn refinery_head(building: &Entity) -> Layout {
    let mut layout = Layout::new();
    layout.push_at(0, 0, Layout::from_entities(vec![building.clone()]));
    for (dx, pipe) in [(0, Orientation::Left), (1, Orientation::Right)] {
        let mut ramp = Layout::new();
        for e in primitives::pipe_surface(pipe) {
            ramp.push(e);
        }
        layout.push_at(dx + 5, 0, ramp);
    }
    {
        let mut pole = Layout::new();
        for e in primitives::big_pole() {
            pole.push(e);
        }
        layout.push_at(0, 0, pole);
    }
    layout
}

fn refinery_tail(_building: &Entity) -> Layout {
    let mut layout = Layout::new();
    let mut pole = Layout::new();
    for e in primitives::big_pole() {
        pole.push(e);
    }
    layout.push_at(1, 3, pole);
    layout
}

/// Cracking recipes: 1 liquid in, 1 liquid out, the chemical plant.
fn cracking_head(building: &Entity) -> Layout {
    let mut layout = Layout::new();
    layout.push_at(0, 1, Layout::from_entities(vec![building.clone()]));
    let mut ramp_in = Layout::new();
    for e in primitives::pipe_surface(Orientation::Left) {
        ramp_in.push(e);
    }
    layout.push_at(3, 1, ramp_in);
    let mut ramp_out = Layout::new();
    for e in primitives::pipe_surface(Orientation::Right) {
        ramp_out.push(e);
    }
    layout.push_at(3, 4, ramp_out);
    layout
}

/// Building interior for `solid_in` half/full-belt inputs feeding inserters
/// in a column, plus `liquid_in` pipe connections below them. One inserter
/// or pipe stub per input slot; the bus-side offramp/onramp geometry lives
/// in the layouter, not here.
fn shaped_head(building: &Entity, liquid_in: i64, solid_in: i64) -> Layout {
    let mut layout = Layout::new();
    layout.push_at(2, 0, Layout::from_entities(vec![building.clone()]));
    for i in 0..solid_in {
        layout.push(Entity::new(0, i, kind::INSERTER).oriented(Orientation::Right));
    }
    for j in 0..liquid_in {
        let mut pipe = Layout::new();
        for e in primitives::pipe_surface(Orientation::Right) {
            pipe.push(e);
        }
        layout.push_at(0, solid_in + j, pipe);
    }
    let mut pole = Layout::new();
    for e in primitives::medium_pole() {
        pole.push(e);
    }
    layout.push_at(1, solid_in + liquid_in, pole);
    layout
}

/// A processor for many-solid-input recipes that produce a single output
/// in small volume (satellites): all inputs arrive as half-belts.
fn many_input_head(building: &Entity) -> Layout {
    shaped_head(building, 0, 6)
}

/// As [`many_input_head`], for the lab's extra science-pack input.
fn lab_head(building: &Entity) -> Layout {
    shaped_head(building, 0, 7)
}

fn two_belt_to_one_head(building: &Entity) -> Layout {
    shaped_head(building, 0, 2)
}

fn two_belt_one_half_head(building: &Entity) -> Layout {
    shaped_head(building, 0, 3)
}

fn three_half_to_belt_head(building: &Entity) -> Layout {
    shaped_head(building, 0, 3)
}

fn two_fluids_to_belt_head(building: &Entity) -> Layout {
    shaped_head(building, 2, 0)
}

fn fluid_plus_two_solids_head(building: &Entity) -> Layout {
    shaped_head(building, 1, 2)
}

fn fluid_and_belt_head(building: &Entity) -> Layout {
    shaped_head(building, 1, 1)
}

/// The rocket silo: oversize (4x4), 4 half-belt solids in, 1 virtual
/// "rocket" output.
fn silo_head(building: &Entity) -> Layout {
    let mut layout = Layout::new();
    layout.push_at(0, 0, Layout::from_entities(vec![building.clone()]));
    for i in 0..4i64 {
        layout.push(Entity::new(-1, i * 2, kind::INSERTER).oriented(Orientation::Right));
    }
    let mut pole = Layout::new();
    for e in primitives::big_pole() {
        pole.push(e);
    }
    layout.push_at(5, 0, pole);
    layout
}

/// A buffer chest downstream of the silo plus a stack inserter wired to
/// only load satellites into the silo while the chest holds under 1000 --
/// without it the silo launches and discards satellites the bus keeps
/// producing.
fn silo_tail(_building: &Entity) -> Layout {
    let mut layout = Layout::new();
    layout.push(Entity::new(0, 0, kind::CHEST));
    let inserter = Entity::new(0, 1, kind::INSERTER)
        .oriented(Orientation::Up)
        .with_attr(
            "control_behavior",
            json!({
                "circuit_condition": {
                    "first_signal": { "type": "item", "name": "satellite" },
                    "comparator": "<",
                    "constant": 1000
                }
            }),
        )
        .with_attr(
            "connections",
            json!({ "1": { "red": [ { "entity_id": 1 } ] } }),
        );
    layout.push(inserter);
    let mut pole = Layout::new();
    for e in primitives::medium_pole() {
        pole.push(e);
    }
    layout.push_at(1, 5, pole);
    layout
}

static CATALOGUE: OnceLock<Vec<Processor>> = OnceLock::new();

/// The default processor catalogue, built once and shared for the life
/// of the process.
pub fn default_catalogue() -> &'static [Processor] {
    CATALOGUE.get_or_init(|| {
        vec![
            Processor {
                name: "1 -> 1",
                buildings: &["furnace", "assembler", "chemical plant"],
                inputs: sig(0, 1, 0),
                outputs: sig(0, 1, 0),
                head: one_to_one_head,
                body: one_to_one_body,
                tail: pole_tail,
                head_width: 4,
                body_width: 6,
                tail_width: 3,
                base_buildings: rat(0),
                per_body_buildings: rat(2),
                oversize: 0,
            },
            Processor {
                name: "oil refining",
                buildings: &["refinery"],
                inputs: sig(2, 0, 0),
                outputs: sig(3, 0, 0),
                head: refinery_head,
                body: crate::processor::empty_layout,
                tail: refinery_tail,
                head_width: 9,
                body_width: 1,
                tail_width: 3,
                base_buildings: rat(1),
                per_body_buildings: rat(1),
                oversize: 0,
            },
            Processor {
                name: "cracking",
                buildings: &["chemical plant"],
                inputs: sig(1, 0, 0),
                outputs: sig(1, 0, 0),
                head: cracking_head,
                body: crate::processor::empty_layout,
                tail: pole_tail,
                head_width: 7,
                body_width: 1,
                tail_width: 3,
                base_buildings: rat(0),
                per_body_buildings: ratio(1, 1),
                oversize: 0,
            },
            Processor {
                name: "2 belt -> 1 belt",
                buildings: &["assembler"],
                inputs: sig(0, 2, 0),
                outputs: sig(0, 1, 0),
                head: two_belt_to_one_head,
                body: crate::processor::empty_layout,
                tail: pole_tail,
                head_width: 6,
                body_width: 1,
                tail_width: 3,
                base_buildings: rat(1),
                per_body_buildings: ratio(1, 1),
                oversize: 0,
            },
            Processor {
                name: "2 belt + 1 half -> 1 half",
                buildings: &["assembler"],
                inputs: sig(0, 2, 1),
                outputs: sig(0, 0, 1),
                head: two_belt_one_half_head,
                body: crate::processor::empty_layout,
                tail: pole_tail,
                head_width: 6,
                body_width: 1,
                tail_width: 3,
                base_buildings: rat(1),
                per_body_buildings: ratio(1, 1),
                oversize: 0,
            },
            Processor {
                name: "3 half -> 1 belt",
                buildings: &["assembler"],
                inputs: sig(0, 0, 3),
                outputs: sig(0, 1, 0),
                head: three_half_to_belt_head,
                body: crate::processor::empty_layout,
                tail: pole_tail,
                head_width: 6,
                body_width: 1,
                tail_width: 3,
                base_buildings: rat(1),
                per_body_buildings: ratio(1, 1),
                oversize: 0,
            },
            Processor {
                name: "2 fluids -> belt",
                buildings: &["chemical plant"],
                inputs: sig(2, 0, 0),
                outputs: sig(0, 1, 0),
                head: two_fluids_to_belt_head,
                body: crate::processor::empty_layout,
                tail: pole_tail,
                head_width: 6,
                body_width: 1,
                tail_width: 3,
                base_buildings: rat(1),
                per_body_buildings: ratio(1, 1),
                oversize: 0,
            },
            Processor {
                name: "1 fluid + 2 solids -> fluid",
                buildings: &["chemical plant"],
                inputs: sig(1, 0, 2),
                outputs: sig(1, 0, 0),
                head: fluid_plus_two_solids_head,
                body: crate::processor::empty_layout,
                tail: pole_tail,
                head_width: 6,
                body_width: 1,
                tail_width: 3,
                base_buildings: rat(1),
                per_body_buildings: ratio(1, 1),
                oversize: 0,
            },
            Processor {
                name: "1 fluid + 2 solids -> solid",
                buildings: &["chemical plant"],
                inputs: sig(1, 0, 2),
                outputs: sig(0, 0, 1),
                head: fluid_plus_two_solids_head,
                body: crate::processor::empty_layout,
                tail: pole_tail,
                head_width: 6,
                body_width: 1,
                tail_width: 3,
                base_buildings: rat(1),
                per_body_buildings: ratio(1, 1),
                oversize: 0,
            },
            Processor {
                name: "assembler with fluid input",
                buildings: &["assembler"],
                inputs: sig(1, 1, 0),
                outputs: sig(0, 1, 0),
                head: fluid_and_belt_head,
                body: crate::processor::empty_layout,
                tail: pole_tail,
                head_width: 6,
                body_width: 1,
                tail_width: 3,
                base_buildings: rat(1),
                per_body_buildings: ratio(1, 1),
                oversize: 0,
            },
            Processor {
                name: "many-input",
                buildings: &["assembler"],
                inputs: sig(0, 0, 6),
                outputs: sig(0, 0, 1),
                head: many_input_head,
                body: crate::processor::empty_layout,
                tail: pole_tail,
                head_width: 6,
                body_width: 1,
                tail_width: 3,
                base_buildings: rat(1),
                per_body_buildings: ratio(1, 1),
                oversize: 0,
            },
            Processor {
                name: "lab",
                buildings: &["lab"],
                inputs: sig(0, 0, 7),
                outputs: sig(0, 0, 1),
                head: lab_head,
                body: crate::processor::empty_layout,
                tail: pole_tail,
                head_width: 6,
                body_width: 1,
                tail_width: 3,
                base_buildings: rat(1),
                per_body_buildings: ratio(1, 1),
                oversize: 0,
            },
            Processor {
                name: "rocket silo",
                buildings: &["rocket silo"],
                inputs: sig(0, 0, 4),
                outputs: sig(0, 0, 1),
                head: silo_head,
                body: crate::processor::empty_layout,
                tail: silo_tail,
                head_width: 9,
                body_width: 1,
                tail_width: 3,
                base_buildings: rat(1),
                per_body_buildings: ratio(1, 1),
                oversize: 4,
            },
        ]
    })
}

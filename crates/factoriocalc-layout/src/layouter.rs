//! Assembles the bus-area layout for one scheduled bus event:
//! underpasses for lines the step doesn't touch, ramps for lines it
//! takes input from or adds output to, and the process area itself.
//!
//! The process area is not built here: a [`Processor`] owns
//! that, and this crate cannot depend on the processor crate (the
//! processor crate depends on this one, to build its head/body/tail
//! fragments). Callers pass the already-built process [`Layout`], width,
//! and vertical oversize in.

use crate::entity::{kind, Orientation};
use crate::error::LayoutError;
use crate::layout::Layout;
use crate::primitives;
use factoriocalc_belt::{BusEvent, Compaction, Placement};
use factoriocalc_core::BeltType;

pub const STEP: i64 = 10;
pub const BUS_X: i64 = 4;

/// Absolute column for bus lane `lane`: lanes start at [`BUS_X`] and run
/// every other column, leaving a 1-tile gap so underpasses/splitters on
/// neighboring lanes never touch.
pub fn lane_column(lane: usize) -> i64 {
    BUS_X + lane as i64 * 2
}

fn lane_is_fluid(placement: &Placement, lane: usize) -> bool {
    placement.bus.get(lane).and_then(|l| l.as_ref()).map(|l| l.item.is_liquid()).unwrap_or(false)
}

/// The combined layout for one [`Placement`] event and the bus width it
/// leaves behind.
pub struct StepLayout {
    pub layout: Layout,
    pub width: i64,
}

/// Lay out a single step's placement: underpasses for untouched lines,
/// offramps for consumed inputs, onramps for produced outputs, and the
/// caller-supplied process area to the right of the bus.
pub fn layout_placement(
    placement: &Placement,
    process_layout: Layout,
    process_width: i64,
    belt_type: BeltType,
) -> Result<StepLayout, LayoutError> {
    let mut step = Layout::new();
    let prev_width = placement.bus.len();
    let touched: std::collections::BTreeSet<usize> =
        placement.inputs.keys().copied().chain(placement.outputs.keys().map(|k| *k)).collect();

    for lane in 0..prev_width {
        if touched.contains(&lane) {
            continue;
        }
        let entities = if lane_is_fluid(placement, lane) { primitives::underpass_pipe() } else { primitives::underpass_belt() };
        let mut sub = Layout::new();
        for e in entities {
            sub.push(e);
        }
        step.push_at(lane_column(lane), 0, sub);
    }

    for (&lane, &(y_slot, exhausted)) in &placement.inputs {
        let is_fluid = lane_is_fluid(placement, lane);
        let entities = match (is_fluid, exhausted) {
            (true, true) => primitives::pipe_offramp_all(y_slot),
            (true, false) => primitives::pipe_ramp(y_slot),
            (false, true) => primitives::belt_offramp_all(y_slot),
            (false, false) => primitives::belt_offramp(y_slot),
        };
        let mut sub = Layout::new();
        for e in entities {
            sub.push(e);
        }
        step.push_at(lane_column(lane), 0, sub);
    }

    let new_width = prev_width.max(placement.width);
    for (&lane, (item, y_slot)) in &placement.outputs {
        let entities = if item.is_liquid() {
            primitives::pipe_surface(Orientation::Right)
        } else {
            primitives::belt_onramp_all(*y_slot)
        };
        let mut sub = Layout::new();
        for e in entities {
            sub.push(e);
        }
        step.push_at(lane_column(lane), 0, sub);
    }

    let bus_width = new_width.max(prev_width);
    let process_x = lane_column(bus_width);
    step.push_at(process_x, 0, process_layout);

    let _ = belt_type;
    Ok(StepLayout { layout: step, width: process_x + process_width })
}

/// Lay out a bare compaction/shift pass: no process area, just the
/// rearranged bus lines. Each `(dest, source)` compaction and
/// `(dest, source)` shift gets a short horizontal connector; untouched
/// lanes get an ordinary underpass.
pub fn layout_compaction(compaction: &Compaction) -> Layout {
    let mut step = Layout::new();
    let moved: std::collections::BTreeSet<usize> = compaction
        .compactions
        .iter()
        .chain(compaction.shifts.iter())
        .flat_map(|&(a, b)| [a, b])
        .collect();

    for lane in 0..compaction.bus.len() {
        if moved.contains(&lane) {
            continue;
        }
        let is_fluid = compaction.bus.get(lane).and_then(|l| l.as_ref()).map(|l| l.item.is_liquid()).unwrap_or(false);
        let entities = if is_fluid { primitives::underpass_pipe() } else { primitives::underpass_belt() };
        let mut sub = Layout::new();
        for e in entities {
            sub.push(e);
        }
        step.push_at(lane_column(lane), 0, sub);
    }

    for &(dest, source) in compaction.compactions.iter().chain(compaction.shifts.iter()) {
        let from_col = lane_column(source.min(dest));
        let to_col = lane_column(source.max(dest));
        let span = to_col - from_col;
        let mut sub = Layout::new();
        let orientation = if dest > source { Orientation::Left } else { Orientation::Right };
        for e in primitives::belt_run(0, 0, orientation, span.max(1)) {
            sub.push(e);
        }
        step.push_at(from_col, STEP - 1, sub);
    }

    step
}

pub fn events_to_layout(events: &[BusEvent]) -> Vec<(usize, Layout)> {
    events
        .iter()
        .enumerate()
        .filter_map(|(i, e)| match e {
            BusEvent::Compaction(c) => Some((i, layout_compaction(c))),
            BusEvent::Placement(_) => None,
        })
        .collect()
}

/// A convenience re-export of the entity kind table, for callers
/// assembling power/roboport coverage alongside a step's layout.
pub use kind as entity_kind;

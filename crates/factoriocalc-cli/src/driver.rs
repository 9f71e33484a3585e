//! Top-level per-step layout driver, ported from the original
//! `layouter.layout`: stacks each bus event's row, delegating the process
//! area to whichever [`factoriocalc_processor::Processor`] matches, and
//! inserting roboport coverage rows and bus power infrastructure as
//! height accumulates.
//!
//! This lives here rather than in `factoriocalc-layout` because it needs
//! both the layout primitives and the processor catalogue, and those two
//! crates cannot depend on each other (the processor crate builds its
//! fragments out of layout types).

use crate::error::CompileError;
use factoriocalc_belt::{BusEvent, Line, Placement};
use factoriocalc_calc::Step;
use factoriocalc_core::BeltType;
use factoriocalc_layout::roboport;
use factoriocalc_layout::{
    beacon_band, lane_column, layout_compaction, layout_placement, primitives, Entity, Layout, LaneKind, BEACON_ROW_HEIGHT,
    ROBOPORT_PITCH, ROBOPORT_ROW_HEIGHT, STEP,
};
use factoriocalc_processor::{find_processor, Processor};

/// `FACTORIOCALC_IGNORE_MISSING_PROCESS=1` swaps a missing processor
/// match for an empty stub instead of failing the run.
fn ignore_missing_process() -> bool {
    std::env::var(crate::compile::IGNORE_MISSING_PROCESS_ENV).map(|v| v == "1").unwrap_or(false)
}

fn lane_kinds(bus: &[Option<Line>]) -> Vec<LaneKind> {
    bus.iter()
        .map(|line| match line {
            None => LaneKind::Empty,
            Some(l) if l.item.is_liquid() => LaneKind::Pipe,
            Some(_) => LaneKind::Belt,
        })
        .collect()
}

/// One event's fully-built sub-layout, ready to be stacked at its row's y.
struct PreparedRow {
    sub: Layout,
    height: i64,
    lanes: Vec<LaneKind>,
    is_placement: bool,
}

/// A bus-lane extension spanning `lanes`, `oversize` rows tall, to carry
/// every lane past an oversize processor's extra footprint.
fn bus_extension(bus: &[Option<Line>], bus_width: usize, oversize: i64) -> Layout {
    let mut ext = Layout::new();
    for lane in 0..bus_width {
        let is_fluid = bus.get(lane).and_then(|l| l.as_ref()).map(|l| l.item.is_liquid()).unwrap_or(false);
        let entities = if is_fluid { primitives::bus_extension_pipe(oversize) } else { primitives::bus_extension_belt(oversize) };
        let mut sub = Layout::new();
        for e in entities {
            sub.push(e);
        }
        ext.push_at(lane_column(lane), 0, sub);
    }
    ext
}

fn placement_row(
    placement: &Placement,
    belt_type: BeltType,
    catalogue: &[Processor],
    beacon_module: Option<&str>,
) -> Result<(Layout, i64), CompileError> {
    let step = Step { process: placement.process.clone() };
    let (process_layout, process_width, oversize) = match find_processor(catalogue, &step, belt_type) {
        Ok(processor) => processor.layout(&step)?,
        Err(_err) if ignore_missing_process() => {
            tracing::warn!(item = %step.process.item, "no processor match, emitting empty stub");
            (Layout::new(), 1, 0)
        }
        Err(err) => return Err(err.into()),
    };
    let step_layout = layout_placement(placement, process_layout, process_width, belt_type)?;

    let mut sub = step_layout.layout;
    if let Some(module_name) = beacon_module {
        let bus_width = placement.bus.len().max(placement.width);
        let process_x = lane_column(bus_width);
        let band = beacon_band(module_name, process_width);
        sub.push_at(process_x, STEP - BEACON_ROW_HEIGHT, band);
    }
    if oversize > 0 {
        let bus_width = placement.bus.len().max(placement.width);
        let ext = bus_extension(&placement.bus, bus_width, oversize);
        sub.push_at(0, STEP, ext);
    }

    Ok((sub, STEP + oversize))
}

/// Lays out every bus event in sequence, inserting roboport rows and bus
/// power infrastructure as height accrues. Returns the composed layout
/// and the final bus width in tiles.
pub fn layout_events(
    events: &[BusEvent],
    belt_type: BeltType,
    catalogue: &[Processor],
    beacon_module: Option<&str>,
) -> Result<(Layout, i64), CompileError> {
    let mut prepared = Vec::with_capacity(events.len());
    let mut max_width = 0i64;

    for event in events {
        match event {
            BusEvent::Placement(placement) => {
                let (sub, height) = placement_row(placement, belt_type, catalogue, beacon_module)?;
                max_width = max_width.max(placement.bus.len().max(placement.width) as i64);
                prepared.push(PreparedRow { sub, height, lanes: lane_kinds(&placement.bus), is_placement: true });
            }
            BusEvent::Compaction(compaction) => {
                let layout = layout_compaction(compaction);
                max_width = max_width.max(compaction.bus.len() as i64);
                prepared.push(PreparedRow { sub: layout, height: STEP, lanes: lane_kinds(&compaction.bus), is_placement: false });
            }
        }
    }

    let mut root = Layout::new();
    let mut y = 0i64;
    let mut height_since_roboports = 0i64;
    let mut placement_index = 0usize;
    let placement_count = prepared.iter().filter(|p| p.is_placement).count();

    for row in prepared {
        if height_since_roboports >= ROBOPORT_PITCH {
            let port_row = roboport::roboport_row(&row.lanes, max_width);
            root.push_at(0, y, port_row);
            let mut port = Layout::new();
            for e in primitives::roboport() {
                port.push(e);
            }
            root.push_at(0, y - 3, port);
            y += ROBOPORT_ROW_HEIGHT;
            height_since_roboports = 0;
        }

        let is_placement = row.is_placement;
        let height = row.height;
        root.push_at(0, y, row.sub);

        if is_placement {
            placement_index += 1;
            if placement_index % 4 == 0 || placement_index == placement_count {
                let mut pole = Layout::new();
                for e in primitives::medium_pole() {
                    pole.push(e);
                }
                root.push_at(max_width + 1, (y - 2).max(0), pole);
            }
            let mut big = Layout::new();
            for e in primitives::big_pole() {
                big.push(e);
            }
            root.push_at(2, y + 1, big);
        }

        y += height;
        height_since_roboports += height;
    }

    Ok((root, max_width))
}

/// Flattens the composed layout into its entity list, or tolerates
/// overlaps/negative positions when `show_conflicts` is set so the
/// renderer can highlight them instead of erroring.
pub fn finalize(layout: &Layout, show_conflicts: bool) -> Result<Vec<Entity>, CompileError> {
    if show_conflicts {
        Ok(layout.flatten_permissive())
    } else {
        Ok(layout.flatten()?)
    }
}

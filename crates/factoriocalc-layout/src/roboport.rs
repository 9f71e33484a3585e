//! Roboport coverage rows.

use crate::entity::Point;
use crate::layout::Layout;
use crate::layouter::lane_column;
use crate::primitives;

/// Vertical distance a roboport row's logistic network covers before the
/// next row is needed.
pub const ROBOPORT_PITCH: i64 = 100;

/// Row height occupied by a roboport (it is 4x4, but shares its row with
/// the bus underpasses which only need 7 rows; the wider figure wins).
pub const ROBOPORT_ROW_HEIGHT: i64 = 7;

/// Horizontal offset of the first roboport in a row, measured from the
/// process area's left edge, and the pitch between subsequent ones.
pub const ROBOPORT_PORT_PITCH: i64 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaneKind {
    Belt,
    Pipe,
    Empty,
}

/// Whether `height_since_last_row` warrants inserting another roboport
/// row before continuing.
pub fn row_is_due(height_since_last_row: i64) -> bool {
    height_since_last_row >= ROBOPORT_PITCH
}

/// Build one roboport row spanning `lanes.len()` bus positions plus the
/// process area width to the right, each bus lane getting an underpass
/// matching its kind. `process_area_width` is the run's true width, in
/// tiles, past the bus; ports start at [`ROBOPORT_PORT_PITCH`] past the
/// bus edge and repeat at that same pitch out to the process area's end.
pub fn roboport_row(lanes: &[LaneKind], process_area_width: i64) -> Layout {
    let mut row = Layout::new();
    for (i, lane) in lanes.iter().enumerate() {
        let entities = match lane {
            LaneKind::Belt => primitives::roboport_underpass_belt(),
            LaneKind::Pipe => primitives::roboport_underpass_pipe(),
            LaneKind::Empty => Vec::new(),
        };
        let mut sub = Layout::new();
        for e in entities {
            sub.push(e);
        }
        row.push_at(lane_column(i), 0, sub);
    }

    let bus_edge = lane_column(lanes.len());
    let total_width = bus_edge + process_area_width;
    let mut x = bus_edge + ROBOPORT_PORT_PITCH;
    while x < total_width {
        let mut port = Layout::new();
        for e in primitives::roboport() {
            port.push(e);
        }
        row.push_at(x, 1, port);
        x += ROBOPORT_PORT_PITCH;
    }
    row
}

/// Anchor point of the next roboport row, given the top-left of the
/// layout it is inserted into.
pub fn row_origin(y: i64) -> Point {
    Point::new(0, y)
}

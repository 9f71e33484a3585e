//! 2-D tile layouter: the bus area, ramps, compaction routing, roboport
//! coverage, and the [`Layout`] tree itself.

pub mod beacon;
pub mod entity;
pub mod error;
pub mod layout;
pub mod layouter;
pub mod primitives;
pub mod roboport;

pub use beacon::{beacon_band, BEACON_ROW_HEIGHT, BEACON_SPACING};
pub use entity::{kind, Entity, Orientation, Point};
pub use error::LayoutError;
pub use layout::Layout;
pub use layouter::{lane_column, layout_compaction, layout_placement, StepLayout, BUS_X, STEP};
pub use roboport::{roboport_row, row_is_due, LaneKind, ROBOPORT_PITCH, ROBOPORT_PORT_PITCH, ROBOPORT_ROW_HEIGHT};

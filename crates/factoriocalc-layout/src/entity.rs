//! Entities and orientations, grounded on the original
//! `primitives.Entity` namedtuple.

use serde_json::Value;
use std::collections::BTreeMap;

/// 0 = Up, 1 = Right, 2 = Down, 3 = Left. The blueprint codec doubles these
/// when writing the `direction` field, and elides `Up`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Orientation {
    Up,
    Right,
    Down,
    Left,
}

impl Orientation {
    pub fn to_vector(self) -> (i64, i64) {
        match self {
            Orientation::Up => (0, -1),
            Orientation::Right => (1, 0),
            Orientation::Down => (0, 1),
            Orientation::Left => (-1, 0),
        }
    }

    /// The internal 0-3 code, doubled as the blueprint's `direction` field
    /// expects.
    pub fn blueprint_direction(self) -> u8 {
        (self as u8) * 2
    }
}

/// Integer grid position; `x` grows right, `y` grows down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Point {
    pub x: i64,
    pub y: i64,
}

impl Point {
    pub fn new(x: i64, y: i64) -> Self {
        Point { x, y }
    }

    pub fn translate(self, dx: i64, dy: i64) -> Self {
        Point { x: self.x + dx, y: self.y + dy }
    }
}

impl std::ops::Add for Point {
    type Output = Point;
    fn add(self, rhs: Point) -> Point {
        Point { x: self.x + rhs.x, y: self.y + rhs.y }
    }
}

/// One tile-footprint game entity: a belt segment, a pump, a splitter, an
/// assembler, etc. `attrs` carries whatever extra blueprint fields the
/// entity kind needs (e.g. `recipe`, `items`, `output_priority`).
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    pub name: String,
    pub position: Point,
    pub orientation: Option<Orientation>,
    pub attrs: BTreeMap<String, Value>,
}

impl Entity {
    pub fn new(x: i64, y: i64, name: impl Into<String>) -> Self {
        Entity {
            name: name.into(),
            position: Point::new(x, y),
            orientation: None,
            attrs: BTreeMap::new(),
        }
    }

    pub fn oriented(mut self, orientation: Orientation) -> Self {
        self.orientation = Some(orientation);
        self
    }

    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attrs.insert(key.into(), value.into());
        self
    }

    pub fn translated(&self, dx: i64, dy: i64) -> Entity {
        let mut e = self.clone();
        e.position = e.position.translate(dx, dy);
        e
    }
}

/// Names for the game entities this compiler emits, grounded on the
/// original `_Entities` name table.
pub mod kind {
    pub const UNDERGROUND_PIPE: &str = "underground pipe";
    pub const PIPE: &str = "pipe";
    pub const PUMP: &str = "pump";
    pub const BELT: &str = "express belt";
    pub const UNDERGROUND_BELT: &str = "express underground belt";
    pub const MEDIUM_POLE: &str = "medium-electric-pole";
    pub const BIG_POLE: &str = "big-electric-pole";
    pub const BEACON: &str = "beacon";
    pub const INSERTER: &str = "stack-inserter";
    pub const ASSEMBLER: &str = "assembly-machine-3";
    pub const FURNACE: &str = "electric-furnace";
    pub const CHEMICAL_PLANT: &str = "chemical-plant";
    pub const REFINERY: &str = "oil-refinery";
    pub const ROCKET_SILO: &str = "rocket-silo";
    pub const LAB: &str = "lab";
    pub const SPLITTER: &str = "express belt splitter";
    pub const ROBOPORT: &str = "roboport";
    pub const SPEED_MODULE: &str = "speed-module-3";
    pub const CHEST: &str = "steel-chest";
}

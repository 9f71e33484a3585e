//! Small reusable tile patterns, ported
//! directly from the original `primitives.py`. Every primitive returns
//! entities relative to its own origin `(0, 0)`; callers translate them
//! into place via [`crate::layout::Layout::push_at`].

use crate::entity::{kind, Entity, Orientation};
use serde_json::json;

fn belt_to_ground(x: i64, y: i64, o: Orientation) -> Entity {
    Entity::new(x, y, kind::UNDERGROUND_BELT).oriented(o).with_attr("type", "input")
}

fn belt_from_ground(x: i64, y: i64, o: Orientation) -> Entity {
    Entity::new(x, y, kind::UNDERGROUND_BELT).oriented(o).with_attr("type", "output")
}

/// A bus pipe with a pump, plus an underground pipe pair spanning the
/// 10-row step so liquid can flow underneath the working area.
pub fn underpass_pipe() -> Vec<Entity> {
    vec![
        Entity::new(0, 0, kind::PUMP).oriented(Orientation::Down),
        Entity::new(0, 2, kind::UNDERGROUND_PIPE).oriented(Orientation::Down),
        Entity::new(0, 9, kind::UNDERGROUND_PIPE).oriented(Orientation::Up),
    ]
}

/// As [`underpass_pipe`], but without the pump (used when y_slot 0 is
/// occupied by a horizontal surface).
pub fn underpass_pipe_no_pump() -> Vec<Entity> {
    vec![
        Entity::new(0, 0, kind::UNDERGROUND_PIPE).oriented(Orientation::Down),
        Entity::new(0, 9, kind::UNDERGROUND_PIPE).oriented(Orientation::Up),
    ]
}

/// A bus underground belt spanning the 10-row step.
pub fn underpass_belt() -> Vec<Entity> {
    vec![belt_to_ground(0, 0, Orientation::Down), belt_from_ground(0, 9, Orientation::Down)]
}

/// A shorter underground pipe span, for going under a roboport row.
pub fn roboport_underpass_pipe() -> Vec<Entity> {
    vec![
        Entity::new(0, 0, kind::UNDERGROUND_PIPE).oriented(Orientation::Down),
        Entity::new(0, 6, kind::UNDERGROUND_PIPE).oriented(Orientation::Up),
    ]
}

/// As [`roboport_underpass_pipe`], for belts.
pub fn roboport_underpass_belt() -> Vec<Entity> {
    vec![belt_to_ground(0, 0, Orientation::Down), belt_from_ground(0, 6, Orientation::Down)]
}

/// A run of `length` belt segments in `orientation`, starting at
/// `(base_x, base_y)`.
pub fn belt_run(base_x: i64, base_y: i64, orientation: Orientation, length: i64) -> Vec<Entity> {
    let (dx, dy) = orientation.to_vector();
    (0..length).map(|i| Entity::new(base_x + i * dx, base_y + i * dy, kind::BELT).oriented(orientation)).collect()
}

/// An underground belt "coming up for air": output then input again
/// immediately, so a surface-level splitter/inserter can reach it.
pub fn belt_surface(orientation: Orientation) -> Vec<Entity> {
    let (dx, dy) = orientation.to_vector();
    vec![belt_from_ground(0, 0, orientation), belt_to_ground(dx, dy, orientation)]
}

/// As [`belt_surface`], for pipes.
pub fn pipe_surface(orientation: Orientation) -> Vec<Entity> {
    let (dx, dy) = orientation.to_vector();
    vec![
        Entity::new(0, 0, kind::UNDERGROUND_PIPE).oriented(orientation),
        Entity::new(dx, dy, kind::UNDERGROUND_PIPE).oriented(orientation),
    ]
}

/// Take items off a continuing belt at `y_slot`: a splitter peels the
/// process's share onto an underground belt running right, the remainder
/// continues down.
pub fn belt_offramp(y_slot: i64) -> Vec<Entity> {
    let mut out = belt_run(0, 0, Orientation::Down, y_slot);
    out.push(Entity::new(0, y_slot, kind::SPLITTER).oriented(Orientation::Down).with_attr("output_priority", json!("right")));
    out.push(Entity::new(0, y_slot + 1, kind::BELT).oriented(Orientation::Down));
    out.push(belt_to_ground(1, y_slot + 1, Orientation::Down));
    out.push(Entity::new(0, y_slot + 2, kind::BELT).oriented(Orientation::Right));
    out.push(belt_to_ground(1, y_slot + 2, Orientation::Right));
    out.push(belt_from_ground(1, y_slot + 3, Orientation::Down));
    out.push(Entity::new(0, y_slot + 4, kind::BELT).oriented(Orientation::Down));
    out.push(Entity::new(1, y_slot + 4, kind::BELT).oriented(Orientation::Left));
    out.extend(belt_run(0, y_slot + 5, Orientation::Down, 5 - y_slot));
    out
}

/// As [`belt_offramp`], but the whole line is consumed: the belt does not
/// continue past `y_slot`.
pub fn belt_offramp_all(y_slot: i64) -> Vec<Entity> {
    let mut out = belt_run(0, 0, Orientation::Down, y_slot + 2);
    out.push(Entity::new(0, y_slot + 2, kind::BELT).oriented(Orientation::Right));
    out.push(belt_to_ground(1, y_slot + 2, Orientation::Right));
    out
}

/// Take liquid off (or put it on) a continuing pipe at `y_slot`.
pub fn pipe_ramp(y_slot: i64) -> Vec<Entity> {
    let mut out: Vec<Entity> = (0..10).map(|i| Entity::new(0, i, kind::PIPE)).collect();
    out.push(Entity::new(1, y_slot + 2, kind::UNDERGROUND_PIPE).oriented(Orientation::Left));
    out
}

/// As [`belt_offramp_all`], for pipes.
pub fn pipe_offramp_all(y_slot: i64) -> Vec<Entity> {
    let mut out: Vec<Entity> = (0..(y_slot + 3)).map(|i| Entity::new(0, i, kind::PIPE)).collect();
    out.push(Entity::new(1, y_slot + 2, kind::PIPE));
    out
}

/// Move an underground belt's output (surfacing right of `(1, 0)`) onto a
/// new line running down for `height` tiles.
pub fn belt_onramp_all(height: i64) -> Vec<Entity> {
    let mut out = belt_run(0, 0, Orientation::Down, height + 1);
    out.push(belt_from_ground(1, 0, Orientation::Left));
    out
}

pub fn medium_pole() -> Vec<Entity> {
    vec![Entity::new(0, 0, kind::MEDIUM_POLE)]
}

pub fn big_pole() -> Vec<Entity> {
    vec![Entity::new(0, 0, kind::BIG_POLE)]
}

pub fn beacon(module_name: &str) -> Vec<Entity> {
    vec![Entity::new(0, 0, kind::BEACON).with_attr("items", json!({ module_name: 2 }))]
}

pub fn roboport() -> Vec<Entity> {
    vec![Entity::new(0, 0, kind::ROBOPORT)]
}

/// A plain vertical belt run used to carry a bus lane past an oversize
/// step's extra rows. No underground clearance needed: nothing else
/// shares these rows.
pub fn bus_extension_belt(height: i64) -> Vec<Entity> {
    belt_run(0, 0, Orientation::Down, height)
}

/// As [`bus_extension_belt`], for a liquid lane.
pub fn bus_extension_pipe(height: i64) -> Vec<Entity> {
    (0..height).map(|i| Entity::new(0, i, kind::PIPE)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offramp_all_stays_within_y_slot_plus_two_rows() {
        let entities = belt_offramp_all(3);
        assert!(entities.iter().all(|e| e.position.y <= 5));
    }

    #[test]
    fn underpass_spans_the_full_ten_row_step() {
        let entities = underpass_belt();
        assert_eq!(entities[0].position.y, 0);
        assert_eq!(entities[1].position.y, 9);
    }
}

//! The Layout tree.

use crate::entity::Entity;
use crate::error::LayoutError;
use std::collections::BTreeMap;

/// A subtree of entities, each at a position relative to this layout's
/// origin. Positions inside a subtree may be negative; only the fully
/// flattened result must be non-negative.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Layout {
    pub entities: Vec<Entity>,
    pub children: Vec<(i64, i64, Layout)>,
}

impl Layout {
    pub fn new() -> Self {
        Layout::default()
    }

    pub fn from_entities(entities: Vec<Entity>) -> Self {
        Layout { entities, children: Vec::new() }
    }

    pub fn push(&mut self, entity: Entity) {
        self.entities.push(entity);
    }

    pub fn push_at(&mut self, dx: i64, dy: i64, child: Layout) {
        self.children.push((dx, dy, child));
    }

    /// Pre-order traversal accumulating absolute positions.
    pub fn flatten(&self) -> Result<Vec<Entity>, LayoutError> {
        let mut out = Vec::new();
        self.flatten_into(0, 0, &mut out);
        let mut claimed: BTreeMap<(i64, i64), String> = BTreeMap::new();
        for entity in &out {
            if entity.position.x < 0 || entity.position.y < 0 {
                return Err(LayoutError::NegativePosition {
                    name: entity.name.clone(),
                    x: entity.position.x,
                    y: entity.position.y,
                });
            }
            let key = (entity.position.x, entity.position.y);
            if let Some(existing) = claimed.insert(key, entity.name.clone()) {
                return Err(LayoutError::Overlap {
                    x: key.0,
                    y: key.1,
                    first: existing,
                    second: entity.name.clone(),
                });
            }
        }
        Ok(out)
    }

    /// As [`Layout::flatten`], but overlaps are tolerated: the caller is
    /// expected to mark conflicts some other way.
    pub fn flatten_permissive(&self) -> Vec<Entity> {
        let mut out = Vec::new();
        self.flatten_into(0, 0, &mut out);
        out
    }

    fn flatten_into(&self, ox: i64, oy: i64, out: &mut Vec<Entity>) {
        for entity in &self.entities {
            out.push(entity.translated(ox, oy));
        }
        for (dx, dy, child) in &self.children {
            child.flatten_into(ox + dx, oy + dy, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flatten_accumulates_positions_through_nesting() {
        let mut inner = Layout::new();
        inner.push(Entity::new(1, 1, "belt"));
        let mut outer = Layout::new();
        outer.push_at(5, 5, inner);
        let flat = outer.flatten().unwrap();
        assert_eq!(flat.len(), 1);
        assert_eq!((flat[0].position.x, flat[0].position.y), (6, 6));
    }

    #[test]
    fn negative_position_after_flatten_is_rejected() {
        let mut layout = Layout::new();
        layout.push(Entity::new(-1, 0, "belt"));
        assert!(matches!(layout.flatten(), Err(LayoutError::NegativePosition { .. })));
    }

    #[test]
    fn overlap_is_detected() {
        let mut layout = Layout::new();
        layout.push(Entity::new(0, 0, "belt"));
        layout.push(Entity::new(0, 0, "pipe"));
        assert!(matches!(layout.flatten(), Err(LayoutError::Overlap { .. })));
    }
}

//! Line-capacity rules: how many items/sec a single belt or
//! pipe line can carry, which the step splitter and belt manager both
//! depend on.

use crate::item::Item;
use crate::rational::{rat, Rat};

/// Belt tier, selected once per compilation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum BeltType {
    Yellow,
    Red,
    Blue,
}

impl BeltType {
    /// Items/sec a single belt of this tier can carry.
    pub fn items_per_sec(self) -> Rat {
        match self {
            BeltType::Yellow => rat(15),
            BeltType::Red => rat(30),
            BeltType::Blue => rat(45),
        }
    }
}

impl Default for BeltType {
    fn default() -> Self {
        BeltType::Blue
    }
}

/// A conservative fixed pipe throughput limit (~1020/sec), independent of
/// belt tier and derived from the game's per-tick pipe flow cap.
pub const PIPE_LIMIT: i64 = 1020;

/// The maximum throughput one physical line (belt or pipe) can carry for
/// `item` at the given belt tier.
pub fn line_limit(item: &Item, belt_type: BeltType) -> Rat {
    if item.is_liquid() {
        rat(PIPE_LIMIT)
    } else {
        belt_type.items_per_sec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solids_use_belt_tier_capacity() {
        assert_eq!(line_limit(&Item::new("iron plate"), BeltType::Blue), rat(45));
        assert_eq!(line_limit(&Item::new("iron plate"), BeltType::Red), rat(30));
        assert_eq!(line_limit(&Item::new("iron plate"), BeltType::Yellow), rat(15));
    }

    #[test]
    fn liquids_ignore_belt_tier() {
        assert_eq!(line_limit(&Item::new("petroleum"), BeltType::Yellow), rat(1020));
        assert_eq!(line_limit(&Item::new("petroleum"), BeltType::Blue), rat(1020));
    }
}

//! Item names. Items are opaque, lower-cased, and partitioned into solids
//! and liquids; the liquid set is fixed by the game's rules, not data-driven.

use std::fmt;
use std::rc::Rc;

/// An opaque, case-insensitive item name. Cloning is a refcount bump, which
/// matters because the calculator clones item names through every level of
/// a recursive recipe expansion.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Item(Rc<str>);

impl Item {
    /// Construct an item, lower-casing the name so all comparisons and
    /// lookups are automatically case-insensitive.
    pub fn new(name: impl AsRef<str>) -> Self {
        Item(Rc::from(name.as_ref().to_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this item is one of the fixed liquid items (real fluids plus
    /// the virtual oil-balancing items).
    pub fn is_liquid(&self) -> bool {
        LIQUIDS.contains(&self.0.as_ref())
    }
}

impl fmt::Debug for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Item({:?})", self.0)
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Item {
    fn from(s: &str) -> Self {
        Item::new(s)
    }
}

impl From<String> for Item {
    fn from(s: String) -> Self {
        Item::new(s)
    }
}

/// The fixed set of liquid items, including the virtual oil-balancing
/// pseudo-items produced by [`crate::oil`]-adjacent machinery in
/// `factoriocalc-calc`.
pub const LIQUIDS: &[&str] = &[
    "crude oil",
    "water",
    "heavy oil",
    "light oil",
    "petroleum",
    "sulfuric acid",
    "lubricant",
    "oil products",
    "heavy oil cracking",
    "light oil cracking",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn case_insensitive_construction() {
        assert_eq!(Item::new("Iron Plate"), Item::new("iron plate"));
        assert_eq!(Item::new("IRON PLATE"), Item::new("iron plate"));
    }

    #[test]
    fn liquid_classification() {
        assert!(Item::new("Petroleum").is_liquid());
        assert!(Item::new("oil products").is_liquid());
        assert!(!Item::new("iron plate").is_liquid());
    }

    #[test]
    fn cheap_clone_preserves_equality() {
        let a = Item::new("copper wire");
        let b = a.clone();
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "copper wire");
    }

    #[test]
    fn ordering_is_lexical_on_lowercased_name() {
        let mut items = vec![Item::new("Zinc"), Item::new("apple"), Item::new("Mango")];
        items.sort();
        let names: Vec<&str> = items.iter().map(Item::as_str).collect();
        assert_eq!(names, vec!["apple", "mango", "zinc"]);
    }
}

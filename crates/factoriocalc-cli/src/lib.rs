//! End-to-end blueprint compiler driver: recipe loading,
//! calculation, scheduling, layout, and blueprint/render output, all
//! wired together behind one [`compile::compile`] call.

pub mod compile;
pub mod driver;
pub mod error;

pub use compile::{compile, CompileOutput};
pub use error::CompileError;

#[cfg(test)]
mod tests {
    use super::*;
    use factoriocalc_core::rational::rat;
    use factoriocalc_core::{InvocationConfig, Item};
    use std::collections::BTreeMap;

    const GEARS_DB: &str = "\
assembler builds at 1.25 with 4 modules\n\
gear takes 0.5 in assembler, 1 iron plate\n\
";

    #[test]
    fn compiles_a_single_gear_demand_end_to_end() {
        let registry = factoriocalc_data::load_str(GEARS_DB).unwrap();
        let mut items = BTreeMap::new();
        items.insert(Item::new("gear"), rat(5));
        let config = InvocationConfig { items, ..InvocationConfig::default() };
        let output = compile(registry, &config).unwrap();
        assert!(!output.entities.is_empty());
        assert!(output.blueprint_string.starts_with('0'));
        assert!(!output.ascii_art.is_empty());
    }
}

//! Processor matching errors.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProcessorError {
    #[error("no processor registered for building {building:?} with inputs {inputs:?} and outputs {outputs:?}")]
    NoMatch { building: String, inputs: Signature, outputs: Signature },
}

/// `(liquid, belt, half-belt)` counts, used both for what a processor
/// offers and what a step needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Signature {
    pub liquid: u32,
    pub belt: u32,
    pub half_belt: u32,
}

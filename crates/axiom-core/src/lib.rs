#![deny(unsafe_code)]
//! The Universal Axiom numeric model and its simulator.
//!
//! `Intelligence_n = E_n · (1 + F_n) · X · Y · Z · (A · B · C)`
//!
//! - Foundation layer: impulses (A), elements (B), pressure (C)
//! - Dynamic layer: exponential growth (E_n), Fibonacci regulation (F_n)
//! - Cognitive layer: objectivity (X = 1 - subjectivity), purpose (Y), time (Z)
//!
//! # Numeric policy
//!
//! Mutators never fail: pressure and purpose are floored at 0.01 and
//! subjectivity is clamped to [0, 1]. `n` is clamped to `[1, MAX_N]`.
//! Growth terms saturate instead of overflowing: `F_n` at
//! [`MAX_SAFE_INTEGER`], `E_n` and the products at [`MAX_SAFE_VALUE`].

pub mod axiom;
pub mod config;
pub mod error;
pub mod layers;
pub mod simulator;
pub mod state;

#[cfg(test)]
mod tests;

pub use axiom::UniversalAxiom;
pub use config::{AxiomConfig, ResolvedConfig};
pub use error::{AxiomError, AxiomResult};
pub use layers::{
    fibonacci_sequence, CognitiveLayer, DynamicLayer, FoundationLayer, MAX_N, MAX_SAFE_INTEGER,
    MAX_SAFE_VALUE,
};
pub use simulator::{coherence_of, AxiomSimulator, CoherenceBand, EnvironmentalChanges};
pub use state::{AxiomState, CognitiveState, DynamicState, FoundationState};

//! Prometheus gauges for axiom sessions.

pub mod metrics;

#[cfg(test)]
mod tests;

pub use metrics::{coherence_regressed, AxiomMetrics};

//! Baseline versus axiom-guided benchmark harness.
//!
//! A [`ModelAdapter`] produces responses, a [`SignalExtractor`] maps each
//! response onto the seven axiom inputs, and the core scores the result.
//! Model access and signal extraction are left to implementors.

pub mod model;
pub mod runner;
pub mod writer;


pub use model::{
    AxiomSignals, BenchmarkMode, BenchmarkResult, BenchmarkScenario, ModelAdapter, RunConfig,
    ScenarioSource, SignalExtractor,
};
pub use runner::{summarize, BenchmarkRunner, BenchmarkSummary, ModeStats};
pub use writer::{find_scenario, BenchmarkReport, JsonResultWriter, ResultWriter, StaticScenarios};

use anyhow::Result;
use axiom_core::{AxiomConfig, UniversalAxiom};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BenchmarkMode {
    Baseline,
    AxiomGuided,
}

impl BenchmarkMode {
    pub fn as_str(self) -> &'static str {
        match self {
            BenchmarkMode::Baseline => "baseline",
            BenchmarkMode::AxiomGuided => "axiom_guided",
        }
    }
}

/// The seven model inputs read off a response.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxiomSignals {
    pub impulses: f64,
    pub elements: f64,
    pub pressure: f64,
    pub subjectivity: f64,
    pub purpose: f64,
    pub time: f64,
    pub n: i64,
}

impl AxiomSignals {
    pub fn to_config(&self) -> AxiomConfig {
        AxiomConfig::default()
            .impulses(self.impulses)
            .elements(self.elements)
            .pressure(self.pressure)
            .subjectivity(self.subjectivity)
            .purpose(self.purpose)
            .time(self.time)
            .n(self.n)
    }

    pub fn to_axiom(&self) -> UniversalAxiom {
        UniversalAxiom::from_config(&self.to_config())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenchmarkScenario {
    pub scenario_id: String,
    pub prompt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub axiom_context: Option<String>,
}

impl BenchmarkScenario {
    pub fn new(scenario_id: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            scenario_id: scenario_id.into(),
            prompt: prompt.into(),
            axiom_context: None,
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.axiom_context = Some(context.into());
        self
    }

    /// Guided mode appends the axiom context after a blank line.
    pub fn render_prompt(&self, mode: BenchmarkMode) -> String {
        match (mode, &self.axiom_context) {
            (BenchmarkMode::AxiomGuided, Some(context)) if !context.is_empty() => {
                format!("{}\n\n{}", self.prompt, context)
            }
            _ => self.prompt.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkResult {
    pub model_id: String,
    pub scenario_id: String,
    pub mode: BenchmarkMode,
    pub prompt: String,
    pub response: String,
    pub signals: AxiomSignals,
    pub intelligence: f64,
    pub coherence: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunConfig {
    pub modes: Vec<BenchmarkMode>,
    pub repetitions: usize,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            modes: vec![BenchmarkMode::Baseline, BenchmarkMode::AxiomGuided],
            repetitions: 1,
        }
    }
}

pub trait ModelAdapter {
    fn model_id(&self) -> &str;
    fn generate(&mut self, prompt: &str, mode: BenchmarkMode) -> Result<String>;
}

pub trait SignalExtractor {
    fn extract(&self, prompt: &str, response: &str) -> Result<AxiomSignals>;
}

pub trait ScenarioSource {
    fn load(&self) -> Result<Vec<BenchmarkScenario>>;
}

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use axiom_core::coherence_of;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::model::{
    BenchmarkMode, BenchmarkResult, BenchmarkScenario, ModelAdapter, RunConfig, SignalExtractor,
};

pub struct BenchmarkRunner<A, E> {
    adapter: A,
    extractor: E,
}

impl<A: ModelAdapter, E: SignalExtractor> BenchmarkRunner<A, E> {
    pub fn new(adapter: A, extractor: E) -> Self {
        Self { adapter, extractor }
    }

    pub fn run(&mut self, scenarios: &[BenchmarkScenario]) -> Result<Vec<BenchmarkResult>> {
        self.run_with_config(scenarios, &RunConfig::default())
    }

    /// One result per scenario, mode and repetition, in that nesting order.
    pub fn run_with_config(
        &mut self,
        scenarios: &[BenchmarkScenario],
        config: &RunConfig,
    ) -> Result<Vec<BenchmarkResult>> {
        info!(
            model_id = self.adapter.model_id(),
            scenarios = scenarios.len(),
            repetitions = config.repetitions,
            "running benchmark"
        );
        let mut results = Vec::new();

        for scenario in scenarios {
            for &mode in &config.modes {
                for _ in 0..config.repetitions {
                    let prompt = scenario.render_prompt(mode);
                    let response = self
                        .adapter
                        .generate(&prompt, mode)
                        .with_context(|| {
                            format!("generating response for {}", scenario.scenario_id)
                        })?;
                    let signals = self
                        .extractor
                        .extract(&prompt, &response)
                        .with_context(|| {
                            format!("extracting signals for {}", scenario.scenario_id)
                        })?;

                    let axiom = signals.to_axiom();
                    let intelligence = axiom.compute_intelligence();
                    let coherence = coherence_of(&axiom);
                    debug!(
                        scenario = %scenario.scenario_id,
                        mode = mode.as_str(),
                        intelligence,
                        coherence,
                        "scored response"
                    );

                    results.push(BenchmarkResult {
                        model_id: self.adapter.model_id().to_string(),
                        scenario_id: scenario.scenario_id.clone(),
                        mode,
                        prompt,
                        response,
                        signals,
                        intelligence,
                        coherence,
                    });
                }
            }
        }

        Ok(results)
    }

    pub fn into_parts(self) -> (A, E) {
        (self.adapter, self.extractor)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModeStats {
    pub count: usize,
    pub intelligence_mean: f64,
    pub intelligence_median: f64,
    pub coherence_mean: f64,
    pub coherence_median: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkSummary {
    pub per_mode: BTreeMap<BenchmarkMode, ModeStats>,
    /// Guided mean minus baseline mean; `None` unless both modes ran.
    pub intelligence_delta: Option<f64>,
    pub coherence_delta: Option<f64>,
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

fn median(values: &[f64]) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

pub fn summarize(results: &[BenchmarkResult]) -> BenchmarkSummary {
    let mut grouped: BTreeMap<BenchmarkMode, (Vec<f64>, Vec<f64>)> = BTreeMap::new();
    for result in results {
        let (intelligence, coherence) = grouped.entry(result.mode).or_default();
        intelligence.push(result.intelligence);
        coherence.push(result.coherence);
    }

    let per_mode: BTreeMap<BenchmarkMode, ModeStats> = grouped
        .into_iter()
        .map(|(mode, (intelligence, coherence))| {
            let stats = ModeStats {
                count: intelligence.len(),
                intelligence_mean: mean(&intelligence),
                intelligence_median: median(&intelligence),
                coherence_mean: mean(&coherence),
                coherence_median: median(&coherence),
            };
            (mode, stats)
        })
        .collect();

    let (intelligence_delta, coherence_delta) = match (
        per_mode.get(&BenchmarkMode::Baseline),
        per_mode.get(&BenchmarkMode::AxiomGuided),
    ) {
        (Some(baseline), Some(guided)) => (
            Some(guided.intelligence_mean - baseline.intelligence_mean),
            Some(guided.coherence_mean - baseline.coherence_mean),
        ),
        _ => (None, None),
    };

    BenchmarkSummary {
        per_mode,
        intelligence_delta,
        coherence_delta,
    }
}

use std::io::Write;

use anyhow::{Context, Result};
use axiom_core::{AxiomError, AxiomResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{BenchmarkResult, BenchmarkScenario, ScenarioSource};
use crate::runner::BenchmarkSummary;

pub trait ResultWriter {
    fn write(&mut self, results: &[BenchmarkResult], summary: &BenchmarkSummary) -> Result<()>;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkReport {
    pub generated_at: DateTime<Utc>,
    pub results: Vec<BenchmarkResult>,
    pub summary: BenchmarkSummary,
}

/// Pretty-printed JSON report, one per `write` call.
pub struct JsonResultWriter<W> {
    out: W,
}

impl<W: Write> JsonResultWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ResultWriter for JsonResultWriter<W> {
    fn write(&mut self, results: &[BenchmarkResult], summary: &BenchmarkSummary) -> Result<()> {
        let report = BenchmarkReport {
            generated_at: Utc::now(),
            results: results.to_vec(),
            summary: summary.clone(),
        };
        serde_json::to_writer_pretty(&mut self.out, &report).context("writing benchmark report")?;
        writeln!(self.out)?;
        Ok(())
    }
}

/// In-memory scenario list.
#[derive(Debug, Clone, Default)]
pub struct StaticScenarios(pub Vec<BenchmarkScenario>);

impl ScenarioSource for StaticScenarios {
    fn load(&self) -> Result<Vec<BenchmarkScenario>> {
        Ok(self.0.clone())
    }
}

pub fn find_scenario<'a>(
    scenarios: &'a [BenchmarkScenario],
    scenario_id: &str,
) -> AxiomResult<&'a BenchmarkScenario> {
    scenarios
        .iter()
        .find(|s| s.scenario_id == scenario_id)
        .ok_or_else(|| AxiomError::UnknownScenario(scenario_id.to_string()))
}

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::axiom::UniversalAxiom;
use crate::state::AxiomState;

/// Subjectivity reduction applied on every contradiction-resolution step.
pub const SUBJECTIVITY_STEP: f64 = 0.1;

pub const DEFAULT_EVOLUTION_STEPS: usize = 10;
pub const DEFAULT_DELTA_TIME: f64 = 1.0;
pub const DEFAULT_INITIAL_PRESSURE: f64 = 2.0;
pub const DEFAULT_RESOLUTION_STEPS: usize = 5;

/// Per-step external drift applied during trajectory prediction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvironmentalChanges {
    pub pressure_per_step: Option<f64>,
    pub subjectivity_per_step: Option<f64>,
    /// Passed to `strengthen_purpose` each step.
    pub purpose_multiplier_per_step: Option<f64>,
}

/// Qualitative reading of a coherence score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoherenceBand {
    High,
    Moderate,
    Low,
}

impl CoherenceBand {
    pub fn from_score(coherence: f64) -> Self {
        if coherence > 0.7 {
            CoherenceBand::High
        } else if coherence > 0.4 {
            CoherenceBand::Moderate
        } else {
            CoherenceBand::Low
        }
    }

    pub fn interpretation(self) -> &'static str {
        match self {
            CoherenceBand::High => "High coherence - system is well-aligned",
            CoherenceBand::Moderate => "Moderate coherence - some adjustment needed",
            CoherenceBand::Low => "Low coherence - significant realignment required",
        }
    }
}

/// Coherence of a single model state, in [0, 1].
///
/// Mean of objectivity, `min(purpose / 2, 1)` and `1 / (1 + |pressure - 1|)`.
/// Each sub-score is clamped to [0, 1] so unvalidated construction inputs
/// cannot push the mean out of range.
pub fn coherence_of(axiom: &UniversalAxiom) -> f64 {
    let objectivity_score = axiom.objectivity().clamp(0.0, 1.0);
    let purpose_score = (axiom.purpose() / 2.0).clamp(0.0, 1.0);
    let pressure_score = (1.0 / (1.0 + (axiom.pressure() - 1.0).abs())).clamp(0.0, 1.0);

    (objectivity_score + purpose_score + pressure_score) / 3.0
}

/// Drives a borrowed [`UniversalAxiom`] through mutation sequences and
/// records a snapshot after every step.
///
/// The model is mutated in place: a second run continues from where the
/// first left it. Only the trajectory is reset between runs.
#[derive(Debug)]
pub struct AxiomSimulator<'a> {
    axiom: &'a mut UniversalAxiom,
    history: Vec<AxiomState>,
}

impl<'a> AxiomSimulator<'a> {
    pub fn new(axiom: &'a mut UniversalAxiom) -> Self {
        Self {
            axiom,
            history: Vec::new(),
        }
    }

    pub fn axiom(&self) -> &UniversalAxiom {
        self.axiom
    }

    fn record_state(&mut self) {
        let state = self.axiom.get_state();
        trace!(
            step = self.history.len(),
            n = state.n,
            intelligence = state.intelligence,
            "recorded state"
        );
        self.history.push(state);
    }

    /// `steps` evolve calls; returns `steps + 1` snapshots.
    pub fn simulate_evolution(&mut self, steps: usize, delta_time: f64) -> &[AxiomState] {
        debug!(steps, delta_time, "simulating evolution");
        self.history.clear();
        self.record_state();

        for _ in 0..steps {
            self.axiom.evolve(delta_time);
            self.record_state();
        }

        &self.history
    }

    pub fn simulate_evolution_default(&mut self) -> &[AxiomState] {
        self.simulate_evolution(DEFAULT_EVOLUTION_STEPS, DEFAULT_DELTA_TIME)
    }

    /// Pressure spike followed by gradual release; returns
    /// `resolution_steps + 2` snapshots.
    pub fn simulate_contradiction_resolution(
        &mut self,
        initial_pressure: f64,
        resolution_steps: usize,
    ) -> &[AxiomState] {
        debug!(
            initial_pressure,
            resolution_steps, "simulating contradiction resolution"
        );
        self.history.clear();
        self.record_state();

        self.axiom.apply_pressure(initial_pressure);
        self.record_state();

        if resolution_steps > 0 {
            let pressure_release = -initial_pressure / resolution_steps as f64;
            for _ in 0..resolution_steps {
                self.axiom.adjust_subjectivity(-SUBJECTIVITY_STEP);
                self.axiom.apply_pressure(pressure_release);
                self.axiom.evolve(DEFAULT_DELTA_TIME);
                self.record_state();
            }
        }

        &self.history
    }

    pub fn simulate_contradiction_resolution_default(&mut self) -> &[AxiomState] {
        self.simulate_contradiction_resolution(DEFAULT_INITIAL_PRESSURE, DEFAULT_RESOLUTION_STEPS)
    }

    /// Applies `changes` then evolves, `future_steps` times; returns
    /// `future_steps + 1` snapshots.
    pub fn simulate_trajectory(
        &mut self,
        future_steps: usize,
        changes: EnvironmentalChanges,
    ) -> &[AxiomState] {
        debug!(future_steps, ?changes, "predicting trajectory");
        self.history.clear();
        self.record_state();

        for _ in 0..future_steps {
            if let Some(delta) = changes.pressure_per_step.filter(|d| *d != 0.0) {
                self.axiom.apply_pressure(delta);
            }
            if let Some(delta) = changes.subjectivity_per_step.filter(|d| *d != 0.0) {
                self.axiom.adjust_subjectivity(delta);
            }
            if let Some(multiplier) = changes.purpose_multiplier_per_step.filter(|m| *m != 0.0) {
                self.axiom.strengthen_purpose(multiplier);
            }
            self.axiom.evolve(DEFAULT_DELTA_TIME);
            self.record_state();
        }

        &self.history
    }

    /// Coherence of the model's current state, not of the trajectory.
    pub fn get_coherence_metric(&self) -> f64 {
        coherence_of(self.axiom)
    }

    pub fn get_history(&self) -> &[AxiomState] {
        &self.history
    }

    pub fn into_history(self) -> Vec<AxiomState> {
        self.history
    }
}

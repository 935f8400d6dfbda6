use std::fmt;

use tracing::debug;

use crate::config::AxiomConfig;
use crate::error::AxiomResult;
use crate::layers::{
    saturating_product, CognitiveLayer, DynamicLayer, FoundationLayer, MAX_N, MIN_PRESSURE,
    MIN_PURPOSE,
};
use crate::state::{AxiomState, CognitiveState, DynamicState, FoundationState};

/// The Universal Axiom intelligence model.
///
/// `Intelligence_n = E_n · (1 + F_n) · X · Y · Z · (A · B · C)`
///
/// Only the seven inputs are stored. Every product, including the
/// intelligence scalar, is recomputed on read.
#[derive(Debug, Clone, PartialEq)]
pub struct UniversalAxiom {
    foundation: FoundationLayer,
    dynamic: DynamicLayer,
    cognitive: CognitiveLayer,
    max_n: u32,
}

fn clamp_n(n: i64, max_n: u32) -> u32 {
    // max_n >= 1, so the clamped value always fits in u32.
    n.clamp(1, i64::from(max_n)) as u32
}

impl UniversalAxiom {
    pub fn new() -> Self {
        Self::from_config(&AxiomConfig::default())
    }

    /// Builds a model from `config`. Only `n` is clamped; every other field
    /// is taken as given.
    pub fn from_config(config: &AxiomConfig) -> Self {
        Self::from_config_bounded(config, MAX_N)
    }

    /// Like [`from_config`](Self::from_config) with a custom ceiling for `n`.
    pub fn from_config_bounded(config: &AxiomConfig, max_n: u32) -> Self {
        let r = config.resolved();
        let max_n = max_n.max(1);
        Self {
            foundation: FoundationLayer::new(r.impulses, r.elements, r.pressure),
            dynamic: DynamicLayer::new(clamp_n(r.n, max_n)),
            cognitive: CognitiveLayer::new(r.subjectivity, r.purpose, r.time),
            max_n,
        }
    }

    /// Validates `config` before building the model.
    pub fn try_from_config(config: &AxiomConfig) -> AxiomResult<Self> {
        config.validate()?;
        Ok(Self::from_config(config))
    }

    pub fn with_base_exponential(mut self, base: f64) -> Self {
        self.dynamic.base_exponential = base;
        self
    }

    pub fn n(&self) -> u32 {
        self.dynamic.n
    }

    pub fn max_n(&self) -> u32 {
        self.max_n
    }

    pub fn impulses(&self) -> f64 {
        self.foundation.impulses
    }

    pub fn elements(&self) -> f64 {
        self.foundation.elements
    }

    pub fn pressure(&self) -> f64 {
        self.foundation.pressure
    }

    pub fn subjectivity(&self) -> f64 {
        self.cognitive.subjectivity
    }

    pub fn objectivity(&self) -> f64 {
        self.cognitive.objectivity()
    }

    pub fn purpose(&self) -> f64 {
        self.cognitive.purpose
    }

    pub fn time(&self) -> f64 {
        self.cognitive.time
    }

    pub fn set_time(&mut self, time: f64) {
        self.cognitive.time = time;
    }

    pub fn foundation(&self) -> &FoundationLayer {
        &self.foundation
    }

    pub fn dynamic(&self) -> &DynamicLayer {
        &self.dynamic
    }

    pub fn cognitive(&self) -> &CognitiveLayer {
        &self.cognitive
    }

    /// Intelligence = dynamic · cognitive · foundation.
    ///
    /// Saturates at ±[`MAX_SAFE_VALUE`](crate::MAX_SAFE_VALUE). A zero layer
    /// gives 0 even when another layer is saturated.
    pub fn compute_intelligence(&self) -> f64 {
        saturating_product(&[
            self.dynamic.compute(),
            self.cognitive.compute(),
            self.foundation.compute(),
        ])
    }

    /// Advances `n` by one (up to `max_n`) and `time` by `delta_time`.
    pub fn evolve(&mut self, delta_time: f64) -> f64 {
        self.dynamic.n = self.dynamic.n.saturating_add(1).min(self.max_n);
        self.cognitive.time += delta_time;

        self.compute_intelligence()
    }

    /// Adds `pressure_delta`, flooring the result at 0.01.
    pub fn apply_pressure(&mut self, pressure_delta: f64) -> f64 {
        let requested = self.foundation.pressure + pressure_delta;
        if requested < MIN_PRESSURE {
            debug!(requested, floor = MIN_PRESSURE, "pressure floored");
        }
        self.foundation.pressure = requested.max(MIN_PRESSURE);

        self.compute_intelligence()
    }

    /// Adds `subjectivity_delta`, clamping the result to [0, 1].
    pub fn adjust_subjectivity(&mut self, subjectivity_delta: f64) -> f64 {
        let requested = self.cognitive.subjectivity + subjectivity_delta;
        if !(0.0..=1.0).contains(&requested) {
            debug!(requested, "subjectivity clamped to [0, 1]");
        }
        self.cognitive.subjectivity = requested.clamp(0.0, 1.0);

        self.compute_intelligence()
    }

    /// Multiplies purpose by `purpose_multiplier`, flooring at 0.01.
    pub fn strengthen_purpose(&mut self, purpose_multiplier: f64) -> f64 {
        let requested = self.cognitive.purpose * purpose_multiplier;
        if requested < MIN_PURPOSE {
            debug!(requested, floor = MIN_PURPOSE, "purpose floored");
        }
        self.cognitive.purpose = requested.max(MIN_PURPOSE);

        self.compute_intelligence()
    }

    pub fn get_state(&self) -> AxiomState {
        AxiomState {
            n: self.dynamic.n,
            foundation: FoundationState {
                a_impulses: self.foundation.impulses,
                b_elements: self.foundation.elements,
                c_pressure: self.foundation.pressure,
                product: self.foundation.compute(),
            },
            dynamic: DynamicState {
                e_n: self.dynamic.exponential_growth(),
                f_n: self.dynamic.fibonacci(),
                product: self.dynamic.compute(),
            },
            cognitive: CognitiveState {
                x_subjectivity: self.cognitive.subjectivity,
                x_objectivity: self.cognitive.objectivity(),
                y_purpose: self.cognitive.purpose,
                z_time: self.cognitive.time,
                product: self.cognitive.compute(),
            },
            intelligence: self.compute_intelligence(),
        }
    }
}

impl Default for UniversalAxiom {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&AxiomConfig> for UniversalAxiom {
    fn from(config: &AxiomConfig) -> Self {
        Self::from_config(config)
    }
}

impl fmt::Display for UniversalAxiom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "UniversalAxiom(n={}, Intelligence={:.4})",
            self.n(),
            self.compute_intelligence()
        )
    }
}

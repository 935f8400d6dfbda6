use serde::{Deserialize, Serialize};

use crate::error::{AxiomError, AxiomResult};
use crate::layers::{MAX_N, MIN_PRESSURE, MIN_PURPOSE};

pub const DEFAULT_IMPULSES: f64 = 1.0;
pub const DEFAULT_ELEMENTS: f64 = 1.0;
pub const DEFAULT_PRESSURE: f64 = 1.0;
pub const DEFAULT_SUBJECTIVITY: f64 = 0.0;
pub const DEFAULT_PURPOSE: f64 = 1.0;
pub const DEFAULT_TIME: f64 = 1.0;
pub const DEFAULT_N: i64 = 1;

/// Construction parameters for a [`UniversalAxiom`](crate::UniversalAxiom).
///
/// Every field is independently optional; missing fields take the
/// documented defaults when the config is resolved.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AxiomConfig {
    /// A - fundamental drives.
    pub impulses: Option<f64>,
    /// B - core components.
    pub elements: Option<f64>,
    /// C - constraints and forces.
    pub pressure: Option<f64>,
    /// X - subjectivity level (0 = fully objective).
    pub subjectivity: Option<f64>,
    /// Y - purpose strength.
    pub purpose: Option<f64>,
    /// Z - temporal factor.
    pub time: Option<f64>,
    /// Iteration index, clamped to `[1, max_n]` at construction.
    pub n: Option<i64>,
}

/// An [`AxiomConfig`] with every default applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedConfig {
    pub impulses: f64,
    pub elements: f64,
    pub pressure: f64,
    pub subjectivity: f64,
    pub purpose: f64,
    pub time: f64,
    pub n: i64,
}

impl AxiomConfig {
    pub fn impulses(mut self, value: f64) -> Self {
        self.impulses = Some(value);
        self
    }

    pub fn elements(mut self, value: f64) -> Self {
        self.elements = Some(value);
        self
    }

    pub fn pressure(mut self, value: f64) -> Self {
        self.pressure = Some(value);
        self
    }

    pub fn subjectivity(mut self, value: f64) -> Self {
        self.subjectivity = Some(value);
        self
    }

    pub fn purpose(mut self, value: f64) -> Self {
        self.purpose = Some(value);
        self
    }

    pub fn time(mut self, value: f64) -> Self {
        self.time = Some(value);
        self
    }

    pub fn n(mut self, value: i64) -> Self {
        self.n = Some(value);
        self
    }

    /// Fields set in `other` replace the ones in `self`.
    pub fn merge(self, other: &AxiomConfig) -> Self {
        Self {
            impulses: other.impulses.or(self.impulses),
            elements: other.elements.or(self.elements),
            pressure: other.pressure.or(self.pressure),
            subjectivity: other.subjectivity.or(self.subjectivity),
            purpose: other.purpose.or(self.purpose),
            time: other.time.or(self.time),
            n: other.n.or(self.n),
        }
    }

    pub fn resolved(&self) -> ResolvedConfig {
        ResolvedConfig {
            impulses: self.impulses.unwrap_or(DEFAULT_IMPULSES),
            elements: self.elements.unwrap_or(DEFAULT_ELEMENTS),
            pressure: self.pressure.unwrap_or(DEFAULT_PRESSURE),
            subjectivity: self.subjectivity.unwrap_or(DEFAULT_SUBJECTIVITY),
            purpose: self.purpose.unwrap_or(DEFAULT_PURPOSE),
            time: self.time.unwrap_or(DEFAULT_TIME),
            n: self.n.unwrap_or(DEFAULT_N),
        }
    }

    /// Strict validation of the resolved parameters.
    ///
    /// Construction through [`UniversalAxiom::from_config`](crate::UniversalAxiom::from_config)
    /// does not call this; it is the opt-in check used by
    /// [`UniversalAxiom::try_from_config`](crate::UniversalAxiom::try_from_config).
    pub fn validate(&self) -> AxiomResult<()> {
        let r = self.resolved();
        let reals = [
            ("impulses", r.impulses),
            ("elements", r.elements),
            ("pressure", r.pressure),
            ("subjectivity", r.subjectivity),
            ("purpose", r.purpose),
            ("time", r.time),
        ];
        for (name, value) in reals {
            if !value.is_finite() {
                return Err(AxiomError::Numerical(format!(
                    "{name} must be finite, got {value}"
                )));
            }
        }
        if r.pressure < MIN_PRESSURE {
            return Err(AxiomError::Config(format!(
                "pressure must be >= {MIN_PRESSURE}, got {}",
                r.pressure
            )));
        }
        if !(0.0..=1.0).contains(&r.subjectivity) {
            return Err(AxiomError::Config(format!(
                "subjectivity must be in [0, 1], got {}",
                r.subjectivity
            )));
        }
        if r.purpose < MIN_PURPOSE {
            return Err(AxiomError::Config(format!(
                "purpose must be >= {MIN_PURPOSE}, got {}",
                r.purpose
            )));
        }
        if r.time < 0.0 {
            return Err(AxiomError::Config(format!(
                "time must be >= 0, got {}",
                r.time
            )));
        }
        if !(1..=i64::from(MAX_N)).contains(&r.n) {
            return Err(AxiomError::Config(format!(
                "n must be in [1, {MAX_N}], got {}",
                r.n
            )));
        }
        Ok(())
    }

    /// Load from JSON string.
    pub fn from_json(json: &str) -> AxiomResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| AxiomError::Config(format!("JSON parse error: {e}")))
    }
}

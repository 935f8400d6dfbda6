use thiserror::Error;

/// Root error type for the axiom workspace.
///
/// The numeric core itself never fails on edge cases (it clamps and
/// saturates). These variants cover configuration, caller-input
/// validation and identifier lookups in the layers built on top of it.
#[derive(Error, Debug)]
pub enum AxiomError {
    /// A configuration value is outside its contract.
    #[error("config error: {0}")]
    Config(String),

    /// Caller input failed validation; one message per offending field.
    #[error("validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    /// Non-finite value where a finite one is required.
    #[error("numerical error: {0}")]
    Numerical(String),

    #[error("unknown tool: {0}")]
    UnknownTool(String),

    #[error("unknown scenario: {0}")]
    UnknownScenario(String),

    /// Request rejected by the injected rate limiter.
    #[error("rate limited: {0}")]
    RateLimited(String),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl AxiomError {
    /// Per-field messages for validation failures, empty otherwise.
    pub fn validation_errors(&self) -> &[String] {
        match self {
            AxiomError::Validation(errors) => errors,
            _ => &[],
        }
    }
}

pub type AxiomResult<T> = Result<T, AxiomError>;

use axiom_core::{AxiomConfig, AxiomResult, AxiomSimulator, AxiomState, UniversalAxiom};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::envelope::{into_result, validate_state, ParamEnvelope};
use crate::input::{is_nested, normalize_input};

/// Serializable summary of a session, for logs and listings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionInfo {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub n: u32,
    pub intelligence: f64,
}

/// One logical caller's model. Sessions never share an axiom.
#[derive(Debug, Clone)]
pub struct AxiomSession {
    id: Uuid,
    created_at: DateTime<Utc>,
    axiom: UniversalAxiom,
}

impl AxiomSession {
    pub fn new(config: &AxiomConfig) -> Self {
        let session = Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            axiom: UniversalAxiom::from_config(config),
        };
        debug!(session_id = %session.id, "session opened");
        session
    }

    /// Validates raw arguments in either shape, then opens a session.
    pub fn from_input(args: &Value, envelope: &ParamEnvelope) -> AxiomResult<Self> {
        let mut errors = Vec::new();
        if is_nested(args) {
            errors.extend(validate_state(args));
        }
        errors.extend(envelope.validate_input(args));
        if !errors.is_empty() {
            warn!(errors = errors.len(), "session input rejected");
        }
        into_result(errors)?;
        Ok(Self::new(&normalize_input(args)))
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn axiom(&self) -> &UniversalAxiom {
        &self.axiom
    }

    pub fn axiom_mut(&mut self) -> &mut UniversalAxiom {
        &mut self.axiom
    }

    pub fn simulator(&mut self) -> AxiomSimulator<'_> {
        AxiomSimulator::new(&mut self.axiom)
    }

    pub fn state(&self) -> AxiomState {
        self.axiom.get_state()
    }

    pub fn info(&self) -> SessionInfo {
        let state = self.state();
        SessionInfo {
            id: self.id,
            created_at: self.created_at,
            n: state.n,
            intelligence: state.intelligence,
        }
    }
}

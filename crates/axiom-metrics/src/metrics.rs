use anyhow::{Context, Result};
use axiom_core::{coherence_of, AxiomState, UniversalAxiom};
use prometheus::{register_gauge_vec_with_registry, Encoder, GaugeVec, Registry, TextEncoder};
use tracing::trace;

pub struct AxiomMetrics {
    registry: Registry,
    pub axiom_intelligence: GaugeVec,
    pub axiom_coherence: GaugeVec,
    pub axiom_layer_product: GaugeVec,
    pub axiom_iteration: GaugeVec,
    pub axiom_trajectory_length: GaugeVec,
}

impl AxiomMetrics {
    /// Registers all gauges on `registry`. Fails if any name is already taken.
    pub fn new(registry: &Registry) -> Result<Self> {
        let axiom_intelligence = register_gauge_vec_with_registry!(
            "axiom_intelligence",
            "Intelligence of the latest observed state",
            &["session_id"],
            registry
        )
        .context("registering axiom_intelligence")?;

        let axiom_coherence = register_gauge_vec_with_registry!(
            "axiom_coherence",
            "Coherence of the latest observed model",
            &["session_id"],
            registry
        )
        .context("registering axiom_coherence")?;

        let axiom_layer_product = register_gauge_vec_with_registry!(
            "axiom_layer_product",
            "Product of each layer in the latest observed state",
            &["session_id", "layer"],
            registry
        )
        .context("registering axiom_layer_product")?;

        let axiom_iteration = register_gauge_vec_with_registry!(
            "axiom_iteration",
            "Evolution index n of the latest observed state",
            &["session_id"],
            registry
        )
        .context("registering axiom_iteration")?;

        let axiom_trajectory_length = register_gauge_vec_with_registry!(
            "axiom_trajectory_length",
            "Snapshots recorded by the latest simulation",
            &["session_id"],
            registry
        )
        .context("registering axiom_trajectory_length")?;

        Ok(Self {
            registry: registry.clone(),
            axiom_intelligence,
            axiom_coherence,
            axiom_layer_product,
            axiom_iteration,
            axiom_trajectory_length,
        })
    }

    pub fn observe_state(&self, session_id: &str, state: &AxiomState) {
        trace!(session_id, n = state.n, "observing state");
        self.axiom_intelligence
            .with_label_values(&[session_id])
            .set(state.intelligence);
        self.axiom_iteration
            .with_label_values(&[session_id])
            .set(f64::from(state.n));

        for (layer, product) in [
            ("foundation", state.foundation.product),
            ("dynamic", state.dynamic.product),
            ("cognitive", state.cognitive.product),
        ] {
            self.axiom_layer_product
                .with_label_values(&[session_id, layer])
                .set(product);
        }
    }

    pub fn observe_model(&self, session_id: &str, axiom: &UniversalAxiom) {
        self.observe_state(session_id, &axiom.get_state());
        self.axiom_coherence
            .with_label_values(&[session_id])
            .set(coherence_of(axiom));
    }

    /// Records the trajectory length and the last snapshot.
    pub fn observe_trajectory(&self, session_id: &str, history: &[AxiomState]) {
        self.axiom_trajectory_length
            .with_label_values(&[session_id])
            .set(history.len() as f64);
        if let Some(last) = history.last() {
            self.observe_state(session_id, last);
        }
    }

    pub fn forget_session(&self, session_id: &str) {
        let _ = self.axiom_intelligence.remove_label_values(&[session_id]);
        let _ = self.axiom_coherence.remove_label_values(&[session_id]);
        let _ = self.axiom_iteration.remove_label_values(&[session_id]);
        let _ = self.axiom_trajectory_length.remove_label_values(&[session_id]);
        for layer in ["foundation", "dynamic", "cognitive"] {
            let _ = self
                .axiom_layer_product
                .remove_label_values(&[session_id, layer]);
        }
    }

    /// Text exposition format of everything in the registry.
    pub fn gather_text(&self) -> Result<String> {
        let mut buffer = Vec::new();
        TextEncoder::new()
            .encode(&self.registry.gather(), &mut buffer)
            .context("encoding metrics")?;
        String::from_utf8(buffer).context("metrics output is not utf-8")
    }
}

/// Records `after` and reports whether coherence dropped relative to `before`.
pub fn coherence_regressed(
    metrics: &AxiomMetrics,
    session_id: &str,
    before: &UniversalAxiom,
    after: &UniversalAxiom,
) -> bool {
    metrics.observe_model(session_id, after);
    coherence_of(after) < coherence_of(before)
}

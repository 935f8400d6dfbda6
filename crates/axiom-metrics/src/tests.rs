use crate::metrics::{coherence_regressed, AxiomMetrics};
use axiom_core::{AxiomConfig, AxiomSimulator, UniversalAxiom};
use prometheus::Registry;

#[test]
fn state_gauges_follow_the_model() {
    let registry = Registry::new();
    let metrics = AxiomMetrics::new(&registry).unwrap();
    let axiom = UniversalAxiom::new();

    metrics.observe_model("s1", &axiom);
    assert_eq!(metrics.axiom_intelligence.with_label_values(&["s1"]).get(), 10.0);
    assert_eq!(metrics.axiom_iteration.with_label_values(&["s1"]).get(), 1.0);
    assert_eq!(
        metrics
            .axiom_layer_product
            .with_label_values(&["s1", "dynamic"])
            .get(),
        10.0
    );
    let coherence = metrics.axiom_coherence.with_label_values(&["s1"]).get();
    assert!((coherence - 2.5 / 3.0).abs() < 1e-12);
}

#[test]
fn trajectory_records_length_and_last_state() {
    let registry = Registry::new();
    let metrics = AxiomMetrics::new(&registry).unwrap();
    let mut axiom = UniversalAxiom::new();
    let mut simulator = AxiomSimulator::new(&mut axiom);
    let history = simulator.simulate_evolution(3, 1.0);

    metrics.observe_trajectory("run", history);
    assert_eq!(
        metrics.axiom_trajectory_length.with_label_values(&["run"]).get(),
        4.0
    );
    assert_eq!(metrics.axiom_iteration.with_label_values(&["run"]).get(), 4.0);
}

#[test]
fn duplicate_registration_fails() {
    let registry = Registry::new();
    let _first = AxiomMetrics::new(&registry).unwrap();
    assert!(AxiomMetrics::new(&registry).is_err());
}

#[test]
fn text_output_contains_labels() {
    let registry = Registry::new();
    let metrics = AxiomMetrics::new(&registry).unwrap();
    metrics.observe_model("abc", &UniversalAxiom::new());

    let text = metrics.gather_text().unwrap();
    assert!(text.contains("axiom_intelligence{session_id=\"abc\"} 10"));
    assert!(text.contains("layer=\"cognitive\""));

    metrics.forget_session("abc");
    assert!(!metrics.gather_text().unwrap().contains("session_id=\"abc\""));
}

#[test]
fn coherence_regression_is_detected() {
    let registry = Registry::new();
    let metrics = AxiomMetrics::new(&registry).unwrap();
    let before = UniversalAxiom::new();
    let after = UniversalAxiom::from_config(&AxiomConfig::default().subjectivity(0.6));

    assert!(coherence_regressed(&metrics, "s", &before, &after));
    assert!(!coherence_regressed(&metrics, "s", &after, &before));
}

use crate::config::AxiomConfig;
use crate::error::AxiomError;
use crate::layers::{fibonacci_sequence, DynamicLayer, MAX_N, MAX_SAFE_INTEGER, MAX_SAFE_VALUE};
use crate::simulator::{AxiomSimulator, CoherenceBand, EnvironmentalChanges};
use crate::UniversalAxiom;
use rand::Rng;

fn axiom_with(config: AxiomConfig) -> UniversalAxiom {
    UniversalAxiom::from_config(&config)
}

#[test]
fn default_model_computes_ten() {
    let axiom = UniversalAxiom::new();
    assert_eq!(axiom.compute_intelligence(), 10.0);

    let explicit = axiom_with(
        AxiomConfig::default()
            .impulses(1.0)
            .elements(1.0)
            .pressure(1.0)
            .subjectivity(0.0)
            .purpose(1.0)
            .time(1.0)
            .n(1),
    );
    assert_eq!(explicit.compute_intelligence(), 10.0);
}

#[test]
fn compute_is_deterministic() {
    let axiom = axiom_with(AxiomConfig::default().impulses(1.7).pressure(0.3).n(17));
    let first = axiom.compute_intelligence();
    let second = axiom.compute_intelligence();
    assert_eq!(first.to_bits(), second.to_bits());
}

#[test]
fn nine_evolutions_hit_regression_value() {
    let mut axiom = UniversalAxiom::new();
    for _ in 0..9 {
        axiom.evolve(1.0);
    }
    assert_eq!(axiom.n(), 10);
    assert_eq!(axiom.compute_intelligence(), 106_287_300.0);
}

#[test]
fn fibonacci_sequence_first_terms() {
    assert_eq!(
        fibonacci_sequence(12),
        vec![1, 1, 2, 3, 5, 8, 13, 21, 34, 55, 89, 144]
    );
    assert!(fibonacci_sequence(0).is_empty());
    assert_eq!(fibonacci_sequence(1), vec![1]);
}

#[test]
fn dynamic_layer_terms() {
    assert_eq!(DynamicLayer::new(1).fibonacci(), 1);
    assert_eq!(DynamicLayer::new(2).fibonacci(), 2);
    assert_eq!(DynamicLayer::new(10).fibonacci(), 89);
    assert_eq!(DynamicLayer::new(1).exponential_growth(), 5.0);
    assert_eq!(DynamicLayer::new(2).exponential_growth(), 17.0);
    assert_eq!(DynamicLayer::new(1).compute(), 10.0);
}

#[test]
fn fibonacci_saturates_instead_of_wrapping() {
    let f_max = DynamicLayer::new(MAX_N).fibonacci();
    assert_eq!(f_max, MAX_SAFE_INTEGER);

    let long = fibonacci_sequence(120);
    assert_eq!(*long.last().unwrap(), MAX_SAFE_INTEGER);
    assert!(long.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn overflowing_growth_saturates() {
    let axiom = axiom_with(AxiomConfig::default().impulses(10.0).n(2)).with_base_exponential(1e300);
    let state = axiom.get_state();
    assert_eq!(state.dynamic.e_n, MAX_SAFE_VALUE);
    assert_eq!(state.dynamic.product, MAX_SAFE_VALUE);
    assert!(state.intelligence.is_finite());
    assert_eq!(state.intelligence, MAX_SAFE_VALUE);

    let negative =
        axiom_with(AxiomConfig::default().impulses(-10.0).n(2)).with_base_exponential(1e300);
    assert_eq!(negative.compute_intelligence(), -MAX_SAFE_VALUE);
}

#[test]
fn huge_cognitive_product_times_zero_foundation_is_zero() {
    let axiom = axiom_with(
        AxiomConfig::default()
            .impulses(0.0)
            .purpose(1e200)
            .time(1e200),
    );
    let state = axiom.get_state();
    assert_eq!(state.cognitive.product, MAX_SAFE_VALUE);
    assert_eq!(state.foundation.product, 0.0);
    assert_eq!(state.intelligence, 0.0);

    let json = serde_json::to_value(&state).unwrap();
    assert!(json["cognitive"]["product"].is_f64());
    assert_eq!(json["intelligence"], 0.0);
}

#[test]
fn huge_foundation_product_saturates() {
    let axiom = axiom_with(AxiomConfig::default().impulses(1e200).elements(1e200));
    let state = axiom.get_state();
    assert_eq!(state.foundation.product, MAX_SAFE_VALUE);
    assert_eq!(state.intelligence, MAX_SAFE_VALUE);

    let negative = axiom_with(AxiomConfig::default().impulses(-1e200).elements(1e200));
    assert_eq!(negative.get_state().foundation.product, -MAX_SAFE_VALUE);
    assert_eq!(negative.compute_intelligence(), -MAX_SAFE_VALUE);

    let zero_pressure = axiom_with(
        AxiomConfig::default()
            .impulses(1e200)
            .elements(1e200)
            .pressure(0.0),
    );
    assert_eq!(zero_pressure.compute_intelligence(), 0.0);
}

#[test]
fn random_extreme_inputs_never_produce_nan() {
    let mut rng = rand::thread_rng();
    for _ in 0..500 {
        let exponent = |rng: &mut rand::rngs::ThreadRng| 10f64.powi(rng.gen_range(-300..300));
        let config = AxiomConfig::default()
            .impulses(exponent(&mut rng) * if rng.gen_bool(0.5) { 1.0 } else { -1.0 })
            .elements(exponent(&mut rng))
            .pressure(exponent(&mut rng))
            .purpose(exponent(&mut rng))
            .time(if rng.gen_bool(0.2) { 0.0 } else { exponent(&mut rng) })
            .n(rng.gen_range(1..=100));
        let state = UniversalAxiom::from_config(&config).get_state();
        for value in [
            state.foundation.product,
            state.dynamic.product,
            state.cognitive.product,
            state.intelligence,
        ] {
            assert!(value.is_finite(), "{config:?} -> {value}");
        }
    }
}

#[test]
fn evolution_is_monotone_for_twenty_steps() {
    let mut axiom = UniversalAxiom::new();
    let mut previous = axiom.compute_intelligence();
    for _ in 0..20 {
        let next = axiom.evolve(1.0);
        assert!(next > previous, "{next} should exceed {previous}");
        previous = next;
    }
}

#[test]
fn n_is_clamped_at_construction_and_evolution() {
    assert_eq!(axiom_with(AxiomConfig::default().n(500)).n(), MAX_N);
    assert_eq!(axiom_with(AxiomConfig::default().n(-3)).n(), 1);
    assert_eq!(axiom_with(AxiomConfig::default().n(0)).n(), 1);

    let mut axiom = axiom_with(AxiomConfig::default().n(i64::from(MAX_N)));
    let time_before = axiom.time();
    axiom.evolve(2.5);
    assert_eq!(axiom.n(), MAX_N);
    assert_eq!(axiom.time(), time_before + 2.5);

    let bounded = UniversalAxiom::from_config_bounded(&AxiomConfig::default().n(150), 200);
    assert_eq!(bounded.n(), 150);
    assert_eq!(bounded.max_n(), 200);
}

#[test]
fn pressure_floor_absorbs_large_release() {
    let mut axiom = UniversalAxiom::new();
    axiom.apply_pressure(-10.0);
    assert_eq!(axiom.pressure(), 0.01);
}

#[test]
fn subjectivity_clamps_at_both_ends() {
    let mut axiom = axiom_with(AxiomConfig::default().subjectivity(0.5));
    axiom.adjust_subjectivity(1.0);
    assert_eq!(axiom.subjectivity(), 1.0);

    let mut axiom = axiom_with(AxiomConfig::default().subjectivity(0.5));
    axiom.adjust_subjectivity(-2.0);
    assert_eq!(axiom.subjectivity(), 0.0);
}

#[test]
fn purpose_floor_applies_to_multiplier() {
    let mut axiom = UniversalAxiom::new();
    axiom.strengthen_purpose(0.0);
    assert_eq!(axiom.purpose(), 0.01);

    let mut axiom = UniversalAxiom::new();
    axiom.strengthen_purpose(1.5);
    assert_eq!(axiom.purpose(), 1.5);
}

#[test]
fn full_subjectivity_collapses_to_zero() {
    let axiom = axiom_with(AxiomConfig::default().subjectivity(1.0));
    assert_eq!(axiom.compute_intelligence(), 0.0);
}

#[test]
fn negative_impulses_give_negative_intelligence() {
    let axiom = axiom_with(AxiomConfig::default().impulses(-1.0));
    assert!(axiom.compute_intelligence() < 0.0);
}

#[test]
fn construction_does_not_clamp_inputs() {
    let axiom = axiom_with(AxiomConfig::default().subjectivity(5.0).pressure(-2.0));
    assert_eq!(axiom.subjectivity(), 5.0);
    assert_eq!(axiom.pressure(), -2.0);
    assert_eq!(axiom.objectivity(), -4.0);
}

#[test]
fn time_is_directly_settable() {
    let mut axiom = UniversalAxiom::new();
    axiom.set_time(4.0);
    assert_eq!(axiom.time(), 4.0);
    assert_eq!(axiom.compute_intelligence(), 40.0);
}

#[test]
fn state_snapshot_uses_external_field_names() {
    let state = UniversalAxiom::new().get_state();
    let value = serde_json::to_value(&state).unwrap();

    assert_eq!(value["n"], 1);
    assert_eq!(value["foundation"]["A_impulses"], 1.0);
    assert_eq!(value["foundation"]["B_elements"], 1.0);
    assert_eq!(value["foundation"]["C_pressure"], 1.0);
    assert_eq!(value["foundation"]["product"], 1.0);
    assert_eq!(value["dynamic"]["E_n"], 5.0);
    assert_eq!(value["dynamic"]["F_n"], 1);
    assert_eq!(value["dynamic"]["product"], 10.0);
    assert_eq!(value["cognitive"]["X_subjectivity"], 0.0);
    assert_eq!(value["cognitive"]["X_objectivity"], 1.0);
    assert_eq!(value["cognitive"]["Y_purpose"], 1.0);
    assert_eq!(value["cognitive"]["Z_time"], 1.0);
    assert_eq!(value["cognitive"]["product"], 1.0);
    assert_eq!(value["intelligence"], 10.0);
}

#[test]
fn evolution_trajectory_has_steps_plus_one() {
    let mut axiom = UniversalAxiom::new();
    let mut simulator = AxiomSimulator::new(&mut axiom);
    let history = simulator.simulate_evolution(5, 1.0);
    assert_eq!(history.len(), 6);
    assert_eq!(history[0].n, 1);
    assert_eq!(history[5].n, 6);
    assert_eq!(simulator.get_history().len(), 6);
}

#[test]
fn second_run_continues_from_mutated_model() {
    let mut axiom = UniversalAxiom::new();
    {
        let mut simulator = AxiomSimulator::new(&mut axiom);
        simulator.simulate_evolution(3, 1.0);
        let history = simulator.simulate_evolution(2, 0.5);
        assert_eq!(history.len(), 3);
        assert_eq!(history[0].n, 4);
        assert_eq!(history[2].n, 6);
    }
    assert_eq!(axiom.n(), 6);
    assert_eq!(axiom.time(), 5.0);
}

#[test]
fn recorded_snapshots_are_independent_copies() {
    let mut axiom = UniversalAxiom::new();
    let history = {
        let mut simulator = AxiomSimulator::new(&mut axiom);
        simulator.simulate_evolution(2, 1.0).to_vec()
    };
    axiom.apply_pressure(5.0);
    assert_eq!(history[0].foundation.c_pressure, 1.0);
    assert_eq!(axiom.pressure(), 6.0);
}

#[test]
fn contradiction_resolution_has_steps_plus_two() {
    let mut axiom = UniversalAxiom::new();
    let mut simulator = AxiomSimulator::new(&mut axiom);
    let history = simulator.simulate_contradiction_resolution(2.0, 5);
    assert_eq!(history.len(), 7);
    assert_eq!(history[1].foundation.c_pressure, 3.0);

    let last = history.last().unwrap();
    assert!((last.foundation.c_pressure - 1.0).abs() < 1e-9);
    assert_eq!(last.n, 6);
}

#[test]
fn contradiction_resolution_reduces_subjectivity() {
    let mut axiom = axiom_with(AxiomConfig::default().subjectivity(0.8));
    let mut simulator = AxiomSimulator::new(&mut axiom);
    let history = simulator.simulate_contradiction_resolution_default();
    let first = history.first().unwrap().cognitive.x_subjectivity;
    let last = history.last().unwrap().cognitive.x_subjectivity;
    assert!(last < first);
}

#[test]
fn contradiction_resolution_without_steps_only_spikes() {
    let mut axiom = UniversalAxiom::new();
    let mut simulator = AxiomSimulator::new(&mut axiom);
    let history = simulator.simulate_contradiction_resolution(2.0, 0);
    assert_eq!(history.len(), 2);
    assert_eq!(history[1].foundation.c_pressure, 3.0);
}

#[test]
fn trajectory_prediction_applies_drift() {
    let mut axiom = UniversalAxiom::new();
    let mut simulator = AxiomSimulator::new(&mut axiom);
    let changes = EnvironmentalChanges {
        pressure_per_step: Some(0.5),
        subjectivity_per_step: Some(0.1),
        ..EnvironmentalChanges::default()
    };
    let history = simulator.simulate_trajectory(4, changes);
    assert_eq!(history.len(), 5);
    let last = history.last().unwrap();
    assert_eq!(last.foundation.c_pressure, 3.0);
    assert!((last.cognitive.x_subjectivity - 0.4).abs() < 1e-9);
    assert_eq!(last.n, 5);
}

#[test]
fn trajectory_prediction_strengthens_purpose() {
    let mut axiom = UniversalAxiom::new();
    let mut simulator = AxiomSimulator::new(&mut axiom);
    let changes = EnvironmentalChanges {
        purpose_multiplier_per_step: Some(2.0),
        ..EnvironmentalChanges::default()
    };
    let history = simulator.simulate_trajectory(3, changes);
    assert_eq!(history[0].cognitive.y_purpose, 1.0);
    assert_eq!(history[3].cognitive.y_purpose, 8.0);

    let zero = EnvironmentalChanges {
        purpose_multiplier_per_step: Some(0.0),
        ..EnvironmentalChanges::default()
    };
    let history = simulator.simulate_trajectory(2, zero);
    assert_eq!(history[2].cognitive.y_purpose, 8.0);
}

#[test]
fn default_coherence_value() {
    let mut axiom = UniversalAxiom::new();
    let simulator = AxiomSimulator::new(&mut axiom);
    let coherence = simulator.get_coherence_metric();
    assert!((coherence - 2.5 / 3.0).abs() < 1e-12);
    assert_eq!(CoherenceBand::from_score(coherence), CoherenceBand::High);
}

#[test]
fn coherence_stays_in_unit_interval() {
    let mut rng = rand::thread_rng();
    for _ in 0..1000 {
        let config = AxiomConfig::default()
            .impulses(rng.gen_range(-10.0..10.0))
            .elements(rng.gen_range(-10.0..10.0))
            .pressure(rng.gen_range(0.01..100.0))
            .subjectivity(rng.gen_range(0.0..=1.0))
            .purpose(rng.gen_range(0.01..10.0))
            .time(rng.gen_range(0.0..100.0))
            .n(rng.gen_range(1..=100));
        let mut axiom = UniversalAxiom::from_config(&config);
        let mut simulator = AxiomSimulator::new(&mut axiom);
        let coherence = simulator.get_coherence_metric();
        assert!((0.0..=1.0).contains(&coherence), "coherence {coherence}");

        simulator.simulate_contradiction_resolution(rng.gen_range(0.0..5.0), 5);
        let coherence = simulator.get_coherence_metric();
        assert!((0.0..=1.0).contains(&coherence), "coherence {coherence}");
    }
}

#[test]
fn coherence_bounded_for_unvalidated_inputs() {
    let mut axiom = axiom_with(AxiomConfig::default().subjectivity(-5.0).purpose(-3.0));
    let simulator = AxiomSimulator::new(&mut axiom);
    let coherence = simulator.get_coherence_metric();
    assert!((0.0..=1.0).contains(&coherence));
}

#[test]
fn coherence_bands() {
    assert_eq!(CoherenceBand::from_score(0.71), CoherenceBand::High);
    assert_eq!(CoherenceBand::from_score(0.7), CoherenceBand::Moderate);
    assert_eq!(CoherenceBand::from_score(0.41), CoherenceBand::Moderate);
    assert_eq!(CoherenceBand::from_score(0.4), CoherenceBand::Low);
}

#[test]
fn strict_construction_rejects_out_of_contract_config() {
    let err =
        UniversalAxiom::try_from_config(&AxiomConfig::default().subjectivity(5.0)).unwrap_err();
    assert!(matches!(err, AxiomError::Config(_)));

    let err =
        UniversalAxiom::try_from_config(&AxiomConfig::default().impulses(f64::NAN)).unwrap_err();
    assert!(matches!(err, AxiomError::Numerical(_)));

    let err = UniversalAxiom::try_from_config(&AxiomConfig::default().n(101)).unwrap_err();
    assert!(matches!(err, AxiomError::Config(_)));

    assert!(UniversalAxiom::try_from_config(&AxiomConfig::default()).is_ok());
}

#[test]
fn config_from_partial_json() {
    let config = AxiomConfig::from_json(r#"{"pressure": 2.0, "n": 3}"#).unwrap();
    assert_eq!(config.pressure, Some(2.0));
    assert_eq!(config.impulses, None);

    let resolved = config.resolved();
    assert_eq!(resolved.pressure, 2.0);
    assert_eq!(resolved.impulses, 1.0);
    assert_eq!(resolved.n, 3);

    assert!(AxiomConfig::from_json("{not json").is_err());
}

#[test]
fn config_merge_prefers_overrides() {
    let base = AxiomConfig::default().pressure(2.0).purpose(3.0);
    let merged = base.merge(&AxiomConfig::default().pressure(4.0));
    assert_eq!(merged.pressure, Some(4.0));
    assert_eq!(merged.purpose, Some(3.0));
}

#[test]
fn display_reports_n_and_intelligence() {
    assert_eq!(
        UniversalAxiom::new().to_string(),
        "UniversalAxiom(n=1, Intelligence=10.0000)"
    );
}

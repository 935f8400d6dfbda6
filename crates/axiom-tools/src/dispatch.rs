use std::fmt;
use std::str::FromStr;

use axiom_core::{
    coherence_of, AxiomError, AxiomResult, AxiomSimulator, AxiomState, CoherenceBand,
    EnvironmentalChanges, UniversalAxiom,
};
use axiom_guards::{
    into_result, is_nested, normalize_input, state_or_args, validate_number, validate_state,
    NumberBounds, ParamEnvelope,
};
use serde_json::{json, Value};
use tracing::{debug, info, warn};

use crate::analysis::{
    analyze_trajectory, assess_collapse_risk, compare_permutations, foundation_status,
    optimization_suggestions, optimized_projection, recommendations, Criterion,
    OptimizationConstraints, OptimizationGoal,
};

/// Operations callable by name with JSON arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tool {
    ComputeIntelligence,
    EvolveSystem,
    ApplyPressure,
    AdjustSubjectivity,
    SimulateEvolution,
    SimulateContradictionResolution,
    GetCoherenceMetric,
    AnalyzePermutation,
    ComparePermutations,
    OptimizeSystem,
    PredictTrajectory,
    DetectCollapseRisk,
}

impl Tool {
    pub const ALL: [Tool; 12] = [
        Tool::ComputeIntelligence,
        Tool::EvolveSystem,
        Tool::ApplyPressure,
        Tool::AdjustSubjectivity,
        Tool::SimulateEvolution,
        Tool::SimulateContradictionResolution,
        Tool::GetCoherenceMetric,
        Tool::AnalyzePermutation,
        Tool::ComparePermutations,
        Tool::OptimizeSystem,
        Tool::PredictTrajectory,
        Tool::DetectCollapseRisk,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Tool::ComputeIntelligence => "compute_intelligence",
            Tool::EvolveSystem => "evolve_system",
            Tool::ApplyPressure => "apply_pressure",
            Tool::AdjustSubjectivity => "adjust_subjectivity",
            Tool::SimulateEvolution => "simulate_evolution",
            Tool::SimulateContradictionResolution => "simulate_contradiction_resolution",
            Tool::GetCoherenceMetric => "get_coherence_metric",
            Tool::AnalyzePermutation => "analyze_permutation",
            Tool::ComparePermutations => "compare_permutations",
            Tool::OptimizeSystem => "optimize_system",
            Tool::PredictTrajectory => "predict_trajectory",
            Tool::DetectCollapseRisk => "detect_collapse_risk",
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Tool {
    type Err = AxiomError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tool::ALL
            .into_iter()
            .find(|tool| tool.name() == s)
            .ok_or_else(|| AxiomError::UnknownTool(s.to_string()))
    }
}

pub fn tool_names() -> Vec<&'static str> {
    Tool::ALL.iter().map(|tool| tool.name()).collect()
}

fn arg_f64(args: &Value, key: &str, default: f64) -> f64 {
    args.get(key).and_then(Value::as_f64).unwrap_or(default)
}

fn arg_usize(args: &Value, key: &str, default: usize) -> usize {
    match args.get(key) {
        Some(v) => v
            .as_u64()
            .or_else(|| v.as_f64().filter(|f| *f >= 0.0).map(|f| f.floor() as u64))
            .and_then(|n| usize::try_from(n).ok())
            .unwrap_or(default),
        None => default,
    }
}

fn optimization_goal(args: &Value) -> OptimizationGoal {
    args.get("optimization_goal")
        .and_then(Value::as_str)
        .and_then(|goal| goal.parse().ok())
        .unwrap_or_default()
}

fn comparison_criteria(args: &Value) -> Vec<Criterion> {
    match args.get("comparison_criteria") {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .filter_map(|name| name.parse().ok())
            .collect(),
        _ => Criterion::DEFAULT.to_vec(),
    }
}

fn intelligence_history(args: &Value) -> Vec<f64> {
    match args.get("trajectory_history") {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|entry| entry.get("intelligence").and_then(Value::as_f64))
            .collect(),
        _ => Vec::new(),
    }
}

fn validate_goal(args: &Value) -> Vec<String> {
    match args.get("optimization_goal") {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::String(goal)) if goal.parse::<OptimizationGoal>().is_ok() => Vec::new(),
        Some(_) => {
            let names: Vec<&str> = OptimizationGoal::ALL.iter().map(|g| g.name()).collect();
            vec![format!("optimization_goal must be one of: {}", names.join(", "))]
        }
    }
}

fn validate_constraints(args: &Value) -> Vec<String> {
    match args.get("constraints") {
        None | Some(Value::Null) => Vec::new(),
        Some(constraints) if constraints.is_object() => validate_number(
            constraints.get("max_pressure"),
            "constraints.max_pressure",
            &NumberBounds::at_least(0.0),
        ),
        Some(_) => vec!["constraints must be an object".to_string()],
    }
}

fn validate_criteria(args: &Value) -> Vec<String> {
    let names: Vec<&str> = Criterion::ALL.iter().map(|c| c.name()).collect();
    match args.get("comparison_criteria") {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items
            .iter()
            .enumerate()
            .filter(|(_, item)| item.as_str().and_then(|n| n.parse::<Criterion>().ok()).is_none())
            .map(|(i, _)| {
                format!("comparison_criteria[{i}] must be one of: {}", names.join(", "))
            })
            .collect(),
        Some(_) => vec!["comparison_criteria must be an array".to_string()],
    }
}

fn validate_history(args: &Value) -> Vec<String> {
    match args.get("trajectory_history") {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items
            .iter()
            .enumerate()
            .flat_map(|(i, entry)| {
                validate_number(
                    entry.get("intelligence"),
                    &format!("trajectory_history[{i}].intelligence"),
                    &NumberBounds::ANY.required(),
                )
            })
            .collect(),
        Some(_) => vec!["trajectory_history must be an array".to_string()],
    }
}

fn build(args: &Value) -> UniversalAxiom {
    UniversalAxiom::from_config(&normalize_input(args))
}

fn state_value(state: &AxiomState) -> AxiomResult<Value> {
    Ok(serde_json::to_value(state)?)
}

/// Validates, normalizes and executes named tools.
#[derive(Debug, Clone, Default)]
pub struct ToolRunner {
    envelope: ParamEnvelope,
}

impl ToolRunner {
    pub fn new(envelope: ParamEnvelope) -> Self {
        Self { envelope }
    }

    pub fn envelope(&self) -> &ParamEnvelope {
        &self.envelope
    }

    /// Looks up `name` and runs it. Unknown names are a hard error.
    pub fn execute(&self, name: &str, args: &Value) -> AxiomResult<Value> {
        let tool = Tool::from_str(name)?;
        info!(%tool, "executing tool");

        let errors = self.validate(tool, args);
        if !errors.is_empty() {
            warn!(%tool, errors = errors.len(), "tool input rejected");
        }
        into_result(errors)?;

        let result = self.run(tool, args)?;
        debug!(%tool, "tool finished");
        Ok(result)
    }

    /// Model parameters in either shape, with `current_state` preferred.
    fn validate_model_input(&self, args: &Value) -> Vec<String> {
        let mut errors = Vec::new();
        let has_state = args.get("current_state").is_some_and(|v| !v.is_null());
        let source = state_or_args(args);
        if has_state || is_nested(source) {
            errors.extend(validate_state(source));
        }
        errors.extend(self.envelope.validate_input(source));
        errors
    }

    fn validate(&self, tool: Tool, args: &Value) -> Vec<String> {
        let envelope = &self.envelope;
        let mut errors = Vec::new();

        match tool {
            Tool::ComputeIntelligence | Tool::AnalyzePermutation => {
                errors.extend(envelope.validate_input(args));
            }
            Tool::SimulateEvolution => {
                errors.extend(envelope.validate_input(args));
                errors.extend(envelope.validate_steps(args, "steps"));
                errors.extend(envelope.validate_delta_time(args));
            }
            Tool::SimulateContradictionResolution => {
                let limit = envelope.pressure_delta_limit;
                errors.extend(envelope.validate_input(args));
                errors.extend(envelope.validate_steps(args, "resolution_steps"));
                errors.extend(validate_number(
                    args.get("initial_pressure"),
                    "initial_pressure",
                    &NumberBounds::between(-limit, limit),
                ));
            }
            Tool::PredictTrajectory => {
                errors.extend(envelope.validate_input(args));
                errors.extend(envelope.validate_steps(args, "future_steps"));
                if let Some(changes) = args.get("environmental_changes") {
                    if !changes.is_object() {
                        errors.push("environmental_changes must be an object".to_string());
                    } else {
                        errors.extend(validate_number(
                            changes.get("pressure_per_step"),
                            "environmental_changes.pressure_per_step",
                            &NumberBounds::ANY,
                        ));
                        errors.extend(validate_number(
                            changes.get("subjectivity_per_step"),
                            "environmental_changes.subjectivity_per_step",
                            &NumberBounds::ANY,
                        ));
                        errors.extend(validate_number(
                            changes.get("purpose_multiplier_per_step"),
                            "environmental_changes.purpose_multiplier_per_step",
                            &NumberBounds::at_least(0.0),
                        ));
                    }
                }
            }
            Tool::EvolveSystem => {
                errors.extend(self.validate_model_input(args));
                errors.extend(envelope.validate_steps(args, "steps"));
                errors.extend(envelope.validate_delta_time(args));
            }
            Tool::ApplyPressure => {
                errors.extend(self.validate_model_input(args));
                errors.extend(envelope.validate_pressure_delta(args));
            }
            Tool::AdjustSubjectivity => {
                errors.extend(self.validate_model_input(args));
                errors.extend(envelope.validate_subjectivity_delta(args));
            }
            Tool::GetCoherenceMetric => {
                errors.extend(self.validate_model_input(args));
            }
            Tool::OptimizeSystem => {
                errors.extend(self.validate_model_input(args));
                errors.extend(validate_goal(args));
                errors.extend(validate_constraints(args));
            }
            Tool::DetectCollapseRisk => {
                errors.extend(self.validate_model_input(args));
                errors.extend(validate_history(args));
            }
            Tool::ComparePermutations => {
                for key in ["permutation_a", "permutation_b"] {
                    match args.get(key) {
                        Some(permutation) if permutation.is_object() => errors.extend(
                            envelope
                                .validate_input(permutation)
                                .into_iter()
                                .map(|message| format!("{key}.{message}")),
                        ),
                        _ => errors.push(format!("{key} is required and must be an object")),
                    }
                }
                errors.extend(validate_criteria(args));
            }
        }

        errors
    }

    fn run(&self, tool: Tool, args: &Value) -> AxiomResult<Value> {
        match tool {
            Tool::ComputeIntelligence => state_value(&build(args).get_state()),

            Tool::EvolveSystem => {
                let mut axiom = build(state_or_args(args));
                let steps = arg_usize(args, "steps", 1);
                let delta_time = arg_f64(args, "delta_time", 1.0);

                let evolution: Vec<AxiomState> = (0..steps)
                    .map(|_| {
                        axiom.evolve(delta_time);
                        axiom.get_state()
                    })
                    .collect();
                let final_state = evolution.last().cloned();

                Ok(json!({
                    "steps": evolution.len(),
                    "evolution": evolution,
                    "final_state": final_state,
                }))
            }

            Tool::ApplyPressure => {
                let mut axiom = build(state_or_args(args));
                let delta = arg_f64(args, "pressure_delta", 0.0);
                axiom.apply_pressure(delta);
                Ok(json!({
                    "pressure_applied": delta,
                    "new_state": state_value(&axiom.get_state())?,
                }))
            }

            Tool::AdjustSubjectivity => {
                let mut axiom = build(state_or_args(args));
                let delta = arg_f64(args, "subjectivity_delta", 0.0);
                axiom.adjust_subjectivity(delta);
                Ok(json!({
                    "subjectivity_change": delta,
                    "new_state": state_value(&axiom.get_state())?,
                }))
            }

            Tool::SimulateEvolution => {
                let steps = arg_usize(args, "steps", 10);
                let delta_time = arg_f64(args, "delta_time", 1.0);
                let mut axiom = build(args);
                let mut simulator = AxiomSimulator::new(&mut axiom);
                let history = simulator.simulate_evolution(steps, delta_time);
                let final_intelligence = history.last().map(|s| s.intelligence);

                Ok(json!({
                    "simulation_type": "evolution",
                    "steps": steps,
                    "history": history,
                    "final_intelligence": final_intelligence,
                }))
            }

            Tool::SimulateContradictionResolution => {
                let initial_pressure = arg_f64(args, "initial_pressure", 2.0);
                let resolution_steps = arg_usize(args, "resolution_steps", 5);
                let mut axiom = build(args);
                let mut simulator = AxiomSimulator::new(&mut axiom);
                let history =
                    simulator.simulate_contradiction_resolution(initial_pressure, resolution_steps);
                let coherence_improvement = match (history.first(), history.last()) {
                    (Some(first), Some(last)) => {
                        last.cognitive.x_objectivity - first.cognitive.x_objectivity
                    }
                    _ => 0.0,
                };

                Ok(json!({
                    "simulation_type": "contradiction_resolution",
                    "initial_pressure": initial_pressure,
                    "resolution_steps": resolution_steps,
                    "history": history,
                    "coherence_improvement": coherence_improvement,
                }))
            }

            Tool::GetCoherenceMetric => {
                let axiom = build(state_or_args(args));
                let coherence = coherence_of(&axiom);
                Ok(json!({
                    "coherence": coherence,
                    "interpretation": CoherenceBand::from_score(coherence).interpretation(),
                    "state": state_value(&axiom.get_state())?,
                }))
            }

            Tool::AnalyzePermutation => {
                let axiom = build(args);
                let state = axiom.get_state();
                let coherence = coherence_of(&axiom);

                Ok(json!({
                    "foundation_layer": {
                        "status": foundation_status(&state),
                        "A_impulses": state.foundation.a_impulses,
                        "B_elements": state.foundation.b_elements,
                        "C_pressure": state.foundation.c_pressure,
                        "product": state.foundation.product,
                    },
                    "dynamic_layer": {
                        "E_n": state.dynamic.e_n,
                        "F_n": state.dynamic.f_n,
                        "product": state.dynamic.product,
                    },
                    "cognitive_layer": {
                        "objectivity": state.cognitive.x_objectivity,
                        "subjectivity": state.cognitive.x_subjectivity,
                        "purpose": state.cognitive.y_purpose,
                        "time": state.cognitive.z_time,
                        "product": state.cognitive.product,
                    },
                    "overall": {
                        "intelligence": state.intelligence,
                        "coherence": coherence,
                        "recommendations": recommendations(&state, coherence),
                    },
                }))
            }

            Tool::ComparePermutations => {
                let axiom_a = build(args.get("permutation_a").unwrap_or(&Value::Null));
                let axiom_b = build(args.get("permutation_b").unwrap_or(&Value::Null));
                let result = compare_permutations(&axiom_a, &axiom_b, &comparison_criteria(args));

                Ok(json!({
                    "permutation_a": axiom_a.get_state(),
                    "permutation_b": axiom_b.get_state(),
                    "comparison": result.comparison,
                    "winner": result.winner,
                }))
            }

            Tool::OptimizeSystem => {
                let axiom = build(state_or_args(args));
                let state = axiom.get_state();
                let goal = optimization_goal(args);
                let constraints: OptimizationConstraints = match args.get("constraints") {
                    Some(value) if value.is_object() => serde_json::from_value(value.clone())?,
                    _ => OptimizationConstraints::default(),
                };
                let suggestions = optimization_suggestions(&state, goal, &constraints);

                let mut result = json!({
                    "current_metrics": {
                        "intelligence": state.intelligence,
                        "coherence": coherence_of(&axiom),
                    },
                    "optimization_goal": goal.name(),
                    "suggestions": suggestions,
                });
                match optimized_projection(&state, &suggestions) {
                    Some(projection) => {
                        result["optimized_projection"] = serde_json::to_value(projection)?;
                    }
                    None => {
                        result["message"] =
                            json!("System is already well-optimized for the given goal");
                    }
                }
                Ok(result)
            }

            Tool::PredictTrajectory => {
                let future_steps = arg_usize(args, "future_steps", 10);
                let changes: EnvironmentalChanges = match args.get("environmental_changes") {
                    Some(value) => serde_json::from_value(value.clone())?,
                    None => EnvironmentalChanges::default(),
                };
                let mut axiom = build(args);
                let mut simulator = AxiomSimulator::new(&mut axiom);
                let trajectory = simulator.simulate_trajectory(future_steps, changes);

                Ok(json!({
                    "analysis": analyze_trajectory(&trajectory),
                    "trajectory": trajectory,
                    "steps": future_steps,
                    "environmental_changes": changes,
                }))
            }

            Tool::DetectCollapseRisk => {
                let axiom = build(state_or_args(args));
                let state = axiom.get_state();
                let history = intelligence_history(args);
                let risk = assess_collapse_risk(&state, coherence_of(&axiom), &history);

                let mut result = json!({
                    "risk_level": risk.risk_level,
                    "risk_score": risk.risk_score,
                    "risk_factors": risk.risk_factors,
                    "warnings": risk.warnings,
                    "current_state": state,
                });
                if let Some(trend) = risk.trajectory_analysis {
                    result["trajectory_analysis"] = serde_json::to_value(trend)?;
                }
                Ok(result)
            }
        }
    }
}

/// Runs `name` with the default envelope.
pub fn execute_tool(name: &str, args: &Value) -> AxiomResult<Value> {
    ToolRunner::default().execute(name, args)
}

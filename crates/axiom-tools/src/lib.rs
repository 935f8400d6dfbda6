//! Named, JSON-in/JSON-out operations over the axiom model.
//!
//! Every call is validated against a [`axiom_guards::ParamEnvelope`] before
//! a fresh model is built from the normalized input, so tool calls never
//! share state.

pub mod analysis;
pub mod dispatch;


pub use analysis::{
    analyze_trajectory, assess_collapse_risk, compare_permutations, foundation_status,
    optimization_suggestions, optimized_projection, recommendations, CollapseRisk, Criterion,
    MetricComparison, OptimizationConstraints, OptimizationGoal, OptimizationSuggestion,
    OptimizedProjection, PermutationComparison, RiskFactor, RiskLevel, Severity,
    TrajectoryAnalysis, Winner,
};
pub use dispatch::{execute_tool, tool_names, Tool, ToolRunner};

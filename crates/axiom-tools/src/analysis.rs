use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use axiom_core::{coherence_of, AxiomState, UniversalAxiom};
use axiom_guards::config_from_state;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    pub fn from_score(score: u32) -> Self {
        match score {
            s if s >= 10 => RiskLevel::Critical,
            s if s >= 6 => RiskLevel::High,
            s if s >= 3 => RiskLevel::Medium,
            _ => RiskLevel::Low,
        }
    }

    pub fn warning(self) -> &'static str {
        match self {
            RiskLevel::Critical => {
                "CRITICAL: System collapse is imminent or has occurred. \
                 Immediate intervention required."
            }
            RiskLevel::High => {
                "HIGH RISK: System is under severe stress. Take corrective action soon."
            }
            RiskLevel::Medium => {
                "MODERATE RISK: Monitor system closely and address identified factors."
            }
            RiskLevel::Low => "System appears stable with low collapse risk.",
        }
    }
}

/// Severity of a risk factor, also used as the expected impact of a
/// suggestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskFactor {
    pub factor: String,
    pub severity: Severity,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecentTrend {
    Declining,
    StableOrImproving,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrajectoryTrend {
    pub recent_trend: RecentTrend,
    pub data_points: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollapseRisk {
    pub risk_level: RiskLevel,
    pub risk_score: u32,
    pub risk_factors: Vec<RiskFactor>,
    pub warnings: Vec<String>,
    pub trajectory_analysis: Option<TrajectoryTrend>,
}

struct Rule {
    factor: &'static str,
    severity: Severity,
    weight: u32,
    description: &'static str,
}

/// The first triggered tier of one check.
fn first_tier(tiers: [(bool, Rule); 2]) -> Option<Rule> {
    tiers
        .into_iter()
        .find(|(triggered, _)| *triggered)
        .map(|(_, rule)| rule)
}

/// Scores the structural weaknesses of a state.
///
/// | check        | first tier (weight)              | second tier (weight)         |
/// |--------------|----------------------------------|------------------------------|
/// | foundation   | <= 0 negative_foundation (10)    | < 0.5 weak_foundation (7)    |
/// | pressure     | > 5 extreme_pressure (6)         | > 3 high_pressure (3)        |
/// | subjectivity | > 0.9 extreme_subjectivity (5)   | > 0.7 high_subjectivity (3)  |
/// | purpose      | < 0.1 no_purpose (5)             | < 0.3 weak_purpose (2)       |
/// | coherence    | < 0.2 critical_coherence (8)     | < 0.4 low_coherence (4)      |
///
/// With more than two points of `intelligence_history`, three strictly
/// decreasing final values add declining_trajectory (high, 6).
pub fn assess_collapse_risk(
    state: &AxiomState,
    coherence: f64,
    intelligence_history: &[f64],
) -> CollapseRisk {
    let foundation = state.foundation.product;
    let pressure = state.foundation.c_pressure;
    let subjectivity = state.cognitive.x_subjectivity;
    let purpose = state.cognitive.y_purpose;

    let checks = [
        [
            (foundation <= 0.0, Rule {
                factor: "negative_foundation",
                severity: Severity::Critical,
                weight: 10,
                description: "Foundation is negative or zero - system has collapsed \
                              or will collapse immediately",
            }),
            (foundation < 0.5, Rule {
                factor: "weak_foundation",
                severity: Severity::High,
                weight: 7,
                description: "Foundation is weak and close to collapse",
            }),
        ],
        [
            (pressure > 5.0, Rule {
                factor: "extreme_pressure",
                severity: Severity::High,
                weight: 6,
                description: "Very high pressure can cause system instability and collapse",
            }),
            (pressure > 3.0, Rule {
                factor: "high_pressure",
                severity: Severity::Medium,
                weight: 3,
                description: "Elevated pressure - monitor for stress indicators",
            }),
        ],
        [
            (subjectivity > 0.9, Rule {
                factor: "extreme_subjectivity",
                severity: Severity::High,
                weight: 5,
                description: "Near-total subjectivity can lead to distortion \
                              and collapse of coherence",
            }),
            (subjectivity > 0.7, Rule {
                factor: "high_subjectivity",
                severity: Severity::Medium,
                weight: 3,
                description: "High subjectivity reduces objectivity and system stability",
            }),
        ],
        [
            (purpose < 0.1, Rule {
                factor: "no_purpose",
                severity: Severity::High,
                weight: 5,
                description: "Lack of purpose leads to directionless drift and potential collapse",
            }),
            (purpose < 0.3, Rule {
                factor: "weak_purpose",
                severity: Severity::Medium,
                weight: 2,
                description: "Low purpose alignment reduces system coherence",
            }),
        ],
        [
            (coherence < 0.2, Rule {
                factor: "critical_coherence",
                severity: Severity::Critical,
                weight: 8,
                description: "Critically low coherence indicates imminent system failure",
            }),
            (coherence < 0.4, Rule {
                factor: "low_coherence",
                severity: Severity::High,
                weight: 4,
                description: "Low coherence suggests system is under stress",
            }),
        ],
    ];

    let mut rules: Vec<Rule> = checks.into_iter().filter_map(first_tier).collect();

    let trajectory_analysis = (intelligence_history.len() > 2).then(|| {
        let recent = &intelligence_history[intelligence_history.len() - 3..];
        let declining = recent.windows(2).all(|w| w[1] < w[0]);
        if declining {
            rules.push(Rule {
                factor: "declining_trajectory",
                severity: Severity::High,
                weight: 6,
                description: "Intelligence has been declining consistently - \
                              indicates systemic degradation",
            });
        }
        TrajectoryTrend {
            recent_trend: if declining {
                RecentTrend::Declining
            } else {
                RecentTrend::StableOrImproving
            },
            data_points: intelligence_history.len(),
        }
    });

    let risk_score = rules.iter().map(|rule| rule.weight).sum();
    let risk_level = RiskLevel::from_score(risk_score);
    let risk_factors = rules
        .into_iter()
        .map(|rule| RiskFactor {
            factor: rule.factor.to_string(),
            severity: rule.severity,
            description: rule.description.to_string(),
        })
        .collect();

    CollapseRisk {
        risk_level,
        risk_score,
        risk_factors,
        warnings: vec![risk_level.warning().to_string()],
        trajectory_analysis,
    }
}

pub fn recommendations(state: &AxiomState, coherence: f64) -> Vec<String> {
    let mut out = Vec::new();

    if state.foundation.product <= 0.0 {
        out.push(
            "Critical: Foundation is negative or zero. \
             Address impulses, elements, or pressure immediately."
                .to_string(),
        );
    } else if state.foundation.c_pressure > 3.0 {
        out.push(
            "High pressure detected. Consider reducing constraints or resolving contradictions."
                .to_string(),
        );
    }

    if state.cognitive.x_subjectivity > 0.7 {
        out.push(
            "High subjectivity. Increase objectivity by gathering data and reducing bias."
                .to_string(),
        );
    }

    if state.cognitive.y_purpose < 0.3 {
        out.push(
            "Low purpose alignment. Clarify goals and direction before proceeding.".to_string(),
        );
    }

    if coherence < 0.4 {
        out.push("Low coherence. System needs realignment across multiple dimensions.".to_string());
    } else if coherence > 0.7 {
        out.push("High coherence. System is well-aligned and stable.".to_string());
    }

    if out.is_empty() {
        out.push("System appears balanced. Consider evolution or exploration.".to_string());
    }

    out
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Winner {
    A,
    B,
    #[serde(rename = "TIE")]
    Tie,
}

impl Winner {
    pub fn between(a: f64, b: f64) -> Self {
        if a > b {
            Winner::A
        } else if b > a {
            Winner::B
        } else {
            Winner::Tie
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricComparison {
    pub permutation_a: f64,
    pub permutation_b: f64,
    pub difference: f64,
    pub winner: Winner,
}

impl MetricComparison {
    pub fn new(a: f64, b: f64) -> Self {
        Self {
            permutation_a: a,
            permutation_b: b,
            difference: a - b,
            winner: Winner::between(a, b),
        }
    }
}

/// A metric two permutations can be compared on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Criterion {
    Intelligence,
    Coherence,
    Foundation,
    Cognitive,
    Dynamic,
}

impl Criterion {
    pub const ALL: [Criterion; 5] = [
        Criterion::Intelligence,
        Criterion::Coherence,
        Criterion::Foundation,
        Criterion::Cognitive,
        Criterion::Dynamic,
    ];

    pub const DEFAULT: [Criterion; 2] = [Criterion::Intelligence, Criterion::Coherence];

    pub fn name(self) -> &'static str {
        match self {
            Criterion::Intelligence => "intelligence",
            Criterion::Coherence => "coherence",
            Criterion::Foundation => "foundation",
            Criterion::Cognitive => "cognitive",
            Criterion::Dynamic => "dynamic",
        }
    }

    fn measure(self, axiom: &UniversalAxiom, state: &AxiomState) -> f64 {
        match self {
            Criterion::Intelligence => state.intelligence,
            Criterion::Coherence => coherence_of(axiom),
            Criterion::Foundation => state.foundation.product,
            Criterion::Cognitive => state.cognitive.product,
            Criterion::Dynamic => state.dynamic.product,
        }
    }
}

impl FromStr for Criterion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Criterion::ALL
            .into_iter()
            .find(|c| c.name() == s)
            .ok_or_else(|| s.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverallWinner {
    pub overall: Winner,
    pub wins_a: usize,
    pub wins_b: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PermutationComparison {
    pub comparison: BTreeMap<Criterion, MetricComparison>,
    pub winner: OverallWinner,
}

/// Per-criterion comparison plus the side that wins more criteria.
pub fn compare_permutations(
    a: &UniversalAxiom,
    b: &UniversalAxiom,
    criteria: &[Criterion],
) -> PermutationComparison {
    let (state_a, state_b) = (a.get_state(), b.get_state());
    let comparison: BTreeMap<Criterion, MetricComparison> = criteria
        .iter()
        .map(|c| {
            let metric = MetricComparison::new(c.measure(a, &state_a), c.measure(b, &state_b));
            (*c, metric)
        })
        .collect();

    let count = |side: Winner| comparison.values().filter(|m| m.winner == side).count();
    let (wins_a, wins_b) = (count(Winner::A), count(Winner::B));

    PermutationComparison {
        winner: OverallWinner {
            overall: Winner::between(wins_a as f64, wins_b as f64),
            wins_a,
            wins_b,
        },
        comparison,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptimizationGoal {
    #[default]
    MaximizeIntelligence,
    MaximizeCoherence,
    Balance,
    ReduceSubjectivity,
}

impl OptimizationGoal {
    pub const ALL: [OptimizationGoal; 4] = [
        OptimizationGoal::MaximizeIntelligence,
        OptimizationGoal::MaximizeCoherence,
        OptimizationGoal::Balance,
        OptimizationGoal::ReduceSubjectivity,
    ];

    pub fn name(self) -> &'static str {
        match self {
            OptimizationGoal::MaximizeIntelligence => "maximize_intelligence",
            OptimizationGoal::MaximizeCoherence => "maximize_coherence",
            OptimizationGoal::Balance => "balance",
            OptimizationGoal::ReduceSubjectivity => "reduce_subjectivity",
        }
    }

    fn targets_intelligence(self) -> bool {
        matches!(
            self,
            OptimizationGoal::MaximizeIntelligence | OptimizationGoal::Balance
        )
    }

    fn targets_coherence(self) -> bool {
        matches!(
            self,
            OptimizationGoal::MaximizeCoherence | OptimizationGoal::Balance
        )
    }
}

impl fmt::Display for OptimizationGoal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OptimizationGoal {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OptimizationGoal::ALL
            .into_iter()
            .find(|g| g.name() == s)
            .ok_or_else(|| s.to_string())
    }
}

/// Caller limits on suggestions. A set `max_pressure` suppresses the
/// high-pressure suggestion.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizationConstraints {
    pub max_pressure: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variable {
    Impulses,
    Elements,
    Pressure,
    Subjectivity,
    Purpose,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationSuggestion {
    pub variable: Variable,
    pub current: f64,
    pub suggested: f64,
    pub reason: String,
    pub expected_impact: Severity,
}

fn suggest(
    variable: Variable,
    current: f64,
    suggested: f64,
    reason: &str,
    expected_impact: Severity,
) -> OptimizationSuggestion {
    OptimizationSuggestion {
        variable,
        current,
        suggested,
        reason: reason.to_string(),
        expected_impact,
    }
}

/// Suggestions toward `goal`, in the order they should be applied. A later
/// suggestion for the same variable overrides an earlier one.
pub fn optimization_suggestions(
    state: &AxiomState,
    goal: OptimizationGoal,
    constraints: &OptimizationConstraints,
) -> Vec<OptimizationSuggestion> {
    let mut out = Vec::new();
    let foundation = &state.foundation;
    let subjectivity = state.cognitive.x_subjectivity;
    let purpose = state.cognitive.y_purpose;
    let pressure = foundation.c_pressure;

    if goal.targets_intelligence() {
        if subjectivity > 0.3 {
            out.push(suggest(
                Variable::Subjectivity,
                subjectivity,
                (subjectivity - 0.3).max(0.0),
                "Lower subjectivity increases objectivity (X), \
                 which multiplicatively boosts intelligence",
                Severity::High,
            ));
        }

        if purpose < 0.8 {
            out.push(suggest(
                Variable::Purpose,
                purpose,
                1.0,
                "Stronger purpose alignment (Y) directly increases intelligence",
                Severity::Medium,
            ));
        }

        if foundation.product <= 0.0 {
            if foundation.b_elements < 0.0 {
                out.push(suggest(
                    Variable::Elements,
                    foundation.b_elements,
                    foundation.b_elements.abs(),
                    "Detrimental elements create negative foundation - \
                     replace with beneficial elements",
                    Severity::Critical,
                ));
            }
            if foundation.a_impulses < 0.0 {
                out.push(suggest(
                    Variable::Impulses,
                    foundation.a_impulses,
                    foundation.a_impulses.abs(),
                    "Negative impulses create negative foundation - \
                     realign with positive drives",
                    Severity::Critical,
                ));
            }
        }

        if pressure > 4.0 {
            if constraints.max_pressure.is_none() {
                out.push(suggest(
                    Variable::Pressure,
                    pressure,
                    2.0,
                    "Very high pressure can cause stress - \
                     moderate pressure (around 1-2) is often optimal",
                    Severity::Medium,
                ));
            }
        } else if pressure < 0.5 {
            out.push(suggest(
                Variable::Pressure,
                pressure,
                1.0,
                "Low pressure reduces foundation strength - \
                 moderate pressure provides constructive force",
                Severity::Low,
            ));
        }
    }

    if goal.targets_coherence() {
        if subjectivity > 0.2 {
            out.push(suggest(
                Variable::Subjectivity,
                subjectivity,
                0.1,
                "High objectivity is key to coherence",
                Severity::High,
            ));
        }

        if (pressure - 1.0).abs() > 1.0 {
            out.push(suggest(
                Variable::Pressure,
                pressure,
                1.0,
                "Balanced pressure (around 1.0) maximizes coherence",
                Severity::Medium,
            ));
        }
    }

    if goal == OptimizationGoal::ReduceSubjectivity {
        out.push(suggest(
            Variable::Subjectivity,
            subjectivity,
            0.0,
            "Move to complete objectivity for maximum clarity",
            Severity::High,
        ));
    }

    out
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Improvement {
    pub intelligence: f64,
    /// `None` when the current intelligence is zero.
    pub intelligence_percent: Option<f64>,
    pub coherence: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OptimizedProjection {
    pub intelligence: f64,
    pub coherence: f64,
    pub improvement: Improvement,
}

/// Rebuilds `state` with every suggestion applied and reports the change.
/// `None` when there is nothing to apply.
pub fn optimized_projection(
    state: &AxiomState,
    suggestions: &[OptimizationSuggestion],
) -> Option<OptimizedProjection> {
    if suggestions.is_empty() {
        return None;
    }

    let current = UniversalAxiom::from_config(&config_from_state(state));
    let config = suggestions
        .iter()
        .fold(config_from_state(state), |config, s| match s.variable {
            Variable::Impulses => config.impulses(s.suggested),
            Variable::Elements => config.elements(s.suggested),
            Variable::Pressure => config.pressure(s.suggested),
            Variable::Subjectivity => config.subjectivity(s.suggested),
            Variable::Purpose => config.purpose(s.suggested),
        });
    let optimized = UniversalAxiom::from_config(&config);

    let (before, after) = (current.compute_intelligence(), optimized.compute_intelligence());
    let coherence = coherence_of(&optimized);
    let intelligence_percent =
        (before != 0.0).then(|| (after - before) / before.abs() * 100.0);

    Some(OptimizedProjection {
        intelligence: after,
        coherence,
        improvement: Improvement {
            intelligence: after - before,
            intelligence_percent,
            coherence: coherence - coherence_of(&current),
        },
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntelligenceDirection {
    Increasing,
    Decreasing,
    Stable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoherenceDirection {
    Improving,
    Degrading,
    Stable,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IntelligenceSummary {
    pub start: f64,
    pub end: f64,
    pub change: f64,
    pub trend: IntelligenceDirection,
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoherenceSummary {
    pub start: f64,
    pub end: f64,
    pub change: f64,
    pub trend: CoherenceDirection,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryAnalysis {
    pub intelligence: IntelligenceSummary,
    pub coherence: CoherenceSummary,
}

/// Start-to-end summary of a predicted trajectory; `None` for an empty one.
pub fn analyze_trajectory(trajectory: &[AxiomState]) -> Option<TrajectoryAnalysis> {
    let (first, last) = (trajectory.first()?, trajectory.last()?);
    let coherence = |state: &AxiomState| {
        coherence_of(&UniversalAxiom::from_config(&config_from_state(state)))
    };

    let (start, end) = (first.intelligence, last.intelligence);
    let intelligence = IntelligenceSummary {
        start,
        end,
        change: end - start,
        trend: match Winner::between(end, start) {
            Winner::A => IntelligenceDirection::Increasing,
            Winner::B => IntelligenceDirection::Decreasing,
            Winner::Tie => IntelligenceDirection::Stable,
        },
        min: trajectory
            .iter()
            .map(|s| s.intelligence)
            .fold(f64::INFINITY, f64::min),
        max: trajectory
            .iter()
            .map(|s| s.intelligence)
            .fold(f64::NEG_INFINITY, f64::max),
    };

    let (start, end) = (coherence(first), coherence(last));
    let coherence = CoherenceSummary {
        start,
        end,
        change: end - start,
        trend: match Winner::between(end, start) {
            Winner::A => CoherenceDirection::Improving,
            Winner::B => CoherenceDirection::Degrading,
            Winner::Tie => CoherenceDirection::Stable,
        },
    };

    Some(TrajectoryAnalysis {
        intelligence,
        coherence,
    })
}

/// `positive` or `negative_or_zero`.
pub fn foundation_status(state: &AxiomState) -> &'static str {
    if state.foundation.product > 0.0 {
        "positive"
    } else {
        "negative_or_zero"
    }
}

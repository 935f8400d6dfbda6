use axiom_core::{AxiomError, AxiomResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::input::{is_nested, NESTED_FIELDS};

/// Constraints for a single numeric argument.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NumberBounds {
    pub required: bool,
    pub integer: bool,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl NumberBounds {
    pub const ANY: NumberBounds = NumberBounds {
        required: false,
        integer: false,
        min: None,
        max: None,
    };

    pub const fn at_least(min: f64) -> Self {
        Self {
            min: Some(min),
            ..Self::ANY
        }
    }

    pub const fn between(min: f64, max: f64) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
            ..Self::ANY
        }
    }

    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub const fn integer(mut self) -> Self {
        self.integer = true;
        self
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) | Value::Object(_) => "object",
    }
}

/// Checks an already-typed number against `bounds`.
pub fn check_number(value: f64, name: &str, bounds: &NumberBounds) -> Vec<String> {
    let mut errors = Vec::new();

    if value.is_nan() {
        errors.push(format!("{name} cannot be NaN"));
    }
    if !value.is_finite() {
        errors.push(format!("{name} must be finite (not Infinity or -Infinity)"));
    }
    if bounds.integer && value.fract() != 0.0 {
        errors.push(format!("{name} must be an integer, got {value}"));
    }
    if let Some(min) = bounds.min {
        if value < min {
            errors.push(format!("{name} must be >= {min}, got {value}"));
        }
    }
    if let Some(max) = bounds.max {
        if value > max {
            errors.push(format!("{name} must be <= {max}, got {value}"));
        }
    }

    errors
}

/// Checks an optional JSON argument against `bounds`.
///
/// Missing or `null` values are accepted unless the bounds mark them as
/// required.
pub fn validate_number(value: Option<&Value>, name: &str, bounds: &NumberBounds) -> Vec<String> {
    match value {
        None | Some(Value::Null) => {
            if bounds.required {
                vec![format!("{name} is required")]
            } else {
                Vec::new()
            }
        }
        Some(Value::Number(number)) => match number.as_f64() {
            Some(v) => check_number(v, name, bounds),
            None => vec![format!("{name} must be finite (not Infinity or -Infinity)")],
        },
        Some(other) => vec![format!(
            "{name} must be a number, got {}",
            json_type_name(other)
        )],
    }
}

/// Structural check for the nested state shape.
pub fn validate_state(state: &Value) -> Vec<String> {
    let Some(object) = state.as_object() else {
        return vec!["current_state must be a valid object".to_string()];
    };

    let mut errors = Vec::new();
    for layer in ["foundation", "dynamic", "cognitive"] {
        if !object.get(layer).is_some_and(Value::is_object) {
            errors.push(format!(
                "current_state.{layer} is required and must be an object"
            ));
        }
    }
    if !object.get("n").is_some_and(Value::is_number) {
        errors.push("current_state.n is required and must be a number".to_string());
    }
    errors
}

/// Request-side bounds applied before any input reaches the core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParamEnvelope {
    pub pressure_min: f64,
    pub subjectivity_min: f64,
    pub subjectivity_max: f64,
    pub purpose_min: f64,
    pub time_min: f64,
    pub n_min: f64,
    /// Above the core's own ceiling; the core clamps `n` afterwards.
    pub n_max: f64,
    pub steps_max: f64,
    pub delta_time_min: f64,
    pub delta_time_max: f64,
    pub pressure_delta_limit: f64,
    pub subjectivity_delta_limit: f64,
}

impl Default for ParamEnvelope {
    fn default() -> Self {
        Self {
            pressure_min: 0.01,
            subjectivity_min: 0.0,
            subjectivity_max: 1.0,
            purpose_min: 0.01,
            time_min: 0.0,
            n_min: 1.0,
            n_max: 1000.0,
            steps_max: 1000.0,
            delta_time_min: 0.001,
            delta_time_max: 100.0,
            pressure_delta_limit: 100.0,
            subjectivity_delta_limit: 1.0,
        }
    }
}

impl ParamEnvelope {
    pub fn from_json(json: &str) -> AxiomResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| AxiomError::Config(format!("JSON parse error: {e}")))
    }

    /// Bounds for each of the seven model parameters, in reporting order.
    fn param_bounds(&self) -> [(&'static str, NumberBounds); 7] {
        [
            ("impulses", NumberBounds::ANY),
            ("elements", NumberBounds::ANY),
            ("pressure", NumberBounds::at_least(self.pressure_min)),
            (
                "subjectivity",
                NumberBounds::between(self.subjectivity_min, self.subjectivity_max),
            ),
            ("purpose", NumberBounds::at_least(self.purpose_min)),
            ("time", NumberBounds::at_least(self.time_min)),
            ("n", NumberBounds::between(self.n_min, self.n_max).integer()),
        ]
    }

    /// Per-field messages for the seven model parameters in flat form.
    pub fn validate_params(&self, args: &Value) -> Vec<String> {
        self.param_bounds()
            .iter()
            .flat_map(|(name, bounds)| validate_number(args.get(name), name, bounds))
            .collect()
    }

    /// Per-field messages for the raw leaves of a nested state, named
    /// `current_state.<layer>.<key>`. Derived fields are not checked.
    pub fn validate_nested_params(&self, state: &Value) -> Vec<String> {
        let mut errors = Vec::new();
        for (param, bounds) in self.param_bounds() {
            if param == "n" {
                errors.extend(validate_number(state.get("n"), "current_state.n", &bounds));
                continue;
            }
            let Some((_, layer, key)) = NESTED_FIELDS.iter().find(|(p, _, _)| *p == param) else {
                continue;
            };
            let leaf = state.get(layer).and_then(|l| l.get(key));
            errors.extend(validate_number(
                leaf,
                &format!("current_state.{layer}.{key}"),
                &bounds,
            ));
        }
        errors
    }

    /// Parameter checks for either input shape. Nested leaves are checked
    /// before normalization; structure is checked by [`validate_state`].
    pub fn validate_input(&self, args: &Value) -> Vec<String> {
        if is_nested(args) {
            self.validate_nested_params(args)
        } else {
            self.validate_params(args)
        }
    }

    pub fn validate_steps(&self, args: &Value, key: &str) -> Vec<String> {
        validate_number(
            args.get(key),
            key,
            &NumberBounds::between(1.0, self.steps_max).integer(),
        )
    }

    pub fn validate_delta_time(&self, args: &Value) -> Vec<String> {
        validate_number(
            args.get("delta_time"),
            "delta_time",
            &NumberBounds::between(self.delta_time_min, self.delta_time_max),
        )
    }

    pub fn validate_pressure_delta(&self, args: &Value) -> Vec<String> {
        let limit = self.pressure_delta_limit;
        validate_number(
            args.get("pressure_delta"),
            "pressure_delta",
            &NumberBounds::between(-limit, limit).required(),
        )
    }

    pub fn validate_subjectivity_delta(&self, args: &Value) -> Vec<String> {
        let limit = self.subjectivity_delta_limit;
        validate_number(
            args.get("subjectivity_delta"),
            "subjectivity_delta",
            &NumberBounds::between(-limit, limit).required(),
        )
    }
}

/// Turns a list of messages into a result.
pub fn into_result(errors: Vec<String>) -> AxiomResult<()> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(AxiomError::Validation(errors))
    }
}

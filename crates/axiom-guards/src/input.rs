use axiom_core::{AxiomConfig, AxiomState};
use serde_json::Value;

const NESTED_KEYS: [&str; 3] = ["foundation", "cognitive", "dynamic"];

/// Flat parameter name, layer and key of every nested input leaf.
pub(crate) const NESTED_FIELDS: [(&str, &str, &str); 6] = [
    ("impulses", "foundation", "A_impulses"),
    ("elements", "foundation", "B_elements"),
    ("pressure", "foundation", "C_pressure"),
    ("subjectivity", "cognitive", "X_subjectivity"),
    ("purpose", "cognitive", "Y_purpose"),
    ("time", "cognitive", "Z_time"),
];

/// True when `args` uses the nested `get_state()` shape.
pub fn is_nested(args: &Value) -> bool {
    NESTED_KEYS.iter().any(|key| args.get(key).is_some())
}

/// Picks `current_state` when present, otherwise the arguments themselves.
pub fn state_or_args(args: &Value) -> &Value {
    match args.get("current_state") {
        Some(state) if !state.is_null() => state,
        _ => args,
    }
}

fn number_at(value: &Value, path: &[&str]) -> Option<f64> {
    path.iter()
        .try_fold(value, |current, key| current.get(key))
        .and_then(Value::as_f64)
}

/// Integer iteration index; fractional values are floored.
fn iteration_at(value: &Value) -> Option<i64> {
    let n = value.get("n")?;
    n.as_i64().or_else(|| n.as_f64().map(|v| v.floor() as i64))
}

/// Single entry point mapping either input shape onto [`AxiomConfig`].
///
/// Flat form: `{impulses, elements, pressure, subjectivity, purpose, time, n}`.
/// Nested form: the serialized [`AxiomState`] layout, where derived fields
/// (products, `E_n`, `F_n`, objectivity, intelligence) are ignored.
pub fn normalize_input(args: &Value) -> AxiomConfig {
    if is_nested(args) {
        AxiomConfig {
            impulses: number_at(args, &["foundation", "A_impulses"]),
            elements: number_at(args, &["foundation", "B_elements"]),
            pressure: number_at(args, &["foundation", "C_pressure"]),
            subjectivity: number_at(args, &["cognitive", "X_subjectivity"]),
            purpose: number_at(args, &["cognitive", "Y_purpose"]),
            time: number_at(args, &["cognitive", "Z_time"]),
            n: iteration_at(args),
        }
    } else {
        AxiomConfig {
            impulses: number_at(args, &["impulses"]),
            elements: number_at(args, &["elements"]),
            pressure: number_at(args, &["pressure"]),
            subjectivity: number_at(args, &["subjectivity"]),
            purpose: number_at(args, &["purpose"]),
            time: number_at(args, &["time"]),
            n: iteration_at(args),
        }
    }
}

/// Config that rebuilds a model equivalent to the one `state` was taken from.
pub fn config_from_state(state: &AxiomState) -> AxiomConfig {
    AxiomConfig {
        impulses: Some(state.foundation.a_impulses),
        elements: Some(state.foundation.b_elements),
        pressure: Some(state.foundation.c_pressure),
        subjectivity: Some(state.cognitive.x_subjectivity),
        purpose: Some(state.cognitive.y_purpose),
        time: Some(state.cognitive.z_time),
        n: Some(i64::from(state.n)),
    }
}

use serde::{Deserialize, Serialize};

/// Snapshot of a [`UniversalAxiom`](crate::UniversalAxiom) at one instant.
///
/// The serialized field names and nesting are a compatibility contract
/// with external consumers and must not change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxiomState {
    pub n: u32,
    pub foundation: FoundationState,
    pub dynamic: DynamicState,
    pub cognitive: CognitiveState,
    pub intelligence: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoundationState {
    #[serde(rename = "A_impulses")]
    pub a_impulses: f64,
    #[serde(rename = "B_elements")]
    pub b_elements: f64,
    #[serde(rename = "C_pressure")]
    pub c_pressure: f64,
    pub product: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DynamicState {
    #[serde(rename = "E_n")]
    pub e_n: f64,
    #[serde(rename = "F_n")]
    pub f_n: u64,
    pub product: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CognitiveState {
    #[serde(rename = "X_subjectivity")]
    pub x_subjectivity: f64,
    #[serde(rename = "X_objectivity")]
    pub x_objectivity: f64,
    #[serde(rename = "Y_purpose")]
    pub y_purpose: f64,
    #[serde(rename = "Z_time")]
    pub z_time: f64,
    pub product: f64,
}

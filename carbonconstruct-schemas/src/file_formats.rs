use crate::{calculation::CalculationInput, factor::EmissionFactor};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct EmissionFactorFile {
    pub schema_version: String,
    pub factors: Vec<EmissionFactor>,
}

#[derive(Debug, Deserialize)]
pub struct ProjectFile {
    pub schema_version: String,
    pub projects: Vec<Project>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    #[serde(flatten)]
    pub input: CalculationInput,
}

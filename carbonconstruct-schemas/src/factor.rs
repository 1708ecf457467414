use crate::line_item::Category;
use serde::{Deserialize, Serialize};

/// A conversion rate from a physical quantity to kg CO2e.
///
/// Material factors are per kg, transport factors per tonne-km and energy
/// factors per unit of the source (kWh, L, MJ).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmissionFactor {
    pub category: Category,
    #[serde(rename = "type")]
    pub subtype: String,
    pub factor: f64,
    pub unit: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl EmissionFactor {
    pub fn new(category: Category, subtype: &str, factor: f64, unit: &str) -> Self {
        Self {
            category,
            subtype: subtype.to_string(),
            factor,
            unit: unit.to_string(),
            source: None,
        }
    }
}

use crate::line_item::{EnergyItem, LineItem, MaterialItem, TransportItem};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Everything a single emissions calculation is run over.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CalculationInput {
    #[serde(default)]
    pub materials: Vec<MaterialItem>,
    #[serde(default)]
    pub transport: Vec<TransportItem>,
    #[serde(default)]
    pub energy: Vec<EnergyItem>,
}

impl CalculationInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_material(mut self, material_type: impl Into<String>, quantity: f64) -> Self {
        self.materials.push(MaterialItem::new(material_type, quantity));
        self
    }

    pub fn with_transport(
        mut self,
        mode: impl Into<String>,
        distance: f64,
        weight: Option<f64>,
    ) -> Self {
        self.transport.push(TransportItem::new(mode, distance, weight));
        self
    }

    pub fn with_energy(mut self, source: impl Into<String>, amount: f64) -> Self {
        self.energy.push(EnergyItem::new(source, amount));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty() && self.transport.is_empty() && self.energy.is_empty()
    }

    /// Shallow positional equality: every collection has the same length and
    /// the items at each index match. Reordering items is a mismatch.
    pub fn matches(&self, other: &CalculationInput) -> bool {
        items_match(&self.materials, &other.materials)
            && items_match(&self.transport, &other.transport)
            && items_match(&self.energy, &other.energy)
    }
}

fn items_match<T: LineItem>(left: &[T], right: &[T]) -> bool {
    left.len() == right.len() && left.iter().zip(right).all(|(l, r)| l.matches(r))
}

/// Emissions in kg CO2e, per category and per subtype.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CalculationResult {
    pub total_emissions: f64,
    pub material_emissions: f64,
    pub transport_emissions: f64,
    pub energy_emissions: f64,
    pub breakdown_by_material: BTreeMap<String, f64>,
    pub breakdown_by_transport: BTreeMap<String, f64>,
    pub breakdown_by_energy: BTreeMap<String, f64>,
}

use crate::factors::EmissionFactorTable;
use carbonconstruct_schemas::{
    calculation::{CalculationInput, CalculationResult},
    line_item::{LineItem, TransportItem},
};
use std::collections::BTreeMap;
use tracing::warn;

/// Anything that can turn a project input into an emissions result.
///
/// Implementations must be pure: the same input always yields the same
/// result. The calculation cache relies on this.
pub trait EmissionCalculator: Send + Sync {
    fn calculate(&self, input: &CalculationInput) -> CalculationResult;
}

impl EmissionCalculator for EmissionFactorTable {
    fn calculate(&self, input: &CalculationInput) -> CalculationResult {
        calculate_emissions(input, self)
    }
}

/// Computes per-category and per-subtype emissions for `input`.
///
/// Items whose subtype has no factor in `factors`, and transport legs without
/// a weight, contribute zero and are reported with a warning. Category totals
/// are the sums of their breakdown maps.
pub fn calculate_emissions(input: &CalculationInput, factors: &EmissionFactorTable) -> CalculationResult {
    let breakdown_by_material = breakdown(&input.materials, factors, |item, factor| factor * item.quantity);
    let breakdown_by_transport = breakdown(&input.transport, factors, transport_emissions);
    let breakdown_by_energy = breakdown(&input.energy, factors, |item, factor| factor * item.amount);

    let material_emissions = sum(&breakdown_by_material);
    let transport_emissions = sum(&breakdown_by_transport);
    let energy_emissions = sum(&breakdown_by_energy);

    CalculationResult {
        total_emissions: material_emissions + transport_emissions + energy_emissions,
        material_emissions,
        transport_emissions,
        energy_emissions,
        breakdown_by_material,
        breakdown_by_transport,
        breakdown_by_energy,
    }
}

fn breakdown<T, F>(items: &[T], factors: &EmissionFactorTable, contribution: F) -> BTreeMap<String, f64>
where
    T: LineItem,
    F: Fn(&T, f64) -> f64,
{
    let mut by_subtype = BTreeMap::new();
    for item in items {
        let emissions = match factors.lookup(T::CATEGORY, item.subtype()) {
            Some(factor) => contribution(item, factor),
            None => {
                warn!(
                    category = %T::CATEGORY,
                    subtype = %item.subtype(),
                    "No emission factor found, item contributes zero"
                );
                0.0
            }
        };
        *by_subtype.entry(item.subtype().to_string()).or_insert(0.0) += emissions;
    }
    by_subtype
}

// Transport factors are per tonne-km.
fn transport_emissions(item: &TransportItem, factor: f64) -> f64 {
    match item.weight {
        Some(weight_kg) => factor * item.distance * (weight_kg / 1000.0),
        None => {
            warn!(mode = %item.mode, distance = item.distance, "Transport leg has no weight, contributes zero");
            0.0
        }
    }
}

fn sum(breakdown: &BTreeMap<String, f64>) -> f64 {
    breakdown.values().fold(0.0, |acc, v| acc + v)
}

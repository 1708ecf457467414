use carbonconstruct_core::{calculate_emissions, EmissionCalculator, EmissionFactorTable};
use carbonconstruct_schemas::{
    calculation::{CalculationInput, CalculationResult},
    factor::EmissionFactor,
    line_item::Category,
};

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

fn test_factors() -> EmissionFactorTable {
    EmissionFactorTable::from_factors([
        EmissionFactor::new(Category::Material, "concrete", 0.13, "kg CO2e/kg"),
        EmissionFactor::new(Category::Material, "steel", 1.55, "kg CO2e/kg"),
        EmissionFactor::new(Category::Transport, "truck", 0.1, "kg CO2e/t.km"),
        EmissionFactor::new(Category::Energy, "electricity", 0.8, "kg CO2e/kWh"),
    ])
}

fn mixed_project() -> CalculationInput {
    CalculationInput::new()
        .with_material("concrete", 1200.0)
        .with_material("steel", 85.5)
        .with_material("concrete", 300.0)
        .with_transport("truck", 40.0, Some(12_000.0))
        .with_transport("truck", 15.0, Some(2_500.0))
        .with_energy("electricity", 640.0)
}

fn assert_consistent(result: &CalculationResult) {
    assert_eq!(result.material_emissions, result.breakdown_by_material.values().sum::<f64>());
    assert_eq!(result.transport_emissions, result.breakdown_by_transport.values().sum::<f64>());
    assert_eq!(result.energy_emissions, result.breakdown_by_energy.values().sum::<f64>());
    assert_eq!(
        result.total_emissions,
        result.material_emissions + result.transport_emissions + result.energy_emissions
    );
}

#[test]
fn single_concrete_item_example() {
    let input = CalculationInput::new().with_material("concrete", 100.0);
    let result = calculate_emissions(&input, &test_factors());

    assert_eq!(result.breakdown_by_material.len(), 1);
    assert_close(result.breakdown_by_material["concrete"], 13.0);
    assert_close(result.material_emissions, 13.0);
    assert_close(result.total_emissions, 13.0);
    assert_eq!(result.transport_emissions, 0.0);
    assert_eq!(result.energy_emissions, 0.0);
}

#[test]
fn empty_input_yields_zero_totals_and_empty_breakdowns() {
    let result = calculate_emissions(&CalculationInput::new(), &test_factors());
    assert_eq!(result.total_emissions, 0.0);
    assert!(result.breakdown_by_material.is_empty());
    assert!(result.breakdown_by_transport.is_empty());
    assert!(result.breakdown_by_energy.is_empty());
}

#[test]
fn repeated_subtypes_are_summed_in_the_breakdown() {
    let result = calculate_emissions(&mixed_project(), &test_factors());

    assert_eq!(result.breakdown_by_material.len(), 2);
    assert_close(result.breakdown_by_material["concrete"], 1500.0 * 0.13);
    assert_close(result.breakdown_by_material["steel"], 85.5 * 1.55);
    assert_close(result.breakdown_by_transport["truck"], 0.1 * 40.0 * 12.0 + 0.1 * 15.0 * 2.5);
    assert_close(result.breakdown_by_energy["electricity"], 512.0);
    assert_consistent(&result);
}

#[test]
fn transport_is_scaled_per_tonne_km() {
    let input = CalculationInput::new().with_transport("truck", 100.0, Some(500.0));
    let result = calculate_emissions(&input, &test_factors());
    assert_close(result.transport_emissions, 0.1 * 100.0 * 0.5);
}

#[test]
fn transport_without_weight_contributes_zero() {
    let input = CalculationInput::new()
        .with_transport("truck", 100.0, None)
        .with_transport("truck", 10.0, Some(1000.0));
    let result = calculate_emissions(&input, &test_factors());
    assert_close(result.breakdown_by_transport["truck"], 1.0);
    assert_close(result.total_emissions, 1.0);
}

#[test]
fn missing_factor_degrades_to_zero_without_failing() {
    let input = CalculationInput::new()
        .with_material("concrete", 100.0)
        .with_material("mycelium_board", 40.0)
        .with_transport("airship", 300.0, Some(1000.0))
        .with_energy("fusion", 12.0);
    let result = calculate_emissions(&input, &test_factors());

    assert_eq!(result.breakdown_by_material["mycelium_board"], 0.0);
    assert_eq!(result.breakdown_by_transport["airship"], 0.0);
    assert_eq!(result.breakdown_by_energy["fusion"], 0.0);
    assert_close(result.total_emissions, 13.0);
    assert_consistent(&result);
}

#[test]
fn aggregation_is_deterministic() {
    let factors = EmissionFactorTable::builtin();
    let input = CalculationInput::new()
        .with_material("timber", 3.3)
        .with_material("glass", 0.7)
        .with_material("aluminium", 12.1)
        .with_transport("rail", 812.0, Some(31_000.0))
        .with_energy("diesel", 77.7)
        .with_energy("natural_gas", 1000.0);

    let first = calculate_emissions(&input, &factors);
    for _ in 0..10 {
        let again = calculate_emissions(&input, &factors);
        assert_eq!(again, first);
        assert_eq!(again.total_emissions.to_bits(), first.total_emissions.to_bits());
    }
    assert_consistent(&first);
}

#[test]
fn factor_table_is_an_emission_calculator() {
    let factors = test_factors();
    let input = mixed_project();
    assert_eq!(factors.calculate(&input), calculate_emissions(&input, &factors));
}

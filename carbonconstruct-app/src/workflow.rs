use anyhow::Result;
use carbonconstruct_core::{CacheStats, CalculationCache, EmissionFactorTable};
use carbonconstruct_schemas::{
    calculation::CalculationResult, file_formats::ProjectFile, line_item::Category,
};
use serde::Serialize;
use std::collections::BTreeMap;

/// The outcome of one project in a batch.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectReport {
    pub name: String,
    pub cached: bool,
    pub result: CalculationResult,
}

#[derive(Debug, Serialize)]
pub struct BatchReport {
    pub projects: Vec<ProjectReport>,
    pub cache: CacheStats,
}

/// Runs every project through the shared cache, in file order.
pub fn run_projects(projects: &ProjectFile, cache: &mut CalculationCache) -> BatchReport {
    let mut reports = Vec::with_capacity(projects.projects.len());

    for project in &projects.projects {
        let hits_before = cache.stats().hits;
        let result = cache.calculate_with_cache(&project.input);
        reports.push(ProjectReport {
            name: project.name.clone(),
            cached: cache.stats().hits > hits_before,
            result,
        });
    }

    BatchReport {
        projects: reports,
        cache: cache.stats(),
    }
}

pub fn print_json_report(report: &BatchReport) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}

pub fn print_summary_report(report: &BatchReport) {
    println!("\n--- [Embodied Carbon Report] ---");
    println!("Generated: {}", chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC"));
    println!("========================================");

    for project in &report.projects {
        let result = &project.result;
        println!(
            "\nProject: {}{}",
            project.name,
            if project.cached { " (cached)" } else { "" }
        );
        print_breakdown("Materials", result.material_emissions, &result.breakdown_by_material);
        print_breakdown("Transport", result.transport_emissions, &result.breakdown_by_transport);
        print_breakdown("Energy", result.energy_emissions, &result.breakdown_by_energy);
        println!("  --------------------------------------");
        println!("  - Total:                    {:>12.2} kg CO2e", result.total_emissions);
    }

    println!("\nCalculation Cache:");
    println!("  - Hits:      {}", report.cache.hits);
    println!("  - Misses:    {}", report.cache.misses);
    println!("  - Evictions: {}", report.cache.evictions);
    println!("  - Expired:   {}", report.cache.expired);
    println!("========================================");
}

fn print_breakdown(label: &str, total: f64, breakdown: &BTreeMap<String, f64>) {
    println!("  - {:<26}{:>12.2} kg CO2e", format!("{}:", label), total);
    for (subtype, emissions) in breakdown {
        println!("    - {:<24}{:>12.2}", subtype, emissions);
    }
}

pub fn print_factor_table(table: &EmissionFactorTable, category: Option<Category>) {
    println!("{:<10} {:<20} {:>10}  {:<14} {}", "CATEGORY", "TYPE", "FACTOR", "UNIT", "SOURCE");
    for factor in table
        .sorted()
        .into_iter()
        .filter(|f| category.map_or(true, |c| f.category == c))
    {
        println!(
            "{:<10} {:<20} {:>10.4}  {:<14} {}",
            factor.category,
            factor.subtype,
            factor.factor,
            factor.unit,
            factor.source.as_deref().unwrap_or("-")
        );
    }
}

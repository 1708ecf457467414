use anyhow::{Context, Result};
use carbonconstruct_core::CalculationCache;
use carbonconstruct_schemas::line_item::Category;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod config;
mod workflow;

#[derive(Debug, Parser)]
#[command(name = "carbonconstruct", version, about = "Embodied carbon estimates for construction projects")]
struct Cli {
    /// YAML file with cache and factor settings.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Extra emission factor file or directory (.yaml, .yml, .csv). Repeatable.
    #[arg(long = "factors", global = true)]
    factors: Vec<PathBuf>,

    /// Start from an empty factor table instead of the built-in defaults.
    #[arg(long, global = true)]
    no_builtin_factors: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Calculate emissions for every project in a project file.
    Calculate {
        project_file: PathBuf,

        /// Print results as JSON instead of the summary report.
        #[arg(long)]
        json: bool,
    },
    /// List the effective emission factor table.
    Factors {
        #[arg(long)]
        category: Option<Category>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut app_config = config::AppConfig::load(cli.config.as_deref())?;
    if cli.no_builtin_factors {
        app_config.use_builtin_factors = false;
    }
    let factors = app_config.load_factor_table(&cli.factors)?;

    match cli.command {
        Command::Calculate { project_file, json } => {
            let projects = config::load_projects(&project_file)?;
            let mut cache = CalculationCache::builder()
                .with_factor_table(factors)
                .with_config(app_config.cache_config()?)
                .build()
                .context("Failed to set up the calculation cache")?;

            let report = workflow::run_projects(&projects, &mut cache);
            if json {
                workflow::print_json_report(&report)?;
            } else {
                workflow::print_summary_report(&report);
            }
        }
        Command::Factors { category } => workflow::print_factor_table(&factors, category),
    }

    Ok(())
}

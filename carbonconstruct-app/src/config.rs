use anyhow::{bail, Context, Result};
use carbonconstruct_core::{CacheConfig, EmissionFactorTable, CACHE_TTL_SECONDS, MAX_CACHE_SIZE};
use carbonconstruct_schemas::file_formats::ProjectFile;
use chrono::Duration;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::info;

/// Settings read from the optional `--config` YAML file.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub cache: CacheSettings,
    /// Factor files or directories layered over the built-in table, in order.
    pub factor_files: Vec<PathBuf>,
    pub use_builtin_factors: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheSettings {
    pub max_entries: usize,
    pub ttl_seconds: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            cache: CacheSettings::default(),
            factor_files: Vec::new(),
            use_builtin_factors: true,
        }
    }
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            max_entries: MAX_CACHE_SIZE,
            ttl_seconds: CACHE_TTL_SECONDS as u64,
        }
    }
}

impl AppConfig {
    /// Loads the config file, or the defaults when no path is given.
    /// Relative factor paths are resolved against the config file's directory.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        let mut config: AppConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse YAML from {:?}", path))?;

        if let Some(base) = path.parent() {
            config.factor_files = config
                .factor_files
                .into_iter()
                .map(|p| if p.is_relative() { base.join(p) } else { p })
                .collect();
        }
        Ok(config)
    }

    pub fn cache_config(&self) -> Result<CacheConfig> {
        let ttl = i64::try_from(self.cache.ttl_seconds)
            .ok()
            .and_then(Duration::try_seconds)
            .context("cache.ttl_seconds is too large")?;
        Ok(CacheConfig {
            max_entries: self.cache.max_entries,
            ttl,
        })
    }

    /// Builds the effective factor table: the built-in set (unless disabled),
    /// then the configured files, then `extra` files from the command line.
    pub fn load_factor_table(&self, extra: &[PathBuf]) -> Result<EmissionFactorTable> {
        let mut table = if self.use_builtin_factors {
            EmissionFactorTable::builtin()
        } else {
            EmissionFactorTable::new()
        };

        for path in self.factor_files.iter().chain(extra) {
            let layer = EmissionFactorTable::load_path(path)
                .with_context(|| format!("Failed to load emission factors from {:?}", path))?;
            table.merge(layer);
        }

        if table.is_empty() {
            bail!("No emission factors available: built-in factors are disabled and no factor files were given");
        }
        info!(factors = table.len(), "Emission factor table ready");
        Ok(table)
    }
}

pub fn load_projects(path: &Path) -> Result<ProjectFile> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read project file: {:?}", path))?;
    serde_yaml::from_str(&content).with_context(|| format!("Failed to parse YAML from {:?}", path))
}

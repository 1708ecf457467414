use super::{
    clock::{Clock, SystemClock},
    CacheConfig, CacheStats, CalculationCache,
};
use crate::{aggregator::EmissionCalculator, error::CarbonError, factors::EmissionFactorTable};
use chrono::Duration;
use std::{collections::VecDeque, sync::Arc};

/// A fluent builder for constructing a `CalculationCache`.
///
/// Only the emission calculator is required. Capacity and time-to-live default
/// to `MAX_CACHE_SIZE` entries and five minutes, and timestamps come from the
/// system clock unless another `Clock` is supplied.
pub struct CalculationCacheBuilder {
    calculator: Option<Arc<dyn EmissionCalculator>>,
    clock: Arc<dyn Clock>,
    config: CacheConfig,
}

impl Default for CalculationCacheBuilder {
    fn default() -> Self {
        Self {
            calculator: None,
            clock: Arc::new(SystemClock),
            config: CacheConfig::default(),
        }
    }
}

impl CalculationCacheBuilder {
    /// Creates a new builder with default capacity and TTL.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps the standard aggregator over the given factor table.
    pub fn with_factor_table(mut self, factors: EmissionFactorTable) -> Self {
        self.calculator = Some(Arc::new(factors));
        self
    }

    /// Wraps an arbitrary calculator instead of a factor table.
    pub fn with_calculator(mut self, calculator: Arc<dyn EmissionCalculator>) -> Self {
        self.calculator = Some(calculator);
        self
    }

    pub fn with_max_entries(mut self, max_entries: usize) -> Self {
        self.config.max_entries = max_entries;
        self
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.config.ttl = ttl;
        self
    }

    pub fn with_config(mut self, config: CacheConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Consumes the builder and returns an empty `CalculationCache`.
    ///
    /// # Errors
    ///
    /// Returns a `CarbonError` if no calculator was provided, the capacity is
    /// zero or the TTL is not positive.
    pub fn build(self) -> Result<CalculationCache, CarbonError> {
        if self.config.max_entries == 0 {
            return Err(CarbonError::ConfigError(
                "cache capacity must be at least one entry".to_string(),
            ));
        }
        if self.config.ttl <= Duration::zero() {
            return Err(CarbonError::ConfigError(format!(
                "cache TTL must be positive, got {} seconds",
                self.config.ttl.num_seconds()
            )));
        }

        Ok(CalculationCache {
            entries: VecDeque::new(),
            calculator: self.calculator.ok_or(CarbonError::FactorTableNotDefined)?,
            clock: self.clock,
            config: self.config,
            stats: CacheStats::default(),
        })
    }
}

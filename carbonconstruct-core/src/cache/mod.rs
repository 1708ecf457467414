pub mod builder;
pub mod clock;
pub mod shared;

use crate::{aggregator::EmissionCalculator, error::CarbonError, factors::EmissionFactorTable};
use builder::CalculationCacheBuilder;
use carbonconstruct_schemas::calculation::{CalculationInput, CalculationResult};
use chrono::{DateTime, Duration, Utc};
use clock::Clock;
use serde::Serialize;
use std::{collections::VecDeque, sync::Arc};
use tracing::debug;

pub const MAX_CACHE_SIZE: usize = 50;
pub const CACHE_TTL_SECONDS: i64 = 5 * 60;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CacheConfig {
    pub max_entries: usize,
    pub ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: MAX_CACHE_SIZE,
            ttl: Duration::seconds(CACHE_TTL_SECONDS),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub expired: u64,
}

struct CacheEntry {
    input: CalculationInput,
    result: CalculationResult,
    timestamp: DateTime<Utc>,
}

/// Memoizes emission calculations for recently seen inputs.
///
/// Entries are kept oldest first. Lookups compare inputs positionally (see
/// `CalculationInput::matches`), entries older than the TTL are dropped before
/// every lookup, and inserting into a full cache evicts the oldest entry.
pub struct CalculationCache {
    entries: VecDeque<CacheEntry>,
    calculator: Arc<dyn EmissionCalculator>,
    clock: Arc<dyn Clock>,
    config: CacheConfig,
    stats: CacheStats,
}

impl CalculationCache {
    /// A cache with default capacity and TTL over `factors`.
    pub fn new(factors: EmissionFactorTable) -> Result<Self, CarbonError> {
        Self::builder().with_factor_table(factors).build()
    }

    pub fn builder() -> CalculationCacheBuilder {
        CalculationCacheBuilder::new()
    }

    /// Returns the stored result for an input equal to `input`, if one is
    /// still live.
    pub fn get_cached_result(&mut self, input: &CalculationInput) -> Option<CalculationResult> {
        self.evict_expired();

        let found = self
            .entries
            .iter()
            .find(|entry| entry.input.matches(input))
            .map(|entry| entry.result.clone());

        if found.is_some() {
            self.stats.hits += 1;
            debug!(entries = self.entries.len(), "Calculation cache hit");
        } else {
            self.stats.misses += 1;
            debug!(entries = self.entries.len(), "Calculation cache miss");
        }
        found
    }

    /// Serves `input` from the cache, computing and storing it on a miss.
    pub fn calculate_with_cache(&mut self, input: &CalculationInput) -> CalculationResult {
        if let Some(result) = self.get_cached_result(input) {
            return result;
        }

        let result = self.calculator.calculate(input);

        if self.entries.len() >= self.config.max_entries && self.entries.pop_front().is_some() {
            self.stats.evictions += 1;
            debug!(max_entries = self.config.max_entries, "Evicted oldest calculation");
        }

        self.entries.push_back(CacheEntry {
            input: input.clone(),
            result: result.clone(),
            timestamp: self.clock.now(),
        });
        result
    }

    /// Drops every entry regardless of age.
    pub fn clear_cache(&mut self) {
        debug!(entries = self.entries.len(), "Clearing calculation cache");
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    pub fn config(&self) -> CacheConfig {
        self.config
    }

    fn evict_expired(&mut self) {
        let now = self.clock.now();
        let ttl = self.config.ttl;
        let before = self.entries.len();

        self.entries.retain(|entry| now - entry.timestamp <= ttl);

        let expired = before - self.entries.len();
        if expired > 0 {
            self.stats.expired += expired as u64;
            debug!(expired, "Swept expired calculations");
        }
    }
}

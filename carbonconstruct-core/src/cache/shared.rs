use super::{CacheStats, CalculationCache};
use carbonconstruct_schemas::calculation::{CalculationInput, CalculationResult};
use parking_lot::Mutex;
use std::sync::Arc;

/// A cloneable, thread-safe handle to a `CalculationCache`.
///
/// Each operation holds the lock for its whole sweep, lookup, compute and
/// insert sequence, so two threads asking for the same input never both miss.
#[derive(Clone)]
pub struct SharedCalculationCache {
    inner: Arc<Mutex<CalculationCache>>,
}

impl SharedCalculationCache {
    pub fn new(cache: CalculationCache) -> Self {
        Self { inner: Arc::new(Mutex::new(cache)) }
    }

    pub fn calculate_with_cache(&self, input: &CalculationInput) -> CalculationResult {
        self.inner.lock().calculate_with_cache(input)
    }

    pub fn get_cached_result(&self, input: &CalculationInput) -> Option<CalculationResult> {
        self.inner.lock().get_cached_result(input)
    }

    pub fn clear_cache(&self) {
        self.inner.lock().clear_cache();
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        self.inner.lock().stats()
    }
}

impl From<CalculationCache> for SharedCalculationCache {
    fn from(cache: CalculationCache) -> Self {
        Self::new(cache)
    }
}

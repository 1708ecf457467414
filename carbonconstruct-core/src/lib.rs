pub mod aggregator;
pub mod cache;
pub mod error;
pub mod factors;

pub use aggregator::{calculate_emissions, EmissionCalculator};
pub use cache::{
    builder::CalculationCacheBuilder, shared::SharedCalculationCache, CacheConfig, CacheStats,
    CalculationCache, CACHE_TTL_SECONDS, MAX_CACHE_SIZE,
};
pub use error::CarbonError;
pub use factors::EmissionFactorTable;

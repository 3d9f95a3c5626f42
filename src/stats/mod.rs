//! Statistics module - descriptive statistics and row filters

mod calculator;
mod filters;

pub use calculator::{StatsCalculator, StatsError, StatsSummary};
pub use filters::{analyze_stability, find_countries_in_range, StabilityReport};

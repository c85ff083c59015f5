//! Trip planner - LLM-backed itineraries with budget estimation
//!
//! This library implements the planning pipeline behind the trip-planner
//! service: prompt construction, LLM invocation, price lookups with
//! deterministic fallbacks, budget estimation, and PDF export.

pub mod api;
pub mod budget;
pub mod config;
pub mod error;
pub mod llm;
pub mod models;
pub mod pdf;
pub mod planner;
pub mod pricing;
pub mod prompts;
pub mod tools;
pub mod web;

// Re-export core types for public API
pub use budget::BudgetEstimator;
pub use config::TripPlannerConfig;
pub use error::TripPlannerError;
pub use llm::{GenerationParams, LlmClient, OllamaClient};
pub use models::{
    BudgetCategory, BudgetLineItem, CityInfo, FlightQuotes, Quoted, QuoteSource, TripPlan,
    TripRequest,
};
pub use pdf::PdfExporter;
pub use planner::TripPlanner;
pub use pricing::{FlightPriceAdapter, FlightPriceSource, HotelPriceAdapter, HotelPriceSource};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, TripPlannerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}

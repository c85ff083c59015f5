//! Price lookup adapters for the flight and hotel boundaries
//!
//! Each adapter wraps one external price-quote endpoint behind a trait with a
//! single capability. Adapters are infallible by contract: a missing API key
//! short-circuits to the fallback constant without a network call, and any
//! failure of an attempted call (network, HTTP status, parse) is caught at
//! this boundary and mapped to the same fallback, tagged with its provenance.
//! One attempt per lookup; no retries, no caching.

use async_trait::async_trait;

use crate::models::{FlightQuotes, Quoted};

pub mod flight;
pub mod hotel;

pub use flight::FlightPriceAdapter;
pub use hotel::HotelPriceAdapter;

/// Fallback nightly hotel rate in currency units
pub const HOTEL_FALLBACK_NIGHTLY_RATE: f64 = 100.0;

/// Fallback one-way flight price in currency units
pub const FLIGHT_FALLBACK_PRICE: f64 = 300.0;

/// Hotel-price boundary: one nightly rate per city
#[async_trait]
pub trait HotelPriceSource: Send + Sync {
    /// Average nightly rate for the given city, or the fallback rate
    async fn nightly_rate(&self, city: &str) -> Quoted<f64>;
}

/// Flight-price boundary: quotes for one origin/destination/date triple
#[async_trait]
pub trait FlightPriceSource: Send + Sync {
    /// Flight quotes for the route, or a fallback-shaped quote list
    async fn quotes(&self, origin: &str, destination: &str, date: &str) -> Quoted<FlightQuotes>;
}

//! Budget estimator
//!
//! Combines per-day flat rates with price-adapter results into the fixed
//! five-line budget breakdown. The estimator never fails: every external
//! lookup degrades to a fallback constant inside the adapters, so a budget
//! is always computable even with zero configured API keys.

use std::sync::Arc;
use tracing::{debug, instrument};

use crate::models::{BudgetCategory, BudgetLineItem};
use crate::pricing::{FlightPriceSource, HotelPriceSource, FLIGHT_FALLBACK_PRICE};

/// Flat food cost per day in currency units
pub const FOOD_PER_DAY: u32 = 40;

/// Flat activity cost per day in currency units
pub const ACTIVITY_PER_DAY: u32 = 60;

/// Flat local-transport cost per day in currency units
pub const TRANSPORT_PER_DAY: u32 = 15;

/// Budget estimator over the flight and hotel price boundaries
pub struct BudgetEstimator {
    flights: Arc<dyn FlightPriceSource>,
    hotels: Arc<dyn HotelPriceSource>,
}

impl BudgetEstimator {
    /// Create an estimator over the given price sources
    pub fn new(flights: Arc<dyn FlightPriceSource>, hotels: Arc<dyn HotelPriceSource>) -> Self {
        Self { flights, hotels }
    }

    /// Estimate the trip budget.
    ///
    /// Returns exactly five line items in fixed category order (Flights,
    /// Hotels, Food, Activities, Transport), each formatted as `"$<int>"`.
    /// Flat rates cover the whole trip; hotel and flight totals are summed
    /// across all cities. Lookups run sequentially, one city at a time.
    #[instrument(skip(self, cities), fields(num_cities = cities.len()))]
    pub async fn estimate(
        &self,
        num_days: u32,
        cities: &[String],
        origin: &str,
        travel_date: &str,
    ) -> Vec<BudgetLineItem> {
        // Scale in f64: the derived day count is attacker-influenced and can
        // be as large as u32::MAX, which overflows integer multiplication
        let days = f64::from(num_days);
        let total_food = f64::from(FOOD_PER_DAY) * days;
        let total_activity = f64::from(ACTIVITY_PER_DAY) * days;
        let total_transport = f64::from(TRANSPORT_PER_DAY) * days;

        let mut hotel_total = 0.0;
        for city in cities {
            let nightly = self.hotels.nightly_rate(city).await;
            debug!(city, rate = nightly.value, source = ?nightly.source, "Hotel nightly rate");
            hotel_total += nightly.value * f64::from(num_days);
        }

        let mut flight_total = 0.0;
        for city in cities {
            let quoted = self.flights.quotes(origin, city, travel_date).await;
            let price = quoted
                .value
                .quotes
                .first()
                .map_or(FLIGHT_FALLBACK_PRICE, |q| {
                    q.min_price.unwrap_or(FLIGHT_FALLBACK_PRICE)
                });
            debug!(city, price, source = ?quoted.source, "Flight quote");
            flight_total += price;
        }

        vec![
            BudgetLineItem::from_total(BudgetCategory::Flights, flight_total),
            BudgetLineItem::from_total(BudgetCategory::Hotels, hotel_total),
            BudgetLineItem::from_total(BudgetCategory::Food, total_food),
            BudgetLineItem::from_total(BudgetCategory::Activities, total_activity),
            BudgetLineItem::from_total(BudgetCategory::Transport, total_transport),
        ]
    }
}

//! Hotel-price adapter
//!
//! Wraps the booking.com hotel-search endpoint. The live path averages up to
//! five parsable nightly prices from the result list; everything else
//! degrades to the fixed fallback rate.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument, warn};

use super::{HotelPriceSource, HOTEL_FALLBACK_NIGHTLY_RATE};
use crate::config::PricingConfig;
use crate::models::Quoted;

const BOOKING_API_URL: &str = "https://booking-com15.p.rapidapi.com/api/v1/hotels/search";
const BOOKING_API_HOST: &str = "booking-com15.p.rapidapi.com";

/// How many result entries contribute to the average nightly rate
const MAX_RESULTS_AVERAGED: usize = 5;

/// Adapter for the hotel-price boundary
pub struct HotelPriceAdapter {
    client: Client,
    api_key: Option<String>,
}

/// Hotel search response; only the price field is inspected
#[derive(Debug, Deserialize)]
struct HotelSearchResponse {
    #[serde(default)]
    result: Vec<HotelEntry>,
}

#[derive(Debug, Deserialize)]
struct HotelEntry {
    /// Price field arrives as a number or a numeric string depending on
    /// the listing, so it is parsed leniently
    min_total_price: Option<serde_json::Value>,
}

impl HotelPriceAdapter {
    /// Create a new adapter from explicit pricing configuration
    pub fn new(config: &PricingConfig) -> Result<Self, crate::TripPlannerError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.into()))
            .user_agent("TripPlanner/0.1.0")
            .build()
            .map_err(|e| crate::TripPlannerError::api(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key: config.booking_api_key.clone(),
        })
    }

    async fn fetch_nightly_rate(&self, api_key: &str, city: &str) -> Result<f64, String> {
        let response = self
            .client
            .get(BOOKING_API_URL)
            .header("X-RapidAPI-Key", api_key)
            .header("X-RapidAPI-Host", BOOKING_API_HOST)
            .query(&[
                ("checkin_date", "2024-08-10"),
                ("checkout_date", "2024-08-11"),
                ("units", "metric"),
                ("order_by", "price"),
                ("locale", "en-us"),
                ("dest_type", "city"),
                ("name", city),
                ("adults_number", "1"),
            ])
            .send()
            .await
            .map_err(|e| format!("request failed: {e}"))?
            .error_for_status()
            .map_err(|e| format!("HTTP error: {e}"))?;

        let search: HotelSearchResponse = response
            .json()
            .await
            .map_err(|e| format!("parse error: {e}"))?;

        let prices: Vec<f64> = search
            .result
            .iter()
            .take(MAX_RESULTS_AVERAGED)
            .filter_map(|entry| entry.min_total_price.as_ref().and_then(parse_price))
            .collect();

        if prices.is_empty() {
            debug!(city, "No parsable hotel prices in response, using fallback rate");
            return Ok(HOTEL_FALLBACK_NIGHTLY_RATE);
        }

        let average = prices.iter().sum::<f64>() / prices.len() as f64;
        Ok((average * 100.0).round() / 100.0)
    }
}

/// Parse a price field that may be a JSON number or a numeric string.
///
/// A numeric zero means "no listed price" and is skipped so it cannot drag
/// the average down; zero-valued strings still parse.
fn parse_price(value: &serde_json::Value) -> Option<f64> {
    match value {
        serde_json::Value::Number(n) => n.as_f64().filter(|price| *price != 0.0),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[async_trait]
impl HotelPriceSource for HotelPriceAdapter {
    #[instrument(skip(self))]
    async fn nightly_rate(&self, city: &str) -> Quoted<f64> {
        let Some(api_key) = &self.api_key else {
            debug!(city, "No hotel API key configured, using fallback nightly rate");
            return Quoted::fallback_missing_key(HOTEL_FALLBACK_NIGHTLY_RATE);
        };

        match self.fetch_nightly_rate(api_key, city).await {
            Ok(rate) => Quoted::live(rate),
            Err(reason) => {
                warn!(city, %reason, "Hotel price lookup failed, using fallback nightly rate");
                Quoted::fallback_after_error(HOTEL_FALLBACK_NIGHTLY_RATE, reason)
            }
        }
    }
}

//! Flight-price adapter
//!
//! Wraps a flight-quote endpoint. Responses keep the boundary's wire shape
//! (a `Quotes` list with `MinPrice` fields); a missing key or a failed call
//! yields a fallback-shaped response carrying a single fixed-price quote.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, instrument, warn};

use super::{FlightPriceSource, FLIGHT_FALLBACK_PRICE};
use crate::config::PricingConfig;
use crate::models::{FlightQuotes, Quoted};

const FLIGHT_API_URL: &str = "https://skyscanner-api.p.rapidapi.com/v1/flights/quotes";
const FLIGHT_API_HOST: &str = "skyscanner-api.p.rapidapi.com";

/// Adapter for the flight-price boundary
pub struct FlightPriceAdapter {
    client: Client,
    api_key: Option<String>,
}

impl FlightPriceAdapter {
    /// Create a new adapter from explicit pricing configuration
    pub fn new(config: &PricingConfig) -> Result<Self, crate::TripPlannerError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.into()))
            .user_agent("TripPlanner/0.1.0")
            .build()
            .map_err(|e| crate::TripPlannerError::api(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key: config.skyscanner_api_key.clone(),
        })
    }

    async fn fetch_quotes(
        &self,
        api_key: &str,
        origin: &str,
        destination: &str,
        date: &str,
    ) -> Result<FlightQuotes, String> {
        let response = self
            .client
            .get(FLIGHT_API_URL)
            .header("X-RapidAPI-Key", api_key)
            .header("X-RapidAPI-Host", FLIGHT_API_HOST)
            .header("Accept", "application/json")
            .query(&[
                ("origin", origin),
                ("destination", destination),
                ("date", date),
                ("adults", "1"),
            ])
            .send()
            .await
            .map_err(|e| format!("request failed: {e}"))?
            .error_for_status()
            .map_err(|e| format!("HTTP error: {e}"))?;

        response
            .json::<FlightQuotes>()
            .await
            .map_err(|e| format!("parse error: {e}"))
    }
}

#[async_trait]
impl FlightPriceSource for FlightPriceAdapter {
    #[instrument(skip(self))]
    async fn quotes(&self, origin: &str, destination: &str, date: &str) -> Quoted<FlightQuotes> {
        let Some(api_key) = &self.api_key else {
            debug!(origin, destination, "No flight API key configured, using fallback quote");
            return Quoted::fallback_missing_key(FlightQuotes::single(FLIGHT_FALLBACK_PRICE));
        };

        match self.fetch_quotes(api_key, origin, destination, date).await {
            Ok(quotes) => Quoted::live(quotes),
            Err(reason) => {
                warn!(origin, destination, %reason, "Flight price lookup failed, using fallback quote");
                Quoted::fallback_after_error(FlightQuotes::single(FLIGHT_FALLBACK_PRICE), reason)
            }
        }
    }
}

//! Data models for the trip planner
//!
//! Core domain types: the trip request coming from the form boundary, the
//! generated plan going back to the presentation surface, budget line items,
//! and the quote wrapper used by the price-lookup adapters.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One planning request, as submitted by the form boundary.
///
/// Immutable for the duration of one planning run and discarded afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripRequest {
    /// Origin airport/city code (free text, e.g. "DEL")
    pub origin: String,
    /// Destination cities picked from the predefined list
    #[serde(default)]
    pub selected_cities: Vec<String>,
    /// Optional custom city, appended after the selections
    #[serde(default)]
    pub custom_city: Option<String>,
    /// Date range as free text, e.g. "2024-08-10 to 2024-08-17"
    pub date_range: String,
    /// Traveler interests/hobbies, interpolated verbatim into prompts
    #[serde(default)]
    pub interests: String,
}

impl TripRequest {
    /// Selected cities plus the custom city appended at the end.
    ///
    /// No deduplication is performed: a city appearing both in the selection
    /// and as the custom entry is priced and described twice. Only an empty
    /// custom entry is skipped; a whitespace-only one is treated as a city.
    #[must_use]
    pub fn all_cities(&self) -> Vec<String> {
        let mut cities = self.selected_cities.clone();
        if let Some(custom) = &self.custom_city {
            if !custom.is_empty() {
                cities.push(custom.clone());
            }
        }
        cities
    }
}

/// Budget categories in fixed display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BudgetCategory {
    Flights,
    Hotels,
    Food,
    Activities,
    Transport,
}

impl BudgetCategory {
    /// All categories in the order they are rendered
    pub const ALL: [BudgetCategory; 5] = [
        BudgetCategory::Flights,
        BudgetCategory::Hotels,
        BudgetCategory::Food,
        BudgetCategory::Activities,
        BudgetCategory::Transport,
    ];
}

impl fmt::Display for BudgetCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BudgetCategory::Flights => "Flights",
            BudgetCategory::Hotels => "Hotels",
            BudgetCategory::Food => "Food",
            BudgetCategory::Activities => "Activities",
            BudgetCategory::Transport => "Transport",
        };
        write!(f, "{name}")
    }
}

/// One (category, formatted amount) pair in the budget breakdown
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetLineItem {
    /// Budget category
    pub category: BudgetCategory,
    /// Formatted amount, always `"$<int>"`
    pub amount: String,
}

impl BudgetLineItem {
    /// Build a line item from a raw total, truncating to whole currency units
    #[must_use]
    pub fn from_total(category: BudgetCategory, total: f64) -> Self {
        Self {
            category,
            amount: format!("${}", total.trunc() as i64),
        }
    }
}

/// Generated briefing for one requested city
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CityInfo {
    pub city: String,
    pub info: String,
}

/// Complete result of one planning run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripPlan {
    /// Day-by-day itinerary text (one LLM call per run)
    pub itinerary: String,
    /// Exactly five line items in fixed category order
    pub budget: Vec<BudgetLineItem>,
    /// One briefing per requested city, in input order
    pub city_infos: Vec<CityInfo>,
    /// Trip length derived from the date range
    pub trip_days: u32,
}

/// Where a quoted price came from.
///
/// Callers can distinguish "live value" from "fallback applied" instead of
/// relying on caught exceptions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuoteSource {
    /// Returned by the external API
    Live,
    /// API key absent; no network call was attempted
    FallbackMissingKey,
    /// Call attempted and failed; carries the failure reason
    FallbackAfterError(String),
}

impl QuoteSource {
    /// True when the value is a fallback constant rather than a live quote
    #[must_use]
    pub fn is_fallback(&self) -> bool {
        !matches!(self, QuoteSource::Live)
    }
}

/// A price value together with its provenance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quoted<T> {
    pub value: T,
    pub source: QuoteSource,
}

impl<T> Quoted<T> {
    /// Wrap a live API value
    pub fn live(value: T) -> Self {
        Self {
            value,
            source: QuoteSource::Live,
        }
    }

    /// Wrap the fallback used when no API key is configured
    pub fn fallback_missing_key(value: T) -> Self {
        Self {
            value,
            source: QuoteSource::FallbackMissingKey,
        }
    }

    /// Wrap the fallback used after a failed call
    pub fn fallback_after_error<S: Into<String>>(value: T, reason: S) -> Self {
        Self {
            value,
            source: QuoteSource::FallbackAfterError(reason.into()),
        }
    }
}

/// Flight-quote response shape from the flight-price boundary
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FlightQuotes {
    /// Quote list; the first entry's `MinPrice` is used for budgeting
    #[serde(rename = "Quotes", default)]
    pub quotes: Vec<FlightQuote>,
}

/// One quote inside a [`FlightQuotes`] response
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FlightQuote {
    /// One-way minimum price; absent entries budget at the fallback price
    #[serde(rename = "MinPrice")]
    pub min_price: Option<f64>,
}

impl FlightQuotes {
    /// Single-quote response carrying a fixed price
    #[must_use]
    pub fn single(price: f64) -> Self {
        Self {
            quotes: vec![FlightQuote {
                min_price: Some(price),
            }],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_cities_appends_custom_after_selection() {
        let request = TripRequest {
            origin: "DEL".to_string(),
            selected_cities: vec!["Paris".to_string(), "Rome".to_string()],
            custom_city: Some("Reykjavik".to_string()),
            date_range: "2024-08-10 to 2024-08-17".to_string(),
            interests: "art".to_string(),
        };
        assert_eq!(request.all_cities(), vec!["Paris", "Rome", "Reykjavik"]);
    }

    #[test]
    fn test_all_cities_skips_empty_custom() {
        let request = TripRequest {
            origin: "DEL".to_string(),
            selected_cities: vec!["Paris".to_string()],
            custom_city: Some(String::new()),
            date_range: String::new(),
            interests: String::new(),
        };
        assert_eq!(request.all_cities(), vec!["Paris"]);
    }

    #[test]
    fn test_all_cities_keeps_whitespace_only_custom() {
        // Only the empty string is filtered; whitespace passes through
        let request = TripRequest {
            origin: "DEL".to_string(),
            selected_cities: vec!["Paris".to_string()],
            custom_city: Some("   ".to_string()),
            date_range: String::new(),
            interests: String::new(),
        };
        assert_eq!(request.all_cities(), vec!["Paris", "   "]);
    }

    #[test]
    fn test_all_cities_keeps_duplicates() {
        // No deduplication: a duplicate is priced and described twice
        let request = TripRequest {
            origin: "DEL".to_string(),
            selected_cities: vec!["Paris".to_string()],
            custom_city: Some("Paris".to_string()),
            date_range: String::new(),
            interests: String::new(),
        };
        assert_eq!(request.all_cities(), vec!["Paris", "Paris"]);
    }

    #[test]
    fn test_budget_line_item_truncates() {
        let item = BudgetLineItem::from_total(BudgetCategory::Hotels, 699.99);
        assert_eq!(item.amount, "$699");
    }

    #[test]
    fn test_category_display_order() {
        let names: Vec<String> = BudgetCategory::ALL.iter().map(ToString::to_string).collect();
        assert_eq!(names, ["Flights", "Hotels", "Food", "Activities", "Transport"]);
    }

    #[test]
    fn test_flight_quotes_wire_shape() {
        let json = r#"{"Quotes":[{"MinPrice":245.0}]}"#;
        let quotes: FlightQuotes = serde_json::from_str(json).unwrap();
        assert_eq!(quotes.quotes[0].min_price, Some(245.0));

        let empty: FlightQuotes = serde_json::from_str("{}").unwrap();
        assert!(empty.quotes.is_empty());
    }

    #[test]
    fn test_quote_source_fallback_flag() {
        assert!(!QuoteSource::Live.is_fallback());
        assert!(QuoteSource::FallbackMissingKey.is_fallback());
        assert!(QuoteSource::FallbackAfterError("timeout".to_string()).is_fallback());
    }
}

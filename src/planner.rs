//! Orchestration flow for one planning run
//!
//! Sequential, single-attempt pipeline: derive the trip length and travel
//! date from the date-range string, estimate the budget, generate one
//! briefing per city and one itinerary, and hand the assembled plan back to
//! the presentation surface. Price lookups degrade to fallbacks; an LLM
//! failure is the one error that aborts the run.

use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::budget::BudgetEstimator;
use crate::config::TripPlannerConfig;
use crate::llm::{GenerationParams, LlmClient, OllamaClient};
use crate::models::{CityInfo, TripPlan, TripRequest};
use crate::pricing::{FlightPriceAdapter, HotelPriceAdapter};
use crate::{prompts, Result};

/// Derive the trip length in days from a free-text date range.
///
/// The range must split on `"to"` into exactly two sides; the day-of-month is
/// taken as the last `-`-separated numeric segment of each side and the
/// length is `|end - start| + 1`. Any other shape silently yields
/// `default_days`. This mirrors the form boundary's loose contract: ranges
/// spanning a month boundary (e.g. "2024-08-30 to 2024-09-02") produce a
/// wrong-but-defined answer, and malformed input never raises.
#[must_use]
pub fn trip_length_days(date_range: &str, default_days: u32) -> u32 {
    let sides: Vec<&str> = date_range.split("to").collect();
    if sides.len() != 2 {
        return default_days;
    }

    match (last_numeric_segment(sides[0]), last_numeric_segment(sides[1])) {
        (Some(start), Some(end)) => {
            let length = (i128::from(end) - i128::from(start)).abs() + 1;
            u32::try_from(length).unwrap_or(default_days)
        }
        _ => default_days,
    }
}

/// Last `-`-separated segment of the trimmed input, parsed as an integer
fn last_numeric_segment(side: &str) -> Option<i64> {
    side.trim().rsplit('-').next()?.trim().parse().ok()
}

/// Derive the outbound travel date: the text before `" to "` when the range
/// contains `"to"`, otherwise the configured default date.
#[must_use]
pub fn travel_date(date_range: &str, default_date: &str) -> String {
    if date_range.contains("to") {
        date_range
            .split(" to ")
            .next()
            .unwrap_or(date_range)
            .to_string()
    } else {
        default_date.to_string()
    }
}

/// Trip planner over the LLM and price-lookup boundaries
pub struct TripPlanner {
    config: TripPlannerConfig,
    llm: Arc<dyn LlmClient>,
    budget: BudgetEstimator,
}

impl TripPlanner {
    /// Create a planner with the default Ollama client and price adapters
    pub fn new(config: TripPlannerConfig) -> Result<Self> {
        let llm = Arc::new(OllamaClient::new(&config.llm)?);
        let budget = BudgetEstimator::new(
            Arc::new(FlightPriceAdapter::new(&config.pricing)?),
            Arc::new(HotelPriceAdapter::new(&config.pricing)?),
        );
        Ok(Self::with_components(config, llm, budget))
    }

    /// Create a planner from explicit components (used by tests to inject
    /// mock clients and stub price sources)
    pub fn with_components(
        config: TripPlannerConfig,
        llm: Arc<dyn LlmClient>,
        budget: BudgetEstimator,
    ) -> Self {
        Self { config, llm, budget }
    }

    /// Destination cities offered by the form boundary
    #[must_use]
    pub fn predefined_cities(&self) -> &[String] {
        &self.config.defaults.predefined_cities
    }

    /// Run one planning pass over the request.
    ///
    /// Per-city briefings cover the selected cities plus the custom city;
    /// the itinerary is built from the selected cities only. That asymmetry
    /// is deliberate and preserved.
    #[instrument(skip(self, request), fields(origin = %request.origin))]
    pub async fn plan(&self, request: &TripRequest) -> Result<TripPlan> {
        let all_cities = request.all_cities();
        if all_cities.is_empty() {
            warn!("Planning run with no destination cities");
        }

        let trip_days = trip_length_days(&request.date_range, self.config.defaults.trip_days);
        let departure = travel_date(&request.date_range, &self.config.defaults.travel_date);
        info!(trip_days, %departure, num_cities = all_cities.len(), "Starting planning run");

        let budget = self
            .budget
            .estimate(trip_days, &all_cities, &request.origin, &departure)
            .await;

        let city_params = GenerationParams {
            model: self.config.llm.model.clone(),
            temperature: self.config.llm.temperature,
            max_tokens: self.config.llm.city_info_max_tokens,
        };

        let mut city_infos = Vec::with_capacity(all_cities.len());
        for city in &all_cities {
            let prompt = prompts::city_info_prompt(city, &request.interests, &request.date_range);
            let info = self.llm.generate(&prompt, &city_params).await?;
            city_infos.push(CityInfo {
                city: city.clone(),
                info,
            });
        }

        let itinerary_params = GenerationParams {
            model: self.config.llm.model.clone(),
            temperature: self.config.llm.temperature,
            max_tokens: self.config.llm.itinerary_max_tokens,
        };
        let prompt = prompts::itinerary_prompt(
            &request.origin,
            &request.selected_cities,
            &request.interests,
            &request.date_range,
        );
        let itinerary = self.llm.generate(&prompt, &itinerary_params).await?;

        info!(
            itinerary_chars = itinerary.len(),
            briefings = city_infos.len(),
            "Planning run complete"
        );

        Ok(TripPlan {
            itinerary,
            budget,
            city_infos,
            trip_days,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::mock::MockLlmClient;
    use crate::llm::LlmError;
    use crate::models::{FlightQuotes, Quoted};
    use crate::pricing::{FlightPriceSource, HotelPriceSource};
    use async_trait::async_trait;
    use rstest::rstest;
    use std::sync::Mutex;

    #[rstest]
    #[case("2024-08-10 to 2024-08-17", 8)]
    #[case("2024-08-17 to 2024-08-10", 8)]
    #[case("2024-08-10 to 2024-08-10", 1)]
    #[case("2024-08-10", 7)]
    #[case("", 7)]
    #[case("2024-08-10 to 2024-08-xy", 7)]
    #[case("next week to the week after to forever", 7)]
    fn test_trip_length_days(#[case] range: &str, #[case] expected: u32) {
        assert_eq!(trip_length_days(range, 7), expected);
    }

    #[rstest]
    #[case("2024-08-10 to 2024-08-17", "2024-08-10")]
    #[case("no separator here", "2024-08-10")]
    // Contains "to" but not " to ": the whole string passes through
    #[case("october", "october")]
    fn test_travel_date(#[case] range: &str, #[case] expected: &str) {
        assert_eq!(travel_date(range, "2024-08-10"), expected);
    }

    /// Records every prompt it sees and answers with a fixed string
    struct RecordingLlm {
        prompts: Mutex<Vec<String>>,
    }

    impl RecordingLlm {
        fn new() -> Self {
            Self {
                prompts: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl LlmClient for RecordingLlm {
        async fn generate(
            &self,
            prompt: &str,
            _params: &GenerationParams,
        ) -> std::result::Result<String, LlmError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            Ok("generated text".to_string())
        }
    }

    struct StubFlights;

    #[async_trait]
    impl FlightPriceSource for StubFlights {
        async fn quotes(&self, _o: &str, _d: &str, _t: &str) -> Quoted<FlightQuotes> {
            Quoted::fallback_missing_key(FlightQuotes::single(300.0))
        }
    }

    struct StubHotels;

    #[async_trait]
    impl HotelPriceSource for StubHotels {
        async fn nightly_rate(&self, _city: &str) -> Quoted<f64> {
            Quoted::fallback_missing_key(100.0)
        }
    }

    fn planner_with(llm: Arc<dyn LlmClient>) -> TripPlanner {
        let budget = BudgetEstimator::new(Arc::new(StubFlights), Arc::new(StubHotels));
        TripPlanner::with_components(TripPlannerConfig::default(), llm, budget)
    }

    fn request() -> TripRequest {
        TripRequest {
            origin: "DEL".to_string(),
            selected_cities: vec!["Paris".to_string()],
            custom_city: Some("Reykjavik".to_string()),
            date_range: "2024-08-10 to 2024-08-17".to_string(),
            interests: "art".to_string(),
        }
    }

    #[tokio::test]
    async fn test_plan_produces_briefings_and_itinerary() {
        let llm = Arc::new(MockLlmClient::new(vec![
            "Paris briefing".to_string(),
            "Reykjavik briefing".to_string(),
            "Day 1: ...".to_string(),
        ]));
        let planner = planner_with(llm);

        let plan = planner.plan(&request()).await.unwrap();

        assert_eq!(plan.trip_days, 8);
        assert_eq!(plan.city_infos.len(), 2);
        assert_eq!(plan.city_infos[0].city, "Paris");
        assert_eq!(plan.city_infos[1].city, "Reykjavik");
        assert_eq!(plan.itinerary, "Day 1: ...");
        assert_eq!(plan.budget.len(), 5);
    }

    #[tokio::test]
    async fn test_itinerary_prompt_uses_selected_cities_only() {
        let llm = Arc::new(RecordingLlm::new());
        let planner = planner_with(llm.clone());

        planner.plan(&request()).await.unwrap();

        let prompts = llm.prompts.lock().unwrap();
        // Two briefings (Paris, Reykjavik) then the itinerary
        assert_eq!(prompts.len(), 3);
        assert!(prompts[0].contains("For Paris"));
        assert!(prompts[1].contains("For Reykjavik"));
        // The custom city never reaches the itinerary prompt
        assert!(prompts[2].contains("Destination City: Paris"));
        assert!(!prompts[2].contains("Reykjavik"));
    }

    #[tokio::test]
    async fn test_llm_failure_aborts_the_run() {
        // Exhausted mock fails the first city briefing
        let llm = Arc::new(MockLlmClient::new(vec![]));
        let planner = planner_with(llm);

        let result = planner.plan(&request()).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_plan_with_no_cities_still_budgets() {
        let llm = Arc::new(MockLlmClient::new(vec!["itinerary".to_string()]));
        let planner = planner_with(llm);

        let req = TripRequest {
            origin: "DEL".to_string(),
            selected_cities: vec![],
            custom_city: None,
            date_range: String::new(),
            interests: String::new(),
        };
        let plan = planner.plan(&req).await.unwrap();

        assert!(plan.city_infos.is_empty());
        assert_eq!(plan.trip_days, 7);
        assert_eq!(plan.budget[0].amount, "$0");
        assert_eq!(plan.budget[2].amount, "$280");
    }
}

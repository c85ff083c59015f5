//! Web-search tool backed by serper.dev
//!
//! Same boundary discipline as the price adapters: no key means no network
//! call, and a failed call degrades to an explanatory string instead of an
//! error. Results are flattened to title/link/snippet blocks.

use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::{debug, instrument, warn};

use crate::config::PricingConfig;

const SERPER_URL: &str = "https://google.serper.dev/search";

/// How many organic results are included in the output
const MAX_RESULTS: usize = 4;

/// Web-search tool over the serper.dev API
pub struct SearchTool {
    client: Client,
    api_key: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    organic: Vec<OrganicResult>,
}

#[derive(Debug, Deserialize)]
struct OrganicResult {
    title: Option<String>,
    link: Option<String>,
    snippet: Option<String>,
}

impl SearchTool {
    /// Create a search tool from explicit pricing configuration
    pub fn new(config: &PricingConfig) -> Result<Self, crate::TripPlannerError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.into()))
            .user_agent("TripPlanner/0.1.0")
            .build()
            .map_err(|e| crate::TripPlannerError::api(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key: config.serper_api_key.clone(),
        })
    }

    /// Run a web search and return concatenated title/link/snippet blocks.
    ///
    /// Never fails: configuration absence and call failures both map to an
    /// explanatory string.
    #[instrument(skip(self))]
    pub async fn search(&self, query: &str) -> String {
        let Some(api_key) = &self.api_key else {
            debug!("No search API key configured");
            return "Search not available: SERPER_API_KEY not set.".to_string();
        };

        match self.fetch_results(api_key, query).await {
            Ok(results) if results.is_empty() => "No search results found.".to_string(),
            Ok(results) => results.join("\n\n"),
            Err(reason) => {
                warn!(%reason, "Web search failed");
                format!("Search error: {reason}")
            }
        }
    }

    async fn fetch_results(&self, api_key: &str, query: &str) -> Result<Vec<String>, String> {
        let response = self
            .client
            .post(SERPER_URL)
            .header("X-API-KEY", api_key)
            .json(&json!({ "q": query }))
            .send()
            .await
            .map_err(|e| format!("network issue ({e})"))?
            .error_for_status()
            .map_err(|e| format!("HTTP error ({e})"))?;

        let search: SearchResponse = response
            .json()
            .await
            .map_err(|e| format!("parse error ({e})"))?;

        Ok(search
            .organic
            .into_iter()
            .take(MAX_RESULTS)
            .map(|result| {
                format!(
                    "Title: {}\nLink: {}\nSnippet: {}",
                    result.title.as_deref().unwrap_or("No title"),
                    result.link.as_deref().unwrap_or("No link"),
                    result.snippet.as_deref().unwrap_or_default(),
                )
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_key_returns_explanatory_string() {
        let tool = SearchTool::new(&PricingConfig::default()).unwrap();
        let result = tool.search("best time to visit Paris").await;
        assert_eq!(result, "Search not available: SERPER_API_KEY not set.");
    }

    #[test]
    fn test_response_parsing_flattens_results() {
        let body = serde_json::json!({
            "organic": [
                {"title": "Paris travel", "link": "https://example.com", "snippet": "A guide"},
                {"link": "https://example.org"}
            ]
        });
        let search: SearchResponse = serde_json::from_value(body).unwrap();
        assert_eq!(search.organic.len(), 2);
        assert_eq!(search.organic[0].title.as_deref(), Some("Paris travel"));
        assert!(search.organic[1].title.is_none());
    }
}

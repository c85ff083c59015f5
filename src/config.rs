//! Configuration management for the trip planner
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.
//!
//! API keys for the price-lookup and search boundaries are each independently
//! optional: a missing key is a normal configured state that selects the
//! fallback path of the corresponding adapter, not an error.

use crate::TripPlannerError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

/// Root configuration structure for the trip planner application
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TripPlannerConfig {
    /// LLM runtime configuration
    #[serde(default)]
    pub llm: LlmConfig,
    /// Price-lookup and search API configuration
    #[serde(default)]
    pub pricing: PricingConfig,
    /// PDF export configuration
    #[serde(default)]
    pub pdf: PdfConfig,
    /// Web server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Default application settings
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

/// LLM runtime settings (Ollama-compatible HTTP endpoint)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Model identifier passed to the runtime
    #[serde(default = "default_llm_model")]
    pub model: String,
    /// Base URL of the model-serving runtime
    #[serde(default = "default_llm_base_url")]
    pub base_url: String,
    /// Sampling temperature
    #[serde(default = "default_llm_temperature")]
    pub temperature: f32,
    /// Max decode tokens for per-city briefings
    #[serde(default = "default_city_info_max_tokens")]
    pub city_info_max_tokens: u32,
    /// Max decode tokens for the itinerary
    #[serde(default = "default_itinerary_max_tokens")]
    pub itinerary_max_tokens: u32,
    /// Request timeout in seconds (decode latency dominates)
    #[serde(default = "default_llm_timeout")]
    pub timeout_seconds: u32,
}

/// Price-lookup API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingConfig {
    /// Flight-quote API key; absent = fallback quotes
    pub skyscanner_api_key: Option<String>,
    /// Hotel-price API key; absent = fallback nightly rate
    pub booking_api_key: Option<String>,
    /// Web-search API key; absent = search disabled
    pub serper_api_key: Option<String>,
    /// Per-call timeout in seconds
    #[serde(default = "default_pricing_timeout")]
    pub timeout_seconds: u32,
}

/// PDF export settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PdfConfig {
    /// Path to a Unicode-capable TTF font; required for export
    #[serde(default = "default_font_path")]
    pub font_path: String,
}

/// Web server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Port to bind the HTTP server on
    #[serde(default = "default_server_port")]
    pub port: u16,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

/// Default application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Trip length used when the date range cannot be parsed
    #[serde(default = "default_trip_days")]
    pub trip_days: u32,
    /// Travel date used when the date range has no "to" separator
    #[serde(default = "default_travel_date")]
    pub travel_date: String,
    /// Destination cities offered by the form
    #[serde(default = "default_predefined_cities")]
    pub predefined_cities: Vec<String>,
}

// Default value functions
fn default_llm_model() -> String {
    "gemma:2b".to_string()
}

fn default_llm_base_url() -> String {
    "http://localhost:11434".to_string()
}

fn default_llm_temperature() -> f32 {
    0.7
}

fn default_city_info_max_tokens() -> u32 {
    512
}

fn default_itinerary_max_tokens() -> u32 {
    1024
}

fn default_llm_timeout() -> u32 {
    120
}

fn default_pricing_timeout() -> u32 {
    10
}

fn default_font_path() -> String {
    "fonts/DejaVuSans.ttf".to_string()
}

fn default_server_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_trip_days() -> u32 {
    7
}

fn default_travel_date() -> String {
    "2024-08-10".to_string()
}

fn default_predefined_cities() -> Vec<String> {
    [
        "Paris",
        "Tokyo",
        "New York",
        "London",
        "Bangkok",
        "Sydney",
        "Rome",
        "Istanbul",
    ]
    .iter()
    .map(ToString::to_string)
    .collect()
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: default_llm_model(),
            base_url: default_llm_base_url(),
            temperature: default_llm_temperature(),
            city_info_max_tokens: default_city_info_max_tokens(),
            itinerary_max_tokens: default_itinerary_max_tokens(),
            timeout_seconds: default_llm_timeout(),
        }
    }
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            skyscanner_api_key: None,
            booking_api_key: None,
            serper_api_key: None,
            timeout_seconds: default_pricing_timeout(),
        }
    }
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            font_path: default_font_path(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_server_port(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            trip_days: default_trip_days(),
            travel_date: default_travel_date(),
            predefined_cities: default_predefined_cities(),
        }
    }
}

impl TripPlannerConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        // Load from file if path is provided or use default location
        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // Add environment variable overrides with TRIPPLANNER_ prefix
        builder = builder.add_source(
            Environment::with_prefix("TRIPPLANNER")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: TripPlannerConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        // Bare environment keys override the file, matching the documented
        // configuration surface of the external boundaries
        config.apply_env_keys();

        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("tripplanner").join("config.toml"))
    }

    /// Apply `SKYSCANNER_API_KEY` / `BOOKING_API_KEY` / `SERPER_API_KEY`
    /// from the process environment when present
    pub fn apply_env_keys(&mut self) {
        if let Ok(key) = env::var("SKYSCANNER_API_KEY") {
            if !key.is_empty() {
                self.pricing.skyscanner_api_key = Some(key);
            }
        }
        if let Ok(key) = env::var("BOOKING_API_KEY") {
            if !key.is_empty() {
                self.pricing.booking_api_key = Some(key);
            }
        }
        if let Ok(key) = env::var("SERPER_API_KEY") {
            if !key.is_empty() {
                self.pricing.serper_api_key = Some(key);
            }
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    /// Validate numeric configuration ranges
    fn validate_numeric_ranges(&self) -> Result<()> {
        if !(0.0..=2.0).contains(&self.llm.temperature) {
            return Err(
                TripPlannerError::config("LLM temperature must be between 0.0 and 2.0").into(),
            );
        }

        if self.llm.timeout_seconds == 0 || self.llm.timeout_seconds > 600 {
            return Err(TripPlannerError::config(
                "LLM timeout must be between 1 and 600 seconds",
            )
            .into());
        }

        if self.pricing.timeout_seconds == 0 || self.pricing.timeout_seconds > 120 {
            return Err(TripPlannerError::config(
                "Price lookup timeout must be between 1 and 120 seconds",
            )
            .into());
        }

        if self.defaults.trip_days == 0 {
            return Err(TripPlannerError::config("Default trip length must be at least 1 day").into());
        }

        Ok(())
    }

    /// Validate string configuration values
    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(TripPlannerError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(TripPlannerError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        if !self.llm.base_url.starts_with("http://") && !self.llm.base_url.starts_with("https://") {
            return Err(TripPlannerError::config(
                "LLM base URL must be a valid HTTP or HTTPS URL",
            )
            .into());
        }

        if self.llm.model.is_empty() {
            return Err(TripPlannerError::config("LLM model identifier cannot be empty").into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TripPlannerConfig::default();
        assert_eq!(config.llm.model, "gemma:2b");
        assert_eq!(config.llm.base_url, "http://localhost:11434");
        assert_eq!(config.llm.city_info_max_tokens, 512);
        assert_eq!(config.llm.itinerary_max_tokens, 1024);
        assert_eq!(config.pricing.timeout_seconds, 10);
        assert_eq!(config.pdf.font_path, "fonts/DejaVuSans.ttf");
        assert_eq!(config.defaults.trip_days, 7);
        assert_eq!(config.defaults.travel_date, "2024-08-10");
        assert_eq!(config.defaults.predefined_cities.len(), 8);
        assert!(config.pricing.skyscanner_api_key.is_none());
        assert!(config.pricing.booking_api_key.is_none());
    }

    #[test]
    fn test_default_config_validates() {
        let config = TripPlannerConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_invalid_log_level() {
        let mut config = TripPlannerConfig::default();
        config.logging.level = "invalid".to_string();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Invalid log level"));
    }

    #[test]
    fn test_config_validation_temperature_range() {
        let mut config = TripPlannerConfig::default();
        config.llm.temperature = 3.5;
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("temperature"));
    }

    #[test]
    fn test_config_validation_base_url_scheme() {
        let mut config = TripPlannerConfig::default();
        config.llm.base_url = "localhost:11434".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_pricing_timeout() {
        let mut config = TripPlannerConfig::default();
        config.pricing.timeout_seconds = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_path_generation() {
        let path = TripPlannerConfig::get_config_path();
        assert!(path.is_some());
        let path = path.unwrap();
        assert!(path.to_string_lossy().contains("tripplanner"));
        assert!(path.to_string_lossy().contains("config.toml"));
    }
}

//! Error types and handling for the trip planner

use thiserror::Error;

/// Main error type for the trip planner application
#[derive(Error, Debug)]
pub enum TripPlannerError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// External API communication errors
    #[error("API error: {message}")]
    Api { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// Language-model invocation errors (the one external call without a fallback)
    #[error("LLM error: {source}")]
    Llm {
        #[from]
        source: crate::llm::LlmError,
    },

    /// PDF export errors, including the missing-font case
    #[error("PDF error: {message}")]
    Pdf { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// General application errors
    #[error("Application error: {message}")]
    General { message: String },
}

impl TripPlannerError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new API error
    pub fn api<S: Into<String>>(message: S) -> Self {
        Self::Api {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new PDF export error
    pub fn pdf<S: Into<String>>(message: S) -> Self {
        Self::Pdf {
            message: message.into(),
        }
    }

    /// Create a new general error
    pub fn general<S: Into<String>>(message: S) -> Self {
        Self::General {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            TripPlannerError::Config { .. } => {
                "Configuration error. Please check your config file and API keys.".to_string()
            }
            TripPlannerError::Api { .. } => {
                "Unable to connect to external services. Please check your internet connection."
                    .to_string()
            }
            TripPlannerError::Validation { message } => {
                format!("Invalid input: {message}")
            }
            TripPlannerError::Llm { source } => {
                format!("Trip generation failed: {source}")
            }
            TripPlannerError::Pdf { message } => message.clone(),
            TripPlannerError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
            TripPlannerError::General { message } => message.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let config_err = TripPlannerError::config("missing API key");
        assert!(matches!(config_err, TripPlannerError::Config { .. }));

        let api_err = TripPlannerError::api("connection failed");
        assert!(matches!(api_err, TripPlannerError::Api { .. }));

        let validation_err = TripPlannerError::validation("empty origin");
        assert!(matches!(validation_err, TripPlannerError::Validation { .. }));
    }

    #[test]
    fn test_user_messages() {
        let config_err = TripPlannerError::config("test");
        assert!(config_err.user_message().contains("Configuration error"));

        let api_err = TripPlannerError::api("test");
        assert!(api_err.user_message().contains("Unable to connect"));

        let pdf_err = TripPlannerError::pdf("Missing font file: fonts/DejaVuSans.ttf");
        assert!(pdf_err.user_message().contains("Missing font file"));

        let validation_err = TripPlannerError::validation("test input");
        assert!(validation_err.user_message().contains("test input"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let trip_err: TripPlannerError = io_err.into();
        assert!(matches!(trip_err, TripPlannerError::Io { .. }));
    }
}

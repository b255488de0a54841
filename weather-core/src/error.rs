//! Typed errors raised by the aggregator and the data sources.

use thiserror::Error;

/// Failure of a single aggregation call. No partial output is produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AggregateError {
    #[error("Malformed timestamp '{label}': {reason}")]
    MalformedInput { label: String, reason: String },
}

/// Errors reported by a weather provider.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("Location not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Network failure: {0}")]
    NetworkFailure(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl FetchError {
    /// Message suitable for showing to an end user.
    pub fn user_message(&self) -> String {
        match self {
            Self::NotFound(query) => {
                format!("Could not find weather for '{query}'. Check the spelling and try again.")
            }
            Self::Unauthorized(_) => {
                "The provider rejected the API key.\n\
                 Hint: run `weather configure openweather` and enter a valid key."
                    .to_string()
            }
            Self::NetworkFailure(msg) => format!("Could not reach the weather service: {msg}"),
            Self::InvalidResponse(_) => {
                "The weather service returned data that could not be read.".to_string()
            }
        }
    }
}

/// Anything that can go wrong while building a [`crate::WeatherReport`].
#[derive(Debug, Error)]
pub enum ReportError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Aggregate(#[from] AggregateError),
}

impl ReportError {
    pub fn user_message(&self) -> String {
        match self {
            Self::Fetch(err) => err.user_message(),
            Self::Aggregate(err) => format!("Forecast data could not be processed: {err}"),
        }
    }
}

//! Core library for the `weather` CLI.
//!
//! This crate defines:
//! - The daily forecast aggregator (3-hourly samples to per-day summaries)
//! - Abstraction over weather providers (live OpenWeather, offline mock)
//! - Configuration & credentials handling
//! - Shared domain models and typed errors
//!
//! It is used by `weather-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod error;
pub mod forecast;
pub mod model;
pub mod provider;
pub mod report;

pub use config::{Config, ProviderConfig};
pub use error::{AggregateError, FetchError, ReportError};
pub use forecast::{MAX_FORECAST_DAYS, aggregate};
pub use model::{
    CurrentConditions, DailySummary, Forecast, IconCode, IntervalSample, LocationQuery,
    WeatherReport,
};
pub use provider::{ProviderId, WeatherProvider};
pub use report::{load_report, today_utc};

use chrono::{NaiveDate, Utc};

use crate::{
    error::ReportError,
    forecast::aggregate,
    model::{LocationQuery, WeatherReport},
    provider::WeatherProvider,
};

/// Today's calendar date in UTC, the reference used to drop the current day.
pub fn today_utc() -> NaiveDate {
    Utc::now().date_naive()
}

/// Fetch current conditions and the forecast for `query`, then aggregate the
/// forecast into daily summaries relative to `today`.
///
/// Provider errors are returned unchanged.
pub async fn load_report(
    provider: &dyn WeatherProvider,
    query: &LocationQuery,
    today: NaiveDate,
) -> Result<WeatherReport, ReportError> {
    let current = provider.current(query).await?;
    let forecast = provider.forecast(query).await?;

    let daily = aggregate(&forecast.samples, today)?;

    tracing::info!(
        provider = %provider.id(),
        location = %current.location_name,
        days = daily.len(),
        "weather report ready"
    );

    Ok(WeatherReport { provider: provider.id().to_string(), current, daily })
}

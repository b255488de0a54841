use anyhow::Context;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, de::DeserializeOwned};
use std::time::Duration;

use crate::{
    error::FetchError,
    model::{CurrentConditions, Forecast, IconCode, IntervalSample, LocationQuery},
};

use super::{ProviderId, WeatherProvider};

const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org";
const REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String) -> anyhow::Result<Self> {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Point the provider at another host, e.g. a local mock server.
    pub fn with_base_url(api_key: String, base_url: impl Into<String>) -> anyhow::Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .context("Failed to build HTTP client for OpenWeather")?;

        Ok(Self {
            api_key,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &LocationQuery,
    ) -> Result<T, FetchError> {
        let url = format!("{}/data/2.5/{endpoint}", self.base_url);
        tracing::debug!(%url, location = %query, "requesting OpenWeather data");

        let res = self
            .http
            .get(&url)
            .query(&[
                ("q", query.as_str()),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
            ])
            .send()
            .await
            .map_err(|e| {
                FetchError::NetworkFailure(format!("OpenWeather {endpoint} request failed: {e}"))
            })?;

        let status = res.status();
        let body = res.text().await.map_err(|e| {
            FetchError::NetworkFailure(format!("Failed to read OpenWeather {endpoint} body: {e}"))
        })?;

        match status {
            StatusCode::NOT_FOUND => return Err(FetchError::NotFound(query.to_string())),
            StatusCode::UNAUTHORIZED => {
                return Err(FetchError::Unauthorized(format!(
                    "OpenWeather rejected the API key: {}",
                    truncate_body(&body)
                )));
            }
            s if !s.is_success() => {
                return Err(FetchError::NetworkFailure(format!(
                    "OpenWeather {endpoint} request failed with status {s}: {}",
                    truncate_body(&body),
                )));
            }
            _ => {}
        }

        serde_json::from_str(&body).map_err(|e| {
            FetchError::InvalidResponse(format!("Failed to parse OpenWeather {endpoint} JSON: {e}"))
        })
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    #[serde(default)]
    feels_like: f64,
    temp_min: f64,
    temp_max: f64,
    #[serde(default)]
    pressure: u32,
    #[serde(default)]
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    main: String,
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwSys {
    #[serde(default)]
    country: String,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    dt: i64,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
    sys: OwSys,
}

#[derive(Debug, Deserialize)]
struct OwCity {
    name: String,
    #[serde(default)]
    country: String,
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt_txt: String,
    main: OwMain,
    weather: Vec<OwWeather>,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    city: OwCity,
    list: Vec<OwForecastEntry>,
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    fn id(&self) -> ProviderId {
        ProviderId::OpenWeather
    }

    async fn current(&self, query: &LocationQuery) -> Result<CurrentConditions, FetchError> {
        let parsed: OwCurrentResponse = self.get_json("weather", query).await?;

        let observation_time = DateTime::from_timestamp(parsed.dt, 0).unwrap_or_else(Utc::now);

        let (condition, description, icon) = match parsed.weather.first() {
            Some(w) => (w.main.clone(), w.description.clone(), parse_icon(&w.icon)),
            None => ("Unknown".to_string(), "Unknown".to_string(), IconCode::default()),
        };

        Ok(CurrentConditions {
            location_name: parsed.name,
            country: parsed.sys.country,
            condition,
            description,
            icon,
            temperature_c: parsed.main.temp,
            feels_like_c: parsed.main.feels_like,
            humidity_pct: parsed.main.humidity,
            pressure_hpa: parsed.main.pressure,
            wind_speed_mps: parsed.wind.speed,
            observation_time,
        })
    }

    async fn forecast(&self, query: &LocationQuery) -> Result<Forecast, FetchError> {
        let parsed: OwForecastResponse = self.get_json("forecast", query).await?;

        let samples = parsed
            .list
            .into_iter()
            .map(|entry| {
                let icon = entry.weather.first().map(|w| parse_icon(&w.icon)).unwrap_or_default();
                IntervalSample::new(entry.dt_txt, entry.main.temp_max, entry.main.temp_min, icon)
            })
            .collect();

        Ok(Forecast { city: parsed.city.name, country: parsed.city.country, samples })
    }
}

fn parse_icon(code: &str) -> IconCode {
    IconCode::try_from(code).unwrap_or_else(|e| {
        tracing::warn!("{e}, falling back to {}", IconCode::default());
        IconCode::default()
    })
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

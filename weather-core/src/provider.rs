use crate::{
    Config,
    config::OPENWEATHER_API_KEY_ENV,
    error::FetchError,
    model::{CurrentConditions, Forecast, LocationQuery},
    provider::{mock::MockProvider, openweather::OpenWeatherProvider},
};
use async_trait::async_trait;
use std::{convert::TryFrom, fmt::Debug};

pub mod mock;
pub mod openweather;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderId {
    OpenWeather,
    Mock,
}

impl ProviderId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderId::OpenWeather => "openweather",
            ProviderId::Mock => "mock",
        }
    }

    pub const fn all() -> &'static [ProviderId] {
        &[ProviderId::OpenWeather, ProviderId::Mock]
    }

    pub fn requires_api_key(&self) -> bool {
        matches!(self, ProviderId::OpenWeather)
    }
}

impl std::fmt::Display for ProviderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ProviderId {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        match lower.as_str() {
            "openweather" => Ok(ProviderId::OpenWeather),
            "mock" => Ok(ProviderId::Mock),
            _ => Err(anyhow::anyhow!(
                "Unknown provider '{value}'. Supported providers: openweather, mock."
            )),
        }
    }
}

/// A source of current conditions and 3-hourly forecasts.
///
/// Errors are returned as-is; implementations never retry.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    fn id(&self) -> ProviderId;

    async fn current(&self, query: &LocationQuery) -> Result<CurrentConditions, FetchError>;

    async fn forecast(&self, query: &LocationQuery) -> Result<Forecast, FetchError>;
}

/// Construct a provider from config and explicit ProviderId.
///
/// For OpenWeather a non-blank `OPENWEATHER_API_KEY` is used instead of the
/// stored key.
pub fn provider_from_config(
    id: ProviderId,
    config: &Config,
) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let env_key = match id {
        ProviderId::OpenWeather => std::env::var(OPENWEATHER_API_KEY_ENV).ok(),
        ProviderId::Mock => None,
    };
    build_provider(id, config, env_key.as_deref())
}

fn build_provider(
    id: ProviderId,
    config: &Config,
    override_key: Option<&str>,
) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let boxed: Box<dyn WeatherProvider> = match id {
        ProviderId::OpenWeather => {
            let api_key = config.api_key_with_override(id, override_key).ok_or_else(|| {
                anyhow::anyhow!(
                    "No API key configured for provider '{id}'.\n\
                         Hint: run `weather configure {id}` and enter your API key."
                )
            })?;
            Box::new(OpenWeatherProvider::new(api_key.to_owned())?)
        }
        ProviderId::Mock => Box::new(MockProvider::new()),
    };

    tracing::debug!(provider = %id, "constructed weather provider");
    Ok(boxed)
}

/// Construct the default provider from config, using `default_provider` field.
pub fn default_provider_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let id = config.default_provider_id()?;
    provider_from_config(id, config)
}

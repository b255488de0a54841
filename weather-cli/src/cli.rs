use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{Password, PasswordDisplayMode};
use weather_core::{
    Config, LocationQuery, ProviderId, load_report,
    provider::{default_provider_from_config, mock::MockProvider, provider_from_config},
    today_utc,
};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Current weather and 5-day forecast")]
pub struct Cli {
    /// Log debug output to stderr (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Configure credentials for a specific provider.
    Configure {
        /// Provider short name, e.g. "openweather" or "mock".
        provider: String,
    },

    /// Show current weather and the daily forecast for a location.
    Show {
        /// City or location name.
        location: String,

        /// Provider to use instead of the configured default.
        #[arg(long)]
        provider: Option<String>,

        /// Print the report as JSON.
        #[arg(long)]
        json: bool,
    },

    /// List the cities known to the offline mock provider.
    Cities,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure { provider } => configure(&provider),
            Command::Show { location, provider, json } => {
                show(&location, provider.as_deref(), json).await
            }
            Command::Cities => {
                for city in MockProvider::cities() {
                    println!("{city}");
                }
                Ok(())
            }
        }
    }
}

fn configure(provider: &str) -> anyhow::Result<()> {
    let id = ProviderId::try_from(provider)?;
    let mut config = Config::load()?;

    if id.requires_api_key() {
        if config.is_provider_configured(id) {
            println!("Provider '{id}' already has an API key; entering a new one replaces it.");
        }

        let api_key = Password::new(&format!("API key for {id}:"))
            .with_display_mode(PasswordDisplayMode::Masked)
            .without_confirmation()
            .prompt()
            .context("Failed to read API key")?;

        let api_key = api_key.trim().to_string();
        if api_key.is_empty() {
            anyhow::bail!("API key must not be empty");
        }
        config.upsert_provider_api_key(id, api_key);
    } else {
        config.set_default_provider(id);
    }

    let path = config.save()?;
    tracing::info!(provider = %id, path = %path.display(), "saved configuration");
    println!("Provider '{id}' configured ({})", path.display());

    Ok(())
}

async fn show(location: &str, provider: Option<&str>, json: bool) -> anyhow::Result<()> {
    let query = LocationQuery::parse(location)?;
    let config = Config::load()?;

    let provider = match provider {
        Some(name) => provider_from_config(ProviderId::try_from(name)?, &config)?,
        None => default_provider_from_config(&config)?,
    };

    let report = load_report(provider.as_ref(), &query, today_utc()).await.map_err(|e| {
        let message = e.user_message();
        anyhow::Error::new(e).context(message)
    })?;

    if json {
        let out =
            serde_json::to_string_pretty(&report).context("Failed to serialize report to JSON")?;
        println!("{out}");
    } else {
        print!("{}", render::report(&report));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_show_with_provider() {
        let cli = Cli::try_parse_from(["weather", "show", "New York", "--provider", "mock", "--json"])
            .unwrap();

        match cli.command {
            Command::Show { location, provider, json } => {
                assert_eq!(location, "New York");
                assert_eq!(provider.as_deref(), Some("mock"));
                assert!(json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn verbose_flag_is_global() {
        let cli = Cli::try_parse_from(["weather", "cities", "-v"]).unwrap();
        assert!(cli.verbose);
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{convert::TryFrom, fmt};

/// Sky-condition icon identifier, as used by OpenWeather (`01d`, `10n`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum IconCode {
    ClearDay,
    ClearNight,
    FewCloudsDay,
    FewCloudsNight,
    #[default]
    ScatteredCloudsDay,
    ScatteredCloudsNight,
    BrokenCloudsDay,
    BrokenCloudsNight,
    ShowerRainDay,
    ShowerRainNight,
    RainDay,
    RainNight,
    ThunderstormDay,
    ThunderstormNight,
    SnowDay,
    SnowNight,
    MistDay,
    MistNight,
}

impl IconCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            IconCode::ClearDay => "01d",
            IconCode::ClearNight => "01n",
            IconCode::FewCloudsDay => "02d",
            IconCode::FewCloudsNight => "02n",
            IconCode::ScatteredCloudsDay => "03d",
            IconCode::ScatteredCloudsNight => "03n",
            IconCode::BrokenCloudsDay => "04d",
            IconCode::BrokenCloudsNight => "04n",
            IconCode::ShowerRainDay => "09d",
            IconCode::ShowerRainNight => "09n",
            IconCode::RainDay => "10d",
            IconCode::RainNight => "10n",
            IconCode::ThunderstormDay => "11d",
            IconCode::ThunderstormNight => "11n",
            IconCode::SnowDay => "13d",
            IconCode::SnowNight => "13n",
            IconCode::MistDay => "50d",
            IconCode::MistNight => "50n",
        }
    }

    pub const fn all() -> &'static [IconCode] {
        &[
            IconCode::ClearDay,
            IconCode::ClearNight,
            IconCode::FewCloudsDay,
            IconCode::FewCloudsNight,
            IconCode::ScatteredCloudsDay,
            IconCode::ScatteredCloudsNight,
            IconCode::BrokenCloudsDay,
            IconCode::BrokenCloudsNight,
            IconCode::ShowerRainDay,
            IconCode::ShowerRainNight,
            IconCode::RainDay,
            IconCode::RainNight,
            IconCode::ThunderstormDay,
            IconCode::ThunderstormNight,
            IconCode::SnowDay,
            IconCode::SnowNight,
            IconCode::MistDay,
            IconCode::MistNight,
        ]
    }

    /// Short human-readable text for the sky condition.
    pub fn description(&self) -> &'static str {
        match self {
            IconCode::ClearDay | IconCode::ClearNight => "clear sky",
            IconCode::FewCloudsDay | IconCode::FewCloudsNight => "few clouds",
            IconCode::ScatteredCloudsDay | IconCode::ScatteredCloudsNight => "scattered clouds",
            IconCode::BrokenCloudsDay | IconCode::BrokenCloudsNight => "broken clouds",
            IconCode::ShowerRainDay | IconCode::ShowerRainNight => "shower rain",
            IconCode::RainDay | IconCode::RainNight => "rain",
            IconCode::ThunderstormDay | IconCode::ThunderstormNight => "thunderstorm",
            IconCode::SnowDay | IconCode::SnowNight => "snow",
            IconCode::MistDay | IconCode::MistNight => "mist",
        }
    }
}

impl fmt::Display for IconCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for IconCode {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        IconCode::all()
            .iter()
            .copied()
            .find(|icon| icon.as_str() == value)
            .ok_or_else(|| format!("Unknown icon code '{value}'"))
    }
}

impl TryFrom<String> for IconCode {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        IconCode::try_from(value.as_str())
    }
}

impl From<IconCode> for String {
    fn from(icon: IconCode) -> Self {
        icon.as_str().to_string()
    }
}

/// One forecast data point for a 3-hour slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntervalSample {
    /// `"YYYY-MM-DD HH:MM:SS"`
    pub timestamp_label: String,
    pub temp_max: f64,
    pub temp_min: f64,
    pub icon: IconCode,
}

impl IntervalSample {
    pub fn new(timestamp_label: impl Into<String>, temp_max: f64, temp_min: f64, icon: IconCode) -> Self {
        Self { timestamp_label: timestamp_label.into(), temp_max, temp_min, icon }
    }
}

/// Aggregated view of one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailySummary {
    pub weekday: String,
    pub icon: IconCode,
    pub temp_max: i32,
    pub temp_min: i32,
}

/// Raw forecast series for one location, as returned by a provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Forecast {
    pub city: String,
    pub country: String,
    pub samples: Vec<IntervalSample>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub location_name: String,
    pub country: String,
    /// Condition group, e.g. "Clear", "Clouds", "Rain".
    pub condition: String,
    pub description: String,
    pub icon: IconCode,
    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub humidity_pct: u8,
    pub pressure_hpa: u32,
    pub wind_speed_mps: f64,
    pub observation_time: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherReport {
    pub provider: String,
    pub current: CurrentConditions,
    pub daily: Vec<DailySummary>,
}

/// A trimmed, non-empty location search string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationQuery(String);

impl LocationQuery {
    pub fn parse(raw: &str) -> anyhow::Result<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            anyhow::bail!("Location must not be empty");
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LocationQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn icon_code_as_str_roundtrip() {
        for icon in IconCode::all() {
            let parsed = IconCode::try_from(icon.as_str()).expect("roundtrip should succeed");
            assert_eq!(*icon, parsed);
        }
    }

    #[test]
    fn unknown_icon_code_is_rejected() {
        let err = IconCode::try_from("99x").unwrap_err();
        assert!(err.contains("Unknown icon code"));
    }

    #[test]
    fn default_icon_is_scattered_clouds() {
        assert_eq!(IconCode::default().as_str(), "03d");
        assert_eq!(IconCode::default().description(), "scattered clouds");
    }

    #[test]
    fn icon_code_serializes_as_plain_code() {
        let json = serde_json::to_string(&IconCode::ThunderstormDay).unwrap();
        assert_eq!(json, "\"11d\"");

        let icon: IconCode = serde_json::from_str("\"50n\"").unwrap();
        assert_eq!(icon, IconCode::MistNight);
    }

    #[test]
    fn location_query_is_trimmed() {
        let q = LocationQuery::parse("  New York ").unwrap();
        assert_eq!(q.as_str(), "New York");
    }

    #[test]
    fn blank_location_query_is_rejected() {
        assert!(LocationQuery::parse("   ").is_err());
        assert!(LocationQuery::parse("").is_err());
    }
}

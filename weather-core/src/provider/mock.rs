//! Offline provider backed by a fixed table of city fixtures.

use async_trait::async_trait;
use chrono::{Days, NaiveDate, Utc};

use crate::{
    error::FetchError,
    model::{CurrentConditions, Forecast, IconCode, IntervalSample, LocationQuery},
};

use super::{ProviderId, WeatherProvider};

/// Query that makes the mock provider fail, for exercising error paths.
pub const FAILING_QUERY: &str = "error";

const FALLBACK_CITY: &str = "London";
const FORECAST_DAYS: u64 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Sky {
    Clear,
    Clouds,
    Rain,
    Thunderstorm,
}

impl Sky {
    fn group(self) -> &'static str {
        match self {
            Sky::Clear => "Clear",
            Sky::Clouds => "Clouds",
            Sky::Rain => "Rain",
            Sky::Thunderstorm => "Thunderstorm",
        }
    }

    fn description(self) -> &'static str {
        match self {
            Sky::Clear => "clear sky",
            Sky::Clouds => "scattered clouds",
            Sky::Rain => "moderate rain",
            Sky::Thunderstorm => "thunderstorm",
        }
    }

    fn icon(self) -> IconCode {
        match self {
            Sky::Clear => IconCode::ClearDay,
            Sky::Clouds => IconCode::ScatteredCloudsDay,
            Sky::Rain => IconCode::RainDay,
            Sky::Thunderstorm => IconCode::ThunderstormDay,
        }
    }
}

struct CityFixture {
    name: &'static str,
    temp: f64,
    sky: Sky,
    country: &'static str,
}

const fn city(name: &'static str, temp: f64, sky: Sky, country: &'static str) -> CityFixture {
    CityFixture { name, temp, sky, country }
}

static CITIES: &[CityFixture] = &[
    city("London", 18.0, Sky::Clouds, "GB"),
    city("Mumbai", 32.0, Sky::Rain, "IN"),
    city("Delhi", 35.0, Sky::Clear, "IN"),
    city("Bengaluru", 28.0, Sky::Clouds, "IN"),
    city("Kolkata", 31.0, Sky::Rain, "IN"),
    city("Chennai", 34.0, Sky::Clear, "IN"),
    city("Hyderabad", 30.0, Sky::Clouds, "IN"),
    city("New York", 22.0, Sky::Clear, "US"),
    city("Paris", 20.0, Sky::Clouds, "FR"),
    city("Tokyo", 25.0, Sky::Rain, "JP"),
    city("Sydney", 19.0, Sky::Clear, "AU"),
    city("Dubai", 40.0, Sky::Clear, "AE"),
    city("Singapore", 31.0, Sky::Thunderstorm, "SG"),
    city("Los Angeles", 24.0, Sky::Clear, "US"),
    city("Chicago", 21.0, Sky::Clouds, "US"),
    city("Toronto", 19.0, Sky::Rain, "CA"),
    city("Moscow", 17.0, Sky::Clouds, "RU"),
    city("Beijing", 26.0, Sky::Clear, "CN"),
    city("Shanghai", 28.0, Sky::Rain, "CN"),
    city("Cairo", 36.0, Sky::Clear, "EG"),
    city("Rio de Janeiro", 27.0, Sky::Clouds, "BR"),
    city("Buenos Aires", 19.0, Sky::Clouds, "AR"),
    city("Mexico City", 23.0, Sky::Rain, "MX"),
    city("Lagos", 29.0, Sky::Thunderstorm, "NG"),
];

#[derive(Debug, Clone, Default)]
pub struct MockProvider {
    reference_date: Option<NaiveDate>,
}

impl MockProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pin the date the fixtures are generated from (defaults to today, UTC).
    pub fn with_reference_date(date: NaiveDate) -> Self {
        Self { reference_date: Some(date) }
    }

    /// Names of all fixture cities, sorted.
    pub fn cities() -> Vec<&'static str> {
        let mut names: Vec<_> = CITIES.iter().map(|c| c.name).collect();
        names.sort_unstable();
        names
    }

    fn reference_date(&self) -> NaiveDate {
        self.reference_date.unwrap_or_else(|| Utc::now().date_naive())
    }

    /// Resolve a query to a fixture plus the display name to report.
    fn lookup(query: &LocationQuery) -> Result<(&'static CityFixture, String), FetchError> {
        if query.as_str().eq_ignore_ascii_case(FAILING_QUERY) {
            return Err(FetchError::NetworkFailure("simulated failure".to_string()));
        }

        let fixture = CITIES
            .iter()
            .find(|c| c.name == query.as_str())
            .or_else(|| CITIES.iter().find(|c| c.name == FALLBACK_CITY))
            .ok_or_else(|| FetchError::NotFound(query.to_string()))?;

        Ok((fixture, query.to_string()))
    }
}

#[async_trait]
impl WeatherProvider for MockProvider {
    fn id(&self) -> ProviderId {
        ProviderId::Mock
    }

    async fn current(&self, query: &LocationQuery) -> Result<CurrentConditions, FetchError> {
        let (fixture, name) = Self::lookup(query)?;

        Ok(CurrentConditions {
            location_name: name,
            country: fixture.country.to_string(),
            condition: fixture.sky.group().to_string(),
            description: fixture.sky.description().to_string(),
            icon: fixture.sky.icon(),
            temperature_c: fixture.temp,
            feels_like_c: fixture.temp - 2.0,
            humidity_pct: 68,
            pressure_hpa: 1012,
            wind_speed_mps: 4.63,
            observation_time: Utc::now(),
        })
    }

    async fn forecast(&self, query: &LocationQuery) -> Result<Forecast, FetchError> {
        let (fixture, name) = Self::lookup(query)?;
        let start = self.reference_date();

        let samples = (0..FORECAST_DAYS)
            .filter_map(|i| {
                let date = start.checked_add_days(Days::new(i + 1))?;
                let temp = fixture.temp + (i as f64) * 2.0 - 3.0;
                let sky = if i % 2 == 0 { Sky::Clouds } else { Sky::Clear };

                Some(IntervalSample::new(
                    format!("{} 12:00:00", date.format("%Y-%m-%d")),
                    temp + 3.0,
                    temp - 3.0,
                    sky.icon(),
                ))
            })
            .collect();

        Ok(Forecast { city: name, country: fixture.country.to_string(), samples })
    }
}

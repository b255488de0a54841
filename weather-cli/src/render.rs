use weather_core::{CurrentConditions, DailySummary, WeatherReport};

/// Plain-text rendering of a full report.
pub fn report(report: &WeatherReport) -> String {
    format!("{}\n{}", current(&report.current), daily(&report.daily))
}

fn current(c: &CurrentConditions) -> String {
    let header = if c.country.is_empty() {
        c.location_name.clone()
    } else {
        format!("{}, {}", c.location_name, c.country)
    };

    format!(
        "{header}\n\
         {}\n  \
         Temperature  {}°C\n  \
         Feels like   {}°C\n  \
         Humidity     {}%\n  \
         Wind         {:.1} m/s\n  \
         Pressure     {} hPa\n",
        c.description,
        c.temperature_c.round(),
        c.feels_like_c.round(),
        c.humidity_pct,
        c.wind_speed_mps,
        c.pressure_hpa,
    )
}

fn daily(days: &[DailySummary]) -> String {
    if days.is_empty() {
        return "5-Day Forecast\n  no forecast available\n".to_string();
    }

    let rows: String = days
        .iter()
        .map(|day| {
            format!(
                "  {:<4} {:<17} {:>4}° {:>4}°\n",
                day.weekday,
                day.icon.description(),
                day.temp_max,
                day.temp_min,
            )
        })
        .collect();

    format!("5-Day Forecast\n{rows}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use weather_core::IconCode;

    fn sample_report() -> WeatherReport {
        WeatherReport {
            provider: "mock".into(),
            current: CurrentConditions {
                location_name: "London".into(),
                country: "GB".into(),
                condition: "Clouds".into(),
                description: "scattered clouds".into(),
                icon: IconCode::ScatteredCloudsDay,
                temperature_c: 18.4,
                feels_like_c: 16.5,
                humidity_pct: 68,
                pressure_hpa: 1012,
                wind_speed_mps: 4.63,
                observation_time: Utc::now(),
            },
            daily: vec![
                DailySummary {
                    weekday: "Thu".into(),
                    icon: IconCode::RainDay,
                    temp_max: 18,
                    temp_min: 10,
                },
                DailySummary {
                    weekday: "Fri".into(),
                    icon: IconCode::MistDay,
                    temp_max: 15,
                    temp_min: -2,
                },
            ],
        }
    }

    #[test]
    fn renders_current_conditions() {
        let out = report(&sample_report());

        assert!(out.starts_with("London, GB\nscattered clouds\n"));
        assert!(out.contains("Temperature  18°C"));
        assert!(out.contains("Feels like   17°C"));
        assert!(out.contains("Wind         4.6 m/s"));
        assert!(out.contains("Pressure     1012 hPa"));
    }

    #[test]
    fn renders_one_line_per_day() {
        let out = report(&sample_report());
        let lines: Vec<_> = out.lines().skip_while(|l| *l != "5-Day Forecast").skip(1).collect();

        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("  Thu  rain"));
        assert!(lines[0].ends_with("18°   10°"));
        assert!(lines[1].ends_with("15°   -2°"));
    }

    #[test]
    fn renders_empty_forecast() {
        let mut r = sample_report();
        r.daily.clear();

        assert!(report(&r).contains("no forecast available"));
    }

    #[test]
    fn omits_missing_country() {
        let mut r = sample_report();
        r.current.country.clear();

        assert!(report(&r).starts_with("London\nscattered clouds\n  Temperature"));
    }
}

//! Daily aggregation of 3-hourly forecast samples.
//!
//! Samples are grouped by the date part of their timestamp label, the group
//! matching `today` is dropped, and each remaining day is reduced to rounded
//! temperature extrema plus one representative icon.

use chrono::NaiveDate;
use std::collections::HashMap;

use crate::{
    error::AggregateError,
    model::{DailySummary, IconCode, IntervalSample},
};

/// Maximum number of days returned by [`aggregate`].
pub const MAX_FORECAST_DAYS: usize = 5;

const DATE_FORMAT: &str = "%Y-%m-%d";
const MIDDAY: &str = "12:00:00";

#[derive(Debug)]
struct DayGroup {
    date: NaiveDate,
    max: f64,
    min: f64,
    midday_icon: Option<IconCode>,
    first_icon: Option<IconCode>,
}

impl DayGroup {
    fn new(date: NaiveDate) -> Self {
        Self {
            date,
            max: f64::NEG_INFINITY,
            min: f64::INFINITY,
            midday_icon: None,
            first_icon: None,
        }
    }

    fn push(&mut self, sample: &IntervalSample, time: &str) {
        for value in [sample.temp_max, sample.temp_min] {
            self.max = self.max.max(value);
            self.min = self.min.min(value);
        }

        if time == MIDDAY {
            // last midday sample wins
            self.midday_icon = Some(sample.icon);
        } else if self.first_icon.is_none() {
            self.first_icon = Some(sample.icon);
        }
    }

    fn summarize(&self) -> DailySummary {
        let weekday = self
            .date
            .and_hms_opt(12, 0, 0)
            .map(|noon| noon.and_utc().format("%a").to_string())
            .unwrap_or_default();

        DailySummary {
            weekday,
            icon: self.midday_icon.or(self.first_icon).unwrap_or_default(),
            temp_max: self.max.round() as i32,
            temp_min: self.min.round() as i32,
        }
    }
}

/// Split a `"YYYY-MM-DD HH:MM:SS"` label into its validated date key and time part.
fn split_label(label: &str) -> Result<(&str, &str, NaiveDate), AggregateError> {
    let (date_part, time_part) = label.split_once(' ').unwrap_or((label, ""));

    let date = NaiveDate::parse_from_str(date_part, DATE_FORMAT).map_err(|e| {
        AggregateError::MalformedInput { label: label.to_string(), reason: e.to_string() }
    })?;

    Ok((date_part, time_part, date))
}

/// Reject readings that cannot round to an `i32` (NaN, infinities, huge values).
fn check_readings(sample: &IntervalSample) -> Result<(), AggregateError> {
    for value in [sample.temp_max, sample.temp_min] {
        let rounded = value.round();
        if !rounded.is_finite() || rounded < f64::from(i32::MIN) || rounded > f64::from(i32::MAX) {
            return Err(AggregateError::MalformedInput {
                label: sample.timestamp_label.clone(),
                reason: format!("temperature {value} is out of range"),
            });
        }
    }
    Ok(())
}

/// Reduce an ordered series of interval samples to at most
/// [`MAX_FORECAST_DAYS`] daily summaries, skipping `today`.
///
/// Days appear in the order they are first seen in `samples`. Both the
/// `temp_max` and `temp_min` of every sample feed the day's extrema, which
/// are rounded half away from zero. The `12:00:00` sample decides the icon
/// when present (the last one if repeated), otherwise the first sample of
/// the day does.
///
/// Any label whose date does not parse, or any temperature that is not a
/// finite value within `i32` range once rounded, fails the whole call.
pub fn aggregate(
    samples: &[IntervalSample],
    today: NaiveDate,
) -> Result<Vec<DailySummary>, AggregateError> {
    let today_key = today.format(DATE_FORMAT).to_string();

    let mut groups: Vec<DayGroup> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for sample in samples {
        let (key, time, date) = split_label(&sample.timestamp_label)?;
        check_readings(sample)?;
        if key == today_key {
            continue;
        }

        let slot = match index.get(key) {
            Some(&slot) => slot,
            None => {
                groups.push(DayGroup::new(date));
                index.insert(key.to_string(), groups.len() - 1);
                groups.len() - 1
            }
        };

        groups[slot].push(sample, time);
    }

    tracing::debug!(
        samples = samples.len(),
        days = groups.len(),
        today = %today_key,
        "aggregated forecast samples"
    );

    Ok(groups.iter().take(MAX_FORECAST_DAYS).map(DayGroup::summarize).collect())
}

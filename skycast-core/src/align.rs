//! Forecast alignment.
//!
//! Cuts the raw hourly series down to a forward-looking window anchored at
//! the current hour, and the daily series down to the days after today.
//! This is also where the series index-alignment invariant is enforced: a
//! length mismatch between parallel vectors is a malformed response, never a
//! silent truncation.

use chrono::{Datelike as _, NaiveDateTime, Timelike as _};
use serde::Serialize;

use crate::condition::{WeatherInfo, classify};
use crate::error::{Error, Result};
use crate::model::{DailySeries, HourlySeries};

pub const DEFAULT_HOURLY_WINDOW: usize = 24;

/// One hour of the hourly strip, display-ready.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HourSlot {
    /// Local hour of day, 0..=23.
    pub hour: u32,
    /// Rounded to the nearest whole degree for display.
    pub temperature_c: i32,
    pub info: WeatherInfo,
}

/// One day of the daily strip, display-ready.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DaySlot {
    /// Short English weekday name ("Mon", "Tue", ...).
    pub label: String,
    pub max_c: i32,
    pub min_c: i32,
    pub info: WeatherInfo,
}

/// Locate `now`'s hour in the series and take up to `window` consecutive
/// entries from there.
///
/// The start index is the first entry whose local hour-of-day equals `now`'s
/// hour-of-day; [`Error::Alignment`] when no entry matches. A series shorter
/// than `start + window` truncates the result, it is never wrapped or padded.
pub fn hourly_window(
    series: &HourlySeries,
    now: NaiveDateTime,
    window: usize,
) -> Result<Vec<HourSlot>> {
    check_lengths(
        "hourly",
        series.times.len(),
        &[series.temperatures_c.len(), series.weather_codes.len()],
    )?;

    let start = series
        .times
        .iter()
        .position(|t| t.hour() == now.hour())
        .ok_or(Error::Alignment)?;

    Ok(series
        .times
        .iter()
        .enumerate()
        .skip(start)
        .take(window)
        .map(|(i, t)| HourSlot {
            hour: t.hour(),
            temperature_c: round(series.temperatures_c[i]),
            info: classify(series.weather_codes[i]),
        })
        .collect())
}

/// The daily strip: every entry except index 0, which is today and already
/// covered by the current-conditions panel.
pub fn daily_window(series: &DailySeries) -> Result<Vec<DaySlot>> {
    check_lengths(
        "daily",
        series.times.len(),
        &[
            series.weather_codes.len(),
            series.max_temperatures_c.len(),
            series.min_temperatures_c.len(),
        ],
    )?;

    Ok(series
        .times
        .iter()
        .enumerate()
        .skip(1)
        .map(|(i, date)| DaySlot {
            label: weekday_label(date.weekday()),
            max_c: round(series.max_temperatures_c[i]),
            min_c: round(series.min_temperatures_c[i]),
            info: classify(series.weather_codes[i]),
        })
        .collect())
}

fn check_lengths(series: &str, expected: usize, others: &[usize]) -> Result<()> {
    if others.iter().any(|&len| len != expected) {
        return Err(Error::Decode(format!(
            "{series} series vectors are not index-aligned"
        )));
    }
    Ok(())
}

fn round(t: f64) -> i32 {
    t.round() as i32
}

// Fixed English short names; the widget is not localized.
fn weekday_label(day: chrono::Weekday) -> String {
    use chrono::Weekday as W;
    match day {
        W::Mon => "Mon",
        W::Tue => "Tue",
        W::Wed => "Wed",
        W::Thu => "Thu",
        W::Fri => "Fri",
        W::Sat => "Sat",
        W::Sun => "Sun",
    }
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::IconCategory;
    use chrono::NaiveDate;

    fn hourly(start_hour: u32, len: usize) -> HourlySeries {
        let day = NaiveDate::from_ymd_opt(2024, 1, 15).expect("valid date");
        let first = day
            .and_hms_opt(start_hour, 0, 0)
            .expect("valid time");
        HourlySeries {
            times: (0..len)
                .map(|i| first + chrono::Duration::hours(i as i64))
                .collect(),
            temperatures_c: (0..len).map(|i| 10.0 + i as f64 * 0.4).collect(),
            weather_codes: vec![61; len],
        }
    }

    fn at_hour(hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 15)
            .expect("valid date")
            .and_hms_opt(hour, 12, 30)
            .expect("valid time")
    }

    #[test]
    fn window_starts_at_the_matching_hour() {
        let series = hourly(5, 48);
        let slots = hourly_window(&series, at_hour(5), DEFAULT_HOURLY_WINDOW).expect("window");

        assert_eq!(slots.len(), 24);
        assert_eq!(slots[0].hour, 5);
        assert_eq!(slots[0].temperature_c, 10);
        assert_eq!(slots[23].hour, 4); // wraps past midnight
        assert_eq!(slots[0].info.icon, IconCategory::Rain);
    }

    #[test]
    fn window_skips_entries_before_the_current_hour() {
        let series = hourly(0, 48);
        let slots = hourly_window(&series, at_hour(7), DEFAULT_HOURLY_WINDOW).expect("window");

        assert_eq!(slots.len(), 24);
        assert_eq!(slots[0].hour, 7);
    }

    #[test]
    fn short_series_truncates_instead_of_padding() {
        let series = hourly(5, 10);
        let slots = hourly_window(&series, at_hour(8), DEFAULT_HOURLY_WINDOW).expect("window");

        // Entries 8..=14 exist, so 7 slots.
        assert_eq!(slots.len(), 7);
        assert_eq!(slots[0].hour, 8);
        assert_eq!(slots[6].hour, 14);
    }

    #[test]
    fn no_matching_hour_is_an_alignment_error() {
        // Hours 5..=9 only; "now" is 14:xx.
        let series = hourly(5, 5);
        let err = hourly_window(&series, at_hour(14), DEFAULT_HOURLY_WINDOW).unwrap_err();
        assert!(matches!(err, Error::Alignment));
    }

    #[test]
    fn mismatched_hourly_lengths_are_a_decode_error() {
        let mut series = hourly(5, 10);
        series.temperatures_c.pop();
        let err = hourly_window(&series, at_hour(5), DEFAULT_HOURLY_WINDOW).unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
    }

    #[test]
    fn temperatures_round_to_nearest_degree() {
        let mut series = hourly(5, 2);
        series.temperatures_c = vec![10.5, -0.4];
        let slots = hourly_window(&series, at_hour(5), DEFAULT_HOURLY_WINDOW).expect("window");
        assert_eq!(slots[0].temperature_c, 11);
        assert_eq!(slots[1].temperature_c, 0);
    }

    fn daily(len: usize) -> DailySeries {
        let first = NaiveDate::from_ymd_opt(2024, 1, 15).expect("valid date"); // a Monday
        DailySeries {
            times: (0..len)
                .map(|i| first + chrono::Duration::days(i as i64))
                .collect(),
            weather_codes: vec![3; len],
            max_temperatures_c: (0..len).map(|i| 12.0 + i as f64).collect(),
            min_temperatures_c: (0..len).map(|i| 4.0 + i as f64).collect(),
        }
    }

    #[test]
    fn daily_skips_today() {
        let slots = daily_window(&daily(7)).expect("window");

        assert_eq!(slots.len(), 6);
        assert_eq!(slots[0].label, "Tue");
        assert_eq!(slots[5].label, "Sun");
        assert_eq!(slots[0].max_c, 13);
        assert_eq!(slots[0].min_c, 5);
        assert_eq!(slots[0].info.icon, IconCategory::Cloud);
    }

    #[test]
    fn single_day_series_yields_no_slots() {
        let slots = daily_window(&daily(1)).expect("window");
        assert!(slots.is_empty());
    }

    #[test]
    fn mismatched_daily_lengths_are_a_decode_error() {
        let mut series = daily(7);
        series.weather_codes.truncate(5);
        let err = daily_window(&series).unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
    }
}

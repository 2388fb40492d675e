//! Presentation: pure transforms from client output to view state, plus the
//! [`View`] seam the interaction controller renders into.
//!
//! No business logic lives here beyond shaping data for display. A render
//! target is expected to replace its whole content on every call; partial
//! patching of a previous render is never required.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::align::{self, DaySlot, HourSlot};
use crate::condition::{BackgroundCategory, IconCategory, classify};
use crate::error::{Error, Result};
use crate::model::{ForecastBundle, Location};

/// The current-conditions panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurrentPanel {
    pub city: String,
    /// Rounded to the nearest whole degree for display.
    pub temperature_c: i32,
    pub description: &'static str,
    pub icon: IconCategory,
    pub relative_humidity_pct: u8,
    pub wind_speed_kmh: String,
}

/// Everything one render cycle puts on screen. Built wholesale, rendered
/// wholesale, superseded wholesale.
#[derive(Debug, Clone, Serialize)]
pub struct WeatherReport {
    pub current: CurrentPanel,
    /// `None` when the hourly series had no sample for the current hour; the
    /// view shows a placeholder line instead of the strip.
    pub hourly: Option<Vec<HourSlot>>,
    pub daily: Vec<DaySlot>,
    pub background: BackgroundCategory,
}

/// Build the full report for one fetched bundle.
///
/// A failed hourly alignment degrades that strip to `None`; a series-length
/// mismatch anywhere is a malformed response and fails the whole report.
pub fn build_report(
    location: &Location,
    bundle: &ForecastBundle,
    now: NaiveDateTime,
    hourly_window: usize,
) -> Result<WeatherReport> {
    let info = classify(bundle.current.weather_code);

    let hourly = match align::hourly_window(&bundle.hourly, now, hourly_window) {
        Ok(slots) => Some(slots),
        Err(Error::Alignment) => {
            tracing::warn!(city = %location.name, "hourly series did not cover the current hour");
            None
        }
        Err(e) => return Err(e),
    };

    Ok(WeatherReport {
        current: CurrentPanel {
            city: location.name.clone(),
            temperature_c: bundle.current.temperature_c.round() as i32,
            description: info.description,
            icon: info.icon,
            relative_humidity_pct: bundle.current.relative_humidity_pct,
            wind_speed_kmh: format!("{} km/h", bundle.current.wind_speed_kmh),
        },
        hourly,
        daily: align::daily_window(&bundle.daily)?,
        background: BackgroundCategory::from_code(bundle.current.weather_code),
    })
}

/// A container to render into. The controller only ever replaces content:
/// `loading` the instant a fetch starts, then exactly one of `report` or
/// `error` when the cycle ends.
pub trait View: Send + Sync {
    fn loading(&self);
    fn report(&self, report: &WeatherReport);
    fn error(&self, err: &Error);
    fn suggestions(&self, items: &[Location]);
    fn clear_suggestions(&self);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CurrentConditions, DailySeries, HourlySeries};
    use chrono::NaiveDate;

    fn location() -> Location {
        Location {
            name: "London".to_string(),
            latitude: 51.5,
            longitude: -0.12,
            region: Some("England".to_string()),
            country_code: Some("GB".to_string()),
        }
    }

    fn bundle(code: i32) -> ForecastBundle {
        let day = NaiveDate::from_ymd_opt(2024, 1, 15).expect("valid date");
        ForecastBundle {
            current: CurrentConditions {
                temperature_c: 11.6,
                relative_humidity_pct: 82,
                wind_speed_kmh: 14.8,
                weather_code: code,
            },
            hourly: HourlySeries {
                times: (0..24)
                    .map(|h| day.and_hms_opt(h, 0, 0).expect("valid time"))
                    .collect(),
                temperatures_c: vec![10.0; 24],
                weather_codes: vec![code; 24],
            },
            daily: DailySeries {
                times: (0..7)
                    .map(|i| day + chrono::Duration::days(i))
                    .collect(),
                weather_codes: vec![code; 7],
                max_temperatures_c: vec![12.0; 7],
                min_temperatures_c: vec![4.0; 7],
            },
        }
    }

    fn noon() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 15)
            .expect("valid date")
            .and_hms_opt(12, 0, 0)
            .expect("valid time")
    }

    #[test]
    fn report_shapes_the_current_panel() {
        let report = build_report(&location(), &bundle(61), noon(), 24).expect("report");

        assert_eq!(report.current.city, "London");
        assert_eq!(report.current.temperature_c, 12);
        assert_eq!(report.current.description, "Slight rain");
        assert_eq!(report.current.wind_speed_kmh, "14.8 km/h");
        assert_eq!(report.background, BackgroundCategory::Rain);
        assert_eq!(report.daily.len(), 6);
    }

    #[test]
    fn background_tracks_the_current_code() {
        for (code, bg) in [
            (0, BackgroundCategory::Clear),
            (3, BackgroundCategory::Cloudy),
            (45, BackgroundCategory::Fog),
            (95, BackgroundCategory::Storm),
        ] {
            let report = build_report(&location(), &bundle(code), noon(), 24).expect("report");
            assert_eq!(report.background, bg, "code {code}");
        }
    }

    #[test]
    fn hourly_window_anchors_at_now() {
        let report = build_report(&location(), &bundle(0), noon(), 24).expect("report");
        let hourly = report.hourly.expect("aligned");

        // 24 entries from midnight, anchored at hour 12 leaves 12.
        assert_eq!(hourly.len(), 12);
        assert_eq!(hourly[0].hour, 12);
    }

    #[test]
    fn alignment_failure_degrades_to_a_placeholder() {
        let mut b = bundle(0);
        b.hourly.times.truncate(5);
        b.hourly.temperatures_c.truncate(5);
        b.hourly.weather_codes.truncate(5);

        let report = build_report(&location(), &b, noon(), 24).expect("report");
        assert!(report.hourly.is_none());
        assert_eq!(report.daily.len(), 6);
    }

    #[test]
    fn length_mismatch_fails_the_whole_report() {
        let mut b = bundle(0);
        b.daily.weather_codes.pop();

        let err = build_report(&location(), &b, noon(), 24).unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
    }
}

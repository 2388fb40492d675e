use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A geocoded place. Produced by the geocoding client, consumed immediately,
/// never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    /// First-level administrative area ("England", "California", ...).
    pub region: Option<String>,
    pub country_code: Option<String>,
}

impl Location {
    /// Suggestion-row label: `name — region, country code`, dropping the
    /// parts that are missing.
    pub fn label(&self) -> String {
        match (self.region.as_deref(), self.country_code.as_deref()) {
            (Some(region), Some(cc)) => format!("{} — {}, {}", self.name, region, cc),
            (Some(region), None) => format!("{} — {}", self.name, region),
            (None, Some(cc)) => format!("{} — {}", self.name, cc),
            (None, None) => self.name.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub temperature_c: f64,
    pub relative_humidity_pct: u8,
    pub wind_speed_kmh: f64,
    pub weather_code: i32,
}

/// Hourly forecast as parallel, index-aligned vectors, chronologically
/// ordered. Alignment is checked at consumption time, not here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HourlySeries {
    pub times: Vec<NaiveDateTime>,
    pub temperatures_c: Vec<f64>,
    pub weather_codes: Vec<i32>,
}

/// Daily forecast as parallel, index-aligned vectors. Index 0 is today.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DailySeries {
    pub times: Vec<NaiveDate>,
    pub weather_codes: Vec<i32>,
    pub max_temperatures_c: Vec<f64>,
    pub min_temperatures_c: Vec<f64>,
}

/// One forecast response. Lives for a single render cycle and is replaced
/// wholesale by the next query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastBundle {
    pub current: CurrentConditions,
    pub hourly: HourlySeries,
    pub daily: DailySeries,
}

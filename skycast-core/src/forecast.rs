//! Open-Meteo forecast client.
//!
//! Fetches current conditions plus hourly and daily series for a pair of
//! coordinates. The upstream is asked to auto-detect the location's timezone
//! (`timezone=auto`), so all series timestamps are location-local. Series
//! index alignment is not validated here; that happens at consumption time in
//! [`crate::align`].

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use reqwest::Client;
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::model::{CurrentConditions, DailySeries, ForecastBundle, HourlySeries};

pub const FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";

// Open-Meteo hourly timestamps carry no seconds: "2024-01-15T05:00".
const HOURLY_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Seam for the interaction controller.
#[async_trait]
pub trait ForecastSource: Send + Sync {
    async fn fetch(&self, latitude: f64, longitude: f64) -> Result<ForecastBundle>;
}

#[derive(Debug, Clone)]
pub struct ForecastClient {
    http: Client,
    base_url: String,
}

impl Default for ForecastClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ForecastClient {
    pub fn new() -> Self {
        Self::with_base_url(FORECAST_URL)
    }

    /// Point the client at a different endpoint (used by tests and config).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl ForecastSource for ForecastClient {
    async fn fetch(&self, latitude: f64, longitude: f64) -> Result<ForecastBundle> {
        tracing::debug!(latitude, longitude, "fetching forecast");

        let lat = latitude.to_string();
        let lon = longitude.to_string();

        let res = self
            .http
            .get(&self.base_url)
            .query(&[
                ("latitude", lat.as_str()),
                ("longitude", lon.as_str()),
                (
                    "current",
                    "temperature_2m,relative_humidity_2m,weather_code,wind_speed_10m",
                ),
                ("hourly", "temperature_2m,weather_code"),
                ("daily", "weather_code,temperature_2m_max,temperature_2m_min"),
                ("timezone", "auto"),
            ])
            .send()
            .await?
            .error_for_status()?;

        let body = res.text().await?;

        let parsed: OmForecastResponse = serde_json::from_str(&body)
            .map_err(|e| Error::Decode(format!("forecast JSON: {e}")))?;

        parsed.try_into()
    }
}

#[derive(Debug, Deserialize)]
struct OmCurrent {
    temperature_2m: f64,
    relative_humidity_2m: u8,
    weather_code: i32,
    wind_speed_10m: f64,
}

#[derive(Debug, Deserialize)]
struct OmHourly {
    time: Vec<String>,
    temperature_2m: Vec<f64>,
    weather_code: Vec<i32>,
}

#[derive(Debug, Deserialize)]
struct OmDaily {
    time: Vec<NaiveDate>,
    weather_code: Vec<i32>,
    temperature_2m_max: Vec<f64>,
    temperature_2m_min: Vec<f64>,
}

#[derive(Debug, Deserialize)]
struct OmForecastResponse {
    current: OmCurrent,
    hourly: OmHourly,
    daily: OmDaily,
}

impl TryFrom<OmForecastResponse> for ForecastBundle {
    type Error = Error;

    fn try_from(r: OmForecastResponse) -> Result<Self> {
        let times = r
            .hourly
            .time
            .iter()
            .map(|t| {
                NaiveDateTime::parse_from_str(t, HOURLY_TIME_FORMAT)
                    .map_err(|e| Error::Decode(format!("hourly time '{t}': {e}")))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(ForecastBundle {
            current: CurrentConditions {
                temperature_c: r.current.temperature_2m,
                relative_humidity_pct: r.current.relative_humidity_2m,
                wind_speed_kmh: r.current.wind_speed_10m,
                weather_code: r.current.weather_code,
            },
            hourly: HourlySeries {
                times,
                temperatures_c: r.hourly.temperature_2m,
                weather_codes: r.hourly.weather_code,
            },
            daily: DailySeries {
                times: r.daily.time,
                weather_codes: r.daily.weather_code,
                max_temperatures_c: r.daily.temperature_2m_max,
                min_temperatures_c: r.daily.temperature_2m_min,
            },
        })
    }
}

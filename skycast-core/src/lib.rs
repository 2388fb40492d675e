//! Core library for the `skycast` weather lookup.
//!
//! This crate defines:
//! - Clients for the Open-Meteo geocoding and forecast APIs
//! - Weather-code classification (icons, labels, background category)
//! - Forecast alignment (hourly window, daily strip)
//! - The interaction controller (debounced suggestions, fetch cycles)
//! - Configuration handling
//!
//! It is used by `skycast-cli`, but can also be reused by other binaries or services.

pub mod align;
pub mod condition;
pub mod config;
pub mod controller;
pub mod error;
pub mod forecast;
pub mod geocode;
pub mod model;
pub mod present;

pub use align::{DaySlot, HourSlot, daily_window, hourly_window};
pub use condition::{BackgroundCategory, IconCategory, WeatherInfo, classify};
pub use config::Config;
pub use controller::{InputEvent, SearchController};
pub use error::{Error, Result};
pub use forecast::{ForecastClient, ForecastSource};
pub use geocode::{GeocodeSource, GeocodingClient};
pub use model::{CurrentConditions, DailySeries, ForecastBundle, HourlySeries, Location};
pub use present::{CurrentPanel, View, WeatherReport, build_report};

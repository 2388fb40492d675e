//! WMO weather-code classification.
//!
//! Two pure mappings derived from the Open-Meteo weather code:
//! a fine-grained icon + description ([`classify`]) and a coarse ambient
//! background bucket ([`BackgroundCategory`]).
//! See: https://open-meteo.com/en/docs#weathervariables

use serde::{Deserialize, Serialize};

/// Display glyph category for a weather code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IconCategory {
    Sun,
    CloudSun,
    Cloud,
    Fog,
    Drizzle,
    Rain,
    Storm,
    Unknown,
}

/// Derived display data for one weather code. Stateless, pure function of
/// the code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WeatherInfo {
    pub icon: IconCategory,
    pub description: &'static str,
}

impl WeatherInfo {
    const fn new(icon: IconCategory, description: &'static str) -> Self {
        Self { icon, description }
    }
}

/// Map a WMO weather code to its display info.
///
/// Total over all integers: codes outside the known table come back as
/// [`IconCategory::Unknown`] with a generic label, never an error.
pub fn classify(code: i32) -> WeatherInfo {
    use IconCategory as I;
    match code {
        0 => WeatherInfo::new(I::Sun, "Clear sky"),
        1 => WeatherInfo::new(I::CloudSun, "Mainly clear"),
        2 => WeatherInfo::new(I::Cloud, "Partly cloudy"),
        3 => WeatherInfo::new(I::Cloud, "Overcast"),
        45 => WeatherInfo::new(I::Fog, "Fog"),
        48 => WeatherInfo::new(I::Fog, "Depositing rime fog"),
        51 => WeatherInfo::new(I::Drizzle, "Light drizzle"),
        53 => WeatherInfo::new(I::Drizzle, "Moderate drizzle"),
        55 => WeatherInfo::new(I::Drizzle, "Dense drizzle"),
        61 => WeatherInfo::new(I::Rain, "Slight rain"),
        63 => WeatherInfo::new(I::Rain, "Moderate rain"),
        65 => WeatherInfo::new(I::Rain, "Heavy rain"),
        80 => WeatherInfo::new(I::Rain, "Slight rain showers"),
        81 => WeatherInfo::new(I::Rain, "Moderate rain showers"),
        82 => WeatherInfo::new(I::Rain, "Violent rain showers"),
        95 => WeatherInfo::new(I::Storm, "Thunderstorm"),
        _ => WeatherInfo::new(I::Unknown, "Unknown"),
    }
}

/// Coarse bucket driving the ambient background.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackgroundCategory {
    Clear,
    Cloudy,
    Rain,
    Fog,
    Storm,
}

impl BackgroundCategory {
    /// Ordered range rules over the weather code.
    ///
    /// The fog arm must stay ahead of the 51..=82 rain range: 45 and 48 sit
    /// below 51 and would otherwise never be reached.
    pub fn from_code(code: i32) -> Self {
        match code {
            0..=1 => Self::Clear,
            2..=3 => Self::Cloudy,
            45 | 48 => Self::Fog,
            51..=82 => Self::Rain,
            c if c >= 95 => Self::Storm,
            _ => Self::Clear,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_is_total() {
        for code in -1000..=1000 {
            // Must never panic and always carry a non-empty label.
            let info = classify(code);
            assert!(!info.description.is_empty(), "code {code}");
        }
    }

    #[test]
    fn classify_known_codes() {
        assert_eq!(classify(0), WeatherInfo::new(IconCategory::Sun, "Clear sky"));
        assert_eq!(classify(45).icon, IconCategory::Fog);
        assert_eq!(classify(55).icon, IconCategory::Drizzle);
        assert_eq!(classify(82).icon, IconCategory::Rain);
        assert_eq!(classify(95).icon, IconCategory::Storm);
    }

    #[test]
    fn classify_unknown_codes() {
        assert_eq!(classify(-1).icon, IconCategory::Unknown);
        assert_eq!(classify(4).icon, IconCategory::Unknown);
        assert_eq!(classify(999).icon, IconCategory::Unknown);
        assert_eq!(classify(4).description, "Unknown");
    }

    #[test]
    fn background_clear_and_cloudy() {
        assert_eq!(BackgroundCategory::from_code(0), BackgroundCategory::Clear);
        assert_eq!(BackgroundCategory::from_code(1), BackgroundCategory::Clear);
        assert_eq!(BackgroundCategory::from_code(2), BackgroundCategory::Cloudy);
        assert_eq!(BackgroundCategory::from_code(3), BackgroundCategory::Cloudy);
    }

    #[test]
    fn background_fog_is_not_swallowed_by_rain_range() {
        assert_eq!(BackgroundCategory::from_code(45), BackgroundCategory::Fog);
        assert_eq!(BackgroundCategory::from_code(48), BackgroundCategory::Fog);
    }

    #[test]
    fn background_rain_range() {
        assert_eq!(BackgroundCategory::from_code(51), BackgroundCategory::Rain);
        assert_eq!(BackgroundCategory::from_code(65), BackgroundCategory::Rain);
        assert_eq!(BackgroundCategory::from_code(82), BackgroundCategory::Rain);
    }

    #[test]
    fn background_storm_is_open_ended() {
        assert_eq!(BackgroundCategory::from_code(95), BackgroundCategory::Storm);
        assert_eq!(BackgroundCategory::from_code(96), BackgroundCategory::Storm);
        assert_eq!(BackgroundCategory::from_code(99), BackgroundCategory::Storm);
        assert_eq!(BackgroundCategory::from_code(200), BackgroundCategory::Storm);
    }

    #[test]
    fn background_unmatched_defaults_to_clear() {
        assert_eq!(BackgroundCategory::from_code(44), BackgroundCategory::Clear);
        assert_eq!(BackgroundCategory::from_code(83), BackgroundCategory::Clear);
        assert_eq!(BackgroundCategory::from_code(-7), BackgroundCategory::Clear);
    }
}

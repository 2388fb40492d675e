//! Terminal render target: the CLI's "container to render into".

use std::sync::{Mutex, MutexGuard, PoisonError};

use skycast_core::{BackgroundCategory, Error, IconCategory, Location, View, WeatherReport};

/// Renders reports to stdout and keeps the last suggestion list around so a
/// typed row number can be mapped back to a location.
#[derive(Default)]
pub struct TerminalView {
    suggestions: Mutex<Vec<Location>>,
}

impl TerminalView {
    /// Location for a 1-based row of the last rendered suggestion list.
    pub fn pick(&self, number: usize) -> Option<Location> {
        let rows = self.rows();
        number.checked_sub(1).and_then(|i| rows.get(i).cloned())
    }

    fn rows(&self) -> MutexGuard<'_, Vec<Location>> {
        self.suggestions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl View for TerminalView {
    fn loading(&self) {
        println!("Loading...");
    }

    fn report(&self, report: &WeatherReport) {
        let now = chrono::Local::now();

        println!();
        println!("{} — {}", report.current.city, now.format("%a %H:%M"));
        println!(
            "  {}  {}°C  {}",
            glyph(report.current.icon),
            report.current.temperature_c,
            report.current.description
        );
        println!(
            "  Humidity {}%   Wind {}",
            report.current.relative_humidity_pct, report.current.wind_speed_kmh
        );
        println!("  Ambient: {}", background_label(report.background));

        println!();
        println!("Hourly");
        match &report.hourly {
            Some(slots) => {
                for chunk in slots.chunks(6) {
                    let line = chunk
                        .iter()
                        .map(|s| format!("{:>2}:00 {} {:>3}°", s.hour, glyph(s.info.icon), s.temperature_c))
                        .collect::<Vec<_>>()
                        .join("   ");
                    println!("  {line}");
                }
            }
            None => println!("  Could not get hourly forecast."),
        }

        println!();
        println!("Daily");
        for day in &report.daily {
            println!(
                "  {} {} {:>3}° / {:>3}°  {}",
                day.label,
                glyph(day.info.icon),
                day.max_c,
                day.min_c,
                day.info.description
            );
        }
        println!();
    }

    fn error(&self, err: &Error) {
        println!("{err}");
    }

    fn suggestions(&self, items: &[Location]) {
        *self.rows() = items.to_vec();

        println!("Suggestions:");
        for (i, loc) in items.iter().enumerate() {
            println!("  {}) {}", i + 1, loc.label());
        }
    }

    fn clear_suggestions(&self) {
        self.rows().clear();
    }
}

fn glyph(icon: IconCategory) -> &'static str {
    match icon {
        IconCategory::Sun => "☀",
        IconCategory::CloudSun => "⛅",
        IconCategory::Cloud => "☁",
        IconCategory::Fog => "🌫",
        IconCategory::Drizzle => "🌦",
        IconCategory::Rain => "🌧",
        IconCategory::Storm => "⛈",
        IconCategory::Unknown => "?",
    }
}

fn background_label(bg: BackgroundCategory) -> &'static str {
    match bg {
        BackgroundCategory::Clear => "clear sky",
        BackgroundCategory::Cloudy => "clouds",
        BackgroundCategory::Rain => "rain",
        BackgroundCategory::Fog => "fog",
        BackgroundCategory::Storm => "storm",
    }
}

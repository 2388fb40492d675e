//! Interaction controller: wires user input to the geocoding and forecast
//! clients and renders through a [`View`].
//!
//! The controller owns the single debounce timer. Fetch cycles are spawned
//! tasks and are not cancelled by newer input; whichever cycle finishes last
//! overwrites the view (last write wins).

use std::sync::Arc;
use std::time::Duration;

use chrono::Local;
use tokio::sync::mpsc;
use tokio::time::{Instant, sleep_until};

use crate::align::DEFAULT_HOURLY_WINDOW;
use crate::error::Result;
use crate::forecast::ForecastSource;
use crate::geocode::GeocodeSource;
use crate::model::Location;
use crate::present::{self, View, WeatherReport};

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// User input, as seen by the controller.
#[derive(Debug, Clone)]
pub enum InputEvent {
    /// The search control was submitted with the given text.
    Submit(String),
    /// The search text changed; restart the debounce timer.
    TextChanged(String),
    /// A suggestion row was picked; fetch its coordinates directly.
    SuggestionPicked(Location),
    /// Click/focus left the search control; hide suggestions, fetch nothing.
    Dismiss,
}

enum CycleTarget {
    /// Needs geocoding first.
    City(String),
    /// Already has coordinates; skip re-resolution.
    Picked(Location),
}

pub struct SearchController<G, F, V> {
    geocode: Arc<G>,
    forecast: Arc<F>,
    view: Arc<V>,
    debounce: Duration,
    hourly_window: usize,
}

impl<G, F, V> SearchController<G, F, V>
where
    G: GeocodeSource + 'static,
    F: ForecastSource + 'static,
    V: View + 'static,
{
    pub fn new(geocode: G, forecast: F, view: V) -> Self {
        Self {
            geocode: Arc::new(geocode),
            forecast: Arc::new(forecast),
            view: Arc::new(view),
            debounce: DEFAULT_DEBOUNCE,
            hourly_window: DEFAULT_HOURLY_WINDOW,
        }
    }

    #[must_use]
    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    #[must_use]
    pub fn with_hourly_window(mut self, window: usize) -> Self {
        self.hourly_window = window;
        self
    }

    /// Shared handle to the render target, for hosts that read back view
    /// state (e.g. the CLI mapping a typed number to a suggestion row).
    pub fn view(&self) -> Arc<V> {
        Arc::clone(&self.view)
    }

    /// One resolve+fetch+render cycle, run to completion on the caller's
    /// task. This is the `Submit` path without the event loop around it.
    pub async fn fetch_city(&self, city: &str) {
        self.view.loading();
        let target = CycleTarget::City(city.trim().to_string());
        match run_cycle(&*self.geocode, &*self.forecast, target, self.hourly_window).await {
            Ok(report) => self.view.report(&report),
            Err(e) => self.view.error(&e),
        }
    }

    /// Drive the controller until the event channel closes.
    ///
    /// When `initial_city` is given, one fetch cycle starts immediately,
    /// with no user action required.
    pub async fn run(&self, initial_city: Option<&str>, mut events: mpsc::Receiver<InputEvent>) {
        if let Some(city) = initial_city {
            self.spawn_cycle(CycleTarget::City(city.to_string()));
        }

        // The pending debounce: deadline plus the text that armed it. There
        // is at most one; each keystroke replaces it wholesale.
        let mut pending: Option<(Instant, String)> = None;

        loop {
            let deadline = pending.as_ref().map(|(at, _)| *at);
            tokio::select! {
                ev = events.recv() => match ev {
                    Some(ev) => self.handle(ev, &mut pending),
                    None => break,
                },
                () = maybe_sleep(deadline), if deadline.is_some() => {
                    if let Some((_, text)) = pending.take() {
                        self.fire_suggestions(text);
                    }
                }
            }
        }
    }

    fn handle(&self, ev: InputEvent, pending: &mut Option<(Instant, String)>) {
        match ev {
            InputEvent::Submit(text) => {
                *pending = None;
                self.view.clear_suggestions();
                let city = text.trim().to_string();
                if !city.is_empty() {
                    self.spawn_cycle(CycleTarget::City(city));
                }
            }
            InputEvent::TextChanged(text) => {
                *pending = Some((Instant::now() + self.debounce, text));
            }
            InputEvent::SuggestionPicked(location) => {
                *pending = None;
                self.view.clear_suggestions();
                self.spawn_cycle(CycleTarget::Picked(location));
            }
            InputEvent::Dismiss => {
                *pending = None;
                self.view.clear_suggestions();
            }
        }
    }

    /// The debounce fired for `text`: request suggestions if the query is
    /// long enough, otherwise hide the list.
    fn fire_suggestions(&self, text: String) {
        let query = text.trim().to_string();
        if query.chars().count() < 3 {
            self.view.clear_suggestions();
            return;
        }

        let geocode = Arc::clone(&self.geocode);
        let view = Arc::clone(&self.view);
        tokio::spawn(async move {
            match geocode.suggest(&query).await {
                Ok(items) if !items.is_empty() => view.suggestions(&items),
                Ok(_) => view.clear_suggestions(),
                Err(e) => {
                    // Non-critical path: degrade to an empty list.
                    tracing::debug!(error = %e, query, "suggestion fetch failed");
                    view.clear_suggestions();
                }
            }
        });
    }

    fn spawn_cycle(&self, target: CycleTarget) {
        let geocode = Arc::clone(&self.geocode);
        let forecast = Arc::clone(&self.forecast);
        let view = Arc::clone(&self.view);
        let window = self.hourly_window;

        view.loading();
        tokio::spawn(async move {
            match run_cycle(&*geocode, &*forecast, target, window).await {
                Ok(report) => view.report(&report),
                Err(e) => view.error(&e),
            }
        });
    }
}

async fn maybe_sleep(deadline: Option<Instant>) {
    match deadline {
        Some(at) => sleep_until(at).await,
        None => std::future::pending().await,
    }
}

async fn run_cycle<G, F>(
    geocode: &G,
    forecast: &F,
    target: CycleTarget,
    hourly_window: usize,
) -> Result<WeatherReport>
where
    G: GeocodeSource + ?Sized,
    F: ForecastSource + ?Sized,
{
    let location = match target {
        CycleTarget::City(name) => geocode.resolve(&name).await?,
        CycleTarget::Picked(location) => location,
    };

    let bundle = forecast
        .fetch(location.latitude, location.longitude)
        .await?;

    let now = Local::now().naive_local();
    present::build_report(&location, &bundle, now, hourly_window)
}

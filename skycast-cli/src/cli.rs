use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt as _, BufReader};
use tokio::sync::mpsc;

use skycast_core::{Config, ForecastClient, GeocodingClient, InputEvent, SearchController};

use crate::view::TerminalView;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skycast", version, about = "Weather lookup in the terminal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show current, hourly and daily weather for a city.
    Show {
        /// City name; the configured default city when omitted.
        city: Option<String>,
    },

    /// Interactive search with suggestions.
    Search,

    /// Set the default city.
    Configure,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let config = Config::load()?;

        match self.command {
            Command::Show { city } => show(&config, city).await,
            Command::Search => search(&config).await,
            Command::Configure => configure(config),
        }
    }
}

fn controller(config: &Config) -> SearchController<GeocodingClient, ForecastClient, TerminalView> {
    SearchController::new(
        GeocodingClient::with_base_url(config.geocoding_url.clone()),
        ForecastClient::with_base_url(config.forecast_url.clone()),
        TerminalView::default(),
    )
    .with_debounce(config.debounce())
    .with_hourly_window(config.hourly_window)
}

async fn show(config: &Config, city: Option<String>) -> anyhow::Result<()> {
    let city = city.unwrap_or_else(|| config.default_city.clone());
    controller(config).fetch_city(&city).await;
    Ok(())
}

/// Line-driven search loop.
///
/// `text?` fetches suggestions for `text`, a bare number picks that
/// suggestion row, any other non-empty line is submitted as a city name, an
/// empty line hides the suggestions, EOF quits. The default city is fetched
/// once before any input.
async fn search(config: &Config) -> anyhow::Result<()> {
    let ctl = controller(config);
    let view = ctl.view();
    let (tx, rx) = mpsc::channel(16);

    println!("skycast search — `text?` suggests, a number picks, plain text submits, Ctrl-D quits.");

    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            let text = line.trim().to_string();

            let event = if text.is_empty() {
                InputEvent::Dismiss
            } else if let Ok(number) = text.parse::<usize>() {
                match view.pick(number) {
                    Some(location) => InputEvent::SuggestionPicked(location),
                    None => {
                        println!("No suggestion #{number}.");
                        continue;
                    }
                }
            } else if let Some(query) = text.strip_suffix('?') {
                InputEvent::TextChanged(query.to_string())
            } else {
                InputEvent::Submit(text)
            };

            if tx.send(event).await.is_err() {
                break;
            }
        }
        // Dropping tx ends the controller loop.
    });

    ctl.run(Some(&config.default_city), rx).await;
    Ok(())
}

fn configure(mut config: Config) -> anyhow::Result<()> {
    let city = inquire::Text::new("Default city:")
        .with_initial_value(&config.default_city)
        .prompt()?;

    let city = city.trim();
    if city.is_empty() {
        anyhow::bail!("The default city cannot be empty");
    }

    config.default_city = city.to_string();
    config.save()?;

    println!("Saved. Default city is now {}.", config.default_city);
    println!("Config file: {}", Config::config_file_path()?.display());
    Ok(())
}

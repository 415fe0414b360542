use std::sync::Arc;

use anyhow::{Context, Result, bail};
use chrono::Utc;
use clap::{Parser, Subcommand};
use inquire::{Select, Text};
use tokio::task::JoinSet;
use weatherboard_core::{
    Config, Coordinates, FetchError, TemperatureUnit, Theme, WeatherData, WeatherProvider,
    describe_error, find_nearby, provider_from_config,
};

use crate::{dashboard::Dashboard, output};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weatherboard", version, about = "Terminal weather dashboard")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show current conditions for a city.
    Current {
        /// City name, e.g. "Paris" or "Springfield, Illinois".
        city: String,
    },

    /// Show the daily forecast for a city.
    Forecast {
        city: String,

        /// Number of days, at most 5.
        #[arg(long, default_value_t = 5)]
        days: usize,
    },

    /// Search for cities by name.
    Search { query: String },

    /// Show current conditions at coordinates.
    Here {
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,

        #[arg(long, allow_negative_numbers = true)]
        lon: f64,
    },

    /// List known cities near coordinates.
    Nearby {
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,

        #[arg(long, allow_negative_numbers = true)]
        lon: f64,

        /// Search radius in km; defaults to the configured radius.
        #[arg(long)]
        radius: Option<f64>,
    },

    /// Compare current conditions across cities; defaults to favorites.
    Compare { cities: Vec<String> },

    /// Show or change preferences.
    Prefs {
        #[command(subcommand)]
        action: Option<PrefsCommand>,
    },

    /// Interactive dashboard.
    Dashboard,
}

#[derive(Debug, Subcommand)]
pub enum PrefsCommand {
    /// Print current preferences.
    Show,

    /// Set the temperature unit ("celsius" or "fahrenheit").
    Unit { unit: String },

    /// Set the theme ("light" or "dark"); toggles when omitted.
    Theme { theme: Option<String> },

    /// Set the fallback city; clears it when omitted.
    Default { city: Option<String> },

    /// Add a favorite city.
    Add { city: String },

    /// Remove a favorite city.
    Remove { city: String },

    /// Choose preferences interactively.
    Setup,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        let mut config = Config::load()?;
        let unit = config.temperature_unit;
        let theme = config.theme;

        match self.command {
            Command::Current { city } => {
                let provider = provider_from_config(&config);
                let (weather, note) = current_with_fallback(provider.as_ref(), &config, &city).await?;
                if let Some(note) = note {
                    println!("{note}");
                }
                println!("{}", output::render_weather(&weather, unit, theme, Utc::now()));
            }
            Command::Forecast { city, days } => {
                let forecast = provider_from_config(&config)
                    .forecast(&city, days)
                    .await
                    .with_context(|| format!("Failed to fetch forecast for '{city}'"))?;
                println!("{}", output::render_forecast(&city, &forecast, unit, theme));
            }
            Command::Search { query } => {
                let cities = provider_from_config(&config)
                    .search_cities(&query)
                    .await
                    .with_context(|| format!("Failed to search for '{query}'"))?;
                println!("{}", output::render_cities(&cities));
            }
            Command::Here { lat, lon } => {
                let coords = checked_coordinates(lat, lon)?;
                let weather = provider_from_config(&config)
                    .current_weather_at(coords)
                    .await
                    .with_context(|| format!("Failed to fetch weather at {coords}"))?;
                println!("{}", output::render_weather(&weather, unit, theme, Utc::now()));
            }
            Command::Nearby { lat, lon, radius } => {
                let origin = checked_coordinates(lat, lon)?;
                let radius = radius.unwrap_or(config.nearby_radius_km);
                println!("{}", output::render_nearby(&find_nearby(origin, radius), radius));
            }
            Command::Compare { cities } => {
                let cities = if cities.is_empty() { config.favorite_cities.clone() } else { cities };
                if cities.is_empty() {
                    bail!("No cities to compare. Pass city names or add favorites with `weatherboard prefs add <city>`.");
                }
                let provider: Arc<dyn WeatherProvider> = Arc::from(provider_from_config(&config));
                let rows = compare(provider, cities).await?;
                println!("{}", output::render_comparison(&rows, unit));
            }
            Command::Prefs { action } => {
                run_prefs(&mut config, action.unwrap_or(PrefsCommand::Show))?;
            }
            Command::Dashboard => {
                let provider: Arc<dyn WeatherProvider> = Arc::from(provider_from_config(&config));
                Dashboard::new(config, provider).run().await?;
            }
        }

        Ok(())
    }
}

fn run_prefs(config: &mut Config, action: PrefsCommand) -> Result<()> {
    match action {
        PrefsCommand::Show => {
            println!("{}", output::render_preferences(config));
            return Ok(());
        }
        PrefsCommand::Unit { unit } => {
            config.set_temperature_unit(TemperatureUnit::try_from(unit.as_str())?);
            println!("Temperature unit set to {}.", config.temperature_unit);
        }
        PrefsCommand::Theme { theme } => {
            match theme {
                Some(theme) => config.set_theme(Theme::try_from(theme.as_str())?),
                None => {
                    config.toggle_theme();
                }
            }
            println!("Theme set to {}.", config.theme);
        }
        PrefsCommand::Default { city } => {
            config.set_default_city(city.as_deref());
            match &config.default_city {
                Some(city) => println!("Default city set to {city}."),
                None => println!("Default city cleared."),
            }
        }
        PrefsCommand::Add { city } => {
            if config.add_favorite(&city) {
                println!("Added {} to favorites.", city.trim());
            } else {
                println!("{} is already a favorite.", city.trim());
            }
        }
        PrefsCommand::Remove { city } => {
            if config.remove_favorite(&city) {
                println!("Removed {} from favorites.", city.trim());
            } else {
                println!("{} is not a favorite.", city.trim());
            }
        }
        PrefsCommand::Setup => setup_interactively(config)?,
    }

    config.save()
}

fn setup_interactively(config: &mut Config) -> Result<()> {
    let unit = Select::new("Temperature unit:", TemperatureUnit::all().to_vec())
        .prompt()
        .context("Failed to read temperature unit")?;
    config.set_temperature_unit(unit);

    let theme = Select::new("Theme:", vec![Theme::Light, Theme::Dark])
        .prompt()
        .context("Failed to read theme")?;
    config.set_theme(theme);

    let default_city = Text::new("Default city (leave empty for none):")
        .with_initial_value(config.default_city.as_deref().unwrap_or_default())
        .prompt()
        .context("Failed to read default city")?;
    config.set_default_city(Some(default_city.as_str()));

    Ok(())
}

pub fn checked_coordinates(lat: f64, lon: f64) -> Result<Coordinates> {
    let coords = Coordinates::new(lat, lon);
    if !coords.is_valid() {
        bail!("Coordinates out of range: latitude must be within [-90, 90] and longitude within [-180, 180].");
    }
    Ok(coords)
}

/// Current weather for `city`, falling back once to the configured default
/// city when the name cannot be geocoded.
///
/// Returns a note for the user when the fallback was used.
pub async fn current_with_fallback(
    provider: &dyn WeatherProvider,
    config: &Config,
    city: &str,
) -> Result<(WeatherData, Option<String>)> {
    match provider.current_weather(city).await {
        Ok(weather) => Ok((weather, None)),
        Err(FetchError::NotFound(missing)) => {
            let fallback = config
                .default_city
                .as_deref()
                .filter(|fallback| !fallback.eq_ignore_ascii_case(city.trim()));

            let Some(fallback) = fallback else {
                return Err(FetchError::NotFound(missing).into());
            };

            tracing::info!(city, fallback, "city not found, using default city");
            let weather = provider
                .current_weather(fallback)
                .await
                .with_context(|| format!("Failed to fetch weather for default city '{fallback}'"))?;

            Ok((weather, Some(format!("'{}' was not found; showing {fallback} instead.", city.trim()))))
        }
        Err(err) => Err(anyhow::Error::new(err).context(format!("Failed to fetch weather for '{city}'"))),
    }
}

/// Fetch current weather for every city concurrently, keeping input order.
pub async fn compare(
    provider: Arc<dyn WeatherProvider>,
    cities: Vec<String>,
) -> Result<Vec<(String, Result<WeatherData, String>)>> {
    let mut tasks = JoinSet::new();
    for (index, city) in cities.iter().cloned().enumerate() {
        let provider = Arc::clone(&provider);
        tasks.spawn(async move {
            let result = provider.current_weather(&city).await;
            (index, result)
        });
    }

    let mut results: Vec<Option<Result<WeatherData, String>>> = cities.iter().map(|_| None).collect();
    while let Some(joined) = tasks.join_next().await {
        let (index, result) = joined.context("Comparison task failed")?;
        results[index] = Some(result.map_err(|err| describe_error(&err)));
    }

    Ok(cities
        .into_iter()
        .zip(results)
        .map(|(city, result)| {
            (city, result.unwrap_or_else(|| Err("No result".to_string())))
        })
        .collect())
}

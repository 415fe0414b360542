//! Interactive dashboard: a prompt loop over the same actions as the
//! one-shot subcommands.

use std::{fmt, sync::Arc};

use anyhow::{Context, Result};
use chrono::Utc;
use inquire::{CustomType, InquireError, Select, Text};
use weatherboard_core::{Config, NearbyCache, TemperatureUnit, WeatherProvider, describe_anyhow};

use crate::{
    cli::{checked_coordinates, compare, current_with_fallback},
    output,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Current,
    Forecast,
    Search,
    Nearby,
    CompareFavorites,
    AddFavorite,
    RemoveFavorite,
    ToggleUnit,
    ToggleTheme,
    Quit,
}

impl Action {
    const ALL: [Action; 10] = [
        Action::Current,
        Action::Forecast,
        Action::Search,
        Action::Nearby,
        Action::CompareFavorites,
        Action::AddFavorite,
        Action::RemoveFavorite,
        Action::ToggleUnit,
        Action::ToggleTheme,
        Action::Quit,
    ];
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Action::Current => "Current weather",
            Action::Forecast => "Forecast",
            Action::Search => "Search cities",
            Action::Nearby => "Nearby cities",
            Action::CompareFavorites => "Compare favorites",
            Action::AddFavorite => "Add favorite",
            Action::RemoveFavorite => "Remove favorite",
            Action::ToggleUnit => "Toggle °C/°F",
            Action::ToggleTheme => "Toggle light/dark theme",
            Action::Quit => "Quit",
        })
    }
}

pub struct Dashboard {
    config: Config,
    provider: Arc<dyn WeatherProvider>,
    nearby: NearbyCache,
}

impl Dashboard {
    pub fn new(config: Config, provider: Arc<dyn WeatherProvider>) -> Self {
        Self {
            config,
            provider,
            nearby: NearbyCache::default(),
        }
    }

    pub async fn run(mut self) -> Result<()> {
        loop {
            let action = match Select::new("What would you like to see?", Action::ALL.to_vec()).prompt() {
                Ok(action) => action,
                Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
                Err(err) => return Err(err).context("Failed to read menu selection"),
            };

            if action == Action::Quit {
                break;
            }

            match self.handle(action).await {
                Ok(()) => {}
                Err(err) if is_cancel(&err) => continue,
                Err(err) => {
                    tracing::debug!("{err:?}");
                    eprintln!("Error: {}", describe_anyhow(&err));
                }
            }
            println!();
        }

        Ok(())
    }

    async fn handle(&mut self, action: Action) -> Result<()> {
        let unit = self.config.temperature_unit;
        let theme = self.config.theme;

        match action {
            Action::Current => {
                let city = self.prompt_city()?;
                let (weather, note) = current_with_fallback(self.provider.as_ref(), &self.config, &city).await?;
                if let Some(note) = note {
                    println!("{note}");
                }
                println!("{}", output::render_weather(&weather, unit, theme, Utc::now()));
            }
            Action::Forecast => {
                let city = self.prompt_city()?;
                let days = CustomType::<usize>::new("Days (1-5):").with_default(5).prompt()?;
                let forecast = self
                    .provider
                    .forecast(&city, days)
                    .await
                    .with_context(|| format!("Failed to fetch forecast for '{city}'"))?;
                println!("{}", output::render_forecast(&city, &forecast, unit, theme));
            }
            Action::Search => {
                let query = Text::new("Search:").prompt()?;
                let cities = self.provider.search_cities(&query).await?;
                println!("{}", output::render_cities(&cities));
            }
            Action::Nearby => {
                let lat = CustomType::<f64>::new("Latitude:").prompt()?;
                let lon = CustomType::<f64>::new("Longitude:").prompt()?;
                let origin = checked_coordinates(lat, lon)?;
                let radius = self.config.nearby_radius_km;

                let ranked = self.nearby.get_or_compute(origin, radius, Utc::now());
                println!("{}", output::render_nearby(&ranked, radius));
            }
            Action::CompareFavorites => {
                if self.config.favorite_cities.is_empty() {
                    println!("No favorites yet. Add some with \"{}\".", Action::AddFavorite);
                    return Ok(());
                }
                let rows = compare(Arc::clone(&self.provider), self.config.favorite_cities.clone()).await?;
                println!("{}", output::render_comparison(&rows, unit));
            }
            Action::AddFavorite => {
                let city = self.prompt_city()?;
                if self.config.add_favorite(&city) {
                    self.config.save()?;
                    println!("Added {} to favorites.", city.trim());
                } else {
                    println!("{} is already a favorite.", city.trim());
                }
            }
            Action::RemoveFavorite => {
                if self.config.favorite_cities.is_empty() {
                    println!("No favorites to remove.");
                    return Ok(());
                }
                let city = Select::new("Remove which city?", self.config.favorite_cities.clone()).prompt()?;
                self.config.remove_favorite(&city);
                self.config.save()?;
                println!("Removed {city} from favorites.");
            }
            Action::ToggleUnit => {
                let next = match unit {
                    TemperatureUnit::Celsius => TemperatureUnit::Fahrenheit,
                    TemperatureUnit::Fahrenheit => TemperatureUnit::Celsius,
                };
                self.config.set_temperature_unit(next);
                self.config.save()?;
                println!("Temperature unit set to {next}.");
            }
            Action::ToggleTheme => {
                let theme = self.config.toggle_theme();
                self.config.save()?;
                println!("{}", output::heading(&format!("Theme set to {theme}."), theme));
            }
            Action::Quit => {}
        }

        Ok(())
    }

    /// Ask for a city, offering favorites first.
    fn prompt_city(&self) -> Result<String, InquireError> {
        const OTHER: &str = "Other…";

        if self.config.favorite_cities.is_empty() {
            return Text::new("City:").prompt();
        }

        let mut options = self.config.favorite_cities.clone();
        options.push(OTHER.to_string());

        let choice = Select::new("City:", options).prompt()?;
        if choice == OTHER {
            Text::new("City:").prompt()
        } else {
            Ok(choice)
        }
    }
}

fn is_cancel(err: &anyhow::Error) -> bool {
    matches!(
        err.downcast_ref::<InquireError>(),
        Some(InquireError::OperationCanceled | InquireError::OperationInterrupted)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_ends_with_quit() {
        assert_eq!(Action::ALL.last(), Some(&Action::Quit));
        assert_eq!(Action::ALL.len(), 10);
    }

    #[test]
    fn cancelled_prompts_are_not_errors() {
        let err = anyhow::Error::new(InquireError::OperationCanceled);
        assert!(is_cancel(&err));

        let err = anyhow::anyhow!("network down");
        assert!(!is_cancel(&err));
    }
}

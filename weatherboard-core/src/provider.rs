use crate::{
    Config,
    error::FetchError,
    model::{City, Coordinates, ForecastDay, WeatherData},
    provider::open_meteo::OpenMeteoProvider,
};
use async_trait::async_trait;
use std::{fmt::Debug, time::Duration};

pub mod open_meteo;

/// Longest forecast any provider is asked for.
pub const MAX_FORECAST_DAYS: usize = 5;

#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Cities matching a free-text query, best match first.
    async fn search_cities(&self, query: &str) -> Result<Vec<City>, FetchError>;

    /// Current conditions for the best geocoding match of `city`.
    async fn current_weather(&self, city: &str) -> Result<WeatherData, FetchError>;

    /// Current conditions at exact coordinates.
    async fn current_weather_at(&self, coords: Coordinates) -> Result<WeatherData, FetchError>;

    /// Daily forecast, at most `min(days, MAX_FORECAST_DAYS)` entries.
    async fn forecast(&self, city: &str, days: usize) -> Result<Vec<ForecastDay>, FetchError>;
}

/// Construct the provider described by `config`.
pub fn provider_from_config(config: &Config) -> Box<dyn WeatherProvider> {
    Box::new(
        OpenMeteoProvider::new(config.retry.clone())
            .with_timeout(Duration::from_millis(config.timeout_ms)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_from_config_uses_retry_policy() {
        let mut cfg = Config::default();
        cfg.retry.max_retries = 7;
        cfg.retry.initial_delay = Duration::from_millis(5);
        cfg.timeout_ms = 2500;

        let provider = provider_from_config(&cfg);
        let debug = format!("{provider:?}");
        assert!(debug.contains("max_retries: 7"), "{debug}");
        assert!(debug.contains("timeout: 2.5s"), "{debug}");
    }
}

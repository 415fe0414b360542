//! Core library for the `weatherboard` dashboard.
//!
//! This crate defines:
//! - A classification-aware retry executor for outbound requests
//! - The transport error taxonomy and its user-facing messages
//! - Nearby-city ranking over a bundled catalog, with an optional cache
//! - The weather provider abstraction and its Open-Meteo implementation
//! - Preferences & configuration handling, unit conversion, date formatting
//!
//! It is used by `weatherboard-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod error;
pub mod format;
pub mod geo;
pub mod model;
pub mod provider;
pub mod retry;
pub mod units;

pub use config::{Config, Theme};
pub use error::{
    Classification, FailureKind, FetchError, Transient, classify, describe_anyhow, describe_error,
};
pub use geo::{GeoPoint, NearbyCache, RankedPoint, find_nearby, find_nearby_in};
pub use model::{City, Coordinates, ForecastDay, WeatherData};
pub use provider::{WeatherProvider, provider_from_config};
pub use retry::{RetryPolicy, execute, execute_with};
pub use units::TemperatureUnit;

//! Open-Meteo weather and geocoding, with Nominatim for reverse geocoding.
//!
//! None of these services needs an API key.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::{Client, header::USER_AGENT};
use serde::{Deserialize, de::DeserializeOwned};

use crate::{
    config::DEFAULT_TIMEOUT_MS,
    error::FetchError,
    model::{
        City, Conditions, Coordinates, DailyTemperature, ForecastDay, Temperature, WeatherData,
        Wind,
    },
    retry::{self, RetryPolicy},
};

use super::{MAX_FORECAST_DAYS, WeatherProvider};

const CURRENT_FIELDS: &str = "temperature_2m,relative_humidity_2m,apparent_temperature,weather_code,wind_speed_10m,wind_direction_10m,pressure_msl";
const DAILY_FIELDS: &str = "temperature_2m_max,temperature_2m_min,weather_code,precipitation_sum,wind_speed_10m_max,wind_direction_10m_dominant";
const SEARCH_LIMIT: usize = 5;
const CURRENT_LOCATION: &str = "Current Location";
const DEFAULT_VISIBILITY_M: u32 = 10_000;

/// Per-request timeout used unless [`OpenMeteoProvider::with_timeout`] says otherwise.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(DEFAULT_TIMEOUT_MS);

/// Base URLs of the upstream services.
#[derive(Debug, Clone)]
pub struct Endpoints {
    pub forecast: String,
    pub geocoding: String,
    pub reverse: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            forecast: "https://api.open-meteo.com/v1/forecast".to_string(),
            geocoding: "https://geocoding-api.open-meteo.com/v1/search".to_string(),
            reverse: "https://nominatim.openstreetmap.org/reverse".to_string(),
        }
    }
}

impl Endpoints {
    /// All three services under one base URL, e.g. a local test server.
    pub fn with_base(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        Self {
            forecast: format!("{base}/v1/forecast"),
            geocoding: format!("{base}/v1/search"),
            reverse: format!("{base}/reverse"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct OpenMeteoProvider {
    http: Client,
    endpoints: Endpoints,
    retry: RetryPolicy,
    timeout: Duration,
}

impl OpenMeteoProvider {
    pub fn new(retry: RetryPolicy) -> Self {
        Self::with_endpoints(Endpoints::default(), retry)
    }

    pub fn with_endpoints(endpoints: Endpoints, retry: RetryPolicy) -> Self {
        Self {
            http: Client::new(),
            endpoints,
            retry,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Bound each HTTP attempt; an elapsed timeout is retried like any other
    /// transient failure.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// GET `url` and decode JSON, retrying transient failures.
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T, FetchError> {
        retry::execute(&self.retry, move || self.get_json_once(url, query)).await
    }

    async fn get_json_once<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T, FetchError> {
        tracing::debug!(url, "sending request");

        let res = self
            .http
            .get(url)
            .query(query)
            .header(USER_AGENT, concat!("weatherboard/", env!("CARGO_PKG_VERSION")))
            .timeout(self.timeout)
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await.map_err(FetchError::from_body_read)?;

        if !status.is_success() {
            return Err(FetchError::from_status(status.as_u16(), body));
        }

        serde_json::from_str(&body)
            .map_err(|err| FetchError::Decode(format!("invalid JSON from {url}: {err}")))
    }

    async fn geocode(&self, name: &str, count: usize) -> Result<Vec<City>, FetchError> {
        let query = [
            ("name", name.to_string()),
            ("count", count.to_string()),
            ("language", "en".to_string()),
            ("format", "json".to_string()),
        ];
        let parsed: GeoResponse = self.get_json(&self.endpoints.geocoding, &query).await?;

        Ok(parsed.results.into_iter().map(GeoResult::into_city).collect())
    }

    async fn geocode_first(&self, name: &str) -> Result<City, FetchError> {
        self.geocode(name, 1)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| FetchError::NotFound(name.to_string()))
    }

    async fn fetch_forecast_raw(&self, coords: Coordinates) -> Result<OmForecastResponse, FetchError> {
        let query = [
            ("latitude", coords.lat.to_string()),
            ("longitude", coords.lon.to_string()),
            ("current", CURRENT_FIELDS.to_string()),
            ("daily", DAILY_FIELDS.to_string()),
            ("timezone", "auto".to_string()),
        ];
        self.get_json(&self.endpoints.forecast, &query).await
    }

    async fn reverse_geocode(&self, coords: Coordinates) -> Result<NominatimAddress, FetchError> {
        let query = [
            ("lat", coords.lat.to_string()),
            ("lon", coords.lon.to_string()),
            ("format", "json".to_string()),
            ("accept-language", "en".to_string()),
        ];
        let parsed: NominatimResponse = self.get_json(&self.endpoints.reverse, &query).await?;

        parsed
            .address
            .ok_or_else(|| FetchError::Decode("reverse geocoding returned no address".to_string()))
    }
}

#[async_trait]
impl WeatherProvider for OpenMeteoProvider {
    async fn search_cities(&self, query: &str) -> Result<Vec<City>, FetchError> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }
        self.geocode(query, SEARCH_LIMIT).await
    }

    async fn current_weather(&self, city: &str) -> Result<WeatherData, FetchError> {
        let place = self.geocode_first(city.trim()).await?;
        let raw = self.fetch_forecast_raw(place.coordinates).await?;

        transform_weather(&raw, &place.name, &place.country)
    }

    async fn current_weather_at(&self, coords: Coordinates) -> Result<WeatherData, FetchError> {
        if !coords.is_valid() {
            return Err(FetchError::Application(format!("Coordinates out of range: {coords}")));
        }

        let raw = self.fetch_forecast_raw(coords).await?;

        // the display name is best effort; weather without it is still useful
        let (name, country) = match self.reverse_geocode(coords).await {
            Ok(address) => (address.place_name(), address.country_code_upper()),
            Err(err) => {
                tracing::warn!(error = %err, %coords, "reverse geocoding failed, using default name");
                (CURRENT_LOCATION.to_string(), String::new())
            }
        };

        transform_weather(&raw, &name, &country)
    }

    async fn forecast(&self, city: &str, days: usize) -> Result<Vec<ForecastDay>, FetchError> {
        let place = self.geocode_first(city.trim()).await?;
        let raw = self.fetch_forecast_raw(place.coordinates).await?;

        transform_forecast(&raw, days.min(MAX_FORECAST_DAYS))
    }
}

/// Map a WMO weather interpretation code to display conditions.
pub fn conditions_for_code(code: u16) -> Conditions {
    let (main, description, icon) = match code {
        0 => ("Clear", "clear sky", "01d"),
        1 => ("Clear", "mainly clear", "01d"),
        2 => ("Clouds", "partly cloudy", "02d"),
        3 => ("Clouds", "overcast", "03d"),
        45 => ("Fog", "foggy", "50d"),
        48 => ("Fog", "depositing rime fog", "50d"),
        51 => ("Drizzle", "light drizzle", "09d"),
        53 => ("Drizzle", "moderate drizzle", "09d"),
        55 => ("Drizzle", "dense drizzle", "09d"),
        61 => ("Rain", "slight rain", "10d"),
        63 => ("Rain", "moderate rain", "10d"),
        65 => ("Rain", "heavy rain", "10d"),
        71 => ("Snow", "slight snow", "13d"),
        73 => ("Snow", "moderate snow", "13d"),
        75 => ("Snow", "heavy snow", "13d"),
        77 => ("Snow", "snow grains", "13d"),
        80 => ("Rain", "slight rain showers", "09d"),
        81 => ("Rain", "moderate rain showers", "09d"),
        82 => ("Rain", "violent rain showers", "09d"),
        85 => ("Snow", "slight snow showers", "13d"),
        86 => ("Snow", "heavy snow showers", "13d"),
        95 => ("Thunderstorm", "thunderstorm", "11d"),
        96 => ("Thunderstorm", "thunderstorm with slight hail", "11d"),
        99 => ("Thunderstorm", "thunderstorm with heavy hail", "11d"),
        _ => ("Unknown", "unknown", "01d"),
    };

    Conditions {
        main: main.to_string(),
        description: description.to_string(),
        icon: icon.to_string(),
    }
}

fn transform_weather(
    raw: &OmForecastResponse,
    city: &str,
    country: &str,
) -> Result<WeatherData, FetchError> {
    let current = &raw.current;

    Ok(WeatherData {
        city: city.to_string(),
        country: country.to_string(),
        coordinates: Coordinates::new(raw.latitude, raw.longitude),
        temperature: Temperature {
            current: current.temperature_2m,
            feels_like: current.apparent_temperature,
            min: daily_value(&raw.daily.temperature_2m_min, 0, "temperature_2m_min")?,
            max: daily_value(&raw.daily.temperature_2m_max, 0, "temperature_2m_max")?,
        },
        conditions: conditions_for_code(current.weather_code),
        humidity: current.relative_humidity_2m,
        pressure: current.pressure_msl,
        wind: Wind {
            speed: current.wind_speed_10m,
            direction: current.wind_direction_10m,
        },
        visibility: DEFAULT_VISIBILITY_M,
        timestamp: Utc::now(),
    })
}

fn transform_forecast(raw: &OmForecastResponse, days: usize) -> Result<Vec<ForecastDay>, FetchError> {
    let daily = &raw.daily;

    daily
        .time
        .iter()
        .take(days)
        .enumerate()
        .map(|(i, date)| {
            let min = daily_value(&daily.temperature_2m_min, i, "temperature_2m_min")?;
            let max = daily_value(&daily.temperature_2m_max, i, "temperature_2m_max")?;
            let code = daily_value(&daily.weather_code, i, "weather_code")?;

            Ok(ForecastDay {
                date: date.clone(),
                temperature: DailyTemperature {
                    min,
                    max,
                    average: (min + max) / 2.0,
                },
                conditions: conditions_for_code(code),
                precipitation: daily.precipitation_sum.get(i).copied().flatten().unwrap_or(0.0),
                humidity: 0.0,
                wind: Wind {
                    speed: daily_value(&daily.wind_speed_10m_max, i, "wind_speed_10m_max")?,
                    direction: daily_value(
                        &daily.wind_direction_10m_dominant,
                        i,
                        "wind_direction_10m_dominant",
                    )?,
                },
            })
        })
        .collect()
}

fn daily_value<T: Copy>(values: &[T], index: usize, field: &str) -> Result<T, FetchError> {
    values
        .get(index)
        .copied()
        .ok_or_else(|| FetchError::Decode(format!("forecast response is missing daily {field}[{index}]")))
}

#[derive(Debug, Deserialize)]
struct OmCurrent {
    temperature_2m: f64,
    relative_humidity_2m: f64,
    apparent_temperature: f64,
    weather_code: u16,
    wind_speed_10m: f64,
    wind_direction_10m: f64,
    pressure_msl: f64,
}

#[derive(Debug, Deserialize)]
struct OmDaily {
    time: Vec<String>,
    temperature_2m_max: Vec<f64>,
    temperature_2m_min: Vec<f64>,
    weather_code: Vec<u16>,
    #[serde(default)]
    precipitation_sum: Vec<Option<f64>>,
    wind_speed_10m_max: Vec<f64>,
    wind_direction_10m_dominant: Vec<f64>,
}

#[derive(Debug, Deserialize)]
struct OmForecastResponse {
    latitude: f64,
    longitude: f64,
    current: OmCurrent,
    daily: OmDaily,
}

#[derive(Debug, Deserialize)]
struct GeoResult {
    name: String,
    #[serde(default)]
    country: String,
    admin1: Option<String>,
    latitude: f64,
    longitude: f64,
}

impl GeoResult {
    fn into_city(self) -> City {
        City {
            name: self.name,
            country: self.country,
            state: self.admin1,
            coordinates: Coordinates::new(self.latitude, self.longitude),
        }
    }
}

#[derive(Debug, Deserialize)]
struct GeoResponse {
    // absent when nothing matches
    #[serde(default)]
    results: Vec<GeoResult>,
}

#[derive(Debug, Default, Deserialize)]
struct NominatimAddress {
    city: Option<String>,
    town: Option<String>,
    village: Option<String>,
    county: Option<String>,
    state: Option<String>,
    country_code: Option<String>,
}

impl NominatimAddress {
    fn place_name(&self) -> String {
        [&self.city, &self.town, &self.village, &self.county, &self.state]
            .into_iter()
            .flatten()
            .find(|name| !name.trim().is_empty())
            .cloned()
            .unwrap_or_else(|| CURRENT_LOCATION.to_string())
    }

    fn country_code_upper(&self) -> String {
        self.country_code.as_deref().unwrap_or_default().to_uppercase()
    }
}

#[derive(Debug, Deserialize)]
struct NominatimResponse {
    address: Option<NominatimAddress>,
}

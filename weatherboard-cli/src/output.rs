//! Plain-text rendering of weather data for the terminal.

use chrono::{DateTime, Utc};
use weatherboard_core::{
    City, Config, ForecastDay, RankedPoint, TemperatureUnit, Theme, WeatherData,
    format::{format_date_time, format_relative_time},
    units::format_temperature,
};

/// Heading line, colored to suit the terminal theme.
pub fn heading(text: &str, theme: Theme) -> String {
    // 34 = blue reads well on light backgrounds, 96 = bright cyan on dark ones
    let color = match theme {
        Theme::Light => 34,
        Theme::Dark => 96,
    };
    format!("\x1b[1;{color}m{text}\x1b[0m")
}

fn place(city: &str, country: &str) -> String {
    if country.is_empty() {
        city.to_string()
    } else {
        format!("{city}, {country}")
    }
}

fn compass(degrees: f64) -> &'static str {
    const POINTS: [&str; 8] = ["N", "NE", "E", "SE", "S", "SW", "W", "NW"];
    let index = (degrees.rem_euclid(360.0) / 45.0).round() as usize % POINTS.len();
    POINTS[index]
}

pub fn render_weather(weather: &WeatherData, unit: TemperatureUnit, theme: Theme, now: DateTime<Utc>) -> String {
    let t = &weather.temperature;

    [
        heading(&place(&weather.city, &weather.country), theme),
        format!("  {} ({})", weather.conditions.main, weather.conditions.description),
        format!(
            "  Temperature: {} (feels like {})",
            format_temperature(t.current, unit),
            format_temperature(t.feels_like, unit)
        ),
        format!(
            "  Today: min {} / max {}",
            format_temperature(t.min, unit),
            format_temperature(t.max, unit)
        ),
        format!("  Humidity: {:.0}%   Pressure: {:.0} hPa", weather.humidity, weather.pressure),
        format!(
            "  Wind: {:.1} km/h {} ({:.0}°)",
            weather.wind.speed,
            compass(weather.wind.direction),
            weather.wind.direction
        ),
        format!(
            "  Updated: {} ({} UTC)",
            format_relative_time(&weather.timestamp, &now),
            format_date_time(&weather.timestamp)
        ),
    ]
    .join("\n")
}

pub fn render_forecast(city: &str, days: &[ForecastDay], unit: TemperatureUnit, theme: Theme) -> String {
    let title = heading(&format!("{}-day forecast for {city}", days.len()), theme);

    if days.is_empty() {
        return format!("{title}\n  No forecast data available.");
    }

    let header = format!("  {:<10}  {:>8}  {:>8}  {:>7}  {:>9}  Conditions", "Date", "Min", "Max", "Precip", "Wind");
    let rows = days.iter().map(|day| {
        format!(
            "  {:<10}  {:>8}  {:>8}  {:>5.1}mm  {:>4.0}km/h  {}",
            day.date,
            format_temperature(day.temperature.min, unit),
            format_temperature(day.temperature.max, unit),
            day.precipitation,
            day.wind.speed,
            day.conditions.description
        )
    });

    [title, header].into_iter().chain(rows).collect::<Vec<_>>().join("\n")
}

pub fn render_cities(cities: &[City]) -> String {
    if cities.is_empty() {
        return "No matching cities.".to_string();
    }

    cities
        .iter()
        .enumerate()
        .map(|(i, city)| format!("{:>2}. {} ({})", i + 1, city.label(), city.coordinates))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_nearby(ranked: &[RankedPoint], radius_km: f64) -> String {
    if ranked.is_empty() {
        return format!("No known cities within {radius_km:.0} km.");
    }

    ranked
        .iter()
        .map(|r| format!("{:>8.1} km  {}, {}", r.distance_km, r.point.name, r.point.country))
        .collect::<Vec<_>>()
        .join("\n")
}

/// One row per requested city, in the order given; failures show their message.
pub fn render_comparison(rows: &[(String, Result<WeatherData, String>)], unit: TemperatureUnit) -> String {
    let header = format!("{:<24}  {:>8}  {:>8}  {:>8}  {:>5}  Conditions", "City", "Now", "Min", "Max", "Hum.");
    let lines = rows.iter().map(|(requested, result)| match result {
        Ok(w) => format!(
            "{:<24}  {:>8}  {:>8}  {:>8}  {:>4.0}%  {}",
            truncate(&place(&w.city, &w.country), 24),
            format_temperature(w.temperature.current, unit),
            format_temperature(w.temperature.min, unit),
            format_temperature(w.temperature.max, unit),
            w.humidity,
            w.conditions.description
        ),
        Err(message) => format!("{:<24}  {message}", truncate(requested, 24)),
    });

    std::iter::once(header).chain(lines).collect::<Vec<_>>().join("\n")
}

pub fn render_preferences(config: &Config) -> String {
    let favorites = if config.favorite_cities.is_empty() {
        "(none)".to_string()
    } else {
        config.favorite_cities.join(", ")
    };

    format!(
        "Temperature unit: {}\nTheme: {}\nDefault city: {}\nFavorites: {}\nNearby radius: {:.0} km\nRequest timeout: {} ms\nRetries: {} (initial delay {} ms, max {} ms, x{})",
        config.temperature_unit,
        config.theme,
        config.default_city.as_deref().unwrap_or("(none)"),
        favorites,
        config.nearby_radius_km,
        config.timeout_ms,
        config.retry.max_retries,
        config.retry.initial_delay.as_millis(),
        config.retry.max_delay.as_millis(),
        config.retry.backoff_multiplier,
    )
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max.saturating_sub(1)).collect();
        format!("{cut}…")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use weatherboard_core::{
        Coordinates, find_nearby_in,
        geo::GeoPoint,
        model::{Conditions, DailyTemperature, Temperature, Wind},
    };

    fn weather(city: &str) -> WeatherData {
        WeatherData {
            city: city.to_string(),
            country: "France".to_string(),
            coordinates: Coordinates::new(48.85, 2.35),
            temperature: Temperature { current: 20.0, feels_like: 19.0, min: 12.0, max: 24.0 },
            conditions: Conditions {
                main: "Clear".into(),
                description: "clear sky".into(),
                icon: "01d".into(),
            },
            humidity: 55.0,
            pressure: 1013.0,
            wind: Wind { speed: 10.0, direction: 225.0 },
            visibility: 10_000,
            timestamp: Utc.with_ymd_and_hms(2024, 6, 1, 9, 30, 0).unwrap(),
        }
    }

    #[test]
    fn weather_is_rendered_in_preferred_unit() {
        let w = weather("Paris");
        let text = render_weather(&w, TemperatureUnit::Fahrenheit, Theme::Light, w.timestamp);

        assert!(text.contains("Paris, France"));
        assert!(text.contains("68.0°F"));
        assert!(text.contains("min 53.6°F / max 75.2°F"));
        assert!(text.contains("SW"));
        assert!(text.ends_with("Updated: just now (2024-06-01 09:30 UTC)"), "{text}");
    }

    #[test]
    fn compass_points() {
        assert_eq!(compass(0.0), "N");
        assert_eq!(compass(350.0), "N");
        assert_eq!(compass(90.0), "E");
        assert_eq!(compass(-90.0), "W");
    }

    #[test]
    fn forecast_table_has_one_row_per_day() {
        let day = ForecastDay {
            date: "2024-06-01".into(),
            temperature: DailyTemperature { min: 10.0, max: 20.0, average: 15.0 },
            conditions: Conditions {
                main: "Rain".into(),
                description: "slight rain".into(),
                icon: "10d".into(),
            },
            precipitation: 3.5,
            humidity: 0.0,
            wind: Wind { speed: 14.0, direction: 180.0 },
        };

        let text = render_forecast("Oslo", &[day.clone(), day], TemperatureUnit::Celsius, Theme::Dark);
        assert!(text.contains("2-day forecast for Oslo"));
        assert_eq!(text.matches("2024-06-01").count(), 2);
        assert!(text.contains("3.5mm"));

        let empty = render_forecast("Oslo", &[], TemperatureUnit::Celsius, Theme::Dark);
        assert!(empty.contains("No forecast data available."));
    }

    #[test]
    fn comparison_keeps_failures_in_place() {
        let rows = vec![
            ("Paris".to_string(), Ok(weather("Paris"))),
            ("Atlantis".to_string(), Err("Location not found. Please try a different city.".to_string())),
        ];
        let text = render_comparison(&rows, TemperatureUnit::Celsius);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("Paris, France"));
        assert!(lines[2].starts_with("Atlantis"));
        assert!(lines[2].contains("Location not found"));
    }

    #[test]
    fn nearby_lists_distances() {
        let catalog = [GeoPoint { name: "Next Door", country: "XX", state: None, latitude: 0.0, longitude: 0.1 }];
        let ranked = find_nearby_in(&catalog, Coordinates::new(0.0, 0.0), 100.0);

        assert_eq!(render_nearby(&ranked, 100.0), "    11.1 km  Next Door, XX");
        assert_eq!(render_nearby(&[], 50.0), "No known cities within 50 km.");
    }

    #[test]
    fn preferences_summary() {
        let mut cfg = Config::default();
        cfg.add_favorite("Paris");
        cfg.add_favorite("Oslo");

        let text = render_preferences(&cfg);
        assert!(text.contains("Temperature unit: celsius"));
        assert!(text.contains("Favorites: Paris, Oslo"));
        assert!(text.contains("Default city: (none)"));
        assert!(text.contains("initial delay 1000 ms"));
        assert!(text.contains("Request timeout: 10000 ms"));
    }

    #[test]
    fn long_names_are_truncated() {
        assert_eq!(truncate("Llanfairpwllgwyngyll", 10), "Llanfairp…");
        assert_eq!(truncate("Rome", 10), "Rome");
    }
}

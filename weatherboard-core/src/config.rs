use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{geo::DEFAULT_RADIUS_KM, retry::RetryPolicy, units::TemperatureUnit};

pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Theme {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            _ => Err(anyhow!("Unknown theme '{value}'. Supported themes: light, dark.")),
        }
    }
}

/// User preferences and tuning knobs, stored on disk as TOML.
///
/// Example:
/// ```toml
/// temperature_unit = "fahrenheit"
/// theme = "dark"
/// default_city = "Berlin"
/// favorite_cities = ["Paris", "Oslo"]
/// nearby_radius_km = 150.0
/// timeout_ms = 10000
///
/// [retry]
/// max_retries = 3
/// initial_delay_ms = 1000
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub temperature_unit: TemperatureUnit,
    pub theme: Theme,

    /// Used when a searched city cannot be found.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_city: Option<String>,

    /// In insertion order, no duplicates.
    pub favorite_cities: Vec<String>,

    pub nearby_radius_km: f64,

    /// Per-request HTTP timeout, applied to every attempt.
    pub timeout_ms: u64,

    pub retry: RetryPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            temperature_unit: TemperatureUnit::default(),
            theme: Theme::default(),
            default_city: None,
            favorite_cities: Vec::new(),
            nearby_radius_km: DEFAULT_RADIUS_KM,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            retry: RetryPolicy::default(),
        }
    }
}

impl Config {
    /// Add a favorite; returns false if it was already present.
    pub fn add_favorite(&mut self, city: &str) -> bool {
        let city = city.trim();
        if city.is_empty() || self.is_favorite(city) {
            return false;
        }
        self.favorite_cities.push(city.to_string());
        true
    }

    /// Remove a favorite; returns false if it was not present.
    pub fn remove_favorite(&mut self, city: &str) -> bool {
        let before = self.favorite_cities.len();
        self.favorite_cities.retain(|c| c != city.trim());
        self.favorite_cities.len() != before
    }

    pub fn is_favorite(&self, city: &str) -> bool {
        self.favorite_cities.iter().any(|c| c == city.trim())
    }

    pub fn set_temperature_unit(&mut self, unit: TemperatureUnit) {
        self.temperature_unit = unit;
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        self.theme
    }

    /// Set or clear (with `None` or a blank name) the fallback city.
    pub fn set_default_city(&mut self, city: Option<&str>) {
        self.default_city = city
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string);
    }

    /// Load config from disk, or return defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, return defaults.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        tracing::debug!(path = %path.display(), "configuration saved");
        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weatherboard", "weatherboard")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}

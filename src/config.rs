use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Deserialize;
use volhub_core::geo::Coordinates;

fn default_api_url() -> String {
    volhub_api::DEFAULT_API_URL.to_string()
}

fn default_geocoder_url() -> String {
    volhub_api::DEFAULT_GEOCODER_URL.to_string()
}

/// Optional settings read from `~/.config/volhub/config.toml`.
#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_geocoder_url")]
    pub geocoder_url: String,
    #[serde(default)]
    pub location: Option<HomeLocation>,
}

/// A fixed point used to annotate event listings with distances.
#[derive(Debug, Deserialize)]
pub struct HomeLocation {
    pub latitude: f64,
    pub longitude: f64,
}

impl HomeLocation {
    pub fn coordinates(&self) -> Coordinates {
        Coordinates {
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_url: default_api_url(),
            geocoder_url: default_geocoder_url(),
            location: None,
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let config_dir = dirs::config_dir().context("Could not determine the config directory")?;
    Ok(config_dir.join("volhub").join("config.toml"))
}

/// Loads the config file, falling back to defaults when it does not exist.
pub fn load_config() -> Result<Config> {
    let path = config_path()?;
    if !path.exists() {
        return Ok(Config::default());
    }
    let contents = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let config: Config = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    // --- Config ---

    #[test]
    fn empty_file_yields_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.api_url, volhub_api::DEFAULT_API_URL);
        assert_eq!(config.geocoder_url, volhub_api::DEFAULT_GEOCODER_URL);
        assert!(config.location.is_none());
    }

    #[test]
    fn partial_file_keeps_remaining_defaults() {
        let config: Config = toml::from_str(
            r#"
            api_url = "http://localhost:8080/v1"

            [location]
            latitude = 51.5074
            longitude = -0.1278
            "#,
        )
        .unwrap();
        assert_eq!(config.api_url, "http://localhost:8080/v1");
        assert_eq!(config.geocoder_url, volhub_api::DEFAULT_GEOCODER_URL);
        let home = config.location.unwrap();
        assert_eq!(home.coordinates().latitude, 51.5074);
    }
}

//! Configuration management for the Kisan Express advisory backend
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with KISAN_ prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Primary weather provider (weatherapi.com) configuration
    pub weatherapi: WeatherApiConfig,

    /// Secondary weather provider (Open-Meteo) configuration
    pub open_meteo: OpenMeteoConfig,

    /// Generative model (Gemini) configuration
    pub gemini: GeminiConfig,

    /// Outbound HTTP client configuration
    pub http: HttpConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WeatherApiConfig {
    /// API key; the primary provider is skipped entirely when unset or empty
    pub api_key: Option<String>,

    /// API base URL
    pub base_url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct OpenMeteoConfig {
    /// API base URL; Open-Meteo requires no credential
    pub base_url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GeminiConfig {
    /// API key; the heuristic advisory path is used when unset or empty
    pub api_key: Option<String>,

    /// API base URL
    pub base_url: String,

    /// Model identifier
    pub model: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct HttpConfig {
    /// Timeout applied to every outbound call, in seconds
    pub timeout_seconds: u64,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("KISAN_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 5000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("weatherapi.base_url", "https://api.weatherapi.com/v1")?
            .set_default("open_meteo.base_url", "https://api.open-meteo.com")?
            .set_default(
                "gemini.base_url",
                "https://generativelanguage.googleapis.com/v1beta",
            )?
            .set_default("gemini.model", "gemini-pro")?
            .set_default("http.timeout_seconds", 10)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (KISAN_ prefix)
            .add_source(
                Environment::with_prefix("KISAN")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Primary weather provider key, treating an empty string as unset
    pub fn weatherapi_key(&self) -> Option<&str> {
        self.weatherapi.api_key.as_deref().filter(|k| !k.is_empty())
    }

    /// Generative model key, treating an empty string as unset
    pub fn gemini_key(&self) -> Option<&str> {
        self.gemini.api_key.as_deref().filter(|k| !k.is_empty())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 5000,
            host: "0.0.0.0".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_keys(weatherapi: Option<&str>, gemini: Option<&str>) -> Config {
        Config {
            environment: "test".to_string(),
            server: ServerConfig::default(),
            weatherapi: WeatherApiConfig {
                api_key: weatherapi.map(str::to_string),
                base_url: "https://api.weatherapi.com/v1".to_string(),
            },
            open_meteo: OpenMeteoConfig {
                base_url: "https://api.open-meteo.com".to_string(),
            },
            gemini: GeminiConfig {
                api_key: gemini.map(str::to_string),
                base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
                model: "gemini-pro".to_string(),
            },
            http: HttpConfig { timeout_seconds: 10 },
        }
    }

    #[test]
    fn empty_keys_count_as_unconfigured() {
        let config = config_with_keys(Some(""), Some(""));
        assert_eq!(config.weatherapi_key(), None);
        assert_eq!(config.gemini_key(), None);
    }

    #[test]
    fn present_keys_are_returned() {
        let config = config_with_keys(Some("wapi-key"), None);
        assert_eq!(config.weatherapi_key(), Some("wapi-key"));
        assert_eq!(config.gemini_key(), None);
    }
}

//! Weather resolution service
//!
//! Resolves a district's current weather through an ordered provider
//! cascade: the credentialed primary first when configured, then the
//! credential-free secondary. Whichever provider answers is normalized
//! into the canonical snapshot shape.

use chrono::Utc;
use reqwest::Client;
use serde_json::Value;

use shared::{CurrentConditions, GpsCoordinates, WeatherSnapshot};

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::external::{open_meteo, weatherapi, OpenMeteoClient, WeatherApiClient};

/// Named provider strategies, in the order they may be attempted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeatherProvider {
    WeatherApi,
    OpenMeteo,
}

impl WeatherProvider {
    /// Identifier recorded on snapshots produced by this provider
    pub fn id(&self) -> &'static str {
        match self {
            WeatherProvider::WeatherApi => "weatherapi.com",
            WeatherProvider::OpenMeteo => "open-meteo",
        }
    }

    fn normalize(&self, raw: &Value) -> CurrentConditions {
        match self {
            WeatherProvider::WeatherApi => weatherapi::normalize_current(raw),
            WeatherProvider::OpenMeteo => open_meteo::normalize_current(raw),
        }
    }
}

/// Ordered provider cascade for a single request.
///
/// The primary appears only when its credential is configured; the
/// secondary is always the terminal attempt. Each provider is tried at
/// most once per request, with no retry-with-backoff: the providers are
/// redundant alternatives, not flaky peers worth hammering.
pub fn provider_cascade(primary_configured: bool) -> Vec<WeatherProvider> {
    if primary_configured {
        vec![WeatherProvider::WeatherApi, WeatherProvider::OpenMeteo]
    } else {
        vec![WeatherProvider::OpenMeteo]
    }
}

/// Weather resolution service
#[derive(Clone)]
pub struct WeatherService {
    primary: Option<WeatherApiClient>,
    secondary: OpenMeteoClient,
}

impl WeatherService {
    /// Create a new WeatherService from already-built provider clients
    pub fn new(primary: Option<WeatherApiClient>, secondary: OpenMeteoClient) -> Self {
        Self { primary, secondary }
    }

    /// Build the service from configuration.
    ///
    /// An unset or empty primary key leaves the primary provider out of
    /// the cascade entirely.
    pub fn from_config(http: Client, config: &Config) -> Self {
        let primary = config.weatherapi_key().map(|key| {
            WeatherApiClient::with_base_url(
                http.clone(),
                key.to_string(),
                config.weatherapi.base_url.clone(),
            )
        });
        let secondary = OpenMeteoClient::with_base_url(http, config.open_meteo.base_url.clone());
        Self::new(primary, secondary)
    }

    /// Fetch a normalized snapshot for an already-resolved district.
    ///
    /// Non-terminal provider failures (network error, timeout, non-2xx)
    /// are logged and absorbed by falling through the cascade; only the
    /// terminal provider's failure reaches the caller.
    pub async fn get_weather(
        &self,
        district: &str,
        coords: &GpsCoordinates,
        area: Option<&str>,
    ) -> AppResult<WeatherSnapshot> {
        let cascade = provider_cascade(self.primary.is_some());
        let terminal = cascade.len() - 1;

        for (position, provider) in cascade.into_iter().enumerate() {
            match self.attempt(provider, district, coords, area).await {
                Ok(raw) => {
                    let current = provider.normalize(&raw);
                    return Ok(WeatherSnapshot {
                        provider: provider.id().to_string(),
                        fetched_at: Utc::now(),
                        current,
                        raw,
                    });
                }
                Err(err) if position == terminal => return Err(err),
                Err(err) => {
                    tracing::warn!(
                        provider = provider.id(),
                        district,
                        error = %err,
                        "weather provider failed, falling back"
                    );
                }
            }
        }

        Err(AppError::WeatherUpstream(
            "provider cascade is empty".to_string(),
        ))
    }

    async fn attempt(
        &self,
        provider: WeatherProvider,
        district: &str,
        coords: &GpsCoordinates,
        area: Option<&str>,
    ) -> AppResult<Value> {
        match provider {
            WeatherProvider::WeatherApi => {
                let client = self.primary.as_ref().ok_or_else(|| {
                    AppError::Configuration("weatherapi.com key not configured".to_string())
                })?;
                client.current(district, coords, area).await
            }
            WeatherProvider::OpenMeteo => self.secondary.current(coords).await,
        }
    }
}

//! Open-Meteo client, the credential-free secondary weather provider

use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;

use shared::{CurrentConditions, GpsCoordinates};

use crate::error::{AppError, AppResult};
use crate::external::to_decimal;

/// Open-Meteo API client; no API key required
#[derive(Clone)]
pub struct OpenMeteoClient {
    client: Client,
    base_url: String,
}

/// The `current_weather` block of an Open-Meteo forecast payload
#[derive(Debug, Default, Deserialize)]
struct OmCurrentWeather {
    temperature: Option<f64>,
    windspeed: Option<f64>,
}

impl OpenMeteoClient {
    /// Create a new OpenMeteoClient
    pub fn new(client: Client) -> Self {
        Self::with_base_url(client, "https://api.open-meteo.com".to_string())
    }

    /// Create a new OpenMeteoClient with custom base URL (for testing)
    pub fn with_base_url(client: Client, base_url: String) -> Self {
        Self { client, base_url }
    }

    /// Fetch current weather by raw coordinates
    pub async fn current(&self, coords: &GpsCoordinates) -> AppResult<Value> {
        let url = format!("{}/v1/forecast", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("latitude", coords.latitude.to_string()),
                ("longitude", coords.longitude.to_string()),
                ("current_weather", "true".to_string()),
            ])
            .send()
            .await
            .map_err(|e| AppError::WeatherUpstream(format!("Open-Meteo request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::WeatherUpstream(format!(
                "Open-Meteo returned {}",
                response.status()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::WeatherUpstream(format!("Open-Meteo sent invalid JSON: {}", e)))
    }
}

/// Map a raw Open-Meteo payload onto the canonical current-conditions
/// shape. Open-Meteo's current-weather block exposes only temperature and
/// wind speed; the remaining fields stay null.
pub fn normalize_current(raw: &Value) -> CurrentConditions {
    let current: OmCurrentWeather = raw
        .get("current_weather")
        .cloned()
        .and_then(|block| serde_json::from_value(block).ok())
        .unwrap_or_default();

    CurrentConditions {
        temperature_2m: to_decimal(current.temperature),
        relative_humidity_2m: None,
        wind_speed_10m: to_decimal(current.windspeed),
        precipitation: None,
        cloudcover: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use serde_json::json;

    #[test]
    fn exposed_fields_map_and_the_rest_stay_null() {
        let raw = json!({
            "latitude": 9.6,
            "longitude": 76.5,
            "current_weather": {
                "temperature": 27.4,
                "windspeed": 9.8,
                "winddirection": 250,
                "weathercode": 3
            }
        });

        let current = normalize_current(&raw);
        assert_eq!(current.temperature_2m, Decimal::from_f64_retain(27.4));
        assert_eq!(current.wind_speed_10m, Decimal::from_f64_retain(9.8));
        assert!(current.relative_humidity_2m.is_none());
        assert!(current.precipitation.is_none());
        assert!(current.cloudcover.is_none());
    }

    #[test]
    fn missing_current_weather_block_yields_all_null() {
        let current = normalize_current(&json!({"error": true, "reason": "out of range"}));
        assert_eq!(current, CurrentConditions::default());
    }
}

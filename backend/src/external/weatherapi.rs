//! weatherapi.com client, the credentialed primary weather provider

use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;

use shared::{CurrentConditions, GpsCoordinates};

use crate::error::{AppError, AppResult};
use crate::external::to_decimal;

/// weatherapi.com API client
#[derive(Clone)]
pub struct WeatherApiClient {
    client: Client,
    api_key: String,
    base_url: String,
}

/// The `current` block of a weatherapi.com payload
#[derive(Debug, Default, Deserialize)]
struct WapiCurrent {
    temp_c: Option<f64>,
    humidity: Option<f64>,
    wind_kph: Option<f64>,
    precip_mm: Option<f64>,
    cloud: Option<f64>,
}

impl WeatherApiClient {
    /// Create a new WeatherApiClient
    pub fn new(client: Client, api_key: String) -> Self {
        Self::with_base_url(client, api_key, "https://api.weatherapi.com/v1".to_string())
    }

    /// Create a new WeatherApiClient with custom base URL (for testing)
    pub fn with_base_url(client: Client, api_key: String, base_url: String) -> Self {
        Self {
            client,
            api_key,
            base_url,
        }
    }

    /// Fetch current conditions for a district.
    ///
    /// The location query composes the free-text area qualifier with the
    /// district name when a qualifier is supplied; otherwise it falls back
    /// to the raw coordinates.
    pub async fn current(
        &self,
        district: &str,
        coords: &GpsCoordinates,
        area: Option<&str>,
    ) -> AppResult<Value> {
        let q = location_query(district, coords, area);
        let url = format!("{}/current.json", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("key", self.api_key.as_str()),
                ("q", q.as_str()),
                ("aqi", "no"),
            ])
            .send()
            .await
            .map_err(|e| {
                AppError::WeatherUpstream(format!("weatherapi.com request failed: {}", e))
            })?;

        if !response.status().is_success() {
            return Err(AppError::WeatherUpstream(format!(
                "weatherapi.com returned {}",
                response.status()
            )));
        }

        response.json().await.map_err(|e| {
            AppError::WeatherUpstream(format!("weatherapi.com sent invalid JSON: {}", e))
        })
    }
}

/// Location query sent to the provider: the area qualifier composed with
/// the district when present, else the raw coordinate pair
fn location_query(district: &str, coords: &GpsCoordinates, area: Option<&str>) -> String {
    match area {
        Some(area) => format!("{}, {}, Kerala, India", area, district),
        None => format!("{},{}", coords.latitude, coords.longitude),
    }
}

/// Map a raw weatherapi.com payload onto the canonical current-conditions
/// shape. Fields the payload does not carry stay null.
pub fn normalize_current(raw: &Value) -> CurrentConditions {
    let current: WapiCurrent = raw
        .get("current")
        .cloned()
        .and_then(|block| serde_json::from_value(block).ok())
        .unwrap_or_default();

    CurrentConditions {
        temperature_2m: to_decimal(current.temp_c),
        relative_humidity_2m: to_decimal(current.humidity),
        wind_speed_10m: to_decimal(current.wind_kph),
        precipitation: to_decimal(current.precip_mm),
        cloudcover: to_decimal(current.cloud),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use serde_json::json;

    #[test]
    fn area_qualifier_builds_a_free_text_query() {
        let coords = GpsCoordinates::new(Decimal::new(9_591566, 6), Decimal::new(76_522116, 6));
        assert_eq!(
            location_query("Kottayam", &coords, Some("Pala")),
            "Pala, Kottayam, Kerala, India"
        );
    }

    #[test]
    fn without_qualifier_the_raw_coordinates_are_used() {
        let coords = GpsCoordinates::new(Decimal::new(9_591566, 6), Decimal::new(76_522116, 6));
        assert_eq!(
            location_query("Kottayam", &coords, None),
            "9.591566,76.522116"
        );
    }

    #[test]
    fn full_payload_maps_every_field() {
        let raw = json!({
            "location": {"name": "Kottayam", "region": "Kerala"},
            "current": {
                "temp_c": 29.3,
                "humidity": 82,
                "wind_kph": 13.0,
                "precip_mm": 1.2,
                "cloud": 50,
                "condition": {"text": "Partly cloudy"}
            }
        });

        let current = normalize_current(&raw);
        assert_eq!(current.temperature_2m, Decimal::from_f64_retain(29.3));
        assert_eq!(current.relative_humidity_2m, Some(Decimal::from(82)));
        assert_eq!(current.wind_speed_10m, Decimal::from_f64_retain(13.0));
        assert_eq!(current.precipitation, Decimal::from_f64_retain(1.2));
        assert_eq!(current.cloudcover, Some(Decimal::from(50)));
    }

    #[test]
    fn missing_fields_become_null() {
        let raw = json!({
            "current": {"temp_c": 31.0}
        });

        let current = normalize_current(&raw);
        assert!(current.temperature_2m.is_some());
        assert!(current.relative_humidity_2m.is_none());
        assert!(current.wind_speed_10m.is_none());
        assert!(current.precipitation.is_none());
        assert!(current.cloudcover.is_none());
    }

    #[test]
    fn missing_current_block_yields_all_null() {
        let current = normalize_current(&json!({"error": {"code": 1006}}));
        assert_eq!(current, CurrentConditions::default());
    }
}

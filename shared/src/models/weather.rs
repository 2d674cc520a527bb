//! Weather data models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Current conditions normalized across weather providers.
///
/// All five keys are always present in the serialized form; a provider
/// that does not expose a field yields `null`, never a missing key.
/// Consumers must treat `null` as "unknown", not as zero.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CurrentConditions {
    /// Air temperature in degrees Celsius
    #[serde(default)]
    pub temperature_2m: Option<Decimal>,
    /// Relative humidity in percent
    #[serde(default)]
    pub relative_humidity_2m: Option<Decimal>,
    /// Wind speed in km/h
    #[serde(default)]
    pub wind_speed_10m: Option<Decimal>,
    /// Precipitation in mm
    #[serde(default)]
    pub precipitation: Option<Decimal>,
    /// Cloud cover in percent
    #[serde(default)]
    pub cloudcover: Option<Decimal>,
}

/// A provider-independent weather snapshot for one request.
///
/// `raw` carries the untouched provider payload for diagnostics and
/// display; `current` is the canonical normalized view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    /// Identifier of the provider that produced this snapshot
    pub provider: String,
    #[serde(rename = "fetchedAt")]
    pub fetched_at: DateTime<Utc>,
    pub current: CurrentConditions,
    /// Opaque original provider payload
    #[serde(default)]
    pub raw: serde_json::Value,
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn dec(n: i64, scale: u32) -> Option<Decimal> {
        Some(Decimal::new(n, scale))
    }

    #[test]
    fn null_fields_serialize_as_null_not_absent() {
        let current = CurrentConditions {
            temperature_2m: dec(280, 1),
            ..Default::default()
        };
        let value = serde_json::to_value(&current).unwrap();
        let map = value.as_object().unwrap();
        assert_eq!(map.len(), 5);
        assert!(map["relative_humidity_2m"].is_null());
        assert!(map["temperature_2m"].is_number());
    }

    #[test]
    fn snapshot_uses_camel_case_fetched_at() {
        let snapshot = WeatherSnapshot {
            provider: "open-meteo".to_string(),
            fetched_at: Utc::now(),
            current: CurrentConditions::default(),
            raw: serde_json::json!({"current_weather": {"temperature": 27.4}}),
        };
        let value = serde_json::to_value(&snapshot).unwrap();
        assert!(value.get("fetchedAt").is_some());
        assert_eq!(value["provider"], "open-meteo");
    }

    #[test]
    fn snapshot_round_trips_through_request_bodies() {
        let json = r#"{
            "provider": "weatherapi.com",
            "fetchedAt": "2024-06-01T06:30:00Z",
            "current": {
                "temperature_2m": 29.1,
                "relative_humidity_2m": 84,
                "wind_speed_10m": 11.2,
                "precipitation": 0.4,
                "cloudcover": 75
            },
            "raw": {"location": {"name": "Kottayam"}}
        }"#;
        let snapshot: WeatherSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.provider, "weatherapi.com");
        assert_eq!(snapshot.current.relative_humidity_2m, dec(84, 0));
        assert_eq!(snapshot.raw["location"]["name"], "Kottayam");
    }

    fn maybe_value() -> impl Strategy<Value = Option<Decimal>> {
        prop_oneof![
            Just(None),
            (-500i64..=1200i64).prop_map(|n| Some(Decimal::new(n, 1))),
        ]
    }

    proptest! {
        /// Every serialized `current` object has exactly the five
        /// documented keys, each a number or null.
        #[test]
        fn current_always_has_exactly_five_keys(
            temperature in maybe_value(),
            humidity in maybe_value(),
            wind in maybe_value(),
            precipitation in maybe_value(),
            cloud in maybe_value(),
        ) {
            let current = CurrentConditions {
                temperature_2m: temperature,
                relative_humidity_2m: humidity,
                wind_speed_10m: wind,
                precipitation,
                cloudcover: cloud,
            };
            let value = serde_json::to_value(&current).unwrap();
            let map = value.as_object().unwrap();
            prop_assert_eq!(map.len(), 5);
            for key in [
                "temperature_2m",
                "relative_humidity_2m",
                "wind_speed_10m",
                "precipitation",
                "cloudcover",
            ] {
                let field = map.get(key).expect("key must be present");
                prop_assert!(field.is_number() || field.is_null());
            }
        }
    }
}

//! Common types used across the platform

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// GPS coordinates
///
/// Serialized as `{ "lat": .., "lon": .. }`, the shape the advisory API
/// exchanges with clients.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GpsCoordinates {
    #[serde(rename = "lat")]
    pub latitude: Decimal,
    #[serde(rename = "lon")]
    pub longitude: Decimal,
}

impl GpsCoordinates {
    pub fn new(latitude: Decimal, longitude: Decimal) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Supported languages
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    #[serde(rename = "en")]
    English,
    #[serde(rename = "ml")]
    Malayalam,
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Malayalam => "ml",
        }
    }

    /// English name of the language, used when instructing the model
    /// which language to answer in.
    pub fn display_name(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Malayalam => "Malayalam",
        }
    }
}

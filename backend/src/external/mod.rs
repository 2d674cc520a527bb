//! External API integrations

pub mod gemini;
pub mod open_meteo;
pub mod weatherapi;

pub use gemini::GeminiClient;
pub use open_meteo::OpenMeteoClient;
pub use weatherapi::WeatherApiClient;

use rust_decimal::Decimal;

/// Convert an optional provider float into a decimal, keeping null as null
pub(crate) fn to_decimal(value: Option<f64>) -> Option<Decimal> {
    value.and_then(Decimal::from_f64_retain)
}

//! Error handling for the Kisan Express advisory backend
//!
//! Provides consistent error responses in English and Malayalam

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Client input errors
    #[error("required field missing: {0}")]
    MissingField(&'static str),

    #[error("unknown district: {0}")]
    UnknownDistrict(String),

    #[error("validation error: {message}")]
    Validation {
        field: &'static str,
        message: String,
        message_ml: String,
    },

    // External service errors
    #[error("weather providers unavailable: {0}")]
    WeatherUpstream(String),

    #[error("generative model error: {0}")]
    ModelTransport(String),

    #[error("configuration error: {0}")]
    Configuration(String),

    // Internal errors
    #[error("internal server error: {0}")]
    Internal(String),

    #[error("internal server error")]
    InternalError(#[from] anyhow::Error),
}

/// Error response structure
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message_en: String,
    pub message_ml: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_detail) = match &self {
            AppError::MissingField(field) => (
                StatusCode::BAD_REQUEST,
                ErrorDetail {
                    code: "MISSING_FIELD".to_string(),
                    message_en: format!("{} required", field),
                    message_ml: format!("{} നിർബന്ധമാണ്", field),
                    field: Some(field.to_string()),
                },
            ),
            AppError::UnknownDistrict(district) => (
                StatusCode::BAD_REQUEST,
                ErrorDetail {
                    code: "UNKNOWN_DISTRICT".to_string(),
                    message_en: format!("Unknown district: {}", district),
                    message_ml: format!("അജ്ഞാത ജില്ല: {}", district),
                    field: Some("district".to_string()),
                },
            ),
            AppError::Validation {
                field,
                message,
                message_ml,
            } => (
                StatusCode::BAD_REQUEST,
                ErrorDetail {
                    code: "VALIDATION_ERROR".to_string(),
                    message_en: message.clone(),
                    message_ml: message_ml.clone(),
                    field: Some(field.to_string()),
                },
            ),
            AppError::WeatherUpstream(msg) => (
                StatusCode::BAD_GATEWAY,
                ErrorDetail {
                    code: "WEATHER_UPSTREAM_ERROR".to_string(),
                    message_en: format!("Weather providers unavailable: {}", msg),
                    message_ml: "കാലാവസ്ഥാ സേവനം താൽക്കാലികമായി ലഭ്യമല്ല".to_string(),
                    field: None,
                },
            ),
            AppError::ModelTransport(msg) => (
                StatusCode::BAD_GATEWAY,
                ErrorDetail {
                    code: "MODEL_API_ERROR".to_string(),
                    message_en: format!("Generative model error: {}", msg),
                    message_ml: "AI സേവനത്തിൽ പിശക് സംഭവിച്ചു".to_string(),
                    field: None,
                },
            ),
            AppError::Configuration(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail {
                    code: "CONFIGURATION_ERROR".to_string(),
                    message_en: format!("Configuration error: {}", msg),
                    message_ml: format!("ക്രമീകരണത്തിൽ പിശക്: {}", msg),
                    field: None,
                },
            ),
            AppError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail {
                    code: "INTERNAL_ERROR".to_string(),
                    message_en: msg.clone(),
                    message_ml: "സെർവറിൽ ആന്തരിക പിശക്".to_string(),
                    field: None,
                },
            ),
            AppError::InternalError(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail {
                    code: "INTERNAL_ERROR".to_string(),
                    message_en: "An internal server error occurred".to_string(),
                    message_ml: "സെർവറിൽ ആന്തരിക പിശക്".to_string(),
                    field: None,
                },
            ),
        };

        // Log the error for debugging
        tracing::error!("Error: {:?}", self);

        (status, Json(ErrorResponse { error: error_detail })).into_response()
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;

//! HTTP handlers for the crop advisory endpoint

use axum::{extract::State, Json};
use serde::Deserialize;

use shared::{validate_district, CropSuggestionResponse, GpsCoordinates, WeatherSnapshot};

use crate::error::{AppError, AppResult};
use crate::services::AdvisoryService;
use crate::AppState;

/// Request body for crop suggestions
#[derive(Debug, Deserialize)]
pub struct CropSuggestInput {
    pub district: Option<String>,
    pub coords: Option<GpsCoordinates>,
    pub weather: Option<WeatherSnapshot>,
}

/// Suggest crops for a district given its current weather.
///
/// Always answers 2xx once the inputs validate; model outages degrade to
/// the rule-based generator instead of surfacing an error.
pub async fn suggest_crops(
    State(state): State<AppState>,
    Json(input): Json<CropSuggestInput>,
) -> AppResult<Json<CropSuggestionResponse>> {
    let district = input
        .district
        .filter(|d| !d.is_empty())
        .ok_or(AppError::MissingField("district"))?;
    validate_district(&district).map_err(|msg| AppError::Validation {
        field: "district",
        message: msg.to_string(),
        message_ml: "ജില്ലയുടെ പേര് അസാധുവാണ്".to_string(),
    })?;
    let coords = input.coords.ok_or(AppError::MissingField("coords"))?;
    let weather = input.weather.ok_or(AppError::MissingField("weather"))?;

    let service = AdvisoryService::from_config(state.http.clone(), &state.config);
    let response = service.suggest_crops(&district, &coords, &weather).await?;
    Ok(Json(response))
}

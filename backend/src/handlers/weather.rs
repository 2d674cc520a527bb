//! HTTP handlers for the weather endpoint

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use shared::{validate_district, WeatherSnapshot};

use crate::error::{AppError, AppResult};
use crate::services::WeatherService;
use crate::AppState;

/// Query parameters for the weather endpoint
#[derive(Debug, Deserialize)]
pub struct WeatherQuery {
    pub district: Option<String>,
    /// Optional free-text qualifier refining the location within the
    /// district, e.g. a town or panchayat name
    pub area: Option<String>,
}

/// Fetch normalized current weather for a district
pub async fn get_weather(
    State(state): State<AppState>,
    Query(query): Query<WeatherQuery>,
) -> AppResult<Json<WeatherSnapshot>> {
    let district = query
        .district
        .filter(|d| !d.is_empty())
        .ok_or(AppError::MissingField("district"))?;
    validate_district(&district).map_err(|msg| AppError::Validation {
        field: "district",
        message: msg.to_string(),
        message_ml: "ജില്ലയുടെ പേര് അസാധുവാണ്".to_string(),
    })?;
    let coords = state.regions.resolve(&district)?;
    let area = query.area.as_deref().filter(|a| !a.is_empty());

    let service = WeatherService::from_config(state.http.clone(), &state.config);
    let snapshot = service.get_weather(&district, &coords, area).await?;
    Ok(Json(snapshot))
}

//! HTTP handlers for the expert query endpoint

use axum::{extract::State, Json};

use shared::QueryAnswer;

use crate::error::AppResult;
use crate::services::expert::AskQueryInput;
use crate::services::ExpertService;
use crate::AppState;

/// Answer a free-text farmer question through the generative model
pub async fn ask_query(
    State(state): State<AppState>,
    Json(input): Json<AskQueryInput>,
) -> AppResult<Json<QueryAnswer>> {
    let service = ExpertService::from_config(state.http.clone(), &state.config);
    let answer = service.answer(input).await?;
    Ok(Json(answer))
}

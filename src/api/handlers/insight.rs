use crate::api::handlers::AppState;
use crate::api::models::insight::{InsightRequest, InsightResponse};
use crate::error::AppError;
use axum::{
    extract::{rejection::JsonRejection, State},
    response::Json,
};

pub async fn create_insight(
    State(state): State<AppState>,
    body: Result<Json<InsightRequest>, JsonRejection>,
) -> Result<Json<InsightResponse>, AppError> {
    let Json(request) = body.map_err(|rejection| AppError::InvalidInput(rejection.body_text()))?;
    let display_config = state.insights.answer(&request.prompt).await?;
    Ok(Json(InsightResponse { display_config }))
}

//! HTTP handlers for the recommendation flow

use axum::{extract::State, Json};
use serde_json::Value;
use uuid::Uuid;

use shared::{FlowOutcome, RecommendationResponse};

use crate::error::AppResult;
use crate::services::RecommendationService;
use crate::AppState;

/// User-facing message when the model call fails.
const FAILURE_MESSAGE: &str = "Failed to get recommendations from AI. Please try again later.";

/// Produce personalized recommendations for a farm profile submission.
pub async fn personalized_recommendations(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> AppResult<Json<FlowOutcome<RecommendationResponse>>> {
    let request_id = Uuid::new_v4();
    tracing::info!(%request_id, "recommendation flow started");

    let service = RecommendationService::new(state.model.clone());
    let result = super::with_flow_timeout(
        &state.config,
        "recommendation flow",
        service.personalized_recommendations(&payload),
    )
    .await;

    let outcome = super::flow_boundary("recommendation", result, FAILURE_MESSAGE)?;
    tracing::info!(%request_id, success = outcome.is_success(), "recommendation flow finished");
    Ok(Json(outcome))
}

//! HTTP handlers for the yield-prediction flow

use axum::{extract::State, Json};
use serde_json::Value;
use uuid::Uuid;

use shared::{FlowOutcome, YieldPredictionResponse};

use crate::error::AppResult;
use crate::services::YieldPredictionService;
use crate::AppState;

/// User-facing message when the model call fails.
const FAILURE_MESSAGE: &str = "Failed to get prediction from AI. Please try again later.";

/// Predict crop yield from an uploaded agricultural dataset.
pub async fn predict_yield(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> AppResult<Json<FlowOutcome<YieldPredictionResponse>>> {
    let request_id = Uuid::new_v4();
    tracing::info!(%request_id, "yield prediction flow started");

    let service =
        YieldPredictionService::new(state.model.clone(), state.config.ai.max_tool_rounds);
    let result = super::with_flow_timeout(
        &state.config,
        "yield prediction flow",
        service.predict_from_payload(&payload),
    )
    .await;

    let outcome = super::flow_boundary("yield_prediction", result, FAILURE_MESSAGE)?;
    tracing::info!(%request_id, success = outcome.is_success(), "yield prediction flow finished");
    Ok(Json(outcome))
}

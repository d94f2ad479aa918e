//! HTTP handlers for the report summarization flow

use axum::{extract::State, Json};
use serde_json::Value;
use uuid::Uuid;

use shared::{FlowOutcome, ReportSummaryResponse};

use crate::error::AppResult;
use crate::services::ReportSummaryService;
use crate::AppState;

/// User-facing message when the model call fails.
const FAILURE_MESSAGE: &str = "Failed to summarize the report. Please try again later.";

/// Summarize an agricultural report.
pub async fn summarize_report(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> AppResult<Json<FlowOutcome<ReportSummaryResponse>>> {
    let request_id = Uuid::new_v4();
    tracing::info!(%request_id, "report summary flow started");

    let service = ReportSummaryService::new(state.model.clone());
    let result = super::with_flow_timeout(
        &state.config,
        "report summary flow",
        service.summarize_from_payload(&payload),
    )
    .await;

    let outcome = super::flow_boundary("report_summary", result, FAILURE_MESSAGE)?;
    tracing::info!(%request_id, success = outcome.is_success(), "report summary flow finished");
    Ok(Json(outcome))
}

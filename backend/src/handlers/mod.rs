//! HTTP handlers for the CropCast API

pub mod health;
pub mod recommendation;
pub mod report_summary;
pub mod yield_prediction;

pub use health::*;
pub use recommendation::*;
pub use report_summary::*;
pub use yield_prediction::*;

use std::future::Future;

use shared::FlowOutcome;

use crate::config::Config;
use crate::error::{AppError, AppResult};

/// Convert a finished flow into the response envelope.
///
/// Validation rejections and remote-call failures become `{failure}`
/// payloads with HTTP 200, matching what the browser forms consume. Only
/// internal errors (template or configuration bugs) escape as HTTP errors.
pub(crate) fn flow_boundary<T>(
    flow: &str,
    result: AppResult<T>,
    failure_message: &str,
) -> AppResult<FlowOutcome<T>> {
    match result {
        Ok(value) => Ok(FlowOutcome::success(value)),
        Err(AppError::Validation(rejection)) => {
            tracing::warn!(
                flow,
                violations = rejection.violations.len(),
                "rejected invalid submission"
            );
            Ok(FlowOutcome::invalid(rejection.violations))
        }
        Err(error) if error.is_flow_failure() => {
            tracing::error!(flow, %error, "flow failed");
            Ok(FlowOutcome::failure(failure_message))
        }
        Err(error) => Err(error),
    }
}

/// Run a flow under the wall-clock budget from configuration.
pub(crate) async fn with_flow_timeout<T, F>(config: &Config, flow: &str, future: F) -> AppResult<T>
where
    F: Future<Output = AppResult<T>>,
{
    match tokio::time::timeout(config.ai.flow_timeout(), future).await {
        Ok(result) => result,
        Err(_) => Err(AppError::Transport(format!(
            "{} timed out after {}s",
            flow, config.ai.flow_timeout_secs
        ))),
    }
}

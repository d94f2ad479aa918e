//! Error handling for the CropCast backend
//!
//! Flow errors in the validation/model/tool/transport categories are
//! converted to the `{failure}` envelope at the flow boundary and never
//! surface here. Everything that does reach `IntoResponse` is a structured
//! HTTP error.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use shared::ValidationRejection;

use crate::prompts::PromptError;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    /// Input failed schema validation; nothing was sent to the model.
    #[error(transparent)]
    Validation(#[from] ValidationRejection),

    /// The model returned no usable output: blocked prompt, empty candidate,
    /// malformed JSON, or JSON that does not match the response schema.
    #[error("Model output error: {0}")]
    ModelOutput(String),

    /// A model-requested tool failed. Terminal for the whole flow.
    #[error("Tool execution error: {0}")]
    ToolExecution(String),

    /// Network failure, non-success status, or timeout talking to the
    /// model endpoint.
    #[error("Transport error: {0}")]
    Transport(String),

    /// A prompt template referenced a field the caller did not supply.
    #[error(transparent)]
    Template(#[from] PromptError),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl AppError {
    /// Errors that become a `{failure}` envelope instead of an HTTP error.
    pub fn is_flow_failure(&self) -> bool {
        matches!(
            self,
            AppError::ModelOutput(_) | AppError::ToolExecution(_) | AppError::Transport(_)
        )
    }
}

/// Error response structure
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_detail) = match &self {
            AppError::Validation(rejection) => (
                StatusCode::BAD_REQUEST,
                ErrorDetail {
                    code: "VALIDATION_ERROR".to_string(),
                    message: shared::INVALID_INPUT_MESSAGE.to_string(),
                    fields: rejection
                        .violations
                        .iter()
                        .map(|v| v.field.clone())
                        .collect(),
                },
            ),
            AppError::ModelOutput(msg) => (
                StatusCode::BAD_GATEWAY,
                ErrorDetail {
                    code: "MODEL_OUTPUT_ERROR".to_string(),
                    message: format!("Model output error: {}", msg),
                    fields: Vec::new(),
                },
            ),
            AppError::ToolExecution(msg) => (
                StatusCode::BAD_GATEWAY,
                ErrorDetail {
                    code: "TOOL_EXECUTION_ERROR".to_string(),
                    message: format!("Tool execution error: {}", msg),
                    fields: Vec::new(),
                },
            ),
            AppError::Transport(msg) => (
                StatusCode::BAD_GATEWAY,
                ErrorDetail {
                    code: "TRANSPORT_ERROR".to_string(),
                    message: format!("Upstream model error: {}", msg),
                    fields: Vec::new(),
                },
            ),
            AppError::Template(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail {
                    code: "TEMPLATE_ERROR".to_string(),
                    message: "An internal server error occurred".to_string(),
                    fields: Vec::new(),
                },
            ),
            AppError::Configuration(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail {
                    code: "CONFIGURATION_ERROR".to_string(),
                    message: format!("Configuration error: {}", msg),
                    fields: Vec::new(),
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

//! Agricultural report summarization flow

use std::sync::Arc;

use serde_json::{json, Value};

use shared::{parse_report_summary_request, ReportSummaryRequest, ReportSummaryResponse};

use crate::error::{AppError, AppResult};
use crate::external::gemini::{GenerateRequest, ModelClient, ModelReply};
use crate::prompts::{self, SUMMARIZE_REPORT_PROMPT};

/// Drives the report summarization flow.
#[derive(Clone)]
pub struct ReportSummaryService {
    client: Arc<dyn ModelClient>,
}

/// Response schema required from the model.
fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "summary": {
                "type": "STRING",
                "description": "The summary of the agricultural report."
            }
        },
        "required": ["summary"]
    })
}

impl ReportSummaryService {
    pub fn new(client: Arc<dyn ModelClient>) -> Self {
        Self { client }
    }

    /// Validate a raw submission and summarize the report in it.
    pub async fn summarize_from_payload(
        &self,
        payload: &Value,
    ) -> AppResult<ReportSummaryResponse> {
        let request = parse_report_summary_request(payload)?;
        self.summarize(&request).await
    }

    /// Summarize an already-validated report.
    pub async fn summarize(
        &self,
        request: &ReportSummaryRequest,
    ) -> AppResult<ReportSummaryResponse> {
        let prompt = prompts::render(SUMMARIZE_REPORT_PROMPT, &prompts::report_fields(request))?;

        let answer = match self
            .client
            .generate(GenerateRequest::from_prompt(prompt, response_schema()))
            .await?
        {
            ModelReply::Final(value) => value,
            ModelReply::ToolCall(call) => {
                return Err(AppError::ModelOutput(format!(
                    "Unexpected tool request '{}'",
                    call.name
                )))
            }
        };

        serde_json::from_value(answer).map_err(|e| {
            AppError::ModelOutput(format!("Summary did not match the expected shape: {}", e))
        })
    }
}

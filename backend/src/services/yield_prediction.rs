//! Yield prediction flow
//!
//! Predicts crop yield from uploaded CSV data. The conversation declares
//! the data-summarization tool, so the model may route the raw data through
//! it before committing to a number.

use std::sync::Arc;

use serde_json::{json, Value};

use shared::{parse_yield_prediction_request, YieldPredictionRequest, YieldPredictionResponse};

use crate::error::{AppError, AppResult};
use crate::external::gemini::{Content, ModelClient};
use crate::prompts::{self, YIELD_PREDICTION_PROMPT};
use crate::services::conversation::{self, ToolExecutor};
use crate::services::summarize::{summarize_tool_declaration, SummarizeDataTool};

/// Drives the yield-prediction flow.
pub struct YieldPredictionService {
    client: Arc<dyn ModelClient>,
    executor: Arc<dyn ToolExecutor>,
    max_tool_rounds: u32,
}

/// Response schema required from the model.
fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "predictedYield": {
                "type": "NUMBER",
                "description": "The predicted crop yield in tons."
            },
            "recommendations": {
                "type": "STRING",
                "description": "Actionable recommendations for the farmer based on the prediction."
            }
        },
        "required": ["predictedYield", "recommendations"]
    })
}

impl YieldPredictionService {
    /// The default executor runs the real summarization tool against the
    /// same model client.
    pub fn new(client: Arc<dyn ModelClient>, max_tool_rounds: u32) -> Self {
        let executor = Arc::new(SummarizeDataTool::new(client.clone()));
        Self {
            client,
            executor,
            max_tool_rounds,
        }
    }

    /// Replace the tool executor (scripted in tests).
    pub fn with_executor(mut self, executor: Arc<dyn ToolExecutor>) -> Self {
        self.executor = executor;
        self
    }

    /// Validate a raw submission and predict yield for it.
    pub async fn predict_from_payload(
        &self,
        payload: &Value,
    ) -> AppResult<YieldPredictionResponse> {
        let request = parse_yield_prediction_request(payload)?;
        self.predict(&request).await
    }

    /// Predict yield for an already-validated upload.
    pub async fn predict(
        &self,
        request: &YieldPredictionRequest,
    ) -> AppResult<YieldPredictionResponse> {
        let prompt = prompts::render(
            YIELD_PREDICTION_PROMPT,
            &prompts::yield_prediction_fields(request),
        )?;

        let answer = conversation::run_to_final(
            self.client.as_ref(),
            self.executor.as_ref(),
            vec![Content::user_text(prompt)],
            response_schema(),
            vec![summarize_tool_declaration()],
            Vec::new(),
            self.max_tool_rounds,
        )
        .await?;

        serde_json::from_value(answer).map_err(|e| {
            AppError::ModelOutput(format!("Prediction did not match the expected shape: {}", e))
        })
    }
}

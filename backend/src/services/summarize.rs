//! Data summarization tool
//!
//! The one tool the yield-prediction conversation may call. Condenses raw
//! CSV text into a short statistical summary via its own nested model call,
//! then clips the result to the word budget.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};

use shared::DataSummary;

use crate::error::{AppError, AppResult};
use crate::external::gemini::{
    FunctionCall, FunctionDeclaration, GenerateRequest, ModelClient, ModelReply,
};
use crate::prompts::{self, SUMMARIZE_DATA_PROMPT, SUMMARY_WORD_BUDGET};
use crate::services::conversation::ToolExecutor;

/// Wire name of the summarization tool.
pub const SUMMARIZE_TOOL_NAME: &str = "summarizeAgriculturalData";

/// Declaration advertised to the model for the yield-prediction flow.
pub fn summarize_tool_declaration() -> FunctionDeclaration {
    FunctionDeclaration {
        name: SUMMARIZE_TOOL_NAME.to_string(),
        description: "Summarizes large agricultural datasets into key insights. \
                      This MUST be called before making a yield prediction."
            .to_string(),
        parameters: json!({
            "type": "OBJECT",
            "properties": {
                "agriculturalData": {
                    "type": "STRING",
                    "description": "A large string of raw CSV data to be summarized."
                }
            },
            "required": ["agriculturalData"]
        }),
    }
}

/// Response schema for the nested summarization call.
pub fn data_summary_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "summary": {
                "type": "STRING",
                "description": "A concise statistical summary of the agricultural data."
            }
        },
        "required": ["summary"]
    })
}

/// Executes the summarization tool.
pub struct SummarizeDataTool {
    client: Arc<dyn ModelClient>,
}

impl SummarizeDataTool {
    pub fn new(client: Arc<dyn ModelClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ToolExecutor for SummarizeDataTool {
    async fn run(&self, call: &FunctionCall) -> AppResult<Value> {
        if call.name != SUMMARIZE_TOOL_NAME {
            return Err(AppError::ToolExecution(format!(
                "Unknown tool '{}'",
                call.name
            )));
        }

        let data = call
            .args
            .get("agriculturalData")
            .and_then(Value::as_str)
            .ok_or_else(|| {
                AppError::ToolExecution(
                    "Summarize tool called without agriculturalData".to_string(),
                )
            })?;

        let prompt = prompts::render(SUMMARIZE_DATA_PROMPT, &prompts::summarize_data_fields(data))?;
        let request = GenerateRequest::from_prompt(prompt, data_summary_schema());

        let reply = self
            .client
            .generate(request)
            .await
            .map_err(|e| AppError::ToolExecution(format!("Data summarization failed: {}", e)))?;

        let answer = match reply {
            ModelReply::Final(value) => value,
            ModelReply::ToolCall(inner) => {
                return Err(AppError::ToolExecution(format!(
                    "Unexpected nested tool request '{}'",
                    inner.name
                )))
            }
        };

        let parsed: DataSummary = serde_json::from_value(answer).map_err(|e| {
            AppError::ToolExecution(format!("Summary did not match the expected shape: {}", e))
        })?;

        let summary = clip_to_word_budget(&parsed.summary, SUMMARY_WORD_BUDGET);
        Ok(json!({ "summary": summary }))
    }
}

/// Trim text to at most `budget` whitespace-separated words. Text within
/// budget is returned with its original formatting intact.
fn clip_to_word_budget(text: &str, budget: usize) -> String {
    let mut words = text.split_whitespace();
    let clipped: Vec<&str> = words.by_ref().take(budget).collect();
    if words.next().is_none() {
        text.to_string()
    } else {
        clipped.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct OneShotClient {
        reply: ModelReply,
    }

    #[async_trait]
    impl ModelClient for OneShotClient {
        async fn generate(&self, _request: GenerateRequest) -> AppResult<ModelReply> {
            Ok(self.reply.clone())
        }
    }

    struct BrokenClient;

    #[async_trait]
    impl ModelClient for BrokenClient {
        async fn generate(&self, _request: GenerateRequest) -> AppResult<ModelReply> {
            Err(AppError::Transport("connection refused".to_string()))
        }
    }

    fn summarize_call(data: &str) -> FunctionCall {
        FunctionCall {
            name: SUMMARIZE_TOOL_NAME.to_string(),
            args: json!({"agriculturalData": data}),
        }
    }

    #[test]
    fn test_tool_returns_summary_from_nested_call() {
        let tool = SummarizeDataTool::new(Arc::new(OneShotClient {
            reply: ModelReply::Final(json!({"summary": "yield trends upward"})),
        }));

        let result = tokio_test::block_on(tool.run(&summarize_call("a,b\n1,2"))).unwrap();
        assert_eq!(result, json!({"summary": "yield trends upward"}));
    }

    #[test]
    fn test_unknown_tool_name_is_rejected() {
        let tool = SummarizeDataTool::new(Arc::new(OneShotClient {
            reply: ModelReply::Final(json!({"summary": "x"})),
        }));

        let call = FunctionCall {
            name: "plantTrees".to_string(),
            args: json!({}),
        };
        let err = tokio_test::block_on(tool.run(&call)).unwrap_err();
        assert!(matches!(err, AppError::ToolExecution(msg) if msg.contains("plantTrees")));
    }

    #[test]
    fn test_missing_argument_is_rejected() {
        let tool = SummarizeDataTool::new(Arc::new(OneShotClient {
            reply: ModelReply::Final(json!({"summary": "x"})),
        }));

        let call = FunctionCall {
            name: SUMMARIZE_TOOL_NAME.to_string(),
            args: json!({}),
        };
        assert!(tokio_test::block_on(tool.run(&call)).is_err());
    }

    #[test]
    fn test_nested_transport_failure_becomes_tool_error() {
        let tool = SummarizeDataTool::new(Arc::new(BrokenClient));
        let err = tokio_test::block_on(tool.run(&summarize_call("a,b"))).unwrap_err();
        assert!(matches!(err, AppError::ToolExecution(msg) if msg.contains("connection refused")));
    }

    #[test]
    fn test_wrong_shape_summary_is_rejected() {
        let tool = SummarizeDataTool::new(Arc::new(OneShotClient {
            reply: ModelReply::Final(json!({"wrong": "shape"})),
        }));
        let err = tokio_test::block_on(tool.run(&summarize_call("a,b"))).unwrap_err();
        assert!(matches!(err, AppError::ToolExecution(_)));
    }

    #[test]
    fn test_overlong_summary_is_clipped() {
        let long_summary = vec!["word"; SUMMARY_WORD_BUDGET + 50].join(" ");
        let tool = SummarizeDataTool::new(Arc::new(OneShotClient {
            reply: ModelReply::Final(json!({"summary": long_summary})),
        }));

        let result = tokio_test::block_on(tool.run(&summarize_call("a,b"))).unwrap();
        let clipped = result["summary"].as_str().unwrap();
        assert_eq!(clipped.split_whitespace().count(), SUMMARY_WORD_BUDGET);
    }

    #[test]
    fn test_clip_preserves_short_text_verbatim() {
        let text = "mean yield 4.2 tons,\nstddev 0.3";
        assert_eq!(clip_to_word_budget(text, 500), text);
    }

    #[test]
    fn test_clip_trims_to_budget() {
        assert_eq!(clip_to_word_budget("one two three four", 2), "one two");
    }
}

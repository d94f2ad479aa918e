//! Bounded conversation loop for tool-assisted flows
//!
//! Drives the model until it produces a final structured answer, running
//! any tool it requests in between. The history is an ordered, append-only
//! list of contents; each round passes the whole list by value.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::{AppError, AppResult};
use crate::external::gemini::{
    Content, FunctionCall, FunctionDeclaration, GenerateRequest, ModelClient, ModelReply,
    SafetySetting,
};

/// Default bound on tool round-trips within one conversation.
pub const DEFAULT_MAX_TOOL_ROUNDS: u32 = 5;

/// Runs a named tool the model asked for.
#[async_trait]
pub trait ToolExecutor: Send + Sync {
    async fn run(&self, call: &FunctionCall) -> AppResult<Value>;
}

/// Drive a conversation until the model produces a final answer.
///
/// Each tool round appends the model's function call and the tool's result
/// to the history before asking again. A model that keeps requesting tools
/// is cut off after `max_tool_rounds`; a tool failure ends the conversation
/// immediately.
pub async fn run_to_final(
    client: &dyn ModelClient,
    executor: &dyn ToolExecutor,
    mut contents: Vec<Content>,
    response_schema: Value,
    tools: Vec<FunctionDeclaration>,
    safety_settings: Vec<SafetySetting>,
    max_tool_rounds: u32,
) -> AppResult<Value> {
    let mut rounds = 0u32;

    loop {
        let request = GenerateRequest {
            contents: contents.clone(),
            response_schema: response_schema.clone(),
            tools: tools.clone(),
            safety_settings: safety_settings.clone(),
        };

        match client.generate(request).await? {
            ModelReply::Final(answer) => {
                tracing::debug!(rounds, "conversation finished");
                return Ok(answer);
            }
            ModelReply::ToolCall(call) => {
                if rounds >= max_tool_rounds {
                    return Err(AppError::ModelOutput(format!(
                        "Tool-call limit exceeded after {} round(s)",
                        max_tool_rounds
                    )));
                }
                rounds += 1;
                tracing::debug!(rounds, tool = %call.name, "model requested a tool");

                let result = executor.run(&call).await?;
                contents.push(Content::model_call(call.clone()));
                contents.push(Content::tool_result(&call.name, result));
            }
        }
    }
}

//! Gemini inference client
//!
//! Talks to the hosted `generateContent` endpoint. A single call either
//! produces a final JSON answer conforming to the requested response schema
//! or a request to run one of the declared tools; the conversation loop
//! decides what happens next.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::GeminiConfig;
use crate::error::{AppError, AppResult};

// ============================================================================
// Conversation Types
// ============================================================================

/// One message in a conversation, ordered oldest first.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Content {
    pub role: String,
    pub parts: Vec<Part>,
}

impl Content {
    /// A user turn carrying prompt text.
    pub fn user_text(text: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            parts: vec![Part::text(text)],
        }
    }

    /// The model turn that requested a tool, echoed back into the history.
    pub fn model_call(call: FunctionCall) -> Self {
        Self {
            role: "model".to_string(),
            parts: vec![Part {
                function_call: Some(call),
                ..Part::default()
            }],
        }
    }

    /// A tool result fed back to the model.
    pub fn tool_result(name: impl Into<String>, response: Value) -> Self {
        Self {
            role: "function".to_string(),
            parts: vec![Part {
                function_response: Some(FunctionResponse {
                    name: name.into(),
                    response,
                }),
                ..Part::default()
            }],
        }
    }
}

/// A single content part. Exactly one of the fields is set per part;
/// the endpoint uses the same shape in both directions.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub function_call: Option<FunctionCall>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub function_response: Option<FunctionResponse>,
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }
}

/// A tool invocation requested by the model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FunctionCall {
    pub name: String,
    #[serde(default)]
    pub args: Value,
}

/// The result of a tool invocation, sent back to the model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FunctionResponse {
    pub name: String,
    pub response: Value,
}

/// Declaration of a callable tool, advertised to the model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionDeclaration {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

/// Safety threshold override for one harm category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SafetySetting {
    pub category: String,
    pub threshold: String,
}

impl SafetySetting {
    pub fn block_none(category: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            threshold: "BLOCK_NONE".to_string(),
        }
    }
}

/// A single inference request: the conversation so far plus the response
/// contract and any tools the model may call.
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    pub contents: Vec<Content>,
    pub response_schema: Value,
    pub tools: Vec<FunctionDeclaration>,
    pub safety_settings: Vec<SafetySetting>,
}

impl GenerateRequest {
    pub fn from_prompt(prompt: impl Into<String>, response_schema: Value) -> Self {
        Self {
            contents: vec![Content::user_text(prompt)],
            response_schema,
            tools: Vec::new(),
            safety_settings: Vec::new(),
        }
    }

    pub fn with_tools(mut self, tools: Vec<FunctionDeclaration>) -> Self {
        self.tools = tools;
        self
    }

    pub fn with_safety_settings(mut self, settings: Vec<SafetySetting>) -> Self {
        self.safety_settings = settings;
        self
    }
}

/// What the model did with a request.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelReply {
    /// A final answer, already parsed as JSON.
    Final(Value),
    /// The model wants a tool run before it answers.
    ToolCall(FunctionCall),
}

/// Abstraction over the hosted model so flows can be driven by scripted
/// clients in tests.
#[async_trait]
pub trait ModelClient: Send + Sync {
    async fn generate(&self, request: GenerateRequest) -> AppResult<ModelReply>;
}

// ============================================================================
// Wire Format
// ============================================================================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct WireRequest {
    contents: Vec<Content>,
    generation_config: WireGenerationConfig,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    safety_settings: Vec<SafetySetting>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<WireTool>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct WireGenerationConfig {
    response_mime_type: &'static str,
    response_schema: Value,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct WireTool {
    function_declarations: Vec<FunctionDeclaration>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireResponse {
    #[serde(default)]
    candidates: Vec<WireCandidate>,
    #[serde(default)]
    prompt_feedback: Option<WirePromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireCandidate {
    #[serde(default)]
    content: Option<Content>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WirePromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

fn wire_request(request: GenerateRequest) -> WireRequest {
    WireRequest {
        contents: request.contents,
        generation_config: WireGenerationConfig {
            response_mime_type: "application/json",
            response_schema: request.response_schema,
        },
        safety_settings: request.safety_settings,
        tools: if request.tools.is_empty() {
            Vec::new()
        } else {
            vec![WireTool {
                function_declarations: request.tools,
            }]
        },
    }
}

/// Interpret a raw endpoint response as either a final answer or a tool
/// call. A tool call anywhere in the candidate wins over answer text.
fn reply_from_response(data: WireResponse) -> AppResult<ModelReply> {
    if let Some(reason) = data
        .prompt_feedback
        .as_ref()
        .and_then(|feedback| feedback.block_reason.as_deref())
    {
        return Err(AppError::ModelOutput(format!(
            "Prompt blocked by safety filter: {}",
            reason
        )));
    }

    let candidate = data
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| AppError::ModelOutput("No candidates in model response".to_string()))?;

    if let Some(reason) = candidate.finish_reason.as_deref() {
        if reason == "SAFETY" || reason == "RECITATION" {
            return Err(AppError::ModelOutput(format!(
                "Generation stopped: {}",
                reason
            )));
        }
    }

    let content = candidate
        .content
        .ok_or_else(|| AppError::ModelOutput("Candidate has no content".to_string()))?;

    for part in &content.parts {
        if let Some(call) = &part.function_call {
            return Ok(ModelReply::ToolCall(call.clone()));
        }
    }

    let text: String = content
        .parts
        .iter()
        .filter_map(|part| part.text.as_deref())
        .collect();

    if text.trim().is_empty() {
        return Err(AppError::ModelOutput(
            "Model returned an empty answer".to_string(),
        ));
    }

    serde_json::from_str(&text)
        .map(ModelReply::Final)
        .map_err(|e| AppError::ModelOutput(format!("Model returned malformed JSON: {}", e)))
}

// ============================================================================
// Client
// ============================================================================

/// Client for the Gemini generateContent endpoint
#[derive(Clone)]
pub struct GeminiClient {
    http_client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl GeminiClient {
    /// Create a new client from configuration
    pub fn new(config: &GeminiConfig) -> Self {
        let http_client = Client::builder()
            .timeout(std::time::Duration::from_secs(60))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            http_client,
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
        }
    }

    /// Override the base URL (for testing against a local mock endpoint)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }
}

#[async_trait]
impl ModelClient for GeminiClient {
    async fn generate(&self, request: GenerateRequest) -> AppResult<ModelReply> {
        let body = wire_request(request);
        tracing::debug!(
            model = %self.model,
            turns = body.contents.len(),
            "calling generateContent"
        );

        let response = self
            .http_client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::Transport(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::Transport(format!(
                "API returned {}: {}",
                status, body
            )));
        }

        let data: WireResponse = response
            .json()
            .await
            .map_err(|e| AppError::ModelOutput(format!("Failed to parse response: {}", e)))?;

        reply_from_response(data)
    }
}

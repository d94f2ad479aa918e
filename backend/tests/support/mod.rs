//! Scripted model clients and app builders shared by the flow tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use cropcast_backend::config::{AiConfig, Config, GeminiConfig, ServerConfig};
use cropcast_backend::error::{AppError, AppResult};
use cropcast_backend::external::gemini::{
    FunctionCall, GenerateRequest, ModelClient, ModelReply,
};
use cropcast_backend::{create_app, AppState};

/// One scripted turn of a model conversation.
#[derive(Clone)]
pub enum ScriptedReply {
    Final(Value),
    ToolCall { name: String, args: Value },
    ModelFailure(String),
    TransportFailure(String),
}

/// Model client that replays a fixed script of replies, recording every
/// request it receives.
pub struct ScriptedClient {
    script: Mutex<Vec<ScriptedReply>>,
    repeat_last: bool,
    calls: AtomicUsize,
    pub requests: Mutex<Vec<GenerateRequest>>,
}

impl ScriptedClient {
    pub fn new(script: Vec<ScriptedReply>) -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(script),
            repeat_last: false,
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        })
    }

    /// A client that replays the same reply forever.
    pub fn repeating(reply: ScriptedReply) -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(vec![reply]),
            repeat_last: true,
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Prompt text of the recorded request at `index`.
    pub fn prompt_at(&self, index: usize) -> String {
        let requests = self.requests.lock().unwrap();
        requests[index].contents[0].parts[0]
            .text
            .clone()
            .unwrap_or_default()
    }
}

#[async_trait]
impl ModelClient for ScriptedClient {
    async fn generate(&self, request: GenerateRequest) -> AppResult<ModelReply> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request);

        let mut script = self.script.lock().unwrap();
        let reply = if self.repeat_last && script.len() == 1 {
            script[0].clone()
        } else if script.is_empty() {
            panic!("scripted client exhausted");
        } else {
            script.remove(0)
        };

        match reply {
            ScriptedReply::Final(value) => Ok(ModelReply::Final(value)),
            ScriptedReply::ToolCall { name, args } => {
                Ok(ModelReply::ToolCall(FunctionCall { name, args }))
            }
            ScriptedReply::ModelFailure(message) => Err(AppError::ModelOutput(message)),
            ScriptedReply::TransportFailure(message) => Err(AppError::Transport(message)),
        }
    }
}

/// Model client that never answers, for exercising the flow timeout.
pub struct HangingClient;

#[async_trait]
impl ModelClient for HangingClient {
    async fn generate(&self, _request: GenerateRequest) -> AppResult<ModelReply> {
        tokio::time::sleep(std::time::Duration::from_secs(30)).await;
        Ok(ModelReply::Final(Value::Null))
    }
}

pub fn test_config() -> Config {
    Config {
        environment: "test".to_string(),
        server: ServerConfig {
            port: 0,
            host: "127.0.0.1".to_string(),
        },
        gemini: GeminiConfig {
            api_key: "test-key".to_string(),
            model: "gemini-2.0-flash".to_string(),
            base_url: "http://127.0.0.1:9".to_string(),
        },
        ai: AiConfig {
            max_tool_rounds: 5,
            flow_timeout_secs: 5,
        },
    }
}

pub fn test_app(model: Arc<dyn ModelClient>) -> Router {
    test_app_with_config(test_config(), model)
}

pub fn test_app_with_config(config: Config, model: Arc<dyn ModelClient>) -> Router {
    create_app(AppState {
        config: Arc::new(config),
        model,
    })
}

/// POST a JSON payload and return the status plus parsed body.
pub async fn post_json(app: Router, uri: &str, payload: &Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

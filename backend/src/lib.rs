//! CropCast backend server library
//!
//! Receives farm profiles, uploaded agricultural data, and reports from the
//! browser forms, validates them, and drives a hosted Gemini model to
//! produce recommendations, yield predictions, and summaries.

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod config;
pub mod error;
pub mod external;
pub mod handlers;
pub mod prompts;
pub mod routes;
pub mod services;

pub use config::Config;

use external::gemini::ModelClient;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub model: Arc<dyn ModelClient>,
}

/// Create the application router with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(liveness))
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "CropCast API v1.0"
}

/// Liveness endpoint
async fn liveness() -> &'static str {
    "OK"
}

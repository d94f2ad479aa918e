//! Route definitions for the CropCast API

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Flow endpoints, one per form
        .route("/recommendations", post(handlers::personalized_recommendations))
        .route("/predictions/yield", post(handlers::predict_yield))
        .route("/reports/summarize", post(handlers::summarize_report))
}

//! CropCast - Backend Server
//!
//! Turns farm profiles and uploaded agricultural data into model-backed
//! recommendations, yield predictions, and report summaries.

use std::{net::SocketAddr, sync::Arc};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cropcast_backend::error::AppError;
use cropcast_backend::external::GeminiClient;
use cropcast_backend::{create_app, AppState, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cropcast_backend=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::load()?;

    tracing::info!("Starting CropCast Server");
    tracing::info!("Environment: {}", config.environment);
    tracing::info!("Model: {}", config.gemini.model);

    if config.gemini.api_key.is_empty() {
        if config.environment == "production" {
            return Err(AppError::Configuration(
                "gemini.api_key is required in production".to_string(),
            )
            .into());
        }
        tracing::warn!("gemini.api_key is not set; model calls will fail");
    }

    // Create application state
    let state = AppState {
        config: Arc::new(config.clone()),
        model: Arc::new(GeminiClient::new(&config.gemini)),
    };

    // Build application
    let app = create_app(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

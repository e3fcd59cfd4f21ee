use anyhow::{Context, Result};
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;

use super::handlers::{healthcheck_handler, predictor_handler};
use crate::config::Settings;
use crate::detection::ShapeClassifier;

#[derive(Clone)]
pub struct AppState {
    pub classifier: Arc<ShapeClassifier>,
}

impl AppState {
    pub fn new(classifier: ShapeClassifier) -> Self {
        Self {
            classifier: Arc::new(classifier),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(ShapeClassifier::new(settings.classifier_params()))
    }
}

pub fn create_app(state: AppState, max_body_bytes: usize) -> Router {
    Router::new()
        .route("/healthcheck/", get(healthcheck_handler))
        .route("/healthcheck", get(healthcheck_handler))
        .route("/predictor/", post(predictor_handler))
        .route("/predictor", post(predictor_handler))
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind the listener and serve until Ctrl-C
pub async fn serve(settings: Settings) -> Result<()> {
    let app = create_app(AppState::from_settings(&settings), settings.max_body_bytes);

    let addr = settings.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!(
        %addr,
        threshold = settings.threshold_binary,
        epsilon = settings.approx_poly_dp_epsilon,
        channel_order = %settings.channel_order,
        "shape classifier listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("failed to listen for shutdown signal: {}", e);
    }
}

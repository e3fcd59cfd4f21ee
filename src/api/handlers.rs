use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{server::AppState, ApiError};
use crate::models::ShapeLabel;
use crate::validation;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PredictResponse {
    pub shape: ShapeLabel,
}

pub async fn healthcheck_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// POST /predictor/ with `{"image": [[[b, g, r], ...], ...]}`
pub async fn predictor_handler(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<PredictResponse>, ApiError> {
    let Json(mut body) = payload.map_err(|rejection| ApiError::MalformedBody(rejection.body_text()))?;

    let image = body
        .get_mut("image")
        .map(Value::take)
        .ok_or(ApiError::MissingField("image"))?;

    let classifier = state.classifier.clone();
    let classification = tokio::task::spawn_blocking(move || -> Result<_, ApiError> {
        let pixels = validation::parse_image(&image)?;
        classifier
            .classify(pixels)
            .map_err(|e| ApiError::Internal(format!("{:#}", e)))
    })
    .await
    .map_err(|e| ApiError::Internal(format!("classification task failed: {}", e)))??;

    Ok(Json(PredictResponse {
        shape: classification.label,
    }))
}

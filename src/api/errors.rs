use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, error};

use crate::validation::ImageValidationError;

/// One entry of a 422 body
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ValidationDetail {
    pub loc: Vec<String>,
    pub msg: String,
    #[serde(rename = "type")]
    pub error_type: String,
}

/// Body of every 422 response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ValidationErrorResponse {
    pub detail: Vec<ValidationDetail>,
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("invalid image: {0}")]
    InvalidImage(#[from] ImageValidationError),

    #[error("malformed request body: {0}")]
    MalformedBody(String),

    #[error("missing field: {0}")]
    MissingField(&'static str),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidImage(_) | ApiError::MalformedBody(_) | ApiError::MissingField(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The 422 body for client faults; None for server faults
    pub fn to_validation_response(&self) -> Option<ValidationErrorResponse> {
        let detail = match self {
            ApiError::InvalidImage(err) => ValidationDetail {
                loc: vec!["body".to_string(), "image".to_string()],
                msg: err.to_string(),
                error_type: "value_error".to_string(),
            },
            ApiError::MalformedBody(msg) => ValidationDetail {
                loc: vec!["body".to_string()],
                msg: msg.clone(),
                error_type: "value_error.jsondecode".to_string(),
            },
            ApiError::MissingField(field) => ValidationDetail {
                loc: vec!["body".to_string(), field.to_string()],
                msg: "field required".to_string(),
                error_type: "value_error.missing".to_string(),
            },
            ApiError::Internal(_) => return None,
        };

        Some(ValidationErrorResponse {
            detail: vec![detail],
        })
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        match self.to_validation_response() {
            Some(body) => {
                debug!(error = %self, "rejected request");
                (status, Json(body)).into_response()
            }
            None => {
                error!(error = %self, "request failed");
                (status, Json(json!({ "detail": "internal error" }))).into_response()
            }
        }
    }
}

//! HTTP surface: `GET /healthcheck/` and `POST /predictor/`

pub mod errors;
pub mod handlers;
pub mod server;

pub use errors::{ApiError, ValidationDetail, ValidationErrorResponse};
pub use handlers::{HealthResponse, PredictResponse};
pub use server::{create_app, serve, AppState};

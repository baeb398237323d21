use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tally::{StoreError, TallyError};
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("invalid choice")]
    InvalidChoice,

    #[error("{0}")]
    StoreUnavailable(#[from] StoreError),
}

impl From<TallyError> for AppError {
    fn from(e: TallyError) -> Self {
        match e {
            TallyError::InvalidChoice => AppError::InvalidChoice,
            TallyError::Store(e) => AppError::StoreUnavailable(e),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::InvalidChoice => StatusCode::BAD_REQUEST,
            AppError::StoreUnavailable(ref e) => {
                error!("Store unavailable: {e}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

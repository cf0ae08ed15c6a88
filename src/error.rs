use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Missing credentials")]
    Unauthorized,

    #[error("Forbidden")]
    Forbidden,

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("{0}")]
    Validation(String),

    #[error("Token error")]
    Token(#[from] jsonwebtoken::errors::Error),

    #[error("Store error")]
    Store(#[from] mongodb::error::Error),

    #[error("Upstream service error")]
    Upstream(#[from] reqwest::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::Token(ref err) => {
                error!("Token signing failure: {err}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::Store(ref err) => {
                error!("Store failure: {err}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::Upstream(ref err) => {
                error!("Upstream failure: {err}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status, self.to_string()).into_response()
    }
}

//! Request error taxonomy
//!
//! Every failure is terminal for its request: the first failing validation
//! step short-circuits the rest of the pipeline. Responses carry only a
//! short phrase; credential failures never reveal which half of the pair
//! was wrong.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(&'static str),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Not Found")]
    NotFound,

    #[error("Internal Server Error")]
    Internal(#[from] sqlx::Error),

    /// The store executed the statement but reported no affected row.
    #[error("Internal Server Error")]
    InsertUnconfirmed,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Internal(e) => {
                // Log the store detail, leak only the status phrase
                tracing::error!("store error: {}", e);
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ApiError::InsertUnconfirmed => {
                tracing::error!("store reported no affected row for insert");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status, self.to_string()).into_response()
    }
}

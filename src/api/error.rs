use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::model::ValidationError;
use crate::store::StoreError;

/// Every failure a planet handler can return, with its HTTP mapping.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The body could not be read as JSON of the expected shape
    #[error(transparent)]
    Rejected(#[from] JsonRejection),

    #[error("Planet not found")]
    NotFound,

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Internal(String),
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => ApiError::NotFound,
            StoreError::ConstraintViolation(message) => {
                log::warn!("Rejected planet write: {}", message);
                ApiError::Conflict(message)
            }
            StoreError::Backend(e) => {
                log::error!("Store failure: {:#}", e);
                ApiError::Internal(format!("{:#}", e))
            }
        }
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Rejected(rejection) => rejection.status(),
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Failures go out as the status code plus a short plain-text message.
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            ApiError::Rejected(rejection) => rejection.body_text(),
            other => other.to_string(),
        };

        (status, message).into_response()
    }
}

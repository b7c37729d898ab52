use std::collections::BTreeMap;

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

use yatube_feed::FeedError;
use yatube_types::api::{ErrorResponse, ValidationErrorResponse};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("authentication required")]
    Unauthorized,
    #[error("invalid {field}: {message}")]
    Validation { field: &'static str, message: String },
    #[error("username already taken")]
    Conflict,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }
}

impl From<FeedError> for ApiError {
    fn from(err: FeedError) -> Self {
        match err {
            FeedError::NotFound { entity } => Self::NotFound(entity),
            FeedError::Authorization => Self::Unauthorized,
            FeedError::Validation { field, message } => Self::Validation { field, message },
            FeedError::Store(e) => Self::Internal(e),
        }
    }
}

/// A body that is not valid JSON for the request type is reported like any
/// other field error, under `body`.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::validation("body", rejection.body_text())
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::Internal(anyhow::anyhow!("spawn_blocking join error: {}", err))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::NotFound(_) => error_body(StatusCode::NOT_FOUND, self.to_string()),
            Self::Unauthorized => error_body(StatusCode::UNAUTHORIZED, self.to_string()),
            Self::Conflict => error_body(StatusCode::CONFLICT, self.to_string()),
            Self::Validation { field, message } => {
                let errors = BTreeMap::from([(field.to_string(), vec![message])]);
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    Json(ValidationErrorResponse { errors }),
                )
                    .into_response()
            }
            Self::Internal(e) => {
                error!("Internal error: {:#}", e);
                error_body(StatusCode::INTERNAL_SERVER_ERROR, "internal server error".into())
            }
        }
    }
}

fn error_body(status: StatusCode, error: String) -> Response {
    (status, Json(ErrorResponse { error })).into_response()
}

use super::state::ApiStateError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::borrow::Cow;
use tracing::error;
use utoipa::ToSchema;

/// Wire shape for error responses.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub message: String,
}

/// The error type handlers return; maps onto HTTP status codes.
///
/// Validation errors carry their message to the client. Server-side failures
/// keep the cause in the logs and answer with a generic body.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Client-caused: the request fails a declared shape or constraint.
    #[error("Validation failed: {message}")]
    Validation { message: Cow<'static, str> },

    /// Server-caused: a downstream collaborator failed.
    #[error("Internal error: {message}")]
    Internal { message: Cow<'static, str> },
}

impl ApiError {
    pub fn validation(message: impl Into<Cow<'static, str>>) -> Self {
        Self::Validation { message: message.into() }
    }

    pub fn internal(message: impl Into<Cow<'static, str>>) -> Self {
        Self::Internal { message: message.into() }
    }

    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        let message = match &self {
            Self::Validation { message } => message.clone().into_owned(),
            Self::Internal { .. } => {
                error!(cause = %self, "Request failed");
                "internal server error".to_owned()
            }
        };

        (status, Json(ErrorBody { message })).into_response()
    }
}

impl From<ApiStateError> for ApiError {
    fn from(err: ApiStateError) -> Self {
        Self::Internal { message: err.to_string().into() }
    }
}

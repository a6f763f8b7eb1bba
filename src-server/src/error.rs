//! HTTP error mapping
//!
//! API failures are returned as `{"detail": message}` with a status code
//! derived from the domain error category.

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Json, Response};
use serde::Serialize;
use thiserror::Error;

use crate::domain::DomainError;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    /// Missing or rejected credentials
    #[error("{0}")]
    Unauthorized(String),
    /// The identity provider failed or answered unexpectedly
    #[error("{0}")]
    Upstream(String),
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub detail: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Domain(DomainError::NotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::Domain(DomainError::InvalidInput(_)) => StatusCode::BAD_REQUEST,
            ApiError::Domain(DomainError::Conflict(_)) => StatusCode::CONFLICT,
            ApiError::Domain(DomainError::Internal(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Upstream(_) => StatusCode::BAD_GATEWAY,
        }
    }

    fn detail(&self) -> String {
        match self {
            ApiError::Domain(DomainError::Internal(_)) => "Internal server error".to_string(),
            ApiError::Domain(e) => e.message().to_string(),
            ApiError::Unauthorized(msg) | ApiError::Upstream(msg) => msg.clone(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "request rejected");
        }

        let body = Json(ErrorBody { detail: self.detail() });
        match self {
            ApiError::Unauthorized(_) => {
                (status, [(header::WWW_AUTHENTICATE, "Bearer")], body).into_response()
            }
            _ => (status, body).into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ApiError::from(DomainError::NotFound("x".into())).status(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::from(DomainError::InvalidInput("x".into())).status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::from(DomainError::Conflict("x".into())).status(), StatusCode::CONFLICT);
        assert_eq!(ApiError::Unauthorized("x".into()).status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_internal_detail_is_generic() {
        let err = ApiError::from(DomainError::Internal("disk I/O error".into()));
        assert_eq!(err.detail(), "Internal server error");
    }

    #[test]
    fn test_unauthorized_sets_challenge_header() {
        let response = ApiError::Unauthorized("Not authenticated".into()).into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(response.headers()[header::WWW_AUTHENTICATE], "Bearer");
    }
}

//! Error types for the Product API.
//!
//! Every failure a handler can produce ends up here and leaves the server as
//! `{ "status": 404, "code": "NOT_FOUND", "message": "..." }`.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use motor_core::{AccessDenied, CoreError, ROLE_HEADER};

/// Message for a path id that is not an integer.
pub const INVALID_ID_MESSAGE: &str = "Validation failed (numeric string is expected)";

/// Machine-readable error class in the response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    Unauthorized,
    NotFound,
    ValidationError,
    Internal,
    ServiceUnavailable,
}

/// Product API errors.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    InvalidRequest(String),

    #[error("{0}")]
    Internal(String),

    #[error("{0}")]
    Unavailable(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            ApiError::Unauthorized(_) => ErrorCode::Unauthorized,
            ApiError::NotFound(_) => ErrorCode::NotFound,
            ApiError::InvalidRequest(_) => ErrorCode::ValidationError,
            ApiError::Internal(_) => ErrorCode::Internal,
            ApiError::Unavailable(_) => ErrorCode::ServiceUnavailable,
        }
    }
}

/// Result type for handlers.
pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    status: u16,
    code: ErrorCode,
    message: &'a str,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();
        let body = ErrorBody {
            status: status.as_u16(),
            code: self.code(),
            message: &message,
        };
        (status, Json(body)).into_response()
    }
}

// =============================================================================
// Conversions
// =============================================================================

impl From<AccessDenied> for ApiError {
    fn from(denied: AccessDenied) -> Self {
        match denied {
            AccessDenied::MissingRole => {
                ApiError::Unauthorized(format!("{} header is missing", ROLE_HEADER))
            }
            other => ApiError::Unauthorized(other.to_string()),
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(error: CoreError) -> Self {
        match error {
            CoreError::ProductNotFound { .. } | CoreError::NoProductsWithCode { .. } => {
                ApiError::NotFound(error.to_string())
            }
            CoreError::InvalidInput(msg) => ApiError::InvalidRequest(msg),
            CoreError::Validation(err) => ApiError::InvalidRequest(err.to_string()),
            CoreError::Unauthorized(denied) => denied.into(),
            CoreError::Internal(msg) => ApiError::Internal(msg),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::InvalidRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(_: PathRejection) -> Self {
        ApiError::InvalidRequest(INVALID_ID_MESSAGE.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    #[test]
    fn test_core_errors_map_to_statuses() {
        let cases = [
            (
                ApiError::from(CoreError::ProductNotFound { id: 9 }),
                StatusCode::NOT_FOUND,
            ),
            (
                ApiError::from(CoreError::InvalidInput("bad".into())),
                StatusCode::BAD_REQUEST,
            ),
            (
                ApiError::from(CoreError::Internal("boom".into())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                ApiError::from(CoreError::Unauthorized(AccessDenied::AdminRequired)),
                StatusCode::UNAUTHORIZED,
            ),
        ];

        for (error, status) in cases {
            assert_eq!(error.status(), status, "{:?}", error);
        }
    }

    #[test]
    fn test_missing_role_names_the_header() {
        let error = ApiError::from(AccessDenied::MissingRole);
        assert_eq!(error.to_string(), "x-user-role header is missing");

        let error = ApiError::from(AccessDenied::AdminRequired);
        assert_eq!(error.to_string(), "Admin role required");
    }

    #[tokio::test]
    async fn test_error_body_shape() {
        let response = ApiError::NotFound("Product with ID 9 not found".into()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "status": 404,
                "code": "NOT_FOUND",
                "message": "Product with ID 9 not found"
            })
        );
    }
}

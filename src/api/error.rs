use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::StoreError;

/// JSON body of every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    /// Machine-readable code: `validation_error`, `invalid_path`,
    /// `not_found` or `storage_error`.
    pub error: String,
    pub message: String,
}

/// Error returned by handlers, rendered as `{"error": code, "message": text}`.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    code: &'static str,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn code(&self) -> &'static str {
        self.code
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.code.to_string(),
            message: self.message,
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { .. } => {
                Self::new(StatusCode::NOT_FOUND, "not_found", err.to_string())
            }
            StoreError::Constraint(_) | StoreError::SessionClosed | StoreError::Database(_) => {
                tracing::error!(error = %err, "storage operation failed");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "storage_error", err.to_string())
            }
        }
    }
}

/// Body rejected before reaching storage: 422 for a shape mismatch, 400 for
/// malformed JSON, 415 without a JSON content type.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::new(rejection.status(), "validation_error", rejection.body_text())
    }
}

/// Path parameters that cannot be decoded, such as invalid UTF-8 after
/// percent-decoding.
impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::new(rejection.status(), "invalid_path", rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use rstest::rstest;

    #[rstest]
    #[case(StoreError::not_found("user", "u-1"), StatusCode::NOT_FOUND, "not_found")]
    #[case(
        StoreError::Constraint("violates foreign key constraint".to_string()),
        StatusCode::INTERNAL_SERVER_ERROR,
        "storage_error"
    )]
    #[case(StoreError::SessionClosed, StatusCode::INTERNAL_SERVER_ERROR, "storage_error")]
    #[case(
        StoreError::Database(sqlx::Error::PoolClosed),
        StatusCode::INTERNAL_SERVER_ERROR,
        "storage_error"
    )]
    fn store_errors_map_to_status(
        #[case] err: StoreError,
        #[case] status: StatusCode,
        #[case] code: &str,
    ) {
        let api = ApiError::from(err);

        assert_eq!(api.status(), status);
        assert_eq!(api.code(), code);
    }

    #[tokio::test]
    async fn renders_code_and_message_as_json() {
        let response = ApiError::from(StoreError::not_found("order", "o-9")).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let body: ErrorBody = serde_json::from_slice(&body).unwrap();

        assert_eq!(
            body,
            ErrorBody {
                error: "not_found".to_string(),
                message: "order o-9 not found".to_string(),
            }
        );
    }
}

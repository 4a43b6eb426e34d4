use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde_json::json;
use serde_json::Value;
use tracing::error;

use crate::utils::{db::DbError, storage::StorageError};

#[derive(Debug)]
pub struct Error {
    pub code: StatusCode,
    pub body: Json<Value>,
}

impl Error {
    pub fn new(code: StatusCode, message: &str) -> Self {
        Self {
            code,
            body: Json(json!({"message": message})),
        }
    }

    pub fn bad_request(message: &str) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn not_found(message: &str) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn unprocessable(message: &str) -> Self {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, message)
    }

    pub fn internal(message: &str) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn message(&self) -> &str {
        self.body["message"].as_str().unwrap_or_default()
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        if self.code.is_server_error() {
            error!(status = %self.code, "{}", self.message());
        }
        (self.code, self.body).into_response()
    }
}

impl From<(StatusCode, &str)> for Error {
    fn from((code, msg): (StatusCode, &str)) -> Self {
        Self::new(code, msg)
    }
}

impl From<MultipartError> for Error {
    fn from(error: MultipartError) -> Self {
        Self::new(error.status(), &error.body_text())
    }
}

impl From<DbError> for Error {
    fn from(error: DbError) -> Self {
        Self::internal(&format!("Database error: {}", error))
    }
}

impl From<StorageError> for Error {
    fn from(error: StorageError) -> Self {
        Self::internal(&format!("Storage error: {}", error))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tuple_conversion_keeps_status_and_message() {
        let err: Error = (StatusCode::NOT_FOUND, "Song not found").into();
        assert_eq!(err.code, StatusCode::NOT_FOUND);
        assert_eq!(err.message(), "Song not found");
    }

    #[test]
    fn backend_failures_become_server_errors() {
        let err: Error = DbError::Status {
            status: 500,
            body: "boom".to_string(),
        }
        .into();
        assert_eq!(err.code, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.message().contains("boom"));
    }

    #[test]
    fn into_response_uses_error_code() {
        let response = Error::unprocessable("Field 'title' is required").into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn internal_error_keeps_message_until_response() {
        let err = Error::internal("Storage error: bucket missing");
        assert_eq!(err.code, StatusCode::INTERNAL_SERVER_ERROR);

        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["message"], "Storage error: bucket missing");
    }
}

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::time::Duration;
use tracing::error;

pub type ServiceResult<T> = Result<T, AppError>;
pub type ServiceResponse<T> = ServiceResult<Json<T>>;

#[track_caller]
pub fn unexpected<T, E: Into<anyhow::Error>>(e: E) -> ServiceResult<T> {
    let caller = std::panic::Location::caller();
    error!("An unexpected error has occurred at {caller}: {}", e.into());
    Err(AppError::Unexpected)
}

/// Awaits a store call, giving up after `timeout`.
pub async fn bounded<T, F>(timeout: Duration, operation: &'static str, fut: F) -> ServiceResult<T>
where
    F: Future<Output = sqlx::Result<T>>,
{
    match tokio::time::timeout(timeout, fut).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(e)) => {
            error!("Store call {operation} failed: {e}");
            Err(AppError::Unexpected)
        }
        Err(_) => {
            error!("Store call {operation} timed out after {timeout:?}");
            Err(AppError::Unexpected)
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum AppError {
    Unexpected,
    DecodingRequestFailed,

    MessagesNotFound,
    MessagesInvalidPassword,
    MessagesInvalidNameLength,
    MessagesInvalidContentLength,
    MessagesInvalidPasswordLength,
}

impl<E: Into<anyhow::Error>> From<E> for AppError {
    #[track_caller]
    fn from(e: E) -> Self {
        unexpected::<(), E>(e).unwrap_err()
    }
}

impl AppError {
    pub const fn code(&self) -> &'static str {
        match self {
            AppError::Unexpected => "unexpected",
            AppError::DecodingRequestFailed => "decoding_request_failed",

            AppError::MessagesNotFound => "messages.not_found",
            AppError::MessagesInvalidPassword => "messages.invalid_password",
            AppError::MessagesInvalidNameLength => "messages.invalid_name_length",
            AppError::MessagesInvalidContentLength => "messages.invalid_content_length",
            AppError::MessagesInvalidPasswordLength => "messages.invalid_password_length",
        }
    }

    pub const fn message(&self) -> &'static str {
        match self {
            AppError::Unexpected => "An unexpected error has occurred.",
            AppError::DecodingRequestFailed => "Failed to decode request",

            AppError::MessagesNotFound => "Message not found or already deleted",
            AppError::MessagesInvalidPassword => "Invalid password",
            AppError::MessagesInvalidNameLength => "Name must be between 1 and 64 characters.",
            AppError::MessagesInvalidContentLength => {
                "Message must be between 1 and 2000 characters."
            }
            AppError::MessagesInvalidPasswordLength => {
                "Password must be between 1 and 72 bytes."
            }
        }
    }

    pub const fn http_status_code(&self) -> StatusCode {
        match self {
            AppError::DecodingRequestFailed
            | AppError::MessagesInvalidNameLength
            | AppError::MessagesInvalidContentLength
            | AppError::MessagesInvalidPasswordLength => StatusCode::BAD_REQUEST,

            AppError::MessagesInvalidPassword => StatusCode::UNAUTHORIZED,

            AppError::MessagesNotFound => StatusCode::NOT_FOUND,

            AppError::Unexpected => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub const fn response_parts(&self) -> (StatusCode, Json<ErrorResponse>) {
        let status = self.http_status_code();
        let response = ErrorResponse {
            error: self.message(),
            code: self.code(),
        };
        (status, Json(response))
    }
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: &'static str,
    pub code: &'static str,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.response_parts().into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::AppError;
    use axum::http::StatusCode;

    #[test]
    fn error_kinds_map_to_distinct_statuses() {
        assert_eq!(AppError::MessagesNotFound.http_status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::MessagesInvalidPassword.http_status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::DecodingRequestFailed.http_status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Unexpected.http_status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn foreign_errors_become_unexpected_without_leaking_details() {
        let error = AppError::from(anyhow::anyhow!("Table 'board.Messages' doesn't exist"));
        assert_eq!(error, AppError::Unexpected);
        assert_eq!(error.message(), "An unexpected error has occurred.");
    }
}

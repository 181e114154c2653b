// crates/backend-lib/src/error.rs

//! Central error type + Axum integration.
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Application error types with error codes and context
#[derive(Error, Debug)]
pub enum AppError {
    /// Unknown identifier or wrong secret. The two causes are never
    /// distinguished to the caller, so accounts cannot be enumerated.
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("No one-time code is pending for this account")]
    NoChallenge,

    #[error("One-time code has expired")]
    OtpExpired,

    /// Wrong code. Retryable: the pending challenge is kept until its TTL.
    #[error("One-time code does not match")]
    CodeMismatch,

    #[error("An account with this email already exists")]
    AccountExists,

    /// Account store unavailable. Retryable by the caller with backoff.
    #[error("Account store error: {0}")]
    TransientStore(String),

    #[error("Authentication rate limit exceeded")]
    AuthRateLimited,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AppError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidCredentials
            | AppError::NoChallenge
            | AppError::OtpExpired
            | AppError::CodeMismatch => StatusCode::UNAUTHORIZED,
            AppError::AccountExists => StatusCode::CONFLICT,
            AppError::AuthRateLimited => StatusCode::TOO_MANY_REQUESTS,
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::TransientStore(_) => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::InvalidCredentials => "AUTH_001",
            AppError::NoChallenge => "OTP_001",
            AppError::OtpExpired => "OTP_002",
            AppError::CodeMismatch => "OTP_003",
            AppError::AccountExists => "ACCT_001",
            AppError::TransientStore(_) => "STORE_001",
            AppError::AuthRateLimited => "AUTH_003",
            AppError::InvalidInput(_) => "VAL_001",
            AppError::Internal(_) => "INT_001",
            AppError::Io(_) => "IO_001",
            AppError::Json(_) => "JSON_001",
        }
    }

    /// Get a sanitized message suitable for production use
    pub fn sanitized_message(&self) -> String {
        match self {
            AppError::InvalidCredentials => "Invalid credentials".to_string(),
            AppError::NoChallenge | AppError::OtpExpired | AppError::CodeMismatch => {
                "Code incorrect or expired".to_string()
            },
            AppError::AccountExists => "Account already exists".to_string(),
            AppError::TransientStore(_) => {
                "Service temporarily unavailable, please retry".to_string()
            },
            AppError::AuthRateLimited => {
                "Too many authentication attempts, please try again later".to_string()
            },
            AppError::InvalidInput(_) => "Invalid input provided".to_string(),
            AppError::Internal(_) => "An internal server error occurred".to_string(),
            AppError::Json(_) => "Invalid request format".to_string(),
            AppError::Io(_) => "Internal server error".to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_code = self.error_code();

        // Use detailed messages in development, sanitized in production
        let message = if cfg!(debug_assertions) {
            self.to_string()
        } else {
            self.sanitized_message()
        };

        // Create a JSON response with error details
        let body = serde_json::json!({
            "error": {
                "code": error_code,
                "message": message,
            }
        });

        (status, axum::Json(body)).into_response()
    }
}

impl From<String> for AppError {
    fn from(msg: String) -> Self {
        AppError::Internal(msg)
    }
}

impl From<&str> for AppError {
    fn from(msg: &str) -> Self {
        AppError::Internal(msg.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use std::io::{Error as IoError, ErrorKind};

    #[test]
    fn test_app_error_display() {
        assert_eq!(
            AppError::InvalidCredentials.to_string(),
            "Invalid credentials"
        );

        let io_error = AppError::Io(IoError::new(ErrorKind::NotFound, "File not found"));
        assert!(io_error.to_string().contains("IO error"));

        assert_eq!(
            AppError::CodeMismatch.to_string(),
            "One-time code does not match"
        );
    }

    #[test]
    fn test_app_error_status_codes() {
        assert_eq!(
            AppError::InvalidCredentials.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(AppError::NoChallenge.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::OtpExpired.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::CodeMismatch.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::AccountExists.status_code(), StatusCode::CONFLICT);
        assert_eq!(
            AppError::AuthRateLimited.status_code(),
            StatusCode::TOO_MANY_REQUESTS
        );
        assert_eq!(
            AppError::TransientStore("down".to_string()).status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            AppError::Internal("test".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );

        // Create a JSON error using from_str which will fail parsing and create a valid JsonError
        let json_err: serde_json::Error =
            serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        assert_eq!(
            AppError::Json(json_err).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_app_error_error_codes() {
        assert_eq!(AppError::InvalidCredentials.error_code(), "AUTH_001");
        assert_eq!(AppError::NoChallenge.error_code(), "OTP_001");
        assert_eq!(AppError::OtpExpired.error_code(), "OTP_002");
        assert_eq!(AppError::CodeMismatch.error_code(), "OTP_003");
        assert_eq!(
            AppError::TransientStore("down".to_string()).error_code(),
            "STORE_001"
        );
        assert_eq!(
            AppError::Internal("test".to_string()).error_code(),
            "INT_001"
        );
    }

    #[test]
    fn test_sanitized_messages_do_not_leak_cause() {
        // Unknown identifier and wrong secret must read identically
        assert_eq!(
            AppError::InvalidCredentials.sanitized_message(),
            "Invalid credentials"
        );
        // Expired vs mismatch vs missing all collapse to the same text
        let expired = AppError::OtpExpired.sanitized_message();
        assert_eq!(expired, AppError::CodeMismatch.sanitized_message());
        assert_eq!(expired, AppError::NoChallenge.sanitized_message());
    }

    #[test]
    fn test_app_error_into_response() {
        let error = AppError::InvalidCredentials;
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_error_from_impls() {
        let io_err = IoError::new(ErrorKind::PermissionDenied, "Permission denied");
        let app_err: AppError = io_err.into();
        assert!(matches!(app_err, AppError::Io(_)));

        let json_err: serde_json::Error =
            serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let app_err: AppError = json_err.into();
        assert!(matches!(app_err, AppError::Json(_)));

        let string_err = "String error".to_string();
        let app_err: AppError = string_err.into();
        assert!(matches!(app_err, AppError::Internal(_)));
    }

    #[tokio::test]
    async fn test_error_serialization() {
        let json_err: serde_json::Error =
            serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let app_error = AppError::Json(json_err);
        let response = app_error.into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        // Content type should be application/json
        let response_headers = response.headers();
        assert!(response_headers
            .get("content-type")
            .unwrap()
            .to_str()
            .unwrap()
            .contains("application/json"));
    }
}

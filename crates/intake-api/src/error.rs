//! HTTP error response conversion
//!
//! This module provides HTTP-specific error response conversion for AppError.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use intake_core::models::SubmitResponse;
use intake_core::{AppError, ConfigError, LogLevel, ValidationError};
use intake_notify::NotifyError;
use intake_storage::UploadBatchError;

/// Wrapper type for AppError to implement IntoResponse
/// This is necessary because of Rust's orphan rules - we can't implement
/// IntoResponse (external trait) for AppError (external type from intake-core).
///
/// It also carries the redaction policy: the handler stamps the production
/// flag from the loaded [`Config`](intake_core::Config) onto the error, so
/// nothing here reads the process environment.
#[derive(Debug)]
pub struct HttpAppError {
    pub error: AppError,
    production: bool,
}

impl HttpAppError {
    /// Apply the production redaction policy from the loaded configuration.
    pub fn in_production(mut self, production: bool) -> Self {
        self.production = production;
        self
    }
}

impl From<AppError> for HttpAppError {
    fn from(error: AppError) -> Self {
        HttpAppError {
            error,
            production: false,
        }
    }
}

/// Helper function to log errors based on their log level
fn log_error(error: &AppError) {
    let error_type = error.error_type();
    match error.log_level() {
        LogLevel::Debug => {
            tracing::debug!(error = %error, error_type = error_type, "Request failed");
        }
        LogLevel::Warn => {
            tracing::warn!(error = %error, error_type = error_type, "Request failed");
        }
        LogLevel::Error => {
            tracing::error!(error = %error, error_type = error_type, "Request failed");
        }
    }
}

impl IntoResponse for HttpAppError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.error.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        log_error(&self.error);

        // The client message is always safe; raw detail only leaves the
        // process outside production, and never for sensitive errors.
        let detail = if self.production || self.error.is_sensitive() {
            None
        } else {
            Some(self.error.to_string())
        };
        let body = Json(SubmitResponse::failure(self.error.client_message(), detail));

        (status, body).into_response()
    }
}

// Convert domain errors to HttpAppError (avoids orphan rule: we impl for local HttpAppError)

impl From<ValidationError> for HttpAppError {
    fn from(err: ValidationError) -> Self {
        AppError::Validation(err.to_string()).into()
    }
}

impl From<ConfigError> for HttpAppError {
    fn from(err: ConfigError) -> Self {
        AppError::Config(err.to_string()).into()
    }
}

impl From<UploadBatchError> for HttpAppError {
    fn from(err: UploadBatchError) -> Self {
        AppError::Upload {
            failed: err.failed_file_names(),
            detail: err.to_string(),
        }
        .into()
    }
}

impl From<NotifyError> for HttpAppError {
    fn from(err: NotifyError) -> Self {
        AppError::Notification {
            channels: err.failed_channels(),
            detail: err.to_string(),
        }
        .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn response_json(err: HttpAppError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body reads");
        let json = serde_json::from_slice(&bytes).expect("body is json");
        (status, json)
    }

    #[test]
    fn validation_error_maps_to_400_with_all_fields() {
        let err: HttpAppError =
            ValidationError::MissingFields(vec!["fullName".into(), "projectType".into()]).into();
        assert_eq!(err.error.http_status_code(), 400);
        let msg = err.error.client_message();
        assert!(msg.contains("fullName"));
        assert!(msg.contains("projectType"));
    }

    #[test]
    fn config_error_maps_to_503() {
        let err: HttpAppError = ConfigError::MissingKeys(vec!["S3_BUCKET".to_string()]).into();
        assert_eq!(err.error.http_status_code(), 503);
        assert!(err.error.is_sensitive());
    }

    #[test]
    fn upload_batch_error_keeps_file_names() {
        let batch = UploadBatchError {
            failures: vec![intake_storage::FailedUpload {
                file_name: "big.pdf".to_string(),
                cause: "Upload failed: timeout".to_string(),
            }],
        };
        let err: HttpAppError = batch.into();
        assert_eq!(err.error.http_status_code(), 500);
        assert!(err.error.client_message().contains("big.pdf"));
    }

    #[test]
    fn notify_error_names_the_channel() {
        let err: HttpAppError = NotifyError {
            failures: vec![(intake_notify::Channel::Chat, "401 Unauthorized".to_string())],
        }
        .into();
        assert!(err.error.client_message().contains("chat"));
    }

    #[tokio::test]
    async fn development_responses_carry_error_detail() {
        let err: HttpAppError = ValidationError::MissingFields(vec!["fullName".into()]).into();
        let (status, json) = response_json(err).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json.get("error").is_some());
    }

    #[tokio::test]
    async fn production_responses_redact_error_detail() {
        let err: HttpAppError = ValidationError::MissingFields(vec!["fullName".into()]).into();
        let (status, json) = response_json(err.in_production(true)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["message"], "Missing required fields: fullName");
        assert!(json.get("error").is_none());
    }

    #[tokio::test]
    async fn sensitive_errors_are_redacted_even_in_development() {
        let err: HttpAppError = ConfigError::MissingKeys(vec!["S3_BUCKET".to_string()]).into();
        let (status, json) = response_json(err).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert!(json.get("error").is_none());
        let message = json["message"].as_str().unwrap_or_default();
        assert!(!message.contains("S3_BUCKET"));
    }
}

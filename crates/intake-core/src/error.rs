//! Application error taxonomy.
//!
//! Every pipeline stage failure maps onto one [`AppError`] variant, which
//! carries its HTTP status, client-facing message, sensitivity, and log
//! level. The HTTP layer turns these into JSON responses; see the api crate.

/// Log level for error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Expected errors like validation failures.
    Debug,
    /// Recoverable operational issues.
    Warn,
    /// Unexpected failures.
    Error,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Submission failed validation. The message already enumerates every
    /// missing field or file violation.
    #[error("{0}")]
    Validation(String),

    /// Request body exceeded the configured maximum.
    #[error("Request too large")]
    PayloadTooLarge,

    /// Operational configuration is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// One or more file uploads failed; `failed` names every failing file.
    #[error("Upload failed for {}: {}", .failed.join(", "), .detail)]
    Upload { failed: Vec<String>, detail: String },

    /// One or both notification channels failed; `channels` names each one.
    #[error("Notification failed via {}: {}", .channels.join(", "), .detail)]
    Notification {
        channels: Vec<String>,
        detail: String,
    },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn http_status_code(&self) -> u16 {
        match self {
            AppError::Validation(_) => 400,
            AppError::PayloadTooLarge => 413,
            AppError::Config(_) => 503,
            AppError::Upload { .. } => 500,
            AppError::Notification { .. } => 500,
            AppError::Internal(_) => 500,
        }
    }

    pub fn error_type(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "Validation",
            AppError::PayloadTooLarge => "PayloadTooLarge",
            AppError::Config(_) => "Config",
            AppError::Upload { .. } => "Upload",
            AppError::Notification { .. } => "Notification",
            AppError::Internal(_) => "Internal",
        }
    }

    /// Client-facing message. Safe to return in production: it names fields,
    /// files, and channels but never backend error detail or credentials.
    pub fn client_message(&self) -> String {
        match self {
            AppError::Validation(msg) => msg.clone(),
            AppError::PayloadTooLarge => "Request too large".to_string(),
            AppError::Config(_) => "Backend storage is not configured correctly".to_string(),
            AppError::Upload { failed, .. } => {
                format!("Failed to upload file(s): {}", failed.join(", "))
            }
            AppError::Notification { channels, .. } => {
                format!("Failed to send notification via {}", channels.join(", "))
            }
            AppError::Internal(_) => "An unexpected error occurred".to_string(),
        }
    }

    /// Whether details must be hidden even outside production.
    pub fn is_sensitive(&self) -> bool {
        matches!(self, AppError::Config(_) | AppError::Internal(_))
    }

    pub fn log_level(&self) -> LogLevel {
        match self {
            AppError::Validation(_) | AppError::PayloadTooLarge => LogLevel::Debug,
            AppError::Upload { .. } | AppError::Notification { .. } => LogLevel::Warn,
            AppError::Config(_) | AppError::Internal(_) => LogLevel::Error,
        }
    }
}

impl From<crate::config::ConfigError> for AppError {
    fn from(err: crate::config::ConfigError) -> Self {
        AppError::Config(err.to_string())
    }
}

impl From<crate::validation::ValidationError> for AppError {
    fn from(err: crate::validation::ValidationError) -> Self {
        AppError::Validation(err.to_string())
    }
}

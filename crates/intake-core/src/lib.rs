//! Core types for the request intake service.
//!
//! This crate holds everything the other crates share: the environment-backed
//! configuration, the domain models for a form submission, the submission
//! validator, and the application error taxonomy with its HTTP metadata.

pub mod config;
pub mod error;
pub mod models;
pub mod validation;

pub use config::{Config, ConfigError, EmailSettings, S3Settings, TelegramSettings};
pub use error::{AppError, LogLevel};
pub use models::{RawFile, SubmitResponse, Submission, UploadedFile, UploadedFileEntry};
pub use validation::{validate, FileViolation, UploadPolicy, ValidationError};

//! Intake API Library
//!
//! This crate provides the HTTP handlers, middleware, and application setup
//! for the request intake service.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod setup;
pub mod state;
pub mod telemetry;

pub use error::HttpAppError;
pub use state::AppState;

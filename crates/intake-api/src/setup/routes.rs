//! Route configuration and setup.

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use intake_core::Config;

use crate::handlers::{health::health, submit_request::submit_request};
use crate::middleware::body_size_guard;
use crate::state::AppState;

/// Setup all application routes
pub fn setup_routes(state: Arc<AppState>) -> Result<Router> {
    let cors = setup_cors(&state.config)?;
    let max_body = state.config.max_body_bytes();

    let api_routes = Router::new()
        .route("/api/submit-request", post(submit_request))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            body_size_guard,
        ))
        .layer(DefaultBodyLimit::max(max_body));

    let app = Router::new()
        .route("/health", get(health))
        .merge(api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state);

    Ok(app)
}

fn setup_cors(config: &Config) -> Result<CorsLayer> {
    if config.is_production() {
        let origins = config
            .cors_origins
            .iter()
            .map(|origin| origin.parse::<HeaderValue>())
            .collect::<Result<Vec<_>, _>>()
            .context("Invalid CORS origin")?;
        Ok(CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST])
            .allow_headers(Any))
    } else {
        Ok(CorsLayer::permissive())
    }
}

//! Application setup and initialization
//!
//! This module contains all application initialization logic extracted from
//! main.rs for better organization and testability.

pub mod routes;
pub mod server;

use std::sync::Arc;

use anyhow::{Context, Result};

use intake_core::Config;
use intake_notify::{SmtpNotifier, TelegramNotifier};
use intake_storage::S3Storage;

use crate::state::AppState;

/// Validate critical configuration values at startup to catch
/// misconfigurations early.
pub fn validate_config(config: &Config) -> Result<()> {
    if config.is_production() && config.cors_origins.contains(&"*".to_string()) {
        return Err(anyhow::anyhow!(
            "CORS configured to allow all origins (*) in production - this is a security risk. \
            Please set specific allowed origins via CORS_ORIGINS environment variable."
        ));
    }
    Ok(())
}

/// Build the application state: storage client, chat client, and SMTP
/// transport, each constructed once from the loaded configuration.
pub async fn build_state(config: Config) -> Result<Arc<AppState>> {
    let storage = S3Storage::new(
        config.s3.bucket.clone(),
        config.s3.region.clone(),
        config.s3.endpoint_url.clone(),
    )
    .await
    .context("Failed to initialize S3 storage")?;
    tracing::info!(
        bucket = %config.s3.bucket,
        region = %config.s3.region,
        custom_endpoint = config.s3.endpoint_url.is_some(),
        "Storage backend initialized"
    );

    let chat = TelegramNotifier::new(&config.telegram)
        .context("Failed to initialize Telegram notifier")?;
    let email = SmtpNotifier::new(&config.email).context("Failed to initialize SMTP notifier")?;

    Ok(Arc::new(AppState {
        config,
        storage: Arc::new(storage),
        chat: Arc::new(chat),
        email: Arc::new(email),
    }))
}

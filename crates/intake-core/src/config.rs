//! Configuration module
//!
//! Resolves all operational settings from the process environment: S3 storage
//! target, Telegram bot credentials, SMTP transport, server port, and upload
//! policy. Loading fails fast, and a failure reports every missing key rather
//! than just the first one found.
//!
//! No other component reads the environment directly; the loaded [`Config`] is
//! passed down explicitly so tests can build one from a fixture map.

use std::collections::HashMap;
use std::env;

use crate::validation::UploadPolicy;

const DEFAULT_SERVER_PORT: u16 = 3000;
const DEFAULT_MAX_FILE_SIZE_MB: usize = 100;
const DEFAULT_ALLOWED_CONTENT_TYPES: &[&str] = &["image/jpeg", "image/png", "application/pdf"];

/// Keys that must be present for the service to operate.
const REQUIRED_KEYS: &[&str] = &[
    "S3_BUCKET",
    "S3_REGION",
    "TELEGRAM_BOT_TOKEN",
    "TELEGRAM_CHAT_ID",
    "EMAIL_HOST",
    "EMAIL_PORT",
    "EMAIL_SECURE",
    "EMAIL_USER",
    "EMAIL_PASS",
    "EMAIL_FROM",
    "EMAIL_TO",
];

/// Configuration loading errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing environment variables: {}", .0.join(", "))]
    MissingKeys(Vec<String>),

    #[error("Invalid value for {key}: {reason}")]
    InvalidValue { key: String, reason: String },

    #[error("Invalid S3 endpoint URL '{0}': must use https")]
    InsecureEndpoint(String),
}

/// Object storage target. AWS credentials themselves are picked up by the SDK
/// default provider chain (AWS_ACCESS_KEY_ID / AWS_SECRET_ACCESS_KEY).
#[derive(Debug, Clone)]
pub struct S3Settings {
    pub bucket: String,
    pub region: String,
    /// Custom endpoint for S3-compatible providers (MinIO, DigitalOcean
    /// Spaces, Supabase storage). Must be https.
    pub endpoint_url: Option<String>,
}

/// Telegram bot credential and target chat.
#[derive(Debug, Clone)]
pub struct TelegramSettings {
    pub bot_token: String,
    pub chat_id: String,
}

/// SMTP transport and envelope settings.
#[derive(Debug, Clone)]
pub struct EmailSettings {
    pub host: String,
    pub port: u16,
    /// true = implicit TLS (SMTPS), false = STARTTLS.
    pub secure: bool,
    pub user: String,
    pub pass: String,
    pub from: String,
    pub to: String,
}

/// Application configuration, loaded once at startup and injected everywhere.
#[derive(Debug, Clone)]
pub struct Config {
    pub environment: String,
    pub server_port: u16,
    pub cors_origins: Vec<String>,
    pub s3: S3Settings,
    pub telegram: TelegramSettings,
    pub email: EmailSettings,
    pub upload: UploadPolicy,
}

impl Config {
    /// Load configuration from the process environment (reading `.env` first
    /// if present).
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an injectable lookup, so tests can supply a
    /// fixture instead of mutating the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let missing: Vec<String> = REQUIRED_KEYS
            .iter()
            .filter(|key| lookup(key).map_or(true, |v| v.trim().is_empty()))
            .map(|key| key.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(ConfigError::MissingKeys(missing));
        }

        let required = |key: &str| lookup(key).unwrap_or_default();

        let endpoint_url = lookup("S3_ENDPOINT_URL").filter(|v| !v.trim().is_empty());
        if let Some(ref endpoint) = endpoint_url {
            if !endpoint.starts_with("https://") {
                return Err(ConfigError::InsecureEndpoint(endpoint.clone()));
            }
        }

        let email_port = parse_value(&lookup, "EMAIL_PORT")?;
        let server_port = lookup("SERVER_PORT")
            .map(|v| parse_str("SERVER_PORT", &v))
            .transpose()?
            .unwrap_or(DEFAULT_SERVER_PORT);
        let max_file_size_mb: usize = lookup("MAX_FILE_SIZE_MB")
            .map(|v| parse_str("MAX_FILE_SIZE_MB", &v))
            .transpose()?
            .unwrap_or(DEFAULT_MAX_FILE_SIZE_MB);

        let allowed_content_types = lookup("ALLOWED_CONTENT_TYPES")
            .map(|v| {
                v.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_else(|| {
                DEFAULT_ALLOWED_CONTENT_TYPES
                    .iter()
                    .map(|s| s.to_string())
                    .collect()
            });

        let environment = lookup("ENVIRONMENT")
            .or_else(|| lookup("APP_ENV"))
            .unwrap_or_else(|| "development".to_string());

        let cors_origins = lookup("CORS_ORIGINS")
            .unwrap_or_else(|| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(Config {
            environment,
            server_port,
            cors_origins,
            s3: S3Settings {
                bucket: required("S3_BUCKET"),
                region: required("S3_REGION"),
                endpoint_url,
            },
            telegram: TelegramSettings {
                bot_token: required("TELEGRAM_BOT_TOKEN"),
                chat_id: required("TELEGRAM_CHAT_ID"),
            },
            email: EmailSettings {
                host: required("EMAIL_HOST"),
                port: email_port,
                secure: required("EMAIL_SECURE").eq_ignore_ascii_case("true"),
                user: required("EMAIL_USER"),
                pass: required("EMAIL_PASS"),
                from: required("EMAIL_FROM"),
                to: required("EMAIL_TO"),
            },
            upload: UploadPolicy {
                max_file_size_bytes: max_file_size_mb * 1024 * 1024,
                allowed_content_types,
                require_attachment: true,
            },
        })
    }

    /// Build a config from a key/value map. Test fixture constructor.
    pub fn from_map(map: &HashMap<&str, &str>) -> Result<Self, ConfigError> {
        Self::from_lookup(|key| map.get(key).map(|v| v.to_string()))
    }

    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    /// Maximum accepted request body size: the per-file cap also bounds the
    /// whole multipart body.
    pub fn max_body_bytes(&self) -> usize {
        self.upload.max_file_size_bytes
    }
}

fn parse_value<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    let value = lookup(key).unwrap_or_default();
    parse_str(key, &value)
}

fn parse_str<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    value.parse().map_err(|e| ConfigError::InvalidValue {
        key: key.to_string(),
        reason: format!("'{}': {}", value, e),
    })
}

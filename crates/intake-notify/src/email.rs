//! Email notifier backed by SMTP.

use anyhow::{Context, Result};
use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::sync::Arc;

use crate::EmailNotifier;
use intake_core::config::EmailSettings;

/// SMTP notifier. The transport is built once at startup; `secure` selects
/// implicit TLS (SMTPS) versus STARTTLS, matching common relay setups on
/// ports 465 and 587 respectively.
#[derive(Clone)]
pub struct SmtpNotifier {
    mailer: Arc<AsyncSmtpTransport<Tokio1Executor>>,
    from: Mailbox,
    to: Mailbox,
}

impl SmtpNotifier {
    pub fn new(settings: &EmailSettings) -> Result<Self> {
        let credentials = Credentials::new(settings.user.clone(), settings.pass.clone());
        let mailer = if settings.secure {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&settings.host)
                .context("Invalid SMTP relay host")?
                .port(settings.port)
                .credentials(credentials)
                .build()
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&settings.host)
                .context("Invalid SMTP relay host")?
                .port(settings.port)
                .credentials(credentials)
                .build()
        };

        let from: Mailbox = settings
            .from
            .parse()
            .with_context(|| format!("Invalid EMAIL_FROM address '{}'", settings.from))?;
        let to: Mailbox = settings
            .to
            .parse()
            .with_context(|| format!("Invalid EMAIL_TO address '{}'", settings.to))?;

        tracing::info!(
            host = %settings.host,
            port = settings.port,
            secure = settings.secure,
            "SMTP transport initialized"
        );

        Ok(Self {
            mailer: Arc::new(mailer),
            from,
            to,
        })
    }
}

#[async_trait]
impl EmailNotifier for SmtpNotifier {
    async fn send(&self, subject: &str, body: &str) -> Result<()> {
        let email = Message::builder()
            .from(self.from.clone())
            .to(self.to.clone())
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())
            .context("Failed to build email message")?;

        self.mailer
            .send(email)
            .await
            .context("SMTP send failed")?;

        tracing::info!(to = %self.to, "Email notification sent");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> EmailSettings {
        EmailSettings {
            host: "smtp.example.com".to_string(),
            port: 587,
            secure: false,
            user: "robot@example.com".to_string(),
            pass: "hunter2".to_string(),
            from: "robot@example.com".to_string(),
            to: "print-team@example.com".to_string(),
        }
    }

    #[test]
    fn builds_transport_from_valid_settings() {
        assert!(SmtpNotifier::new(&settings()).is_ok());
    }

    #[test]
    fn rejects_invalid_from_address() {
        let mut s = settings();
        s.from = "not an address".to_string();
        let err = SmtpNotifier::new(&s).err().expect("should fail");
        assert!(err.to_string().contains("EMAIL_FROM"));
    }
}

//! Concurrent fan-out over both notification channels.

use std::fmt;

use crate::{ChatNotifier, EmailNotifier};

/// Notification channel identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Chat,
    Email,
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Channel::Chat => write!(f, "chat"),
            Channel::Email => write!(f, "email"),
        }
    }
}

/// Aggregated error naming every channel that failed.
#[derive(Debug)]
pub struct NotifyError {
    pub failures: Vec<(Channel, String)>,
}

impl fmt::Display for NotifyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "notification failed on ")?;
        for (i, (channel, cause)) in self.failures.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{}: {}", channel, cause)?;
        }
        Ok(())
    }
}

impl std::error::Error for NotifyError {}

impl NotifyError {
    pub fn failed_channels(&self) -> Vec<String> {
        self.failures.iter().map(|(c, _)| c.to_string()).collect()
    }
}

/// Send `text` over both channels concurrently.
///
/// Both sends always run to completion; a failure in one never suppresses
/// the attempt of the other, and if both fail the error reports both.
pub async fn dispatch(
    chat: &dyn ChatNotifier,
    email: &dyn EmailNotifier,
    subject: &str,
    text: &str,
) -> Result<(), NotifyError> {
    let (chat_result, email_result) = tokio::join!(chat.send(text), email.send(subject, text));

    let mut failures = Vec::new();
    if let Err(e) = chat_result {
        tracing::warn!(error = %e, "Chat notification failed");
        failures.push((Channel::Chat, e.to_string()));
    }
    if let Err(e) = email_result {
        tracing::warn!(error = %e, "Email notification failed");
        failures.push((Channel::Email, e.to_string()));
    }

    if failures.is_empty() {
        Ok(())
    } else {
        Err(NotifyError { failures })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct StubChannel {
        sent: Arc<AtomicUsize>,
        fail: bool,
    }

    impl StubChannel {
        fn failing() -> Self {
            Self {
                fail: true,
                ..Default::default()
            }
        }

        fn sent_count(&self) -> usize {
            self.sent.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ChatNotifier for StubChannel {
        async fn send(&self, _text: &str) -> anyhow::Result<()> {
            if self.fail {
                anyhow::bail!("bot token revoked");
            }
            self.sent.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    #[async_trait]
    impl EmailNotifier for StubChannel {
        async fn send(&self, _subject: &str, _body: &str) -> anyhow::Result<()> {
            if self.fail {
                anyhow::bail!("relay refused connection");
            }
            self.sent.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    #[tokio::test]
    async fn both_channels_succeed() {
        let chat = StubChannel::default();
        let email = StubChannel::default();
        dispatch(&chat, &email, "subject", "text")
            .await
            .expect("both sends succeed");
        assert_eq!(chat.sent_count(), 1);
        assert_eq!(email.sent_count(), 1);
    }

    #[tokio::test]
    async fn chat_failure_does_not_suppress_email() {
        let chat = StubChannel::failing();
        let email = StubChannel::default();
        let err = dispatch(&chat, &email, "subject", "text")
            .await
            .expect_err("chat failed");
        assert_eq!(err.failed_channels(), vec!["chat"]);
        assert!(err.to_string().contains("chat"));
        // The email was still attempted and delivered.
        assert_eq!(email.sent_count(), 1);
    }

    #[tokio::test]
    async fn both_failures_are_reported_together() {
        let chat = StubChannel::failing();
        let email = StubChannel::failing();
        let err = dispatch(&chat, &email, "subject", "text")
            .await
            .expect_err("both failed");
        assert_eq!(err.failed_channels(), vec!["chat", "email"]);
        let text = err.to_string();
        assert!(text.contains("bot token revoked"));
        assert!(text.contains("relay refused connection"));
    }
}

//! Notification fan-out for accepted submissions.
//!
//! One plain-text summary goes out over two independent channels: a Telegram
//! chat message and a transactional email. Both sends are always attempted;
//! the dispatcher aggregates failures so one channel never masks the other.

pub mod dispatch;
pub mod email;
pub mod summary;
pub mod telegram;

pub use dispatch::{dispatch, Channel, NotifyError};
pub use email::SmtpNotifier;
pub use summary::format_summary;
pub use telegram::TelegramNotifier;

use async_trait::async_trait;

/// Chat channel seam. Implemented by [`TelegramNotifier`]; tests substitute
/// a recording stub.
#[async_trait]
pub trait ChatNotifier: Send + Sync {
    async fn send(&self, text: &str) -> anyhow::Result<()>;
}

/// Email channel seam. Implemented by [`SmtpNotifier`].
#[async_trait]
pub trait EmailNotifier: Send + Sync {
    async fn send(&self, subject: &str, body: &str) -> anyhow::Result<()>;
}

/// Subject line used for the transactional email.
pub const EMAIL_SUBJECT: &str = "New Print Request Submitted";

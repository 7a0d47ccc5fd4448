//! Mail transport implementations.

use async_trait::async_trait;

use crate::domain::ports::{Mailer, MailerError};

/// Transport used when no SMTP relay is configured.
///
/// Logs the outbound message and reports [`MailerError::Unconfigured`] so
/// callers trigger their fallback (e.g. handing the invite link back to
/// the requester) instead of believing the mail was delivered.
pub struct LogMailer;

impl LogMailer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LogMailer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, to: &str, subject: &str, _html: &str) -> Result<(), MailerError> {
        tracing::info!(to, subject, "mail transport unconfigured, message not sent");
        Err(MailerError::Unconfigured)
    }
}

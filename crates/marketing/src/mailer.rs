//! Outbound-mail contract.
//!
//! Email delivery is an external collaborator; the core only needs a way to
//! hand one message to one recipient. A capturing implementation for tests
//! lives in `opencrm-infra`.

use thiserror::Error;

/// One message addressed to one recipient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMail {
    pub to_name: String,
    pub to_email: String,
    pub message: String,
}

/// Mail delivery failure.
#[derive(Debug, Error)]
pub enum MailerError {
    #[error("mail delivery failed for {recipient}: {reason}")]
    Delivery { recipient: String, reason: String },
}

impl MailerError {
    pub fn delivery(recipient: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Delivery {
            recipient: recipient.into(),
            reason: reason.into(),
        }
    }
}

/// Outbound mail delivery.
pub trait Mailer: Send + Sync {
    fn send(&self, mail: OutboundMail) -> Result<(), MailerError>;
}

//! Capturing mailer for tests/dev.

use std::collections::HashSet;
use std::sync::Mutex;

use opencrm_marketing::{Mailer, MailerError, OutboundMail};

/// Mailer that records every message instead of delivering it.
///
/// Addresses registered with [`fail_address`] bounce, for exercising the
/// skip-and-continue dispatch path.
///
/// [`fail_address`]: RecordingMailer::fail_address
#[derive(Debug, Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<OutboundMail>>,
    failing: Mutex<HashSet<String>>,
}

impl RecordingMailer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every send to `email` bounce from now on.
    pub fn fail_address(&self, email: impl Into<String>) {
        if let Ok(mut failing) = self.failing.lock() {
            failing.insert(email.into());
        }
    }

    /// Everything sent so far, in send order.
    pub fn sent(&self) -> Vec<OutboundMail> {
        self.sent.lock().map(|s| s.clone()).unwrap_or_default()
    }
}

impl Mailer for RecordingMailer {
    fn send(&self, mail: OutboundMail) -> Result<(), MailerError> {
        let bounces = self
            .failing
            .lock()
            .map(|f| f.contains(&mail.to_email))
            .unwrap_or(false);
        if bounces {
            return Err(MailerError::delivery(mail.to_email, "address bounced"));
        }

        if let Ok(mut sent) = self.sent.lock() {
            sent.push(mail);
        }
        Ok(())
    }
}

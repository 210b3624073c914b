use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use lettre::message::Mailbox;

use super::{Email, Notifier, NotifyError};

/// Notifier that keeps sent emails in memory instead of delivering them
///
/// Each email is still built into a lettre message, so address and
/// composition errors surface exactly as they would over SMTP.
#[derive(Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<Email>>,
    failing: AtomicBool,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent sends fail as if the relay were unreachable
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn sent(&self) -> Vec<Email> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send(&self, email: &Email) -> Result<(), NotifyError> {
        let from: Mailbox = "job-board <hr@example.com>".parse()?;
        email.to_message(&from)?;

        if self.failing.load(Ordering::SeqCst) {
            return Err(NotifyError::Unavailable("SMTP relay unreachable".to_string()));
        }
        self.sent.lock().unwrap().push(email.clone());
        Ok(())
    }
}

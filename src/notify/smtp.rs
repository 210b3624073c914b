use async_trait::async_trait;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{SmtpTransport, Transport};
use tracing::{debug, info};

use super::{Email, Notifier, NotifyError};
use crate::config::MailConfig;

/// Sends email through an authenticated SMTP relay
pub struct SmtpNotifier {
    from: Mailbox,
    mailer: SmtpTransport,
}

impl SmtpNotifier {
    pub fn new(service_name: &str, mail: &MailConfig) -> Result<Self, NotifyError> {
        let from: Mailbox = format!("{} <{}>", service_name, mail.from_email).parse()?;
        let creds = Credentials::new(mail.smtp_user.clone(), mail.smtp_pass.clone());

        let mailer = SmtpTransport::relay(&mail.smtp_server)
            .map_err(NotifyError::Transport)?
            .port(mail.smtp_port)
            .credentials(creds)
            .build();

        info!("SMTP relay configured: {}:{}", mail.smtp_server, mail.smtp_port);
        Ok(Self { from, mailer })
    }
}

#[async_trait]
impl Notifier for SmtpNotifier {
    async fn send(&self, email: &Email) -> Result<(), NotifyError> {
        let message = email.to_message(&self.from)?;
        let mailer = self.mailer.clone();

        debug!("Sending email to {}", email.to);
        // lettre's SmtpTransport blocks on network I/O
        tokio::task::spawn_blocking(move || mailer.send(&message))
            .await
            .map_err(NotifyError::Task)?
            .map_err(NotifyError::Transport)?;

        info!("Email sent to {}", email.to);
        Ok(())
    }
}

use std::fmt;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use lettre::message::{Attachment, Mailbox, MultiPart, SinglePart, header::ContentType};
use lettre::Message;
use tracing::{debug, info};

pub mod application;
#[cfg(test)]
pub mod recording;
pub mod smtp;

pub use application::ApplicationReceived;
pub use smtp::SmtpNotifier;

const SIGNATURE_IMAGE: &str = "images/emailSignature.png";
const INTERVIEW_DETAILS_PDF: &str = "pdfs/interviewDetails.pdf";

/// Errors raised while composing or delivering an email
#[derive(Debug)]
pub enum NotifyError {
    /// Static attachment could not be read
    Attachment { path: PathBuf, source: std::io::Error },

    /// Sender or recipient is not a valid mailbox
    Address(lettre::address::AddressError),

    /// Attachment declared an unparsable content type
    ContentType(String),

    /// Message could not be assembled
    Message(lettre::error::Error),

    /// SMTP transport rejected or failed to deliver the message
    Transport(lettre::transport::smtp::Error),

    /// Blocking send task did not complete
    Task(tokio::task::JoinError),

    /// Delivery outage raised by the in-memory notifier
    #[cfg(test)]
    Unavailable(String),
}

impl fmt::Display for NotifyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotifyError::Attachment { path, source } => {
                write!(f, "Failed to read attachment {}: {}", path.display(), source)
            }
            NotifyError::Address(e) => write!(f, "Invalid email address: {}", e),
            NotifyError::ContentType(ct) => write!(f, "Invalid content type: {}", ct),
            NotifyError::Message(e) => write!(f, "Failed to build email: {}", e),
            NotifyError::Transport(e) => write!(f, "Failed to send email: {}", e),
            NotifyError::Task(e) => write!(f, "Email task failed: {}", e),
            #[cfg(test)]
            NotifyError::Unavailable(reason) => write!(f, "Mail delivery unavailable: {}", reason),
        }
    }
}

impl std::error::Error for NotifyError {}

impl From<lettre::address::AddressError> for NotifyError {
    fn from(e: lettre::address::AddressError) -> Self {
        NotifyError::Address(e)
    }
}

/// A file attached to an outgoing email
#[derive(Debug, Clone)]
pub struct EmailAttachment {
    pub filename: String,
    pub content_type: &'static str,
    pub content: Vec<u8>,
}

impl EmailAttachment {
    fn read(dir: &Path, relative: &str, content_type: &'static str) -> Result<Self, NotifyError> {
        let path = dir.join(relative);
        let content = std::fs::read(&path).map_err(|source| NotifyError::Attachment {
            path: path.clone(),
            source,
        })?;
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| relative.to_string());

        debug!("Loaded attachment {} ({} bytes)", path.display(), content.len());
        Ok(Self {
            filename,
            content_type,
            content,
        })
    }
}

/// The two fixed files sent with every application email
#[derive(Debug, Clone)]
pub struct Attachments {
    pub signature_image: EmailAttachment,
    pub interview_details: EmailAttachment,
}

impl Attachments {
    /// Read both attachments from the static resource directory
    ///
    /// Expects `images/emailSignature.png` and `pdfs/interviewDetails.pdf`
    /// below `dir`. Fails if either file is missing.
    pub fn load(dir: impl AsRef<Path>) -> Result<Self, NotifyError> {
        let dir = dir.as_ref();
        let attachments = Self {
            signature_image: EmailAttachment::read(dir, SIGNATURE_IMAGE, "image/png")?,
            interview_details: EmailAttachment::read(dir, INTERVIEW_DETAILS_PDF, "application/pdf")?,
        };
        info!("Email attachments loaded from {}", dir.display());
        Ok(attachments)
    }

    fn to_vec(&self) -> Vec<EmailAttachment> {
        vec![self.signature_image.clone(), self.interview_details.clone()]
    }
}

/// A fully composed email, independent of the transport that delivers it
#[derive(Debug, Clone)]
pub struct Email {
    pub to: String,
    pub subject: String,
    pub body: String,
    pub attachments: Vec<EmailAttachment>,
}

impl Email {
    /// Build a multipart/mixed message: plain text body followed by the attachments
    pub fn to_message(&self, from: &Mailbox) -> Result<Message, NotifyError> {
        let to: Mailbox = self.to.parse()?;

        let mut multipart = MultiPart::mixed().singlepart(SinglePart::plain(self.body.clone()));
        for attachment in &self.attachments {
            let content_type = ContentType::parse(attachment.content_type)
                .map_err(|_| NotifyError::ContentType(attachment.content_type.to_string()))?;
            multipart = multipart.singlepart(
                Attachment::new(attachment.filename.clone())
                    .body(attachment.content.clone(), content_type),
            );
        }

        Message::builder()
            .from(from.clone())
            .to(to)
            .subject(self.subject.clone())
            .multipart(multipart)
            .map_err(NotifyError::Message)
    }
}

/// Delivers composed emails
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Send one email; no retry is attempted on failure
    async fn send(&self, email: &Email) -> Result<(), NotifyError>;
}

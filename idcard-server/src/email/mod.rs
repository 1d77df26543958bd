//! Contact mail abstractions

pub mod console;
pub mod smtp;

pub use console::ConsoleMailer;
pub use smtp::{SmtpConfig, SmtpMailer};

/// A contact-form message to relay to the site owners
#[derive(Debug, Clone)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub service: Option<String>,
    pub message: String,
}

/// Trait for relaying contact-form messages
pub trait EmailSender: Send + Sync {
    /// Relay one contact-form submission
    fn send_contact(&self, message: &ContactMessage) -> Result<(), String>;
}

/// Allow using Box<dyn EmailSender> as an EmailSender
impl EmailSender for Box<dyn EmailSender> {
    fn send_contact(&self, message: &ContactMessage) -> Result<(), String> {
        (**self).send_contact(message)
    }
}

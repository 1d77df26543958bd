//! Console-based mailer for development

use super::{ContactMessage, EmailSender};

/// Mailer that logs to console (for development)
pub struct ConsoleMailer;

impl ConsoleMailer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ConsoleMailer {
    fn default() -> Self {
        Self::new()
    }
}

impl EmailSender for ConsoleMailer {
    fn send_contact(&self, message: &ContactMessage) -> Result<(), String> {
        println!();
        println!("========================================");
        println!("  CONTACT FORM SUBMISSION");
        println!("  FROM: {} <{}>", message.name, message.email);
        println!("  PHONE: {}", message.phone.as_deref().unwrap_or("Not provided"));
        println!("  SERVICE: {}", message.service.as_deref().unwrap_or("Not specified"));
        println!("  MESSAGE: {}", message.message);
        println!("========================================");
        println!();

        tracing::info!(from = %message.email, "Contact message relayed to console");

        Ok(())
    }
}

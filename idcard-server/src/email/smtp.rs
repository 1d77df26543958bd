//! SMTP-based mailer for production

use lettre::{
    message::header::ContentType,
    transport::smtp::authentication::Credentials,
    Message, SmtpTransport, Transport,
};

use super::{ContactMessage, EmailSender};

/// Configuration for SMTP mail sending
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    /// SMTP server host (e.g., "smtp.resend.com")
    pub host: String,
    /// SMTP server port (typically 465 for TLS, 587 for STARTTLS)
    pub port: u16,
    /// SMTP username
    pub username: String,
    /// SMTP password (or API key for services like Resend)
    pub password: String,
    /// From email address
    pub from_email: String,
    /// From name (optional)
    pub from_name: Option<String>,
    /// Inbox the contact-form submissions are delivered to
    pub contact_email: String,
}

impl SmtpConfig {
    /// Create config from environment variables
    ///
    /// Required:
    /// - SMTP_HOST
    /// - SMTP_USERNAME
    /// - SMTP_PASSWORD
    /// - SMTP_FROM_EMAIL
    /// - CONTACT_EMAIL
    ///
    /// Optional:
    /// - SMTP_PORT (default: 465)
    /// - SMTP_FROM_NAME
    pub fn from_env() -> Option<Self> {
        // Helper to get non-empty env var
        fn get_env(key: &str) -> Option<String> {
            std::env::var(key).ok().filter(|s| !s.is_empty())
        }

        let host = get_env("SMTP_HOST")?;
        let username = get_env("SMTP_USERNAME")?;
        let password = get_env("SMTP_PASSWORD")?;
        let from_email = get_env("SMTP_FROM_EMAIL")?;
        let contact_email = get_env("CONTACT_EMAIL")?;

        let port = std::env::var("SMTP_PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(465);

        let from_name = std::env::var("SMTP_FROM_NAME").ok();

        Some(Self {
            host,
            port,
            username,
            password,
            from_email,
            from_name,
            contact_email,
        })
    }
}

/// SMTP mailer for production use
pub struct SmtpMailer {
    transport: SmtpTransport,
    from_email: String,
    from_name: Option<String>,
    contact_email: String,
}

impl SmtpMailer {
    /// Create a new SMTP mailer
    pub fn new(config: SmtpConfig) -> Result<Self, String> {
        let creds = Credentials::new(config.username, config.password);

        let transport = SmtpTransport::relay(&config.host)
            .map_err(|e| format!("Failed to create SMTP transport: {}", e))?
            .port(config.port)
            .credentials(creds)
            .build();

        // Test the connection
        transport
            .test_connection()
            .map_err(|e| format!("SMTP connection test failed: {}", e))?;

        tracing::info!(host = %config.host, port = config.port, "SMTP connection established");

        Ok(Self {
            transport,
            from_email: config.from_email,
            from_name: config.from_name,
            contact_email: config.contact_email,
        })
    }

    fn from_address(&self) -> String {
        match &self.from_name {
            Some(name) => format!("{} <{}>", name, self.from_email),
            None => self.from_email.clone(),
        }
    }

    fn send_email(&self, subject: &str, body: &str) -> Result<(), String> {
        let from = self
            .from_address()
            .parse()
            .map_err(|e| format!("Invalid from address: {}", e))?;

        let to_addr = self
            .contact_email
            .parse()
            .map_err(|e| format!("Invalid contact address: {}", e))?;

        let email = Message::builder()
            .from(from)
            .to(to_addr)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())
            .map_err(|e| format!("Failed to build email: {}", e))?;

        self.transport
            .send(&email)
            .map_err(|e| format!("Failed to send email: {}", e))?;

        Ok(())
    }
}

impl EmailSender for SmtpMailer {
    fn send_contact(&self, message: &ContactMessage) -> Result<(), String> {
        let subject = format!("New Contact Form Submission: {}", message.name);
        let body = format!(
            "Name: {}\n\
             Email: {}\n\
             Phone: {}\n\
             Service: {}\n\n\
             Message:\n{}",
            message.name,
            message.email,
            message.phone.as_deref().unwrap_or("Not provided"),
            message.service.as_deref().unwrap_or("Not specified"),
            message.message,
        );

        self.send_email(&subject, &body)?;
        tracing::info!(from = %message.email, "Contact email sent");
        Ok(())
    }
}

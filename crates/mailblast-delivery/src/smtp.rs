//! SMTP mailer — async lettre transport over STARTTLS.

use async_trait::async_trait;
use lettre::{
    message::header::ContentType, message::Mailbox, transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message as LettreMessage, Tokio1Executor,
};

use mailblast_core::error::{MailblastError, Result};
use mailblast_core::traits::Mailer;
use mailblast_core::types::EmailMessage;

use crate::html::wrap_html;
use crate::template::personalize;

/// SMTP relay mailer.
pub struct SmtpMailer {
    host: String,
    port: u16,
    user: String,
    password: String,
}

impl SmtpMailer {
    pub fn new(host: String, port: u16, user: String, password: String) -> Self {
        Self {
            host,
            port,
            user,
            password,
        }
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, message: &EmailMessage) -> Result<()> {
        let from_mailbox: Mailbox = format!("Team <{}>", message.from)
            .parse()
            .map_err(|e| MailblastError::Delivery(format!("Invalid from: {e}")))?;
        let to_mailbox: Mailbox = message
            .to_email
            .parse()
            .map_err(|e| MailblastError::Delivery(format!("Invalid to: {e}")))?;

        let body = personalize(&message.body, &message.to_name, None);
        let email = LettreMessage::builder()
            .from(from_mailbox)
            .to(to_mailbox)
            .subject(&message.subject)
            .header(ContentType::TEXT_HTML)
            .body(wrap_html(&body))
            .map_err(|e| MailblastError::Delivery(format!("Build email: {e}")))?;

        let creds = Credentials::new(self.user.clone(), self.password.clone());
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.host)
            .map_err(|e| MailblastError::Delivery(format!("SMTP relay: {e}")))?
            .port(self.port)
            .credentials(creds)
            .build();

        transport
            .send(email)
            .await
            .map_err(|e| MailblastError::Delivery(format!("SMTP send: {e}")))?;

        tracing::info!("📤 SMTP accepted message for {}", message.to_email);
        Ok(())
    }

    fn name(&self) -> &str {
        "smtp"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_invalid_addresses_fail_before_transport() {
        let mailer = SmtpMailer::new("smtp.example.com".into(), 587, "u".into(), "p".into());
        let message = EmailMessage {
            to_email: "not an address".into(),
            to_name: "X".into(),
            subject: "Hi".into(),
            body: "Hi".into(),
            from: "team@example.com".into(),
        };
        assert!(mailer.send(&message).await.is_err());
    }
}

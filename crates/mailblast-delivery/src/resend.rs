//! Resend mailer — POSTs to the Resend transactional email API.

use async_trait::async_trait;
use serde::Serialize;

use mailblast_core::error::{MailblastError, Result};
use mailblast_core::traits::Mailer;
use mailblast_core::types::EmailMessage;

use crate::html::wrap_html;
use crate::template::personalize;

const RESEND_ENDPOINT: &str = "https://api.resend.com/emails";

#[derive(Serialize)]
struct ResendRequest {
    from: String,
    to: Vec<String>,
    subject: String,
    html: String,
}

/// HTTP mailer backed by the Resend API.
pub struct ResendMailer {
    api_key: String,
    client: reqwest::Client,
}

impl ResendMailer {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl Mailer for ResendMailer {
    async fn send(&self, message: &EmailMessage) -> Result<()> {
        if self.api_key.is_empty() {
            return Err(MailblastError::ApiKeyMissing("resend".into()));
        }

        let body = personalize(&message.body, &message.to_name, None);
        let request = ResendRequest {
            from: format!("Team <{}>", message.from),
            to: vec![message.to_email.clone()],
            subject: message.subject.clone(),
            html: wrap_html(&body),
        };

        let resp = self
            .client
            .post(RESEND_ENDPOINT)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await
            .map_err(|e| MailblastError::Http(format!("Resend connection failed: {e}")))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            return Err(MailblastError::Delivery(format!(
                "Resend API error {status}: {text}"
            )));
        }

        tracing::info!("📤 Resend accepted message for {}", message.to_email);
        Ok(())
    }

    fn name(&self) -> &str {
        "resend"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_key_fails_before_network() {
        let mailer = ResendMailer::new(String::new());
        let message = EmailMessage {
            to_email: "ana@example.com".into(),
            to_name: "Ana".into(),
            subject: "Hi".into(),
            body: "Hi {{name}}".into(),
            from: "team@example.com".into(),
        };
        let err = mailer.send(&message).await.unwrap_err();
        assert!(matches!(err, MailblastError::ApiKeyMissing(_)));
    }
}

//! Stub mailer — logs instead of sending. Used by the `stub` provider
//! mode for dry runs and by tests that need a real `Mailer`.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use mailblast_core::error::Result;
use mailblast_core::traits::Mailer;
use mailblast_core::types::EmailMessage;

use crate::template::personalize;

#[derive(Default)]
pub struct StubMailer {
    delivered: AtomicUsize,
}

impl StubMailer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn delivered(&self) -> usize {
        self.delivered.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl Mailer for StubMailer {
    async fn send(&self, message: &EmailMessage) -> Result<()> {
        let body = personalize(&message.body, &message.to_name, None);
        self.delivered.fetch_add(1, Ordering::Relaxed);
        tracing::info!(
            "📭 [stub] would send to {} — subject '{}', {} chars",
            message.to_email,
            message.subject,
            body.len()
        );
        Ok(())
    }

    fn name(&self) -> &str {
        "stub"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_counts_deliveries() {
        let mailer = StubMailer::new();
        let message = EmailMessage {
            to_email: "ana@example.com".into(),
            to_name: "Ana".into(),
            subject: "Hi".into(),
            body: "Hi {{name}}".into(),
            from: "team@example.com".into(),
        };
        mailer.send(&message).await.unwrap();
        mailer.send(&message).await.unwrap();
        assert_eq!(mailer.delivered(), 2);
    }
}

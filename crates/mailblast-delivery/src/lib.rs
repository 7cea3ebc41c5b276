//! # MailBlast Delivery
//!
//! Everything between "the engine decided to send" and the wire: built-in
//! templates, placeholder personalization, the HTML shell, and the
//! interchangeable `Mailer` backends (Resend HTTP API, SMTP, stub).

pub mod html;
pub mod resend;
pub mod smtp;
pub mod stub;
pub mod template;

pub use resend::ResendMailer;
pub use smtp::SmtpMailer;
pub use stub::StubMailer;
pub use template::{builtin_templates, find_template, personalize, Template};

use std::sync::Arc;

use mailblast_core::config::DeliveryConfig;
use mailblast_core::error::{MailblastError, Result};
use mailblast_core::traits::Mailer;

/// Build the configured mailer backend.
pub fn mailer_from_config(config: &DeliveryConfig) -> Result<Arc<dyn Mailer>> {
    match config.provider.as_str() {
        "resend" => Ok(Arc::new(ResendMailer::new(config.resend_key()))),
        "smtp" => Ok(Arc::new(SmtpMailer::new(
            config.smtp_host.clone(),
            config.smtp_port,
            config.smtp_user.clone(),
            config.smtp_password.clone(),
        ))),
        "stub" => Ok(Arc::new(StubMailer::new())),
        other => Err(MailblastError::Config(format!(
            "Unknown delivery provider '{other}' (expected resend, smtp, or stub)"
        ))),
    }
}

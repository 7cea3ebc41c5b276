//! MailBlast error types.

use thiserror::Error;

/// Errors that can occur across the MailBlast workspace.
#[derive(Error, Debug)]
pub enum MailblastError {
    #[error("Configuration error: {0}")]
    Config(String),

    /// Snapshot/history persistence failure. Callers on the send path
    /// log and swallow this; a failed write must never abort a send.
    #[error("Store error: {0}")]
    Store(String),

    #[error("Delivery error: {0}")]
    Delivery(String),

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("API key missing for {0}")]
    ApiKeyMissing(String),

    #[error("Campaign error: {0}")]
    Campaign(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Gateway error: {0}")]
    Gateway(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Convenience result type used across all MailBlast crates.
pub type Result<T> = std::result::Result<T, MailblastError>;

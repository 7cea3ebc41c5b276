//! Capability traits the campaign engine is written against.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::EmailMessage;

/// Outbound mail delivery seam.
///
/// Implementations substitute template placeholders and wrap the body
/// before transport. A returned error is recorded as a per-recipient
/// failure by the caller; it never halts the campaign.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Deliver one message.
    async fn send(&self, message: &EmailMessage) -> Result<()>;

    /// Short backend name for logs ("resend", "smtp", "stub").
    fn name(&self) -> &str;
}

/// Durable key→blob persistence for campaign snapshots and send history.
///
/// The contract is deliberately a flat string key to JSON string value map
/// so backends stay interchangeable: one JSON file per key, a SQLite table,
/// or an in-memory map in tests.
pub trait SnapshotStore: Send + Sync {
    /// Fetch a blob. `None` covers both "absent" and "unreadable";
    /// callers fall back to defaults either way.
    fn get(&self, key: &str) -> Option<String>;

    /// Write a blob. Errors are surfaced so the caller can decide to
    /// log-and-continue (the send path does exactly that).
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

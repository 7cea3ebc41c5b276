//! Shared domain types.
//!
//! Serialized forms are kept byte-compatible with the persisted snapshot
//! layout documented in `snapshot.rs` of the campaign crate: status strings
//! like `"Skipped (Duplicate)"`, lowercase campaign states, camelCase stats
//! fields, and epoch-millisecond timestamps.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Delivery state of a single roster entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecipientStatus {
    /// Freshly loaded, not yet evaluated by a campaign start.
    Pending,
    /// Eligible and waiting for its tick.
    Queued,
    /// Handed to the mailer; the in-flight marker.
    Sending,
    /// Mailer reported success. Terminal.
    Sent,
    /// Mailer reported failure. Terminal, error kept on the recipient.
    Failed,
    /// Already present in the all-time send history. Terminal.
    #[serde(rename = "Skipped (Duplicate)")]
    SkippedDuplicate,
    /// Over the rolling 24-hour cap at start time. Terminal.
    #[serde(rename = "Skipped (Daily Limit)")]
    SkippedDailyLimit,
}

/// One entry in the campaign roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipient {
    /// Identity within a campaign.
    pub email: String,
    pub name: String,
    pub status: RecipientStatus,
    /// Failure reason, set only when `status == Failed`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Recipient {
    /// Create a fresh `Pending` recipient.
    pub fn new(email: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            name: name.into(),
            status: RecipientStatus::Pending,
            error: None,
        }
    }
}

/// Lifecycle state of the campaign scheduler.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CampaignState {
    #[default]
    Idle,
    Running,
    Paused,
    Finished,
}

/// One successful send, appended to the all-time history. Immutable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentRecord {
    pub email: String,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
}

impl SentRecord {
    pub fn new(email: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self { email: email.into(), timestamp }
    }
}

/// Campaign performance counters. Synthetic estimates derived from the
/// cumulative sent count, not provider telemetry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub total_sent: u64,
    pub deliveries: u64,
    pub opens: u64,
    pub bounces: u64,
}

/// A contact produced by a recipient source (AI finder, CSV, manual entry).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub name: String,
    pub email: String,
}

/// One outbound message handed to a mailer. `body` still carries template
/// placeholders; substitution happens inside the mailer before transport.
#[derive(Debug, Clone)]
pub struct EmailMessage {
    pub to_email: String,
    pub to_name: String,
    pub subject: String,
    pub body: String,
    pub from: String,
}

//! # MailBlast Campaign
//!
//! The campaign scheduler: a persistent, resumable, rate-limited queue
//! that walks a recipient roster one send per tick.
//!
//! ## Design principles
//! - Single writer — all campaign state lives inside one actor task;
//!   the only way in is the `CampaignHandle` mailbox
//! - Snapshot after every mutation — a restart resumes exactly where
//!   the previous process stopped
//! - Failures are per-recipient — one bad address never halts a run
//! - Timer as data — the next tick is a deadline field, not a detached
//!   timer handle
//!
//! ## Architecture
//! ```text
//! CampaignHandle (clone per caller)
//!   └── mpsc mailbox: start / pause / resume / stop / load roster / status
//!         └── actor loop (tokio::select!)
//!               ├── command → CampaignEngine method → snapshot save
//!               └── tick deadline → eligibility + send + history append
//!                     ├── Mailer (resend / smtp / stub)
//!                     └── SnapshotStore (file / sqlite)
//! ```

pub mod engine;
pub mod history;
pub mod persistence;
pub mod roster;
pub mod snapshot;
pub mod stats;
pub mod store;

pub use engine::{spawn_campaign, CampaignCommand, CampaignEngine, CampaignHandle, ComposeSpec};
pub use history::SendHistory;
pub use persistence::SqliteStore;
pub use snapshot::CampaignSnapshot;
pub use store::{FileStore, MemoryStore};

/// Maximum sends permitted within any trailing 24-hour window.
pub const DAILY_LIMIT: usize = 100;

/// Delay between consecutive send ticks.
pub const SEND_INTERVAL: std::time::Duration = std::time::Duration::from_secs(60);

/// Backoff applied when a tick finds the daily cap already exhausted.
pub const CAP_BACKOFF: std::time::Duration = std::time::Duration::from_secs(24 * 60 * 60);

/// Hours in the rolling window the daily cap is counted over.
pub const DAILY_WINDOW_HOURS: i64 = 24;

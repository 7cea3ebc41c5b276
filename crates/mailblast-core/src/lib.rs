//! # MailBlast Core
//!
//! Shared foundation for the MailBlast workspace: configuration,
//! the error type, domain types, and the capability traits
//! (`Mailer`, `SnapshotStore`) that the campaign engine is
//! written against.

pub mod config;
pub mod error;
pub mod traits;
pub mod types;

pub use config::MailblastConfig;
pub use error::{MailblastError, Result};
pub use traits::{Mailer, SnapshotStore};
pub use types::{
    CampaignState, Contact, EmailMessage, Recipient, RecipientStatus, SentRecord, Stats,
};

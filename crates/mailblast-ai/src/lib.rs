//! # MailBlast AI
//!
//! AI collaborators behind narrow contracts: an OpenAI-compatible chat
//! client plus the two flows built on it — the contact finder and the
//! campaign performance summary. Both are optional conveniences; the
//! scheduler never depends on them.

pub mod client;
pub mod flows;

pub use client::LlmClient;
pub use flows::{find_contacts, summarize_performance};

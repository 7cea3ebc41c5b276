//! # MailBlast Contacts
//!
//! Recipient sources that populate a fresh roster: CSV upload and manual
//! text entry. (The third source, the AI contact finder, lives in
//! `mailblast-ai`.) Each parse replaces the whole roster; invalid rows
//! are dropped silently, but an all-invalid input is an operator-visible
//! error.

pub mod csv;
pub mod manual;

pub use csv::parse_csv;
pub use manual::parse_manual;

//! # MailBlast Gateway
//!
//! The operator-facing HTTP surface: embedded login/dashboard pages and
//! the JSON API the dashboard drives. Auth is a single-operator session
//! cookie; the route guard checks only its presence, matching the
//! original edge behavior.

pub mod auth;
pub mod pages;
pub mod routes;
pub mod server;

pub use server::{start, AppState};

//! Persisted snapshot layout and codec.
//!
//! Campaign state is five flat key→blob entries, the same layout the
//! browser build of this tool kept in local storage, so existing state
//! rehydrates unchanged: `recipients` and `sentHistory` are JSON arrays,
//! `stats` a JSON object, `campaignState` a bare lowercase word, and
//! `currentRecipientIndex` a stringified integer. All reads are
//! defensive; unreadable state degrades to defaults instead of failing.

use mailblast_core::traits::SnapshotStore;
use mailblast_core::types::{CampaignState, Recipient, Stats};

pub const KEY_RECIPIENTS: &str = "recipients";
pub const KEY_STATE: &str = "campaignState";
pub const KEY_CURSOR: &str = "currentRecipientIndex";
pub const KEY_STATS: &str = "stats";
pub const KEY_HISTORY: &str = "sentHistory";

/// Bare string form used for the `campaignState` key.
pub fn state_str(state: CampaignState) -> &'static str {
    match state {
        CampaignState::Idle => "idle",
        CampaignState::Running => "running",
        CampaignState::Paused => "paused",
        CampaignState::Finished => "finished",
    }
}

fn state_from_str(raw: &str) -> CampaignState {
    match raw.trim() {
        "running" => CampaignState::Running,
        "paused" => CampaignState::Paused,
        "finished" => CampaignState::Finished,
        _ => CampaignState::Idle,
    }
}

/// In-memory image of the persisted campaign state (history is held
/// separately, see `SendHistory`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CampaignSnapshot {
    pub recipients: Vec<Recipient>,
    pub state: CampaignState,
    pub cursor: usize,
    pub stats: Stats,
}

impl CampaignSnapshot {
    /// Rehydrate from the store. Missing or unparseable keys fall back
    /// to defaults.
    pub fn load(store: &dyn SnapshotStore) -> Self {
        Self {
            recipients: parse_or_default(KEY_RECIPIENTS, store.get(KEY_RECIPIENTS)),
            state: store
                .get(KEY_STATE)
                .map(|raw| state_from_str(&raw))
                .unwrap_or_default(),
            cursor: store
                .get(KEY_CURSOR)
                .and_then(|raw| raw.trim().parse::<usize>().ok())
                .unwrap_or(0),
            stats: parse_or_default(KEY_STATS, store.get(KEY_STATS)),
        }
    }

    /// Persist all four keys. Write failures are logged and swallowed;
    /// the in-memory state stays authoritative for the rest of the
    /// session either way.
    pub fn save(&self, store: &dyn SnapshotStore) {
        write_json(store, KEY_RECIPIENTS, &self.recipients);
        write_raw(store, KEY_STATE, state_str(self.state));
        write_raw(store, KEY_CURSOR, &self.cursor.to_string());
        write_json(store, KEY_STATS, &self.stats);
    }
}

fn parse_or_default<T: Default + serde::de::DeserializeOwned>(
    key: &str,
    raw: Option<String>,
) -> T {
    match raw {
        Some(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
            tracing::warn!("⚠️ Failed to parse '{key}': {e}");
            T::default()
        }),
        None => T::default(),
    }
}

fn write_json<T: serde::Serialize>(store: &dyn SnapshotStore, key: &str, value: &T) {
    match serde_json::to_string(value) {
        Ok(json) => write_raw(store, key, &json),
        Err(e) => tracing::warn!("⚠️ Failed to serialize '{key}': {e}"),
    }
}

fn write_raw(store: &dyn SnapshotStore, key: &str, value: &str) {
    if let Err(e) = store.set(key, value) {
        tracing::warn!("⚠️ Snapshot write failed for '{key}': {e}");
    }
}

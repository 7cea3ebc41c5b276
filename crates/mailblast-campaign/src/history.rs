//! All-time send history — backs duplicate detection and the rolling
//! daily cap. Append-only; never pruned (unbounded growth is a known,
//! accepted limitation).

use chrono::{DateTime, Duration, Utc};

use mailblast_core::traits::SnapshotStore;
use mailblast_core::types::SentRecord;

use crate::snapshot::KEY_HISTORY;
use crate::DAILY_WINDOW_HOURS;

/// Record of every successful send, across all campaigns.
#[derive(Default)]
pub struct SendHistory {
    records: Vec<SentRecord>,
}

impl SendHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rehydrate from the store; unreadable state degrades to empty.
    pub fn load(store: &dyn SnapshotStore) -> Self {
        let records = match store.get(KEY_HISTORY) {
            Some(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                tracing::warn!("⚠️ Failed to parse send history: {e}");
                Vec::new()
            }),
            None => Vec::new(),
        };
        Self { records }
    }

    /// Append a record stamped `now` and persist. Write failures are
    /// logged and swallowed; the send that triggered the append already
    /// happened, so the in-memory record must survive regardless.
    pub fn record(&mut self, email: &str, now: DateTime<Utc>, store: &dyn SnapshotStore) {
        self.records.push(SentRecord::new(email, now));
        match serde_json::to_string(&self.records) {
            Ok(json) => {
                if let Err(e) = store.set(KEY_HISTORY, &json) {
                    tracing::warn!("⚠️ Failed to save send history: {e}");
                }
            }
            Err(e) => tracing::warn!("⚠️ Failed to serialize send history: {e}"),
        }
    }

    /// All records, insertion order.
    pub fn all_records(&self) -> &[SentRecord] {
        &self.records
    }

    /// Records newer than `now - window`.
    pub fn sent_within(&self, window: Duration, now: DateTime<Utc>) -> Vec<&SentRecord> {
        let cutoff = now - window;
        self.records.iter().filter(|r| r.timestamp > cutoff).collect()
    }

    /// Sends inside the trailing 24-hour window.
    pub fn sent_today(&self, now: DateTime<Utc>) -> usize {
        self.sent_within(Duration::hours(DAILY_WINDOW_HOURS), now).len()
    }

    /// Whether `email` ever received a send. Comparison is
    /// case-sensitive; rosters are expected to carry addresses verbatim
    /// and the persisted history predates any normalization.
    pub fn has_ever_sent(&self, email: &str) -> bool {
        self.records.iter().any(|r| r.email == email)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn test_record_and_query() {
        let store = MemoryStore::new();
        let mut history = SendHistory::new();
        let now = Utc::now();

        history.record("ana@example.com", now, &store);
        assert!(history.has_ever_sent("ana@example.com"));
        assert!(!history.has_ever_sent("ben@example.com"));
        assert_eq!(history.all_records().len(), 1);
    }

    #[test]
    fn test_case_sensitive_matching() {
        let store = MemoryStore::new();
        let mut history = SendHistory::new();
        history.record("Ana@Example.com", Utc::now(), &store);

        assert!(history.has_ever_sent("Ana@Example.com"));
        assert!(!history.has_ever_sent("ana@example.com"));
    }

    #[test]
    fn test_rolling_window() {
        let store = MemoryStore::new();
        let mut history = SendHistory::new();
        let now = Utc::now();

        history.record("old@example.com", now - Duration::hours(30), &store);
        history.record("recent@example.com", now - Duration::hours(2), &store);
        history.record("fresh@example.com", now, &store);

        assert_eq!(history.sent_today(now), 2);
        assert_eq!(history.sent_within(Duration::hours(1), now).len(), 1);
        assert_eq!(history.all_records().len(), 3);
    }

    #[test]
    fn test_persists_and_reloads() {
        let store = MemoryStore::new();
        let now = Utc::now();
        {
            let mut history = SendHistory::new();
            history.record("ana@example.com", now, &store);
            history.record("ben@example.com", now, &store);
        }
        let reloaded = SendHistory::load(&store);
        assert_eq!(reloaded.len(), 2);
        assert!(reloaded.has_ever_sent("ben@example.com"));
    }

    #[test]
    fn test_garbage_history_degrades_to_empty() {
        let store = MemoryStore::new();
        store.set(KEY_HISTORY, "{{{").unwrap();
        let history = SendHistory::load(&store);
        assert!(history.is_empty());
    }
}

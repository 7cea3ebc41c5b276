//! Roster helpers — the stop-revert policy and ordered queries over
//! recipients.

use mailblast_core::types::{Contact, Recipient, RecipientStatus};

/// Whether a status reverts to `Pending` on a hard stop.
///
/// Only in-flight work is recalled; terminal outcomes (sent, failed,
/// skipped) survive a stop unchanged.
pub fn reverts_on_stop(status: RecipientStatus) -> bool {
    matches!(status, RecipientStatus::Queued | RecipientStatus::Sending)
}

/// Build a fresh all-`Pending` roster from source contacts. Loading a
/// source always replaces the prior roster wholesale; there is no
/// incremental merge.
pub fn from_contacts(contacts: &[Contact]) -> Vec<Recipient> {
    contacts
        .iter()
        .map(|c| Recipient::new(&c.email, &c.name))
        .collect()
}

/// Index of the first `Queued` recipient at or after `from`.
pub fn next_queued_at(recipients: &[Recipient], from: usize) -> Option<usize> {
    recipients
        .iter()
        .enumerate()
        .skip(from)
        .find(|(_, r)| r.status == RecipientStatus::Queued)
        .map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stop_policy_table() {
        use RecipientStatus::*;
        let table = [
            (Pending, false),
            (Queued, true),
            (Sending, true),
            (Sent, false),
            (Failed, false),
            (SkippedDuplicate, false),
            (SkippedDailyLimit, false),
        ];
        for (status, reverts) in table {
            assert_eq!(reverts_on_stop(status), reverts, "{status:?}");
        }
    }

    #[test]
    fn test_from_contacts_all_pending() {
        let contacts = vec![
            Contact { name: "Ana".into(), email: "ana@example.com".into() },
            Contact { name: "Ben".into(), email: "ben@example.com".into() },
        ];
        let roster = from_contacts(&contacts);
        assert_eq!(roster.len(), 2);
        assert!(roster.iter().all(|r| r.status == RecipientStatus::Pending));
        assert_eq!(roster[0].email, "ana@example.com");
    }

    #[test]
    fn test_next_queued_skips_terminals() {
        let mut roster = from_contacts(&[
            Contact { name: "A".into(), email: "a@x.com".into() },
            Contact { name: "B".into(), email: "b@x.com".into() },
            Contact { name: "C".into(), email: "c@x.com".into() },
        ]);
        roster[0].status = RecipientStatus::SkippedDuplicate;
        roster[1].status = RecipientStatus::Sent;
        roster[2].status = RecipientStatus::Queued;

        assert_eq!(next_queued_at(&roster, 0), Some(2));
        assert_eq!(next_queued_at(&roster, 2), Some(2));
        assert_eq!(next_queued_at(&roster, 3), None);
    }

    #[test]
    fn test_next_queued_respects_start_index() {
        let mut roster = from_contacts(&[
            Contact { name: "A".into(), email: "a@x.com".into() },
            Contact { name: "B".into(), email: "b@x.com".into() },
        ]);
        roster[0].status = RecipientStatus::Queued;
        roster[1].status = RecipientStatus::Queued;

        // Entries behind the index are never revisited
        assert_eq!(next_queued_at(&roster, 1), Some(1));
    }
}

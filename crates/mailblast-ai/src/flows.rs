//! The two AI flows: contact discovery and the performance summary.

use mailblast_core::error::{MailblastError, Result};
use mailblast_core::types::{Contact, Stats};

use crate::client::LlmClient;

const FINDER_SYSTEM: &str = "You are a B2B contact researcher. Respond ONLY with a JSON \
array of objects with \"name\" and \"email\" fields. No prose, no markdown fences. \
Return at most 5 plausible professional contacts. If you cannot produce any, return [].";

const SUMMARY_SYSTEM: &str = "You are an email marketing analyst. Given campaign counters, \
write one short paragraph (3-4 sentences) summarizing how the campaign performed and one \
suggestion. Plain text only.";

/// Ask the model for up to 5 contacts matching a role (and optionally a
/// company). An empty list is a valid, non-error outcome.
pub async fn find_contacts(
    client: &LlmClient,
    company_name: Option<&str>,
    role: &str,
) -> Result<Vec<Contact>> {
    if role.trim().is_empty() {
        return Err(MailblastError::InvalidInput("Role is required".into()));
    }
    let prompt = match company_name {
        Some(company) if !company.trim().is_empty() => {
            format!("Find contacts with the role \"{role}\" at the company \"{company}\".")
        }
        _ => format!("Find contacts with the role \"{role}\" at any relevant company."),
    };

    let raw = client.chat(FINDER_SYSTEM, &prompt).await?;
    let cleaned = strip_fences(&raw);
    let contacts: Vec<Contact> = serde_json::from_str(cleaned).map_err(|e| {
        MailblastError::Provider(format!("Contact finder returned unparseable JSON: {e}"))
    })?;

    let contacts: Vec<Contact> = contacts
        .into_iter()
        .filter(|c| c.email.contains('@'))
        .take(5)
        .collect();
    tracing::info!("🔎 Contact finder returned {} contact(s)", contacts.len());
    Ok(contacts)
}

/// Turn the campaign counters into a natural-language paragraph.
pub async fn summarize_performance(client: &LlmClient, stats: &Stats) -> Result<String> {
    let prompt = format!(
        "Emails sent: {}. Delivered: {}. Opened: {}. Bounced: {}.",
        stats.total_sent, stats.deliveries, stats.opens, stats.bounces
    );
    client.chat(SUMMARY_SYSTEM, &prompt).await
}

/// Models often wrap JSON in markdown fences despite instructions.
fn strip_fences(raw: &str) -> &str {
    let trimmed = raw.trim();
    let trimmed = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .unwrap_or(trimmed);
    trimmed.strip_suffix("```").unwrap_or(trimmed).trim()
}

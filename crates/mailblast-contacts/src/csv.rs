//! CSV recipient source — header-driven, `email` column required,
//! `name` optional.

use mailblast_core::error::{MailblastError, Result};
use mailblast_core::types::Contact;

/// Parse CSV text into contacts. Rows whose email lacks `@` are
/// discarded silently; zero surviving rows is an error.
pub fn parse_csv(content: &str) -> Result<Vec<Contact>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| MailblastError::InvalidInput(format!("Unreadable CSV header: {e}")))?
        .clone();
    let email_col = headers
        .iter()
        .position(|h| h.eq_ignore_ascii_case("email"))
        .ok_or_else(|| {
            MailblastError::InvalidInput("CSV must have an 'email' column".into())
        })?;
    let name_col = headers.iter().position(|h| h.eq_ignore_ascii_case("name"));

    let mut contacts = Vec::new();
    let mut dropped = 0usize;
    for record in reader.records() {
        let record = match record {
            Ok(r) => r,
            Err(e) => {
                tracing::debug!("Skipping malformed CSV row: {e}");
                dropped += 1;
                continue;
            }
        };
        let email = record.get(email_col).unwrap_or("").trim();
        if !email.contains('@') {
            dropped += 1;
            continue;
        }
        let name = name_col
            .and_then(|i| record.get(i))
            .unwrap_or("")
            .trim()
            .to_string();
        contacts.push(Contact {
            name,
            email: email.to_string(),
        });
    }

    if contacts.is_empty() {
        return Err(MailblastError::InvalidInput(
            "No valid recipients found in the CSV".into(),
        ));
    }
    if dropped > 0 {
        tracing::info!("📎 CSV import: {} contact(s), {dropped} row(s) dropped", contacts.len());
    }
    Ok(contacts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_email_and_name_columns() {
        let contacts = parse_csv("name,email\nAna,ana@acme.com\nBen,ben@acme.com\n").unwrap();
        assert_eq!(contacts.len(), 2);
        assert_eq!(contacts[0].name, "Ana");
        assert_eq!(contacts[1].email, "ben@acme.com");
    }

    #[test]
    fn test_header_match_is_case_insensitive_and_name_optional() {
        let contacts = parse_csv("Email\nana@acme.com\n").unwrap();
        assert_eq!(contacts.len(), 1);
        assert_eq!(contacts[0].name, "");
    }

    #[test]
    fn test_rows_without_at_sign_dropped_silently() {
        let contacts = parse_csv("email,name\nana@acme.com,Ana\nnot-an-email,Ben\n").unwrap();
        assert_eq!(contacts.len(), 1);
    }

    #[test]
    fn test_missing_email_column_is_error() {
        assert!(parse_csv("name,phone\nAna,123\n").is_err());
    }

    #[test]
    fn test_zero_valid_rows_is_error() {
        assert!(parse_csv("email,name\nnope,Ana\n").is_err());
        assert!(parse_csv("email,name\n").is_err());
    }
}

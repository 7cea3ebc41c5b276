//! Manual-entry recipient source — one `email,name` per line.

use mailblast_core::error::{MailblastError, Result};
use mailblast_core::types::Contact;

/// Parse pasted text into contacts. Blank lines are ignored; lines
/// without a valid email are dropped; zero surviving lines is an error.
pub fn parse_manual(content: &str) -> Result<Vec<Contact>> {
    let mut contacts = Vec::new();
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let (email, name) = match line.split_once(',') {
            Some((email, name)) => (email.trim(), name.trim()),
            None => (line, ""),
        };
        if !email.contains('@') {
            continue;
        }
        contacts.push(Contact {
            name: name.to_string(),
            email: email.to_string(),
        });
    }

    if contacts.is_empty() {
        return Err(MailblastError::InvalidInput(
            "No valid recipients found — use one 'email,name' per line".into(),
        ));
    }
    Ok(contacts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_comma_name_lines() {
        let contacts = parse_manual("ana@acme.com,Ana\nben@acme.com,Ben").unwrap();
        assert_eq!(contacts.len(), 2);
        assert_eq!(contacts[1].name, "Ben");
    }

    #[test]
    fn test_blank_lines_and_bare_emails() {
        let contacts = parse_manual("\nana@acme.com\n\n  \n").unwrap();
        assert_eq!(contacts.len(), 1);
        assert_eq!(contacts[0].name, "");
    }

    #[test]
    fn test_invalid_lines_dropped() {
        let contacts = parse_manual("ana@acme.com,Ana\njust some text\n").unwrap();
        assert_eq!(contacts.len(), 1);
    }

    #[test]
    fn test_all_invalid_is_error() {
        assert!(parse_manual("hello\nworld").is_err());
        assert!(parse_manual("").is_err());
    }
}

//! Built-in templates and placeholder personalization.
//!
//! Placeholders `{{name}}` and `{{companyName}}` match case-insensitively
//! and tolerate inner whitespace; blank values fall back to "there" /
//! "their company".

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

static NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\{\{\s*name\s*\}\}").unwrap());
static COMPANY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\{\{\s*companyname\s*\}\}").unwrap());

/// A starter message the compose form offers.
#[derive(Debug, Clone, Serialize)]
pub struct Template {
    pub id: &'static str,
    pub name: &'static str,
    pub subject: &'static str,
    pub body: &'static str,
}

/// The three starter templates shipped with the dashboard.
pub fn builtin_templates() -> Vec<Template> {
    vec![
        Template {
            id: "job-portal-invite",
            name: "Job Portal Invite",
            subject: "Post your openings where candidates are looking",
            body: "Hi {{name}},\n\nI came across {{companyName}} and wanted to reach out. \
                   We run a job portal that puts your openings in front of thousands of \
                   active candidates every week.\n\n\
                   - Free company profile\n\
                   - Post your first three roles at no cost\n\
                   - Applicant tracking built in\n\n\
                   Would you be open to a quick look this week?",
        },
        Template {
            id: "intro-outreach",
            name: "Introduction Outreach",
            subject: "Quick introduction",
            body: "Hi {{name}},\n\nI'll keep this short. I work with teams like \
                   {{companyName}} to take the manual work out of their outreach, and I \
                   think there's a fit worth exploring.\n\n\
                   If that sounds interesting, just reply and I'll send over details.",
        },
        Template {
            id: "product-update",
            name: "Product Update",
            subject: "Something new for {{companyName}}",
            body: "Hi {{name}},\n\nWe just shipped a release I think {{companyName}} will \
                   care about:\n\n\
                   - Faster imports\n\
                   - A cleaner reporting view\n\
                   - Fewer clicks to get a campaign out the door\n\n\
                   Happy to walk you through it whenever suits.",
        },
    ]
}

/// Look up a built-in template by id.
pub fn find_template(id: &str) -> Option<Template> {
    builtin_templates().into_iter().find(|t| t.id == id)
}

/// Substitute placeholders into a template body.
pub fn personalize(body: &str, name: &str, company: Option<&str>) -> String {
    let name = if name.trim().is_empty() { "there" } else { name };
    let company = match company {
        Some(c) if !c.trim().is_empty() => c,
        _ => "their company",
    };
    let out = NAME_RE.replace_all(body, name);
    COMPANY_RE.replace_all(&out, company).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_substitutes_both_placeholders() {
        let out = personalize("Hi {{name}} at {{companyName}}!", "Ana", Some("Acme"));
        assert_eq!(out, "Hi Ana at Acme!");
    }

    #[test]
    fn test_case_insensitive_and_spaced() {
        let out = personalize("{{ Name }} / {{COMPANYNAME}}", "Ben", Some("Initech"));
        assert_eq!(out, "Ben / Initech");
    }

    #[test]
    fn test_defaults_when_blank() {
        let out = personalize("Hi {{name}} from {{companyName}}", "", None);
        assert_eq!(out, "Hi there from their company");
        let out = personalize("Hi {{name}}", "  ", Some(""));
        assert_eq!(out, "Hi there");
    }

    #[test]
    fn test_builtin_templates_carry_placeholders() {
        let templates = builtin_templates();
        assert_eq!(templates.len(), 3);
        for t in &templates {
            assert!(t.body.contains("{{name}}"), "{}", t.id);
            assert!(find_template(t.id).is_some());
        }
        assert!(find_template("nope").is_none());
    }
}

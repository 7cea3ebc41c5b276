//! HTML email shell — wraps the personalized plain-text body in the
//! dark-theme layout the dashboard previews. Blank lines split
//! paragraphs; lines starting with `-` render as arrow bullets.

/// Render the personalized body as a full HTML document.
pub fn wrap_html(body: &str) -> String {
    let mut sections = String::new();
    for paragraph in body.split("\n\n") {
        let paragraph = paragraph.trim();
        if paragraph.is_empty() {
            continue;
        }
        let bullets: Vec<&str> = paragraph
            .lines()
            .map(str::trim)
            .filter(|l| l.starts_with('-'))
            .collect();
        if !bullets.is_empty() && bullets.len() == paragraph.lines().count() {
            sections.push_str("<ul style=\"list-style:none;padding:0;margin:0 0 16px 0;\">");
            for line in bullets {
                let item = line.trim_start_matches('-').trim();
                sections.push_str(&format!(
                    "<li style=\"margin:6px 0;color:#d4d4d8;\">&rarr; {}</li>",
                    escape(item)
                ));
            }
            sections.push_str("</ul>");
        } else {
            sections.push_str(&format!(
                "<p style=\"margin:0 0 16px 0;color:#d4d4d8;line-height:1.6;\">{}</p>",
                escape(paragraph).replace('\n', "<br>")
            ));
        }
    }

    format!(
        "<!DOCTYPE html><html><body style=\"margin:0;padding:0;background:#0b0b0f;\">\
         <div style=\"max-width:560px;margin:0 auto;padding:32px 24px;\
         font-family:-apple-system,'Segoe UI',Helvetica,Arial,sans-serif;\
         background:#18181b;border-radius:12px;\">{sections}</div></body></html>"
    )
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paragraphs_split_on_blank_lines() {
        let html = wrap_html("First paragraph.\n\nSecond paragraph.");
        assert_eq!(html.matches("<p ").count(), 2);
        assert!(html.contains("First paragraph."));
    }

    #[test]
    fn test_dash_lines_become_arrow_bullets() {
        let html = wrap_html("- One\n- Two\n- Three");
        assert_eq!(html.matches("<li ").count(), 3);
        assert!(html.contains("&rarr; One"));
    }

    #[test]
    fn test_html_is_escaped() {
        let html = wrap_html("Prices <b>& more</b>");
        assert!(html.contains("&lt;b&gt;&amp; more"));
        assert!(!html.contains("<b>"));
    }
}

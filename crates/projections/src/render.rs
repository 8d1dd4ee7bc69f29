//! Presentation of the public table as markup.

use common::LanguageCode;
use domain::{GravatarResolver, Label, PublicRegistrationTable};

/// Turns a projected table into markup for the event page.
///
/// Implementations own escaping; cell values are untrusted attendee input.
pub trait TableRenderer: Send + Sync {
    fn render_table(&self, table: &PublicRegistrationTable, language: &LanguageCode) -> String;

    /// Static markup for the page `<head>`.
    fn render_head(&self) -> String;
}

/// Renders the table as a plain HTML `<table>` with a leading avatar column.
#[derive(Debug, Clone)]
pub struct HtmlTableRenderer {
    avatar_size: u16,
}

impl HtmlTableRenderer {
    pub fn new(avatar_size: u16) -> Self {
        Self { avatar_size }
    }
}

impl Default for HtmlTableRenderer {
    fn default() -> Self {
        Self::new(GravatarResolver::DEFAULT_SIZE)
    }
}

impl TableRenderer for HtmlTableRenderer {
    fn render_table(&self, table: &PublicRegistrationTable, language: &LanguageCode) -> String {
        if table.is_empty() {
            return String::new();
        }

        let mut html = String::new();
        html.push_str(&format!(
            "<section class=\"public-registrations\" lang=\"{}\">\n",
            escape(language.as_str())
        ));
        html.push_str(&format!(
            "<h3>{}</h3>\n",
            escape(&Label::PublicRegistrations.localize(language))
        ));
        html.push_str("<table class=\"table table-striped\">\n<thead><tr><th></th>");
        for header in &table.headers {
            html.push_str(&format!("<th>{}</th>", escape(header)));
        }
        html.push_str("</tr></thead>\n<tbody>\n");

        for row in &table.rows {
            html.push_str(&format!(
                "<tr><td><img src=\"{}\" alt=\"\" width=\"{size}\" height=\"{size}\" loading=\"lazy\"></td>",
                escape(&row.avatar_url),
                size = self.avatar_size
            ));
            for field in &row.fields {
                html.push_str(&format!("<td>{}</td>", escape(field)));
            }
            html.push_str("</tr>\n");
        }

        html.push_str("</tbody>\n</table>\n</section>\n");
        html
    }

    fn render_head(&self) -> String {
        format!(
            "<style>.public-registrations img {{ border-radius: 50%; width: {size}px; height: {size}px; }}</style>\n",
            size = self.avatar_size
        )
    }
}

/// Escapes text for use in HTML content and attribute values.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::PublicRegistrationRow;

    fn table() -> PublicRegistrationTable {
        PublicRegistrationTable {
            headers: vec!["Name".to_string(), "Diet".to_string()],
            rows: vec![PublicRegistrationRow {
                avatar_url: "https://secure.gravatar.com/avatar/abc?s=24&d=wavatar".to_string(),
                fields: vec!["Jane Doe".to_string(), "Vegetarian".to_string()],
            }],
        }
    }

    #[test]
    fn empty_table_renders_nothing() {
        let renderer = HtmlTableRenderer::default();
        let empty = PublicRegistrationTable {
            headers: vec!["Name".to_string()],
            rows: Vec::new(),
        };
        assert_eq!(renderer.render_table(&empty, &"en".into()), "");
    }

    #[test]
    fn renders_headers_rows_and_avatar() {
        let html = HtmlTableRenderer::default().render_table(&table(), &"en".into());

        assert!(html.contains("<h3>Public registrations</h3>"));
        assert!(html.contains("<th></th><th>Name</th><th>Diet</th>"));
        assert!(html.contains("<td>Jane Doe</td><td>Vegetarian</td>"));
        assert!(html.contains(
            "<img src=\"https://secure.gravatar.com/avatar/abc?s=24&amp;d=wavatar\" alt=\"\" width=\"24\" height=\"24\""
        ));
    }

    #[test]
    fn attendee_input_is_escaped() {
        let mut table = table();
        table.rows[0].fields[0] = "<script>alert('x')</script> & \"co\"".to_string();

        let html = HtmlTableRenderer::default().render_table(&table, &"en".into());
        assert!(!html.contains("<script>"));
        assert!(html.contains(
            "<td>&lt;script&gt;alert(&#x27;x&#x27;)&lt;/script&gt; &amp; &quot;co&quot;</td>"
        ));
    }

    #[test]
    fn heading_is_localized() {
        let html = HtmlTableRenderer::default().render_table(&table(), &"de".into());
        assert!(html.contains("<h3>Öffentliche Anmeldungen</h3>"));
        assert!(html.contains("lang=\"de\""));
    }

    #[test]
    fn rendering_is_deterministic() {
        let renderer = HtmlTableRenderer::new(32);
        assert_eq!(
            renderer.render_table(&table(), &"en".into()),
            renderer.render_table(&table(), &"en".into())
        );
        assert!(renderer.render_head().contains("width: 32px"));
    }
}

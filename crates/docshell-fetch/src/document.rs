//! Parsed HTML documents

use scraper::{Html, Selector};
use url::Url;

/// A fetched document.
///
/// Keeps the source markup rather than the parsed tree so the document can
/// move between tasks; [`Document::html`] re-parses on demand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    url: Url,
    markup: String,
    title: Option<String>,
}

impl Document {
    pub fn parse(url: Url, markup: String) -> Self {
        let title = extract_title(&Html::parse_document(&markup));
        Self { url, markup, title }
    }

    /// URL the document was served from, after redirects
    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn markup(&self) -> &str {
        &self.markup
    }

    /// Text of the first non-empty `<title>`
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn html(&self) -> Html {
        Html::parse_document(&self.markup)
    }
}

fn extract_title(doc: &Html) -> Option<String> {
    let sel = Selector::parse("title").ok()?;
    for el in doc.select(&sel) {
        let text = el.text().collect::<Vec<_>>().join(" ");
        let cleaned = normalize_whitespace(&text);
        if !cleaned.is_empty() {
            return Some(cleaned);
        }
    }
    None
}

fn normalize_whitespace(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut last_space = false;
    for ch in input.chars() {
        if ch.is_whitespace() {
            if !last_space {
                out.push(' ');
                last_space = true;
            }
        } else {
            out.push(ch);
            last_space = false;
        }
    }
    out.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url() -> Url {
        Url::parse("https://example.com/pwa/a.amp.max.html").unwrap()
    }

    #[test]
    fn test_title() {
        let doc = Document::parse(
            url(),
            "<html><head><title>\n  Hello\n  World </title></head><body></body></html>".to_string(),
        );
        assert_eq!(doc.title(), Some("Hello World"));
    }

    #[test]
    fn test_missing_title() {
        let doc = Document::parse(url(), "<p>no head</p>".to_string());
        assert_eq!(doc.title(), None);

        let sel = Selector::parse("p").unwrap();
        assert_eq!(doc.html().select(&sel).count(), 1);
    }
}

//! Fixed directory records and About-page snippet extraction.
//!
//! The directory itself is hardcoded. The only dynamic part is the
//! enrichment snippet, pulled out of the scraped About page markdown
//! around the first mention of the person's name.

use crate::types::Result;
use crate::web::firecrawl::FirecrawlClient;
use serde::Serialize;
use serde_json::{json, Value};

/// Company About page scraped for person snippets.
pub const ABOUT_URL: &str = "https://ferrouslabs.dev/about";

/// Paragraphs shorter than this fall back to a raw window at the match.
const MIN_PARAGRAPH_CHARS: usize = 200;
/// Width of the fallback window, in characters.
const FALLBACK_WINDOW_CHARS: usize = 800;
/// Hard cap on any returned snippet, in characters.
const MAX_SNIPPET_CHARS: usize = 1200;
/// Characters returned when the person is not mentioned at all.
const UNMATCHED_PREFIX_CHARS: usize = 600;

/// One entry in the fixed company directory.
#[derive(Debug, Clone, Serialize)]
pub struct Person {
    /// Full name, also the snippet search keyword.
    pub name: &'static str,
    /// Position at the company.
    pub role: &'static str,
    /// One-sentence bio.
    pub summary: &'static str,
    /// External references.
    pub links: [Link; 1],
}

/// External reference attached to a person record.
#[derive(Debug, Clone, Serialize)]
pub struct Link {
    /// Display title.
    pub title: &'static str,
    /// Target URL.
    pub url: &'static str,
}

/// Chief executive officer record.
pub const CEO: Person = Person {
    name: "Iris Navarro",
    role: "Co-founder, CEO",
    summary: "Iris Navarro is a co-founder and CEO of Ferrous Labs, leading engineering and operations.",
    links: [Link {
        title: "Ferrous Labs About",
        url: ABOUT_URL,
    }],
};

/// Chief technology officer record.
pub const CTO: Person = Person {
    name: "Elif Demir",
    role: "Co-founder, CTO",
    summary: "Elif Demir is a co-founder and CTO of Ferrous Labs, focusing on product and partnerships.",
    links: [Link {
        title: "Ferrous Labs About",
        url: ABOUT_URL,
    }],
};

impl Person {
    /// Base record as envelope data.
    pub fn record(&self) -> Value {
        json!({
            "name": self.name,
            "role": self.role,
            "summary": self.summary,
            "links": self.links,
        })
    }

    /// Base record plus an `about_markdown_snippet` field.
    pub fn enriched(&self, snippet: String) -> Value {
        let mut record = self.record();
        record["about_markdown_snippet"] = Value::String(snippet);
        record
    }
}

/// Scrape the About page and return its markdown body as plain text.
pub async fn fetch_about_markdown(client: &FirecrawlClient) -> Result<String> {
    let data = client.scrape(ABOUT_URL).await?;
    Ok(markdown_text(&data))
}

/// Pull the markdown body out of a scrape response, falling back to the
/// `content` field. Non-string bodies are rendered as JSON text.
pub fn markdown_text(data: &Value) -> String {
    match markdown_field(data) {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => String::new(),
    }
}

/// Like [`markdown_text`] but keeps the field as JSON, falling back to the
/// whole response when neither field carries a usable body.
pub fn markdown_value(data: &Value) -> Value {
    markdown_field(data).unwrap_or(data).clone()
}

fn markdown_field(data: &Value) -> Option<&Value> {
    ["markdown", "content"]
        .iter()
        .find_map(|key| data.get(key).filter(|v| !v.is_null() && v.as_str() != Some("")))
}

/// Cut a snippet about one person out of About-page markdown.
///
/// The match expands to its enclosing blank-line-delimited paragraph.
/// Thin paragraphs fall back to a fixed window starting at the match,
/// and a missing match returns the head of the document. Every slice is
/// taken on character boundaries.
pub fn extract_person_snippet(markdown: &str, person: &str) -> String {
    let idx = match find_ignore_ascii_case(markdown, person) {
        Some(idx) => idx,
        None => return truncate_chars(markdown, UNMATCHED_PREFIX_CHARS).to_string(),
    };
    let start = match markdown[..idx].rfind("\n\n") {
        Some(p) => p + 2,
        None => 0,
    };
    let end = markdown[idx..]
        .find("\n\n")
        .map(|p| idx + p)
        .unwrap_or(markdown.len());
    let mut snippet = markdown[start..end].trim();
    if snippet.chars().count() < MIN_PARAGRAPH_CHARS {
        snippet = truncate_chars(&markdown[idx..], FALLBACK_WINDOW_CHARS);
    }
    truncate_chars(snippet, MAX_SNIPPET_CHARS).to_string()
}

/// ASCII case-insensitive substring search returning a byte offset that is
/// always a character boundary.
fn find_ignore_ascii_case(haystack: &str, needle: &str) -> Option<usize> {
    let h = haystack.as_bytes();
    let n = needle.as_bytes();
    if n.is_empty() {
        return Some(0);
    }
    h.len().checked_sub(n.len()).and_then(|last| {
        (0..=last)
            .filter(|&i| haystack.is_char_boundary(i))
            .find(|&i| h[i..i + n.len()].eq_ignore_ascii_case(n))
    })
}

/// First `limit` characters of `s`.
fn truncate_chars(s: &str, limit: usize) -> &str {
    match s.char_indices().nth(limit) {
        Some((byte_idx, _)) => &s[..byte_idx],
        None => s,
    }
}

// ============= Tests =============

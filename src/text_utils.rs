use std::io;
use std::io::ErrorKind;

use chrono::{DateTime, NaiveDate};
use lazy_static::lazy_static;
use markdown::Options;
use regex::Regex;
use unidecode::unidecode;

/// Lower-case kebab slug built from a title. Accents are transliterated.
pub fn slugify(title: &str) -> String {
    lazy_static! {
        static ref NON_SLUG_CHARS: Regex = Regex::new(r"[^a-z0-9]+").unwrap();
    }

    let ascii = unidecode(title).to_lowercase();
    let slug = NON_SLUG_CHARS.replace_all(&ascii, "-");
    slug.trim_matches('-').to_string()
}

fn parse_publish_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive())
}

/// "2024-03-04" or an RFC 3339 timestamp becomes "March 4, 2024".
/// Anything else is displayed as it came.
pub fn format_publish_date(raw: &str) -> String {
    match parse_publish_date(raw) {
        Some(date) => date.format("%B %-d, %Y").to_string(),
        None => raw.trim().to_string(),
    }
}

/// First paragraph of `text`, cut at a word boundary when longer than `max_chars`.
pub fn summarize(text: &str, max_chars: usize) -> String {
    let paragraph = text
        .split("\n\n")
        .map(str::trim)
        .find(|p| !p.is_empty() && !p.starts_with('#'))
        .unwrap_or("");

    if paragraph.chars().count() <= max_chars {
        return paragraph.to_string();
    }

    let mut summary = String::new();
    for word in paragraph.split_whitespace() {
        if summary.chars().count() + word.chars().count() + 1 > max_chars {
            break;
        }
        if !summary.is_empty() {
            summary.push(' ');
        }
        summary.push_str(word);
    }
    summary.push('…');
    summary
}

/// Markdown to HTML. Raw HTML in the source is escaped.
pub fn render_markdown(md_text: &str) -> io::Result<String> {
    match markdown::to_html_with_options(md_text, &Options::gfm()) {
        Ok(html) => Ok(html),
        Err(e) => Err(io::Error::new(ErrorKind::InvalidInput, format!("Error rendering markdown: {}", e))),
    }
}

//! Read projections over the note collection.
//!
//! # Responsibility
//! - Derive card previews from markdown content.
//! - Provide tag listing and tag filtering.
//!
//! # Invariants
//! - Projections never change note order (newest-first).
//! - Tag comparison is case-insensitive; the first spelling seen is kept.

use crate::model::note::Note;
use once_cell::sync::Lazy;
use regex::Regex;

const PREVIEW_MAX_CHARS: usize = 100;

static MARKDOWN_IMAGE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"!\[[^\]]*]\(([^)]+)\)").expect("valid image regex"));
static MARKDOWN_LINK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").expect("valid link regex"));
static MARKDOWN_SYMBOL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"[\*_`#>~\-\[\]\(\)!]+"#).expect("valid markdown symbol regex"));
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// Plain-text summary and cover image derived from markdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkdownPreview {
    pub preview_text: Option<String>,
    pub preview_image: Option<String>,
}

/// Derives a preview from markdown content.
///
/// - `preview_image`: first markdown image path.
/// - `preview_text`: images dropped, links reduced to their label, markdown
///   symbols removed, whitespace collapsed, first 100 chars kept.
pub fn derive_markdown_preview(content: &str) -> MarkdownPreview {
    let preview_image = MARKDOWN_IMAGE_RE
        .captures(content)
        .and_then(|caps| caps.get(1).map(|m| m.as_str().trim().to_string()))
        .filter(|value| !value.is_empty());

    let without_images = MARKDOWN_IMAGE_RE.replace_all(content, " ");
    let without_links = MARKDOWN_LINK_RE.replace_all(&without_images, "$1");
    let without_symbols = MARKDOWN_SYMBOL_RE.replace_all(&without_links, " ");
    let normalized = WHITESPACE_RE.replace_all(&without_symbols, " ");
    let trimmed = normalized.trim();
    let preview_text =
        (!trimmed.is_empty()).then(|| trimmed.chars().take(PREVIEW_MAX_CHARS).collect());

    MarkdownPreview {
        preview_text,
        preview_image,
    }
}

/// Distinct non-blank tags, sorted case-insensitively.
pub fn note_tags(notes: &[Note]) -> Vec<String> {
    let mut tags: Vec<(String, String)> = Vec::new();
    for note in notes {
        let tag = note.tag.trim();
        let folded = tag.to_lowercase();
        if tag.is_empty() || tags.iter().any(|(known, _)| *known == folded) {
            continue;
        }
        tags.push((folded, tag.to_string()));
    }
    tags.sort_by(|left, right| left.0.cmp(&right.0));
    tags.into_iter().map(|(_, tag)| tag).collect()
}

/// Notes carrying `tag`, newest-first.
pub fn notes_with_tag<'a>(notes: &'a [Note], tag: &str) -> Vec<&'a Note> {
    let wanted = tag.trim().to_lowercase();
    notes
        .iter()
        .filter(|note| note.tag.trim().to_lowercase() == wanted)
        .collect()
}

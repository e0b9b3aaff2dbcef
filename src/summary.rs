//! Short summaries for content cards and listings.
//!
//! The frontmatter description wins when present. Otherwise the body is
//! reduced to plain prose and the first meaningful paragraph is used, cut at
//! a sentence or word boundary.

use regex::{Regex, RegexSet};
use std::sync::LazyLock;

use crate::domain::ContentEntry;
use crate::error::Result;

pub const DEFAULT_SUMMARY_LENGTH: usize = 200;

const MIN_PARAGRAPH_LENGTH: usize = 30;
const ELLIPSIS: &str = "...";

/// Replacements applied in order to turn markdown/MDX into plain text.
const MARKUP_RULES: &[(&str, &str)] = &[
    // import statements, including multi-line ones
    (r"(?m)^import\s+[\s\S]*?from\s+.*?;?\s*$", ""),
    (r"(?m)^import\s*\{[\s\S]*?\}\s*from\s+.*?;?\s*$", ""),
    // components
    (r"<[A-Z][^>]*>[\s\S]*?</[A-Z][^>]*>", ""),
    (r"<[A-Z][^>]*/>", ""),
    (r"```[\s\S]*?```", ""),
    (r"`[^`]+`", ""),
    (r"<!--[\s\S]*?-->", ""),
    (r"!\[[^\]]*\]\([^)]+\)\s*", ""),
    (r"\[([^\]]+)\]\([^)]+\)", "$1"),
    (r"(?m)^#{1,6}\s+", ""),
    (r"\*\*([^*]+)\*\*", "$1"),
    (r"\*([^*]+)\*", "$1"),
    (r"__([^_]+)__", "$1"),
    (r"_([^_]+)_", "$1"),
    // list and blockquote markers
    (r"(?m)^\s*[-*+]\s+", ""),
    (r"(?m)^\s*\d+\.\s+", ""),
    (r"(?m)^>\s+", ""),
];

const STRUCTURAL_PATTERNS: &[&str] = &[
    r"(?i)^(table of contents|toc)",
    r"(?i)^(introduction|intro)$",
    r"(?i)^(summary|conclusion)$",
    r"(?i)^(references|bibliography)",
    r"^\d+\.\s*$",
    r"^[A-Z\s]+$",
];

struct MarkupStripper {
    frontmatter: Regex,
    rules: Vec<(Regex, &'static str)>,
    whitespace: Regex,
    paragraph_break: Regex,
    structural: RegexSet,
}

impl MarkupStripper {
    fn new() -> std::result::Result<Self, regex::Error> {
        let rules = MARKUP_RULES
            .iter()
            .map(|(pattern, replacement)| Ok((Regex::new(pattern)?, *replacement)))
            .collect::<std::result::Result<Vec<_>, regex::Error>>()?;
        Ok(Self {
            frontmatter: Regex::new(r"\A---[\s\S]*?---\n?")?,
            rules,
            whitespace: Regex::new(r"\s+")?,
            paragraph_break: Regex::new(r"\n\s*\n")?,
            structural: RegexSet::new(STRUCTURAL_PATTERNS)?,
        })
    }

    fn is_structural(&self, paragraph: &str) -> bool {
        self.structural.is_match(paragraph)
    }

    fn strip(&self, content: &str) -> String {
        // Frontmatter only counts at the very start; later `---` lines are breaks.
        let mut text = self.frontmatter.replace(content, "").into_owned();
        for (regex, replacement) in &self.rules {
            text = regex.replace_all(&text, *replacement).into_owned();
        }
        self.whitespace.replace_all(&text, " ").trim().to_string()
    }
}

static STRIPPER: LazyLock<std::result::Result<MarkupStripper, regex::Error>> =
    LazyLock::new(MarkupStripper::new);

fn stripper() -> Result<&'static MarkupStripper> {
    STRIPPER.as_ref().map_err(|e| e.clone().into())
}

/// Summary of `entry` of at most roughly `max_length` characters.
///
/// Never fails: if the body cannot be reduced to prose the title is used.
pub fn generate_summary(entry: &ContentEntry, max_length: usize) -> String {
    if let Some(description) = entry.description.as_deref().map(str::trim) {
        if !description.is_empty() {
            return truncate_at_sentence(description, max_length);
        }
    }

    match summary_from_body(&entry.body, max_length) {
        Ok(Some(summary)) => return summary,
        Ok(None) => {}
        Err(e) => log::warn!("Failed to generate summary for {}: {e}", entry.id),
    }

    format!("{}{ELLIPSIS}", entry.title)
}

fn summary_from_body(body: &str, max_length: usize) -> Result<Option<String>> {
    if body.is_empty() {
        return Ok(None);
    }
    let text = strip_markup(body)?;
    let paragraph = extract_first_meaningful_paragraph(&text)?;
    Ok((!paragraph.is_empty()).then(|| truncate_at_sentence(&paragraph, max_length)))
}

/// Plain prose from markdown/MDX source, whitespace collapsed.
pub fn strip_markup(content: &str) -> Result<String> {
    Ok(stripper()?.strip(content))
}

/// First blank-line separated paragraph that is long enough and does not
/// look like a heading or label, falling back to the first non-empty one.
pub fn extract_first_meaningful_paragraph(text: &str) -> Result<String> {
    let stripper = stripper()?;
    let paragraphs: Vec<&str> = stripper
        .paragraph_break
        .split(text)
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();

    let meaningful = paragraphs.iter().find(|p| {
        p.chars().count() >= MIN_PARAGRAPH_LENGTH && !stripper.is_structural(p)
    });
    Ok(meaningful
        .or(paragraphs.first())
        .map(|p| p.to_string())
        .unwrap_or_default())
}

/// Shortens `text` to `max_length` characters, preferring to end on a
/// sentence, then on a word (with an ellipsis), then anywhere.
pub fn truncate_at_sentence(text: &str, max_length: usize) -> String {
    if text.chars().count() <= max_length {
        return text.to_string();
    }

    let window_end = text
        .char_indices()
        .nth(max_length)
        .map_or(text.len(), |(i, _)| i);
    let window = &text[..window_end];
    let chars: Vec<(usize, char)> = window.char_indices().collect();

    let sentence_end = chars
        .iter()
        .enumerate()
        .filter(|&(pos, &(_, c))| {
            matches!(c, '.' | '!' | '?')
                && chars.get(pos + 1).is_none_or(|&(_, next)| next.is_whitespace())
        })
        .last();
    if let Some((pos, &(byte, c))) = sentence_end {
        if pos * 10 >= max_length * 6 {
            return text[..byte + c.len_utf8()].trim().to_string();
        }
    }

    let word_boundary = chars.iter().rposition(|&(_, c)| c == ' ');
    if let Some(pos) = word_boundary {
        if pos * 10 >= max_length * 7 {
            let (byte, _) = chars[pos];
            return format!("{}{ELLIPSIS}", text[..byte].trim());
        }
    }

    format!("{}{ELLIPSIS}", window.trim())
}

/// Whether `summary` is worth showing. Advisory only; the extractor does
/// not enforce it.
pub fn validate_summary(summary: &str) -> bool {
    if summary.chars().count() < 10 || summary == ELLIPSIS {
        return false;
    }
    let looks_truncated = summary
        .strip_suffix(ELLIPSIS)
        .is_some_and(|head| !head.is_empty() && !head.contains(['\n', '\r']));
    !looks_truncated
}

use std::fmt;

use super::DocumentTransform;
use crate::domain::DerivedMeta;
use crate::summary::strip_markup;
use crate::tree::Document;

pub const DEFAULT_WORDS_PER_MINUTE: u32 = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadingTime {
    pub words: usize,
    pub minutes: u32,
}

impl fmt::Display for ReadingTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} min read", self.minutes)
    }
}

/// Reading time of plain text at `words_per_minute`, rounded up to whole
/// minutes. Empty text reads in zero minutes.
pub fn reading_time(text: &str, words_per_minute: u32) -> ReadingTime {
    let words = text.split_whitespace().count();
    let minutes = words.div_ceil(words_per_minute.max(1) as usize);
    ReadingTime {
        words,
        minutes: u32::try_from(minutes).unwrap_or(u32::MAX),
    }
}

/// Whole minutes needed to read markdown source once markup, imports and
/// code are stripped.
pub fn estimate_reading_time(content: &str) -> u32 {
    let text = match strip_markup(content) {
        Ok(text) => text,
        Err(e) => {
            log::warn!("Counting raw words, markup stripping failed: {e}");
            content.to_string()
        }
    };
    reading_time(&text, DEFAULT_WORDS_PER_MINUTE).minutes
}

/// Writes `minutesRead` ("5 min read") into the derived metadata.
pub struct ReadingTimeEstimator {
    words_per_minute: u32,
}

impl ReadingTimeEstimator {
    pub fn new(words_per_minute: u32) -> Self {
        Self { words_per_minute }
    }
}

impl Default for ReadingTimeEstimator {
    fn default() -> Self {
        Self::new(DEFAULT_WORDS_PER_MINUTE)
    }
}

impl DocumentTransform for ReadingTimeEstimator {
    fn name(&self) -> &'static str {
        "reading-time"
    }

    fn transform(&self, doc: &mut Document, meta: &mut DerivedMeta) {
        let time = reading_time(&doc.plain_text(), self.words_per_minute);
        log::debug!("{} words, {}", time.words, time);
        meta.minutes_read = Some(time.to_string());
    }
}

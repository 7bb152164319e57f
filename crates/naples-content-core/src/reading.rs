//! Reading-time estimate derived from a document body.
//!
//! Words are whitespace-separated tokens of the raw body (markup included).
//! Minutes are rounded up, so any non-empty body reads as at least one
//! minute and an empty body as zero.

use serde::Serialize;

/// Default reading speed in words per minute.
pub const DEFAULT_WORDS_PER_MINUTE: u32 = 200;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReadingTime {
    pub words: usize,
    pub minutes: u32,
    /// Human-readable label, e.g. `"6 min read"`.
    pub text: String,
}

/// Estimate reading time for `body` at `words_per_minute`.
///
/// A speed of zero is treated as [`DEFAULT_WORDS_PER_MINUTE`].
pub fn reading_time(body: &str, words_per_minute: u32) -> ReadingTime {
    let wpm = if words_per_minute == 0 {
        DEFAULT_WORDS_PER_MINUTE
    } else {
        words_per_minute
    };
    let words = body.split_whitespace().count();
    let minutes = words.div_ceil(wpm as usize) as u32;
    ReadingTime {
        words,
        minutes,
        text: format!("{} min read", minutes),
    }
}

//! Presentation-only derived values.
//!
//! Pure functions over entity state, recomputed on every relevant
//! mutation. Reading time is stored on the item so listing queries never
//! re-parse body text; durations are computed on demand from dates.

use chrono::{Datelike, NaiveDate};

/// Average reading speed used for the reading-time estimate.
pub const WORDS_PER_MINUTE: u32 = 200;

/// Collaborator seam: renders rich body content to plain text for word
/// counting. The excluded rendering layer supplies the real
/// implementation; [`PlainTextBody`] treats the body as already plain.
pub trait BodyRenderer: Send + Sync {
    /// Strip markup and return the plain-text rendering of `body`.
    fn to_plain_text(&self, body: &str) -> String;
}

/// Identity renderer for bodies that are already plain text.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextBody;

impl BodyRenderer for PlainTextBody {
    fn to_plain_text(&self, body: &str) -> String {
        body.to_string()
    }
}

/// Whitespace-delimited word count of a plain-text body.
pub fn word_count(plain_text: &str) -> u32 {
    plain_text.split_whitespace().count() as u32
}

/// Reading time in minutes: `ceil(words / 200)`, floor clamped to 1.
pub fn reading_time_minutes(words: u32) -> u32 {
    words.div_ceil(WORDS_PER_MINUTE).max(1)
}

/// Whole months between two dates, resolving an open end to `as_of`.
///
/// Takes the absolute value to guard against data-entry date order issues;
/// validation prevents the inverted case from being stored.
pub fn duration_in_months(start: NaiveDate, end: Option<NaiveDate>, as_of: NaiveDate) -> u32 {
    let end = end.unwrap_or(as_of);
    let months = (end.year() - start.year()) * 12 + (end.month() as i32 - start.month() as i32);
    months.unsigned_abs()
}

/// Format months as a comma-joined phrase, omitting zero components and
/// pluralizing components greater than one: `"1 year, 6 months"`.
pub fn format_duration(months: u32) -> String {
    let years = months / 12;
    let remaining = months % 12;

    let mut parts = Vec::new();
    if years > 0 {
        parts.push(format!("{} year{}", years, if years > 1 { "s" } else { "" }));
    }
    if remaining > 0 {
        parts.push(format!(
            "{} month{}",
            remaining,
            if remaining > 1 { "s" } else { "" }
        ));
    }
    parts.join(", ")
}

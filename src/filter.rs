//! Recency filtering of parsed feed results.
//!
//! The arXiv API has no date-range parameter, so "papers from the last N days"
//! is applied client-side after the feed has been parsed.

use chrono::{DateTime, Duration, Utc};
use tracing::debug;

use crate::paper::{DateField, PaperRecord};

/// Keeps the records whose `field` timestamp lies within `[now - days, now]`.
///
/// Relative order is preserved. `days <= 0` disables the filter and returns the
/// input unchanged.
#[must_use]
pub fn filter_recent(
    papers: Vec<PaperRecord>,
    days: i64,
    field: DateField,
    now: DateTime<Utc>,
) -> Vec<PaperRecord> {
    if days <= 0 || papers.is_empty() {
        return papers;
    }

    let Some(cutoff) = Duration::try_days(days).and_then(|window| now.checked_sub_signed(window))
    else {
        // Window reaches past the representable range: everything up to `now` qualifies.
        return papers.into_iter().filter(|p| p.date(field) <= now).collect();
    };

    let before = papers.len();
    let kept: Vec<PaperRecord> = papers
        .into_iter()
        .filter(|paper| {
            let date = paper.date(field);
            date >= cutoff && date <= now
        })
        .collect();

    debug!(
        days,
        field = field.as_str(),
        before,
        after = kept.len(),
        "applied recency window"
    );
    kept
}

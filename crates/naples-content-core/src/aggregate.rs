//! Ordering rules shared by category loads and cross-category views.
//!
//! Documents order by `published_at` descending. Timestamps are compared as
//! strings, which orders ISO-8601 values correctly as long as a corpus uses
//! one consistent format. Sorting is stable: equal timestamps keep their
//! incoming order.

use crate::models::Document;

/// Default size of the featured/latest list.
pub const DEFAULT_FEATURED_LIMIT: usize = 6;

/// Stable sort, most recently published first.
pub fn sort_newest_first(docs: &mut [Document]) {
    docs.sort_by(|a, b| b.published_at().cmp(a.published_at()));
}

/// Concatenate per-category lists in the given order, re-sort newest
/// first, and keep the first `limit`.
///
/// No deduplication: categories are disjoint in identifier space.
pub fn merge_newest<I>(lists: I, limit: usize) -> Vec<Document>
where
    I: IntoIterator<Item = Vec<Document>>,
{
    let mut merged: Vec<Document> = lists.into_iter().flatten().collect();
    sort_newest_first(&mut merged);
    merged.truncate(limit);
    merged
}

//! Related-document recommendation by shared tags.
//!
//! # Scoring
//!
//! 1. Build the reference document's tag set.
//! 2. For every candidate other than the reference (compared by slug),
//!    score = number of distinct candidate tags also in the reference set.
//! 3. Drop candidates scoring zero.
//! 4. Stable sort by score, descending; ties keep pool order.
//! 5. Truncate to `limit`.
//!
//! Tag vocabularies are small and curated, so plain co-occurrence is enough;
//! there is no weighting by tag rarity.

use std::collections::HashSet;

use crate::models::Document;

/// Default number of related documents shown under an article.
pub const DEFAULT_RELATED_LIMIT: usize = 3;

/// Default number of results for [`related_across`].
pub const DEFAULT_RELATED_ACROSS_LIMIT: usize = 6;

/// Rank `pool` against `reference` by exact tag overlap.
pub fn related<'a>(reference: &Document, pool: &'a [Document], limit: usize) -> Vec<&'a Document> {
    let reference_tags: HashSet<&str> = reference.tags().iter().map(String::as_str).collect();
    rank(
        pool.iter().filter(|doc| doc.slug() != reference.slug()),
        |doc| {
            let tags: HashSet<&str> = doc.tags().iter().map(String::as_str).collect();
            tags.intersection(&reference_tags).count()
        },
        limit,
    )
}

/// Rank documents from several categories against a slug and tag list.
///
/// Tags compare case-insensitively. Candidates whose slug equals `slug` are
/// skipped. An empty tag list yields no results.
pub fn related_across<'a, I>(slug: &str, tags: &[String], pool: I, limit: usize) -> Vec<&'a Document>
where
    I: IntoIterator<Item = &'a Document>,
{
    if tags.is_empty() {
        return Vec::new();
    }
    let wanted: HashSet<String> = tags.iter().map(|t| t.to_lowercase()).collect();
    rank(
        pool.into_iter().filter(|doc| doc.slug() != slug),
        |doc| {
            let tags: HashSet<String> = doc.tags().iter().map(|t| t.to_lowercase()).collect();
            tags.intersection(&wanted).count()
        },
        limit,
    )
}

fn rank<'a>(
    candidates: impl Iterator<Item = &'a Document>,
    score: impl Fn(&Document) -> usize,
    limit: usize,
) -> Vec<&'a Document> {
    let mut scored: Vec<(usize, &'a Document)> = candidates
        .map(|doc| (score(doc), doc))
        .filter(|(s, _)| *s > 0)
        .collect();
    scored.sort_by(|a, b| b.0.cmp(&a.0));
    scored.into_iter().take(limit).map(|(_, doc)| doc).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::sample_document;

    fn slugs(docs: &[&Document]) -> Vec<String> {
        docs.iter().map(|d| d.slug().to_string()).collect()
    }

    #[test]
    fn test_ranks_by_shared_tags_and_drops_zero() {
        let reference = sample_document("ref", &["A", "B", "C"], "2024-01-01");
        let pool = vec![
            sample_document("only-a", &["A"], "2024-01-01"),
            sample_document("a-and-b", &["A", "B"], "2024-01-01"),
            sample_document("only-d", &["D"], "2024-01-01"),
        ];
        let out = related(&reference, &pool, DEFAULT_RELATED_LIMIT);
        assert_eq!(slugs(&out), vec!["a-and-b", "only-a"]);
    }

    #[test]
    fn test_excludes_reference_itself() {
        let reference = sample_document("ref", &["beach"], "2024-01-01");
        let pool = vec![
            reference.clone(),
            sample_document("other", &["beach"], "2024-01-01"),
        ];
        assert_eq!(slugs(&related(&reference, &pool, 3)), vec!["other"]);
    }

    #[test]
    fn test_ties_keep_pool_order_and_limit_applies() {
        let reference = sample_document("ref", &["beach"], "2024-01-01");
        let pool: Vec<Document> = ["one", "two", "three", "four"]
            .iter()
            .map(|s| sample_document(s, &["beach"], "2024-01-01"))
            .collect();
        assert_eq!(slugs(&related(&reference, &pool, 3)), vec!["one", "two", "three"]);
    }

    #[test]
    fn test_duplicate_candidate_tags_count_once() {
        let reference = sample_document("ref", &["beach", "sunset"], "2024-01-01");
        let pool = vec![
            sample_document("dupes", &["beach", "beach", "beach"], "2024-01-01"),
            sample_document("both", &["beach", "sunset"], "2024-01-01"),
        ];
        assert_eq!(slugs(&related(&reference, &pool, 3)), vec!["both", "dupes"]);
    }

    #[test]
    fn test_related_across_is_case_insensitive() {
        let pool = vec![
            sample_document("upper", &["Beach"], "2024-01-01"),
            sample_document("current", &["beach"], "2024-01-01"),
            sample_document("none", &["golf"], "2024-01-01"),
        ];
        let out = related_across("current", &["BEACH".to_string()], &pool, 6);
        assert_eq!(slugs(&out), vec!["upper"]);
    }

    #[test]
    fn test_related_across_empty_tags() {
        let pool = vec![sample_document("a", &["beach"], "2024-01-01")];
        assert!(related_across("x", &[], &pool, 6).is_empty());
    }
}

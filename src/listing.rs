//! Listing commands: `list`, `slugs`, `related` and `featured`.

use anyhow::Result;

use naples_content_core::{Category, Document};

use crate::repository::ContentRepository;

pub fn run_list(
    repo: &ContentRepository,
    category: Category,
    include_drafts: bool,
    json: bool,
) -> Result<()> {
    let docs = repo.load_category(category, include_drafts);
    print_documents(&docs, json)
}

pub fn run_slugs(repo: &ContentRepository, category: Category, include_drafts: bool) -> Result<()> {
    for slug in repo.list_slugs(category, include_drafts) {
        println!("{}", slug);
    }
    Ok(())
}

/// Related reading for one published document.
///
/// Without `across` the pool is the document's own category, ranked by exact
/// tag overlap. With `across` the configured related categories are pooled
/// and tags compare case-insensitively. Exits with status 1 when the slug is
/// absent.
pub fn run_related(
    repo: &ContentRepository,
    category: Category,
    slug: &str,
    limit: Option<usize>,
    across: bool,
    json: bool,
) -> Result<()> {
    let doc = match repo.get_by_slug(category, slug, false) {
        Some(d) => d,
        None => {
            eprintln!("Error: no {} with slug '{}'", category, slug);
            std::process::exit(1);
        }
    };

    let aggregate = &repo.config().aggregate;
    let related = if across {
        repo.get_related_across(
            doc.slug(),
            doc.tags(),
            &aggregate.related_categories,
            limit.unwrap_or(aggregate.related_across_limit),
        )
    } else {
        let pool = repo.load_category(category, false);
        repo.get_related(&doc, &pool, limit.unwrap_or(aggregate.related_limit))
    };

    if related.is_empty() && !json {
        println!("No related documents for '{}'.", slug);
        return Ok(());
    }
    print_documents(&related, json)
}

pub fn run_featured(repo: &ContentRepository, limit: Option<usize>, json: bool) -> Result<()> {
    let limit = limit.unwrap_or(repo.config().aggregate.featured_limit);
    print_documents(&repo.get_featured(limit), json)
}

/// Newest documents of one category.
pub fn run_latest(
    repo: &ContentRepository,
    category: Category,
    limit: Option<usize>,
    json: bool,
) -> Result<()> {
    let limit = limit.unwrap_or(repo.config().aggregate.featured_limit);
    print_documents(&repo.get_latest_in(category, limit), json)
}

fn print_documents(docs: &[Document], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(docs)?);
        return Ok(());
    }

    println!(
        "{:<14} {:<36} {:<10} {:<9} {:>8}  TITLE",
        "CATEGORY", "SLUG", "PUBLISHED", "STATUS", "READING"
    );
    for doc in docs {
        println!(
            "{:<14} {:<36} {:<10} {:<9} {:>8}  {}",
            doc.category(),
            doc.slug(),
            published_column(doc),
            doc.status(),
            format!("{} min", doc.reading_time.minutes),
            doc.title()
        );
    }
    Ok(())
}

/// `YYYY-MM-DD`, or the first ten characters when the timestamp has no
/// leading calendar date.
fn published_column(doc: &Document) -> String {
    match doc.metadata.published_date() {
        Some(date) => date.to_string(),
        None => doc.published_at().chars().take(10).collect(),
    }
}

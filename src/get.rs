//! Document retrieval by category and slug.
//!
//! Used by `content get`. Prints the metadata header, reading time, table of
//! contents and raw body, or the serialized document with `--json`.

use anyhow::Result;
use std::fmt;

use naples_content_core::toc::{nest_toc, TocNode, DEFAULT_MAX_LEVEL};
use naples_content_core::Category;

use crate::repository::ContentRepository;

/// CLI entry point. Exits with status 1 when the slug is absent.
pub fn run_get(
    repo: &ContentRepository,
    category: Category,
    slug: &str,
    include_drafts: bool,
    json: bool,
) -> Result<()> {
    let doc = match repo.get_by_slug(category, slug, include_drafts) {
        Some(d) => d,
        None => {
            eprintln!("Error: no {} with slug '{}'", category, slug);
            std::process::exit(1);
        }
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&doc)?);
        return Ok(());
    }

    let common = &doc.metadata.common;
    println!("--- Document ---");
    println!("category:     {}", doc.category());
    println!("slug:         {}", doc.slug());
    println!("title:        {}", doc.title());
    println!("status:       {}", doc.status());
    println!(
        "published_at: {}",
        with_long_date(
            &common.published_at,
            doc.metadata.published_date().map(|d| d.format(LONG_DATE))
        )
    );
    println!(
        "updated_at:   {}",
        with_long_date(
            &common.updated_at,
            doc.metadata.updated_date().map(|d| d.format(LONG_DATE))
        )
    );
    println!("author:       {}", common.author);
    if !common.tags.is_empty() {
        println!("tags:         {}", common.tags.join(", "));
    }
    if let Some(ref url) = common.canonical_url {
        println!("canonical:    {}", url);
    }
    println!("reading_time: {}", doc.reading_time.text);
    println!("source:       {}", doc.source);
    println!(
        "details:      {}",
        serde_json::to_string(&doc.metadata.details)?
    );
    println!();

    let toc = nest_toc(&doc.toc(DEFAULT_MAX_LEVEL));
    if !toc.is_empty() {
        println!("--- Contents ---");
        print_toc(&toc, 0);
        println!();
    }

    println!("--- Body ---");
    println!("{}", doc.body);

    Ok(())
}

/// Date format the site renders under a headline.
const LONG_DATE: &str = "%B %-d, %Y";

/// `raw (March 1, 2024)` when the timestamp starts with a calendar date.
fn with_long_date(raw: &str, date: Option<impl fmt::Display>) -> String {
    match date {
        Some(date) => format!("{} ({})", raw, date),
        None => raw.to_string(),
    }
}

fn print_toc(nodes: &[TocNode], depth: usize) {
    for node in nodes {
        println!("{}- {} (#{})", "  ".repeat(depth), node.item.text, node.item.id);
        print_toc(&node.children, depth + 1);
    }
}

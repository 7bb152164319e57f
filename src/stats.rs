//! Content statistics.
//!
//! A quick summary of what the site will render: published and draft counts
//! per category, plus the aggregate counts the home page shows. Used by
//! `content stats` to confirm new content was picked up.

use anyhow::Result;

use naples_content_core::Category;

use crate::repository::ContentRepository;

struct CategoryStats {
    category: Category,
    published: usize,
    drafts: usize,
    words: usize,
}

/// Run the stats command: load every category and print a summary.
pub fn run_stats(repo: &ContentRepository) -> Result<()> {
    let stats: Vec<CategoryStats> = Category::ALL
        .iter()
        .map(|category| {
            let docs = repo.load_category(*category, true);
            let published = docs.iter().filter(|d| d.is_published()).count();
            CategoryStats {
                category: *category,
                published,
                drafts: docs.len() - published,
                words: docs.iter().map(|d| d.reading_time.words).sum(),
            }
        })
        .collect();

    let total_published: usize = stats.iter().map(|s| s.published).sum();
    let total_drafts: usize = stats.iter().map(|s| s.drafts).sum();

    println!("Naples Content — Repository Stats");
    println!("=================================");
    println!();
    println!("  Root:        {}", repo.config().content.root.display());
    println!("  Published:   {}", total_published);
    println!("  Drafts:      {}", total_drafts);
    println!();
    println!(
        "  {:<16} {:>9} {:>7} {:>9}",
        "CATEGORY", "PUBLISHED", "DRAFTS", "WORDS"
    );
    println!("  {}", "-".repeat(44));
    for s in &stats {
        println!(
            "  {:<16} {:>9} {:>7} {:>9}",
            s.category, s.published, s.drafts, s.words
        );
    }

    let counts = repo.get_counts();
    println!();
    println!("  Home page counts:");
    for (category, count) in &counts {
        println!("    {:<14} {}", category, count);
    }
    println!();

    Ok(())
}

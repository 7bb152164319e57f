//! `content sources`: one status line per category directory.
//!
//! Uses the same scan as the loader but never provisions, so it is safe to
//! run against a checkout without touching it.

use anyhow::Result;

use naples_content_core::Category;

use crate::config::Config;
use crate::storage::{build_globset, scan_dir};

/// Print each category's directory and whether it exists. Read-only: missing
/// directories are reported, not provisioned.
pub fn list_sources(config: &Config) -> Result<()> {
    let include = build_globset(&config.content.include_globs)?;

    println!("{:<16} {:<10} {:>9}  DIRECTORY", "CATEGORY", "STATUS", "RESOURCES");
    for category in Category::ALL {
        let dir = config.category_dir(category);
        let (status, resources) = match scan_dir(&dir, &include) {
            Ok(Some(scan)) if scan.failures.is_empty() => ("OK", scan.entries.len().to_string()),
            Ok(Some(scan)) => (
                "DEGRADED",
                format!("{}/{}", scan.entries.len(), scan.entries.len() + scan.failures.len()),
            ),
            Ok(None) => ("MISSING", "-".to_string()),
            Err(_) => ("ERROR", "-".to_string()),
        };
        println!(
            "{:<16} {:<10} {:>9}  {}",
            category,
            status,
            resources,
            dir.display()
        );
    }

    Ok(())
}

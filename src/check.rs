//! Content linting for build pipelines.
//!
//! `content check` loads every category with drafts included and collects
//! every diagnostic instead of stopping at the first bad file, so one run
//! reports everything an author has to fix.
//!
//! Checking is read-only: missing category directories are not provisioned.
//! A category directory that cannot be listed fails the run, since none of
//! its resources were checked.

use anyhow::Result;
use std::sync::Arc;

use crate::config::Config;
use crate::diagnostics::{Diagnostic, MemorySink};
use crate::repository::ContentRepository;

/// Outcome of a check run.
#[derive(Debug, Default)]
pub struct CheckReport {
    pub documents: usize,
    pub rejected: Vec<Diagnostic>,
    /// Category directories that could not be listed.
    pub unlisted: Vec<Diagnostic>,
    pub warnings: Vec<Diagnostic>,
}

impl CheckReport {
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty() && self.unlisted.is_empty()
    }
}

/// Load everything without provisioning and sort the collected events into
/// rejections, listing failures and warnings (duplicate slugs).
pub fn check_content(config: &Config) -> Result<CheckReport> {
    let mut config = config.clone();
    config.content.provision_missing_dirs = false;

    let sink = Arc::new(MemorySink::new());
    let repo = ContentRepository::with_sink(config, sink.clone())?;
    let documents = repo.load_all(true).len();
    Ok(summarize(documents, sink.events()))
}

fn summarize(documents: usize, events: Vec<Diagnostic>) -> CheckReport {
    let mut report = CheckReport {
        documents,
        ..CheckReport::default()
    };
    for event in events {
        if event.is_rejection() {
            report.rejected.push(event);
        } else if matches!(event, Diagnostic::ScanFailed { .. }) {
            report.unlisted.push(event);
        } else if !matches!(event, Diagnostic::StorageProvisioned { error: None, .. }) {
            report.warnings.push(event);
        }
    }
    report
}

/// CLI entry point. Exits with status 1 when any resource was rejected or
/// any category directory could not be listed.
pub fn run_check(config: &Config) -> Result<()> {
    let report = check_content(config)?;

    for event in &report.rejected {
        print_rejection(event);
    }
    for event in &report.unlisted {
        print_rejection(event);
    }
    for event in &report.warnings {
        println!("warning: {}", event);
    }

    println!(
        "{} document(s) valid, {} rejected, {} warning(s)",
        report.documents,
        report.rejected.len(),
        report.warnings.len()
    );
    if !report.unlisted.is_empty() {
        println!("{} category listing(s) failed", report.unlisted.len());
    }

    if !report.is_clean() {
        std::process::exit(1);
    }
    Ok(())
}

fn print_rejection(event: &Diagnostic) {
    match event {
        Diagnostic::ValidationFailed {
            category,
            resource,
            violations,
        } => {
            println!("REJECTED [{}] {}", category, resource.display());
            for violation in violations {
                println!("  - {}", violation);
            }
        }
        Diagnostic::MalformedFrontMatter {
            category,
            resource,
            error,
        }
        | Diagnostic::Unreadable {
            category,
            resource,
            error,
        } => {
            println!("REJECTED [{}] {}", category, resource.display());
            println!("  - {}", error);
        }
        Diagnostic::ScanFailed {
            category,
            path,
            error,
        } => {
            println!("FAILED [{}] {}", category, path.display());
            println!("  - {}", error);
        }
        other => println!("{}", other),
    }
}

//! Category loader: storage → validated, enriched documents.
//!
//! # Pipeline
//!
//! 1. [`snapshot`] lists the category directory (provisioning it when
//!    missing) and computes its change signature.
//! 2. [`load_entries`] reports entries the listing could not inspect, reads
//!    each remaining resource, splits front matter from body,
//!    stamps the asserted category into the record's `type` key, and runs the
//!    schema registry. Failures are reported to the sink and skipped; one bad
//!    resource never affects its siblings.
//! 3. Accepted documents get a reading-time estimate and are stable-sorted
//!    newest first. Duplicate slugs are reported against that order, so the
//!    `first` path of a `DuplicateSlug` event is the one lookups return.
//!
//! Draft filtering happens last ([`select`]) so one validated load can serve
//! both draft-inclusive and default queries.

use globset::GlobSet;
use serde_json::Value;
use std::collections::HashMap;
use std::path::PathBuf;

use naples_content_core::aggregate::sort_newest_first;
use naples_content_core::frontmatter::parse_resource;
use naples_content_core::reading::reading_time;
use naples_content_core::{validate, Category, Document};

use crate::config::Config;
use crate::diagnostics::{Diagnostic, DiagnosticsSink};
use crate::storage::{self, DirScan, EntryFailure, ResourceEntry};

/// Listing of a category directory at one point in time.
#[derive(Debug, Clone)]
pub struct Snapshot {
    /// Change signature; `None` when the directory could not be listed, in
    /// which case the result must not be cached.
    pub signature: Option<String>,
    pub entries: Vec<ResourceEntry>,
    /// Matching entries that could not be inspected.
    pub failures: Vec<EntryFailure>,
}

/// List the resources of `category`.
///
/// A missing directory is an empty category. When
/// `content.provision_missing_dirs` is set it is created so new content has
/// somewhere to go.
pub fn snapshot(
    config: &Config,
    category: Category,
    include: &GlobSet,
    sink: &dyn DiagnosticsSink,
) -> Snapshot {
    let dir = config.category_dir(category);
    match storage::scan_dir(&dir, include) {
        Ok(Some(scan)) => {
            let signature = Some(storage::signature(Some(&scan)));
            let DirScan { entries, failures } = scan;
            Snapshot {
                signature,
                entries,
                failures,
            }
        }
        Ok(None) => {
            if config.content.provision_missing_dirs {
                let error = storage::provision_dir(&dir).err().map(|e| e.to_string());
                sink.emit(Diagnostic::StorageProvisioned {
                    category,
                    path: dir,
                    error,
                });
            }
            Snapshot {
                signature: Some(storage::signature(None)),
                entries: Vec::new(),
                failures: Vec::new(),
            }
        }
        Err(e) => {
            sink.emit(Diagnostic::ScanFailed {
                category,
                path: dir,
                error: format!("{:#}", e),
            });
            Snapshot {
                signature: None,
                entries: Vec::new(),
                failures: Vec::new(),
            }
        }
    }
}

/// Load every valid document (any status) from a snapshot, newest first.
pub fn load_entries(
    config: &Config,
    category: Category,
    snap: &Snapshot,
    sink: &dyn DiagnosticsSink,
) -> Vec<Document> {
    for failure in &snap.failures {
        sink.emit(Diagnostic::Unreadable {
            category,
            resource: failure.path.clone(),
            error: failure.error.clone(),
        });
    }

    let words_per_minute = config.reading.words_per_minute;
    let mut documents: Vec<Document> = snap
        .entries
        .iter()
        .filter_map(|entry| load_resource(category, entry, words_per_minute, sink))
        .collect();

    sort_newest_first(&mut documents);
    report_duplicate_slugs(category, &documents, sink);
    documents
}

/// Keep published documents, or everything when `include_drafts` is set.
pub fn select(documents: &[Document], include_drafts: bool) -> Vec<Document> {
    documents
        .iter()
        .filter(|doc| include_drafts || doc.is_published())
        .cloned()
        .collect()
}

/// Uncached load of one category.
pub fn load_category(
    config: &Config,
    category: Category,
    include: &GlobSet,
    include_drafts: bool,
    sink: &dyn DiagnosticsSink,
) -> Vec<Document> {
    let snap = snapshot(config, category, include, sink);
    let documents = load_entries(config, category, &snap, sink);
    select(&documents, include_drafts)
}

fn load_resource(
    category: Category,
    entry: &ResourceEntry,
    words_per_minute: u32,
    sink: &dyn DiagnosticsSink,
) -> Option<Document> {
    let raw = match std::fs::read_to_string(&entry.path) {
        Ok(raw) => raw,
        Err(e) => {
            sink.emit(Diagnostic::Unreadable {
                category,
                resource: entry.path.clone(),
                error: e.to_string(),
            });
            return None;
        }
    };

    let parsed = match parse_resource(&raw) {
        Ok(parsed) => parsed,
        Err(e) => {
            sink.emit(Diagnostic::MalformedFrontMatter {
                category,
                resource: entry.path.clone(),
                error: e.to_string(),
            });
            return None;
        }
    };

    // The directory decides the category, whatever the file claims.
    let mut record = parsed.record;
    record.insert(
        "type".to_string(),
        Value::String(category.as_str().to_string()),
    );

    let metadata = match validate(category, &record) {
        Ok(metadata) => metadata,
        Err(err) => {
            sink.emit(Diagnostic::ValidationFailed {
                category,
                resource: entry.path.clone(),
                violations: err.violations,
            });
            return None;
        }
    };

    let estimate = reading_time(&parsed.body, words_per_minute);
    Some(Document::new(
        metadata,
        parsed.body,
        estimate,
        entry.path.display().to_string(),
    ))
}

fn report_duplicate_slugs(category: Category, documents: &[Document], sink: &dyn DiagnosticsSink) {
    let mut seen: HashMap<&str, &str> = HashMap::new();
    for doc in documents {
        match seen.get(doc.slug()) {
            Some(first) => sink.emit(Diagnostic::DuplicateSlug {
                category,
                slug: doc.slug().to_string(),
                first: PathBuf::from(*first),
                duplicate: PathBuf::from(&doc.source),
            }),
            None => {
                seen.insert(doc.slug(), &doc.source);
            }
        }
    }
}

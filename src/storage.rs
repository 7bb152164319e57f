//! Filesystem storage for category directories.
//!
//! Each category owns one directory under the content root holding one
//! resource per document. File names carry no meaning beyond enumeration
//! order; document identity comes from the validated `slug`.
//!
//! Only direct children matching `content.include_globs` are resources.
//! Resources are returned sorted by file name so that enumeration, and with
//! it the order of documents sharing a timestamp, is deterministic.

use anyhow::{Context, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;
use walkdir::WalkDir;

/// Signature reported for a category directory that does not exist.
pub const MISSING_SIGNATURE: &str = "missing";

/// A candidate resource inside a category directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceEntry {
    pub path: PathBuf,
    /// File name relative to the category directory.
    pub name: String,
    pub len: u64,
    /// Modification time in nanoseconds since the Unix epoch (0 if unknown).
    pub modified_ns: u128,
}

/// A matching directory entry that could not be inspected (dangling
/// symlink, permission denied on stat, ...).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryFailure {
    pub path: PathBuf,
    pub error: String,
}

/// Listing of one category directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirScan {
    /// Sorted by file name.
    pub entries: Vec<ResourceEntry>,
    /// Sorted by path.
    pub failures: Vec<EntryFailure>,
}

/// List the resources in `dir` that match `include`.
///
/// Returns `Ok(None)` when `dir` does not exist and `Err` only when `dir`
/// itself cannot be read. A bad entry lands in [`DirScan::failures`] and
/// never hides its siblings.
pub fn scan_dir(dir: &Path, include: &GlobSet) -> Result<Option<DirScan>> {
    if !dir.is_dir() {
        return Ok(None);
    }

    let mut scan = DirScan::default();
    let walker = WalkDir::new(dir).min_depth(1).max_depth(1).follow_links(true);
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.depth() == 0 => {
                return Err(e).with_context(|| format!("failed to list {}", dir.display()));
            }
            Err(e) => {
                let path = e.path().map(Path::to_path_buf).unwrap_or_else(|| dir.to_path_buf());
                if matches_include(&path, include) {
                    scan.failures.push(EntryFailure {
                        path,
                        error: e.to_string(),
                    });
                }
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().to_string();
        if !include.is_match(&name) {
            continue;
        }
        let metadata = match entry.metadata() {
            Ok(metadata) => metadata,
            Err(e) => {
                scan.failures.push(EntryFailure {
                    path: entry.path().to_path_buf(),
                    error: e.to_string(),
                });
                continue;
            }
        };
        let modified_ns = metadata
            .modified()
            .ok()
            .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
            .map(|d| d.as_nanos())
            .unwrap_or(0);
        scan.entries.push(ResourceEntry {
            path: entry.path().to_path_buf(),
            name,
            len: metadata.len(),
            modified_ns,
        });
    }

    // Sort for deterministic ordering
    scan.entries.sort_by(|a, b| a.name.cmp(&b.name));
    scan.failures.sort_by(|a, b| a.path.cmp(&b.path));

    Ok(Some(scan))
}

fn matches_include(path: &Path, include: &GlobSet) -> bool {
    path.file_name()
        .map(|name| include.is_match(name.to_string_lossy().as_ref()))
        .unwrap_or(false)
}

/// SHA-256 over the name, size and mtime of every resource, plus the path
/// of every failed entry.
///
/// Any added, removed, resized or touched resource changes the signature.
pub fn signature(scan: Option<&DirScan>) -> String {
    let Some(scan) = scan else {
        return MISSING_SIGNATURE.to_string();
    };
    let mut hasher = Sha256::new();
    for entry in &scan.entries {
        hasher.update(entry.name.as_bytes());
        hasher.update([0u8]);
        hasher.update(entry.len.to_le_bytes());
        hasher.update(entry.modified_ns.to_le_bytes());
    }
    for failure in &scan.failures {
        hasher.update([1u8]);
        hasher.update(failure.path.to_string_lossy().as_bytes());
    }
    hex::encode(hasher.finalize())
}

/// Create a missing category directory (and its parents).
pub fn provision_dir(dir: &Path) -> std::io::Result<()> {
    std::fs::create_dir_all(dir)
}

pub fn build_globset(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(Glob::new(pattern)?);
    }
    Ok(builder.build()?)
}

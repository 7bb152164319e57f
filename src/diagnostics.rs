//! Structured diagnostics emitted while loading content.
//!
//! Loading never fails as a whole. Resources that cannot be read, parsed or
//! validated are skipped, and each skip is reported as a [`Diagnostic`] to
//! the [`DiagnosticsSink`] injected into the repository. The surrounding
//! build can then alert on rejection rates without the repository depending
//! on a particular logging backend.
//!
//! | Sink | Use |
//! |------|-----|
//! | [`LogSink`] | Default. One `event=... key=value` line per event via `log`. |
//! | [`MemorySink`] | Collects events; used by `content check` and tests. |

use std::fmt;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use naples_content_core::{Category, Violation};

/// One event from a category load.
#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    /// The front matter parsed but broke the category schema.
    ValidationFailed {
        category: Category,
        resource: PathBuf,
        violations: Vec<Violation>,
    },
    /// The front matter block could not be parsed at all.
    MalformedFrontMatter {
        category: Category,
        resource: PathBuf,
        error: String,
    },
    /// The resource could not be read (permissions, invalid UTF-8, ...).
    Unreadable {
        category: Category,
        resource: PathBuf,
        error: String,
    },
    /// The category directory could not be listed; the load is empty.
    ScanFailed {
        category: Category,
        path: PathBuf,
        error: String,
    },
    /// A missing category directory was created (or creation failed).
    StorageProvisioned {
        category: Category,
        path: PathBuf,
        error: Option<String>,
    },
    /// Two documents in one category share a slug. `first` is the one that
    /// sorts first (newest) and wins lookups; `duplicate` is shadowed.
    DuplicateSlug {
        category: Category,
        slug: String,
        first: PathBuf,
        duplicate: PathBuf,
    },
}

impl Diagnostic {
    /// Stable event name used in log lines.
    pub fn event(&self) -> &'static str {
        match self {
            Diagnostic::ValidationFailed { .. } => "validation_failed",
            Diagnostic::MalformedFrontMatter { .. } => "malformed_front_matter",
            Diagnostic::Unreadable { .. } => "resource_unreadable",
            Diagnostic::ScanFailed { .. } => "scan_failed",
            Diagnostic::StorageProvisioned { .. } => "storage_provisioned",
            Diagnostic::DuplicateSlug { .. } => "duplicate_slug",
        }
    }

    pub fn category(&self) -> Category {
        match self {
            Diagnostic::ValidationFailed { category, .. }
            | Diagnostic::MalformedFrontMatter { category, .. }
            | Diagnostic::Unreadable { category, .. }
            | Diagnostic::ScanFailed { category, .. }
            | Diagnostic::StorageProvisioned { category, .. }
            | Diagnostic::DuplicateSlug { category, .. } => *category,
        }
    }

    /// True when a resource was excluded from the result because of this event.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            Diagnostic::ValidationFailed { .. }
                | Diagnostic::MalformedFrontMatter { .. }
                | Diagnostic::Unreadable { .. }
        )
    }

    fn level(&self) -> log::Level {
        match self {
            Diagnostic::ValidationFailed { .. }
            | Diagnostic::MalformedFrontMatter { .. }
            | Diagnostic::Unreadable { .. }
            | Diagnostic::DuplicateSlug { .. } => log::Level::Warn,
            Diagnostic::ScanFailed { .. } => log::Level::Error,
            Diagnostic::StorageProvisioned { error: Some(_), .. } => log::Level::Error,
            Diagnostic::StorageProvisioned { error: None, .. } => log::Level::Info,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "event={} category={}", self.event(), self.category())?;
        match self {
            Diagnostic::ValidationFailed {
                resource,
                violations,
                ..
            } => {
                let joined = violations
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join("; ");
                write!(
                    f,
                    " resource={} violations={} detail=\"{}\"",
                    resource.display(),
                    violations.len(),
                    joined
                )
            }
            Diagnostic::MalformedFrontMatter {
                resource, error, ..
            }
            | Diagnostic::Unreadable {
                resource, error, ..
            } => write!(f, " resource={} error=\"{}\"", resource.display(), error),
            Diagnostic::ScanFailed { path, error, .. } => {
                write!(f, " path={} error=\"{}\"", path.display(), error)
            }
            Diagnostic::StorageProvisioned { path, error, .. } => match error {
                None => write!(f, " path={} status=ok", path.display()),
                Some(e) => write!(f, " path={} status=error error=\"{}\"", path.display(), e),
            },
            Diagnostic::DuplicateSlug {
                slug,
                first,
                duplicate,
                ..
            } => write!(
                f,
                " slug={} first={} duplicate={}",
                slug,
                first.display(),
                duplicate.display()
            ),
        }
    }
}

/// Receiver for load diagnostics. Must be shareable across threads.
pub trait DiagnosticsSink: Send + Sync {
    fn emit(&self, diagnostic: Diagnostic);
}

impl<T: DiagnosticsSink + ?Sized> DiagnosticsSink for Arc<T> {
    fn emit(&self, diagnostic: Diagnostic) {
        (**self).emit(diagnostic)
    }
}

/// Writes each event through the `log` facade under the
/// `naples_content::diagnostics` target.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl DiagnosticsSink for LogSink {
    fn emit(&self, diagnostic: Diagnostic) {
        log::log!(target: "naples_content::diagnostics", diagnostic.level(), "{}", diagnostic);
    }
}

/// Keeps every event in memory, in emission order.
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Mutex<Vec<Diagnostic>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all events so far.
    pub fn events(&self) -> Vec<Diagnostic> {
        self.lock().clone()
    }

    /// Events that excluded a resource from a load.
    pub fn rejections(&self) -> Vec<Diagnostic> {
        self.lock()
            .iter()
            .filter(|d| d.is_rejection())
            .cloned()
            .collect()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Diagnostic>> {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl DiagnosticsSink for MemorySink {
    fn emit(&self, diagnostic: Diagnostic) {
        self.lock().push(diagnostic);
    }
}

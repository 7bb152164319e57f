//! # Naples Content Core
//!
//! Shared, I/O-free logic for Naples Content: document models, the
//! per-category schema registry, front matter parsing, reading-time and
//! table-of-contents derivation, related-document scoring, and the
//! ordering rules used by cross-category aggregation.
//!
//! This crate never touches the filesystem. The loader in the `naples-content`
//! crate reads resources from disk and hands their text to
//! [`frontmatter::parse_resource`] and [`schema::validate`].

pub mod aggregate;
pub mod frontmatter;
pub mod models;
pub mod reading;
pub mod related;
pub mod schema;
pub mod toc;

pub use models::{Category, CategoryMetadata, CommonMetadata, Document, Metadata, Status};
pub use schema::{validate, RawRecord, ValidationError, Violation};

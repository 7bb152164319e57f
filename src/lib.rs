//! # Naples Content
//!
//! The structured content repository behind the Naples, Florida vacation
//! planner site. Content documents live as Markdown/MDX files with a front
//! matter block, one directory per category. This crate discovers them,
//! validates their metadata against the category schema, and answers the
//! queries the page layer needs to render listings, articles, related-reading
//! panels and the home page.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   ┌──────────────┐   ┌────────────────┐
//! │   Storage    │──▶│    Loader    │──▶│   Repository   │
//! │ <root>/<dir> │   │ parse+schema │   │ query + aggreg │
//! └──────────────┘   └──────┬───────┘   └───────┬────────┘
//!                           │                   │
//!                           ▼                   ▼
//!                    ┌──────────────┐     ┌──────────┐
//!                    │ Diagnostics  │     │   CLI    │
//!                    │  (log sink)  │     │(content) │
//!                    └──────────────┘     └──────────┘
//! ```
//!
//! Pure logic (schemas, front matter, ranking, ordering, table of contents)
//! lives in the I/O-free `naples-content-core` crate; this crate adds the
//! filesystem, configuration and CLI around it.
//!
//! ## Quick Start
//!
//! ```bash
//! content --root ./content check          # lint every category
//! content --root ./content list day-trip  # newest first
//! content --root ./content get hotel la-playa-beach-resort
//! content --config ./content.toml featured --json
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`diagnostics`] | Load events and sinks |
//! | [`storage`] | Category directory scanning and signatures |
//! | [`loader`] | Resource → validated [`Document`] pipeline |
//! | [`cache`] | Opt-in signature-keyed load cache |
//! | [`repository`] | Query and aggregation entry points |
//! | [`get`] | `content get` |
//! | [`listing`] | `content list`, `slugs`, `related`, `featured` |
//! | [`stats`] | `content stats` |
//! | [`sources`] | `content sources` |
//! | [`check`] | `content check` |

pub mod cache;
pub mod check;
pub mod config;
pub mod diagnostics;
pub mod get;
pub mod listing;
pub mod loader;
pub mod repository;
pub mod sources;
pub mod stats;
pub mod storage;

pub use naples_content_core::{Category, Document, Status};
pub use repository::ContentRepository;

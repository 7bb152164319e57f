//! The query surface consumed by the page layer.
//!
//! [`ContentRepository`] owns the configuration, the diagnostics sink and
//! the optional load cache. Every query goes back to storage (or to a cache
//! entry whose signature still matches), so content edits are visible on
//! the next call.
//!
//! | Operation | Returns |
//! |-----------|---------|
//! | [`load_category`](ContentRepository::load_category) | Valid documents, newest first |
//! | [`get_by_slug`](ContentRepository::get_by_slug) | First match in load order |
//! | [`list_slugs`](ContentRepository::list_slugs) | Slugs in load order |
//! | [`get_related`](ContentRepository::get_related) | Same-pool tag overlap |
//! | [`get_related_across`](ContentRepository::get_related_across) | Tag overlap across categories |
//! | [`get_featured`](ContentRepository::get_featured) | Newest across featured categories |
//! | [`get_latest_in`](ContentRepository::get_latest_in) | Newest in one category |
//! | [`get_counts`](ContentRepository::get_counts) | Published count per category |
//! | [`load_all`](ContentRepository::load_all) | Every category, in declaration order |

use anyhow::Result;
use globset::GlobSet;
use std::collections::BTreeMap;
use std::sync::Arc;

use naples_content_core::aggregate::merge_newest;
use naples_content_core::related::{related, related_across};
use naples_content_core::{Category, Document};

use crate::cache::LoadCache;
use crate::config::Config;
use crate::diagnostics::{DiagnosticsSink, LogSink};
use crate::loader;
use crate::storage::build_globset;

pub struct ContentRepository {
    config: Config,
    include: GlobSet,
    sink: Arc<dyn DiagnosticsSink>,
    cache: Option<LoadCache>,
}

impl ContentRepository {
    /// Repository reporting diagnostics through the `log` facade.
    pub fn new(config: Config) -> Result<Self> {
        Self::with_sink(config, Arc::new(LogSink))
    }

    pub fn with_sink(config: Config, sink: Arc<dyn DiagnosticsSink>) -> Result<Self> {
        config.validate()?;
        let include = build_globset(&config.content.include_globs)?;
        let cache = config.cache.enabled.then(LoadCache::new);
        Ok(Self {
            config,
            include,
            sink,
            cache,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Valid documents of `category`, newest first. Drafts are excluded
    /// unless `include_drafts` is set.
    pub fn load_category(&self, category: Category, include_drafts: bool) -> Vec<Document> {
        loader::select(&self.validated(category), include_drafts)
    }

    /// The first document of `category` with this slug, in load order.
    /// A miss is `None`, never an error.
    pub fn get_by_slug(&self, category: Category, slug: &str, include_drafts: bool) -> Option<Document> {
        self.validated(category)
            .iter()
            .filter(|doc| include_drafts || doc.is_published())
            .find(|doc| doc.slug() == slug)
            .cloned()
    }

    pub fn list_slugs(&self, category: Category, include_drafts: bool) -> Vec<String> {
        self.validated(category)
            .iter()
            .filter(|doc| include_drafts || doc.is_published())
            .map(|doc| doc.slug().to_string())
            .collect()
    }

    /// Rank `pool` by tags shared with `document`. Pure: no storage access.
    pub fn get_related(&self, document: &Document, pool: &[Document], limit: usize) -> Vec<Document> {
        related(document, pool, limit).into_iter().cloned().collect()
    }

    /// Rank published documents of `categories` by case-insensitive tag
    /// overlap with `tags`. Pass `&config().aggregate.related_categories`
    /// for the site default.
    pub fn get_related_across(
        &self,
        slug: &str,
        tags: &[String],
        categories: &[Category],
        limit: usize,
    ) -> Vec<Document> {
        if tags.is_empty() {
            return Vec::new();
        }
        let pool: Vec<Document> = categories
            .iter()
            .flat_map(|category| self.load_category(*category, false))
            .collect();
        related_across(slug, tags, &pool, limit)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Newest published documents across the featured categories.
    pub fn get_featured(&self, limit: usize) -> Vec<Document> {
        let lists = self
            .config
            .aggregate
            .featured_categories
            .iter()
            .map(|category| self.load_category(*category, false));
        merge_newest(lists, limit)
    }

    pub fn get_latest_in(&self, category: Category, limit: usize) -> Vec<Document> {
        let mut docs = self.load_category(category, false);
        docs.truncate(limit);
        docs
    }

    /// Published count for each configured count category.
    pub fn get_counts(&self) -> BTreeMap<Category, usize> {
        self.config
            .aggregate
            .count_categories
            .iter()
            .map(|category| (*category, self.load_category(*category, false).len()))
            .collect()
    }

    /// Every category in declaration order, each newest first.
    pub fn load_all(&self, include_drafts: bool) -> Vec<Document> {
        Category::ALL
            .iter()
            .flat_map(|category| self.load_category(*category, include_drafts))
            .collect()
    }

    /// Drop every cached load. No-op when caching is disabled.
    pub fn invalidate(&self) {
        if let Some(cache) = &self.cache {
            cache.clear();
        }
    }

    /// Draft-inclusive validated load, from the cache when the storage
    /// signature is unchanged.
    fn validated(&self, category: Category) -> Arc<Vec<Document>> {
        let snap = loader::snapshot(&self.config, category, &self.include, self.sink.as_ref());

        if let (Some(cache), Some(signature)) = (&self.cache, snap.signature.as_deref()) {
            if let Some(documents) = cache.get(category, signature) {
                log::debug!("event=cache_hit category={}", category);
                return documents;
            }
        }

        let documents = Arc::new(loader::load_entries(
            &self.config,
            category,
            &snap,
            self.sink.as_ref(),
        ));
        log::debug!(
            "event=category_loaded category={} resources={} documents={}",
            category,
            snap.entries.len(),
            documents.len()
        );

        if let (Some(cache), Some(signature)) = (&self.cache, snap.signature) {
            cache.put(category, signature, Arc::clone(&documents));
        }
        documents
    }
}

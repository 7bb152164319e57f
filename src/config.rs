//! TOML configuration.
//!
//! Every section is optional; [`Config::default`] matches the layout the
//! site uses (`./content/<category dir>/*.mdx`). A minimal file looks like:
//!
//! ```toml
//! [content]
//! root = "./content"
//!
//! [cache]
//! enabled = true
//! ```

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use naples_content_core::aggregate::DEFAULT_FEATURED_LIMIT;
use naples_content_core::reading::DEFAULT_WORDS_PER_MINUTE;
use naples_content_core::related::{DEFAULT_RELATED_ACROSS_LIMIT, DEFAULT_RELATED_LIMIT};
use naples_content_core::Category;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub content: ContentConfig,
    #[serde(default)]
    pub reading: ReadingConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub aggregate: AggregateConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ContentConfig {
    #[serde(default = "default_root")]
    pub root: PathBuf,
    /// Matched against file names inside each category directory.
    #[serde(default = "default_include_globs")]
    pub include_globs: Vec<String>,
    /// Create a missing category directory on first load.
    #[serde(default = "default_true")]
    pub provision_missing_dirs: bool,
    /// Per-category directory overrides, relative to `root`, keyed by
    /// category discriminator (`where-to-stay = "neighborhoods"`).
    #[serde(default)]
    pub dirs: BTreeMap<String, String>,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            include_globs: default_include_globs(),
            provision_missing_dirs: true,
            dirs: BTreeMap::new(),
        }
    }
}

fn default_root() -> PathBuf {
    PathBuf::from("content")
}

fn default_include_globs() -> Vec<String> {
    vec!["*.mdx".to_string(), "*.md".to_string()]
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize, Clone)]
pub struct ReadingConfig {
    #[serde(default = "default_words_per_minute")]
    pub words_per_minute: u32,
}

impl Default for ReadingConfig {
    fn default() -> Self {
        Self {
            words_per_minute: DEFAULT_WORDS_PER_MINUTE,
        }
    }
}

fn default_words_per_minute() -> u32 {
    DEFAULT_WORDS_PER_MINUTE
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct CacheConfig {
    /// Memoize category loads until the directory's signature changes.
    #[serde(default)]
    pub enabled: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AggregateConfig {
    #[serde(default = "default_featured_categories")]
    pub featured_categories: Vec<Category>,
    #[serde(default = "default_count_categories")]
    pub count_categories: Vec<Category>,
    #[serde(default = "default_related_categories")]
    pub related_categories: Vec<Category>,
    #[serde(default = "default_featured_limit")]
    pub featured_limit: usize,
    #[serde(default = "default_related_limit")]
    pub related_limit: usize,
    #[serde(default = "default_related_across_limit")]
    pub related_across_limit: usize,
}

impl Default for AggregateConfig {
    fn default() -> Self {
        Self {
            featured_categories: default_featured_categories(),
            count_categories: default_count_categories(),
            related_categories: default_related_categories(),
            featured_limit: DEFAULT_FEATURED_LIMIT,
            related_limit: DEFAULT_RELATED_LIMIT,
            related_across_limit: DEFAULT_RELATED_ACROSS_LIMIT,
        }
    }
}

fn default_featured_categories() -> Vec<Category> {
    vec![
        Category::Itinerary,
        Category::WhereToStay,
        Category::DayTrip,
        Category::TravelTip,
    ]
}

fn default_count_categories() -> Vec<Category> {
    vec![
        Category::Itinerary,
        Category::WhereToStay,
        Category::DayTrip,
        Category::TravelTip,
        Category::Map,
    ]
}

fn default_related_categories() -> Vec<Category> {
    vec![
        Category::Itinerary,
        Category::TravelTip,
        Category::DayTrip,
        Category::WhereToStay,
    ]
}

fn default_featured_limit() -> usize {
    DEFAULT_FEATURED_LIMIT
}
fn default_related_limit() -> usize {
    DEFAULT_RELATED_LIMIT
}
fn default_related_across_limit() -> usize {
    DEFAULT_RELATED_ACROSS_LIMIT
}

impl Config {
    /// Defaults with the content root replaced.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        let mut config = Self::default();
        config.content.root = root.into();
        config
    }

    /// Directory holding the resources of `category`.
    pub fn category_dir(&self, category: Category) -> PathBuf {
        let dir = self
            .content
            .dirs
            .get(category.as_str())
            .map(String::as_str)
            .unwrap_or_else(|| category.default_dir());
        self.content.root.join(dir)
    }

    /// Check invariants serde cannot express.
    pub fn validate(&self) -> Result<()> {
        if self.content.include_globs.is_empty() {
            bail!("content.include_globs must not be empty");
        }
        for glob in &self.content.include_globs {
            globset::Glob::new(glob)
                .with_context(|| format!("content.include_globs: invalid pattern '{}'", glob))?;
        }
        for (category, dir) in &self.content.dirs {
            category
                .parse::<Category>()
                .with_context(|| format!("content.dirs: unknown key '{}'", category))?;
            if dir.trim().is_empty() {
                bail!("content.dirs.{} must not be empty", category);
            }
        }
        if self.reading.words_per_minute == 0 {
            bail!("reading.words_per_minute must be > 0");
        }
        if self.aggregate.featured_limit == 0 {
            bail!("aggregate.featured_limit must be >= 1");
        }
        if self.aggregate.related_limit == 0 || self.aggregate.related_across_limit == 0 {
            bail!("aggregate related limits must be >= 1");
        }
        if self.aggregate.featured_categories.is_empty() {
            bail!("aggregate.featured_categories must not be empty");
        }
        Ok(())
    }
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let mut config: Config =
        toml::from_str(&content).with_context(|| "Failed to parse config file")?;

    // Relative content roots resolve against the config file's directory.
    if config.content.root.is_relative() {
        if let Some(base) = path.parent() {
            config.content.root = base.join(&config.content.root);
        }
    }

    config.validate()?;
    Ok(config)
}

//! # Naples Content CLI (`content`)
//!
//! Command-line surface over the content repository. The site build runs
//! `content check` to fail fast on invalid front matter; the other commands
//! are for authors inspecting what the site will render.
//!
//! ## Usage
//!
//! ```bash
//! content [--config ./content.toml] [--root ./content] <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `content sources` | Category directories and whether they exist |
//! | `content list <category>` | Valid documents, newest first |
//! | `content get <category> <slug>` | One document with its table of contents |
//! | `content slugs <category>` | Slugs the site must generate pages for |
//! | `content related <category> <slug>` | Related reading by shared tags |
//! | `content featured` | Newest documents across featured categories |
//! | `content latest <category>` | Newest documents of one category |
//! | `content stats` | Per-category counts |
//! | `content check` | Validate everything; exit 1 on rejections |
//!
//! ## Examples
//!
//! ```bash
//! # Lint all content in CI
//! content --root ./content check
//!
//! # Include drafts when previewing a category
//! content --root ./content list day-trip --drafts
//!
//! # Related reading across categories as JSON
//! content --config ./content.toml related itinerary three-days-in-naples --across --json
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use flexi_logger::Logger;
use std::path::PathBuf;

use naples_content::config::{self, Config};
use naples_content::{check, get, listing, sources, stats, Category, ContentRepository};

/// Naples Content CLI: inspect and validate the site's content repository.
///
/// Without `--config` the built-in defaults are used, with the content root
/// taken from `--root` (default `./content`).
#[derive(Parser)]
#[command(
    name = "content",
    about = "Naples Content — inspect and validate the vacation planner's content repository",
    version
)]
struct Cli {
    /// Path to configuration file (TOML).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Content root; overrides `content.root` from the config file.
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    /// Log level spec for stderr output (`warn`, `info`, `debug`, or a
    /// module spec such as `naples_content=debug`). `RUST_LOG` takes
    /// precedence when set.
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// List category directories and their status.
    ///
    /// Read-only: missing directories are reported, not created.
    Sources,

    /// List the valid documents of a category, newest first.
    List {
        /// Category discriminator (`itinerary`, `day-trip`, `hotel`, ...).
        category: Category,

        /// Include documents with status `draft`.
        #[arg(long)]
        drafts: bool,

        /// Print documents as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show one document by slug.
    ///
    /// Exits with status 1 when no document in the category has the slug.
    Get {
        category: Category,
        slug: String,

        #[arg(long)]
        drafts: bool,

        #[arg(long)]
        json: bool,
    },

    /// Print every slug of a category in load order.
    Slugs {
        category: Category,

        #[arg(long)]
        drafts: bool,
    },

    /// Show documents related to one document by shared tags.
    Related {
        category: Category,
        slug: String,

        /// Maximum results (defaults to `aggregate.related_limit`, or
        /// `aggregate.related_across_limit` with `--across`).
        #[arg(long)]
        limit: Option<usize>,

        /// Pool the configured related categories instead of the document's
        /// own category; tags compare case-insensitively.
        #[arg(long)]
        across: bool,

        #[arg(long)]
        json: bool,
    },

    /// Newest published documents across the featured categories.
    Featured {
        /// Maximum results (defaults to `aggregate.featured_limit`).
        #[arg(long)]
        limit: Option<usize>,

        #[arg(long)]
        json: bool,
    },

    /// Newest published documents of one category.
    Latest {
        category: Category,

        #[arg(long)]
        limit: Option<usize>,

        #[arg(long)]
        json: bool,
    },

    /// Per-category document counts.
    Stats,

    /// Validate every resource of every category.
    ///
    /// Prints each rejected resource with its violations and exits with
    /// status 1 when any were rejected.
    Check,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let _logger = Logger::try_with_env_or_str(&cli.log_level)
        .with_context(|| format!("invalid log level '{}'", cli.log_level))?
        .start()
        .context("failed to start logger")?;

    let cfg = resolve_config(&cli)?;
    log::debug!(
        "event=cli_start command={} root={}",
        command_name(&cli.command),
        cfg.content.root.display()
    );

    let repo = || ContentRepository::new(cfg.clone());

    match cli.command {
        Commands::Sources => sources::list_sources(&cfg)?,
        Commands::Check => check::run_check(&cfg)?,
        Commands::List {
            category,
            drafts,
            json,
        } => listing::run_list(&repo()?, category, drafts, json)?,
        Commands::Get {
            category,
            slug,
            drafts,
            json,
        } => get::run_get(&repo()?, category, &slug, drafts, json)?,
        Commands::Slugs { category, drafts } => listing::run_slugs(&repo()?, category, drafts)?,
        Commands::Related {
            category,
            slug,
            limit,
            across,
            json,
        } => listing::run_related(&repo()?, category, &slug, limit, across, json)?,
        Commands::Featured { limit, json } => listing::run_featured(&repo()?, limit, json)?,
        Commands::Latest {
            category,
            limit,
            json,
        } => listing::run_latest(&repo()?, category, limit, json)?,
        Commands::Stats => stats::run_stats(&repo()?)?,
    }

    Ok(())
}

/// Config file when given (else defaults), then the `--root` override.
fn resolve_config(cli: &Cli) -> Result<Config> {
    let mut cfg = match &cli.config {
        Some(path) => config::load_config(path)?,
        None => Config::default(),
    };
    if let Some(root) = &cli.root {
        cfg.content.root = root.clone();
    }
    cfg.validate()?;
    Ok(cfg)
}

fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::Sources => "sources",
        Commands::List { .. } => "list",
        Commands::Get { .. } => "get",
        Commands::Slugs { .. } => "slugs",
        Commands::Related { .. } => "related",
        Commands::Featured { .. } => "featured",
        Commands::Latest { .. } => "latest",
        Commands::Stats => "stats",
        Commands::Check => "check",
    }
}

use std::fs;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

use naples_content::config::Config;
use naples_content::diagnostics::{Diagnostic, MemorySink};
use naples_content::{Category, ContentRepository, Document};

const DESCRIPTION: &str =
    "Everything you need to know before you go, from parking to the best time of day to visit.";

fn category_fields(category: Category) -> &'static str {
    match category {
        Category::Itinerary => "days: 3\npace: balanced\naudience: families\n",
        Category::WhereToStay => "areaName: Old Naples\n",
        Category::DayTrip => "driveTimeFromNaples: 45 minutes\nbestSeason: Winter\n",
        Category::Hotel => {
            "hotelName: Test Hotel\ncategory: boutique\narea: Vanderbilt Beach\npriceLevel: $$$\n"
        }
        _ => "",
    }
}

fn front_matter(
    category: Category,
    slug: &str,
    status: &str,
    published_at: &str,
    tags: &[&str],
) -> String {
    format!(
        "---\ntitle: A guide titled {slug}\ndescription: {DESCRIPTION}\nslug: {slug}\nstatus: {status}\n\
         publishedAt: \"{published_at}\"\nupdatedAt: \"{published_at}\"\ntags: [{tags}]\n\
         featuredImage: /images/{slug}.jpg\n{fields}---\n\n## Overview\n\nSome words about {slug}.\n",
        tags = tags.join(", "),
        fields = category_fields(category),
    )
}

fn write(root: &Path, category: Category, file: &str, raw: &str) {
    let dir = root.join(category.default_dir());
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join(file), raw).unwrap();
}

fn write_doc(
    root: &Path,
    category: Category,
    slug: &str,
    status: &str,
    published_at: &str,
    tags: &[&str],
) {
    let raw = front_matter(category, slug, status, published_at, tags);
    write(root, category, &format!("{}.mdx", slug), &raw);
}

fn repo_with_sink(root: &Path, cache: bool) -> (ContentRepository, Arc<MemorySink>) {
    let mut config = Config::with_root(root);
    config.cache.enabled = cache;
    let sink = Arc::new(MemorySink::new());
    let repo = ContentRepository::with_sink(config, sink.clone()).unwrap();
    (repo, sink)
}

fn slugs(docs: &[Document]) -> Vec<&str> {
    docs.iter().map(|d| d.slug()).collect()
}

#[test]
fn test_day_trip_end_to_end() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    write_doc(root, Category::DayTrip, "marco-island", "published", "2024-03-01", &["beach", "family"]);
    write_doc(root, Category::DayTrip, "everglades-airboat", "draft", "2024-04-01", &["nature"]);
    let missing_description = front_matter(Category::DayTrip, "sanibel-island", "published", "2024-05-01", &[])
        .replace(&format!("description: {}\n", DESCRIPTION), "");
    write(root, Category::DayTrip, "sanibel-island.mdx", &missing_description);

    let (repo, sink) = repo_with_sink(root, false);

    let published = repo.load_category(Category::DayTrip, false);
    assert_eq!(slugs(&published), vec!["marco-island"]);
    assert_eq!(published[0].tags(), ["beach".to_string(), "family".to_string()]);

    let all = repo.load_category(Category::DayTrip, true);
    assert_eq!(slugs(&all), vec!["everglades-airboat", "marco-island"]);

    assert!(repo.get_by_slug(Category::DayTrip, "sanibel-island", true).is_none());
    assert!(!repo.list_slugs(Category::DayTrip, true).contains(&"sanibel-island".to_string()));

    let rejections = sink.rejections();
    assert!(!rejections.is_empty());
    assert!(rejections.iter().all(|event| match event {
        Diagnostic::ValidationFailed { resource, violations, .. } => {
            resource.ends_with("sanibel-island.mdx")
                && violations.iter().any(|v| v.field == "description")
        }
        _ => false,
    }));
}

#[test]
fn test_isolation_keeps_valid_documents_in_order() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    for (i, day) in ["01", "02", "03", "04", "05"].iter().enumerate() {
        write_doc(root, Category::TravelTip, &format!("tip-{}", i), "published", &format!("2024-01-{}", day), &[]);
    }
    let (repo, _) = repo_with_sink(root, false);
    let clean = repo.load_category(Category::TravelTip, false);

    write(root, Category::TravelTip, "aa-broken.mdx", "---\ntitle: [unterminated\n---\n");
    write(root, Category::TravelTip, "bb-short.mdx", &front_matter(Category::TravelTip, "x", "published", "2030-01-01", &[]));
    write(root, Category::TravelTip, "cc-status.mdx", &front_matter(Category::TravelTip, "bad-status", "archived", "2030-01-01", &[]));

    let (repo, sink) = repo_with_sink(root, false);
    let loaded = repo.load_category(Category::TravelTip, false);
    assert_eq!(loaded, clean);
    assert_eq!(loaded.len(), 5);
    assert_eq!(sink.rejections().len(), 3);
}

#[test]
fn test_sort_order_is_newest_first() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    write_doc(root, Category::Itinerary, "middle-trip", "published", "2024-02-10", &[]);
    write_doc(root, Category::Itinerary, "oldest-trip", "published", "2023-11-30", &[]);
    write_doc(root, Category::Itinerary, "newest-trip", "published", "2024-07-04", &[]);

    let (repo, _) = repo_with_sink(root, false);
    let docs = repo.load_category(Category::Itinerary, false);
    assert_eq!(slugs(&docs), vec!["newest-trip", "middle-trip", "oldest-trip"]);
    assert!(docs.windows(2).all(|w| w[0].published_at() >= w[1].published_at()));
}

#[test]
fn test_slug_round_trip() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    write_doc(root, Category::WhereToStay, "old-naples", "published", "2024-01-01", &[]);
    write_doc(root, Category::WhereToStay, "park-shore", "published", "2024-02-01", &[]);
    write_doc(root, Category::WhereToStay, "pelican-bay", "draft", "2024-03-01", &[]);

    let (repo, _) = repo_with_sink(root, false);
    for include_drafts in [false, true] {
        let listed = repo.list_slugs(Category::WhereToStay, include_drafts);
        assert_eq!(listed.len(), if include_drafts { 3 } else { 2 });
        for slug in &listed {
            let doc = repo.get_by_slug(Category::WhereToStay, slug, include_drafts);
            assert_eq!(doc.map(|d| d.slug().to_string()), Some(slug.clone()));
        }
    }
    assert!(repo.get_by_slug(Category::WhereToStay, "pelican-bay", false).is_none());
    assert!(repo.get_by_slug(Category::WhereToStay, "no-such-area", true).is_none());
}

#[test]
fn test_related_ranks_by_shared_tags() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    write_doc(root, Category::TravelTip, "reference", "published", "2024-01-01", &["a", "b", "c"]);
    write_doc(root, Category::TravelTip, "shares-one", "published", "2024-01-02", &["a"]);
    write_doc(root, Category::TravelTip, "shares-two", "published", "2024-01-03", &["a", "b"]);
    write_doc(root, Category::TravelTip, "shares-none", "published", "2024-01-04", &["d"]);

    let (repo, _) = repo_with_sink(root, false);
    let reference = repo.get_by_slug(Category::TravelTip, "reference", false).unwrap();
    let pool = repo.load_category(Category::TravelTip, false);
    let related = repo.get_related(&reference, &pool, 3);
    assert_eq!(slugs(&related), vec!["shares-two", "shares-one"]);

    assert_eq!(repo.get_related(&reference, &pool, 1).len(), 1);
}

#[test]
fn test_related_across_categories_ignores_case() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    write_doc(root, Category::Itinerary, "family-weekend", "published", "2024-01-01", &["Beach", "Family"]);
    write_doc(root, Category::DayTrip, "marco-island", "published", "2024-02-01", &["beach"]);
    write_doc(root, Category::TravelTip, "parking-tips", "published", "2024-03-01", &["BEACH", "family"]);
    write_doc(root, Category::TravelTip, "draft-tip", "draft", "2024-04-01", &["beach"]);
    write_doc(root, Category::Hotel, "beach-hotel", "published", "2024-05-01", &["beach"]);

    let (repo, _) = repo_with_sink(root, false);
    let categories = repo.config().aggregate.related_categories.clone();
    let tags = vec!["beach".to_string(), "family".to_string()];

    let related = repo.get_related_across("family-weekend", &tags, &categories, 6);
    assert_eq!(slugs(&related), vec!["parking-tips", "marco-island"]);

    assert!(repo.get_related_across("family-weekend", &[], &categories, 6).is_empty());

    let with_hotels = repo.get_related_across("family-weekend", &tags, &[Category::Hotel], 6);
    assert_eq!(slugs(&with_hotels), vec!["beach-hotel"]);
}

#[test]
fn test_counts_match_category_loads() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    write_doc(root, Category::Itinerary, "three-days", "published", "2024-01-01", &[]);
    write_doc(root, Category::Itinerary, "five-days", "published", "2024-01-02", &[]);
    write_doc(root, Category::Itinerary, "draft-days", "draft", "2024-01-03", &[]);
    write_doc(root, Category::TravelTip, "one-tip", "published", "2024-01-01", &[]);

    let (repo, _) = repo_with_sink(root, false);
    let counts = repo.get_counts();
    let expected: Vec<Category> = repo.config().aggregate.count_categories.clone();
    assert_eq!(counts.keys().copied().collect::<Vec<_>>(), {
        let mut sorted = expected.clone();
        sorted.sort();
        sorted
    });
    for category in expected {
        assert_eq!(counts[&category], repo.load_category(category, false).len());
    }
    assert_eq!(counts[&Category::Itinerary], 2);
    assert_eq!(counts[&Category::Map], 0);
}

#[test]
fn test_featured_merges_newest_across_categories() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    write_doc(root, Category::Itinerary, "itin-old", "published", "2023-01-01", &[]);
    write_doc(root, Category::Itinerary, "itin-new", "published", "2024-06-01", &[]);
    write_doc(root, Category::DayTrip, "trip-mid", "published", "2024-03-01", &[]);
    write_doc(root, Category::TravelTip, "tip-draft", "draft", "2025-01-01", &[]);
    write_doc(root, Category::Hotel, "hotel-newest", "published", "2025-02-01", &[]);

    let (repo, _) = repo_with_sink(root, false);
    assert_eq!(slugs(&repo.get_featured(6)), vec!["itin-new", "trip-mid", "itin-old"]);
    assert_eq!(slugs(&repo.get_featured(2)), vec!["itin-new", "trip-mid"]);

    assert_eq!(slugs(&repo.get_latest_in(Category::Itinerary, 1)), vec!["itin-new"]);
    assert_eq!(slugs(&repo.get_latest_in(Category::Hotel, 5)), vec!["hotel-newest"]);
}

#[test]
fn test_load_all_follows_category_order() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    write_doc(root, Category::Hotel, "beach-hotel", "published", "2025-01-01", &[]);
    write_doc(root, Category::Itinerary, "three-days", "published", "2023-01-01", &[]);
    write_doc(root, Category::Map, "beach-map", "draft", "2024-01-01", &[]);

    let (repo, _) = repo_with_sink(root, false);
    assert_eq!(slugs(&repo.load_all(false)), vec!["three-days", "beach-hotel"]);
    assert_eq!(slugs(&repo.load_all(true)), vec!["three-days", "beach-map", "beach-hotel"]);
}

#[test]
fn test_toml_front_matter_is_accepted() {
    let tmp = TempDir::new().unwrap();
    let raw = format!(
        "+++\ntitle = \"Naples pier at sunset\"\ndescription = \"{DESCRIPTION}\"\nslug = \"pier-sunset\"\n\
         status = \"published\"\npublishedAt = \"2024-02-02\"\nupdatedAt = \"2024-02-03\"\n\
         tags = [\"sunset\"]\nfeaturedImage = \"/images/pier.jpg\"\n+++\nBody.\n"
    );
    write(tmp.path(), Category::TravelTip, "pier.md", &raw);

    let (repo, sink) = repo_with_sink(tmp.path(), false);
    let doc = repo.get_by_slug(Category::TravelTip, "pier-sunset", false).unwrap();
    assert_eq!(doc.metadata.common.author, "Naples Vacation Planner");
    assert!(sink.rejections().is_empty());
}

#[test]
fn test_missing_directory_is_empty_and_provisioned() {
    let tmp = TempDir::new().unwrap();
    let (repo, sink) = repo_with_sink(tmp.path(), false);
    assert!(repo.load_category(Category::Event, true).is_empty());
    assert!(tmp.path().join("events").is_dir());
    assert!(matches!(
        sink.events().as_slice(),
        [Diagnostic::StorageProvisioned { error: None, .. }]
    ));
}

#[test]
fn test_duplicate_slug_first_file_wins() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    let first = front_matter(Category::TravelTip, "same-slug", "published", "2024-01-01", &["first"]);
    let second = front_matter(Category::TravelTip, "same-slug", "published", "2024-01-01", &["second"]);
    write(root, Category::TravelTip, "a-first.mdx", &first);
    write(root, Category::TravelTip, "b-second.mdx", &second);

    let (repo, sink) = repo_with_sink(root, false);
    let doc = repo.get_by_slug(Category::TravelTip, "same-slug", false).unwrap();
    assert_eq!(doc.tags(), ["first".to_string()]);
    assert!(sink
        .events()
        .iter()
        .any(|e| matches!(e, Diagnostic::DuplicateSlug { slug, .. } if slug == "same-slug")));
}

#[test]
fn test_duplicate_slug_report_names_the_document_lookups_return() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    let older = front_matter(Category::TravelTip, "same-slug", "published", "2024-01-01", &["older"]);
    let newer = front_matter(Category::TravelTip, "same-slug", "published", "2024-06-01", &["newer"]);
    write(root, Category::TravelTip, "a-older.mdx", &older);
    write(root, Category::TravelTip, "b-newer.mdx", &newer);

    let (repo, sink) = repo_with_sink(root, false);
    let doc = repo.get_by_slug(Category::TravelTip, "same-slug", false).unwrap();
    assert_eq!(doc.tags(), ["newer".to_string()]);

    let reported: Vec<_> = sink
        .events()
        .into_iter()
        .filter_map(|e| match e {
            Diagnostic::DuplicateSlug { first, duplicate, .. } => Some((first, duplicate)),
            _ => None,
        })
        .collect();
    assert_eq!(reported.len(), 1);
    let (first, duplicate) = &reported[0];
    assert_eq!(first.to_string_lossy(), doc.source);
    assert!(duplicate.ends_with("a-older.mdx"));
}

#[cfg(unix)]
#[test]
fn test_dangling_symlink_does_not_hide_siblings() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    write_doc(root, Category::Map, "beach-access-map", "published", "2024-10-01", &[]);
    let dir = root.join(Category::Map.default_dir());
    std::os::unix::fs::symlink(dir.join("moved-away.mdx"), dir.join("zz-parking-map.mdx")).unwrap();

    let (repo, sink) = repo_with_sink(root, true);
    assert_eq!(slugs(&repo.load_category(Category::Map, false)), vec!["beach-access-map"]);
    assert!(repo.get_by_slug(Category::Map, "beach-access-map", false).is_some());

    let rejections = sink.rejections();
    assert_eq!(rejections.len(), 1);
    assert_eq!(rejections[0].event(), "resource_unreadable");
    assert!(sink.events().iter().all(|e| e.event() != "scan_failed"));
}

#[test]
fn test_uncached_loads_reflect_every_edit() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    write_doc(root, Category::Map, "beach-map", "published", "2024-01-01", &[]);
    let (repo, _) = repo_with_sink(root, false);
    assert_eq!(repo.load_category(Category::Map, false).len(), 1);

    write_doc(root, Category::Map, "downtown-map", "published", "2024-02-01", &[]);
    assert_eq!(repo.load_category(Category::Map, false).len(), 2);
}

#[test]
fn test_cache_serves_unchanged_directories() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    write_doc(root, Category::Map, "beach-map", "published", "2024-01-01", &[]);
    write(root, Category::Map, "broken.mdx", "---\nslug: [\n---\n");

    let (repo, sink) = repo_with_sink(root, true);
    assert_eq!(repo.load_category(Category::Map, false).len(), 1);
    assert_eq!(repo.load_category(Category::Map, true).len(), 1);
    // The second load was a cache hit: the broken file was parsed once.
    assert_eq!(sink.rejections().len(), 1);

    write_doc(root, Category::Map, "downtown-map", "published", "2024-02-01", &[]);
    assert_eq!(slugs(&repo.load_category(Category::Map, false)), vec!["downtown-map", "beach-map"]);
    assert_eq!(sink.rejections().len(), 2);

    repo.invalidate();
    assert_eq!(repo.load_category(Category::Map, false).len(), 2);
    assert_eq!(sink.rejections().len(), 3);
}

#[test]
fn test_invalid_config_is_rejected_up_front() {
    let mut config = Config::with_root("/tmp/unused");
    config.reading.words_per_minute = 0;
    assert!(ContentRepository::new(config).is_err());
}

#[test]
fn test_repository_is_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ContentRepository>();

    let tmp = TempDir::new().unwrap();
    write_doc(tmp.path(), Category::TravelTip, "shared-tip", "published", "2024-01-01", &[]);
    let (repo, _) = repo_with_sink(tmp.path(), true);
    let repo = Arc::new(repo);

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let repo = Arc::clone(&repo);
            std::thread::spawn(move || repo.list_slugs(Category::TravelTip, false))
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), vec!["shared-tip".to_string()]);
    }
}

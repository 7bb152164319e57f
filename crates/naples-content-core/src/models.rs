//! Core data models for Naples Content.
//!
//! A [`Document`] carries a validated [`Metadata`] record, the opaque body
//! text, and fields derived at load time. Metadata is split into the
//! [`CommonMetadata`] every category shares and a [`CategoryMetadata`] sum
//! type with one variant struct per [`Category`]. The document's category is
//! read from that variant, so a loaded document can never disagree with the
//! schema it was validated against.
//!
//! Field names serialize in camelCase, matching the keys used in content
//! front matter.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::reading::ReadingTime;
use crate::toc::{extract_toc, TocItem};

/// A closed set of string values accepted by a schema field.
///
/// `Default` yields the first listed value. The schema reader only uses it as
/// a placeholder for a field that failed validation; such records are always
/// rejected, so the placeholder never reaches a caller.
pub trait Choice: Sized + Copy + Default + 'static {
    /// Every accepted value, in declaration order.
    const ALL: &'static [Self];

    /// The on-disk spelling of this value.
    fn as_str(&self) -> &'static str;

    fn parse(value: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.as_str() == value)
    }

    /// Comma-separated list of accepted values, for violation messages.
    fn allowed() -> String {
        Self::ALL
            .iter()
            .map(|c| c.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

macro_rules! choice_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $first:ident => $first_str:literal $(, $variant:ident => $s:literal)* $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
        pub enum $name {
            #[default]
            $first,
            $($variant,)*
        }

        impl Choice for $name {
            const ALL: &'static [Self] = &[Self::$first, $(Self::$variant,)*];

            fn as_str(&self) -> &'static str {
                match self {
                    Self::$first => $first_str,
                    $(Self::$variant => $s,)*
                }
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.pad(self.as_str())
            }
        }
    };
}

// ═══════════════════════════════════════════════════════════════════════
// Category
// ═══════════════════════════════════════════════════════════════════════

/// The closed set of content kinds the repository serves.
///
/// Declaration order is the canonical order used by counts and listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Itinerary,
    WhereToStay,
    DayTrip,
    TravelTip,
    Map,
    Hotel,
    Restaurant,
    Event,
}

#[derive(Debug, Error)]
#[error("unknown category '{0}'; expected one of: itinerary, where-to-stay, day-trip, travel-tip, map, hotel, restaurant, event")]
pub struct UnknownCategory(pub String);

impl Category {
    pub const ALL: [Category; 8] = [
        Category::Itinerary,
        Category::WhereToStay,
        Category::DayTrip,
        Category::TravelTip,
        Category::Map,
        Category::Hotel,
        Category::Restaurant,
        Category::Event,
    ];

    /// Discriminator spelling, as written in front matter `type` keys.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Itinerary => "itinerary",
            Category::WhereToStay => "where-to-stay",
            Category::DayTrip => "day-trip",
            Category::TravelTip => "travel-tip",
            Category::Map => "map",
            Category::Hotel => "hotel",
            Category::Restaurant => "restaurant",
            Category::Event => "event",
        }
    }

    /// Directory name under the content root when config does not override it.
    pub fn default_dir(&self) -> &'static str {
        match self {
            Category::Itinerary => "itineraries",
            Category::WhereToStay => "where-to-stay",
            Category::DayTrip => "day-trips",
            Category::TravelTip => "travel-tips",
            Category::Map => "maps",
            Category::Hotel => "hotels",
            Category::Restaurant => "restaurants",
            Category::Event => "events",
        }
    }
}

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Enumerated field values
// ═══════════════════════════════════════════════════════════════════════

choice_enum! {
    /// Publication status. Only `Published` documents appear in default queries.
    Status { Draft => "draft", Published => "published" }
}

choice_enum! {
    Pace { Relaxed => "relaxed", Balanced => "balanced", Fast => "fast" }
}

choice_enum! {
    Audience {
        Couples => "couples",
        Families => "families",
        Luxury => "luxury",
        Nature => "nature",
        All => "all",
    }
}

choice_enum! {
    PriceRange {
        Budget => "budget",
        MidRange => "mid-range",
        Luxury => "luxury",
        UltraLuxury => "ultra-luxury",
    }
}

choice_enum! {
    Difficulty { Easy => "easy", Moderate => "moderate", Challenging => "challenging" }
}

choice_enum! {
    TipCategory {
        Planning => "planning",
        Logistics => "logistics",
        Seasonal => "seasonal",
        Budget => "budget",
        Activities => "activities",
        Dining => "dining",
    }
}

choice_enum! {
    MapType {
        Interactive => "interactive",
        Printable => "printable",
        GoogleMyMaps => "google-my-maps",
    }
}

choice_enum! {
    HotelCategory {
        LuxuryResort => "luxury-resort",
        Boutique => "boutique",
        MidRange => "mid-range",
        Budget => "budget",
        ExtendedStay => "extended-stay",
        VacationRental => "vacation-rental",
        GolfResort => "golf-resort",
        FamilyResort => "family-resort",
        Waterfront => "waterfront",
    }
}

choice_enum! {
    /// Hotel price tier, one to five dollar signs.
    HotelPriceLevel {
        One => "$",
        Two => "$$",
        Three => "$$$",
        Four => "$$$$",
        Five => "$$$$$",
    }
}

choice_enum! {
    /// Restaurant price tier, one to four dollar signs.
    RestaurantPriceLevel {
        One => "$",
        Two => "$$",
        Three => "$$$",
        Four => "$$$$",
    }
}

choice_enum! {
    Cuisine {
        Seafood => "seafood",
        Italian => "italian",
        American => "american",
        Steakhouse => "steakhouse",
        Asian => "asian",
        Mexican => "mexican",
        French => "french",
        Mediterranean => "mediterranean",
        BreakfastBrunch => "breakfast-brunch",
        Casual => "casual",
        FineDining => "fine-dining",
    }
}

choice_enum! {
    EventCategory {
        ArtShow => "art-show",
        Festival => "festival",
        FarmersMarket => "farmers-market",
        Music => "music",
        FoodDrink => "food-drink",
        Sports => "sports",
        Holiday => "holiday",
        Film => "film",
        Community => "community",
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Metadata
// ═══════════════════════════════════════════════════════════════════════

/// Fields shared by every category.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommonMetadata {
    pub title: String,
    pub description: String,
    pub slug: String,
    pub status: Status,
    /// ISO-8601 string as written in the source; compared lexically.
    pub published_at: String,
    pub updated_at: String,
    pub author: String,
    pub tags: Vec<String>,
    pub featured_image: String,
    pub featured_image_alt: Option<String>,
    pub video_url: Option<String>,
    pub canonical_url: Option<String>,
}

/// A pinned stop on an itinerary map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Location {
    pub title: String,
    pub description: Option<String>,
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItineraryMetadata {
    /// Trip length, 1 to 14 days.
    pub days: u8,
    pub pace: Pace,
    pub audience: Audience,
    pub book_ahead: Vec<String>,
    pub map_embed_url: Option<String>,
    pub locations: Option<Vec<Location>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WhereToStayMetadata {
    pub area_name: String,
    pub best_for: Vec<String>,
    pub avoid_if: Vec<String>,
    pub nearby_highlights: Vec<String>,
    pub price_range: Option<PriceRange>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayTripMetadata {
    pub drive_time_from_naples: String,
    pub best_season: String,
    pub must_book: Vec<String>,
    pub difficulty: Option<Difficulty>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TravelTipMetadata {
    pub category: Option<TipCategory>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapMetadata {
    pub download_url: Option<String>,
    pub map_embed_url: Option<String>,
    pub map_type: Option<MapType>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HotelMetadata {
    pub hotel_name: String,
    pub category: HotelCategory,
    pub area: String,
    pub amenities: Vec<String>,
    pub price_level: HotelPriceLevel,
    pub booking_url: Option<String>,
    pub pet_friendly: Option<bool>,
    pub beach_access: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantMetadata {
    pub restaurant_name: String,
    pub cuisine: Cuisine,
    pub price_level: RestaurantPriceLevel,
    pub neighborhood: String,
    pub address: String,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub reservation_url: Option<String>,
    pub hours: Option<String>,
    pub best_for: Vec<String>,
    pub signature_dishes: Vec<String>,
    pub awards: Vec<String>,
    pub waterfront: Option<bool>,
    pub outdoor_seating: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventMetadata {
    pub event_name: String,
    pub category: EventCategory,
    pub start_date: String,
    pub end_date: Option<String>,
    pub is_recurring: Option<bool>,
    pub recurring_schedule: Option<String>,
    pub venue: String,
    pub address: String,
    pub neighborhood: Option<String>,
    pub price: Option<String>,
    pub website: Option<String>,
    pub ticket_url: Option<String>,
    pub is_free: Option<bool>,
}

/// Category-specific metadata, discriminated by `type` when serialized.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum CategoryMetadata {
    Itinerary(ItineraryMetadata),
    WhereToStay(WhereToStayMetadata),
    DayTrip(DayTripMetadata),
    TravelTip(TravelTipMetadata),
    Map(MapMetadata),
    Hotel(HotelMetadata),
    Restaurant(RestaurantMetadata),
    Event(EventMetadata),
}

impl CategoryMetadata {
    pub fn category(&self) -> Category {
        match self {
            CategoryMetadata::Itinerary(_) => Category::Itinerary,
            CategoryMetadata::WhereToStay(_) => Category::WhereToStay,
            CategoryMetadata::DayTrip(_) => Category::DayTrip,
            CategoryMetadata::TravelTip(_) => Category::TravelTip,
            CategoryMetadata::Map(_) => Category::Map,
            CategoryMetadata::Hotel(_) => Category::Hotel,
            CategoryMetadata::Restaurant(_) => Category::Restaurant,
            CategoryMetadata::Event(_) => Category::Event,
        }
    }
}

/// A fully validated front matter record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metadata {
    #[serde(flatten)]
    pub common: CommonMetadata,
    #[serde(flatten)]
    pub details: CategoryMetadata,
}

impl Metadata {
    /// Calendar date of `published_at`, when it starts with `YYYY-MM-DD`.
    pub fn published_date(&self) -> Option<NaiveDate> {
        parse_leading_date(&self.common.published_at)
    }

    pub fn updated_date(&self) -> Option<NaiveDate> {
        parse_leading_date(&self.common.updated_at)
    }
}

fn parse_leading_date(value: &str) -> Option<NaiveDate> {
    let head = value.get(..10)?;
    NaiveDate::parse_from_str(head, "%Y-%m-%d").ok()
}

// ═══════════════════════════════════════════════════════════════════════
// Document
// ═══════════════════════════════════════════════════════════════════════

/// A validated content document as served to the page layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub metadata: Metadata,
    /// Raw markup after the front matter block; never parsed further.
    pub body: String,
    pub reading_time: ReadingTime,
    /// Where the document was loaded from (a path for filesystem storage).
    pub source: String,
}

impl Document {
    pub fn new(metadata: Metadata, body: String, reading_time: ReadingTime, source: String) -> Self {
        Self {
            metadata,
            body,
            reading_time,
            source,
        }
    }

    pub fn category(&self) -> Category {
        self.metadata.details.category()
    }

    pub fn slug(&self) -> &str {
        &self.metadata.common.slug
    }

    pub fn title(&self) -> &str {
        &self.metadata.common.title
    }

    pub fn tags(&self) -> &[String] {
        &self.metadata.common.tags
    }

    pub fn status(&self) -> Status {
        self.metadata.common.status
    }

    pub fn is_published(&self) -> bool {
        self.status() == Status::Published
    }

    pub fn published_at(&self) -> &str {
        &self.metadata.common.published_at
    }

    /// Headings of the body up to `max_level` (2 = `##`).
    pub fn toc(&self, max_level: usize) -> Vec<TocItem> {
        extract_toc(&self.body, max_level)
    }
}

/// Minimal published travel-tip document for unit tests.
#[cfg(test)]
pub(crate) fn sample_document(slug: &str, tags: &[&str], published_at: &str) -> Document {
    let common = CommonMetadata {
        title: format!("Sample document {}", slug),
        description: "d".repeat(60),
        slug: slug.to_string(),
        status: Status::Published,
        published_at: published_at.to_string(),
        updated_at: published_at.to_string(),
        author: "Test Author".to_string(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        featured_image: "/img.jpg".to_string(),
        featured_image_alt: None,
        video_url: None,
        canonical_url: None,
    };
    Document::new(
        Metadata {
            common,
            details: CategoryMetadata::TravelTip(TravelTipMetadata { category: None }),
        },
        String::new(),
        crate::reading::reading_time("", 200),
        format!("{}.mdx", slug),
    )
}

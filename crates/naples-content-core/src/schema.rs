//! Schema registry: per-category front matter contracts.
//!
//! [`validate`] turns an untyped [`RawRecord`] plus an asserted [`Category`]
//! into a typed [`Metadata`], or a [`ValidationError`] listing every
//! violated constraint. Validation is fail-closed:
//!
//! - a value of the wrong JSON type is a violation (no coercion; `null` is
//!   not "absent");
//! - defaults exist only where declared (`tags` and the other string lists
//!   default to empty, `author` defaults to [`DEFAULT_AUTHOR`]);
//! - keys the schema does not name are ignored.
//!
//! # Common rules
//!
//! | Field | Rule |
//! |-------|------|
//! | `title` | string, ≥ 10 chars |
//! | `description` | string, 50–180 chars |
//! | `slug` | string, ≥ 3 chars |
//! | `status` | `draft` \| `published` |
//! | `publishedAt`, `updatedAt` | required string |
//! | `author` | string, ≥ 2 chars, default [`DEFAULT_AUTHOR`] |
//! | `tags` | string list, default empty |
//! | `featuredImage` | non-empty string |
//! | `featuredImageAlt` | optional string |
//! | `videoUrl`, `canonicalUrl` | optional absolute URL |
//!
//! Category rules layer on top; see the `read_*` functions below.

use serde_json::{Map, Value};
use std::fmt;
use std::ops::RangeInclusive;
use thiserror::Error;
use url::Url;

use crate::models::*;

/// Untyped key/value record parsed from front matter.
pub type RawRecord = Map<String, Value>;

pub const TITLE_MIN_CHARS: usize = 10;
pub const DESCRIPTION_CHARS: RangeInclusive<usize> = 50..=180;
pub const SLUG_MIN_CHARS: usize = 3;
pub const AUTHOR_MIN_CHARS: usize = 2;
pub const ITINERARY_DAYS: RangeInclusive<i64> = 1..=14;
pub const DEFAULT_AUTHOR: &str = "Naples Vacation Planner";

/// One violated constraint, addressed by field path (`locations[1].lat`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub field: String,
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Every constraint a record violated, in field-read order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{} constraint violation(s): {}", .violations.len(), join_violations(.violations))]
pub struct ValidationError {
    pub category: Category,
    pub violations: Vec<Violation>,
}

impl ValidationError {
    /// True when `field` has at least one violation.
    pub fn has_field(&self, field: &str) -> bool {
        self.violations.iter().any(|v| v.field == field)
    }
}

fn join_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Validate `record` against the schema of `category`.
///
/// A `type` key, when present, must name `category`; the loader writes the
/// asserted category there before calling this, so a file cannot claim a
/// different category than the directory it was loaded from.
pub fn validate(category: Category, record: &RawRecord) -> Result<Metadata, ValidationError> {
    let mut r = FieldReader::new(record);

    if let Some(declared) = r.value("type") {
        if declared.as_str() != Some(category.as_str()) {
            r.violate("type", format!("must be '{}'", category.as_str()));
        }
    }

    let common = read_common(&mut r);
    let details = match category {
        Category::Itinerary => CategoryMetadata::Itinerary(read_itinerary(&mut r)),
        Category::WhereToStay => CategoryMetadata::WhereToStay(read_where_to_stay(&mut r)),
        Category::DayTrip => CategoryMetadata::DayTrip(read_day_trip(&mut r)),
        Category::TravelTip => CategoryMetadata::TravelTip(read_travel_tip(&mut r)),
        Category::Map => CategoryMetadata::Map(read_map(&mut r)),
        Category::Hotel => CategoryMetadata::Hotel(read_hotel(&mut r)),
        Category::Restaurant => CategoryMetadata::Restaurant(read_restaurant(&mut r)),
        Category::Event => CategoryMetadata::Event(read_event(&mut r)),
    };

    r.finish(category)?;
    Ok(Metadata { common, details })
}

fn read_common(r: &mut FieldReader<'_>) -> CommonMetadata {
    CommonMetadata {
        title: r.required_str("title", TITLE_MIN_CHARS),
        description: r.bounded_str("description", DESCRIPTION_CHARS),
        slug: r.required_str("slug", SLUG_MIN_CHARS),
        status: r.required_choice("status"),
        published_at: r.required_str("publishedAt", 0),
        updated_at: r.required_str("updatedAt", 0),
        author: r.str_or("author", AUTHOR_MIN_CHARS, DEFAULT_AUTHOR),
        tags: r.string_list("tags"),
        featured_image: r.required_str("featuredImage", 1),
        featured_image_alt: r.optional_str("featuredImageAlt", 0),
        video_url: r.optional_url("videoUrl"),
        canonical_url: r.optional_url("canonicalUrl"),
    }
}

fn read_itinerary(r: &mut FieldReader<'_>) -> ItineraryMetadata {
    ItineraryMetadata {
        days: r.int_in_range("days", ITINERARY_DAYS) as u8,
        pace: r.required_choice("pace"),
        audience: r.required_choice("audience"),
        book_ahead: r.string_list("bookAhead"),
        map_embed_url: r.optional_url("mapEmbedUrl"),
        locations: r.optional_list("locations", |loc| Location {
            title: loc.required_str("title", 0),
            description: loc.optional_str("description", 0),
            lat: loc.required_f64("lat"),
            lng: loc.required_f64("lng"),
        }),
    }
}

fn read_where_to_stay(r: &mut FieldReader<'_>) -> WhereToStayMetadata {
    WhereToStayMetadata {
        area_name: r.required_str("areaName", 3),
        best_for: r.string_list("bestFor"),
        avoid_if: r.string_list("avoidIf"),
        nearby_highlights: r.string_list("nearbyHighlights"),
        price_range: r.optional_choice("priceRange"),
    }
}

fn read_day_trip(r: &mut FieldReader<'_>) -> DayTripMetadata {
    DayTripMetadata {
        drive_time_from_naples: r.required_str("driveTimeFromNaples", 2),
        best_season: r.required_str("bestSeason", 2),
        must_book: r.string_list("mustBook"),
        difficulty: r.optional_choice("difficulty"),
    }
}

fn read_travel_tip(r: &mut FieldReader<'_>) -> TravelTipMetadata {
    TravelTipMetadata {
        category: r.optional_choice("category"),
    }
}

fn read_map(r: &mut FieldReader<'_>) -> MapMetadata {
    MapMetadata {
        download_url: r.optional_url("downloadUrl"),
        map_embed_url: r.optional_url("mapEmbedUrl"),
        map_type: r.optional_choice("mapType"),
    }
}

fn read_hotel(r: &mut FieldReader<'_>) -> HotelMetadata {
    HotelMetadata {
        hotel_name: r.required_str("hotelName", 3),
        category: r.required_choice("category"),
        area: r.required_str("area", 3),
        amenities: r.string_list("amenities"),
        price_level: r.required_choice("priceLevel"),
        booking_url: r.optional_url("bookingUrl"),
        pet_friendly: r.optional_bool("petFriendly"),
        beach_access: r.optional_bool("beachAccess"),
    }
}

fn read_restaurant(r: &mut FieldReader<'_>) -> RestaurantMetadata {
    RestaurantMetadata {
        restaurant_name: r.required_str("restaurantName", 3),
        cuisine: r.required_choice("cuisine"),
        price_level: r.required_choice("priceLevel"),
        neighborhood: r.required_str("neighborhood", 3),
        address: r.required_str("address", 10),
        phone: r.optional_str("phone", 0),
        website: r.optional_url("website"),
        reservation_url: r.optional_url("reservationUrl"),
        hours: r.optional_str("hours", 0),
        best_for: r.string_list("bestFor"),
        signature_dishes: r.string_list("signatureDishes"),
        awards: r.string_list("awards"),
        waterfront: r.optional_bool("waterfront"),
        outdoor_seating: r.optional_bool("outdoorSeating"),
    }
}

fn read_event(r: &mut FieldReader<'_>) -> EventMetadata {
    EventMetadata {
        event_name: r.required_str("eventName", 3),
        category: r.required_choice("category"),
        start_date: r.required_str("startDate", 0),
        end_date: r.optional_str("endDate", 0),
        is_recurring: r.optional_bool("isRecurring"),
        recurring_schedule: r.optional_str("recurringSchedule", 0),
        venue: r.required_str("venue", 3),
        address: r.required_str("address", 10),
        neighborhood: r.optional_str("neighborhood", 0),
        price: r.optional_str("price", 0),
        website: r.optional_url("website"),
        ticket_url: r.optional_url("ticketUrl"),
        is_free: r.optional_bool("isFree"),
    }
}

// ═══════════════════════════════════════════════════════════════════════
// FieldReader
// ═══════════════════════════════════════════════════════════════════════

/// Reads typed fields from a record while accumulating violations.
///
/// Every accessor returns a value even when the field is invalid (an empty
/// string, zero, or the first choice) so a whole struct can be assembled in
/// one pass. [`FieldReader::finish`] then rejects the record if anything was
/// recorded, which keeps those placeholders from ever being observed.
struct FieldReader<'a> {
    record: &'a RawRecord,
    prefix: String,
    violations: Vec<Violation>,
}

impl<'a> FieldReader<'a> {
    fn new(record: &'a RawRecord) -> Self {
        Self {
            record,
            prefix: String::new(),
            violations: Vec::new(),
        }
    }

    fn value(&self, key: &str) -> Option<&'a Value> {
        self.record.get(key)
    }

    fn violate(&mut self, key: &str, message: impl Into<String>) {
        self.violations.push(Violation {
            field: format!("{}{}", self.prefix, key),
            message: message.into(),
        });
    }

    fn missing(&mut self, key: &str) {
        self.violate(key, "required field is missing");
    }

    fn wrong_type(&mut self, key: &str, expected: &str, found: &Value) {
        self.violate(key, format!("expected {}, found {}", expected, type_name(found)));
    }

    fn required_str(&mut self, key: &str, min_chars: usize) -> String {
        match self.value(key) {
            None => {
                self.missing(key);
                String::new()
            }
            Some(v) => self.check_str(key, v, min_chars).unwrap_or_default(),
        }
    }

    fn optional_str(&mut self, key: &str, min_chars: usize) -> Option<String> {
        let v = self.value(key)?;
        self.check_str(key, v, min_chars)
    }

    fn str_or(&mut self, key: &str, min_chars: usize, default: &str) -> String {
        match self.value(key) {
            None => default.to_string(),
            Some(v) => self.check_str(key, v, min_chars).unwrap_or_default(),
        }
    }

    fn bounded_str(&mut self, key: &str, chars: RangeInclusive<usize>) -> String {
        let value = self.required_str(key, *chars.start());
        if value.chars().count() > *chars.end() {
            self.violate(key, format!("must be at most {} characters", chars.end()));
        }
        value
    }

    fn check_str(&mut self, key: &str, v: &Value, min_chars: usize) -> Option<String> {
        let Some(s) = v.as_str() else {
            self.wrong_type(key, "string", v);
            return None;
        };
        if s.chars().count() < min_chars {
            self.violate(key, format!("must be at least {} characters", min_chars));
            return None;
        }
        Some(s.to_string())
    }

    fn required_choice<T: Choice>(&mut self, key: &str) -> T {
        match self.value(key) {
            None => {
                self.missing(key);
                T::default()
            }
            Some(v) => self.check_choice(key, v).unwrap_or_default(),
        }
    }

    fn optional_choice<T: Choice>(&mut self, key: &str) -> Option<T> {
        let v = self.value(key)?;
        self.check_choice(key, v)
    }

    fn check_choice<T: Choice>(&mut self, key: &str, v: &Value) -> Option<T> {
        let Some(s) = v.as_str() else {
            self.wrong_type(key, "string", v);
            return None;
        };
        let parsed = T::parse(s);
        if parsed.is_none() {
            self.violate(key, format!("'{}' is not one of: {}", s, T::allowed()));
        }
        parsed
    }

    fn string_list(&mut self, key: &str) -> Vec<String> {
        let Some(v) = self.value(key) else {
            return Vec::new();
        };
        let Some(items) = v.as_array() else {
            self.wrong_type(key, "list of strings", v);
            return Vec::new();
        };
        let mut out = Vec::with_capacity(items.len());
        for (i, item) in items.iter().enumerate() {
            match item.as_str() {
                Some(s) => out.push(s.to_string()),
                None => self.wrong_type(&format!("{}[{}]", key, i), "string", item),
            }
        }
        out
    }

    fn optional_url(&mut self, key: &str) -> Option<String> {
        let s = self.optional_str(key, 0)?;
        match Url::parse(&s) {
            Ok(_) => Some(s),
            Err(e) => {
                self.violate(key, format!("'{}' is not an absolute URL ({})", s, e));
                None
            }
        }
    }

    fn int_in_range(&mut self, key: &str, range: RangeInclusive<i64>) -> i64 {
        let Some(v) = self.value(key) else {
            self.missing(key);
            return *range.start();
        };
        let Some(n) = v.as_i64() else {
            self.wrong_type(key, "integer", v);
            return *range.start();
        };
        if !range.contains(&n) {
            self.violate(
                key,
                format!("{} is outside {}..={}", n, range.start(), range.end()),
            );
            return *range.start();
        }
        n
    }

    fn required_f64(&mut self, key: &str) -> f64 {
        match self.value(key) {
            None => {
                self.missing(key);
                0.0
            }
            Some(v) => match v.as_f64() {
                Some(n) => n,
                None => {
                    self.wrong_type(key, "number", v);
                    0.0
                }
            },
        }
    }

    fn optional_bool(&mut self, key: &str) -> Option<bool> {
        let v = self.value(key)?;
        let b = v.as_bool();
        if b.is_none() {
            self.wrong_type(key, "boolean", v);
        }
        b
    }

    /// Read an optional list of objects, each through `read_item`.
    fn optional_list<T>(
        &mut self,
        key: &str,
        mut read_item: impl FnMut(&mut FieldReader<'a>) -> T,
    ) -> Option<Vec<T>> {
        let v = self.value(key)?;
        let Some(items) = v.as_array() else {
            self.wrong_type(key, "list", v);
            return None;
        };
        let mut out = Vec::with_capacity(items.len());
        for (i, item) in items.iter().enumerate() {
            let item_key = format!("{}[{}]", key, i);
            let Some(map) = item.as_object() else {
                self.wrong_type(&item_key, "mapping", item);
                continue;
            };
            let mut nested = FieldReader {
                record: map,
                prefix: format!("{}{}.", self.prefix, item_key),
                violations: Vec::new(),
            };
            out.push(read_item(&mut nested));
            self.violations.append(&mut nested.violations);
        }
        Some(out)
    }

    fn finish(self, category: Category) -> Result<(), ValidationError> {
        if self.violations.is_empty() {
            Ok(())
        } else {
            Err(ValidationError {
                category,
                violations: self.violations,
            })
        }
    }
}

fn type_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "mapping",
    }
}

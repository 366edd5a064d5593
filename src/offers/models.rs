//! Offer Domain Models
//!
//! Flight offers, the tool's filter input, and the structured payload the
//! flight widget hydrates from.

use chrono::{DateTime, SecondsFormat};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize, Serializer};

/// Cabin label reported when no filter was requested
pub const ALL_CABINS: &str = "All cabins";

// =============================================================================
// Offers
// =============================================================================

/// A reward flight with cash and points pricing for the same itinerary.
///
/// Departure and arrival each carry their own airport's zone.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Offer {
    pub id: String,
    pub origin: String,
    pub destination: String,
    #[serde(rename = "departure", serialize_with = "serialize_zoned")]
    pub departure_at: DateTime<Tz>,
    #[serde(rename = "arrival", serialize_with = "serialize_zoned")]
    pub arrival_at: DateTime<Tz>,
    pub duration_minutes: u32,
    pub fare_class: String,
    pub cash_price: u32,
    pub points_price: u32,
    pub perks: Vec<String>,
}

impl Offer {
    /// Case-insensitive exact comparison against the fare class.
    pub fn matches_cabin(&self, cabin: &str) -> bool {
        self.fare_class.to_lowercase() == cabin.to_lowercase()
    }
}

/// RFC 3339 with the local offset of the offer's zone, e.g.
/// `2024-07-12T09:30:00-07:00`.
fn serialize_zoned<S: Serializer>(value: &DateTime<Tz>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Secs, false))
}

// =============================================================================
// Tool Input
// =============================================================================

/// Arguments accepted by the flight offers tool. Unknown fields are rejected.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FilterQuery {
    /// Optional cabin to filter results (e.g. Business Flex)
    #[serde(default)]
    pub fare_cabin: Option<String>,
}

impl FilterQuery {
    /// The requested cabin, treating an empty string as no filter.
    pub fn cabin(&self) -> Option<&str> {
        self.fare_cabin.as_deref().filter(|cabin| !cabin.is_empty())
    }
}

// =============================================================================
// Structured Content
// =============================================================================

/// Structured content returned by the flight offers tool.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OffersPayload<'a> {
    /// Offers matching the filter, in catalog order
    pub offers: Vec<&'a Offer>,
    /// Every distinct fare class in the store, sorted ascending
    pub available_cabins: Vec<String>,
    /// Requested cabin or [`ALL_CABINS`]
    pub selected_cabin: String,
}

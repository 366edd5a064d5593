//! Offer Store
//!
//! Read-only catalog of reward flights, fixed at startup.

use super::models::{FilterQuery, Offer, OffersPayload, ALL_CABINS};
use chrono::{DateTime, TimeZone};
use chrono_tz::{America, Europe, Tz};
use std::collections::{BTreeSet, HashMap};
use thiserror::Error;

/// Problems building the offer catalog.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("offer {id}: {local} is not a valid local time in {zone}")]
    InvalidLocalTime {
        id: String,
        local: String,
        zone: String,
    },

    #[error("duplicate offer id {0}")]
    DuplicateId(String),
}

/// Immutable offer catalog, in insertion order.
#[derive(Debug, Default)]
pub struct OfferStore {
    offers: Vec<Offer>,
    by_id: HashMap<String, usize>,
}

impl OfferStore {
    /// Indexes `offers`, rejecting duplicate ids.
    pub fn from_offers(offers: Vec<Offer>) -> Result<Self, CatalogError> {
        let mut by_id = HashMap::with_capacity(offers.len());
        for (index, offer) in offers.iter().enumerate() {
            if by_id.insert(offer.id.clone(), index).is_some() {
                return Err(CatalogError::DuplicateId(offer.id.clone()));
            }
        }
        Ok(Self { offers, by_id })
    }

    /// The Skyward Rewards catalog served by the flight offers widget.
    pub fn seeded() -> Result<Self, CatalogError> {
        let offers = vec![
            Offer {
                id: "SEA-JFK-001".into(),
                origin: "Seattle".into(),
                destination: "New York (JFK)".into(),
                departure_at: zoned("SEA-JFK-001", America::Los_Angeles, (2024, 7, 12), (9, 30))?,
                arrival_at: zoned("SEA-JFK-001", America::New_York, (2024, 7, 12), (17, 50))?,
                duration_minutes: 320,
                fare_class: "Business Flex".into(),
                cash_price: 689,
                points_price: 55200,
                perks: perks(&["2 checked bags", "Lounge access", "Priority boarding"]),
            },
            Offer {
                id: "SFO-CDG-101".into(),
                origin: "San Francisco".into(),
                destination: "Paris (CDG)".into(),
                departure_at: zoned("SFO-CDG-101", America::Los_Angeles, (2024, 8, 4), (13, 5))?,
                arrival_at: zoned("SFO-CDG-101", Europe::Paris, (2024, 8, 5), (9, 35))?,
                duration_minutes: 640,
                fare_class: "Premium Select".into(),
                cash_price: 1149,
                points_price: 86400,
                perks: perks(&["Lie-flat seat", "Fine dining", "Arrivals lounge access"]),
            },
            Offer {
                id: "ATL-CUN-207".into(),
                origin: "Atlanta".into(),
                destination: "Cancún (CUN)".into(),
                departure_at: zoned("ATL-CUN-207", America::New_York, (2024, 6, 18), (7, 15))?,
                arrival_at: zoned("ATL-CUN-207", America::Cancun, (2024, 6, 18), (10, 55))?,
                duration_minutes: 160,
                fare_class: "SkyComfort".into(),
                cash_price: 289,
                points_price: 22400,
                perks: perks(&["Extra legroom", "Welcome beverage"]),
            },
        ];

        Self::from_offers(offers)
    }

    pub fn get(&self, id: &str) -> Option<&Offer> {
        self.by_id.get(id).map(|&index| &self.offers[index])
    }

    /// Offers in catalog order
    pub fn iter(&self) -> impl Iterator<Item = &Offer> {
        self.offers.iter()
    }

    pub fn len(&self) -> usize {
        self.offers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offers.is_empty()
    }

    /// Offers whose fare class matches `cabin`; all offers when `None`.
    pub fn filter_by_cabin(&self, cabin: Option<&str>) -> Vec<&Offer> {
        match cabin {
            Some(cabin) => self.iter().filter(|offer| offer.matches_cabin(cabin)).collect(),
            None => self.iter().collect(),
        }
    }

    /// Distinct fare classes across the whole store, sorted ascending.
    pub fn available_cabins(&self) -> Vec<String> {
        self.iter()
            .map(|offer| offer.fare_class.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Builds the widget payload for a validated query.
    pub fn query(&self, filter: &FilterQuery) -> OffersPayload<'_> {
        let cabin = filter.cabin();
        OffersPayload {
            offers: self.filter_by_cabin(cabin),
            available_cabins: self.available_cabins(),
            selected_cabin: cabin.unwrap_or(ALL_CABINS).to_string(),
        }
    }
}

fn zoned(
    id: &str,
    zone: Tz,
    (year, month, day): (i32, u32, u32),
    (hour, minute): (u32, u32),
) -> Result<DateTime<Tz>, CatalogError> {
    zone.with_ymd_and_hms(year, month, day, hour, minute, 0)
        .single()
        .ok_or_else(|| CatalogError::InvalidLocalTime {
            id: id.to_string(),
            local: format!("{year:04}-{month:02}-{day:02} {hour:02}:{minute:02}"),
            zone: zone.name().to_string(),
        })
}

fn perks(items: &[&str]) -> Vec<String> {
    items.iter().map(|perk| perk.to_string()).collect()
}

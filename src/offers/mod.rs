//! Offer Domain Module
//!
//! This module contains the reward flight catalog, including:
//! - Offer models and their wire serialization
//! - The filter accepted by the flight offers tool
//! - The read-only offer store and payload construction

pub mod models;
pub mod store;

// Re-export commonly used types for convenience
pub use models::{FilterQuery, Offer, OffersPayload, ALL_CABINS};
pub use store::{CatalogError, OfferStore};

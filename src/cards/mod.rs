//! Card image pipeline
//!
//! This module contains the card art utilities:
//! - Catalog loading and derived filename rules
//! - Concurrent download and resizing of card images
//! - Cleanup of images no longer present in the catalog

/// Catalog loading and filename derivation
pub mod catalog;
/// Orphaned-image detection and removal
pub mod cleanup;
/// Concurrent download and resizing
pub mod fetch;

pub use catalog::{Card, load_catalog, sanitize_card_name};
pub use fetch::{FetchConfig, FetchSummary, fetch_card_images};

//! Static site listings (tracks, cars, car classes, clubs, divisions, seasons).
//!
//! The members site does not serve these as an API; it inlines them into its pages
//! as `var TrackListing = extractJSON('...');` and friends.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use crate::core::{Record, wire};

/// Listings keyed by their numeric `id`.
pub type Listing = BTreeMap<i64, Record>;

/// Lookup tables captured from a members site page.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ServiceInfo {
    pub tracks: Listing,
    pub cars: Listing,
    pub car_classes: Listing,
    pub clubs: Listing,
    pub divisions: Listing,
    /// Raw `SeasonListing` entries.
    pub seasons: Vec<Value>,
    /// Raw `YearAndQuarterListing` entries.
    pub year_and_quarter: Vec<Value>,
}

impl ServiceInfo {
    /// Parse every listing the page carries. Missing or broken listings stay empty.
    pub(crate) fn from_page(html: &str) -> Self {
        Self {
            tracks: keyed(html, "TrackListing"),
            cars: keyed(html, "CarListing"),
            car_classes: keyed(html, "CarClassListing"),
            clubs: keyed(html, "ClubListing"),
            divisions: keyed(html, "DivisionListing"),
            seasons: list(html, "SeasonListing"),
            year_and_quarter: list(html, "YearAndQuarterListing"),
        }
    }

    /// Display name of a track id, if listed.
    pub fn track_name(&self, id: i64) -> Option<String> {
        name_of(&self.tracks, id)
    }

    /// Display name of a car id, if listed.
    pub fn car_name(&self, id: i64) -> Option<String> {
        name_of(&self.cars, id)
    }
}

fn name_of(listing: &Listing, id: i64) -> Option<String> {
    listing
        .get(&id)
        .and_then(|r| r.get("name"))
        .and_then(Value::as_str)
        .map(wire::clean)
}

fn list(html: &str, var: &str) -> Vec<Value> {
    match wire::extract_js_var(html, var, 1) {
        Ok(Value::Array(items)) => items,
        Ok(_) => {
            tracing::warn!(listing = var, "listing is not an array");
            Vec::new()
        }
        Err(e) => {
            tracing::warn!(listing = var, error = %e, "couldn't read listing");
            Vec::new()
        }
    }
}

fn keyed(html: &str, var: &str) -> Listing {
    list(html, var)
        .into_iter()
        .filter_map(|item| match item {
            Value::Object(rec) => {
                let id = rec.get("id").and_then(Value::as_i64)?;
                Some((id, rec))
            }
            _ => None,
        })
        .collect()
}

pub mod amenity;

pub use amenity::Amenity;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Guest counts for a stay
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Guests {
    pub adults: u32,
    pub children: u32,
    pub infants: u32,
    pub pets: u32,
}

impl Default for Guests {
    fn default() -> Self {
        Self {
            adults: 1,
            children: 0,
            infants: 0,
            pets: 0,
        }
    }
}

/// Travel-search preferences collected from the user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SearchPreferences {
    /// City or area to search in
    pub location: String,
    pub check_in: Option<NaiveDate>,
    pub check_out: Option<NaiveDate>,
    pub guests: Guests,
    /// Minimum nightly price
    pub price_min: Option<u32>,
    /// Maximum nightly price
    pub price_max: Option<u32>,
    pub bedrooms: u32,
    pub bathrooms: u32,
    /// Requested amenity names. Names outside [`Amenity::ALL`] are kept but never
    /// reach the provider query.
    pub amenities: BTreeSet<String>,
    pub additional_info: Option<String>,
}

impl Default for SearchPreferences {
    fn default() -> Self {
        Self {
            location: String::new(),
            check_in: None,
            check_out: None,
            guests: Guests::default(),
            price_min: None,
            price_max: None,
            bedrooms: 1,
            bathrooms: 1,
            amenities: BTreeSet::new(),
            additional_info: None,
        }
    }
}

impl SearchPreferences {
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            ..Self::default()
        }
    }

    /// Known amenities in provider vocabulary order
    pub fn known_amenities(&self) -> impl Iterator<Item = Amenity> + '_ {
        Amenity::ALL.into_iter().filter(move |amenity| {
            self.amenities
                .iter()
                .any(|name| Amenity::from_name(name) == Some(*amenity))
        })
    }
}

/// Outcome of the optional per-listing preview lookup
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum PreviewState {
    #[default]
    NotRequested,
    Loaded(Vec<String>),
    Failed(String),
}

/// One listing returned by a search
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResultItem {
    pub url: String,
    pub summary: Option<String>,
    #[serde(default)]
    pub preview: PreviewState,
}

impl ResultItem {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            summary: None,
            preview: PreviewState::NotRequested,
        }
    }

    pub fn with_summary(url: impl Into<String>, summary: Option<String>) -> Self {
        Self {
            summary,
            ..Self::new(url)
        }
    }
}

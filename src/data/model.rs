use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// ListingStatus – derived transaction state of a listing
// ---------------------------------------------------------------------------

/// Transaction state derived from the free-text `TYPE` field.
/// `Unknown` is the sentinel for a missing/non-text source field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ListingStatus {
    ForSale,
    ForRent,
    Sold,
    Pending,
    Other,
    Unknown,
}

impl ListingStatus {
    /// Human-readable label matching the source dataset's wording.
    pub fn as_str(&self) -> &'static str {
        match self {
            ListingStatus::ForSale => "For Sale",
            ListingStatus::ForRent => "For Rent",
            ListingStatus::Sold => "Sold",
            ListingStatus::Pending => "Pending",
            ListingStatus::Other => "Other",
            ListingStatus::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for ListingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Listing – one row of the housing dataset
// ---------------------------------------------------------------------------

/// A single property record.
///
/// Invariants (enforced by the loader, permanent for the table's lifetime):
/// `price > 0`, `latitude`/`longitude` present. The derived fields
/// (`status`, `property_type`, `price_per_sqft`) are computed once at load
/// and never mutated afterwards; `raw_type` keeps the source text verbatim.
#[derive(Debug, Clone, Serialize)]
pub struct Listing {
    pub price: f64,
    pub beds: Option<i64>,
    pub baths: Option<f64>,
    pub latitude: f64,
    pub longitude: f64,
    pub locality: String,
    pub address: Option<String>,
    /// Original free-text `TYPE` field, e.g. `"Condo for sale"`.
    pub raw_type: Option<String>,
    /// Area in square feet, when the source provides it.
    pub sqft: Option<f64>,

    // Derived columns.
    pub status: ListingStatus,
    pub property_type: String,
    /// `price / sqft`; `None` when the area is missing or zero.
    pub price_per_sqft: Option<f64>,
}

// ---------------------------------------------------------------------------
// ListingTable – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full validated table with pre-computed option indices.
///
/// The indices (unique localities, statuses, property types, bath counts)
/// are what a presentation layer offers as dropdown choices; they are built
/// once from the rows and kept in sorted order.
#[derive(Debug, Clone, Default)]
pub struct ListingTable {
    pub listings: Vec<Listing>,
    /// Sorted unique localities.
    pub localities: BTreeSet<String>,
    /// Sorted unique derived statuses.
    pub statuses: BTreeSet<ListingStatus>,
    /// Sorted unique derived property types.
    pub property_types: BTreeSet<String>,
    /// Sorted unique bathroom counts (floats in the source data).
    pub bath_values: Vec<f64>,
}

impl ListingTable {
    /// Build the option indices from validated rows.
    pub fn from_listings(listings: Vec<Listing>) -> Self {
        let mut localities = BTreeSet::new();
        let mut statuses = BTreeSet::new();
        let mut property_types = BTreeSet::new();
        let mut bath_values: Vec<f64> = Vec::new();

        for listing in &listings {
            localities.insert(listing.locality.clone());
            statuses.insert(listing.status);
            property_types.insert(listing.property_type.clone());
            if let Some(b) = listing.baths {
                bath_values.push(b);
            }
        }
        bath_values.sort_by(f64::total_cmp);
        bath_values.dedup();

        ListingTable {
            listings,
            localities,
            statuses,
            property_types,
            bath_values,
        }
    }

    /// Number of listings.
    pub fn len(&self) -> usize {
        self.listings.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }

    /// Minimum and maximum price, `None` on an empty table.
    pub fn price_bounds(&self) -> Option<(f64, f64)> {
        let mut it = self.listings.iter().map(|l| l.price);
        let first = it.next()?;
        let (min, max) = it.fold((first, first), |(lo, hi), p| (lo.min(p), hi.max(p)));
        Some((min, max))
    }

    /// Minimum and maximum bedroom count over rows that have one.
    pub fn beds_bounds(&self) -> Option<(i64, i64)> {
        let mut it = self.listings.iter().filter_map(|l| l.beds);
        let first = it.next()?;
        let (min, max) = it.fold((first, first), |(lo, hi), b| (lo.min(b), hi.max(b)));
        Some((min, max))
    }

    /// New table containing only the rows at `indices`, with its own
    /// rebuilt option indices.
    pub fn subset(&self, indices: &[usize]) -> ListingTable {
        let rows = indices
            .iter()
            .filter_map(|&i| self.listings.get(i).cloned())
            .collect();
        ListingTable::from_listings(rows)
    }
}

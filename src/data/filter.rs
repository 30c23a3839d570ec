use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::model::{Listing, ListingStatus, ListingTable};

// ---------------------------------------------------------------------------
// Filter criteria: the user's current search choices
// ---------------------------------------------------------------------------

/// Bathroom-count predicate. The source UI offered an exact dropdown pick;
/// some revisions used a minimum threshold instead, so both are explicit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum BathFilter {
    Exactly(f64),
    AtLeast(f64),
}

/// One set of search criteria, applied as a conjunction.
///
/// Every field is an explicit `Option`; `None` means "no constraint", with
/// no "Any"/"All" sentinel values. The default value constrains nothing,
/// so filtering with it returns the table unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Inclusive price bounds.
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    /// Inclusive bedroom-count bounds. A listing without a bedroom count
    /// fails any active bound.
    pub bed_min: Option<i64>,
    pub bed_max: Option<i64>,
    pub baths: Option<BathFilter>,
    /// Exact locality match.
    pub locality: Option<String>,
    /// Exact derived-status match.
    pub status: Option<ListingStatus>,
    /// Property-type membership; a singleton set is an exact match.
    pub property_types: Option<BTreeSet<String>>,
}

impl FilterCriteria {
    /// True when no field constrains anything.
    pub fn is_neutral(&self) -> bool {
        *self == FilterCriteria::default()
    }

    /// Whether `listing` satisfies every supplied criterion.
    pub fn matches(&self, listing: &Listing) -> bool {
        if let Some(min) = self.min_price {
            if listing.price < min {
                return false;
            }
        }
        if let Some(max) = self.max_price {
            if listing.price > max {
                return false;
            }
        }
        if self.bed_min.is_some() || self.bed_max.is_some() {
            let Some(beds) = listing.beds else {
                return false;
            };
            if self.bed_min.is_some_and(|min| beds < min) {
                return false;
            }
            if self.bed_max.is_some_and(|max| beds > max) {
                return false;
            }
        }
        if let Some(bath) = self.baths {
            let Some(baths) = listing.baths else {
                return false;
            };
            let ok = match bath {
                BathFilter::Exactly(want) => baths == want,
                BathFilter::AtLeast(want) => baths >= want,
            };
            if !ok {
                return false;
            }
        }
        if let Some(locality) = &self.locality {
            if listing.locality != *locality {
                return false;
            }
        }
        if let Some(status) = self.status {
            if listing.status != status {
                return false;
            }
        }
        if let Some(types) = &self.property_types {
            if !types.contains(&listing.property_type) {
                return false;
            }
        }
        true
    }
}

/// Return indices of listings that pass all active criteria.
///
/// An empty result is a valid outcome, not an error; downstream summaries
/// handle it by reporting zeros.
pub fn filtered_indices(table: &ListingTable, criteria: &FilterCriteria) -> Vec<usize> {
    table
        .listings
        .iter()
        .enumerate()
        .filter(|(_, listing)| criteria.matches(listing))
        .map(|(i, _)| i)
        .collect()
}

/// Materialize the matching rows as a new table.
pub fn apply(table: &ListingTable, criteria: &FilterCriteria) -> ListingTable {
    table.subset(&filtered_indices(table, criteria))
}

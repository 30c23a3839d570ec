use serde::Serialize;

use crate::data::filter::{filtered_indices, FilterCriteria};
use crate::data::model::{Listing, ListingStatus, ListingTable};
use crate::data::summary::{self, PriceExtremes, SummaryStats};

// ---------------------------------------------------------------------------
// Dashboard state
// ---------------------------------------------------------------------------

/// One row of the results table, projected to the fixed display column set.
#[derive(Debug, Clone, Serialize)]
pub struct DisplayRow {
    pub status: ListingStatus,
    pub property_type: String,
    pub price: f64,
    pub beds: Option<i64>,
    pub baths: Option<f64>,
    pub locality: String,
    pub address: Option<String>,
}

impl DisplayRow {
    fn from_listing(listing: &Listing) -> Self {
        DisplayRow {
            status: listing.status,
            property_type: listing.property_type.clone(),
            price: listing.price,
            beds: listing.beds,
            baths: listing.baths,
            locality: listing.locality.clone(),
            address: listing.address.clone(),
        }
    }
}

/// The dashboard's search state, independent of any rendering.
///
/// Each criteria change triggers a fresh, synchronous run of filter →
/// summary over the already-loaded table; the table itself is never
/// mutated. A presentation layer reads `visible_indices`, the two summary
/// blocks, and the projections below.
#[derive(Debug, Default)]
pub struct DashboardState {
    /// Loaded table (None until a file is loaded).
    table: Option<ListingTable>,

    /// Current search choices.
    criteria: FilterCriteria,

    /// Indices of listings passing the current criteria (cached).
    pub visible_indices: Vec<usize>,

    /// Summary over the whole table, computed once per load.
    pub overall_summary: SummaryStats,

    /// Summary over the current filtered subset.
    pub filtered_summary: SummaryStats,
}

impl DashboardState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ingest a newly loaded table; resets criteria and recomputes both
    /// summaries.
    pub fn set_table(&mut self, table: ListingTable) {
        self.criteria = FilterCriteria::default();
        self.visible_indices = (0..table.len()).collect();
        self.overall_summary = summary::summarize(&table);
        self.filtered_summary = self.overall_summary;
        self.table = Some(table);
    }

    pub fn table(&self) -> Option<&ListingTable> {
        self.table.as_ref()
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    /// Replace the criteria and re-run filter → summary.
    pub fn set_criteria(&mut self, criteria: FilterCriteria) {
        self.criteria = criteria;
        self.refilter();
    }

    /// Recompute `visible_indices` and the filtered summary after a
    /// criteria change.
    pub fn refilter(&mut self) {
        if let Some(table) = &self.table {
            self.visible_indices = filtered_indices(table, &self.criteria);
            self.filtered_summary = summary::summarize(&self.filtered_table());
        } else {
            self.visible_indices.clear();
            self.filtered_summary = SummaryStats::default();
        }
    }

    /// The current filtered subset as its own table.
    pub fn filtered_table(&self) -> ListingTable {
        match &self.table {
            Some(table) => table.subset(&self.visible_indices),
            None => ListingTable::default(),
        }
    }

    /// Matching rows projected to the display columns, priciest first.
    pub fn display_rows(&self) -> Vec<DisplayRow> {
        let Some(table) = &self.table else {
            return Vec::new();
        };
        let mut rows: Vec<DisplayRow> = self
            .visible_indices
            .iter()
            .filter_map(|&i| table.listings.get(i))
            .map(DisplayRow::from_listing)
            .collect();
        rows.sort_by(|a, b| b.price.total_cmp(&a.price));
        rows
    }

    /// Listing counts of the busiest localities in the current subset.
    pub fn top_localities(&self, top_n: usize) -> Vec<(String, usize)> {
        summary::count_by_locality(&self.filtered_table(), top_n)
    }

    /// Cheapest and priciest matching rows.
    pub fn price_extremes(&self) -> Option<PriceExtremes> {
        summary::price_extremes(&self.filtered_table())
    }

    /// Mean coordinates of the matching rows, for centering a map.
    pub fn map_center(&self) -> Option<(f64, f64)> {
        summary::geo_center(&self.filtered_table())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(price: f64, locality: &str, address: &str) -> Listing {
        Listing {
            price,
            beds: Some(2),
            baths: Some(1.0),
            latitude: 40.7,
            longitude: -73.9,
            locality: locality.to_string(),
            address: Some(address.to_string()),
            raw_type: Some("Condo for sale".to_string()),
            sqft: None,
            status: ListingStatus::ForSale,
            property_type: "Condo".to_string(),
            price_per_sqft: None,
        }
    }

    fn state_with_rows() -> DashboardState {
        let mut state = DashboardState::new();
        state.set_table(ListingTable::from_listings(vec![
            listing(100_000.0, "Queens", "1 First Ave"),
            listing(300_000.0, "Brooklyn", "2 Second St"),
            listing(200_000.0, "Brooklyn", "3 Third Blvd"),
        ]));
        state
    }

    #[test]
    fn set_table_resets_criteria_and_summaries() {
        let state = state_with_rows();
        assert!(state.criteria().is_neutral());
        assert_eq!(state.visible_indices, vec![0, 1, 2]);
        assert_eq!(state.overall_summary.count, 3);
        assert_eq!(state.overall_summary, state.filtered_summary);
    }

    #[test]
    fn refilter_updates_subset_and_summary() {
        let mut state = state_with_rows();
        state.set_criteria(FilterCriteria {
            locality: Some("Brooklyn".to_string()),
            ..Default::default()
        });
        assert_eq!(state.visible_indices, vec![1, 2]);
        assert_eq!(state.filtered_summary.count, 2);
        assert_eq!(state.filtered_summary.mean_price, 250_000.0);
        // Overall summary is untouched by filtering.
        assert_eq!(state.overall_summary.count, 3);
    }

    #[test]
    fn empty_match_summarizes_to_zeros() {
        let mut state = state_with_rows();
        state.set_criteria(FilterCriteria {
            locality: Some("Staten Island".to_string()),
            ..Default::default()
        });
        assert!(state.visible_indices.is_empty());
        assert_eq!(state.filtered_summary, SummaryStats::default());
        assert!(state.display_rows().is_empty());
        assert!(state.map_center().is_none());
    }

    #[test]
    fn display_rows_are_projected_and_sorted_by_price_desc() {
        let state = state_with_rows();
        let rows = state.display_rows();
        let prices: Vec<f64> = rows.iter().map(|r| r.price).collect();
        assert_eq!(prices, vec![300_000.0, 200_000.0, 100_000.0]);
        assert_eq!(rows[0].locality, "Brooklyn");
        assert_eq!(rows[0].address.as_deref(), Some("2 Second St"));
        assert_eq!(rows[0].status, ListingStatus::ForSale);
    }

    #[test]
    fn no_table_is_inert() {
        let mut state = DashboardState::new();
        state.refilter();
        assert!(state.visible_indices.is_empty());
        assert!(state.display_rows().is_empty());
        assert_eq!(state.filtered_summary, SummaryStats::default());
    }
}

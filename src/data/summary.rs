use std::collections::BTreeMap;

use serde::Serialize;

use super::model::{Listing, ListingTable};

// ---------------------------------------------------------------------------
// Summary statistics
// ---------------------------------------------------------------------------

/// The headline numbers shown above the results table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct SummaryStats {
    pub count: usize,
    /// Mean price; `0.0` on an empty table.
    pub mean_price: f64,
    /// Mean bedroom count over rows that have one; `0.0` when none do.
    pub mean_beds: f64,
}

/// The cheapest and priciest rows of a table, with full attributes.
#[derive(Debug, Clone, Serialize)]
pub struct PriceExtremes {
    pub cheapest: Listing,
    pub priciest: Listing,
}

/// Count, mean price, and mean bedroom count in a single pass.
///
/// An empty table is a valid input and yields all zeros; callers never see
/// an error for the empty case.
pub fn summarize(table: &ListingTable) -> SummaryStats {
    let count = table.len();
    if count == 0 {
        return SummaryStats::default();
    }

    let mut price_sum = 0.0;
    let mut beds_sum = 0.0;
    let mut beds_count = 0usize;
    for listing in &table.listings {
        price_sum += listing.price;
        if let Some(beds) = listing.beds {
            beds_sum += beds as f64;
            beds_count += 1;
        }
    }

    SummaryStats {
        count,
        mean_price: price_sum / count as f64,
        mean_beds: if beds_count == 0 {
            0.0
        } else {
            beds_sum / beds_count as f64
        },
    }
}

/// Listing counts per locality, descending, ties in locality order.
/// Feeds the "top N localities" bar chart.
pub fn count_by_locality(table: &ListingTable, top_n: usize) -> Vec<(String, usize)> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for listing in &table.listings {
        *counts.entry(&listing.locality).or_default() += 1;
    }

    let mut ranked: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();
    // BTreeMap iteration is already key-ordered; the stable sort keeps that
    // order within equal counts.
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.truncate(top_n);
    ranked
}

/// Mean price per locality, descending, ties in locality order.
pub fn mean_price_by_locality(table: &ListingTable, top_n: usize) -> Vec<(String, f64)> {
    let mut sums: BTreeMap<&str, (f64, usize)> = BTreeMap::new();
    for listing in &table.listings {
        let entry = sums.entry(&listing.locality).or_insert((0.0, 0));
        entry.0 += listing.price;
        entry.1 += 1;
    }

    let mut ranked: Vec<(String, f64)> = sums
        .into_iter()
        .map(|(k, (sum, n))| (k.to_string(), sum / n as f64))
        .collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    ranked.truncate(top_n);
    ranked
}

/// The rows with the lowest and highest price; `None` on an empty table.
pub fn price_extremes(table: &ListingTable) -> Option<PriceExtremes> {
    let mut it = table.listings.iter();
    let first = it.next()?;
    let (mut cheapest, mut priciest) = (first, first);
    for listing in it {
        if listing.price < cheapest.price {
            cheapest = listing;
        }
        if listing.price > priciest.price {
            priciest = listing;
        }
    }
    Some(PriceExtremes {
        cheapest: cheapest.clone(),
        priciest: priciest.clone(),
    })
}

/// Mean coordinates of a table, the natural map center; `None` when empty.
pub fn geo_center(table: &ListingTable) -> Option<(f64, f64)> {
    if table.is_empty() {
        return None;
    }
    let n = table.len() as f64;
    let (lat_sum, lon_sum) = table
        .listings
        .iter()
        .fold((0.0, 0.0), |(la, lo), l| (la + l.latitude, lo + l.longitude));
    Some((lat_sum / n, lon_sum / n))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(price: f64, beds: Option<i64>, locality: &str) -> Listing {
        Listing {
            price,
            beds,
            baths: None,
            latitude: 40.0,
            longitude: -73.0,
            locality: locality.to_string(),
            address: None,
            raw_type: None,
            sqft: None,
            status: crate::data::model::ListingStatus::ForSale,
            property_type: "Condo".to_string(),
            price_per_sqft: None,
        }
    }

    #[test]
    fn empty_table_yields_zeros() {
        let stats = summarize(&ListingTable::default());
        assert_eq!(stats, SummaryStats::default());
        assert_eq!(stats.count, 0);
        assert_eq!(stats.mean_price, 0.0);
        assert_eq!(stats.mean_beds, 0.0);
    }

    #[test]
    fn mean_price_over_three_rows() {
        let table = ListingTable::from_listings(vec![
            listing(100_000.0, Some(1), "Queens"),
            listing(200_000.0, Some(2), "Queens"),
            listing(300_000.0, Some(3), "Queens"),
        ]);
        let stats = summarize(&table);
        assert_eq!(stats.count, 3);
        assert_eq!(stats.mean_price, 200_000.0);
        assert_eq!(stats.mean_beds, 2.0);
    }

    #[test]
    fn mean_beds_skips_missing_values() {
        let table = ListingTable::from_listings(vec![
            listing(100.0, Some(2), "Queens"),
            listing(200.0, None, "Queens"),
            listing(300.0, Some(4), "Queens"),
        ]);
        assert_eq!(summarize(&table).mean_beds, 3.0);
    }

    #[test]
    fn count_ranking_breaks_ties_lexically() {
        let table = ListingTable::from_listings(vec![
            listing(1.0, None, "Queens"),
            listing(2.0, None, "Queens"),
            listing(3.0, None, "Brooklyn"),
            listing(4.0, None, "Brooklyn"),
            listing(5.0, None, "Bronx"),
        ]);
        let ranked = count_by_locality(&table, 10);
        assert_eq!(
            ranked,
            vec![
                ("Brooklyn".to_string(), 2),
                ("Queens".to_string(), 2),
                ("Bronx".to_string(), 1),
            ]
        );
    }

    #[test]
    fn count_ranking_truncates_to_top_n() {
        let table = ListingTable::from_listings(vec![
            listing(1.0, None, "A"),
            listing(2.0, None, "B"),
            listing(3.0, None, "C"),
        ]);
        assert_eq!(count_by_locality(&table, 2).len(), 2);
    }

    #[test]
    fn mean_price_ranking() {
        let table = ListingTable::from_listings(vec![
            listing(100.0, None, "Queens"),
            listing(300.0, None, "Queens"),
            listing(500.0, None, "Brooklyn"),
        ]);
        let ranked = mean_price_by_locality(&table, 10);
        assert_eq!(ranked[0], ("Brooklyn".to_string(), 500.0));
        assert_eq!(ranked[1], ("Queens".to_string(), 200.0));
    }

    #[test]
    fn extremes() {
        let table = ListingTable::from_listings(vec![
            listing(250.0, None, "Queens"),
            listing(50.0, None, "Bronx"),
            listing(900.0, None, "Brooklyn"),
        ]);
        let extremes = price_extremes(&table).unwrap();
        assert_eq!(extremes.cheapest.price, 50.0);
        assert_eq!(extremes.priciest.price, 900.0);
        assert!(price_extremes(&ListingTable::default()).is_none());
    }

    #[test]
    fn geo_center_is_mean_of_coordinates() {
        let mut a = listing(1.0, None, "Queens");
        a.latitude = 40.0;
        a.longitude = -74.0;
        let mut b = listing(2.0, None, "Queens");
        b.latitude = 42.0;
        b.longitude = -72.0;
        let table = ListingTable::from_listings(vec![a, b]);
        assert_eq!(geo_center(&table), Some((41.0, -73.0)));
        assert_eq!(geo_center(&ListingTable::default()), None);
    }
}

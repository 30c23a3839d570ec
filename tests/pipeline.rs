//! End-to-end run over a Parquet source: load, filter, summarize.

use std::sync::Arc;

use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

use brownstone::{DashboardState, FilterCriteria, ListingStatus};

fn write_parquet() -> tempfile::TempPath {
    let schema = Arc::new(Schema::new(vec![
        Field::new("TYPE", DataType::Utf8, true),
        Field::new("PRICE", DataType::Float64, true),
        Field::new("BEDS", DataType::Int64, true),
        Field::new("BATH", DataType::Float64, true),
        Field::new("LOCALITY", DataType::Utf8, true),
        Field::new("LATITUDE", DataType::Float64, true),
        Field::new("LONGITUDE", DataType::Float64, true),
    ]));

    let types = StringArray::from(vec![
        Some("Condo for sale"),
        Some("House for rent"),
        Some("Co-op sold"),
        None,
        Some("Condo for sale"),
    ]);
    let prices = Float64Array::from(vec![
        Some(100_000.0),
        Some(150_000.0),
        Some(200_000.0),
        Some(-5.0), // dropped at load
        Some(300_000.0),
    ]);
    let beds = Int64Array::from(vec![Some(1), Some(2), Some(3), Some(1), None]);
    let baths = Float64Array::from(vec![Some(1.0), Some(1.5), Some(2.0), Some(1.0), Some(3.0)]);
    let localities = StringArray::from(vec![
        Some("Queens"),
        Some("Brooklyn"),
        Some("Brooklyn"),
        Some("Queens"),
        Some("Manhattan"),
    ]);
    let lats = Float64Array::from(vec![40.72, 40.68, 40.67, 40.73, 40.78]);
    let lons = Float64Array::from(vec![-73.79, -73.94, -73.95, -73.80, -73.97]);

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(types),
            Arc::new(prices),
            Arc::new(beds),
            Arc::new(baths),
            Arc::new(localities),
            Arc::new(lats),
            Arc::new(lons),
        ],
    )
    .unwrap();

    let file = tempfile::Builder::new()
        .suffix(".parquet")
        .tempfile()
        .unwrap();
    let mut writer = ArrowWriter::try_new(file.reopen().unwrap(), schema, None).unwrap();
    writer.write(&batch).unwrap();
    writer.close().unwrap();
    file.into_temp_path()
}

#[test]
fn parquet_load_filter_summarize() {
    let path = write_parquet();
    let table = brownstone::load_file(&path).unwrap();

    // The negative-price row is gone; its Unknown classification never
    // reaches the table.
    assert_eq!(table.len(), 4);
    assert!(table.listings.iter().all(|l| l.price > 0.0));
    assert!(!table.statuses.contains(&ListingStatus::Unknown));

    let mut state = DashboardState::new();
    state.set_table(table);
    assert_eq!(state.overall_summary.count, 4);

    state.set_criteria(FilterCriteria {
        min_price: Some(150_000.0),
        max_price: Some(250_000.0),
        ..Default::default()
    });
    assert_eq!(state.filtered_summary.count, 2);
    assert_eq!(state.filtered_summary.mean_price, 175_000.0);

    let rows = state.display_rows();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].price, 200_000.0);
    assert_eq!(rows[0].status, ListingStatus::Sold);
    assert_eq!(rows[1].status, ListingStatus::ForRent);

    let top = state.top_localities(10);
    assert_eq!(top[0], ("Brooklyn".to_string(), 2));

    // Nothing matches: zeros, not an error.
    state.set_criteria(FilterCriteria {
        locality: Some("Staten Island".to_string()),
        ..Default::default()
    });
    assert_eq!(state.filtered_summary.count, 0);
    assert_eq!(state.filtered_summary.mean_price, 0.0);
    assert_eq!(state.filtered_summary.mean_beds, 0.0);
}

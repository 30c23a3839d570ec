use std::path::Path;
use std::sync::Arc;

use arrow::array::{
    Array, AsArray, Float32Array, Float64Array, Int32Array, Int64Array, StringArray,
};
use arrow::datatypes::DataType;
use log::{debug, info, warn};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::classify::classify;
use super::error::DataError;
use super::model::{Listing, ListingTable};

// Source column names (NY-House-Dataset export), matched case-insensitively.
const COL_PRICE: &str = "PRICE";
const COL_BEDS: &str = "BEDS";
const COL_BATH: &str = "BATH";
const COL_SQFT: &str = "PROPERTYSQFT";
const COL_ADDRESS: &str = "ADDRESS";
const COL_LATITUDE: &str = "LATITUDE";
const COL_LONGITUDE: &str = "LONGITUDE";
const COL_LOCALITY: &str = "LOCALITY";
const COL_TYPE: &str = "TYPE";

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a listings table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – one listing per row, header with the source column names
/// * `.json`    – records-oriented array (`df.to_json(orient='records')`)
/// * `.parquet` – flat scalar columns, same names
///
/// Rows missing price or coordinates, and rows with a non-positive price,
/// are dropped here and nowhere else; every row of the returned table
/// satisfies `price > 0` with coordinates present. Derived columns
/// (status, property type, price per square foot) are computed before the
/// table is returned.
pub fn load_file(path: &Path) -> Result<ListingTable, DataError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let rows = match ext.as_str() {
        "csv" => load_csv(path)?,
        "json" => load_json(path)?,
        "parquet" | "pq" => load_parquet(path)?,
        other => return Err(DataError::UnsupportedFormat(other.to_string())),
    };

    Ok(build_table(rows))
}

// ---------------------------------------------------------------------------
// Raw row – one record before validation
// ---------------------------------------------------------------------------

/// Fields as parsed from the source, before the validity pass.
#[derive(Debug, Default)]
struct RawRow {
    price: Option<f64>,
    beds: Option<i64>,
    baths: Option<f64>,
    latitude: Option<f64>,
    longitude: Option<f64>,
    locality: Option<String>,
    address: Option<String>,
    raw_type: Option<String>,
    sqft: Option<f64>,
}

/// Validity pass + derived columns. Drops are logged, never propagated.
fn build_table(rows: Vec<RawRow>) -> ListingTable {
    let total = rows.len();
    let mut listings = Vec::with_capacity(total);

    for row in rows {
        let (Some(price), Some(latitude), Some(longitude)) =
            (row.price, row.latitude, row.longitude)
        else {
            continue;
        };
        if price <= 0.0 {
            continue;
        }

        let (status, property_type) = classify(row.raw_type.as_deref());
        let price_per_sqft = row.sqft.filter(|&a| a > 0.0).map(|a| price / a);

        listings.push(Listing {
            price,
            beds: row.beds,
            baths: row.baths,
            latitude,
            longitude,
            locality: row.locality.unwrap_or_else(|| "Unknown".to_string()),
            address: row.address,
            raw_type: row.raw_type,
            sqft: row.sqft,
            status,
            property_type,
            price_per_sqft,
        });
    }

    let dropped = total - listings.len();
    if dropped > 0 {
        warn!("dropped {dropped} of {total} rows (missing price/coordinates or price <= 0)");
    }
    info!("loaded {} listings", listings.len());

    ListingTable::from_listings(listings)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<Vec<RawRow>, DataError> {
    let file = std::fs::File::open(path).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut reader = csv::Reader::from_reader(file);

    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();
    let col = |name: &str| headers.iter().position(|h| h.eq_ignore_ascii_case(name));

    let price_idx = col(COL_PRICE).ok_or(DataError::MissingColumn(COL_PRICE))?;
    let lat_idx = col(COL_LATITUDE).ok_or(DataError::MissingColumn(COL_LATITUDE))?;
    let lon_idx = col(COL_LONGITUDE).ok_or(DataError::MissingColumn(COL_LONGITUDE))?;
    let beds_idx = col(COL_BEDS);
    let bath_idx = col(COL_BATH);
    let sqft_idx = col(COL_SQFT);
    let addr_idx = col(COL_ADDRESS);
    let locality_idx = col(COL_LOCALITY);
    let type_idx = col(COL_TYPE);

    let field = |record: &csv::StringRecord, idx: Option<usize>| -> Option<String> {
        idx.and_then(|i| record.get(i))
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    };

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        rows.push(RawRow {
            price: field(&record, Some(price_idx)).and_then(|s| parse_f64(&s)),
            beds: field(&record, beds_idx).and_then(|s| parse_i64(&s)),
            baths: field(&record, bath_idx).and_then(|s| parse_f64(&s)),
            latitude: field(&record, Some(lat_idx)).and_then(|s| parse_f64(&s)),
            longitude: field(&record, Some(lon_idx)).and_then(|s| parse_f64(&s)),
            locality: field(&record, locality_idx),
            address: field(&record, addr_idx),
            raw_type: field(&record, type_idx),
            sqft: field(&record, sqft_idx).and_then(|s| parse_f64(&s)),
        });
    }

    debug!("parsed {} CSV records from {}", rows.len(), path.display());
    Ok(rows)
}

fn parse_f64(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

fn parse_i64(s: &str) -> Option<i64> {
    let s = s.trim();
    s.parse::<i64>()
        .ok()
        .or_else(|| s.parse::<f64>().ok().filter(|v| v.is_finite()).map(|v| v as i64))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default
/// `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "PRICE": 315000, "BEDS": 2, "BATH": 2.0, "LATITUDE": 40.76, ... },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<Vec<RawRow>, DataError> {
    let text = std::fs::read_to_string(path).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let root: JsonValue = serde_json::from_str(&text)?;

    let records = root
        .as_array()
        .ok_or_else(|| DataError::Malformed("expected top-level JSON array".to_string()))?;

    // Records-oriented exports carry uniform keys; the first record is
    // enough to detect a missing required column.
    if let Some(first) = records.first().and_then(|r| r.as_object()) {
        for required in [COL_PRICE, COL_LATITUDE, COL_LONGITUDE] {
            if !first.keys().any(|k| k.eq_ignore_ascii_case(required)) {
                return Err(DataError::MissingColumn(required));
            }
        }
    }

    let mut rows = Vec::with_capacity(records.len());
    for rec in records {
        let Some(obj) = rec.as_object() else {
            continue;
        };
        let get = |name: &str| {
            obj.iter()
                .find(|(k, _)| k.eq_ignore_ascii_case(name))
                .map(|(_, v)| v)
        };
        let get_f64 = |name: &str| get(name).and_then(JsonValue::as_f64).filter(|v| v.is_finite());
        let get_str = |name: &str| {
            get(name)
                .and_then(JsonValue::as_str)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };

        rows.push(RawRow {
            price: get_f64(COL_PRICE),
            beds: get(COL_BEDS)
                .and_then(|v| v.as_i64().or_else(|| v.as_f64().map(|f| f as i64))),
            baths: get_f64(COL_BATH),
            latitude: get_f64(COL_LATITUDE),
            longitude: get_f64(COL_LONGITUDE),
            locality: get_str(COL_LOCALITY),
            address: get_str(COL_ADDRESS),
            raw_type: get_str(COL_TYPE),
            sqft: get_f64(COL_SQFT),
        });
    }

    debug!("parsed {} JSON records from {}", rows.len(), path.display());
    Ok(rows)
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load listings from a Parquet file with flat scalar columns.
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`); numeric columns may be Int32/Int64
/// or Float32/Float64, text columns Utf8 or LargeUtf8.
fn load_parquet(path: &Path) -> Result<Vec<RawRow>, DataError> {
    let file = std::fs::File::open(path).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;

    // Validate the schema up front; a zero-row file must still fail when a
    // required column is absent.
    let file_schema = builder.schema();
    for required in [COL_PRICE, COL_LATITUDE, COL_LONGITUDE] {
        if !file_schema
            .fields()
            .iter()
            .any(|f| f.name().eq_ignore_ascii_case(required))
        {
            return Err(DataError::MissingColumn(required));
        }
    }

    let reader = builder.build()?;

    let mut rows = Vec::new();

    for batch_result in reader {
        let batch = batch_result?;
        let schema = batch.schema();

        let col = |name: &str| {
            schema
                .fields()
                .iter()
                .position(|f| f.name().eq_ignore_ascii_case(name))
                .map(|i| batch.column(i))
        };

        let price_col = col(COL_PRICE).ok_or(DataError::MissingColumn(COL_PRICE))?;
        let lat_col = col(COL_LATITUDE).ok_or(DataError::MissingColumn(COL_LATITUDE))?;
        let lon_col = col(COL_LONGITUDE).ok_or(DataError::MissingColumn(COL_LONGITUDE))?;
        let beds_col = col(COL_BEDS);
        let bath_col = col(COL_BATH);
        let sqft_col = col(COL_SQFT);
        let addr_col = col(COL_ADDRESS);
        let locality_col = col(COL_LOCALITY);
        let type_col = col(COL_TYPE);

        for row in 0..batch.num_rows() {
            rows.push(RawRow {
                price: f64_at(price_col, row),
                beds: beds_col.and_then(|c| i64_at(c, row)),
                baths: bath_col.and_then(|c| f64_at(c, row)),
                latitude: f64_at(lat_col, row),
                longitude: f64_at(lon_col, row),
                locality: locality_col.and_then(|c| str_at(c, row)),
                address: addr_col.and_then(|c| str_at(c, row)),
                raw_type: type_col.and_then(|c| str_at(c, row)),
                sqft: sqft_col.and_then(|c| f64_at(c, row)),
            });
        }
    }

    debug!("parsed {} parquet records from {}", rows.len(), path.display());
    Ok(rows)
}

// -- Parquet / Arrow helpers --

/// Read a numeric cell as `f64`, whatever the physical column type.
fn f64_at(col: &Arc<dyn Array>, row: usize) -> Option<f64> {
    if col.is_null(row) {
        return None;
    }
    let v = match col.data_type() {
        DataType::Float64 => col.as_any().downcast_ref::<Float64Array>()?.value(row),
        DataType::Float32 => col.as_any().downcast_ref::<Float32Array>()?.value(row) as f64,
        DataType::Int64 => col.as_any().downcast_ref::<Int64Array>()?.value(row) as f64,
        DataType::Int32 => col.as_any().downcast_ref::<Int32Array>()?.value(row) as f64,
        _ => return None,
    };
    v.is_finite().then_some(v)
}

fn i64_at(col: &Arc<dyn Array>, row: usize) -> Option<i64> {
    if col.is_null(row) {
        return None;
    }
    match col.data_type() {
        DataType::Int64 => Some(col.as_any().downcast_ref::<Int64Array>()?.value(row)),
        DataType::Int32 => Some(col.as_any().downcast_ref::<Int32Array>()?.value(row) as i64),
        _ => f64_at(col, row).map(|v| v as i64),
    }
}

/// Read a text cell from a Utf8 or LargeUtf8 column.
fn str_at(col: &Arc<dyn Array>, row: usize) -> Option<String> {
    if col.is_null(row) {
        return None;
    }
    let s = match col.data_type() {
        DataType::Utf8 => col
            .as_any()
            .downcast_ref::<StringArray>()?
            .value(row)
            .to_string(),
        DataType::LargeUtf8 => col.as_string::<i64>().value(row).to_string(),
        _ => return None,
    };
    let s = s.trim().to_string();
    (!s.is_empty()).then_some(s)
}

//! Write a synthetic NY listings dataset (`sample_listings.csv` and
//! `sample_listings.parquet`) for trying out the pipeline without the real
//! NY-House-Dataset export.

use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

const ROWS: usize = 500;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }

    fn range_f64(&mut self, lo: f64, hi: f64) -> f64 {
        lo + self.next_f64() * (hi - lo)
    }
}

struct SampleRow {
    raw_type: String,
    price: f64,
    beds: i64,
    bath: f64,
    sqft: f64,
    address: String,
    locality: String,
    latitude: f64,
    longitude: f64,
}

fn generate_rows(rng: &mut SimpleRng) -> Vec<SampleRow> {
    let types = [
        "Condo for sale",
        "House for sale",
        "Co-op for sale",
        "Multi-family home for sale",
        "Apartment for rent",
        "Townhouse for sale",
        "Condop for sale",
        "House sold",
        "Co-op sold",
        "Pending",
        "Land for sale",
        "Foreclosure",
    ];
    // Rough borough centers; listings scatter around them.
    let localities = [
        ("Manhattan", 40.7831, -73.9712),
        ("Brooklyn", 40.6782, -73.9442),
        ("Queens", 40.7282, -73.7949),
        ("Bronx County", 40.8448, -73.8648),
        ("Richmond County", 40.5795, -74.1502),
    ];
    let streets = ["Main St", "Park Ave", "Broadway", "Bedford Ave", "Queens Blvd"];

    (0..ROWS)
        .map(|i| {
            let &(locality, lat, lon) = rng.pick(&localities);
            let raw_type = *rng.pick(&types);
            let beds = 1 + (rng.next_u64() % 5) as i64;
            let bath = (1 + (rng.next_u64() % 6)) as f64 / 2.0 + 0.5;
            let sqft = rng.range_f64(350.0, 4500.0).round();
            let price = if raw_type.contains("rent") {
                rng.range_f64(1_500.0, 12_000.0).round()
            } else {
                rng.range_f64(95_000.0, 4_500_000.0).round()
            };
            SampleRow {
                raw_type: raw_type.to_string(),
                price,
                beds,
                bath,
                sqft,
                address: format!("{} {}", 10 + i, rng.pick(&streets)),
                locality: locality.to_string(),
                latitude: lat + rng.range_f64(-0.05, 0.05),
                longitude: lon + rng.range_f64(-0.05, 0.05),
            }
        })
        .collect()
}

fn write_csv(rows: &[SampleRow], path: &str) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV file")?;
    writer.write_record([
        "TYPE",
        "PRICE",
        "BEDS",
        "BATH",
        "PROPERTYSQFT",
        "ADDRESS",
        "LOCALITY",
        "LATITUDE",
        "LONGITUDE",
    ])?;
    for row in rows {
        writer.write_record([
            row.raw_type.clone(),
            format!("{}", row.price),
            format!("{}", row.beds),
            format!("{}", row.bath),
            format!("{}", row.sqft),
            row.address.clone(),
            row.locality.clone(),
            format!("{:.6}", row.latitude),
            format!("{:.6}", row.longitude),
        ])?;
    }
    writer.flush().context("flushing CSV")?;
    Ok(())
}

fn write_parquet(rows: &[SampleRow], path: &str) -> Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("TYPE", DataType::Utf8, false),
        Field::new("PRICE", DataType::Float64, false),
        Field::new("BEDS", DataType::Int64, false),
        Field::new("BATH", DataType::Float64, false),
        Field::new("PROPERTYSQFT", DataType::Float64, false),
        Field::new("ADDRESS", DataType::Utf8, false),
        Field::new("LOCALITY", DataType::Utf8, false),
        Field::new("LATITUDE", DataType::Float64, false),
        Field::new("LONGITUDE", DataType::Float64, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(StringArray::from(
                rows.iter().map(|r| r.raw_type.as_str()).collect::<Vec<_>>(),
            )),
            Arc::new(Float64Array::from(
                rows.iter().map(|r| r.price).collect::<Vec<_>>(),
            )),
            Arc::new(Int64Array::from(
                rows.iter().map(|r| r.beds).collect::<Vec<_>>(),
            )),
            Arc::new(Float64Array::from(
                rows.iter().map(|r| r.bath).collect::<Vec<_>>(),
            )),
            Arc::new(Float64Array::from(
                rows.iter().map(|r| r.sqft).collect::<Vec<_>>(),
            )),
            Arc::new(StringArray::from(
                rows.iter().map(|r| r.address.as_str()).collect::<Vec<_>>(),
            )),
            Arc::new(StringArray::from(
                rows.iter().map(|r| r.locality.as_str()).collect::<Vec<_>>(),
            )),
            Arc::new(Float64Array::from(
                rows.iter().map(|r| r.latitude).collect::<Vec<_>>(),
            )),
            Arc::new(Float64Array::from(
                rows.iter().map(|r| r.longitude).collect::<Vec<_>>(),
            )),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path).context("creating parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating writer")?;
    writer.write(&batch).context("writing batch")?;
    writer.close().context("closing writer")?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let mut rng = SimpleRng::new(42);
    let rows = generate_rows(&mut rng);

    write_csv(&rows, "sample_listings.csv")?;
    write_parquet(&rows, "sample_listings.parquet")?;

    println!(
        "Wrote {} listings to sample_listings.csv and sample_listings.parquet",
        rows.len()
    );
    Ok(())
}

use std::path::PathBuf;

use thiserror::Error;

/// Fatal load-time failures: the source could not be read or is missing a
/// required column. Malformed individual rows are never reported here; the
/// loader drops them locally.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported file extension: .{0}")]
    UnsupportedFormat(String),

    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error("parsing CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("parsing JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Malformed(String),

    #[error("reading parquet: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("reading arrow batch: {0}")]
    Arrow(#[from] arrow::error::ArrowError),
}

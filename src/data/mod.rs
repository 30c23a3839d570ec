/// Data layer: core types, loading, classification, filtering, summaries.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file, drop invalid rows → ListingTable
///   └──────────┘
///        │            (derived columns via classify)
///        ▼
///   ┌──────────────┐
///   │ ListingTable  │  Vec<Listing>, option indices
///   └──────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  apply FilterCriteria → matching subset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ summary   │  count / means / rankings / extremes
///   └──────────┘
/// ```
///
/// Each stage produces a new derived view; nothing downstream mutates the
/// loaded table.

pub mod classify;
pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
pub mod summary;

//! Filtering-and-summarization engine for a New York housing listings
//! dataset.
//!
//! The pipeline runs strictly one way: load and validate a tabular file,
//! derive listing status and property type from the free-text `TYPE`
//! column, apply conjunctive search criteria, and summarize the matching
//! subset. Rendering (tables, charts, maps) is a consumer concern; this
//! crate hands a presentation layer the filtered rows, the summary numbers,
//! and the grouped rankings it needs.

pub mod cache;
pub mod data;
pub mod session;

pub use cache::TableCache;
pub use data::error::DataError;
pub use data::filter::{BathFilter, FilterCriteria};
pub use data::loader::load_file;
pub use data::model::{Listing, ListingStatus, ListingTable};
pub use data::summary::{PriceExtremes, SummaryStats};
pub use session::{DashboardState, DisplayRow};

//! Liftchart Dataset
//!
//! The precomputed powerlifting records and everything needed to hold them
//! in memory:
//!
//! - **types**: Typed vocabulary (Record, Category, Equipment, Tested, keys)
//! - **store**: The read-only `Dataset` with typed lookup
//! - **loader**: Reading the document from disk or over HTTP
//! - **error**: Error types
//!
//! # Document shape
//!
//! ```text
//! {
//!   "federations": ["IPF", ...],
//!   "data": {
//!     "<category>": {
//!       "equipment_<equipment>_tested_<tested>": { "M": [Record], "F": [Record] }
//!     }
//!   }
//! }
//! ```

pub mod error;
#[cfg(feature = "native")]
pub mod loader;
pub mod store;
pub mod types;

pub use error::{DatasetError, DatasetResult};
#[cfg(feature = "native")]
pub use loader::{load, DatasetSource};
pub use store::{CategoryCoverage, Dataset, Lookup, SexSeries};
pub use types::{
    normalize_year_date, year_start, Category, Equipment, FilterKey, Record, SeriesKey, Sex,
    Tested,
};

//! Liftchart Query Engine
//!
//! Picks and reduces records for one selector state:
//!
//! - **Selection**: category, federation, equipment and tested selectors
//! - **Aggregate**: best-per-year reduction and the overview strip's points
//! - **Executor**: lookup with fallback, federation filter, aggregation
//!
//! # Example
//!
//! ```rust,ignore
//! use liftchart::dataset::{Category, Equipment, Tested};
//! use liftchart::query::{FederationFilter, QueryExecutor, Selection};
//!
//! let selection = Selection::new(Category::Squat)
//!     .equipment(Equipment::Raw)
//!     .tested(Tested::Yes)
//!     .federation(FederationFilter::parse("USAPL"));
//!
//! let series = QueryExecutor::new(&dataset).execute(&selection);
//! println!("{} male years, {} female years", series.male.len(), series.female.len());
//! ```

mod aggregate;
mod executor;
mod selection;

pub use aggregate::{best_per_year, max_best, overview_points, OverviewPoint};
pub use executor::{QueryExecutor, SeriesPair};
pub use selection::{FederationFilter, Selection};

//! # Liftchart
//!
//! Historical powerlifting records over time - a Rust library, CLI and
//! browser frontend for charting the best result per year by sex.
//!
//! ## Features
//!
//! - **Typed dataset**: records keyed by (category, equipment, tested)
//!   instead of concatenated strings
//! - **Best-per-year aggregation**: one point per year and sex
//! - **Pure rendering**: a scene is a function of data, view state and
//!   configuration, testable without a DOM
//! - **Brush zoom**: an overview strip narrows the main chart's time window
//! - **Static output**: the same chart as an SVG document from the CLI
//!
//! ## Modules
//!
//! - [`dataset`]: Document model, parsing and loading
//! - [`query`]: Selection, federation filter and aggregation
//! - [`chart`]: Scales, paths, view state, scene and SVG output
//! - [`config`]: TOML configuration with environment overrides
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use liftchart::chart::{render, to_svg, ChartConfig, ViewState};
//! use liftchart::dataset::{load, Category, DatasetSource};
//! use liftchart::query::Selection;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let dataset = load(&DatasetSource::parse("data/openpowerlifting.json")).await?;
//!
//!     let config = ChartConfig::default();
//!     let view = ViewState::new(Selection::new(Category::Deadlift));
//!     let scene = render(&dataset, &view, &config);
//!
//!     println!("{} male years, {} female years", scene.male_count, scene.female_count);
//!     std::fs::write("deadlift.svg", to_svg(&scene, &config))?;
//!
//!     Ok(())
//! }
//! ```

pub mod chart;
#[cfg(feature = "native")]
pub mod config;
pub mod dataset;
pub mod query;

// Re-export top-level types for convenience
pub use dataset::{
    Category, Dataset, DatasetError, DatasetResult, Equipment, FilterKey, Record, SeriesKey, Sex,
    Tested,
};

#[cfg(feature = "native")]
pub use dataset::{load, DatasetSource};

pub use query::{FederationFilter, QueryExecutor, Selection, SeriesPair};

pub use chart::{render, to_svg, ChartConfig, ChartScene, TimeDomain, TimeWindow, ViewState};

#[cfg(feature = "native")]
pub use config::{generate_default_config, Config, ConfigError, LoggingConfig};

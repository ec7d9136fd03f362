//! Dataset access

mod client;

pub use client::{fetch_dataset, DATA_JSON_PATH};

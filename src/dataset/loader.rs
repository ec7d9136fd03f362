//! Dataset loading
//!
//! The document is read once, either from disk or over HTTP, and decoded
//! into a [`Dataset`]. Nothing is retried and nothing is cached.

use std::path::PathBuf;

use super::error::{DatasetError, DatasetResult};
use super::store::Dataset;

/// Where the dataset document lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetSource {
    File(PathBuf),
    Url(String),
}

impl DatasetSource {
    /// `http://` and `https://` locations are fetched, anything else is a path
    pub fn parse(location: &str) -> Self {
        if location.starts_with("http://") || location.starts_with("https://") {
            DatasetSource::Url(location.to_string())
        } else {
            DatasetSource::File(PathBuf::from(location))
        }
    }
}

impl std::fmt::Display for DatasetSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DatasetSource::File(path) => write!(f, "{}", path.display()),
            DatasetSource::Url(url) => f.write_str(url),
        }
    }
}

/// Load and decode the dataset
pub async fn load(source: &DatasetSource) -> DatasetResult<Dataset> {
    tracing::info!(source = %source, "Loading dataset");

    let bytes = match source {
        DatasetSource::File(path) => tokio::fs::read(path).await?,
        DatasetSource::Url(url) => fetch(url).await?,
    };

    let dataset = Dataset::from_slice(&bytes)?;
    tracing::info!("Data loaded successfully");
    Ok(dataset)
}

async fn fetch(url: &str) -> DatasetResult<Vec<u8>> {
    let response = reqwest::get(url).await?;

    if !response.status().is_success() {
        return Err(DatasetError::Http(format!(
            "{} returned {}",
            url,
            response.status()
        )));
    }

    Ok(response.bytes().await?.to_vec())
}

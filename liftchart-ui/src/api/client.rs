//! HTTP Client
//!
//! Fetches the dataset document served next to the page.

use gloo_net::http::Request;
use liftchart::dataset::Dataset;

/// Dataset location, relative to the page
pub const DATA_JSON_PATH: &str = "data/openpowerlifting.json";

/// Fetch and decode the dataset document
pub async fn fetch_dataset(url: &str) -> Result<Dataset, String> {
    let response = Request::get(url)
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        return Err(format!(
            "Failed to load {}: {} {}",
            url,
            response.status(),
            response.status_text()
        ));
    }

    let body = response
        .binary()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    Dataset::from_slice(&body).map_err(|e| format!("Parse error: {}", e))
}

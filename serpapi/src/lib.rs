//! Thin SerpAPI client: Google image search in, first original-image URL out.

use anyhow::{anyhow, Result};
use serde::Deserialize;

const DEFAULT_BASE_URL: &str = "https://serpapi.com";

#[derive(Debug, Default, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    images_results: Vec<ImageResult>,
}

#[derive(Debug, Deserialize)]
struct ImageResult {
    #[serde(default)]
    original: Option<String>,
}

pub struct ImageSearchClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl ImageSearchClient {
    pub fn new(api_key: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Run a Google image search and return the first result's original
    /// image URL, or `None` when the query produced no usable hit.
    pub async fn first_image_url(&self, query: &str) -> Result<Option<String>> {
        let resp = self
            .http
            .get(format!("{}/search", self.base_url))
            .query(&[
                ("engine", "google"),
                ("q", query),
                ("tbm", "isch"),
                ("api_key", self.api_key.as_str()),
            ])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(anyhow!("serpapi http {status}: {text}"));
        }

        let parsed: SearchResponse = resp.json().await?;
        let url = first_original(parsed.images_results);
        tracing::debug!(query, found = url.is_some(), "image search completed");
        Ok(url)
    }
}

// Only the first result counts; a missing `original` there is a miss,
// not a cue to scan further down the list.
fn first_original(results: Vec<ImageResult>) -> Option<String> {
    results.into_iter().next().and_then(|r| r.original)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_original_url_is_extracted() {
        let raw = r#"{
            "search_metadata": {"status": "Success"},
            "images_results": [
                {"position": 1, "original": "https://img.example/one.jpg"},
                {"position": 2, "original": "https://img.example/two.jpg"}
            ]
        }"#;
        let parsed: SearchResponse = serde_json::from_str(raw).unwrap();
        let url = first_original(parsed.images_results);
        assert_eq!(url.as_deref(), Some("https://img.example/one.jpg"));
    }

    #[test]
    fn missing_results_yield_none() {
        let parsed: SearchResponse =
            serde_json::from_str(r#"{"search_metadata": {"status": "Success"}}"#).unwrap();
        assert!(first_original(parsed.images_results).is_none());
    }

    #[test]
    fn first_result_without_original_yields_none() {
        let raw = r#"{"images_results": [{"position": 1}, {"original": "https://img.example/a.png"}]}"#;
        let parsed: SearchResponse = serde_json::from_str(raw).unwrap();
        assert!(first_original(parsed.images_results).is_none());
    }
}

//! Client for the external SlidesGPT generation API and the stored-club
//! workflow built on top of it: find the club record, build the context
//! prompt, generate remotely, optionally download the result.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{anyhow, Context};
use futures_util::StreamExt;
use tokio::io::AsyncWriteExt;

use crate::error::Result;
use crate::{club, prompts};

const DEFAULT_BASE_URL: &str = "https://api.slidesgpt.com";
const GENERATE_TIMEOUT: Duration = Duration::from_secs(60);

pub struct SlidesGptClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

#[derive(Debug, Clone)]
pub struct ClubWorkflowOptions {
    pub theme: String,
    pub slides_count: u32,
    pub week: Option<u32>,
    pub output_path: Option<PathBuf>,
}

impl Default for ClubWorkflowOptions {
    fn default() -> Self {
        Self { theme: "modern".to_string(), slides_count: 10, week: None, output_path: None }
    }
}

impl SlidesGptClient {
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

    /// Ask the service to generate a deck. The response body is passed
    /// through as JSON; callers pick out `presentation_id` when they want
    /// to download.
    pub async fn generate(
        &self,
        prompt: &str,
        theme: &str,
        slides_count: u32,
    ) -> Result<serde_json::Value> {
        let payload = serde_json::json!({
            "prompt": prompt,
            "theme": theme,
            "slides_count": slides_count,
        });
        let resp = self
            .http
            .post(format!("{}/generate", self.base_url))
            .bearer_auth(&self.api_key)
            .timeout(GENERATE_TIMEOUT)
            .json(&payload)
            .send()
            .await
            .context("slidesgpt generate request failed")?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(anyhow!("slidesgpt http {status}: {text}").into());
        }
        Ok(resp.json().await.context("decoding slidesgpt response")?)
    }

    /// Stream a generated presentation to disk.
    pub async fn download(&self, presentation_id: &str, output_path: &Path) -> Result<()> {
        let resp = self
            .http
            .get(format!("{}/download/{presentation_id}", self.base_url))
            .bearer_auth(&self.api_key)
            .send()
            .await
            .context("slidesgpt download request failed")?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(anyhow!("slidesgpt download http {status}: {text}").into());
        }

        let mut file = tokio::fs::File::create(output_path).await?;
        let mut stream = resp.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.context("reading download stream")?;
            file.write_all(&chunk).await?;
        }
        file.flush().await?;
        tracing::info!(presentation_id, path = %output_path.display(), "downloaded presentation");
        Ok(())
    }

    /// Complete club workflow: locate the stored record by club name,
    /// build the context prompt, generate, and download when an output
    /// path was requested.
    pub async fn generate_club_presentation(
        &self,
        data_dir: &Path,
        club_name: &str,
        topic: &str,
        options: &ClubWorkflowOptions,
    ) -> Result<serde_json::Value> {
        let club_path = club::find_club_file(data_dir, club_name)?;
        let record = club::load_club_record(&club_path)?;
        tracing::info!(
            club = %record.club_name,
            user = %record.user_name,
            role = %record.user_role,
            "loaded club record"
        );

        let prompt = prompts::club_prompt(&record, topic, options.week);
        let mut result = self.generate(&prompt, &options.theme, options.slides_count).await?;

        if let Some(output_path) = &options.output_path {
            if let Some(id) = result.get("presentation_id").and_then(|v| v.as_str()) {
                let id = id.to_string();
                self.download(&id, output_path).await?;
                if let Some(map) = result.as_object_mut() {
                    map.insert(
                        "downloaded_to".to_string(),
                        serde_json::Value::String(output_path.display().to_string()),
                    );
                }
            }
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn workflow_defaults_match_the_service_defaults() {
        let options = ClubWorkflowOptions::default();
        assert_eq!(options.theme, "modern");
        assert_eq!(options.slides_count, 10);
        assert!(options.week.is_none());
        assert!(options.output_path.is_none());
    }

    #[test]
    fn presentation_id_extraction_from_response_json() {
        let body: serde_json::Value =
            serde_json::from_str(r#"{"presentation_id": "abc-123", "slides": 10}"#).unwrap();
        assert_eq!(body.get("presentation_id").and_then(|v| v.as_str()), Some("abc-123"));
    }
}

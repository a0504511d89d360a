//! S3 helpers for persisting generated decks: public uploads, presigned
//! download URLs, and bucket CORS management.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use aws_config::{BehaviorVersion, Region};
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::{CorsConfiguration, CorsRule};

/// Public object URL in the virtual-hosted style.
pub fn public_url(bucket: &str, region: &str, key: &str) -> String {
    format!("https://{bucket}.s3.{region}.amazonaws.com/{key}")
}

/// Office Online viewer link for a publicly reachable presentation.
pub fn office_viewer_url(public_url: &str) -> String {
    format!(
        "https://view.officeapps.live.com/op/view.aspx?src={}",
        urlencoding::encode(public_url)
    )
}

pub struct Storage {
    client: aws_sdk_s3::Client,
    region: String,
}

impl Storage {
    /// Build a client from the ambient AWS credential chain
    /// (`AWS_ACCESS_KEY_ID` / `AWS_SECRET_ACCESS_KEY` or a profile).
    pub async fn from_env(region: &str) -> Self {
        let config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(region.to_string()))
            .load()
            .await;
        Self { client: aws_sdk_s3::Client::new(&config), region: region.to_string() }
    }

    /// Upload a local file and return its public URL.
    pub async fn upload_file(&self, path: &Path, bucket: &str, key: &str) -> Result<String> {
        let body = ByteStream::from_path(path)
            .await
            .with_context(|| format!("reading {}", path.display()))?;
        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .body(body)
            .content_type("application/vnd.openxmlformats-officedocument.presentationml.presentation")
            .send()
            .await
            .with_context(|| format!("uploading s3://{bucket}/{key}"))?;
        tracing::info!(bucket, key, "uploaded presentation");
        Ok(public_url(bucket, &self.region, key))
    }

    /// Time-limited GET URL for a stored object.
    pub async fn presigned_get_url(&self, bucket: &str, key: &str, expires: Duration) -> Result<String> {
        let presigned = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .presigned(PresigningConfig::expires_in(expires)?)
            .await
            .with_context(|| format!("presigning s3://{bucket}/{key}"))?;
        Ok(presigned.uri().to_string())
    }

    /// Apply the application CORS rule set: any header, the four
    /// browser-facing methods, the given origins, ETag and version id
    /// exposed, five-minute preflight cache.
    pub async fn put_cors(&self, bucket: &str, origins: &[String]) -> Result<()> {
        let rule = CorsRule::builder()
            .allowed_headers("*")
            .allowed_methods("GET")
            .allowed_methods("PUT")
            .allowed_methods("POST")
            .allowed_methods("DELETE")
            .set_allowed_origins(Some(origins.to_vec()))
            .expose_headers("ETag")
            .expose_headers("x-amz-version-id")
            .max_age_seconds(300)
            .build()
            .context("building CORS rule")?;
        let config = CorsConfiguration::builder()
            .cors_rules(rule)
            .build()
            .context("building CORS configuration")?;
        self.client
            .put_bucket_cors()
            .bucket(bucket)
            .cors_configuration(config)
            .send()
            .await
            .with_context(|| format!("applying CORS to {bucket}"))?;
        tracing::info!(bucket, origins = origins.len(), "applied bucket CORS");
        Ok(())
    }

    /// Read back the active CORS rules, for verification after setup.
    pub async fn get_cors(&self, bucket: &str) -> Result<Vec<CorsRule>> {
        let resp = self
            .client
            .get_bucket_cors()
            .bucket(bucket)
            .send()
            .await
            .with_context(|| format!("reading CORS for {bucket}"))?;
        Ok(resp.cors_rules().to_vec())
    }
}

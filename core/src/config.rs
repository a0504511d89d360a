use std::path::PathBuf;

use clubdeck_openrouter::DEFAULT_MODEL;

/// Environment-driven settings. CLI flags and request fields override
/// these per invocation; nothing here is required until the moment a
/// feature actually needs it.
#[derive(Debug, Clone)]
pub struct Config {
    pub openrouter_key: Option<String>,
    pub serpapi_key: Option<String>,
    pub slidesgpt_key: Option<String>,
    pub model: String,
    pub data_dir: PathBuf,
    pub bucket: Option<String>,
    pub region: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            openrouter_key: None,
            serpapi_key: None,
            slidesgpt_key: None,
            model: DEFAULT_MODEL.to_string(),
            data_dir: PathBuf::from("data/clubs"),
            bucket: None,
            region: "us-west-1".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(key) = std::env::var("OPENROUTER_API_KEY") {
            config.openrouter_key = Some(key);
        }
        if let Ok(key) = std::env::var("SERPAPI_KEY") {
            config.serpapi_key = Some(key);
        }
        if let Ok(key) = std::env::var("SLIDESGPT_API_KEY") {
            config.slidesgpt_key = Some(key);
        }
        if let Ok(model) = std::env::var("CLUBDECK_MODEL") {
            config.model = model;
        }
        if let Ok(dir) = std::env::var("CLUBDECK_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }
        if let Ok(bucket) = std::env::var("S3_BUCKET") {
            config.bucket = Some(bucket);
        }
        if let Ok(region) = std::env::var("AWS_REGION") {
            config.region = region;
        }

        config
    }
}

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("deck write failed: {0}")]
    Pptx(#[from] clubdeck_pptx::PptxError),

    #[error("club '{club}' not found under {dir}")]
    ClubNotFound { club: String, dir: PathBuf },

    #[error("missing API key: set {0}")]
    MissingKey(&'static str),

    #[error("unknown theme '{0}'")]
    UnknownTheme(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, CoreError>;

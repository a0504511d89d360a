use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};
use clubdeck_common::Theme;
use clubdeck_core::{ClubWorkflowOptions, Config, CoreError, DeckRequest, Generator, SlidesGptClient};
use clubdeck_openrouter::ChatClient;
use clubdeck_serpapi::ImageSearchClient;
use clubdeck_storage::{office_viewer_url, Storage};

#[derive(Parser)]
#[command(name = "clubdeck")]
#[command(about = "Generate and publish club presentation decks")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable debug output
    #[arg(long)]
    pub debug: bool,

    /// Override the chat model
    #[arg(long)]
    pub model: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate a weekly deck with the local pipeline
    Generate {
        /// Club type, e.g. "Coding Club"
        club_type: String,
        /// Topic for this week's session
        topic: String,
        /// Week number
        #[arg(short, long, default_value = "1")]
        week: u32,
        /// Visual theme
        #[arg(short, long, default_value = "modern")]
        theme: String,
        /// Output .pptx path
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Skip image search even when a key is configured
        #[arg(long)]
        no_images: bool,
    },
    /// Generate a deck for a stored club via the SlidesGPT API
    Club {
        /// Club name to look up in the data directory
        club: String,
        /// Presentation topic
        topic: String,
        /// Week number to mention in the prompt
        #[arg(short, long)]
        week: Option<u32>,
        /// Visual theme
        #[arg(short, long, default_value = "modern")]
        theme: String,
        /// Number of slides to request
        #[arg(short, long, default_value = "10")]
        slides: u32,
        /// Download the result to this path
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Override the club data directory
        #[arg(long)]
        data_dir: Option<PathBuf>,
    },
    /// Run the HTTP server
    Serve {
        /// Bind address
        #[arg(long, default_value = "0.0.0.0:8000")]
        addr: SocketAddr,
    },
    /// List the built-in themes
    Themes,
    /// Upload a deck to S3 and print its public and viewer URLs
    Upload {
        /// File to upload
        file: PathBuf,
        /// Object key; defaults to the file name
        #[arg(short, long)]
        key: Option<String>,
        /// Bucket; defaults to S3_BUCKET
        #[arg(short, long)]
        bucket: Option<String>,
        /// Region override
        #[arg(long)]
        region: Option<String>,
    },
    /// Print a presigned GET URL for an object
    Presign {
        /// Object key
        key: String,
        /// Bucket; defaults to S3_BUCKET
        #[arg(short, long)]
        bucket: Option<String>,
        /// Expiry in seconds
        #[arg(short, long, default_value = "3600")]
        expires: u64,
    },
    /// Apply a CORS rule set to a bucket and read it back
    SetupCors {
        /// Bucket; defaults to S3_BUCKET
        #[arg(short, long)]
        bucket: Option<String>,
        /// Allowed origins
        #[arg(short, long, default_values_t = [String::from("http://localhost:3000")])]
        origins: Vec<String>,
    },
}

pub async fn run_cli() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.debug);

    let mut config = Config::from_env();
    if let Some(model) = &cli.model {
        config.model = model.clone();
    }

    match cli.command {
        Commands::Generate { club_type, topic, week, theme, output, no_images } => {
            generate(&config, club_type, topic, week, &theme, output, no_images).await
        }
        Commands::Club { club, topic, week, theme, slides, output, data_dir } => {
            club_workflow(&config, club, topic, week, theme, slides, output, data_dir).await
        }
        Commands::Serve { addr } => clubdeck_server::serve(addr).await,
        Commands::Themes => {
            for name in Theme::names() {
                println!("{name}");
            }
            Ok(())
        }
        Commands::Upload { file, key, bucket, region } => {
            let bucket = require_bucket(&config, bucket)?;
            let region = region.unwrap_or_else(|| config.region.clone());
            let key = match key {
                Some(key) => key,
                None => file
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .ok_or_else(|| anyhow::anyhow!("cannot derive a key from {}", file.display()))?,
            };
            let storage = Storage::from_env(&region).await;
            let url = storage.upload_file(&file, &bucket, &key).await?;
            println!("{url}");
            println!("{}", office_viewer_url(&url));
            Ok(())
        }
        Commands::Presign { key, bucket, expires } => {
            let bucket = require_bucket(&config, bucket)?;
            let storage = Storage::from_env(&config.region).await;
            let url = storage
                .presigned_get_url(&bucket, &key, Duration::from_secs(expires))
                .await?;
            println!("{url}");
            Ok(())
        }
        Commands::SetupCors { bucket, origins } => {
            let bucket = require_bucket(&config, bucket)?;
            let storage = Storage::from_env(&config.region).await;
            storage.put_cors(&bucket, &origins).await?;
            let rules = storage.get_cors(&bucket).await?;
            println!("applied {} rule(s) to {bucket}", rules.len());
            Ok(())
        }
    }
}

fn init_tracing(debug: bool) {
    let default_level = if debug { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn require_bucket(config: &Config, flag: Option<String>) -> Result<String> {
    flag.or_else(|| config.bucket.clone())
        .ok_or_else(|| CoreError::MissingKey("S3_BUCKET").into())
}

async fn generate(
    config: &Config,
    club_type: String,
    topic: String,
    week: u32,
    theme_name: &str,
    output: Option<PathBuf>,
    no_images: bool,
) -> Result<()> {
    let theme = Theme::get(theme_name)
        .ok_or_else(|| CoreError::UnknownTheme(theme_name.to_string()))?;
    let openrouter_key = config
        .openrouter_key
        .clone()
        .ok_or(CoreError::MissingKey("OPENROUTER_API_KEY"))?;

    let images = if no_images {
        None
    } else {
        config.serpapi_key.clone().map(ImageSearchClient::new)
    };
    if images.is_none() {
        tracing::warn!("image search disabled; slides will be text only");
    }

    let out_path = output.unwrap_or_else(|| {
        PathBuf::from(clubdeck_server::download_filename(&club_type, week))
    });

    let chat = ChatClient::new(openrouter_key).with_model(&config.model);
    let generator = Generator::new(chat);
    let req = DeckRequest { club_type, topic, week };
    generator
        .generate_presentation(&req, theme, images.as_ref(), &out_path)
        .await?;
    println!("wrote {}", out_path.display());
    Ok(())
}

#[allow(clippy::too_many_arguments)]
async fn club_workflow(
    config: &Config,
    club: String,
    topic: String,
    week: Option<u32>,
    theme: String,
    slides: u32,
    output: Option<PathBuf>,
    data_dir: Option<PathBuf>,
) -> Result<()> {
    let api_key = config
        .slidesgpt_key
        .clone()
        .ok_or(CoreError::MissingKey("SLIDESGPT_API_KEY"))?;
    let data_dir = data_dir.unwrap_or_else(|| config.data_dir.clone());

    let client = SlidesGptClient::new(api_key);
    let options = ClubWorkflowOptions { theme, slides_count: slides, week, output_path: output };
    let result = client
        .generate_club_presentation(&data_dir, &club, &topic, &options)
        .await?;
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

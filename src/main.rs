use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    // Keys and bucket settings may live in a local .env during development.
    dotenv::dotenv().ok();
    clubdeck_cli::run_cli().await
}

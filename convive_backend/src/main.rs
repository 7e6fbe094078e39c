use anyhow::Result;
use clap::Parser;
use convive_backend::api;
use convive_backend::bootstrap;
use convive_backend::config::ConviveConfig;
use convive_backend::telemetry;
use convive_backend::utils;

#[derive(Parser)]
#[command(author, version, about = "Convive social network backend")]
struct Args {
    /// Port for the HTTP API, overriding CONVIVE_API_PORT.
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    telemetry::init_tracing();

    let args = Args::parse();

    let mut config = ConviveConfig::from_env()?;
    if let Some(port) = args.port {
        config.api_port = port;
    }

    let resources = bootstrap::initialize(&config).await?;
    tracing::info!(
        app = utils::APP_NAME,
        directories_created = ?resources.directories_created,
        database_initialized = resources.database_initialized,
        "bootstrap complete"
    );

    api::serve_http(config, resources.database).await
}

//! Runs a single lookup against the configured upstreams and prints the
//! merged response. Useful for checking provider changes without a browser.

use std::sync::Arc;

use city_lookup_service::catalog::SongCatalog;
use city_lookup_service::config::UpstreamConfig;
use city_lookup_service::sources::UpstreamClient;
use city_lookup_service::{LookupParams, LookupRequest, LookupService};
use clap::Parser;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(name = "probe-lookup")]
#[command(about = "Look up one city from the command line")]
struct Args {
    /// City to look up
    city: String,

    /// happy, sad or angry
    #[arg(short, long)]
    mood: Option<String>,

    #[command(flatten)]
    upstream: UpstreamConfig,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let args = Args::parse();
    let request = LookupRequest::try_from(LookupParams {
        city: Some(args.city),
        mood: args.mood,
    })?;

    let catalog = Arc::new(SongCatalog::embedded()?);
    let service = LookupService::new(UpstreamClient::new(args.upstream)?, catalog);

    info!("Looking up {:?}", request.city);
    match service.lookup(&request).await {
        Ok(response) => {
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        Err(e) => {
            error!("Lookup failed: {}", e);
            std::process::exit(1);
        }
    }

    Ok(())
}

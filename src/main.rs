//! mmw-client: command-line driver for the watershed client data layer
//!
//! Runs one fetch against the configured services and prints it as JSON.

use anyhow::{bail, Result};
use mmw_client::{
    analyze::{AnalyzeParams, AnalyzeService},
    compare::CompareConfig,
    config::{self, Settings},
    FetchOptions, HttpClient, LocationResolver, SuggestionAggregator,
};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(command) = args.first().map(String::as_str) else {
        print_usage();
        return Ok(());
    };
    if matches!(command, "-h" | "--help") {
        print_usage();
        return Ok(());
    }
    if matches!(command, "-V" | "--version") {
        println!("mmw-client {}", mmw_client::VERSION);
        return Ok(());
    }

    // Load configuration
    let settings = config::load()?;

    // Initialize logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level(&settings)));
    FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    info!("Starting mmw-client v{}", mmw_client::VERSION);

    let client = HttpClient::with_settings(&settings.outgoing)?;
    let query = args[1..].join(" ");
    let options = FetchOptions::new();

    match command {
        "suggest" => {
            let query = require_query(&query)?;
            let aggregator = SuggestionAggregator::new(client, &settings)?;
            let suggestions = aggregator.fetch(query, &options).await?;
            print_json(&suggestions)
        }
        "locate" => {
            let query = require_query(&query)?;
            let aggregator = SuggestionAggregator::new(client.clone(), &settings)?;
            let resolver = LocationResolver::from_settings(client, &settings)?;

            let suggestions = aggregator.fetch(query, &options).await?;
            let Some(first) = suggestions.get(0) else {
                bail!("No suggestions for '{}'", query);
            };
            let mut record = first.clone();
            info!("Selecting '{}'", record.text);
            let update = resolver.locate(&mut record, None, &options).await?;
            print_json(&update)
        }
        "layers" => {
            let service = AnalyzeService::from_settings(client, &settings)?;
            let mut params = AnalyzeParams::default();
            if !query.trim().is_empty() {
                params.place = query.trim().to_string();
            }
            let layers = service.fetch_layers(&params, &options).await?;
            print_json(&layers)
        }
        "charts" => print_json(&CompareConfig::new()),
        other => {
            print_usage();
            bail!("Unknown command: {}", other)
        }
    }
}

fn log_level(settings: &Settings) -> String {
    if settings.general.debug {
        "debug".to_string()
    } else {
        settings.general.log_level.clone()
    }
}

fn require_query(query: &str) -> Result<&str> {
    if query.trim().is_empty() {
        bail!("A query is required");
    }
    Ok(query)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Print usage information
fn print_usage() {
    println!(
        r#"
mmw-client v{}
Client data layer for the watershed-analysis application

USAGE:
    mmw-client <COMMAND> [QUERY]

COMMANDS:
    suggest <QUERY>    Merged geocoder and boundary-layer suggestions
    locate <QUERY>     Map position of the first suggestion
    layers [PLACE]     Analysis layers for an area of interest (default Philadelphia)
    charts             Comparison view chart configuration

OPTIONS:
    -h, --help         Print help information
    -V, --version      Print version information

ENVIRONMENT VARIABLES:
    MMW_SETTINGS_PATH    Path to settings.yml
    MMW_DEBUG            Enable debug logging (true/false)
    MMW_LOG_LEVEL        Log filter when RUST_LOG is unset
    MMW_API_BASE_URL     Application server base URL
    MMW_GEOCODER_URL     Geocoder suggest endpoint
    MMW_REQUEST_TIMEOUT  Request timeout in seconds
"#,
        mmw_client::VERSION
    );
}

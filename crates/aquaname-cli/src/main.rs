mod city;
mod input;
mod water;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use aquaname_places::{PlacesClient, PlacesConfig};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::city::{run_validate_city, ValidateCityOptions};
use crate::water::{run_water_names, WaterNamesOptions};

#[derive(Debug, Parser)]
#[command(name = "aquaname")]
#[command(about = "Look up named water features near CSV coordinates")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Resolve nearby water features for each row and append NDJSON records
    WaterNames {
        /// CSV with `Lat`, `Lon` and optional `google_name` columns
        #[arg(long)]
        input: PathBuf,
        /// NDJSON file to append to
        #[arg(long)]
        output: PathBuf,
        /// Search radius in metres (defaults to `AQUANAME_SEARCH_RADIUS_M`)
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        radius: Option<u32>,
        /// Skip rows whose `row_number` is already in the output
        #[arg(long)]
        resume: bool,
        /// Only process the first N rows
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Reverse-geocode each row and check its `City` column
    ValidateCity {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        output: PathBuf,
        /// Pause after this many rows (0 disables pausing)
        #[arg(long, default_value_t = 10)]
        pause_every: usize,
        #[arg(long, default_value_t = 100)]
        pause_ms: u64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    dotenvy::dotenv().ok();
    let config = aquaname_core::load_app_config_from_env()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let client = PlacesClient::new(PlacesConfig::from_app_config(&config))
        .context("failed to build places client")?;

    match cli.command {
        Commands::WaterNames {
            input,
            output,
            radius,
            resume,
            limit,
        } => {
            let opts = WaterNamesOptions {
                input,
                output,
                radius_m: radius.unwrap_or(config.search_radius_m),
                resume,
                limit,
            };
            let summary = run_water_names(&client, &opts).await?;
            println!(
                "water-names: {} written ({} with matches), {} already done, {} invalid",
                summary.written, summary.with_matches, summary.already_done, summary.invalid
            );
        }
        Commands::ValidateCity {
            input,
            output,
            pause_every,
            pause_ms,
        } => {
            let opts = ValidateCityOptions {
                input,
                output,
                pause_every,
                pause: Duration::from_millis(pause_ms),
            };
            let summary = run_validate_city(&client, &opts).await?;
            println!(
                "validate-city: {} rows, {} valid, {} unknown",
                summary.rows, summary.valid, summary.unknown
            );
        }
    }

    Ok(())
}

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use client_core::{config, Geocoder, HttpGeocoder, HttpOptionSource, OptionSource};
use shared::domain::{OptionId, SelectOption};
use tracing_subscriber::EnvFilter;

/// Calls the countries and geocoding APIs with the same settings as the GUI.
#[derive(Parser, Debug)]
struct Args {
    #[arg(long)]
    settings: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Countries,
    States { country_id: i64 },
    Geocode { address: String },
}

fn print_options(options: &[SelectOption]) {
    for option in options {
        println!("{}\t{}", option.id, option.label);
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();
    tracing::debug!(?args, "probe starting");

    let settings = match &args.settings {
        Some(path) => config::load_settings_from(path)?,
        None => config::load_settings()?,
    };

    match args.command {
        Command::Countries => {
            let source = HttpOptionSource::new(&settings)?;
            print_options(&source.fetch_countries().await?);
        }
        Command::States { country_id } => {
            let source = HttpOptionSource::new(&settings)?;
            let states = source
                .fetch_states_for_country(OptionId(country_id))
                .await
                .with_context(|| format!("country {country_id}"))?;
            print_options(&states);
        }
        Command::Geocode { address } => {
            let Some(geocoder) = HttpGeocoder::from_settings(&settings)? else {
                bail!("geocoding needs maps_api_key (or MAPS_API_KEY) to be set");
            };
            let location = geocoder.geocode(&address).await?;
            println!("{location}");
        }
    }

    Ok(())
}

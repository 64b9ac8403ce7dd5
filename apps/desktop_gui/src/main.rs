use std::{path::PathBuf, sync::Arc};

mod backend_bridge;
mod controller;
mod ui;

use anyhow::{anyhow, Context};
use backend_bridge::{
    commands::BackendCommand,
    runtime::{self, BackendServices},
};
use clap::Parser;
use client_core::{
    config::{self, ClientSettings},
    DisabledGeocoder, Geocoder, HttpGeocoder, HttpOptionSource,
};
use controller::{events::UiEvent, reducer::Capability};
use crossbeam_channel::bounded;
use eframe::egui;
use tracing_subscriber::EnvFilter;
use ui::{DesktopGuiApp, APP_TITLE};

#[derive(Parser, Debug)]
#[command(name = "ultimate-dropdown", about = "Pick a country and one of its states")]
struct Args {
    /// Overrides `api_base_url` from settings and environment.
    #[arg(long)]
    api_base_url: Option<String>,
    #[arg(long)]
    api_key: Option<String>,
    /// Settings file (default: ./ultimate_dropdown.toml).
    #[arg(long)]
    settings: Option<PathBuf>,
    /// Skip geocoding and the map panel even when a maps key is configured.
    #[arg(long)]
    no_map: bool,
}

fn resolve_settings(args: &Args) -> anyhow::Result<ClientSettings> {
    let mut settings = match &args.settings {
        Some(path) => config::load_settings_from(path)?,
        None => config::load_settings()?,
    };
    if let Some(api_base_url) = &args.api_base_url {
        settings.api_base_url = api_base_url.clone();
    }
    if let Some(api_key) = &args.api_key {
        settings.api_key = api_key.clone();
    }
    settings.validated()
}

fn capability_for(settings: &ClientSettings, no_map: bool) -> Capability {
    if !no_map && settings.geocoding_available() {
        Capability::WithMap
    } else {
        Capability::SelectionOnly
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let settings = resolve_settings(&args).context("failed to load settings")?;
    let capability = capability_for(&settings, args.no_map);
    tracing::info!(
        api_base_url = %settings.api_base_url,
        ?capability,
        "starting desktop gui"
    );

    let geocoder: Arc<dyn Geocoder> = match capability {
        Capability::WithMap => match HttpGeocoder::from_settings(&settings)? {
            Some(geocoder) => Arc::new(geocoder),
            None => Arc::new(DisabledGeocoder),
        },
        Capability::SelectionOnly => Arc::new(DisabledGeocoder),
    };
    let services = BackendServices {
        options: Arc::new(HttpOptionSource::new(&settings)?),
        geocoder,
    };

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(256);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(2048);
    runtime::launch(cmd_rx, ui_tx, services).context("failed to spawn backend worker")?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(APP_TITLE)
            .with_inner_size([960.0, 720.0])
            .with_min_inner_size([640.0, 480.0]),
        ..Default::default()
    };
    eframe::run_native(
        APP_TITLE,
        options,
        Box::new(move |_cc| Ok(Box::new(DesktopGuiApp::new(cmd_tx, ui_rx, capability)))),
    )
    .map_err(|err| anyhow!("desktop gui exited with error: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_capability_needs_key_and_no_opt_out() {
        let with_key = ClientSettings {
            maps_api_key: Some("maps-key".to_string()),
            ..ClientSettings::default()
        };

        assert_eq!(capability_for(&with_key, false), Capability::WithMap);
        assert_eq!(capability_for(&with_key, true), Capability::SelectionOnly);
        assert_eq!(
            capability_for(&ClientSettings::default(), false),
            Capability::SelectionOnly
        );
    }

    #[test]
    fn cli_flags_override_settings() {
        let args = Args::parse_from([
            "ultimate-dropdown",
            "--api-base-url",
            "https://countries.example.com/",
            "--api-key",
            "cli-key",
            "--settings",
            "does/not/exist.toml",
            "--no-map",
        ]);

        let settings = resolve_settings(&args).expect("settings");
        assert_eq!(settings.api_base_url, "https://countries.example.com");
        assert_eq!(settings.api_key, "cli-key");
        assert!(args.no_map);
    }
}

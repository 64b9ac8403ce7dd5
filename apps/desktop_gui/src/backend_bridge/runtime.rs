//! Runtime bridge between UI command queue and backend event intake.

use std::{sync::Arc, thread};

use client_core::{Geocoder, OptionSource};
use crossbeam_channel::{Receiver, Sender};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

#[derive(Clone)]
pub struct BackendServices {
    pub options: Arc<dyn OptionSource>,
    pub geocoder: Arc<dyn Geocoder>,
}

/// Spawns the backend worker thread.
///
/// Each command runs as its own task, so a slow states request never holds
/// back a later one; results carry the tags they were issued with. The worker
/// exits once every command sender is dropped, and results that arrive after
/// the UI receiver is gone are discarded.
pub fn launch(
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
    services: BackendServices,
) -> std::io::Result<thread::JoinHandle<()>> {
    thread::Builder::new()
        .name("backend-worker".to_string())
        .spawn(move || {
            let runtime = match tokio::runtime::Builder::new_multi_thread()
                .worker_threads(2)
                .enable_all()
                .build()
            {
                Ok(runtime) => runtime,
                Err(err) => {
                    let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                        UiErrorContext::BackendStartup,
                        format!("backend worker startup failure: failed to build runtime: {err}"),
                    )));
                    tracing::error!("failed to build backend runtime: {err}");
                    return;
                }
            };

            runtime.block_on(async move {
                let _ = ui_tx.try_send(UiEvent::Info("Backend worker ready".to_string()));

                while let Ok(cmd) = cmd_rx.recv() {
                    let services = services.clone();
                    let ui_tx = ui_tx.clone();
                    tokio::spawn(async move {
                        let cmd_name = cmd.name();
                        let event = execute(&services, cmd).await;
                        if ui_tx.try_send(event).is_err() {
                            tracing::debug!(
                                command = cmd_name,
                                "ui event receiver unavailable; dropping backend result"
                            );
                        }
                    });
                }

                tracing::debug!("command queue closed; backend worker exiting");
            });
        })
}

pub async fn execute(services: &BackendServices, cmd: BackendCommand) -> UiEvent {
    match cmd {
        BackendCommand::LoadCountries => {
            let result = services.options.fetch_countries().await;
            match &result {
                Ok(countries) => tracing::info!(count = countries.len(), "loaded countries"),
                Err(err) => tracing::error!("failed to load countries: {err}"),
            }
            UiEvent::CountriesLoaded(result)
        }
        BackendCommand::FetchStates {
            country_id,
            generation,
        } => {
            let result = services.options.fetch_states_for_country(country_id).await;
            match &result {
                Ok(states) => tracing::info!(
                    country_id = country_id.0,
                    generation,
                    count = states.len(),
                    "loaded states"
                ),
                Err(err) => tracing::warn!(
                    country_id = country_id.0,
                    generation,
                    "failed to fetch states: {err}"
                ),
            }
            UiEvent::StatesLoaded {
                country_id,
                generation,
                result,
            }
        }
        BackendCommand::Geocode {
            address,
            generation,
        } => {
            let result = services.geocoder.geocode(&address).await;
            if let Err(err) = &result {
                tracing::warn!(%address, generation, "failed to fetch location: {err}");
            }
            UiEvent::LocationResolved { generation, result }
        }
    }
}

#[cfg(test)]
#[path = "tests/runtime_tests.rs"]
mod tests;

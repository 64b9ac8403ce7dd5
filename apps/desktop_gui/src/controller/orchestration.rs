//! Command orchestration helpers from reducer effects to backend command queue.

use crossbeam_channel::{Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::reducer::{ControllerError, SelectionEffect};

/// Returns whether the command was queued; on failure `status` explains why.
pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
    status: &mut String,
) -> bool {
    let cmd_name = cmd.name();

    match cmd_tx.try_send(cmd) {
        Ok(()) => {
            tracing::debug!(command = cmd_name, "queued ui->backend command");
            true
        }
        Err(TrySendError::Full(_)) => {
            *status = "UI command queue is full; please retry".to_string();
            tracing::warn!(command = cmd_name, "ui->backend command queue is full");
            false
        }
        Err(TrySendError::Disconnected(_)) => {
            *status = "Backend command processor disconnected; restart the app".to_string();
            tracing::error!(command = cmd_name, "ui->backend command queue disconnected");
            false
        }
    }
}

/// Queues I/O effects and hands back the errors the UI should surface.
pub fn run_effects(
    cmd_tx: &Sender<BackendCommand>,
    effects: Vec<SelectionEffect>,
    status: &mut String,
) -> Vec<ControllerError> {
    let mut reported = Vec::new();

    for effect in effects {
        match effect {
            SelectionEffect::FetchStates {
                country_id,
                generation,
            } => {
                dispatch_backend_command(
                    cmd_tx,
                    BackendCommand::FetchStates {
                        country_id,
                        generation,
                    },
                    status,
                );
            }
            SelectionEffect::Geocode {
                address,
                generation,
            } => {
                dispatch_backend_command(
                    cmd_tx,
                    BackendCommand::Geocode {
                        address,
                        generation,
                    },
                    status,
                );
            }
            SelectionEffect::Report(err) => {
                tracing::warn!("selection error: {err}");
                reported.push(err);
            }
        }
    }

    reported
}

#[cfg(test)]
mod tests {
    use client_core::GeocodeError;
    use crossbeam_channel::bounded;
    use shared::domain::OptionId;

    use super::*;

    #[test]
    fn io_effects_become_commands_and_reports_are_returned() {
        let (cmd_tx, cmd_rx) = bounded(8);
        let mut status = String::new();
        let report = ControllerError::Geocode(GeocodeError::NotConfigured);

        let reported = run_effects(
            &cmd_tx,
            vec![
                SelectionEffect::FetchStates {
                    country_id: OptionId(2),
                    generation: 4,
                },
                SelectionEffect::Report(report.clone()),
                SelectionEffect::Geocode {
                    address: "Victoria, Australia".to_string(),
                    generation: 9,
                },
            ],
            &mut status,
        );

        assert_eq!(reported, vec![report]);
        assert_eq!(
            cmd_rx.try_iter().collect::<Vec<_>>(),
            vec![
                BackendCommand::FetchStates {
                    country_id: OptionId(2),
                    generation: 4,
                },
                BackendCommand::Geocode {
                    address: "Victoria, Australia".to_string(),
                    generation: 9,
                },
            ]
        );
        assert!(status.is_empty());
    }

    #[test]
    fn full_and_disconnected_queues_set_status() {
        let (cmd_tx, cmd_rx) = bounded(1);
        let mut status = String::new();

        assert!(dispatch_backend_command(&cmd_tx, BackendCommand::LoadCountries, &mut status));
        assert!(!dispatch_backend_command(&cmd_tx, BackendCommand::LoadCountries, &mut status));
        assert_eq!(status, "UI command queue is full; please retry");

        drop(cmd_rx);
        assert!(!dispatch_backend_command(&cmd_tx, BackendCommand::LoadCountries, &mut status));
        assert!(status.contains("disconnected"));
    }
}

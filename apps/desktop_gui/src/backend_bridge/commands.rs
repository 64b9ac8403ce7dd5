//! Backend commands queued from UI to backend worker.

use shared::domain::OptionId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCommand {
    LoadCountries,
    FetchStates {
        country_id: OptionId,
        generation: u64,
    },
    Geocode {
        address: String,
        generation: u64,
    },
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::LoadCountries => "load_countries",
            BackendCommand::FetchStates { .. } => "fetch_states",
            BackendCommand::Geocode { .. } => "geocode",
        }
    }
}

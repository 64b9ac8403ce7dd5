//! Linked country/state selection as a pure reducer.
//!
//! `SelectionState::reduce` never performs I/O. It returns the next state and
//! the side effects the caller must run; async results come back in as
//! actions tagged with the generation they were issued under, and anything
//! whose generation is no longer current is dropped.
//!
//! `SelectState` with an option that is not in the loaded state list is a
//! no-op: the selection, the summary and `is_dirty` are all left as they were.

use client_core::{FetchError, GeocodeError};
use shared::domain::{Coordinates, Country, CountryState, OptionId};
use thiserror::Error;

pub const SUMMARY_PREFIX: &str = "Your desired location: ";

/// Whether a submit also geocodes the selection for the map panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Capability {
    #[default]
    SelectionOnly,
    WithMap,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionPhase {
    Empty,
    Loading,
    Dirty,
    Confirmed,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ControllerError {
    #[error("{0}")]
    States(FetchError),
    #[error("{0}")]
    Geocode(GeocodeError),
}

#[derive(Debug)]
pub enum SelectionAction {
    SelectCountry(Country),
    StatesLoaded {
        country_id: OptionId,
        generation: u64,
        result: Result<Vec<CountryState>, FetchError>,
    },
    SelectState(CountryState),
    Submit,
    LocationResolved {
        generation: u64,
        result: Result<Coordinates, GeocodeError>,
    },
    Reset,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SelectionEffect {
    FetchStates { country_id: OptionId, generation: u64 },
    Geocode { address: String, generation: u64 },
    Report(ControllerError),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub state: SelectionState,
    pub effects: Vec<SelectionEffect>,
}

impl Transition {
    fn quiet(state: SelectionState) -> Self {
        Self {
            state,
            effects: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SelectionState {
    capability: Capability,
    selected_country: Option<Country>,
    selected_state: Option<CountryState>,
    available_states: Vec<CountryState>,
    is_loading_states: bool,
    is_dirty: bool,
    confirmed_summary: Option<String>,
    resolved_location: Option<Coordinates>,
    states_generation: u64,
    confirmation_generation: u64,
}

impl SelectionState {
    pub fn new(capability: Capability) -> Self {
        Self {
            capability,
            ..Self::default()
        }
    }

    pub fn capability(&self) -> Capability {
        self.capability
    }

    pub fn selected_country(&self) -> Option<&Country> {
        self.selected_country.as_ref()
    }

    pub fn selected_state(&self) -> Option<&CountryState> {
        self.selected_state.as_ref()
    }

    pub fn available_states(&self) -> &[CountryState] {
        &self.available_states
    }

    pub fn is_loading_states(&self) -> bool {
        self.is_loading_states
    }

    pub fn is_dirty(&self) -> bool {
        self.is_dirty
    }

    pub fn confirmed_summary(&self) -> Option<&str> {
        self.confirmed_summary.as_deref()
    }

    pub fn resolved_location(&self) -> Option<Coordinates> {
        self.resolved_location
    }

    pub fn states_generation(&self) -> u64 {
        self.states_generation
    }

    pub fn confirmation_generation(&self) -> u64 {
        self.confirmation_generation
    }

    pub fn can_submit(&self) -> bool {
        self.selected_country.is_some() && self.is_dirty
    }

    pub fn phase(&self) -> SelectionPhase {
        if self.selected_country.is_none() {
            SelectionPhase::Empty
        } else if self.is_loading_states {
            SelectionPhase::Loading
        } else if self.is_dirty {
            SelectionPhase::Dirty
        } else {
            SelectionPhase::Confirmed
        }
    }

    pub fn reduce(&self, action: SelectionAction) -> Transition {
        match action {
            SelectionAction::SelectCountry(country) => self.select_country(country),
            SelectionAction::StatesLoaded {
                country_id,
                generation,
                result,
            } => self.states_loaded(country_id, generation, result),
            SelectionAction::SelectState(state) => self.select_state(state),
            SelectionAction::Submit => self.submit(),
            SelectionAction::LocationResolved { generation, result } => {
                self.location_resolved(generation, result)
            }
            SelectionAction::Reset => Transition::quiet(self.reset()),
        }
    }

    fn select_country(&self, country: Country) -> Transition {
        let generation = self.states_generation + 1;
        let country_id = country.id;
        let state = Self {
            capability: self.capability,
            selected_country: Some(country),
            selected_state: None,
            available_states: Vec::new(),
            is_loading_states: true,
            is_dirty: true,
            confirmed_summary: None,
            resolved_location: None,
            states_generation: generation,
            confirmation_generation: self.confirmation_generation + 1,
        };

        Transition {
            state,
            effects: vec![SelectionEffect::FetchStates {
                country_id,
                generation,
            }],
        }
    }

    fn states_loaded(
        &self,
        country_id: OptionId,
        generation: u64,
        result: Result<Vec<CountryState>, FetchError>,
    ) -> Transition {
        let current_country = self.selected_country.as_ref().map(|country| country.id);
        if generation != self.states_generation || current_country != Some(country_id) {
            tracing::debug!(
                country_id = country_id.0,
                generation,
                current_generation = self.states_generation,
                "dropping stale states response"
            );
            return Transition::quiet(self.clone());
        }

        let mut state = self.clone();
        state.is_loading_states = false;
        match result {
            Ok(states) => {
                state.available_states = states;
                Transition::quiet(state)
            }
            Err(err) => {
                state.available_states = Vec::new();
                Transition {
                    state,
                    effects: vec![SelectionEffect::Report(ControllerError::States(err))],
                }
            }
        }
    }

    fn select_state(&self, country_state: CountryState) -> Transition {
        if !self.available_states.contains(&country_state) {
            tracing::debug!(
                state_id = country_state.id.0,
                "ignoring state that is not in the loaded list"
            );
            return Transition::quiet(self.clone());
        }

        let mut state = self.clone();
        state.selected_state = Some(country_state);
        state.confirmed_summary = None;
        state.resolved_location = None;
        state.is_dirty = true;
        state.confirmation_generation += 1;
        Transition::quiet(state)
    }

    fn submit(&self) -> Transition {
        let Some(country) = self.selected_country.as_ref().filter(|_| self.is_dirty) else {
            return Transition::quiet(self.clone());
        };

        let mut state = self.clone();
        state.confirmed_summary = Some(summary_text(country, self.selected_state.as_ref()));
        state.is_dirty = false;
        state.confirmation_generation += 1;

        let mut effects = Vec::new();
        if self.capability == Capability::WithMap {
            effects.push(SelectionEffect::Geocode {
                address: geocode_address(country, self.selected_state.as_ref()),
                generation: state.confirmation_generation,
            });
        }

        Transition { state, effects }
    }

    fn location_resolved(
        &self,
        generation: u64,
        result: Result<Coordinates, GeocodeError>,
    ) -> Transition {
        if generation != self.confirmation_generation {
            tracing::debug!(
                generation,
                current_generation = self.confirmation_generation,
                "dropping stale geocode response"
            );
            return Transition::quiet(self.clone());
        }

        match result {
            Ok(location) => {
                let mut state = self.clone();
                state.resolved_location = Some(location);
                Transition::quiet(state)
            }
            Err(err) => Transition {
                state: self.clone(),
                effects: vec![SelectionEffect::Report(ControllerError::Geocode(err))],
            },
        }
    }

    /// Generations carry over so responses issued before the reset stay stale.
    fn reset(&self) -> Self {
        Self {
            capability: self.capability,
            states_generation: self.states_generation + 1,
            confirmation_generation: self.confirmation_generation + 1,
            ..Self::default()
        }
    }
}

pub fn summary_text(country: &Country, state: Option<&CountryState>) -> String {
    match state {
        Some(state) => format!("{SUMMARY_PREFIX}{}, {}", country.label, state.label),
        None => format!("{SUMMARY_PREFIX}{}", country.label),
    }
}

pub fn geocode_address(country: &Country, state: Option<&CountryState>) -> String {
    match state {
        Some(state) => format!("{}, {}", state.label, country.label),
        None => country.label.clone(),
    }
}

#[cfg(test)]
#[path = "tests/reducer_tests.rs"]
mod tests;

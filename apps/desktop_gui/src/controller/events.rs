//! Backend-to-UI events and error modeling for the desktop GUI controller.

use client_core::{FetchError, GeocodeError};
use shared::domain::{Coordinates, Country, CountryState, OptionId};

use crate::controller::reducer::ControllerError;

pub enum UiEvent {
    Info(String),
    CountriesLoaded(Result<Vec<Country>, FetchError>),
    StatesLoaded {
        country_id: OptionId,
        generation: u64,
        result: Result<Vec<CountryState>, FetchError>,
    },
    LocationResolved {
        generation: u64,
        result: Result<Coordinates, GeocodeError>,
    },
    Error(UiError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Auth,
    Transport,
    Validation,
    NotFound,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    LoadCountries,
    LoadStates,
    Geocode,
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        let message_lower = message.to_ascii_lowercase();
        let category = if message_lower.contains("401")
            || message_lower.contains("403")
            || message_lower.contains("unauthorized")
            || message_lower.contains("forbidden")
            || message_lower.contains("api key")
        {
            UiErrorCategory::Auth
        } else if message_lower.contains("invalid")
            || message_lower.contains("malformed")
            || message_lower.contains("format")
        {
            UiErrorCategory::Validation
        } else if message_lower.contains("not found") || message_lower.contains("no location") {
            UiErrorCategory::NotFound
        } else if message_lower.contains("timeout")
            || message_lower.contains("timed out")
            || message_lower.contains("connect")
            || message_lower.contains("error sending request")
            || message_lower.contains("network")
            || message_lower.contains("unavailable")
            || message_lower.contains("disconnect")
        {
            UiErrorCategory::Transport
        } else {
            UiErrorCategory::Unknown
        };

        Self {
            category,
            context,
            message,
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<&ControllerError> for UiError {
    fn from(value: &ControllerError) -> Self {
        let context = match value {
            ControllerError::States(_) => UiErrorContext::LoadStates,
            ControllerError::Geocode(_) => UiErrorContext::Geocode,
        };
        UiError::from_message(context, value.to_string())
    }
}

pub fn err_label(category: UiErrorCategory) -> &'static str {
    match category {
        UiErrorCategory::Auth => "Authentication",
        UiErrorCategory::Transport => "Network",
        UiErrorCategory::Validation => "Unexpected response",
        UiErrorCategory::NotFound => "Not found",
        UiErrorCategory::Unknown => "Unexpected",
    }
}

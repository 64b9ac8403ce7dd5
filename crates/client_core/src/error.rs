use std::fmt;

use shared::domain::OptionId;
use thiserror::Error;

/// Which option list a request was reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionResource {
    Countries,
    States { country_id: OptionId },
}

impl OptionResource {
    fn kind(self) -> &'static str {
        match self {
            OptionResource::Countries => "countries",
            OptionResource::States { .. } => "states",
        }
    }
}

impl fmt::Display for OptionResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionResource::Countries => write!(f, "countries"),
            OptionResource::States { country_id } => {
                write!(f, "states for country {country_id}")
            }
        }
    }
}

/// Failure reading an option list: network, non-success status, or a body
/// that does not match `[{id: number, value: string}]`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("Failed to fetch {resource}: {message}")]
    Transport {
        resource: OptionResource,
        message: String,
    },
    #[error("Failed to fetch {resource}: {reason}")]
    Status {
        resource: OptionResource,
        status: u16,
        reason: String,
    },
    #[error("Invalid {} response format: {detail}", .resource.kind())]
    InvalidResponse {
        resource: OptionResource,
        detail: String,
    },
}

impl FetchError {
    pub fn resource(&self) -> OptionResource {
        match self {
            FetchError::Transport { resource, .. }
            | FetchError::Status { resource, .. }
            | FetchError::InvalidResponse { resource, .. } => *resource,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeocodeError {
    #[error("Failed to fetch location: {0}")]
    Transport(String),
    #[error("Geocoding service returned {status}: {reason}")]
    Status { status: u16, reason: String },
    #[error("Invalid geocoding response format: {0}")]
    InvalidResponse(String),
    #[error("No location found for '{address}'")]
    NoMatch { address: String },
    #[error("Geocoding is not configured")]
    NotConfigured,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_message_names_country_and_reason() {
        let err = FetchError::Status {
            resource: OptionResource::States {
                country_id: OptionId(36),
            },
            status: 403,
            reason: "Forbidden".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Failed to fetch states for country 36: Forbidden"
        );
    }

    #[test]
    fn invalid_response_message_uses_resource_kind() {
        let err = FetchError::InvalidResponse {
            resource: OptionResource::Countries,
            detail: "$: expected array".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid countries response format: $: expected array"
        );
        assert_eq!(err.resource(), OptionResource::Countries);
    }
}

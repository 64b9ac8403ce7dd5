use async_trait::async_trait;
use shared::domain::{Coordinates, Country, CountryState, OptionId};

pub mod config;
pub mod error;
mod geocoder;
mod option_source;

pub use config::{load_settings, ClientSettings};
pub use error::{FetchError, GeocodeError, OptionResource};
pub use geocoder::HttpGeocoder;
pub use option_source::HttpOptionSource;

pub const API_KEY_HEADER: &str = "X-API-Key";

/// Read-only supplier of selectable countries and their states.
///
/// Both calls are idempotent and are never retried by the caller.
#[async_trait]
pub trait OptionSource: Send + Sync {
    async fn fetch_countries(&self) -> Result<Vec<Country>, FetchError>;
    async fn fetch_states_for_country(
        &self,
        country_id: OptionId,
    ) -> Result<Vec<CountryState>, FetchError>;
}

/// Text-address lookup; implementations return the first match only.
#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn geocode(&self, address: &str) -> Result<Coordinates, GeocodeError>;
}

/// Stand-in used when the map capability is off.
pub struct DisabledGeocoder;

#[async_trait]
impl Geocoder for DisabledGeocoder {
    async fn geocode(&self, _address: &str) -> Result<Coordinates, GeocodeError> {
        Err(GeocodeError::NotConfigured)
    }
}

fn build_http_client(settings: &ClientSettings) -> anyhow::Result<reqwest::Client> {
    use anyhow::Context;

    reqwest::Client::builder()
        .timeout(settings.request_timeout())
        .build()
        .context("failed to build http client")
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;

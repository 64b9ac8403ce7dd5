use async_trait::async_trait;
use reqwest::Client;
use shared::{domain::Coordinates, protocol::GeocodeResponse};
use tracing::{debug, warn};

use crate::{build_http_client, ClientSettings, GeocodeError, Geocoder};

pub struct HttpGeocoder {
    http: Client,
    endpoint: String,
    api_key: String,
}

impl HttpGeocoder {
    /// Returns `Ok(None)` when no maps key is configured.
    pub fn from_settings(settings: &ClientSettings) -> anyhow::Result<Option<Self>> {
        if !settings.geocoding_available() {
            return Ok(None);
        }
        let api_key = settings.maps_api_key.clone().unwrap_or_default();
        Ok(Some(Self::with_client(
            build_http_client(settings)?,
            settings.geocode_base_url.clone(),
            api_key,
        )))
    }

    pub fn with_client(http: Client, endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http,
            endpoint: endpoint.into(),
            api_key: api_key.into(),
        }
    }
}

#[async_trait]
impl Geocoder for HttpGeocoder {
    async fn geocode(&self, address: &str) -> Result<Coordinates, GeocodeError> {
        debug!(address, "geocoding address");

        let response = self
            .http
            .get(&self.endpoint)
            .query(&[("address", address), ("key", self.api_key.as_str())])
            .send()
            .await
            .map_err(|err| {
                warn!(address, "geocode request failed: {err}");
                GeocodeError::Transport(err.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(address, status = status.as_u16(), "geocode returned error status");
            return Err(GeocodeError::Status {
                status: status.as_u16(),
                reason: status
                    .canonical_reason()
                    .unwrap_or("Unknown status")
                    .to_string(),
            });
        }

        let body: GeocodeResponse = response
            .json()
            .await
            .map_err(|err| GeocodeError::InvalidResponse(err.to_string()))?;

        match body.first_location() {
            Some(location) => Ok(location),
            None => {
                debug!(
                    address,
                    status = body.status.as_deref().unwrap_or("none"),
                    error_message = body.error_message.as_deref().unwrap_or(""),
                    "geocode returned no results"
                );
                Err(GeocodeError::NoMatch {
                    address: address.to_string(),
                })
            }
        }
    }
}

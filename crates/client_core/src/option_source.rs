use async_trait::async_trait;
use reqwest::{header::CONTENT_TYPE, Client};
use serde_json::Value;
use shared::{
    domain::{Country, CountryState, OptionId, SelectOption},
    protocol::validate_option_records,
};
use tracing::{debug, warn};

use crate::{
    build_http_client, ClientSettings, FetchError, OptionResource, OptionSource, API_KEY_HEADER,
};

/// Countries API client: `GET {base}/countries` and
/// `GET {base}/countries/{id}/states`, authenticated with an API-key header.
pub struct HttpOptionSource {
    http: Client,
    base_url: String,
    api_key: String,
}

impl HttpOptionSource {
    pub fn new(settings: &ClientSettings) -> anyhow::Result<Self> {
        Ok(Self::with_client(
            build_http_client(settings)?,
            settings.api_base_url.clone(),
            settings.api_key.clone(),
        ))
    }

    pub fn with_client(http: Client, base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    async fn get_options(
        &self,
        resource: OptionResource,
        path: &str,
    ) -> Result<Vec<SelectOption>, FetchError> {
        let url = format!("{}{path}", self.base_url);
        debug!(%url, "requesting option list");

        let response = self
            .http
            .get(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await
            .map_err(|err| {
                warn!(%resource, "api request failed: {err}");
                FetchError::Transport {
                    resource,
                    message: err.to_string(),
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let reason = status
                .canonical_reason()
                .unwrap_or("Unknown status")
                .to_string();
            warn!(%resource, status = status.as_u16(), "api returned error status");
            return Err(FetchError::Status {
                resource,
                status: status.as_u16(),
                reason,
            });
        }

        let body: Value = response.json().await.map_err(|err| {
            warn!(%resource, "api body is not json: {err}");
            FetchError::InvalidResponse {
                resource,
                detail: format!("body is not valid JSON: {err}"),
            }
        })?;

        let records = validate_option_records(&body).map_err(|err| {
            warn!(%resource, "api body failed validation: {err}");
            FetchError::InvalidResponse {
                resource,
                detail: err.to_string(),
            }
        })?;

        Ok(records.into_iter().map(SelectOption::from).collect())
    }
}

#[async_trait]
impl OptionSource for HttpOptionSource {
    async fn fetch_countries(&self) -> Result<Vec<Country>, FetchError> {
        self.get_options(OptionResource::Countries, "/countries")
            .await
    }

    async fn fetch_states_for_country(
        &self,
        country_id: OptionId,
    ) -> Result<Vec<CountryState>, FetchError> {
        self.get_options(
            OptionResource::States { country_id },
            &format!("/countries/{}/states", country_id.0),
        )
        .await
    }
}

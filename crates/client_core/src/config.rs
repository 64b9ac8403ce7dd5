use std::{collections::HashMap, fs, path::Path, time::Duration};

use anyhow::{bail, Context};
use url::Url;

pub const SETTINGS_FILE: &str = "ultimate_dropdown.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    pub api_base_url: String,
    pub api_key: String,
    pub geocode_base_url: String,
    pub maps_api_key: Option<String>,
    pub request_timeout_secs: u64,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            api_base_url: "http://127.0.0.1:8080".into(),
            api_key: String::new(),
            geocode_base_url: "https://maps.googleapis.com/maps/api/geocode/json".into(),
            maps_api_key: None,
            request_timeout_secs: 10,
        }
    }
}

impl ClientSettings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    /// The map capability needs a non-blank maps key.
    pub fn geocoding_available(&self) -> bool {
        self.maps_api_key
            .as_deref()
            .is_some_and(|key| !key.trim().is_empty())
    }

    /// Normalizes and validates both base URLs.
    pub fn validated(mut self) -> anyhow::Result<Self> {
        self.api_base_url = normalize_base_url(&self.api_base_url)
            .with_context(|| format!("invalid api_base_url '{}'", self.api_base_url))?;
        self.geocode_base_url = normalize_base_url(&self.geocode_base_url)
            .with_context(|| format!("invalid geocode_base_url '{}'", self.geocode_base_url))?;
        Ok(self)
    }
}

/// Defaults, then `ultimate_dropdown.toml` in the working directory, then the
/// process environment.
pub fn load_settings() -> anyhow::Result<ClientSettings> {
    load_settings_from(Path::new(SETTINGS_FILE))
}

pub fn load_settings_from(path: &Path) -> anyhow::Result<ClientSettings> {
    let mut settings = ClientSettings::default();

    if let Ok(raw) = fs::read_to_string(path) {
        apply_file_overrides(&mut settings, &raw)
            .with_context(|| format!("failed to parse settings file '{}'", path.display()))?;
    }

    apply_env_overrides(&mut settings, |name| std::env::var(name).ok());
    settings.validated()
}

pub fn apply_file_overrides(settings: &mut ClientSettings, raw: &str) -> anyhow::Result<()> {
    let file_cfg = toml::from_str::<HashMap<String, toml::Value>>(raw)?;

    if let Some(v) = file_string(&file_cfg, "api_base_url") {
        settings.api_base_url = v;
    }
    if let Some(v) = file_string(&file_cfg, "api_key") {
        settings.api_key = v;
    }
    if let Some(v) = file_string(&file_cfg, "geocode_base_url") {
        settings.geocode_base_url = v;
    }
    if let Some(v) = file_string(&file_cfg, "maps_api_key") {
        settings.maps_api_key = Some(v);
    }
    match file_cfg.get("request_timeout_secs") {
        Some(toml::Value::Integer(secs)) if *secs > 0 => {
            settings.request_timeout_secs = *secs as u64;
        }
        Some(other) => bail!("request_timeout_secs must be a positive integer, got {other}"),
        None => {}
    }

    Ok(())
}

fn file_string(file_cfg: &HashMap<String, toml::Value>, key: &str) -> Option<String> {
    file_cfg
        .get(key)
        .and_then(|value| value.as_str())
        .map(str::to_string)
}

/// Later names win over earlier ones, so `APP__*` beats the bare name.
pub fn apply_env_overrides(
    settings: &mut ClientSettings,
    lookup: impl Fn(&str) -> Option<String>,
) {
    for name in ["API_BASE_URL", "APP__API_BASE_URL"] {
        if let Some(v) = lookup(name) {
            settings.api_base_url = v;
        }
    }
    for name in ["API_KEY", "APP__API_KEY"] {
        if let Some(v) = lookup(name) {
            settings.api_key = v;
        }
    }
    for name in ["GEOCODE_BASE_URL", "APP__GEOCODE_BASE_URL"] {
        if let Some(v) = lookup(name) {
            settings.geocode_base_url = v;
        }
    }
    for name in ["MAPS_API_KEY", "APP__MAPS_API_KEY"] {
        if let Some(v) = lookup(name) {
            settings.maps_api_key = Some(v);
        }
    }
    if let Some(v) = lookup("APP__REQUEST_TIMEOUT_SECS") {
        if let Ok(parsed) = v.parse::<u64>() {
            settings.request_timeout_secs = parsed;
        }
    }
}

pub fn normalize_base_url(raw: &str) -> anyhow::Result<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        bail!("base url is empty");
    }

    let parsed = Url::parse(trimmed)?;
    if !matches!(parsed.scheme(), "http" | "https") {
        bail!("unsupported scheme '{}'", parsed.scheme());
    }

    Ok(trimmed.to_string())
}

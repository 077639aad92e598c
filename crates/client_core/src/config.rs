use std::{fs, path::Path, time::Duration};

use serde::Deserialize;
use url::Url;

use crate::error::ClientError;

pub const DEFAULT_API_PREFIX: &str = "/api";
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 10_000;
pub const SETTINGS_FILE: &str = "storefront.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    pub backend_url: Option<String>,
    pub api_prefix: String,
    pub request_timeout_ms: u64,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            backend_url: None,
            api_prefix: DEFAULT_API_PREFIX.into(),
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    backend_url: Option<String>,
    api_prefix: Option<String>,
    request_timeout_ms: Option<u64>,
}

pub fn load_settings() -> ClientSettings {
    load_settings_with(Path::new(SETTINGS_FILE), |key| std::env::var(key).ok())
}

/// Defaults, then `file` if it exists and parses, then environment overrides.
pub fn load_settings_with(file: &Path, env: impl Fn(&str) -> Option<String>) -> ClientSettings {
    let mut settings = ClientSettings::default();

    if let Ok(raw) = fs::read_to_string(file) {
        match toml::from_str::<FileSettings>(&raw) {
            Ok(file_cfg) => {
                if let Some(v) = file_cfg.backend_url {
                    settings.backend_url = Some(v);
                }
                if let Some(v) = file_cfg.api_prefix {
                    settings.api_prefix = v;
                }
                if let Some(v) = file_cfg.request_timeout_ms {
                    settings.request_timeout_ms = v;
                }
            }
            Err(err) => {
                tracing::warn!("ignoring unreadable settings file {}: {err}", file.display());
            }
        }
    }

    if let Some(v) = env("BACKEND_URL") {
        settings.backend_url = Some(v);
    }
    if let Some(v) = env("APP__BACKEND_URL") {
        settings.backend_url = Some(v);
    }

    if let Some(v) = env("APP__API_PREFIX") {
        settings.api_prefix = v;
    }

    if let Some(v) = env("APP__REQUEST_TIMEOUT_MS") {
        if let Ok(parsed) = v.trim().parse::<u64>() {
            settings.request_timeout_ms = parsed;
        }
    }

    settings
}

/// Validated transport parameters. Building one is the only way to obtain an
/// [`HttpTransport`](crate::transport::HttpTransport), so a missing backend URL
/// surfaces before any request is attempted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportConfig {
    api_base: String,
    timeout: Duration,
}

impl TransportConfig {
    pub fn from_settings(settings: &ClientSettings) -> Result<Self, ClientError> {
        let raw = settings
            .backend_url
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| ClientError::Configuration("backend url is not configured".into()))?;

        let parsed = Url::parse(raw).map_err(|err| {
            ClientError::Configuration(format!("invalid backend url '{raw}': {err}"))
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ClientError::Configuration(format!(
                "backend url '{raw}' must use http or https"
            )));
        }

        if settings.request_timeout_ms == 0 {
            return Err(ClientError::Configuration(
                "request timeout must be greater than zero".into(),
            ));
        }

        Ok(Self {
            api_base: join_api_base(raw, &settings.api_prefix),
            timeout: Duration::from_millis(settings.request_timeout_ms),
        })
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Absolute URL for an endpoint path such as `/plans`.
    pub fn endpoint(&self, path: &str) -> String {
        let path = path.trim_start_matches('/');
        if path.is_empty() {
            return self.api_base.clone();
        }
        format!("{}/{path}", self.api_base)
    }
}

fn join_api_base(backend_url: &str, prefix: &str) -> String {
    let base = backend_url.trim_end_matches('/');
    let prefix = prefix.trim_matches('/');
    if prefix.is_empty() {
        base.to_string()
    } else {
        format!("{base}/{prefix}")
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;

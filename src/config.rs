//! Wizard configuration loaded from the environment.

use std::env;

use tracing::{info, warn};

use crate::error::ConfigError;

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8080";
pub const DEFAULT_PRIORITIES_PATH: &str = "/selection/priorities";
pub const DEFAULT_NEXT_PATH: &str = "/selection/price";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WizardConfig {
    /// Scheme, host and port of the wizard backend.
    pub backend_url: String,
    /// Where the priorities payload is POSTed.
    pub priorities_path: String,
    /// Page the wizard moves to after a successful submission.
    pub next_path: String,
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            priorities_path: DEFAULT_PRIORITIES_PATH.to_string(),
            next_path: DEFAULT_NEXT_PATH.to_string(),
        }
    }
}

impl WizardConfig {
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup. Missing keys fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let backend_url = try_load(&lookup, "WIZARD_BACKEND_URL", DEFAULT_BACKEND_URL);
        if !(backend_url.starts_with("http://") || backend_url.starts_with("https://")) {
            warn!("Invalid WIZARD_BACKEND_URL value: {backend_url}");
            return Err(ConfigError::Invalid {
                key: "WIZARD_BACKEND_URL",
                value: backend_url,
                reason: "expected an http:// or https:// URL",
            });
        }

        Ok(Self {
            backend_url: backend_url.trim_end_matches('/').to_string(),
            priorities_path: load_path(&lookup, "WIZARD_PRIORITIES_PATH", DEFAULT_PRIORITIES_PATH)?,
            next_path: load_path(&lookup, "WIZARD_NEXT_PATH", DEFAULT_NEXT_PATH)?,
        })
    }

    /// Full URL of the priorities endpoint.
    pub fn priorities_url(&self) -> String {
        format!("{}{}", self.backend_url, self.priorities_path)
    }

    /// Full URL of the next wizard step.
    pub fn next_url(&self) -> String {
        format!("{}{}", self.backend_url, self.next_path)
    }
}

fn try_load(lookup: &impl Fn(&str) -> Option<String>, key: &'static str, default: &str) -> String {
    lookup(key).unwrap_or_else(|| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    })
}

fn load_path(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: &str,
) -> Result<String, ConfigError> {
    let value = try_load(lookup, key, default);
    if !value.starts_with('/') {
        warn!("Invalid {key} value: {value}");
        return Err(ConfigError::Invalid {
            key,
            value,
            reason: "expected a path starting with '/'",
        });
    }
    Ok(value)
}

use std::env;
use std::time::Duration;

use aama_core::contact::YELP_BUSINESS_ID;
use url::Url;

use crate::error::ConfigError;

pub const API_KEY_VAR: &str = "YELP_API_KEY";
pub const BUSINESS_ID_VAR: &str = "YELP_BUSINESS_ID";
pub const BASE_URL_VAR: &str = "YELP_API_BASE_URL";
pub const TIMEOUT_VAR: &str = "YELP_TIMEOUT_SECONDS";

pub const DEFAULT_BASE_URL: &str = "https://api.yelp.com/v3";
pub const SETUP_INSTRUCTIONS: &str =
    "Visit https://www.yelp.com/developers to get your API key";

/// Upstream credentials and addressing, resolved once at startup.
#[derive(Clone)]
pub struct GatewayConfig {
    pub api_key: String,
    pub business_id: String,
    pub base_url: Url,
    pub timeout: Duration,
}

impl std::fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("api_key", &"<redacted>")
            .field("business_id", &self.business_id)
            .field("base_url", &self.base_url.as_str())
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl GatewayConfig {
    pub fn new(api_key: impl Into<String>, base_url: &str) -> Result<Self, ConfigError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(ConfigError::MissingCredential { var: API_KEY_VAR });
        }

        Ok(Self {
            api_key,
            business_id: YELP_BUSINESS_ID.to_string(),
            base_url: parse_base_url(base_url)?,
            timeout: Duration::from_secs(10),
        })
    }

    pub fn with_business_id(mut self, business_id: impl Into<String>) -> Self {
        self.business_id = business_id.into();
        self
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = env::var(API_KEY_VAR).unwrap_or_default();
        let base_url = non_empty_var(BASE_URL_VAR).unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let mut config = Self::new(api_key, &base_url)?;

        if let Some(business_id) = non_empty_var(BUSINESS_ID_VAR) {
            config.business_id = business_id;
        }
        if let Some(seconds) = non_empty_var(TIMEOUT_VAR).and_then(|value| value.parse().ok()) {
            config.timeout = Duration::from_secs(seconds);
        }

        Ok(config)
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

// Url::join drops the last path segment unless it ends with '/'.
fn parse_base_url(value: &str) -> Result<Url, ConfigError> {
    let normalized = format!("{}/", value.trim().trim_end_matches('/'));
    Url::parse(&normalized).map_err(|source| ConfigError::InvalidBaseUrl {
        value: value.to_string(),
        source,
    })
}

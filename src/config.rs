//! Configuration for talking to the completion endpoint.
//!
//! A [`Config`] is assembled once at startup through [`ConfigBuilder`] and
//! passed by reference to whatever needs it. Nothing reads the process
//! environment after that point.

use std::fmt;

use reqwest::Url;

use crate::error::CreativeTimeError;
use crate::secret_store::SecretStore;

/// Environment variable holding the API key
pub const API_KEY_ENV: &str = "OPEN_AI_API_KEY";

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1/";

/// Legacy completion model
pub const DEFAULT_MODEL: &str = "text-davinci-003";

pub const DEFAULT_MAX_TOKENS: u32 = 50;

pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Read-only settings for the completion client.
#[derive(Clone)]
pub struct Config {
    api_key: String,
    base_url: Url,
    model: String,
    max_tokens: u32,
    temperature: f32,
    timeout_seconds: Option<u64>,
}

impl Config {
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    /// Builds the default configuration with the key taken from
    /// `OPEN_AI_API_KEY`, falling back to the secret store.
    pub fn from_env() -> Result<Self, CreativeTimeError> {
        Self::builder_from_env().build()
    }

    /// A builder preloaded with the key from `OPEN_AI_API_KEY` or the secret
    /// store, for callers that still want to override settings.
    pub fn builder_from_env() -> ConfigBuilder {
        let store = match SecretStore::open() {
            Ok(store) => Some(store),
            Err(e) => {
                log::warn!("secret store unavailable: {e}");
                None
            }
        };
        Self::builder_from_lookup(|name| std::env::var(name).ok(), store.as_ref())
    }

    /// Like [`Config::builder_from_env`] with the environment and store supplied.
    pub fn builder_from_lookup<F>(lookup: F, store: Option<&SecretStore>) -> ConfigBuilder
    where
        F: Fn(&str) -> Option<String>,
    {
        let builder = ConfigBuilder::new();
        match resolve_api_key_with(lookup, store) {
            Some(key) => builder.api_key(key),
            None => builder,
        }
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn max_tokens(&self) -> u32 {
        self.max_tokens
    }

    pub fn temperature(&self) -> f32 {
        self.temperature
    }

    pub fn timeout_seconds(&self) -> Option<u64> {
        self.timeout_seconds
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url.as_str())
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .field("temperature", &self.temperature)
            .field("timeout_seconds", &self.timeout_seconds)
            .finish()
    }
}

/// Looks up the API key, first through `lookup` (normally the process
/// environment) and then in `store`. Blank values are skipped.
pub fn resolve_api_key_with<F>(lookup: F, store: Option<&SecretStore>) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(API_KEY_ENV)
        .filter(|key| !key.trim().is_empty())
        .or_else(|| {
            store
                .and_then(|s| s.get(API_KEY_ENV))
                .filter(|key| !key.trim().is_empty())
                .map(str::to_string)
        })
}

/// Builder for [`Config`].
///
/// Everything except the API key has a default.
#[derive(Debug, Default, Clone)]
pub struct ConfigBuilder {
    api_key: Option<String>,
    base_url: Option<String>,
    model: Option<String>,
    max_tokens: Option<u32>,
    temperature: Option<f32>,
    timeout_seconds: Option<u64>,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API key for authentication.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Sets the base URL for API requests.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Sets the model identifier to use.
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Sets the maximum number of tokens to generate.
    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Sets the sampling temperature (0.0-2.0).
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Sets the request timeout in seconds. No timeout is applied otherwise.
    pub fn timeout_seconds(mut self, timeout_seconds: u64) -> Self {
        self.timeout_seconds = Some(timeout_seconds);
        self
    }

    pub fn build(self) -> Result<Config, CreativeTimeError> {
        let api_key = self
            .api_key
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                CreativeTimeError::MissingCredential(format!(
                    "OpenAI API key not found; set {API_KEY_ENV} or store one with `creative-time key set`"
                ))
            })?;

        let base_url = parse_base_url(self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL))?;

        let temperature = self.temperature.unwrap_or(DEFAULT_TEMPERATURE);
        if !(0.0..=2.0).contains(&temperature) {
            return Err(CreativeTimeError::InvalidRequest(format!(
                "temperature must be between 0.0 and 2.0, got {temperature}"
            )));
        }

        if self.timeout_seconds == Some(0) {
            return Err(CreativeTimeError::InvalidRequest(
                "timeout must be at least one second".to_string(),
            ));
        }

        let model = self.model.unwrap_or_else(|| DEFAULT_MODEL.to_string());
        if model.trim().is_empty() {
            return Err(CreativeTimeError::InvalidRequest(
                "model must not be empty".to_string(),
            ));
        }

        Ok(Config {
            api_key,
            base_url,
            model,
            max_tokens: self.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
            temperature,
            timeout_seconds: self.timeout_seconds,
        })
    }
}

// `Url::join` replaces the last segment unless the base ends with a slash.
fn parse_base_url(raw: &str) -> Result<Url, CreativeTimeError> {
    let normalized = if raw.ends_with('/') {
        raw.to_string()
    } else {
        format!("{raw}/")
    };
    Url::parse(&normalized)
        .map_err(|e| CreativeTimeError::InvalidRequest(format!("invalid base URL {raw:?}: {e}")))
}

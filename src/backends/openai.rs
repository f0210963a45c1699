//! OpenAI legacy completions client.
//!
//! Sends a single prompt to `POST {base_url}completions` and hands the decoded
//! body to the shape validator before anything reads it.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;

use crate::{
    completion::{
        parse_completion_response, CompletionProvider, CompletionRequest, CompletionResponse,
    },
    config::Config,
    error::CreativeTimeError,
};

const PROVIDER_NAME: &str = "OpenAI";

/// Completions endpoint path, relative to the base URL
const COMPLETIONS_ENDPOINT: &str = "completions";

/// Client for the OpenAI completions endpoint.
pub struct OpenAI {
    config: Config,
    client: Client,
}

#[derive(Serialize, Debug)]
struct OpenAICompletionRequest<'a> {
    prompt: &'a str,
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
}

impl OpenAI {
    pub fn new(config: Config) -> Self {
        Self::with_client(config, Client::new())
    }

    /// Creates a client that reuses an existing `reqwest::Client`.
    pub fn with_client(config: Config, client: Client) -> Self {
        Self { config, client }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}

#[async_trait]
impl CompletionProvider for OpenAI {
    async fn complete(
        &self,
        req: &CompletionRequest,
    ) -> Result<CompletionResponse, CreativeTimeError> {
        if self.config.api_key().is_empty() {
            return Err(CreativeTimeError::AuthError(format!(
                "Missing {PROVIDER_NAME} API key"
            )));
        }

        let body = OpenAICompletionRequest {
            prompt: &req.prompt,
            model: self.config.model(),
            max_tokens: req.max_tokens.unwrap_or(self.config.max_tokens()),
            temperature: req.temperature.unwrap_or(self.config.temperature()),
        };

        let url = self
            .config
            .base_url()
            .join(COMPLETIONS_ENDPOINT)
            .map_err(|e| CreativeTimeError::HttpError(e.to_string()))?;

        let mut request = self
            .client
            .post(url)
            .bearer_auth(self.config.api_key())
            .json(&body);

        if log::log_enabled!(log::Level::Trace) {
            if let Ok(json) = serde_json::to_string(&body) {
                log::trace!("{PROVIDER_NAME} request payload: {json}");
            }
        }

        if let Some(timeout) = self.config.timeout_seconds() {
            request = request.timeout(Duration::from_secs(timeout));
        }

        let response = request.send().await?;
        let status = response.status();

        log::debug!("{PROVIDER_NAME} HTTP status: {status}");

        let resp_text = response.text().await?;
        if !status.is_success() {
            return Err(CreativeTimeError::ResponseFormatError {
                message: format!("{PROVIDER_NAME} API returned error status: {status}"),
                raw_response: resp_text,
            });
        }

        let payload: Value = serde_json::from_str(&resp_text).map_err(|e| {
            CreativeTimeError::ResponseFormatError {
                message: format!("Failed to decode {PROVIDER_NAME} API response: {e}"),
                raw_response: resp_text.clone(),
            }
        })?;

        parse_completion_response(&payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_body_uses_wire_field_names() {
        let body = OpenAICompletionRequest {
            prompt: "p",
            model: "text-davinci-003",
            max_tokens: 50,
            temperature: 0.5,
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({
                "prompt": "p",
                "model": "text-davinci-003",
                "max_tokens": 50,
                "temperature": 0.5
            })
        );
    }
}

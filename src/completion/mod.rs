use async_trait::async_trait;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::CreativeTimeError;

mod validate;

pub use validate::parse_completion_response;

/// A request for text completion from an LLM provider.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    /// The input prompt text to complete
    pub prompt: String,
    /// Optional maximum number of tokens to generate
    pub max_tokens: Option<u32>,
    /// Optional temperature parameter to control randomness (0.0-2.0)
    pub temperature: Option<f32>,
}

impl CompletionRequest {
    /// Creates a new completion request with just a prompt.
    ///
    /// # Arguments
    ///
    /// * `prompt` - The input text to complete
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            max_tokens: None,
            temperature: None,
        }
    }

    /// Creates a builder for constructing a completion request.
    pub fn builder(prompt: impl Into<String>) -> CompletionRequestBuilder {
        CompletionRequestBuilder {
            prompt: prompt.into(),
            max_tokens: None,
            temperature: None,
        }
    }
}

/// Builder for constructing completion requests with optional parameters.
#[derive(Debug, Clone)]
pub struct CompletionRequestBuilder {
    prompt: String,
    max_tokens: Option<u32>,
    temperature: Option<f32>,
}

impl CompletionRequestBuilder {
    /// Sets the maximum number of tokens to generate.
    pub fn max_tokens(mut self, val: u32) -> Self {
        self.max_tokens = Some(val);
        self
    }

    /// Sets the temperature parameter for controlling randomness.
    pub fn temperature(mut self, val: f32) -> Self {
        self.temperature = Some(val);
        self
    }

    /// Builds the completion request with the configured parameters.
    pub fn build(self) -> CompletionRequest {
        CompletionRequest {
            prompt: self.prompt,
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        }
    }
}

/// One generated alternative from a completion response.
///
/// Holds the complete object as received. The `text` key is guaranteed to be
/// present, but its value is not type checked.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Choice {
    fields: Map<String, Value>,
}

impl Choice {
    pub(crate) fn from_fields(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// The generated text, if the provider sent it as a string.
    pub fn text(&self) -> Option<&str> {
        self.text_value().as_str()
    }

    /// The raw `text` value.
    pub fn text_value(&self) -> &Value {
        // present by construction; Null only as a fallback
        self.fields.get("text").unwrap_or(&Value::Null)
    }

    /// Any other field the provider attached, such as `index` or `finish_reason`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }
}

/// A validated response from a completion endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletionResponse {
    /// Choices in the order the provider returned them
    pub choices: Vec<Choice>,
}

impl CompletionResponse {
    pub fn first_choice(&self) -> Option<&Choice> {
        self.choices.first()
    }
}

/// Trait for providers that support text completion requests.
#[async_trait]
pub trait CompletionProvider {
    /// Sends a completion request and returns the validated response.
    ///
    /// # Arguments
    ///
    /// * `req` - The completion request parameters
    ///
    /// # Returns
    ///
    /// A response whose shape has been checked, or an error
    async fn complete(&self, req: &CompletionRequest)
        -> Result<CompletionResponse, CreativeTimeError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_optional_parameters() {
        let req = CompletionRequest::builder("what time is it")
            .max_tokens(50)
            .temperature(0.7)
            .build();
        assert_eq!(req.prompt, "what time is it");
        assert_eq!(req.max_tokens, Some(50));
        assert_eq!(req.temperature, Some(0.7));
    }

    #[test]
    fn new_leaves_parameters_to_the_provider() {
        let req = CompletionRequest::new("hello");
        assert_eq!(req.max_tokens, None);
        assert_eq!(req.temperature, None);
    }
}

//! Shape validation for decoded completion payloads.
//!
//! Providers hand back whatever the server sent. Nothing reads a field until
//! the payload has been narrowed here into a [`CompletionResponse`].

use serde_json::Value;

use super::{Choice, CompletionResponse};
use crate::error::CreativeTimeError;

/// Narrows an untyped payload into a [`CompletionResponse`].
///
/// The payload must be an object whose `choices` field is an array, and every
/// element of that array must be an object carrying a `text` key. The first
/// element that fails rejects the whole payload. An empty array is accepted.
///
/// The input is only borrowed; accepted choices are copied out in order.
pub fn parse_completion_response(
    payload: &Value,
) -> Result<CompletionResponse, CreativeTimeError> {
    let object = payload.as_object().ok_or_else(|| {
        CreativeTimeError::InvalidResponseShape(format!(
            "expected an object, got {}",
            kind_of(payload)
        ))
    })?;

    let raw_choices = match object.get("choices") {
        Some(Value::Array(items)) => items,
        Some(other) => {
            return Err(CreativeTimeError::InvalidResponseShape(format!(
                "`choices` must be an array, got {}",
                kind_of(other)
            )))
        }
        None => {
            return Err(CreativeTimeError::InvalidResponseShape(
                "missing `choices` field".to_string(),
            ))
        }
    };

    let mut choices = Vec::with_capacity(raw_choices.len());
    for (index, item) in raw_choices.iter().enumerate() {
        let fields = item
            .as_object()
            .ok_or_else(|| CreativeTimeError::InvalidChoiceShape {
                index,
                reason: format!("expected an object, got {}", kind_of(item)),
            })?;
        if !fields.contains_key("text") {
            return Err(CreativeTimeError::InvalidChoiceShape {
                index,
                reason: "missing `text` field".to_string(),
            });
        }
        choices.push(Choice::from_fields(fields.clone()));
    }

    Ok(CompletionResponse { choices })
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

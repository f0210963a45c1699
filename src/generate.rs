//! Turns a wall-clock time into a whimsical sentence.

use chrono::{Local, NaiveTime};

use crate::completion::{CompletionProvider, CompletionRequest, CompletionResponse};
use crate::error::CreativeTimeError;
use crate::prompt::{build_prompt, clock_time};

/// Describes the current local time.
pub async fn generate_creative_time<P>(provider: &P) -> Result<String, CreativeTimeError>
where
    P: CompletionProvider + Sync + ?Sized,
{
    generate_creative_time_at(provider, Local::now().time()).await
}

/// Describes `time`.
///
/// Sends exactly one completion request and returns the trimmed text of the
/// first choice. Errors are returned to the caller untouched.
pub async fn generate_creative_time_at<P>(
    provider: &P,
    time: NaiveTime,
) -> Result<String, CreativeTimeError>
where
    P: CompletionProvider + Sync + ?Sized,
{
    let formatted = clock_time(time);
    log::debug!("describing {formatted}");

    let request = CompletionRequest::new(build_prompt(&formatted));
    let response = provider.complete(&request).await?;
    extract_text(&response)
}

/// Reads the first choice's text and trims surrounding whitespace.
pub fn extract_text(response: &CompletionResponse) -> Result<String, CreativeTimeError> {
    let choice = response
        .first_choice()
        .ok_or(CreativeTimeError::EmptyChoices)?;
    let text = choice
        .text()
        .ok_or_else(|| CreativeTimeError::InvalidChoiceShape {
            index: 0,
            reason: "`text` is not a string".to_string(),
        })?;
    Ok(text.trim().to_string())
}

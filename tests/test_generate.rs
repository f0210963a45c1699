use std::sync::Mutex;

use chrono::NaiveTime;
use creative_time::{
    async_trait,
    completion::{
        parse_completion_response, CompletionProvider, CompletionRequest, CompletionResponse,
    },
    error::CreativeTimeError,
    generate_creative_time, generate_creative_time_at,
};
use serde_json::{json, Value};

/// Provider that answers every request with a fixed payload and remembers
/// what it was asked.
struct CannedProvider {
    payload: Result<Value, CreativeTimeError>,
    seen: Mutex<Vec<CompletionRequest>>,
}

impl CannedProvider {
    fn answering(payload: Value) -> Self {
        Self {
            payload: Ok(payload),
            seen: Mutex::new(Vec::new()),
        }
    }

    fn failing(err: CreativeTimeError) -> Self {
        Self {
            payload: Err(err),
            seen: Mutex::new(Vec::new()),
        }
    }

    fn requests(&self) -> Vec<CompletionRequest> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionProvider for CannedProvider {
    async fn complete(
        &self,
        req: &CompletionRequest,
    ) -> Result<CompletionResponse, CreativeTimeError> {
        self.seen.lock().unwrap().push(req.clone());
        let payload = self.payload.clone()?;
        parse_completion_response(&payload)
    }
}

fn half_past_two() -> NaiveTime {
    NaiveTime::from_hms_opt(14, 30, 0).unwrap()
}

#[tokio::test]
async fn returns_trimmed_text_of_first_choice() {
    let provider = CannedProvider::answering(json!({
        "choices": [{ "text": "\n\nIt is half past two.  \n" }]
    }));

    let text = generate_creative_time_at(&provider, half_past_two())
        .await
        .unwrap();
    assert_eq!(text, "It is half past two.");
}

#[tokio::test]
async fn sends_one_request_with_the_formatted_time() {
    let provider = CannedProvider::answering(json!({ "choices": [{ "text": "ok" }] }));

    generate_creative_time_at(&provider, half_past_two())
        .await
        .unwrap();

    let requests = provider.requests();
    assert_eq!(requests.len(), 1);
    assert!(requests[0]
        .prompt
        .starts_with("The current time is 02:30 PM.\n"));
    // generation parameters come from the provider's config
    assert_eq!(requests[0].max_tokens, None);
    assert_eq!(requests[0].temperature, None);
}

#[tokio::test]
async fn empty_choices_surface_as_an_error() {
    let provider = CannedProvider::answering(json!({ "choices": [] }));

    let err = generate_creative_time_at(&provider, half_past_two())
        .await
        .unwrap_err();
    assert_eq!(err, CreativeTimeError::EmptyChoices);
}

#[tokio::test]
async fn shape_errors_are_propagated() {
    let provider = CannedProvider::answering(json!({ "notChoices": [] }));
    let err = generate_creative_time_at(&provider, half_past_two())
        .await
        .unwrap_err();
    assert!(matches!(err, CreativeTimeError::InvalidResponseShape(_)));

    let provider = CannedProvider::answering(json!("hello"));
    let err = generate_creative_time_at(&provider, half_past_two())
        .await
        .unwrap_err();
    assert!(matches!(err, CreativeTimeError::InvalidResponseShape(_)));
}

#[tokio::test]
async fn transport_errors_are_propagated() {
    let provider =
        CannedProvider::failing(CreativeTimeError::HttpError("connection refused".into()));

    let err = generate_creative_time(&provider).await.unwrap_err();
    assert_eq!(
        err,
        CreativeTimeError::HttpError("connection refused".into())
    );
    assert_eq!(provider.requests().len(), 1);
}

#[tokio::test]
async fn works_through_a_trait_object() {
    let provider: Box<dyn CompletionProvider + Send + Sync> =
        Box::new(CannedProvider::answering(json!({ "choices": [{ "text": " hi " }] })));

    let text = generate_creative_time_at(provider.as_ref(), half_past_two())
        .await
        .unwrap();
    assert_eq!(text, "hi");
}

use std::fmt;

/// Error types that can occur while generating a creative time description.
#[derive(Debug, Clone, PartialEq)]
pub enum CreativeTimeError {
    /// No API key could be found in any configured source
    MissingCredential(String),
    /// The decoded payload is not an object with a `choices` array
    InvalidResponseShape(String),
    /// An element of `choices` is not an object with a `text` field
    InvalidChoiceShape {
        /// Position of the offending element in `choices`
        index: usize,
        /// What was wrong with it
        reason: String,
    },
    /// The response passed validation but carries no choices to read
    EmptyChoices,
    /// HTTP request/response errors
    HttpError(String),
    /// Authentication and authorization errors
    AuthError(String),
    /// Invalid request parameters or configuration values
    InvalidRequest(String),
    /// The provider answered with an error status or a body that is not JSON
    ResponseFormatError {
        /// Human readable summary
        message: String,
        /// Body exactly as received
        raw_response: String,
    },
    /// JSON serialization/deserialization errors
    JsonError(String),
    /// Filesystem errors from the secret store
    Io(String),
}

impl fmt::Display for CreativeTimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CreativeTimeError::MissingCredential(e) => write!(f, "Missing Credential: {e}"),
            CreativeTimeError::InvalidResponseShape(e) => write!(
                f,
                "Invalid API Response: response object does not match expected shape ({e})"
            ),
            CreativeTimeError::InvalidChoiceShape { index, reason } => write!(
                f,
                "Invalid API Response: choice {index} does not match expected shape ({reason})"
            ),
            CreativeTimeError::EmptyChoices => {
                write!(f, "Invalid API Response: no choices returned")
            }
            CreativeTimeError::HttpError(e) => write!(f, "HTTP Error: {e}"),
            CreativeTimeError::AuthError(e) => write!(f, "Auth Error: {e}"),
            CreativeTimeError::InvalidRequest(e) => write!(f, "Invalid Request: {e}"),
            CreativeTimeError::ResponseFormatError {
                message,
                raw_response,
            } => write!(f, "Response Format Error: {message}. Raw response: {raw_response}"),
            CreativeTimeError::JsonError(e) => write!(f, "JSON Parse Error: {e}"),
            CreativeTimeError::Io(e) => write!(f, "IO Error: {e}"),
        }
    }
}

impl std::error::Error for CreativeTimeError {}

/// Converts reqwest HTTP errors into CreativeTimeErrors
impl From<reqwest::Error> for CreativeTimeError {
    fn from(err: reqwest::Error) -> Self {
        CreativeTimeError::HttpError(err.to_string())
    }
}

impl From<serde_json::Error> for CreativeTimeError {
    fn from(err: serde_json::Error) -> Self {
        CreativeTimeError::JsonError(err.to_string())
    }
}

impl From<std::io::Error> for CreativeTimeError {
    fn from(err: std::io::Error) -> Self {
        CreativeTimeError::Io(err.to_string())
    }
}

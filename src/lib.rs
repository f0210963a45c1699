//! Asks a completion model to describe the current time in a whimsical sentence.
//!
//! # Overview
//! The flow is linear: build a [`config::Config`], format the time into a
//! prompt, send one completion request, validate the shape of the decoded
//! response, and read the first choice's text.
//!
//! ```no_run
//! use creative_time::{backends::openai::OpenAI, config::Config, generate_creative_time};
//!
//! # async fn run() -> Result<(), creative_time::error::CreativeTimeError> {
//! let provider = OpenAI::new(Config::from_env()?);
//! println!("{}", generate_creative_time(&provider).await?);
//! # Ok(())
//! # }
//! ```

// Re-export for convenience
pub use async_trait::async_trait;

/// Backend implementations for completion providers
pub mod backends;

/// Completion request/response types and response-shape validation
pub mod completion;

/// Read-only client configuration and credential lookup
pub mod config;

/// Error types and handling
pub mod error;

/// Prompt and clock formatting
pub mod prompt;

/// Secret store for the API key
pub mod secret_store;

mod generate;

pub use generate::{extract_text, generate_creative_time, generate_creative_time_at};

#[inline]
/// Initialize logging using env_logger if the "logging" feature is enabled.
/// This is a no-op if the feature is not enabled.
pub fn init_logging() {
    #[cfg(feature = "logging")]
    {
        let _ = env_logger::try_init();
    }
}

//! Recognition provider seam
//!
//! The service talks to "something that turns a fragment into a title"
//! through [`RecognitionProvider`]. Production uses [`AuddClient`]; tests
//! plug in stubs.

use async_trait::async_trait;
use thiserror::Error;

pub mod audd;
pub mod error_codes;

pub use audd::AuddClient;
pub use error_codes::status_for_provider_code;

/// What the provider said about a fragment
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecognitionOutcome {
    /// Fragment identified
    Matched { title: String },
    /// Provider answered successfully but found nothing
    NoMatch,
    /// Provider reported a structured error
    Rejected { code: i64, message: String },
}

/// The provider could not be asked, or its answer could not be understood
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Provider request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Provider answered HTTP {0}")]
    Status(u16),

    #[error("Unreadable provider response: {0}")]
    Malformed(String),
}

/// Identifies an audio fragment
#[async_trait]
pub trait RecognitionProvider: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Submit a base64 fragment for recognition
    async fn recognise(&self, fragment: &str) -> Result<RecognitionOutcome, ProviderError>;
}

//! AudD recognition client
//!
//! Posts the fragment as a form (`api_token`, `audio`, `return=title`) and
//! reads one of three answers:
//! - `{"status":"success","result":{"title":...}}` → matched
//! - `{"status":"success","result":null}` → no match
//! - `{"status":"error","error":{"error_code":..,"error_message":..}}` → rejected

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info, warn};
use trk_common::ServiceUrl;

use super::{ProviderError, RecognitionOutcome, RecognitionProvider};

pub const DEFAULT_PROVIDER_URL: &str = "https://api.audd.io/";

const UNKNOWN_ERROR_CODE: i64 = 100;
const UNKNOWN_ERROR_MESSAGE: &str = "Unknown provider error";

#[derive(Debug, Deserialize)]
struct AuddResponse {
    status: String,
    #[serde(default)]
    result: Option<AuddMatch>,
    #[serde(default)]
    error: Option<AuddErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct AuddMatch {
    title: String,
}

#[derive(Debug, Deserialize)]
struct AuddErrorDetail {
    error_code: Option<i64>,
    error_message: Option<String>,
}

/// AudD API client
#[derive(Debug, Clone)]
pub struct AuddClient {
    http: Client,
    endpoint: ServiceUrl,
    api_token: String,
}

impl AuddClient {
    pub fn new(endpoint: ServiceUrl, api_token: String) -> Self {
        Self {
            http: Client::new(),
            endpoint,
            api_token,
        }
    }
}

/// Interpret an AudD response body
pub fn parse_response(body: &[u8]) -> Result<RecognitionOutcome, ProviderError> {
    let response: AuddResponse =
        serde_json::from_slice(body).map_err(|e| ProviderError::Malformed(e.to_string()))?;

    match response.status.as_str() {
        "success" => Ok(match response.result {
            Some(found) => RecognitionOutcome::Matched { title: found.title },
            None => RecognitionOutcome::NoMatch,
        }),
        "error" => {
            let (code, message) = match response.error {
                Some(detail) => (
                    detail.error_code.unwrap_or(UNKNOWN_ERROR_CODE),
                    detail
                        .error_message
                        .unwrap_or_else(|| UNKNOWN_ERROR_MESSAGE.to_string()),
                ),
                None => (UNKNOWN_ERROR_CODE, UNKNOWN_ERROR_MESSAGE.to_string()),
            };
            Ok(RecognitionOutcome::Rejected { code, message })
        }
        other => Err(ProviderError::Malformed(format!(
            "unexpected status {:?}",
            other
        ))),
    }
}

#[async_trait]
impl RecognitionProvider for AuddClient {
    fn name(&self) -> &'static str {
        "audd"
    }

    async fn recognise(&self, fragment: &str) -> Result<RecognitionOutcome, ProviderError> {
        let params = [
            ("api_token", self.api_token.as_str()),
            ("audio", fragment),
            ("return", "title"),
        ];

        debug!(
            fragment_len = fragment.len(),
            "Querying AudD at {}", self.endpoint
        );

        let response = self
            .http
            .post(self.endpoint.as_str())
            .form(&params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!("AudD answered HTTP {}", status);
            return Err(ProviderError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        let outcome = parse_response(&body)?;

        match &outcome {
            RecognitionOutcome::Matched { title } => info!(title = %title, "AudD match"),
            RecognitionOutcome::NoMatch => info!("AudD found no match"),
            RecognitionOutcome::Rejected { code, message } => {
                warn!(code = code, "AudD rejected fragment: {}", message)
            }
        }

        Ok(outcome)
    }
}

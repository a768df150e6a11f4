//! Caller-visible error taxonomy and JSON body helpers
//!
//! Every failure leaving a service is an [`ApiError`]: one kind, one status,
//! and a `{"error": "<message>"}` body. There is no structured error code on
//! the wire beyond the HTTP status.

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, FromRequestParts, Path, Query, Request},
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;

/// Request body cap for services accepting whole encoded tracks (64 MiB)
pub const DEFAULT_MAX_BODY_BYTES: usize = 64 * 1024 * 1024;

/// Error body returned by every service: `{"error": "..."}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Plain acknowledgement body: `{"message": "..."}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageBody {
    pub message: String,
}

impl MessageBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// API error type shared by all handlers
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed, missing or blank input (400)
    #[error("{0}")]
    BadRequest(String),

    /// Request body exceeds the configured limit (413)
    #[error("{0}")]
    PayloadTooLarge(String),

    /// Request body is not JSON (415)
    #[error("{0}")]
    UnsupportedMediaType(String),

    /// No track with the requested title (404)
    #[error("{0}")]
    NotFound(String),

    /// Duplicate title (409)
    #[error("{0}")]
    Conflict(String),

    /// Storage engine or downstream service unreachable (503)
    #[error("{0}")]
    Unavailable(String),

    /// Downstream service answered with an unexpected status
    #[error("{1}")]
    Upstream(StatusCode, String),

    /// Recognition provider reported a structured error, already mapped to a status
    #[error("{1}")]
    ProviderRejected(StatusCode, String),

    /// Internal server error (500)
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    /// HTTP status this error is reported with
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::UnsupportedMediaType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Upstream(status, _) | ApiError::ProviderRejected(status, _) => *status,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(ErrorBody {
            error: self.to_string(),
        });

        (status, body).into_response()
    }
}

/// JSON extractor whose rejections are reported as [`ApiError`]
///
/// A missing `Content-Type: application/json` becomes 415, a body over the
/// router's `DefaultBodyLimit` becomes 413, and any other rejection (syntax,
/// wrong shape, unreadable body) becomes 400.
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(JsonBody(value)),
            Err(JsonRejection::MissingJsonContentType(_)) => {
                tracing::warn!("Rejected request without JSON content type");
                Err(ApiError::UnsupportedMediaType(
                    "Request body must be JSON".to_string(),
                ))
            }
            Err(rejection) if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE => {
                tracing::warn!("Rejected oversized request body");
                Err(ApiError::PayloadTooLarge(
                    "Request body too large".to_string(),
                ))
            }
            Err(rejection) => {
                tracing::warn!("Rejected malformed JSON body: {}", rejection.body_text());
                Err(ApiError::BadRequest(rejection.body_text()))
            }
        }
    }
}

/// Path extractor whose rejections are reported as a 400 [`ApiError`]
#[derive(Debug, Clone)]
pub struct PathParam<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for PathParam<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<T>::from_request_parts(parts, state).await {
            Ok(Path(value)) => Ok(PathParam(value)),
            Err(rejection) => {
                tracing::warn!("Rejected path: {}", rejection.body_text());
                Err(ApiError::BadRequest(rejection.body_text()))
            }
        }
    }
}

/// Query-string extractor whose rejections are reported as a 400 [`ApiError`]
#[derive(Debug, Clone)]
pub struct QueryParams<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for QueryParams<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Query::<T>::from_request_parts(parts, state).await {
            Ok(Query(value)) => Ok(QueryParams(value)),
            Err(rejection) => {
                tracing::warn!("Rejected query string: {}", rejection.body_text());
                Err(ApiError::BadRequest(rejection.body_text()))
            }
        }
    }
}

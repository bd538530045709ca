//! Error types for zensync-client.

use thiserror::Error;

/// All per-request failures. Never fatal on their own: callers decide the
/// consequence (empty index page, failed article, unresolved author).
#[derive(Debug, Error)]
pub enum ClientError {
    /// Non-success HTTP status, with whatever body the server returned.
    #[error("request failed with status {code}: {body}")]
    Status { code: u16, body: String },

    /// Transport-level failure — connect/read/write error or timeout.
    #[error("transport error: {0}")]
    Transport(String),

    /// Success response with an empty body.
    #[error("response is empty")]
    EmptyBody,

    /// Success response with a content type other than `application/json`.
    #[error("Content-Type must be application/json, got: {0}")]
    ContentType(String),

    /// Success response whose body is not valid JSON.
    #[error("unable to parse the response: {0}")]
    Json(#[from] serde_json::Error),
}

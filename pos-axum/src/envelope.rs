//! The `{code, data | message}` wrapper around every points-of-sale response.

use axum::{Json, http::StatusCode};
use schemars::JsonSchema;
use serde::Serialize;

/// Response envelope. `code` mirrors the HTTP status.
#[derive(Serialize, JsonSchema)]
pub struct Envelope<T> {
    /// The HTTP status code of the response
    pub code: u16,
    /// A human-readable summary; always present on failure
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// The payload; only present on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

/// A successful envelope.
pub type Success<T> = Json<Envelope<T>>;

/// A failed envelope, paired with its HTTP status.
pub type Failure = (StatusCode, Json<Envelope<()>>);

pub(crate) fn success<T>(message: Option<String>, data: T) -> Success<T> {
    Json(Envelope {
        code: StatusCode::OK.as_u16(),
        message,
        data: Some(data),
    })
}

pub(crate) fn failure(status: StatusCode, message: impl Into<String>) -> Failure {
    (
        status,
        Json(Envelope {
            code: status.as_u16(),
            message: Some(message.into()),
            data: None,
        }),
    )
}

//! Error types for the mural client.
//!
//! # Design
//! `NotFound` gets a dedicated variant because deleting a message that
//! someone else already removed is an expected outcome, not a transport
//! failure. Every other non-2xx response lands in `Http` with the raw status
//! and body. Malformed listings are not errors at all; they decode to an
//! empty board.

use thiserror::Error;

/// Errors returned by `MuralClient` and draft validation.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned 404 for the addressed message.
    #[error("resource not found")]
    NotFound,

    /// The server returned a non-2xx status other than 404.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// A form field was blank after trimming. Carries the wire field name.
    #[error("field `{0}` must not be empty")]
    InvalidDraft(&'static str),
}

/// Returned when an order mode name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown order mode `{0}`")]
pub struct UnknownOrderMode(pub String);

//! Error types for the record client.
//!
//! # Design
//! Transport failures keep their own type and pass through `Error`
//! transparently, so a network or decoding failure reads the same whether it
//! came from the collaborator directly or through a record operation. The
//! status-code variants are per kind so callers branch on the variant, not on
//! message text.

use thiserror::Error;

/// Result alias for record operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Failures of the HTTP collaborator itself: the request never produced a
/// usable response, or its body could not be (de)serialized.
#[derive(Error, Debug)]
pub enum TransportError {
    /// Connection, TLS, timeout or any other I/O failure.
    #[error("request failed: {0}")]
    Request(String),

    /// The response body was not the JSON the operation expects.
    #[error("decoding response failed: {0}")]
    Decode(#[source] serde_json::Error),

    /// The request payload could not be encoded to JSON.
    #[error("encoding request failed: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Errors returned by record operations.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The API answered with a status the operation does not accept.
    #[error("the API returned an error: HTTP {status}")]
    Api { status: u16, body: String },

    /// Update rejected the record attributes (HTTP 400).
    #[error("invalid record: {body}")]
    Validation { body: String },

    /// Delete answered with anything but HTTP 200.
    #[error("failed to delete record: HTTP {status}")]
    Deletion { status: u16 },

    /// The domain or record does not exist (HTTP 404).
    #[error("record not found")]
    NotFound,

    /// A caller-supplied value lacked an identifier the request needs.
    /// Raised before anything is sent.
    #[error("missing {0}")]
    MissingField(&'static str),

    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    /// HTTP status carried by this error, if it came from a response.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api { status, .. } | Error::Deletion { status } => Some(*status),
            Error::Validation { .. } => Some(400),
            Error::NotFound => Some(404),
            _ => None,
        }
    }
}

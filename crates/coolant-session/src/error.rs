//! Error types for the session layer.
//!
//! We use `thiserror` to derive `Display` and `Error` from the attributes.
//! Each `#[from]` variant also gets a `From` impl, which is what lets the
//! manager write `self.api.login(&request).await?` and have a
//! `TransportError` or `ProtocolError` turn into a [`SessionError`] on the
//! way out. Store failures keep their own type, [`StoreError`], because
//! callers outside a login (the console reading the token for an API call)
//! see them too.

use std::path::PathBuf;

use coolant_protocol::ProtocolError;
use coolant_transport::TransportError;

/// Errors that can occur during session operations.
///
/// Every variant ends the same way at the UI boundary (a generic failure
/// notification); the variants exist so tests and logs can tell the causes
/// apart.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// No response was obtained from the API.
    #[error("transport failed: {0}")]
    Transport(#[from] TransportError),

    /// A body could not be encoded or a response could not be decoded.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// The API answered an unauthenticated call with a non-success status.
    #[error("{endpoint} rejected with status {status}{}", detail(.message))]
    Rejected {
        endpoint: &'static str,
        status: u16,
        message: Option<String>,
    },

    /// The stored bearer credential was not accepted by the API.
    #[error("stored credential rejected with status {status}{}", detail(.message))]
    TokenRejected { status: u16, message: Option<String> },

    /// Reading or writing persisted credentials failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

fn detail(message: &Option<String>) -> String {
    message
        .as_deref()
        .map(|m| format!(": {m}"))
        .unwrap_or_default()
}

/// Errors from a [`CredentialStore`](crate::CredentialStore).
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Reading or writing the backing file failed.
    #[error("credential store I/O failed at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The backing file exists but is not a JSON object of strings.
    #[error("credential store at {path} is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The stored user snapshot could not be encoded or decoded.
    #[error("user snapshot unusable: {0}")]
    Snapshot(#[source] ProtocolError),
}

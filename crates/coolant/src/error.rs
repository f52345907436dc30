//! Unified error type for the Coolant console.

use coolant_access::AccessError;
use coolant_protocol::ProtocolError;
use coolant_session::{SessionError, StoreError};
use coolant_transport::TransportError;

/// Top-level error that wraps all crate-specific errors.
///
/// The `#[from]` attribute on each variant lets `?` convert sub-crate
/// errors automatically.
#[derive(Debug, thiserror::Error)]
pub enum ConsoleError {
    /// No response from the API (connection, timeout, bad base URL).
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A body could not be encoded or decoded.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// An authentication operation failed.
    #[error(transparent)]
    Session(#[from] SessionError),

    /// The credential store could not be read or written.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The access policy refused a view or action.
    #[error(transparent)]
    Access(#[from] AccessError),

    /// An authorized API call answered with a non-success status.
    #[error("{method} {path} failed with status {status}")]
    Status {
        method: coolant_transport::Method,
        path: String,
        status: u16,
        message: Option<String>,
    },
}

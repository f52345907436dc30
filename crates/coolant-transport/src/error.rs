/// Errors that can occur in the transport layer.
///
/// A non-success HTTP status is not an error here; see
/// [`ApiResponse::is_success`](crate::ApiResponse::is_success).
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The base URL is not an absolute `http`/`https` URL.
    #[error("invalid base url: {0}")]
    InvalidUrl(String),

    /// Building the underlying HTTP client failed.
    #[cfg(feature = "http")]
    #[error("http client setup failed: {0}")]
    Client(#[source] reqwest::Error),

    /// The request could not be sent or no response arrived.
    #[cfg(feature = "http")]
    #[error("request failed: {0}")]
    Request(#[source] reqwest::Error),

    /// The response arrived but its body could not be read.
    #[cfg(feature = "http")]
    #[error("reading response body failed: {0}")]
    Body(#[source] reqwest::Error),

    /// The peer could not be reached.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),
}

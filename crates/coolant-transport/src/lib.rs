//! Transport abstraction layer for the Coolant console.
//!
//! Provides the [`Transport`] trait: one request in, one response out.
//! Everything above this crate (session, access, facade) talks to the REST
//! API through it, so tests can swap the network for a scripted fake.
//!
//! # Feature Flags
//!
//! - `http` (default) — HTTP transport via `reqwest`

mod error;
#[cfg(feature = "http")]
mod http;

pub use error::TransportError;
#[cfg(feature = "http")]
pub use http::HttpTransport;

use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Counter for generating unique request IDs.
static NEXT_REQUEST_ID: AtomicU64 = AtomicU64::new(1);

/// Opaque identifier for a request, used to correlate log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestId(u64);

impl RequestId {
    /// Creates a new `RequestId` from a raw `u64`.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Allocates the next process-unique request ID.
    pub fn next() -> Self {
        Self(NEXT_REQUEST_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Returns the underlying `u64` value.
    pub fn into_inner(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "req-{}", self.0)
    }
}

/// HTTP method of an [`ApiRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "GET"),
            Self::Post => write!(f, "POST"),
            Self::Put => write!(f, "PUT"),
            Self::Delete => write!(f, "DELETE"),
        }
    }
}

/// A single REST call, relative to the transport's base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub id: RequestId,
    pub method: Method,
    /// Path below the base URL, e.g. `/login`.
    pub path: String,
    /// Bearer credential sent as `Authorization: Bearer <token>`.
    pub bearer: Option<String>,
    /// JSON body. When present the request is sent as `application/json`.
    pub body: Option<Vec<u8>>,
}

impl ApiRequest {
    /// Creates a request with no credential and no body.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            id: RequestId::next(),
            method,
            path: path.into(),
            bearer: None,
            body: None,
        }
    }

    /// Shorthand for a `GET` request.
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    /// Shorthand for a `POST` request carrying `body`.
    pub fn post(path: impl Into<String>, body: Vec<u8>) -> Self {
        Self::new(Method::Post, path).with_body(body)
    }

    /// Attaches a bearer credential.
    pub fn with_bearer(mut self, token: impl Into<String>) -> Self {
        self.bearer = Some(token.into());
        self
    }

    /// Attaches a JSON body.
    pub fn with_body(mut self, body: Vec<u8>) -> Self {
        self.body = Some(body);
        self
    }
}

/// The server's answer to an [`ApiRequest`].
///
/// Non-success statuses are NOT transport errors: the transport only fails
/// when no response was obtained at all. Callers decide what a 401 means.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl ApiResponse {
    /// Creates a response from a status and raw body.
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Returns `true` for 2xx statuses (the `response.ok` check).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends requests to the REST API.
///
/// Implementations perform exactly one round-trip per call. There is no
/// retry and no cancellation at this layer.
///
/// ## Why `impl Future` instead of `async fn`?
///
/// Writing `async fn send(...)` in a public trait would compile, but callers
/// could not rely on the returned future being `Send`. The session manager
/// is driven from Tokio tasks that may hop between worker threads, so the
/// future has to be `Send`. Spelling the return type out as
/// `impl Future<Output = ...> + Send` states that promise in the signature.
/// Implementors can still write a plain `async fn send` in their `impl`
/// block; the compiler checks it against this signature.
///
/// ## Trait bounds
///
/// - `Send + Sync` → one transport is shared by reference across tasks.
/// - `'static` → it owns its connection pool and borrows nothing.
pub trait Transport: Send + Sync + 'static {
    /// Sends the request and waits for the full response.
    ///
    /// # Errors
    /// Returns a [`TransportError`] when the request could not be sent or no
    /// response body could be read.
    fn send(
        &self,
        request: ApiRequest,
    ) -> impl Future<Output = Result<ApiResponse, TransportError>> + Send;
}

/// Shares one transport between several owners (the session manager and
/// the authorized API client use the same connection pool).
impl<T: Transport> Transport for Arc<T> {
    fn send(
        &self,
        request: ApiRequest,
    ) -> impl Future<Output = Result<ApiResponse, TransportError>> + Send {
        (**self).send(request)
    }
}

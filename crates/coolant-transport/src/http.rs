//! HTTP transport implementation using `reqwest`.

use std::time::Duration;

use reqwest::header::CONTENT_TYPE;

use crate::{ApiRequest, ApiResponse, Method, Transport, TransportError};

/// A `reqwest`-backed [`Transport`] rooted at a fixed base URL.
///
/// Paths in [`ApiRequest`] are appended to the base URL, so a base of
/// `http://localhost:5000/api` and a path of `/login` hit
/// `http://localhost:5000/api/login`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    /// Creates a transport with no request timeout.
    ///
    /// # Errors
    /// Returns [`TransportError::InvalidUrl`] unless `base_url` parses as an
    /// absolute `http`/`https` URL with a host.
    pub fn new(base_url: &str) -> Result<Self, TransportError> {
        Self::with_timeout(base_url, None)
    }

    /// Creates a transport, optionally bounding every request by `timeout`.
    ///
    /// # Errors
    /// Returns [`TransportError::InvalidUrl`] for a malformed base URL and
    /// [`TransportError::Client`] if the HTTP client cannot be built.
    pub fn with_timeout(
        base_url: &str,
        timeout: Option<Duration>,
    ) -> Result<Self, TransportError> {
        let parsed = reqwest::Url::parse(base_url)
            .map_err(|e| TransportError::InvalidUrl(format!("{base_url}: {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(TransportError::InvalidUrl(format!(
                "{base_url}: scheme must be http or https"
            )));
        }
        if parsed.host_str().is_none_or(str::is_empty) {
            return Err(TransportError::InvalidUrl(format!("{base_url}: missing host")));
        }

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(TransportError::Client)?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Returns the base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

fn to_reqwest(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Delete => reqwest::Method::DELETE,
    }
}

impl Transport for HttpTransport {
    async fn send(
        &self,
        request: ApiRequest,
    ) -> Result<ApiResponse, TransportError> {
        let url = self.url_for(&request.path);
        let mut builder = self.client.request(to_reqwest(request.method), &url);

        if let Some(token) = &request.bearer {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = request.body {
            builder = builder.header(CONTENT_TYPE, "application/json").body(body);
        }

        tracing::debug!(
            id = %request.id,
            method = %request.method,
            %url,
            authenticated = request.bearer.is_some(),
            "sending request"
        );

        let response = builder.send().await.map_err(TransportError::Request)?;
        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(TransportError::Body)?;

        tracing::debug!(id = %request.id, status, len = body.len(), "response received");

        Ok(ApiResponse::new(status, body.to_vec()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_relative_base_url() {
        let result = HttpTransport::new("localhost:5000/api");
        assert!(matches!(result, Err(TransportError::InvalidUrl(_))));
    }

    #[test]
    fn test_new_rejects_malformed_base_urls() {
        for base in [
            "http://",
            "http:// not a host",
            "https://exa mple.com/api",
            "ftp://files.example.com",
            "mailto:ops@example.com",
            "",
        ] {
            let result = HttpTransport::new(base);
            assert!(
                matches!(result, Err(TransportError::InvalidUrl(_))),
                "{base:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_new_accepts_host_with_port_and_path() {
        assert!(HttpTransport::new("http://127.0.0.1:5000/api").is_ok());
        assert!(HttpTransport::new("https://coolant.example.com").is_ok());
    }

    #[test]
    fn test_new_trims_trailing_slash() {
        let transport = HttpTransport::new("http://localhost:5000/api/").unwrap();
        assert_eq!(transport.base_url(), "http://localhost:5000/api");
    }

    #[test]
    fn test_url_for_joins_with_single_slash() {
        let transport = HttpTransport::new("http://localhost:5000/api").unwrap();
        assert_eq!(transport.url_for("/login"), "http://localhost:5000/api/login");
        assert_eq!(transport.url_for("profile"), "http://localhost:5000/api/profile");
    }

    #[test]
    fn test_to_reqwest_maps_every_method() {
        assert_eq!(to_reqwest(Method::Get), reqwest::Method::GET);
        assert_eq!(to_reqwest(Method::Post), reqwest::Method::POST);
        assert_eq!(to_reqwest(Method::Put), reqwest::Method::PUT);
        assert_eq!(to_reqwest(Method::Delete), reqwest::Method::DELETE);
    }
}

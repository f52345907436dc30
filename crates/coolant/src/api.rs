//! Authorized calls to the rest of the REST API.
//!
//! Every page of the console beyond the login flow talks to the API through
//! [`ApiClient`]: it reads the persisted bearer token on each call and
//! attaches it when present, so a logout takes effect on the very next
//! request.

use std::sync::Arc;

use coolant_protocol::{ApiErrorBody, Codec, JsonCodec};
use coolant_session::{CredentialStore, Credentials};
use coolant_transport::{ApiRequest, ApiResponse, Method, Transport};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::ConsoleError;

/// Sends requests with the persisted credential attached.
pub struct ApiClient<T: Transport, C: Codec = JsonCodec> {
    transport: T,
    store: Arc<dyn CredentialStore>,
    codec: C,
}

impl<T: Transport> ApiClient<T> {
    pub fn new(transport: T, store: Arc<dyn CredentialStore>) -> Self {
        Self {
            transport,
            store,
            codec: JsonCodec,
        }
    }
}

impl<T: Transport, C: Codec> ApiClient<T, C> {
    /// Sends one request, adding `Authorization: Bearer <token>` when a token
    /// is stored. Any status comes back as a response; only a missing
    /// response is an error.
    ///
    /// # Errors
    /// [`ConsoleError::Store`] if the token cannot be read,
    /// [`ConsoleError::Transport`] if no response arrives.
    pub async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<Vec<u8>>,
    ) -> Result<ApiResponse, ConsoleError> {
        let mut request = ApiRequest::new(method, path);
        if let Some(token) = Credentials::new(self.store.as_ref()).load_token()? {
            request = request.with_bearer(token);
        }
        if let Some(body) = body {
            request = request.with_body(body);
        }

        let id = request.id;
        match self.transport.send(request).await {
            Ok(response) => {
                tracing::debug!(request_id = %id, %method, path, status = response.status, "api call");
                Ok(response)
            }
            Err(e) => {
                tracing::error!(request_id = %id, %method, path, error = %e, "api call failed");
                Err(e.into())
            }
        }
    }

    /// # Errors
    /// See [`send`](Self::send).
    pub async fn get(&self, path: &str) -> Result<ApiResponse, ConsoleError> {
        self.send(Method::Get, path, None).await
    }

    /// # Errors
    /// See [`send`](Self::send); also fails if `body` cannot be encoded.
    pub async fn post<B: Serialize>(&self, path: &str, body: &B) -> Result<ApiResponse, ConsoleError> {
        let payload = self.codec.encode(body)?;
        self.send(Method::Post, path, Some(payload)).await
    }

    /// # Errors
    /// See [`post`](Self::post).
    pub async fn put<B: Serialize>(&self, path: &str, body: &B) -> Result<ApiResponse, ConsoleError> {
        let payload = self.codec.encode(body)?;
        self.send(Method::Put, path, Some(payload)).await
    }

    /// # Errors
    /// See [`send`](Self::send).
    pub async fn delete(&self, path: &str) -> Result<ApiResponse, ConsoleError> {
        self.send(Method::Delete, path, None).await
    }

    /// `GET` and decode a 2xx body.
    ///
    /// # Errors
    /// [`ConsoleError::Status`] for non-2xx answers, plus everything
    /// [`send`](Self::send) and decoding can return.
    pub async fn get_json<R: DeserializeOwned>(&self, path: &str) -> Result<R, ConsoleError> {
        let response = self.get(path).await?;
        self.decode(Method::Get, path, response)
    }

    /// `POST` a JSON body and decode a 2xx answer.
    ///
    /// # Errors
    /// As [`get_json`](Self::get_json).
    pub async fn post_json<B: Serialize, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<R, ConsoleError> {
        let response = self.post(path, body).await?;
        self.decode(Method::Post, path, response)
    }

    fn decode<R: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        response: ApiResponse,
    ) -> Result<R, ConsoleError> {
        if !response.is_success() {
            let message = self
                .codec
                .decode::<ApiErrorBody>(&response.body)
                .ok()
                .and_then(ApiErrorBody::detail);
            return Err(ConsoleError::Status {
                method,
                path: path.to_string(),
                status: response.status,
                message,
            });
        }
        Ok(self.codec.decode(&response.body)?)
    }
}

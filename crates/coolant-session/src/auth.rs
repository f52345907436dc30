//! Typed client for the authentication endpoints.
//!
//! [`AuthClient`] turns each [`Endpoint`] into one transport round-trip and
//! classifies the outcome:
//!
//! - no response → [`SessionError::Transport`]
//! - non-2xx on `/profile` → [`SessionError::TokenRejected`]
//! - non-2xx elsewhere → [`SessionError::Rejected`]
//! - 2xx with an unexpected body → [`SessionError::Protocol`]
//!
//! It holds no state; the [`SessionManager`](crate::SessionManager) decides
//! what each outcome means for the session.

use coolant_protocol::{
    ApiErrorBody, Codec, Endpoint, ForgotPasswordRequest, ForgotPasswordResponse,
    JsonCodec, LoginRequest, LoginResponse, ResetPasswordRequest, User,
};
use coolant_transport::{ApiRequest, Transport};

use crate::SessionError;

/// Calls the authentication endpoints over a [`Transport`].
pub struct AuthClient<T: Transport, C: Codec = JsonCodec> {
    transport: T,
    codec: C,
}

impl<T: Transport> AuthClient<T> {
    /// Creates a client using [`JsonCodec`].
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            codec: JsonCodec,
        }
    }
}

impl<T: Transport, C: Codec> AuthClient<T, C> {
    pub fn with_codec(transport: T, codec: C) -> Self {
        Self { transport, codec }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// `GET /profile` with the stored bearer credential.
    ///
    /// # Errors
    /// [`SessionError::TokenRejected`] when the API refuses the token.
    pub async fn fetch_profile(&self, token: &str) -> Result<User, SessionError> {
        let body = self.call(Endpoint::Profile, None, Some(token)).await?;
        Ok(self.codec.decode(&body)?)
    }

    /// `POST /login`.
    ///
    /// # Errors
    /// [`SessionError::Rejected`] on bad credentials.
    pub async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, SessionError> {
        let payload = self.codec.encode(request)?;
        let body = self.call(Endpoint::Login, Some(payload), None).await?;
        Ok(self.codec.decode(&body)?)
    }

    /// `POST /forgot-password`.
    ///
    /// # Errors
    /// [`SessionError::Rejected`] if the API refuses the request.
    pub async fn forgot_password(
        &self,
        request: &ForgotPasswordRequest,
    ) -> Result<ForgotPasswordResponse, SessionError> {
        let payload = self.codec.encode(request)?;
        let body = self.call(Endpoint::ForgotPassword, Some(payload), None).await?;
        Ok(self.codec.decode(&body)?)
    }

    /// `POST /reset-password`. The response body is ignored.
    ///
    /// # Errors
    /// [`SessionError::Rejected`] for an unknown or expired reset token.
    pub async fn reset_password(&self, request: &ResetPasswordRequest) -> Result<(), SessionError> {
        let payload = self.codec.encode(request)?;
        self.call(Endpoint::ResetPassword, Some(payload), None).await?;
        Ok(())
    }

    async fn call(
        &self,
        endpoint: Endpoint,
        payload: Option<Vec<u8>>,
        bearer: Option<&str>,
    ) -> Result<Vec<u8>, SessionError> {
        let mut request = ApiRequest::new(endpoint.method(), endpoint.path());
        if let Some(token) = bearer {
            request = request.with_bearer(token);
        }
        if let Some(payload) = payload {
            request = request.with_body(payload);
        }

        let response = self.transport.send(request).await?;
        if response.is_success() {
            return Ok(response.body);
        }

        let message = match self.codec.decode::<ApiErrorBody>(&response.body) {
            Ok(body) => body.detail(),
            Err(_) => plain_text(&response.body),
        };
        let status = response.status;

        Err(if endpoint.requires_bearer() {
            SessionError::TokenRejected { status, message }
        } else {
            SessionError::Rejected {
                endpoint: endpoint.path(),
                status,
                message,
            }
        })
    }
}

/// Some failures answer with a bare text body such as `Invalid credentials`.
fn plain_text(body: &[u8]) -> Option<String> {
    let text = std::str::from_utf8(body).ok()?.trim();
    (!text.is_empty()).then(|| text.to_string())
}

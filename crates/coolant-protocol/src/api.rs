//! REST contract of the authentication endpoints.
//!
//! The console only relies on what it can observe from the client side:
//! method, path, whether a bearer credential is attached, and the JSON
//! shapes below.

use coolant_transport::Method;
use serde::{Deserialize, Serialize};

use crate::User;

// ---------------------------------------------------------------------------
// Endpoint table
// ---------------------------------------------------------------------------

/// The authentication endpoints the session layer calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// `GET /profile` (bearer) → [`User`]
    Profile,
    /// `POST /login` → [`LoginResponse`]
    Login,
    /// `POST /forgot-password` → [`ForgotPasswordResponse`]
    ForgotPassword,
    /// `POST /reset-password` → empty or ignored body
    ResetPassword,
}

impl Endpoint {
    pub fn method(&self) -> Method {
        match self {
            Self::Profile => Method::Get,
            Self::Login | Self::ForgotPassword | Self::ResetPassword => Method::Post,
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            Self::Profile => "/profile",
            Self::Login => "/login",
            Self::ForgotPassword => "/forgot-password",
            Self::ResetPassword => "/reset-password",
        }
    }

    /// Whether the endpoint expects `Authorization: Bearer <token>`.
    pub fn requires_bearer(&self) -> bool {
        matches!(self, Self::Profile)
    }
}

// ---------------------------------------------------------------------------
// Request bodies
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

/// Body of `POST /reset-password`. `token` is the reset token from the
/// emailed link, not a bearer credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResetPasswordRequest {
    pub token: String,
    pub password: String,
}

// ---------------------------------------------------------------------------
// Response bodies
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
}

/// Development servers echo the reset link back; production ones may not.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForgotPasswordResponse {
    #[serde(default)]
    pub reset_link: Option<String>,
}

/// Error body returned by the API on non-success statuses, e.g.
/// `{"message": "Token is invalid!", "error": "Signature has expired"}`.
/// Some failures (bad login) answer with plain text instead.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ApiErrorBody {
    /// The most specific human-readable text, `message` first.
    pub fn detail(self) -> Option<String> {
        self.message.or(self.error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Role, UserId};

    #[test]
    fn test_endpoint_table() {
        assert_eq!(Endpoint::Profile.method(), Method::Get);
        assert_eq!(Endpoint::Profile.path(), "/profile");
        assert!(Endpoint::Profile.requires_bearer());

        for endpoint in [
            Endpoint::Login,
            Endpoint::ForgotPassword,
            Endpoint::ResetPassword,
        ] {
            assert_eq!(endpoint.method(), Method::Post);
            assert!(!endpoint.requires_bearer());
        }
        assert_eq!(Endpoint::Login.path(), "/login");
        assert_eq!(Endpoint::ForgotPassword.path(), "/forgot-password");
        assert_eq!(Endpoint::ResetPassword.path(), "/reset-password");
    }

    #[test]
    fn test_reset_request_uses_password_field() {
        let body = ResetPasswordRequest {
            token: "rt".into(),
            password: "n3w".into(),
        };
        let json = serde_json::to_value(body).unwrap();
        assert_eq!(json, serde_json::json!({"token": "rt", "password": "n3w"}));
    }

    #[test]
    fn test_login_response_decodes() {
        let json = r#"{
            "token": "eyJ.abc",
            "user": {"id": 1, "fullName": "Root Admin", "email": "a@x.io", "role": "admin"}
        }"#;
        let resp: LoginResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.token, "eyJ.abc");
        assert_eq!(resp.user.id, UserId(1));
        assert_eq!(resp.user.role, Role::Admin);
    }

    #[test]
    fn test_error_body_prefers_message_over_error() {
        let body: ApiErrorBody =
            serde_json::from_str(r#"{"message":"Token is invalid!","error":"expired"}"#).unwrap();
        assert_eq!(body.detail().as_deref(), Some("Token is invalid!"));

        let body: ApiErrorBody = serde_json::from_str(r#"{"error":"expired"}"#).unwrap();
        assert_eq!(body.detail().as_deref(), Some("expired"));

        let body: ApiErrorBody = serde_json::from_str("{}").unwrap();
        assert_eq!(body.detail(), None);
    }

    #[test]
    fn test_forgot_password_response_reset_link_is_optional() {
        let with: ForgotPasswordResponse =
            serde_json::from_str(r#"{"reset_link":"http://x/reset-password/t"}"#).unwrap();
        assert_eq!(with.reset_link.as_deref(), Some("http://x/reset-password/t"));

        let without: ForgotPasswordResponse = serde_json::from_str("{}").unwrap();
        assert!(without.reset_link.is_none());
    }
}

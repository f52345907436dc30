//! Wire protocol for the Coolant console.
//!
//! This crate defines the vocabulary the console and the REST API share:
//!
//! - **Types** ([`User`], [`Role`], [`UserId`]) — who is logged in.
//! - **Routes** ([`Route`]) — the views the console can show.
//! - **API** ([`Endpoint`] and the request/response bodies) — the
//!   authentication contract as observed from the client.
//! - **Codec** ([`Codec`] trait, [`JsonCodec`]) — bodies to/from bytes.
//! - **Errors** ([`ProtocolError`]).
//!
//! ```text
//! Transport (bytes) → Protocol (typed bodies) → Session (who is logged in)
//! ```

mod api;
mod codec;
mod error;
mod route;
mod types;

pub use api::{
    ApiErrorBody, Endpoint, ForgotPasswordRequest, ForgotPasswordResponse,
    LoginRequest, LoginResponse, ResetPasswordRequest,
};
pub use codec::Codec;
#[cfg(feature = "json")]
pub use codec::JsonCodec;
pub use error::ProtocolError;
pub use route::Route;
pub use types::{Role, User, UserId};

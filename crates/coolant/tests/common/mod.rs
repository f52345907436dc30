//! Common Test Utilities for Integration Tests
//!
//! A stub Coolant API served by an `axum::Router` on `127.0.0.1:0`. It knows
//! two accounts, records every request it sees, and answers the handful of
//! endpoints the console touches end to end.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::body::{Body, to_bytes};
use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::http::{HeaderMap, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

pub const ADMIN_EMAIL: &str = "ada@coolant.test";
pub const ADMIN_PASSWORD: &str = "admin-pass";
pub const ADMIN_TOKEN: &str = "tok-admin";

pub const CLIENT_EMAIL: &str = "cleo@coolant.test";
pub const CLIENT_PASSWORD: &str = "client-pass";
pub const CLIENT_TOKEN: &str = "tok-client";
pub const CLIENT_GST: &str = "27AAACC1234D1Z5";

pub const RESET_TOKEN: &str = "reset-ok";

/// A request as the stub saw it.
#[derive(Debug, Clone)]
pub struct Seen {
    pub method: String,
    /// Path with the `/api` prefix removed.
    pub path: String,
    pub authorization: Option<String>,
    pub body: String,
}

type Log = Arc<Mutex<Vec<Seen>>>;

pub struct Backend {
    pub base_url: String,
    seen: Log,
    task: JoinHandle<()>,
}

impl Backend {
    pub fn requests(&self) -> Vec<Seen> {
        self.seen.lock().unwrap().clone()
    }

    pub fn paths(&self) -> Vec<String> {
        self.requests().into_iter().map(|s| s.path).collect()
    }
}

impl Drop for Backend {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Create the stub API router, recording every request into `seen`.
pub fn create_stub_api(seen: Log) -> Router {
    Router::new()
        .route("/api/login", post(login))
        .route("/api/profile", get(profile))
        .route("/api/forgot-password", post(forgot_password))
        .route("/api/reset-password", post(reset_password))
        .route("/api/machines", get(machines))
        .fallback(not_found)
        .layer(middleware::from_fn_with_state(seen, record))
}

/// Starts the stub API and returns its base URL (ending in `/api`).
pub async fn spawn_backend() -> Backend {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("should bind");
    let addr = listener.local_addr().expect("should have addr");
    let seen: Log = Arc::new(Mutex::new(Vec::new()));
    let app = create_stub_api(Arc::clone(&seen));

    let task = tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve stub api");
    });

    Backend {
        base_url: format!("http://{addr}/api"),
        seen,
        task,
    }
}

async fn record(State(seen): State<Log>, request: Request, next: Next) -> Response {
    let (parts, body) = request.into_parts();
    let Ok(bytes) = to_bytes(body, usize::MAX).await else {
        return StatusCode::BAD_REQUEST.into_response();
    };

    let path = parts.uri.path();
    seen.lock().unwrap().push(Seen {
        method: parts.method.to_string(),
        path: path.strip_prefix("/api").unwrap_or(path).to_string(),
        authorization: parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body: String::from_utf8_lossy(&bytes).to_string(),
    });

    next.run(Request::from_parts(parts, Body::from(bytes))).await
}

pub fn admin_json() -> Value {
    json!({
        "id": 1,
        "fullName": "Ada Admin",
        "email": ADMIN_EMAIL,
        "role": "admin",
        "designation": "Head of Operations",
        "companyName": null,
        "profileImage": null
    })
}

pub fn client_json() -> Value {
    json!({
        "id": 6,
        "fullName": "Cleo Client",
        "email": CLIENT_EMAIL,
        "role": "client",
        "designation": null,
        "phoneNumber": "555-0100",
        "companyName": CLIENT_GST,
        "profileImage": null
    })
}

fn bearer_user(headers: &HeaderMap) -> Option<Value> {
    let token = headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")?;
    match token {
        ADMIN_TOKEN => Some(admin_json()),
        CLIENT_TOKEN => Some(client_json()),
        _ => None,
    }
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({"message": "Token is invalid!"})),
    )
        .into_response()
}

async fn login(Json(body): Json<Value>) -> Response {
    let email = body["email"].as_str().unwrap_or_default();
    let password = body["password"].as_str().unwrap_or_default();
    match (email, password) {
        (ADMIN_EMAIL, ADMIN_PASSWORD) => {
            Json(json!({"token": ADMIN_TOKEN, "user": admin_json()})).into_response()
        }
        (CLIENT_EMAIL, CLIENT_PASSWORD) => {
            Json(json!({"token": CLIENT_TOKEN, "user": client_json()})).into_response()
        }
        // The real API answers a bad password in plain text.
        _ => (StatusCode::UNAUTHORIZED, "Invalid credentials").into_response(),
    }
}

async fn profile(headers: HeaderMap) -> Response {
    match bearer_user(&headers) {
        Some(user) => Json(user).into_response(),
        None => unauthorized(),
    }
}

async fn forgot_password(Json(body): Json<Value>) -> Response {
    match body["email"].as_str() {
        Some(ADMIN_EMAIL | CLIENT_EMAIL) => Json(json!({
            "message": "Password reset link has been sent to your email!",
            "reset_link": format!("http://localhost:5173/reset-password/{RESET_TOKEN}")
        }))
        .into_response(),
        _ => (
            StatusCode::NOT_FOUND,
            Json(json!({"message": "User not found!"})),
        )
            .into_response(),
    }
}

async fn reset_password(Json(body): Json<Value>) -> Response {
    match body["token"].as_str() {
        Some(RESET_TOKEN) => {
            Json(json!({"message": "Password updated successfully!"})).into_response()
        }
        _ => (
            StatusCode::BAD_REQUEST,
            Json(json!({"message": "Invalid or expired token!"})),
        )
            .into_response(),
    }
}

async fn machines(headers: HeaderMap) -> Response {
    match bearer_user(&headers) {
        Some(_) => Json(json!([{"machine_id": 1, "machine_name": "Lathe 1"}])).into_response(),
        None => unauthorized(),
    }
}

async fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Json(json!({"message": "Not found"}))).into_response()
}

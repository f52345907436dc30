//! Shared fixtures for unit tests in this crate.

use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};

use coolant_protocol::{Role, User, UserId};
use coolant_transport::{ApiRequest, ApiResponse, Transport, TransportError};
use tokio::sync::Semaphore;

use crate::{CredentialStore, MemoryStore, StoreError};

/// A transport that answers from a queue and records every request.
///
/// With a gate, each `send` waits for one permit before answering, which
/// lets a test observe the session while a call is in flight.
#[derive(Default)]
pub struct ScriptedTransport {
    replies: Mutex<VecDeque<Result<ApiResponse, TransportError>>>,
    requests: Mutex<Vec<ApiRequest>>,
    gate: Option<Arc<Semaphore>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn gated(gate: Arc<Semaphore>) -> Self {
        Self {
            gate: Some(gate),
            ..Self::default()
        }
    }

    pub fn reply(&self, status: u16, body: &str) -> &Self {
        self.push(Ok(ApiResponse::new(status, body)))
    }

    pub fn fail(&self, message: &str) -> &Self {
        self.push(Err(TransportError::ConnectionFailed(message.into())))
    }

    fn push(&self, reply: Result<ApiResponse, TransportError>) -> &Self {
        self.replies
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(reply);
        self
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Transport for ScriptedTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request);

        if let Some(gate) = &self.gate {
            let permit = gate
                .acquire()
                .await
                .map_err(|e| TransportError::ConnectionFailed(e.to_string()))?;
            permit.forget();
        }

        self.replies
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::ConnectionFailed("no scripted reply".into())))
    }
}

/// A [`MemoryStore`] that fails every write to one key. It keeps the
/// provided `set_many`, so a batch that reaches that key has to roll back.
pub struct RefusesKey {
    pub inner: MemoryStore,
    refused: &'static str,
}

impl RefusesKey {
    pub fn new(refused: &'static str) -> Self {
        Self {
            inner: MemoryStore::new(),
            refused,
        }
    }
}

impl CredentialStore for RefusesKey {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        if key == self.refused {
            return Err(StoreError::Io {
                path: PathBuf::from("credentials.json"),
                source: std::io::Error::other("disk full"),
            });
        }
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.inner.remove(key)
    }
}

pub fn user(role: Role) -> User {
    User {
        id: UserId(7),
        full_name: "Mona Ager".into(),
        email: "mona@example.com".into(),
        role,
        designation: Some("Plant Manager".into()),
        company_name: Some("Acme Coolants".into()),
        profile_image: None,
    }
}

/// The JSON the API sends for [`user`].
pub fn user_json(role: Role) -> String {
    format!(
        r#"{{"id":7,"fullName":"Mona Ager","email":"mona@example.com","role":"{role}","designation":"Plant Manager","companyName":"Acme Coolants"}}"#
    )
}

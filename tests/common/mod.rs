//! In-memory fakes for the API seams.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::marker::PhantomData;
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Value};
use tokio::sync::Notify;

use gestinfo::prelude::*;

pub const EMAIL: &str = "tech@gestinfo.fr";
pub const PASSWORD: &str = "secret";
pub const TOKEN: &str = "tok-123";

// ─── Login ───────────────────────────────────────────────────────────────────

/// Accepts one email/password pair.
///
/// Answers with a raw login body run through the wire format, so user
/// payloads of any shape exercise the real deserialization.
#[derive(Default)]
pub struct FakeLogin {
    pub calls: AtomicUsize,
    /// `user` field of the login body.
    pub user: Option<Value>,
    /// Tokens handed out by successive logins; `TOKEN` once exhausted.
    pub tokens: Mutex<VecDeque<String>>,
}

impl FakeLogin {
    pub fn with_user() -> Self {
        Self::with_user_json(json!({
            "id": 7,
            "email": EMAIL,
            "nom": "Durand",
            "prenom": "Paul"
        }))
    }

    pub fn with_user_json(user: Value) -> Self {
        Self {
            user: Some(user),
            ..Self::default()
        }
    }

    /// Each login returns the next of `tokens`.
    pub fn issuing(tokens: &[&str]) -> Self {
        Self {
            tokens: Mutex::new(tokens.iter().map(|t| t.to_string()).collect()),
            ..Self::default()
        }
    }
}

#[async_trait]
impl AuthApi for FakeLogin {
    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, GestinfoError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if request.email != EMAIL || request.password != PASSWORD {
            return Err(AuthError::LoginFailed("Invalid credentials".to_string()).into());
        }
        let token = self
            .tokens
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| TOKEN.to_string());
        let body = json!({ "token": token, "user": self.user.clone() });
        Ok(serde_json::from_value(body)?)
    }
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// [`MemoryStore`] that counts writes.
#[derive(Default)]
pub struct CountingStore {
    pub inner: MemoryStore,
    pub sets: AtomicUsize,
}

impl CountingStore {
    pub fn with_entries(entries: &[(&str, &str)]) -> Self {
        Self {
            inner: MemoryStore::with_entries(entries.iter().copied()),
            sets: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl CredentialStore for CountingStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.sets.fetch_add(1, Ordering::SeqCst);
        self.inner.set(key, value).await
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.inner.delete(key).await
    }
}

// ─── Resource API ────────────────────────────────────────────────────────────

/// A scripted failure for the next call.
pub enum Failure {
    Message(String),
    /// Typed 401, as the HTTP layer reports it.
    Unauthorized,
}

impl Failure {
    fn into_error(self) -> GestinfoError {
        match self {
            Failure::Message(message) => GestinfoError::Other(message),
            Failure::Unauthorized => HttpError::Unauthorized.into(),
        }
    }
}

/// Server-side collection for one resource.
///
/// Missing ids answer with a typed 404, as the HTTP layer reports them.
///
/// Records are kept raw so tests can hand out partial payloads.
pub struct FakeApi<R> {
    pub records: Mutex<Vec<Value>>,
    pub calls: Mutex<Vec<String>>,
    /// Next call fails with this. A gated `list` checks it once released.
    pub fail_next: Mutex<Option<Failure>>,
    /// When set, `list` waits for a notification before answering.
    pub gate: Option<Arc<Notify>>,
    next_id: AtomicI64,
    _resource: PhantomData<fn() -> R>,
}

impl<R: Resource> FakeApi<R> {
    pub fn new(records: Vec<Value>) -> Self {
        Self {
            records: Mutex::new(records),
            calls: Mutex::new(Vec::new()),
            fail_next: Mutex::new(None),
            gate: None,
            next_id: AtomicI64::new(100),
            _resource: PhantomData,
        }
    }

    pub fn gated(records: Vec<Value>, gate: Arc<Notify>) -> Self {
        Self {
            gate: Some(gate),
            ..Self::new(records)
        }
    }

    pub fn fail_next_with(&self, message: &str) {
        *self.fail_next.lock().unwrap() = Some(Failure::Message(message.to_string()));
    }

    pub fn reject_next(&self) {
        *self.fail_next.lock().unwrap() = Some(Failure::Unauthorized);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, token: &str, call: String) {
        assert!(token.starts_with(TOKEN), "API called with an unexpected token");
        self.calls.lock().unwrap().push(call);
    }

    fn scripted_failure(&self) -> Result<(), GestinfoError> {
        match self.fail_next.lock().unwrap().take() {
            Some(failure) => Err(failure.into_error()),
            None => Ok(()),
        }
    }

    fn not_found(id: i64) -> GestinfoError {
        HttpError::NotFound(format!("{} {id} introuvable", R::NAME)).into()
    }
}

#[async_trait]
impl<R: Resource> ResourceApi<R> for FakeApi<R> {
    async fn list(&self, token: &str) -> Result<Vec<Value>, GestinfoError> {
        self.record(token, "list".to_string());
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        self.scripted_failure()?;
        Ok(self.records.lock().unwrap().clone())
    }

    async fn get(&self, token: &str, id: i64) -> Result<Value, GestinfoError> {
        self.record(token, format!("get {id}"));
        self.scripted_failure()?;
        self.records
            .lock()
            .unwrap()
            .iter()
            .find(|r| r["id"] == id)
            .cloned()
            .ok_or_else(|| Self::not_found(id))
    }

    async fn create(&self, token: &str, data: &Value) -> Result<Value, GestinfoError> {
        self.record(token, "create".to_string());
        self.scripted_failure()?;
        let mut created = data.clone();
        created["id"] = json!(self.next_id.fetch_add(1, Ordering::SeqCst));
        self.records.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn update(&self, token: &str, id: i64, patch: &Value) -> Result<Value, GestinfoError> {
        self.record(token, format!("update {id}"));
        self.scripted_failure()?;
        let mut records = self.records.lock().unwrap();
        let record = records
            .iter_mut()
            .find(|r| r["id"] == id)
            .ok_or_else(|| Self::not_found(id))?;
        if let (Some(target), Some(fields)) = (record.as_object_mut(), patch.as_object()) {
            for (k, v) in fields {
                target.insert(k.clone(), v.clone());
            }
        }
        Ok(record.clone())
    }

    async fn delete(&self, token: &str, id: i64) -> Result<(), GestinfoError> {
        self.record(token, format!("delete {id}"));
        self.scripted_failure()?;
        let mut records = self.records.lock().unwrap();
        let before = records.len();
        records.retain(|r| r["id"] != id);
        if records.len() == before {
            return Err(Self::not_found(id));
        }
        Ok(())
    }
}

// ─── Fixtures ────────────────────────────────────────────────────────────────

pub async fn signed_in_session() -> Arc<SessionManager> {
    let session = Arc::new(SessionManager::new(
        Arc::new(MemoryStore::new()),
        Arc::new(FakeLogin::default()),
    ));
    session.restore().await;
    session
        .sign_in(EMAIL, PASSWORD)
        .await
        .expect("fake login accepts the fixture credentials");
    session
}

pub async fn signed_out_session() -> Arc<SessionManager> {
    let session = Arc::new(SessionManager::new(
        Arc::new(MemoryStore::new()),
        Arc::new(FakeLogin::default()),
    ));
    session.restore().await;
    session
}

pub fn email_records() -> Vec<Value> {
    vec![
        json!({"id": 1, "adresse": "contact@acme.fr", "statut": "actif",
               "client": {"id": 10, "raison_sociale": "ACME"}}),
        json!({"id": 2, "adresse": "compta@dupont.fr", "quota": 5}),
        json!({"id": 3, "adresse": "info@martin.fr", "client_id": "12"}),
    ]
}

pub fn visit_records() -> Vec<Value> {
    vec![
        json!({"id": 1, "date_visite": "2026-10-20", "statut": "Programmée",
               "technicien": "Paul", "client": {"nom": "Martin"}}),
        json!({"id": 2, "date_visite": "2026-09-02", "statut": "Effectuée",
               "technicien": "Paul", "client": {"nom": "Martin"}}),
        json!({"id": 3, "date_visite": "2026-10-22", "statut": "programmée",
               "technicien": "Inès", "client": {"raison_sociale": "ACME"}}),
    ]
}

//! High-level client: `GestinfoClient` with per-resource sub-clients.
//!
//! Sub-clients implement the API seams ([`ResourceApi`], [`AuthApi`]) that
//! the session manager and the hooks consume, so the same hooks run against
//! HTTP in production and against in-memory fakes in tests.

use crate::auth::client::Auth;
use crate::domain::client::Client;
use crate::domain::contrat::Contrat;
use crate::domain::email::Email;
use crate::domain::hebergement::Hebergement;
use crate::domain::leasing::NexLease;
use crate::domain::materiel::Materiel;
use crate::domain::site::Site;
use crate::domain::visite::Visite;
use crate::domain::{Resource, ResourceApi};
use crate::error::GestinfoError;
use crate::http::{GestinfoHttp, RetryConfig};
use crate::network::{API_URL_ENV, DEFAULT_API_URL, HTTP_TIMEOUT_ENV};

use async_trait::async_trait;
use serde_json::Value;
use std::marker::PhantomData;
use std::time::Duration;

pub use crate::auth::client::Auth as AuthClient;

/// The REST entry point.
#[derive(Clone)]
pub struct GestinfoClient {
    pub(crate) http: GestinfoHttp,
}

impl GestinfoClient {
    pub fn builder() -> GestinfoClientBuilder {
        GestinfoClientBuilder::default()
    }

    pub fn base_url(&self) -> &str {
        self.http.base_url()
    }

    // ── Sub-client accessors ─────────────────────────────────────────────

    pub fn auth(&self) -> Auth {
        Auth {
            http: self.http.clone(),
        }
    }

    /// Sub-client for any resource, at its standard path.
    pub fn resource<R: Resource>(&self) -> RestResource<R> {
        RestResource::new(self.http.clone())
    }

    pub fn clients(&self) -> RestResource<Client> {
        self.resource()
    }

    pub fn contrats(&self) -> RestResource<Contrat> {
        self.resource()
    }

    pub fn sites(&self) -> RestResource<Site> {
        self.resource()
    }

    pub fn hebergements(&self) -> RestResource<Hebergement> {
        self.resource()
    }

    pub fn emails(&self) -> RestResource<Email> {
        self.resource()
    }

    pub fn visites(&self) -> RestResource<Visite> {
        self.resource()
    }

    /// Visits whose list is restricted to scheduled ones.
    pub fn programmed_visits(&self) -> RestResource<Visite> {
        self.resource().with_list_path("visites/programmees")
    }

    /// Clients that have never been visited. Writes go to `/clients`.
    pub fn clients_without_visit(&self) -> RestResource<Client> {
        self.resource().with_list_path("visites/clients-sans-visite")
    }

    pub fn materiels(&self) -> RestResource<Materiel> {
        self.resource()
    }

    pub fn leasings(&self) -> RestResource<NexLease> {
        self.resource()
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// RestResource
// ═════════════════════════════════════════════════════════════════════════════

/// [`ResourceApi`] over HTTP for one resource.
///
/// `GET {path}`, `GET {path}/{id}`, `POST {path}`, `PUT {path}/{id}`,
/// `DELETE {path}/{id}`, where `path` is `R::PATH`.
pub struct RestResource<R> {
    http: GestinfoHttp,
    list_path: String,
    _resource: PhantomData<fn() -> R>,
}

impl<R: Resource> RestResource<R> {
    pub fn new(http: GestinfoHttp) -> Self {
        Self {
            http,
            list_path: R::PATH.to_string(),
            _resource: PhantomData,
        }
    }

    /// List from `path` instead of `R::PATH`. Other operations are unchanged.
    pub fn with_list_path(mut self, path: &str) -> Self {
        self.list_path = path.trim_matches('/').to_string();
        self
    }

    pub fn list_path(&self) -> &str {
        &self.list_path
    }

    fn item_path(id: i64) -> String {
        format!("{}/{}", R::PATH, id)
    }
}

impl<R> Clone for RestResource<R> {
    fn clone(&self) -> Self {
        Self {
            http: self.http.clone(),
            list_path: self.list_path.clone(),
            _resource: PhantomData,
        }
    }
}

#[async_trait]
impl<R: Resource> ResourceApi<R> for RestResource<R> {
    async fn list(&self, token: &str) -> Result<Vec<Value>, GestinfoError> {
        Ok(self.http.get(&self.list_path, Some(token)).await?)
    }

    async fn get(&self, token: &str, id: i64) -> Result<Value, GestinfoError> {
        Ok(self.http.get(&Self::item_path(id), Some(token)).await?)
    }

    async fn create(&self, token: &str, data: &Value) -> Result<Value, GestinfoError> {
        Ok(self.http.post(R::PATH, Some(token), data).await?)
    }

    async fn update(&self, token: &str, id: i64, patch: &Value) -> Result<Value, GestinfoError> {
        Ok(self.http.put(&Self::item_path(id), Some(token), patch).await?)
    }

    async fn delete(&self, token: &str, id: i64) -> Result<(), GestinfoError> {
        Ok(self.http.delete(&Self::item_path(id), Some(token)).await?)
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// Builder
// ═════════════════════════════════════════════════════════════════════════════

pub struct GestinfoClientBuilder {
    base_url: String,
    timeout: Duration,
    reads: RetryConfig,
}

impl Default for GestinfoClientBuilder {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout: Duration::from_secs(30),
            reads: RetryConfig::reads(),
        }
    }
}

impl GestinfoClientBuilder {
    /// Defaults overridden by the environment (a `.env` file is loaded first
    /// when present): `GESTINFO_API_URL`, `GESTINFO_HTTP_TIMEOUT_SECS`.
    pub fn from_env() -> Self {
        if let Err(e) = dotenvy::dotenv() {
            tracing::debug!(error = %e, "No .env file loaded");
        }

        let mut builder = Self::default();
        if let Ok(url) = std::env::var(API_URL_ENV) {
            builder.base_url = url;
        }
        match std::env::var(HTTP_TIMEOUT_ENV).map(|s| s.parse::<u64>()) {
            Ok(Ok(secs)) => builder.timeout = Duration::from_secs(secs),
            Ok(Err(e)) => tracing::warn!(error = %e, "Ignoring invalid {}", HTTP_TIMEOUT_ENV),
            Err(_) => {}
        }
        builder
    }

    pub fn base_url(mut self, url: &str) -> Self {
        self.base_url = url.to_string();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Retry behavior for list and get-by-id requests. Writes never retry.
    pub fn read_retry(mut self, config: RetryConfig) -> Self {
        self.reads = config;
        self
    }

    pub fn build(self) -> Result<GestinfoClient, GestinfoError> {
        if self.base_url.trim().is_empty() {
            return Err(GestinfoError::Validation("base URL is empty".to_string()));
        }
        Ok(GestinfoClient {
            http: GestinfoHttp::new(&self.base_url, self.timeout, self.reads)?,
        })
    }
}

//! Resource entities, one module per backend resource family.
//!
//! Each module contains:
//! - the normalized entity type (what hooks hold in local state)
//! - its field-default table (`Resource::DEFAULTS`)
//! - its designated search fields (`Searchable`)

pub mod client;
pub mod contrat;
pub mod email;
pub mod hebergement;
pub mod leasing;
pub mod materiel;
pub mod site;
pub mod visite;

use crate::error::GestinfoError;
use crate::search::Searchable;
use crate::shared::{normalize_record, FieldTable};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// A backend resource family.
pub trait Resource:
    Clone
    + std::fmt::Debug
    + PartialEq
    + Send
    + Sync
    + Serialize
    + DeserializeOwned
    + Searchable
    + 'static
{
    /// Singular name used in logs.
    const NAME: &'static str;
    /// Path segment under the API base URL (e.g. `"clients"`).
    const PATH: &'static str;
    /// What each absent field becomes before entering local state.
    const DEFAULTS: FieldTable;

    /// Server-assigned identifier.
    fn id(&self) -> i64;
}

/// Normalize a raw server record into `R`.
pub fn normalize<R: Resource>(raw: Value) -> Result<R, GestinfoError> {
    let record = normalize_record(raw, R::DEFAULTS)?;
    Ok(serde_json::from_value(record)?)
}

/// API functions for one resource.
///
/// Every call takes the bearer token explicitly and returns raw JSON;
/// normalization happens in the hook layer.
#[async_trait]
pub trait ResourceApi<R: Resource>: Send + Sync {
    async fn list(&self, token: &str) -> Result<Vec<Value>, GestinfoError>;

    async fn get(&self, token: &str, id: i64) -> Result<Value, GestinfoError>;

    async fn create(&self, token: &str, data: &Value) -> Result<Value, GestinfoError>;

    async fn update(&self, token: &str, id: i64, patch: &Value) -> Result<Value, GestinfoError>;

    async fn delete(&self, token: &str, id: i64) -> Result<(), GestinfoError>;
}

//! Credential store abstraction.
//!
//! The platform's secure storage (keychain, keystore, encrypted prefs…)
//! implements [`CredentialStore`]. Only the session manager reads or writes
//! it.

mod memory;

pub use memory::MemoryStore;

use crate::error::StoreError;
use async_trait::async_trait;

/// Key of the bearer token.
pub const TOKEN_KEY: &str = "gestinfo_token";

/// Key of the serialized user.
pub const USER_KEY: &str = "gestinfo_user";

/// Key/value string storage where every operation may fail.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    async fn delete(&self, key: &str) -> Result<(), StoreError>;
}

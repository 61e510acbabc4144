//! # GESTINFO client core
//!
//! Data-access and state-synchronization layer for the GESTINFO back-office
//! API: clients, contracts, sites, hosting, emails, visits, equipment and
//! leasing records.
//!
//! ## Architecture
//!
//! The crate is organized in layers:
//!
//! 1. **Core**: Error types, resource entities, normalization (always available, WASM-safe)
//! 2. **Store**: `CredentialStore` trait + in-memory implementation
//! 3. **Session**: `SessionManager` state machine (restore / sign-in / sign-out)
//! 4. **Hooks**: `ResourceHook<R>` local collections with the shared `AuthGuard`
//! 5. **Search**: pure substring filters over fetched collections
//! 6. **HTTP API**: `GestinfoHttp` + `GestinfoClient` sub-clients (feature `http`)
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use gestinfo::prelude::*;
//! use std::sync::Arc;
//!
//! let client = GestinfoClient::builder()
//!     .base_url("https://api.gestinfo.example")
//!     .build()?;
//!
//! let session = Arc::new(SessionManager::new(
//!     Arc::new(MemoryStore::new()),
//!     Arc::new(client.auth()),
//! ));
//! session.restore().await;
//! session.sign_in("tech@gestinfo.fr", "secret").await?;
//!
//! let clients = ResourceHook::mount(session.clone(), Arc::new(client.clients())).await;
//! let acme = clients.filtered("acme").await;
//! ```

// ── Layer 1: Core ────────────────────────────────────────────────────────────

/// Unified error types.
pub mod error;

/// Network URL constants.
pub mod network;

/// Shared helpers: normalization table, nested value objects.
pub mod shared;

/// Resource entities (one vertical slice per resource).
pub mod domain;

/// Login/user types and the login API seam.
pub mod auth;

// ── Layer 2: Store ───────────────────────────────────────────────────────────

/// Credential store abstraction.
pub mod store;

// ── Layer 3: Session ─────────────────────────────────────────────────────────

/// Session manager: the authentication state machine.
pub mod session;

// ── Layer 4: Hooks ───────────────────────────────────────────────────────────

/// Resource data hooks and the shared auth-failure convention.
pub mod hooks;

// ── Layer 5: Search ──────────────────────────────────────────────────────────

/// Local search/filter utilities.
pub mod search;

// ── Layer 6: HTTP API ────────────────────────────────────────────────────────

/// HTTP client with retry policies.
#[cfg(feature = "http")]
pub mod http;

/// `GestinfoClient`: REST entry point with per-resource sub-clients.
#[cfg(feature = "http")]
pub mod client;

// ── Prelude ──────────────────────────────────────────────────────────────────

pub mod prelude {
    // Resource entities
    pub use crate::domain::client::Client;
    pub use crate::domain::contrat::Contrat;
    pub use crate::domain::email::Email;
    pub use crate::domain::hebergement::Hebergement;
    pub use crate::domain::leasing::NexLease;
    pub use crate::domain::materiel::Materiel;
    pub use crate::domain::site::Site;
    pub use crate::domain::visite::{Visite, VisitTab};
    pub use crate::domain::{Resource, ResourceApi};
    pub use crate::shared::ClientRef;

    // Errors
    pub use crate::error::{AuthError, GestinfoError, HttpError, StoreError};

    // Network
    pub use crate::network::DEFAULT_API_URL;

    // Auth + session
    pub use crate::auth::{AuthApi, LoginRequest, LoginResponse, User};
    pub use crate::session::{SessionManager, SessionPhase, SessionState, SignOut};
    pub use crate::store::{CredentialStore, MemoryStore, TOKEN_KEY, USER_KEY};

    // Hooks + search
    pub use crate::hooks::{AuthGuard, ResourceHook, ResourceState};
    pub use crate::search::{filter, filter_visits, FilterCache, Searchable};

    // HTTP client + sub-clients
    #[cfg(feature = "http")]
    pub use crate::client::{AuthClient, GestinfoClient, GestinfoClientBuilder, RestResource};
    #[cfg(feature = "http")]
    pub use crate::http::retry::{RetryConfig, RetryPolicy};
}

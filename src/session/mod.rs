//! Session manager: single source of truth for "is this user signed in".
//!
//! ## States
//!
//! ```text
//! Restoring ──► SignedOut ──► Authenticating ──► Authenticated
//!     │             ▲                │                 │
//!     │             └────────────────┘ (failure)       │
//!     └──────────────────────────────► Authenticated   │
//!                   ▲                                  │
//!                   └──── sign_out / forced sign-out ──┘
//! ```
//!
//! A restored token is trusted without a server round-trip; the first API
//! call that rejects it forces the session back to `SignedOut` through
//! [`SignOut`], unless the session has since moved on to another token.

mod manager;

pub use manager::SessionManager;

use crate::auth::User;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

// ─── SessionPhase ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    Restoring,
    SignedOut,
    Authenticating,
    Authenticated,
}

impl std::fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            SessionPhase::Restoring => write!(f, "restoring"),
            SessionPhase::SignedOut => write!(f, "signed-out"),
            SessionPhase::Authenticating => write!(f, "authenticating"),
            SessionPhase::Authenticated => write!(f, "authenticated"),
        }
    }
}

// ─── SessionState ────────────────────────────────────────────────────────────

/// Snapshot of the session.
///
/// `token` is set iff `phase` is `Authenticated`; `is_loading` is true only
/// while `Restoring` or `Authenticating`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    pub phase: SessionPhase,
    pub token: Option<String>,
    pub user: Option<User>,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl SessionState {
    pub fn restoring() -> Self {
        Self {
            phase: SessionPhase::Restoring,
            token: None,
            user: None,
            is_loading: true,
            error: None,
        }
    }

    pub fn authenticating() -> Self {
        Self {
            phase: SessionPhase::Authenticating,
            ..Self::restoring()
        }
    }

    pub fn signed_out(error: Option<String>) -> Self {
        Self {
            phase: SessionPhase::SignedOut,
            token: None,
            user: None,
            is_loading: false,
            error,
        }
    }

    pub fn authenticated(token: String, user: Option<User>) -> Self {
        Self {
            phase: SessionPhase::Authenticated,
            token: Some(token),
            user,
            is_loading: false,
            error: None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::restoring()
    }
}

// ─── SignOut ─────────────────────────────────────────────────────────────────

/// The one upward call the hook layer may make: end the session because the
/// server rejected `token`.
///
/// Implementations end the session only while `token` is still the current
/// one; a late rejection of a replaced token leaves the newer session alone.
#[async_trait]
pub trait SignOut: Send + Sync {
    async fn force_sign_out(&self, token: &str);
}

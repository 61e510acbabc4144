//! `SessionManager`: restore, sign-in, sign-out.

use super::{SessionPhase, SessionState, SignOut};
use crate::auth::{AuthApi, LoginRequest, User};
use crate::error::{AuthError, GestinfoError};
use crate::store::{CredentialStore, TOKEN_KEY, USER_KEY};

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::watch;

/// Owns the authentication state and is the only writer to the credential
/// store.
///
/// Construct one per process and share it as `Arc<SessionManager>`.
pub struct SessionManager {
    store: Arc<dyn CredentialStore>,
    auth: Arc<dyn AuthApi>,
    state: watch::Sender<SessionState>,
}

impl SessionManager {
    /// New manager in the `Restoring` state. Call [`restore`](Self::restore) next.
    pub fn new(store: Arc<dyn CredentialStore>, auth: Arc<dyn AuthApi>) -> Self {
        let (state, _) = watch::channel(SessionState::restoring());
        Self { store, auth, state }
    }

    // ── Accessors ────────────────────────────────────────────────────────

    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    pub fn phase(&self) -> SessionPhase {
        self.state.borrow().phase
    }

    pub fn token(&self) -> Option<String> {
        self.state.borrow().token.clone()
    }

    pub fn user(&self) -> Option<User> {
        self.state.borrow().user.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_authenticated()
    }

    /// Observe every state transition.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    // ── Lifecycle ────────────────────────────────────────────────────────

    /// Load the persisted token and user. Never fails: a store failure ends
    /// in `SignedOut` with the failure recorded in `error`.
    pub async fn restore(&self) {
        self.publish(SessionState::restoring());

        let token = match self.store.get(TOKEN_KEY).await {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(e) => {
                tracing::warn!(error = %e, "Session restore failed reading token");
                self.publish(SessionState::signed_out(Some(e.to_string())));
                return;
            }
        };

        let Some(token) = token else {
            tracing::debug!("No stored session");
            self.publish(SessionState::signed_out(None));
            return;
        };

        let user = match self.store.get(USER_KEY).await {
            Ok(Some(raw)) => match serde_json::from_str::<User>(&raw) {
                Ok(user) => Some(user),
                Err(e) => {
                    tracing::warn!(error = %e, "Ignoring unreadable stored user");
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                tracing::warn!(error = %e, "Session restore failed reading user");
                self.publish(SessionState::signed_out(Some(e.to_string())));
                return;
            }
        };

        tracing::info!(has_user = user.is_some(), "Session restored");
        self.publish(SessionState::authenticated(token, user));
    }

    /// Authenticate with the login API and persist the credentials.
    ///
    /// The resulting state carries the failure message on error; the error is
    /// also returned so callers can branch immediately.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<(), GestinfoError> {
        self.publish(SessionState::authenticating());

        match self.authenticate(email, password).await {
            Ok((token, user)) => {
                tracing::info!(has_user = user.is_some(), "Signed in");
                self.publish(SessionState::authenticated(token, user));
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "Sign-in failed");
                self.publish(SessionState::signed_out(Some(e.user_message())));
                Err(e)
            }
        }
    }

    /// Clear the stored credentials and return to `SignedOut`.
    ///
    /// Store failures are logged and ignored. Safe to call when already
    /// signed out.
    pub async fn sign_out(&self) {
        self.end_session("sign-out").await;
    }

    // ── Internals ────────────────────────────────────────────────────────

    async fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> Result<(String, Option<User>), GestinfoError> {
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let resp = self.auth.login(&request).await?;
        if resp.token.is_empty() {
            return Err(AuthError::MissingToken.into());
        }

        // A token written before a failed user write is left in place.
        self.store.set(TOKEN_KEY, &resp.token).await?;
        match &resp.user {
            Some(user) => {
                let raw = serde_json::to_string(user)?;
                self.store.set(USER_KEY, &raw).await?;
            }
            None => self.store.delete(USER_KEY).await?,
        }

        Ok((resp.token, resp.user))
    }

    async fn end_session(&self, reason: &'static str) {
        for key in [TOKEN_KEY, USER_KEY] {
            if let Err(e) = self.store.delete(key).await {
                tracing::warn!(key, error = %e, "Credential delete failed during {}", reason);
            }
        }
        tracing::info!(reason, "Signed out");
        self.publish(SessionState::signed_out(None));
    }

    fn publish(&self, next: SessionState) {
        let previous = self.state.send_replace(next);
        let current = self.state.borrow();
        if previous.phase != current.phase {
            tracing::debug!(from = %previous.phase, to = %current.phase, "Session transition");
        }
    }
}

#[async_trait]
impl SignOut for SessionManager {
    async fn force_sign_out(&self, token: &str) {
        if self.token().as_deref() != Some(token) {
            tracing::debug!("Ignoring rejection of a token that is no longer current");
            return;
        }
        tracing::warn!("Session rejected by the server, signing out");
        self.end_session("session expiry").await;
    }
}

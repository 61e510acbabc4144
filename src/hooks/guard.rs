//! The shared auth-failure convention.

use crate::error::GestinfoError;
use crate::session::SignOut;
use std::future::Future;
use std::sync::Arc;

/// Wraps API calls: when one fails because the server rejected the token it
/// was sent, the injected [`SignOut`] handle is invoked with that token before
/// the error is returned.
///
/// Every resource hook routes its calls through one of these instead of
/// inspecting errors itself.
#[doc(alias = "with_auth_retry")]
#[derive(Clone)]
pub struct AuthGuard {
    sign_out: Arc<dyn SignOut>,
}

impl AuthGuard {
    pub fn new(sign_out: Arc<dyn SignOut>) -> Self {
        Self { sign_out }
    }

    /// Await `op`, sent with `token`; on a session-expiry failure, sign out
    /// that token, then return the original error unchanged.
    pub async fn run<T, F>(&self, token: &str, op: F) -> Result<T, GestinfoError>
    where
        F: Future<Output = Result<T, GestinfoError>>,
    {
        match op.await {
            Ok(value) => Ok(value),
            Err(e) => {
                if e.is_session_expired() {
                    tracing::warn!(error = %e, "API rejected the session token");
                    self.sign_out.force_sign_out(token).await;
                }
                Err(e)
            }
        }
    }
}

impl std::fmt::Debug for AuthGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthGuard").finish_non_exhaustive()
    }
}

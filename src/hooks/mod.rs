//! Resource data hooks: one local collection per resource per instance.
//!
//! A [`ResourceHook`] bridges a resource's remote collection to render-ready
//! local state:
//!
//! - reads (`fetch_all`) never fail; the outcome lands in `ResourceState`
//! - writes (`create`, `update`, `delete`) return `Result` so form handlers
//!   can branch on success immediately
//! - every API call goes through the [`AuthGuard`], which signs the session
//!   out when the server rejects the token
//!
//! Operations on one hook are not serialized: whichever resolves last
//! decides the visible collection.

mod guard;
mod state;

pub use guard::AuthGuard;
pub use state::ResourceState;

use crate::domain::visite::{VisitTab, Visite};
use crate::domain::{normalize, Resource, ResourceApi};
use crate::error::{AuthError, GestinfoError};
use crate::search;
use crate::session::SessionManager;

use async_lock::{Mutex, RwLock};
use serde::Serialize;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Local state + operations for one resource.
///
/// Cloning yields another handle to the same instance (same collection,
/// same liveness flag). Separate instances never share state.
pub struct ResourceHook<R: Resource> {
    session: Arc<SessionManager>,
    api: Arc<dyn ResourceApi<R>>,
    guard: AuthGuard,
    state: Arc<RwLock<ResourceState<R>>>,
    alive: Arc<AtomicBool>,
    seen_token: Arc<Mutex<Option<String>>>,
}

impl<R: Resource> ResourceHook<R> {
    /// A hook with an empty collection. Nothing is fetched yet.
    pub fn new(session: Arc<SessionManager>, api: Arc<dyn ResourceApi<R>>) -> Self {
        let guard = AuthGuard::new(session.clone());
        Self {
            session,
            api,
            guard,
            state: Arc::new(RwLock::new(ResourceState::new())),
            alive: Arc::new(AtomicBool::new(true)),
            seen_token: Arc::new(Mutex::new(None)),
        }
    }

    /// Create the hook and synchronize it with the session once: fetches
    /// when signed in, records the unauthenticated error otherwise.
    pub async fn mount(session: Arc<SessionManager>, api: Arc<dyn ResourceApi<R>>) -> Self {
        let hook = Self::new(session, api);
        hook.on_session_change().await;
        hook
    }

    // ── Reads ────────────────────────────────────────────────────────────

    /// Replace the local collection with the server's list.
    pub async fn fetch_all(&self) {
        let Some(token) = self.session.token() else {
            self.commit(|s| {
                s.loading = false;
                s.error = Some(AuthError::NotAuthenticated.to_string());
            })
            .await;
            return;
        };

        self.commit(|s| {
            s.loading = true;
            s.error = None;
        })
        .await;

        let result = self
            .guard
            .run(&token, self.api.list(&token))
            .await
            .and_then(|raw| raw.into_iter().map(normalize::<R>).collect::<Result<Vec<R>, _>>());

        match result {
            Ok(items) => {
                tracing::debug!(resource = R::NAME, count = items.len(), "Fetched collection");
                self.commit(|s| {
                    s.replace_all(items);
                    s.loading = false;
                })
                .await;
            }
            Err(e) => {
                tracing::warn!(resource = R::NAME, error = %e, "Fetch failed");
                self.commit(|s| {
                    s.error = Some(e.user_message());
                    s.loading = false;
                })
                .await;
            }
        }
    }

    /// Fetch one record. The local collection is left untouched.
    pub async fn get(&self, id: i64) -> Result<R, GestinfoError> {
        let token = self.require_token()?;
        let raw = self.guard.run(&token, self.api.get(&token, id)).await?;
        normalize(raw)
    }

    // ── Writes ───────────────────────────────────────────────────────────

    /// Create a record and append the server's representation.
    pub async fn create<D: Serialize + ?Sized>(&self, data: &D) -> Result<R, GestinfoError> {
        let token = self.require_token()?;
        let body = serde_json::to_value(data)?;

        let raw = self.guard.run(&token, self.api.create(&token, &body)).await?;
        let created: R = normalize(raw)?;
        tracing::debug!(resource = R::NAME, id = created.id(), "Created");

        let appended = created.clone();
        self.commit(move |s| s.append(appended)).await;
        Ok(created)
    }

    /// Update a record and swap in the server's representation, in place.
    ///
    /// A record missing from the local collection is not inserted.
    pub async fn update<D: Serialize + ?Sized>(
        &self,
        id: i64,
        patch: &D,
    ) -> Result<R, GestinfoError> {
        let token = self.require_token()?;
        let body = serde_json::to_value(patch)?;

        let raw = self.guard.run(&token, self.api.update(&token, id, &body)).await?;
        let updated: R = normalize(raw)?;

        let replacement = updated.clone();
        self.commit(move |s| {
            if !s.replace_one(replacement) {
                tracing::debug!(resource = R::NAME, id, "Updated record not in local collection");
            }
        })
        .await;
        Ok(updated)
    }

    /// Delete a record and drop it from the local collection.
    ///
    /// Deleting an id that is already absent, locally or on the server (404),
    /// is not an error.
    pub async fn delete(&self, id: i64) -> Result<(), GestinfoError> {
        let token = self.require_token()?;

        match self.guard.run(&token, self.api.delete(&token, id)).await {
            Ok(()) => tracing::debug!(resource = R::NAME, id, "Deleted"),
            Err(e) if e.is_not_found() => {
                tracing::debug!(resource = R::NAME, id, "Already absent on the server");
            }
            Err(e) => return Err(e),
        }

        self.commit(|s| {
            s.remove(id);
        })
        .await;
        Ok(())
    }

    // ── Session synchronization ──────────────────────────────────────────

    /// React to the current session token.
    ///
    /// Refetches when a token appears (mount while signed in, or after
    /// sign-in). When there is no token, empties the collection and records
    /// the unauthenticated error.
    pub async fn on_session_change(&self) {
        let current = self.session.token();
        let previous = {
            let mut seen = self.seen_token.lock().await;
            std::mem::replace(&mut *seen, current.clone())
        };

        match (previous, current) {
            (previous, Some(token)) if previous.as_deref() != Some(token.as_str()) => {
                self.fetch_all().await;
            }
            (_, None) => {
                self.commit(|s| {
                    s.clear();
                    s.loading = false;
                    s.error = Some(AuthError::NotAuthenticated.to_string());
                })
                .await;
            }
            _ => {}
        }
    }

    /// Drive [`on_session_change`](Self::on_session_change) from the session's
    /// transitions until the hook is unmounted.
    ///
    /// Subscribes immediately, so transitions made after this call returns
    /// are never missed, even before the future is first polled. The future
    /// exits on the first transition observed after unmount.
    pub fn watch_session(&self) -> impl Future<Output = ()> + Send + 'static {
        let mut rx = self.session.subscribe();
        let hook = self.clone();
        async move {
            while hook.is_mounted() {
                if rx.changed().await.is_err() {
                    break;
                }
                if !hook.is_mounted() {
                    break;
                }
                hook.on_session_change().await;
            }
            tracing::debug!(resource = R::NAME, "Session watcher stopped");
        }
    }

    // ── Lifecycle ────────────────────────────────────────────────────────

    /// Detach the consumer. Operations still in flight will not write to
    /// state when they resolve.
    pub fn unmount(&self) {
        self.alive.store(false, Ordering::Release);
    }

    pub fn is_mounted(&self) -> bool {
        self.alive.load(Ordering::Acquire)
    }

    // ── Accessors ────────────────────────────────────────────────────────

    pub async fn snapshot(&self) -> ResourceState<R> {
        self.state.read().await.clone()
    }

    pub async fn items(&self) -> Vec<R> {
        self.state.read().await.items.clone()
    }

    pub async fn is_loading(&self) -> bool {
        self.state.read().await.loading
    }

    pub async fn error(&self) -> Option<String> {
        self.state.read().await.error.clone()
    }

    /// Local items matching `query` (see [`search::filter`]).
    pub async fn filtered(&self, query: &str) -> Vec<R> {
        let state = self.state.read().await;
        search::filter(&state.items, query).into_owned()
    }

    // ── Internals ────────────────────────────────────────────────────────

    fn require_token(&self) -> Result<String, GestinfoError> {
        self.session
            .token()
            .ok_or_else(|| AuthError::NotAuthenticated.into())
    }

    /// Apply `f` to the state unless the hook was unmounted.
    async fn commit(&self, f: impl FnOnce(&mut ResourceState<R>)) -> bool {
        if !self.is_mounted() {
            tracing::debug!(resource = R::NAME, "Dropping state update for unmounted hook");
            return false;
        }
        let mut state = self.state.write().await;
        f(&mut state);
        true
    }
}

impl ResourceHook<Visite> {
    /// Local visits for a screen tab, filtered by `query`.
    pub async fn filtered_visits(&self, tab: VisitTab, query: &str) -> Vec<Visite> {
        let state = self.state.read().await;
        search::filter_visits(&state.items, tab, query).into_owned()
    }
}

impl<R: Resource> Clone for ResourceHook<R> {
    fn clone(&self) -> Self {
        Self {
            session: self.session.clone(),
            api: self.api.clone(),
            guard: self.guard.clone(),
            state: self.state.clone(),
            alive: self.alive.clone(),
            seen_token: self.seen_token.clone(),
        }
    }
}

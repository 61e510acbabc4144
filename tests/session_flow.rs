//! Session lifecycle against an in-memory store and login API.
//!
//! Run with:
//! ```bash
//! cargo test --test session_flow
//! ```

mod common;

use std::sync::atomic::Ordering;
use std::sync::Arc;

use common::*;
use gestinfo::prelude::*;

#[tokio::test]
async fn test_restore_with_token_and_user() {
    let user = r#"{"id": 7, "email": "tech@gestinfo.fr", "prenom": "Paul", "nom": "Durand"}"#;
    let store = Arc::new(CountingStore::with_entries(&[(TOKEN_KEY, TOKEN), (USER_KEY, user)]));
    let login = Arc::new(FakeLogin::default());
    let session = SessionManager::new(store.clone(), login.clone());

    session.restore().await;

    let state = session.state();
    assert_eq!(state.phase, SessionPhase::Authenticated);
    assert_eq!(state.token.as_deref(), Some(TOKEN));
    assert_eq!(state.user.unwrap().display_name(), "Paul Durand");
    assert!(!state.is_loading);
    assert_eq!(login.calls.load(Ordering::SeqCst), 0);
    assert_eq!(store.sets.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_restore_token_without_user() {
    let store = Arc::new(CountingStore::with_entries(&[(TOKEN_KEY, TOKEN)]));
    let session = SessionManager::new(store, Arc::new(FakeLogin::default()));

    session.restore().await;

    assert!(session.is_authenticated());
    assert!(session.user().is_none());
}

#[tokio::test]
async fn test_sign_in_persists_token_and_user() {
    let store = Arc::new(CountingStore::default());
    let session = SessionManager::new(store.clone(), Arc::new(FakeLogin::with_user()));
    session.restore().await;

    session.sign_in(EMAIL, PASSWORD).await.unwrap();

    let state = session.state();
    assert_eq!(state.phase, SessionPhase::Authenticated);
    assert_eq!(state.user.as_ref().and_then(|u| u.id_label()).as_deref(), Some("7"));
    assert!(state.error.is_none());

    assert_eq!(store.get(TOKEN_KEY).await.unwrap().as_deref(), Some(TOKEN));
    let stored: User = serde_json::from_str(&store.get(USER_KEY).await.unwrap().unwrap()).unwrap();
    assert_eq!(Some(stored), state.user);
}

#[tokio::test]
async fn test_sign_in_accepts_opaque_user_ids() {
    let store = Arc::new(CountingStore::default());
    let login = FakeLogin::with_user_json(serde_json::json!({"id": "u-7", "nom": "Roux"}));
    let session = SessionManager::new(store.clone(), Arc::new(login));
    session.restore().await;

    session.sign_in(EMAIL, PASSWORD).await.unwrap();

    let user = session.user().unwrap();
    assert_eq!(user.id_label().as_deref(), Some("u-7"));
    assert_eq!(session.token().as_deref(), Some(TOKEN));

    let restarted = SessionManager::new(store, Arc::new(FakeLogin::default()));
    restarted.restore().await;
    assert_eq!(restarted.user(), Some(user));
}

#[tokio::test]
async fn test_sign_in_survives_unreadable_user() {
    let login = FakeLogin::with_user_json(serde_json::json!({"id": 7, "email": ["not", "text"]}));
    let session = SessionManager::new(Arc::new(CountingStore::default()), Arc::new(login));
    session.restore().await;

    session.sign_in(EMAIL, PASSWORD).await.unwrap();

    assert!(session.is_authenticated());
    assert!(session.user().is_none());
}

#[tokio::test]
async fn test_invalid_credentials_never_touch_the_store() {
    let store = Arc::new(CountingStore::default());
    let session = SessionManager::new(store.clone(), Arc::new(FakeLogin::default()));
    session.restore().await;

    let err = session.sign_in(EMAIL, "wrong").await.unwrap_err();

    assert_eq!(err.to_string(), "Invalid credentials");
    let state = session.state();
    assert_eq!(state.phase, SessionPhase::SignedOut);
    assert!(state.token.is_none());
    assert!(!state.is_loading);
    assert_eq!(state.error.as_deref(), Some("Invalid credentials"));
    assert_eq!(store.sets.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_sign_in_clears_previous_error() {
    let session = SessionManager::new(
        Arc::new(CountingStore::default()),
        Arc::new(FakeLogin::default()),
    );
    session.restore().await;

    assert!(session.sign_in(EMAIL, "wrong").await.is_err());
    session.sign_in(EMAIL, PASSWORD).await.unwrap();

    assert!(session.state().error.is_none());
}

#[tokio::test]
async fn test_sign_in_passes_through_authenticating() {
    let session = SessionManager::new(
        Arc::new(CountingStore::default()),
        Arc::new(FakeLogin::default()),
    );
    session.restore().await;
    let mut rx = session.subscribe();
    rx.borrow_and_update();

    let observer = tokio::spawn(async move {
        let mut phases = Vec::new();
        while rx.changed().await.is_ok() {
            let phase = rx.borrow_and_update().phase;
            phases.push(phase);
            if phase == SessionPhase::Authenticated {
                break;
            }
        }
        phases
    });
    session.sign_in(EMAIL, PASSWORD).await.unwrap();

    let phases = observer.await.unwrap();
    assert_eq!(phases.last(), Some(&SessionPhase::Authenticated));
}

#[tokio::test]
async fn test_sign_out_clears_store_and_state() {
    let store = Arc::new(CountingStore::default());
    let session = SessionManager::new(store.clone(), Arc::new(FakeLogin::with_user()));
    session.restore().await;
    session.sign_in(EMAIL, PASSWORD).await.unwrap();

    session.sign_out().await;

    let state = session.state();
    assert_eq!(state.phase, SessionPhase::SignedOut);
    assert!(state.token.is_none());
    assert!(state.user.is_none());
    assert!(store.inner.is_empty().await);
}

#[tokio::test]
async fn test_restart_after_sign_in_restores_session() {
    let store = Arc::new(CountingStore::default());
    let first = SessionManager::new(store.clone(), Arc::new(FakeLogin::with_user()));
    first.restore().await;
    first.sign_in(EMAIL, PASSWORD).await.unwrap();

    let second = SessionManager::new(store, Arc::new(FakeLogin::default()));
    second.restore().await;

    assert_eq!(second.token().as_deref(), Some(TOKEN));
    assert_eq!(second.user(), first.user());
}

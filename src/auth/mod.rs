//! Authentication: login contract, user profile, and the login API seam.
//!
//! ## Token model
//!
//! The backend issues an opaque bearer token on `POST /auth/login`. The
//! token is held by the [`SessionManager`](crate::session::SessionManager),
//! persisted through the credential store, and passed explicitly to every
//! resource API call. It is trusted until the first call rejects it.

#[cfg(feature = "http")]
pub mod client;

use crate::error::GestinfoError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ============================================================================
// User profile
// ============================================================================

/// The signed-in user, as returned by the login endpoint.
///
/// Opaque to this crate: every field is optional and `id` is kept as the
/// server sent it (number, string, UUID). Fields this crate does not model
/// are kept in `extra` so the stored copy round-trips unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct User {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub nom: Option<String>,
    #[serde(default)]
    pub prenom: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl User {
    /// "prenom nom" when both are known, otherwise whatever identifies the user.
    pub fn display_name(&self) -> String {
        match (&self.prenom, &self.nom) {
            (Some(p), Some(n)) => format!("{} {}", p, n),
            (None, Some(n)) => n.clone(),
            (Some(p), None) => p.clone(),
            (None, None) => self
                .email
                .clone()
                .or_else(|| self.id_label().map(|id| format!("#{}", id)))
                .unwrap_or_default(),
        }
    }

    /// The id as text: strings verbatim, anything else as JSON.
    pub fn id_label(&self) -> Option<String> {
        match self.id.as_ref()? {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}

/// Read the login response's user, dropping it when it is unreadable.
///
/// The token alone authenticates; a user payload of an unexpected shape must
/// not fail the sign-in.
fn lenient_user<'de, D>(deserializer: D) -> Result<Option<User>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(match raw {
        None | Some(Value::Null) => None,
        Some(raw) => match serde_json::from_value::<User>(raw) {
            Ok(user) => Some(user),
            Err(e) => {
                tracing::warn!(error = %e, "Ignoring unreadable user in login response");
                None
            }
        },
    })
}

// ============================================================================
// Wire types
// ============================================================================

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    #[serde(default, deserialize_with = "lenient_user")]
    pub user: Option<User>,
}

// ============================================================================
// API seam
// ============================================================================

/// The login API function.
///
/// Fails on invalid credentials or transport failure; the error's message is
/// what the session surfaces.
#[async_trait]
pub trait AuthApi: Send + Sync {
    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, GestinfoError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_response_without_user() {
        let resp: LoginResponse = serde_json::from_str(r#"{"token": "abc"}"#).unwrap();
        assert_eq!(resp.token, "abc");
        assert!(resp.user.is_none());
    }

    #[test]
    fn test_user_keeps_unknown_fields() {
        let json = r#"{"id": 5, "email": "a@b.fr", "agence": "Lyon"}"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.id, Some(Value::from(5)));
        assert_eq!(user.extra.get("agence"), Some(&Value::from("Lyon")));

        let back = serde_json::to_value(&user).unwrap();
        assert_eq!(back["agence"], "Lyon");
    }

    #[test]
    fn test_display_name() {
        let user = User {
            id: Some(Value::from(1)),
            nom: Some("Bernard".into()),
            prenom: Some("Julie".into()),
            ..Default::default()
        };
        assert_eq!(user.display_name(), "Julie Bernard");
    }

    #[test]
    fn test_string_and_missing_ids_accepted() {
        let json = r#"{"token": "t", "user": {"id": "u-7", "nom": "Roux"}}"#;
        let resp: LoginResponse = serde_json::from_str(json).unwrap();
        let user = resp.user.unwrap();
        assert_eq!(user.id_label().as_deref(), Some("u-7"));

        let resp: LoginResponse =
            serde_json::from_str(r#"{"token": "t", "user": {"email": "a@b.fr"}}"#).unwrap();
        assert!(resp.user.unwrap().id.is_none());
    }

    #[test]
    fn test_unreadable_user_dropped_token_kept() {
        let resp: LoginResponse =
            serde_json::from_str(r#"{"token": "t", "user": {"email": 42}}"#).unwrap();
        assert_eq!(resp.token, "t");
        assert!(resp.user.is_none());

        let resp: LoginResponse =
            serde_json::from_str(r#"{"token": "t", "user": "admin"}"#).unwrap();
        assert!(resp.user.is_none());
    }

    #[test]
    fn test_display_name_falls_back_to_id() {
        let user = User {
            id: Some(Value::from("u-7")),
            ..Default::default()
        };
        assert_eq!(user.display_name(), "#u-7");
    }
}

//! Unified error types.

use thiserror::Error;

/// Marker the backend puts in error messages when the bearer token is no
/// longer accepted.
pub const SESSION_EXPIRED_MARKER: &str = "Session expirée";

/// Status code marker for unauthorized responses.
pub const UNAUTHORIZED_MARKER: &str = "401";

/// Fallback shown when an error carries no usable message.
pub const GENERIC_ERROR_MESSAGE: &str = "Une erreur est survenue";

/// Top-level crate error.
#[derive(Error, Debug)]
pub enum GestinfoError {
    #[error(transparent)]
    Http(#[from] HttpError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl GestinfoError {
    /// Whether this failure means the server no longer accepts the token.
    ///
    /// Typed HTTP errors answer by status: only a 401 counts. The message
    /// markers are checked on untyped messages only, since API functions
    /// supplied by the embedding app may report nothing else.
    pub fn is_session_expired(&self) -> bool {
        match self {
            GestinfoError::Http(HttpError::Unauthorized) => true,
            GestinfoError::Auth(AuthError::TokenExpired) => true,
            GestinfoError::Other(message)
            | GestinfoError::Validation(message)
            | GestinfoError::Auth(AuthError::LoginFailed(message)) => {
                is_session_expiry_message(message)
            }
            _ => false,
        }
    }

    /// Whether the server reported the target as absent (404).
    pub fn is_not_found(&self) -> bool {
        matches!(self, GestinfoError::Http(HttpError::NotFound(_)))
    }

    /// Message suitable for an alert: the error's own text, or a generic
    /// fallback when that text is blank.
    pub fn user_message(&self) -> String {
        let message = self.to_string();
        if message.trim().is_empty() {
            GENERIC_ERROR_MESSAGE.to_string()
        } else {
            message
        }
    }
}

/// Returns true when `message` carries a recognized session-expiry marker.
pub fn is_session_expiry_message(message: &str) -> bool {
    message.contains(SESSION_EXPIRED_MARKER) || message.contains(UNAUTHORIZED_MARKER)
}

/// HTTP-layer errors.
#[derive(Error, Debug)]
pub enum HttpError {
    #[cfg(feature = "http")]
    #[error("Request failed: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Server error {status}: {message}")]
    ServerError { status: u16, message: String },

    #[error("Rate limited (retry after {retry_after_ms:?}ms)")]
    RateLimited { retry_after_ms: Option<u64> },

    #[error("Session expirée (401)")]
    Unauthorized,

    #[error("Accès refusé: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// 4xx with the server's own message, surfaced verbatim.
    #[error("{0}")]
    BadRequest(String),

    #[error("Invalid response body: {0}")]
    InvalidBody(String),

    #[error("Max retries exceeded after {attempts} attempts: {last_error}")]
    MaxRetriesExceeded { attempts: u32, last_error: String },
}

/// Authentication errors.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Not authenticated")]
    NotAuthenticated,

    #[error("{0}")]
    LoginFailed(String),

    #[error("Login response did not contain a token")]
    MissingToken,

    #[error("Session expirée")]
    TokenExpired,
}

/// Credential store errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    #[error("read of {key} failed: {reason}")]
    Read { key: String, reason: String },

    #[error("write of {key} failed: {reason}")]
    Write { key: String, reason: String },

    #[error("delete of {key} failed: {reason}")]
    Delete { key: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unauthorized_is_session_expired() {
        let err = GestinfoError::from(HttpError::Unauthorized);
        assert!(err.is_session_expired());
        assert_eq!(err.to_string(), "Session expirée (401)");
    }

    #[test]
    fn test_message_markers_detected() {
        assert!(GestinfoError::Other("Request failed with status 401".into()).is_session_expired());
        let expired = GestinfoError::Other("Session expirée, reconnectez-vous".into());
        assert!(expired.is_session_expired());
        assert!(!GestinfoError::Other("Network unreachable".into()).is_session_expired());
    }

    #[test]
    fn test_typed_errors_ignore_markers_in_text() {
        let not_found = GestinfoError::from(HttpError::NotFound("Client 1401 introuvable".into()));
        assert!(!not_found.is_session_expired());
        assert!(not_found.is_not_found());

        let bad_body = GestinfoError::from(HttpError::InvalidBody(
            "expected value at line 1 column 401".into(),
        ));
        assert!(!bad_body.is_session_expired());

        let server = GestinfoError::from(HttpError::ServerError {
            status: 500,
            message: "Session expirée".into(),
        });
        assert!(!server.is_session_expired());
    }

    #[test]
    fn test_not_authenticated_is_not_expiry() {
        let err = GestinfoError::from(AuthError::NotAuthenticated);
        assert!(!err.is_session_expired());
    }

    #[test]
    fn test_server_message_surfaces_verbatim() {
        let err = GestinfoError::from(HttpError::BadRequest("Email déjà utilisé".into()));
        assert_eq!(err.user_message(), "Email déjà utilisé");
    }

    #[test]
    fn test_blank_message_falls_back() {
        let err = GestinfoError::Other("   ".into());
        assert_eq!(err.user_message(), GENERIC_ERROR_MESSAGE);
    }
}

//! Auth sub-client: `POST /auth/login`.

use crate::auth::{AuthApi, LoginRequest, LoginResponse};
use crate::error::{AuthError, GestinfoError, HttpError};
use crate::http::GestinfoHttp;

use async_trait::async_trait;

/// Login over HTTP. Hand it to the [`SessionManager`](crate::session::SessionManager).
#[derive(Clone)]
pub struct Auth {
    pub(crate) http: GestinfoHttp,
}

#[async_trait]
impl AuthApi for Auth {
    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, GestinfoError> {
        match self.http.post("auth/login", None, request).await {
            Ok(resp) => Ok(resp),
            // No token was sent, so a 401 here means bad credentials, not expiry.
            Err(HttpError::Unauthorized) => {
                Err(AuthError::LoginFailed("Identifiants invalides".to_string()).into())
            }
            Err(e) => Err(e.into()),
        }
    }
}

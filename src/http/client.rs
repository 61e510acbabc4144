//! Low-level HTTP client: `GestinfoHttp`.
//!
//! JSON in, JSON out, bearer token per call. Resource-specific paths live in
//! the sub-clients (`crate::client`); this type only knows verbs.

use crate::error::HttpError;
use crate::http::retry::{RetryConfig, RetryPolicy};

use reqwest::header::RETRY_AFTER;
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Error body the backend sends with non-2xx responses.
#[derive(Debug, Clone, Default, Deserialize)]
struct ErrorBody {
    #[serde(alias = "error")]
    message: Option<String>,
}

/// Low-level HTTP client for the GESTINFO REST API.
#[derive(Clone)]
pub struct GestinfoHttp {
    base_url: String,
    client: Client,
    reads: RetryConfig,
}

impl GestinfoHttp {
    pub fn new(base_url: &str, timeout: Duration, reads: RetryConfig) -> Result<Self, HttpError> {
        #[allow(unused_mut)]
        let mut builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        {
            builder = builder.timeout(timeout).pool_max_idle_per_host(4);
        }
        #[cfg(target_arch = "wasm32")]
        let _ = timeout;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: builder.build()?,
            reads,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `{base_url}/{path}`
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    // ── Verbs ────────────────────────────────────────────────────────────

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        token: Option<&str>,
    ) -> Result<T, HttpError> {
        self.request(Method::GET, path, token, None::<&()>, RetryPolicy::Reads)
            .await
    }

    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        token: Option<&str>,
        body: &B,
    ) -> Result<T, HttpError> {
        self.request(Method::POST, path, token, Some(body), RetryPolicy::None)
            .await
    }

    pub async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        token: Option<&str>,
        body: &B,
    ) -> Result<T, HttpError> {
        self.request(Method::PUT, path, token, Some(body), RetryPolicy::None)
            .await
    }

    pub async fn delete(&self, path: &str, token: Option<&str>) -> Result<(), HttpError> {
        let _: serde_json::Value = self
            .request(Method::DELETE, path, token, None::<&()>, RetryPolicy::None)
            .await?;
        Ok(())
    }

    // ── Internals ────────────────────────────────────────────────────────

    async fn request<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
        body: Option<&B>,
        retry: RetryPolicy,
    ) -> Result<T, HttpError> {
        let url = self.url(path);
        let config = match retry {
            RetryPolicy::None => return self.send(&method, &url, token, body).await,
            RetryPolicy::Reads => self.reads.clone(),
            RetryPolicy::Custom(c) => c,
        };

        let mut attempt = 0;
        loop {
            match self.send::<T, B>(&method, &url, token, body).await {
                Ok(resp) => return Ok(resp),
                Err(e) if config.is_retryable(&e) && attempt < config.max_retries => {
                    let delay = match &e {
                        HttpError::RateLimited {
                            retry_after_ms: Some(ms),
                        } => Duration::from_millis(*ms),
                        _ => config.delay_for_attempt(attempt),
                    };
                    tracing::debug!(
                        attempt = attempt + 1,
                        max = config.max_retries,
                        delay_ms = delay.as_millis() as u64,
                        error = %e,
                        "Retrying {} {}",
                        method,
                        url
                    );
                    futures_timer::Delay::new(delay).await;
                    attempt += 1;
                }
                Err(e) if attempt > 0 && config.is_retryable(&e) => {
                    return Err(HttpError::MaxRetriesExceeded {
                        attempts: attempt + 1,
                        last_error: e.to_string(),
                    });
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn send<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        method: &Method,
        url: &str,
        token: Option<&str>,
        body: Option<&B>,
    ) -> Result<T, HttpError> {
        let mut req = self.client.request(method.clone(), url);
        if let Some(token) = token {
            req = req.bearer_auth(token);
        }
        if let Some(b) = body {
            req = req.json(b);
        }

        let resp = req.send().await?;
        let status = resp.status().as_u16();
        let retry_after_ms = resp
            .headers()
            .get(RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(parse_retry_after);
        let text = resp.text().await?;

        if (200..300).contains(&status) {
            return parse_body(&text);
        }

        Err(status_error(status, &text, retry_after_ms))
    }
}

/// Parse a success body; an empty body (e.g. 204) reads as JSON `null`.
fn parse_body<T: DeserializeOwned>(text: &str) -> Result<T, HttpError> {
    let text = if text.trim().is_empty() { "null" } else { text };
    serde_json::from_str(text).map_err(|e| HttpError::InvalidBody(e.to_string()))
}

/// `Retry-After` in delay-seconds form, as milliseconds. HTTP dates are not
/// honored; the backoff schedule applies instead.
fn parse_retry_after(value: &str) -> Option<u64> {
    value.trim().parse::<u64>().ok().map(|secs| secs.saturating_mul(1000))
}

/// Map a non-2xx status and body to an error, preferring the server's message.
fn status_error(status: u16, text: &str, retry_after_ms: Option<u64>) -> HttpError {
    let message = serde_json::from_str::<ErrorBody>(text)
        .ok()
        .and_then(|b| b.message)
        .unwrap_or_else(|| text.trim().to_string());

    match status {
        401 => HttpError::Unauthorized,
        403 => HttpError::Forbidden(message),
        404 => HttpError::NotFound(message),
        429 => HttpError::RateLimited { retry_after_ms },
        400..=499 => HttpError::BadRequest(message),
        _ => HttpError::ServerError { status, message },
    }
}

/// Default GESTINFO REST API URL.
pub const DEFAULT_API_URL: &str = "https://api.gestinfo.fr/api";

/// Environment variable overriding the API URL (see `GestinfoClientBuilder::from_env`).
pub const API_URL_ENV: &str = "GESTINFO_API_URL";

/// Environment variable overriding the HTTP timeout, in seconds.
pub const HTTP_TIMEOUT_ENV: &str = "GESTINFO_HTTP_TIMEOUT_SECS";

//! HTTP client layer: `GestinfoHttp` with retry policies for reads.

pub mod client;
pub mod retry;

pub use client::GestinfoHttp;
pub use retry::{RetryConfig, RetryPolicy};

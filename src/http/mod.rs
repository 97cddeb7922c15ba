//! HTTP client layer — `MemepumpHttp` with per-endpoint retry policies.

pub mod client;
pub mod retry;

pub use client::MemepumpHttp;
pub use retry::{RetryConfig, RetryPolicy};

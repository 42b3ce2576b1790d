//! fetchax: axios-style ergonomic HTTP client.
//!
//! Wraps `reqwest` with the conveniences axios users expect: a base URL with
//! per-call paths and query parameters, request/response interceptors, a
//! time-bounded response cache for idempotent reads, constant-backoff
//! retries, and per-request timeout cancellation.
//!
//! ```no_run
//! use fetchax::FxClient;
//!
//! # async fn run() -> Result<(), fetchax::FxError> {
//! let client = FxClient::builder()
//!     .base_url("https://api.example.com")
//!     .build()?;
//! let user = client.get("/users/1", None).await?;
//! println!("{user}");
//! # Ok(())
//! # }
//! ```

pub mod core;

pub use crate::core::{
    Cache, CacheHint, Credentials, ErrorCode, FxClient, FxClientBuilder, FxError,
    InterceptorChain, Interceptors, Method, RequestConfig, Response, RetryPolicy, retry,
};

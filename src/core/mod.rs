//! Core components of the `fetchax` client.
//!
//! This module contains the building blocks of the library:
//! - The main [`FxClient`] and its builder.
//! - The primary [`FxError`] type.
//! - The request pipeline's parts: URL assembly, interceptor chains, the
//!   response cache, and the retry helper.

/// Time-expiring response cache keyed by resolved URL.
pub mod cache;
/// The main client (`FxClient`), builder, and request pipeline.
pub mod client;
/// The primary error type (`FxError`) for the crate.
pub mod error;
/// Ordered interceptor registries for requests and responses.
pub mod interceptor;
/// Shared data models (`RequestConfig`, `Response`, `RetryPolicy`, ...).
pub mod models;
/// Constant-backoff retry of fallible async operations.
pub mod retry;
/// Request URL assembly.
pub mod url;

// convenient re-exports so most code can just `use crate::core::FxClient`
pub use cache::Cache;
pub use client::{FxClient, FxClientBuilder, Interceptors};
pub use error::{ErrorCode, FxError};
pub use interceptor::InterceptorChain;
pub use models::{CacheHint, Credentials, Method, RequestConfig, Response, RetryPolicy};
pub use retry::retry;

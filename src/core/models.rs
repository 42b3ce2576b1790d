//! Shared data models: request configuration, the response envelope, and the
//! per-request retry policy.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::error::FxError;

/// HTTP verbs understood by the client.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    #[default]
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }

    pub(crate) fn as_reqwest(self) -> reqwest::Method {
        match self {
            Self::Get => reqwest::Method::GET,
            Self::Post => reqwest::Method::POST,
            Self::Put => reqwest::Method::PUT,
            Self::Patch => reqwest::Method::PATCH,
            Self::Delete => reqwest::Method::DELETE,
        }
    }

    /// Verbs that get a default `Content-Type: application/json` header.
    pub(crate) fn defaults_to_json(self) -> bool {
        matches!(self, Self::Post | Self::Put | Self::Patch)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fetch-style credentials mode. `Include` enables the transport cookie store;
/// the other modes leave it off.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Credentials {
    #[default]
    SameOrigin,
    Include,
    Omit,
}

/// Platform caching hint, rendered as a `Cache-Control` request header when
/// the client was built with `cache_hints(true)`. Ignored otherwise.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CacheHint {
    NoStore,
    NoCache,
    ForceCache,
}

impl CacheHint {
    pub(crate) fn header_value(self) -> &'static str {
        match self {
            Self::NoStore => "no-store",
            Self::NoCache => "no-cache",
            Self::ForceCache => "max-stale",
        }
    }
}

/// Constant-backoff retry configuration for one request.
///
/// A configured policy re-runs the request interceptors and the dispatch on
/// every attempt; only the initial cache lookup stays outside the loop.
#[derive(Clone)]
pub struct RetryPolicy {
    /// Re-attempts after the first try; total attempts are `max_retries + 1`.
    pub max_retries: u32,
    /// Constant wait between attempts.
    pub retry_delay: Duration,
    /// Gate deciding whether a given error is worth another attempt.
    /// When absent, every error is retryable.
    pub retry_condition: Option<Arc<dyn Fn(&FxError) -> bool + Send + Sync>>,
}

impl RetryPolicy {
    #[must_use]
    pub fn new(max_retries: u32, retry_delay: Duration) -> Self {
        Self {
            max_retries,
            retry_delay,
            retry_condition: None,
        }
    }

    /// Attach a retry gate.
    #[must_use]
    pub fn condition<F>(mut self, pred: F) -> Self
    where
        F: Fn(&FxError) -> bool + Send + Sync + 'static,
    {
        self.retry_condition = Some(Arc::new(pred));
        self
    }
}

impl fmt::Debug for RetryPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetryPolicy")
            .field("max_retries", &self.max_retries)
            .field("retry_delay", &self.retry_delay)
            .field("retry_condition", &self.retry_condition.is_some())
            .finish()
    }
}

/// Per-request configuration. Every field is optional; the executor merges it
/// over the client's base configuration with per-call values winning, and the
/// convenience verbs fill in `url` and `method`.
#[derive(Clone, Debug, Default)]
pub struct RequestConfig {
    /// Path (or full URL when the client has no base URL).
    pub url: String,
    pub method: Method,
    pub headers: HashMap<String, String>,
    /// JSON payload, serialized just before dispatch. Never sent when absent.
    pub body: Option<Value>,
    /// Query parameters, serialized in insertion order.
    pub params: Vec<(String, String)>,
    /// Deadline for the transport call of each attempt.
    pub timeout: Option<Duration>,
    /// Serve GETs from the response cache and store their results.
    pub use_cache: bool,
    /// Per-entry cache ttl; falls back to the client's default when absent.
    pub cache_timeout: Option<Duration>,
    pub retry_policy: Option<RetryPolicy>,
    pub cache_hint: Option<CacheHint>,
    /// Filled from the client's credentials mode during the merge so
    /// interceptors can observe it.
    pub credentials: Option<Credentials>,
}

impl RequestConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.params.push((key.into(), value.to_string()));
        self
    }

    /// Append a parameter only when a value is present.
    #[must_use]
    pub fn param_opt<V: ToString>(self, key: impl Into<String>, value: Option<V>) -> Self {
        match value {
            Some(v) => self.param(key, v),
            None => self,
        }
    }

    #[must_use]
    pub fn timeout(mut self, dur: Duration) -> Self {
        self.timeout = Some(dur);
        self
    }

    #[must_use]
    pub fn use_cache(mut self) -> Self {
        self.use_cache = true;
        self
    }

    #[must_use]
    pub fn cache_timeout(mut self, dur: Duration) -> Self {
        self.cache_timeout = Some(dur);
        self
    }

    #[must_use]
    pub fn retry(mut self, policy: RetryPolicy) -> Self {
        self.retry_policy = Some(policy);
        self
    }

    #[must_use]
    pub fn cache_hint(mut self, hint: CacheHint) -> Self {
        self.cache_hint = Some(hint);
        self
    }
}

/// A decoded HTTP response envelope, as seen by response interceptors.
///
/// The public verbs unwrap it and hand `data` back to the caller.
#[derive(Clone, Debug)]
pub struct Response {
    /// Decoded JSON payload.
    pub data: Value,
    pub status: u16,
    pub status_text: String,
    pub headers: HashMap<String, String>,
    /// The configuration that produced this response (post-interceptor).
    pub config: RequestConfig,
}

//! Public client surface + builder.
//! The request pipeline itself lives in `execute`.

mod constants;
mod execute;

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use serde_json::Value;

use crate::core::cache::Cache;
use crate::core::error::FxError;
use crate::core::interceptor::InterceptorChain;
use crate::core::models::{Credentials, Method, RequestConfig, Response};
use constants::DEFAULT_CACHE_TTL;

/// The request and response interceptor registries of one client.
pub struct Interceptors {
    /// Transforms applied to the merged configuration before dispatch.
    pub request: InterceptorChain<RequestConfig>,
    /// Transforms applied to a successful response before caching and return.
    pub response: InterceptorChain<Response>,
}

/// Axios-style HTTP client.
///
/// Cheap to clone; clones share the response cache and the interceptor
/// registries.
#[derive(Clone)]
pub struct FxClient {
    http: Client,
    base_url: String,
    base_headers: HashMap<String, String>,
    timeout: Option<Duration>,
    credentials: Credentials,
    cache_hints: bool,
    cache: Arc<Cache>,
    interceptors: Arc<Interceptors>,
}

impl Default for FxClient {
    fn default() -> Self {
        Self::builder().build().expect("default client")
    }
}

impl FxClient {
    /// Create a new builder.
    #[must_use]
    pub fn builder() -> FxClientBuilder {
        FxClientBuilder::default()
    }

    /// The request and response interceptor registries.
    #[must_use]
    pub fn interceptors(&self) -> &Interceptors {
        &self.interceptors
    }

    /// Drop every cached response.
    pub async fn clear_cache(&self) {
        self.cache.clear().await;
    }

    /// Number of cached responses (expired-but-uncollected entries included).
    pub async fn cache_len(&self) -> usize {
        self.cache.len().await
    }

    pub(crate) fn http(&self) -> &Client {
        &self.http
    }

    pub(crate) fn cache(&self) -> &Cache {
        &self.cache
    }

    /// Issue a GET request and return the decoded payload.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, config), err, fields(path = %path)))]
    pub async fn get(&self, path: &str, config: Option<RequestConfig>) -> Result<Value, FxError> {
        self.request(with_route(config, path, Method::Get, None)).await
    }

    /// Issue a POST request with an optional JSON body.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, body, config), err, fields(path = %path)))]
    pub async fn post(
        &self,
        path: &str,
        body: Option<Value>,
        config: Option<RequestConfig>,
    ) -> Result<Value, FxError> {
        self.request(with_route(config, path, Method::Post, body)).await
    }

    /// Issue a PUT request with an optional JSON body.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, body, config), err, fields(path = %path)))]
    pub async fn put(
        &self,
        path: &str,
        body: Option<Value>,
        config: Option<RequestConfig>,
    ) -> Result<Value, FxError> {
        self.request(with_route(config, path, Method::Put, body)).await
    }

    /// Issue a PATCH request with an optional JSON body.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, body, config), err, fields(path = %path)))]
    pub async fn patch(
        &self,
        path: &str,
        body: Option<Value>,
        config: Option<RequestConfig>,
    ) -> Result<Value, FxError> {
        self.request(with_route(config, path, Method::Patch, body)).await
    }

    /// Issue a DELETE request.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, config), err, fields(path = %path)))]
    pub async fn delete(&self, path: &str, config: Option<RequestConfig>) -> Result<Value, FxError> {
        self.request(with_route(config, path, Method::Delete, None)).await
    }
}

/// Fill the routing fields the convenience verbs own.
fn with_route(
    config: Option<RequestConfig>,
    path: &str,
    method: Method,
    body: Option<Value>,
) -> RequestConfig {
    let mut config = config.unwrap_or_default();
    config.url = path.to_owned();
    config.method = method;
    if body.is_some() {
        config.body = body;
    }
    config
}

/* ----------------------- Builder ----------------------- */

#[derive(Default)]
pub struct FxClientBuilder {
    base_url: Option<String>,
    headers: HashMap<String, String>,
    timeout: Option<Duration>,
    credentials: Option<Credentials>,
    cache_ttl: Option<Duration>,
    cache_hints: bool,
}

impl FxClientBuilder {
    /// Base URL prepended to every per-call path. Without one, paths are used
    /// verbatim.
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Add one header sent with every request (per-call headers win).
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Extend the base headers.
    #[must_use]
    pub fn headers(mut self, headers: HashMap<String, String>) -> Self {
        self.headers.extend(headers);
        self
    }

    /// Default per-request deadline. Per-call timeouts override it.
    #[must_use]
    pub fn timeout(mut self, dur: Duration) -> Self {
        self.timeout = Some(dur);
        self
    }

    /// Credentials mode; `Include` enables the transport cookie store.
    #[must_use]
    pub fn credentials(mut self, mode: Credentials) -> Self {
        self.credentials = Some(mode);
        self
    }

    /// Default ttl for cached responses. Default: 5 minutes.
    #[must_use]
    pub fn cache_ttl(mut self, dur: Duration) -> Self {
        self.cache_ttl = Some(dur);
        self
    }

    /// Allow per-request `CacheHint`s to reach the wire as `Cache-Control`
    /// headers. Off by default; hints on requests are then ignored.
    #[must_use]
    pub fn cache_hints(mut self, enabled: bool) -> Self {
        self.cache_hints = enabled;
        self
    }

    pub fn build(self) -> Result<FxClient, FxError> {
        let credentials = self.credentials.unwrap_or_default();

        let mut httpb = Client::builder();
        if credentials == Credentials::Include {
            httpb = httpb.cookie_store(true);
        }
        let http = httpb.build()?;

        Ok(FxClient {
            http,
            base_url: self.base_url.unwrap_or_default(),
            base_headers: self.headers,
            timeout: self.timeout,
            credentials,
            cache_hints: self.cache_hints,
            cache: Arc::new(Cache::new(self.cache_ttl.unwrap_or(DEFAULT_CACHE_TTL))),
            interceptors: Arc::new(Interceptors {
                request: InterceptorChain::new(),
                response: InterceptorChain::new(),
            }),
        })
    }
}

//! The request pipeline: configuration merge, cache short-circuit,
//! interceptor chains, dispatch under a deadline, error normalization, and
//! the cache write.

use std::collections::HashMap;

use serde_json::Value;

use super::FxClient;
use super::constants::{CACHE_CONTROL, CONTENT_TYPE, DEFAULT_CONTENT_TYPE};
use crate::core::error::FxError;
use crate::core::models::{Method, RequestConfig, Response};
use crate::core::retry::retry;
use crate::core::url::build_url;

impl FxClient {
    /// Issue one request described by `config`, returning the decoded payload.
    ///
    /// A configured retry policy re-runs the request interceptors and the
    /// dispatch on every attempt; the cache short-circuit below runs once.
    pub(crate) async fn request(&self, config: RequestConfig) -> Result<Value, FxError> {
        let merged = self.merge_config(config);
        let url = build_url(&self.base_url, &merged.url, &merged.params);

        if merged.use_cache && merged.method == Method::Get {
            if let Some(hit) = self.cache().get(&url).await {
                #[cfg(feature = "tracing")]
                tracing::debug!(%url, "serving response from cache");
                return Ok(hit.data);
            }
        }

        let response = match merged.retry_policy.clone() {
            Some(policy) => {
                retry(
                    || self.dispatch(&url, &merged),
                    policy.max_retries,
                    policy.retry_delay,
                    policy.retry_condition.as_deref(),
                )
                .await?
            }
            None => self.dispatch(&url, &merged).await?,
        };

        Ok(response.data)
    }

    /// Merge the client's base configuration under the per-call one.
    ///
    /// Per-call headers override base headers (case-insensitively), and a
    /// default JSON content type is supplied for body-bearing verbs only when
    /// neither side named one.
    fn merge_config(&self, call: RequestConfig) -> RequestConfig {
        let mut merged = call;

        let mut headers = self.base_headers.clone();
        let overrides: Vec<(String, String)> = merged.headers.drain().collect();
        for (name, value) in overrides {
            insert_header(&mut headers, name, value);
        }
        if merged.method.defaults_to_json()
            && !headers.keys().any(|k| k.eq_ignore_ascii_case(CONTENT_TYPE))
        {
            headers.insert(CONTENT_TYPE.to_owned(), DEFAULT_CONTENT_TYPE.to_owned());
        }
        merged.headers = headers;

        merged.timeout = merged.timeout.or(self.timeout);
        merged.credentials = merged.credentials.or(Some(self.credentials));
        merged
    }

    /// One attempt: request interceptors, transport call under the deadline,
    /// status/decode normalization, response interceptors, cache write.
    async fn dispatch(&self, url: &str, merged: &RequestConfig) -> Result<Response, FxError> {
        let config = self.interceptors().request.run(merged.clone()).await?;

        let mut req = self.http().request(config.method.as_reqwest(), url);
        for (name, value) in &config.headers {
            req = req.header(name.as_str(), value.as_str());
        }
        if self.cache_hints
            && let Some(hint) = config.cache_hint
        {
            req = req.header(CACHE_CONTROL, hint.header_value());
        }
        if let Some(body) = &config.body {
            req = req.body(serde_json::to_string(body)?);
        }

        // The deadline covers the transport call only; interceptors ran
        // before it was armed.
        let send = req.send();
        let resp = match config.timeout {
            Some(after) => tokio::time::timeout(after, send)
                .await
                .map_err(|_| FxError::Timeout { after: Some(after) })??,
            None => send.await?,
        };

        let status = resp.status();
        let status_text = status.canonical_reason().unwrap_or("").to_owned();
        let headers: HashMap<String, String> = resp
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value.to_str().ok().map(|v| (name.to_string(), v.to_owned()))
            })
            .collect();
        let body = resp.text().await?;

        if !status.is_success() {
            // Best-effort decode of the error body; an undecodable body
            // degrades to Null instead of masking the status error.
            let data = serde_json::from_str(&body).unwrap_or(Value::Null);
            #[cfg(feature = "tracing")]
            tracing::debug!(%url, status = status.as_u16(), "request failed with error status");
            return Err(FxError::status_error(status.as_u16(), data));
        }

        let data: Value = serde_json::from_str(&body)?;

        let response = Response {
            data,
            status: status.as_u16(),
            status_text,
            headers,
            config: config.clone(),
        };
        let response = self.interceptors().response.run(response).await?;

        if config.use_cache && config.method == Method::Get {
            self.cache().set(url, response.clone(), config.cache_timeout).await;
        }

        Ok(response)
    }
}

/// Insert `name: value`, replacing any existing header whose name matches
/// case-insensitively.
fn insert_header(headers: &mut HashMap<String, String>, name: String, value: String) {
    headers.retain(|existing, _| !existing.eq_ignore_ascii_case(&name));
    headers.insert(name, value);
}

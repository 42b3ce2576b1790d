//! Centralized defaults for the client.

use std::time::Duration;

/// Ttl for cached responses when neither the builder nor the individual
/// write supplies one.
pub(crate) const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(5 * 60);

/// Body content type assumed for POST/PUT/PATCH when the caller does not
/// supply one.
pub(crate) const DEFAULT_CONTENT_TYPE: &str = "application/json";

pub(crate) const CONTENT_TYPE: &str = "Content-Type";

pub(crate) const CACHE_CONTROL: &str = "Cache-Control";

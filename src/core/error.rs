use serde_json::Value;
use thiserror::Error;

/// Classification attached to an HTTP status error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorCode {
    /// The server answered 429.
    RateLimit,
    /// Any other non-2xx status.
    ApiError,
}

impl ErrorCode {
    /// Wire-style string form (`"RATE_LIMIT"` / `"API_ERROR"`).
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::RateLimit => "RATE_LIMIT",
            Self::ApiError => "API_ERROR",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The primary error type for all fallible operations in this crate.
#[derive(Debug, Error)]
pub enum FxError {
    /// The transport failed: no response was received, or its body could not
    /// be read. The underlying `reqwest::Error` is kept as the source.
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),

    /// The per-request deadline fired before the transport call completed.
    #[error("request timed out")]
    Timeout {
        /// The deadline that fired, when the failure came from the client's
        /// own timer rather than the transport.
        after: Option<std::time::Duration>,
    },

    /// The server answered with a non-2xx status. `data` carries the decoded
    /// error body when it parses, `Value::Null` otherwise.
    #[error("unexpected response status {status} ({code})")]
    Status {
        /// The HTTP status code.
        status: u16,
        /// Best-effort decoded error body.
        data: Value,
        /// `RateLimit` for 429, `ApiError` for everything else.
        code: ErrorCode,
    },

    /// A success response whose body could not be decoded.
    #[error("response body decode failed: {0}")]
    Parse(String),

    /// Raised by a request or response interceptor; carried through without
    /// further classification.
    #[error("interceptor error: {0}")]
    Interceptor(Box<dyn std::error::Error + Send + Sync>),
}

impl FxError {
    pub(crate) fn status_error(status: u16, data: Value) -> Self {
        let code = if status == 429 {
            ErrorCode::RateLimit
        } else {
            ErrorCode::ApiError
        };
        Self::Status { status, data, code }
    }

    /// Wrap an arbitrary handler error for propagation through a chain.
    pub fn interceptor<E>(err: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Self::Interceptor(err.into())
    }

    /// The HTTP status code, when a response was received.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The status classification code, when a response was received.
    #[must_use]
    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            Self::Status { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Whether this error came from the per-request deadline or a transport
    /// timeout.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}

impl From<serde_json::Error> for FxError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e.to_string())
    }
}

impl From<reqwest::Error> for FxError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Timeout { after: None }
        } else {
            Self::Network(e)
        }
    }
}

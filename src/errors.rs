use reqwest::StatusCode;
use std::fmt;
use thiserror::Error;

/// A non-200 status code sent back by upstream.
///
/// The code is kept as data so callers can branch on it (429 for throttling,
/// 404 for an unknown BIN) instead of parsing a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StatusCodeError(pub u16);

impl StatusCodeError {
    /// The numeric HTTP status code.
    pub fn code(&self) -> u16 {
        self.0
    }

    /// The canonical reason phrase, or an empty string for unregistered codes.
    pub fn reason(&self) -> &'static str {
        StatusCode::from_u16(self.0)
            .ok()
            .and_then(|status| status.canonical_reason())
            .unwrap_or("")
    }
}

impl fmt::Display for StatusCodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.reason() {
            "" => write!(f, "{}", self.0),
            reason => write!(f, "{} {}", self.0, reason),
        }
    }
}

impl std::error::Error for StatusCodeError {}

impl From<StatusCode> for StatusCodeError {
    fn from(status: StatusCode) -> Self {
        StatusCodeError(status.as_u16())
    }
}

/// Errors returned by a BIN lookup.
#[derive(Debug, Error)]
pub enum LookupError {
    /// The BIN failed the local format check. No request was sent.
    #[error("invalid BIN: {message}")]
    Validation {
        /// The rejected input. Kept out of the `Display` output since it may be a card number.
        bin: String,
        /// Description of the accepted format.
        message: &'static str,
    },

    /// The request never produced a usable response (connect, DNS, timeout, body read).
    ///
    /// The wrapped error has its URL stripped, since the URL path is the BIN.
    #[error("lookup request failed: {0}")]
    Transport(#[source] reqwest::Error),

    /// Upstream answered with something other than 200.
    #[error("failed due to status code error: {0}")]
    Status(#[from] StatusCodeError),

    /// A 200 response whose body is not the expected JSON.
    #[error("JSON decoding failed: {0}")]
    Decode(#[from] serde_json::Error),

    /// The client configuration is unusable.
    #[error("invalid client configuration: {0}")]
    Config(String),
}

impl From<reqwest::Error> for LookupError {
    /// Converts a `reqwest::Error` into `LookupError::Transport`, dropping its URL.
    fn from(err: reqwest::Error) -> Self {
        LookupError::Transport(err.without_url())
    }
}

impl LookupError {
    /// The upstream status code, if this is a status error.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            LookupError::Status(status) => Some(status.code()),
            _ => None,
        }
    }

    /// Upstream is throttling (429).
    pub fn is_rate_limited(&self) -> bool {
        self.status_code() == Some(StatusCode::TOO_MANY_REQUESTS.as_u16())
    }

    /// Upstream does not know the BIN (404).
    pub fn is_not_found(&self) -> bool {
        self.status_code() == Some(StatusCode::NOT_FOUND.as_u16())
    }

    /// The transport gave up waiting.
    pub fn is_timeout(&self) -> bool {
        matches!(self, LookupError::Transport(e) if e.is_timeout())
    }

    /// Whether a later attempt could plausibly succeed.
    ///
    /// Only a hint: the client itself never retries.
    pub fn is_retryable(&self) -> bool {
        matches!(self, LookupError::Transport(_)) || self.is_rate_limited()
    }
}

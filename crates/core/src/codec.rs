//! Progress cookie codec.
//!
//! Progress travels as `quizA-1=<percent-encoded JSON>`; see
//! [`ProgressState`] for the JSON shape.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use crate::cookie::parse_cookies;
use crate::error::CodecError;
use crate::model::ProgressState;

/// Name of the cookie holding quiz progress.
pub const PROGRESS_COOKIE: &str = "quizA-1";

/// Lifetime of the progress cookie: 24 hours.
pub const PROGRESS_MAX_AGE_SECS: u64 = 60 * 60 * 24;

/// Characters left untouched by JavaScript's `encodeURIComponent`.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Reads progress from a raw `Cookie` header.
///
/// Returns the fresh state when the progress cookie is absent.
///
/// # Errors
///
/// Returns `CodecError::MalformedProgress` when the cookie is present but
/// does not hold a valid progress payload.
pub fn decode_progress(header: &str) -> Result<ProgressState, CodecError> {
    let cookies = parse_cookies(header);
    match cookies.get(PROGRESS_COOKIE) {
        None => Ok(ProgressState::fresh()),
        Some(json) => Ok(serde_json::from_str(json)?),
    }
}

/// Builds the `Set-Cookie` value for `state` with the default attributes.
#[must_use]
pub fn encode_progress(state: &ProgressState, domain: &str) -> String {
    ProgressCookie::new(domain).encode(state)
}

/// Attributes of the progress cookie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressCookie {
    name: String,
    domain: String,
    path: String,
    max_age_secs: u64,
}

impl ProgressCookie {
    #[must_use]
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            name: PROGRESS_COOKIE.to_string(),
            domain: domain.into(),
            path: "/".to_string(),
            max_age_secs: PROGRESS_MAX_AGE_SECS,
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    #[must_use]
    pub fn with_max_age(mut self, secs: u64) -> Self {
        self.max_age_secs = secs;
        self
    }

    /// Serializes `state` into a full `Set-Cookie` header value.
    ///
    /// The cookie is always `Secure`, `HttpOnly` and `SameSite=None` so that
    /// the quiz can be embedded cross-site.
    #[must_use]
    pub fn encode(&self, state: &ProgressState) -> String {
        // Three integers cannot fail to serialize.
        let json = serde_json::to_string(state).unwrap_or_default();
        let value = utf8_percent_encode(&json, COMPONENT);
        format!(
            "{}={value}; Max-Age={}; Path={}; Domain={}; Secure; HttpOnly; SameSite=None",
            self.name, self.max_age_secs, self.path, self.domain
        )
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

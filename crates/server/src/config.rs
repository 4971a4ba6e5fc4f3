//! Startup configuration, read once from the environment.

use std::{
    env,
    fmt::{self, Display},
    str::FromStr,
};

use tracing::{info, warn};
use url::Url;

/// Deployment flavour; selects the default cookie domain and CORS origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Production,
    Development,
}

impl Environment {
    #[must_use]
    pub fn default_cookie_domain(self) -> &'static str {
        match self {
            Environment::Production => "drk.com.ar",
            Environment::Development => "localhost",
        }
    }

    #[must_use]
    pub fn default_allowed_origin(self) -> &'static str {
        match self {
            Environment::Production => "https://www.drk.com.ar",
            Environment::Development => "http://localhost:5173",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::Production => write!(f, "production"),
            Environment::Development => write!(f, "development"),
        }
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" => Ok(Self::Production),
            "development" | "dev" => Ok(Self::Development),
            other => Err(format!("unknown environment: {other}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub environment: Environment,
    pub port: u16,
    pub db_url: String,
    pub cookie_domain: String,
    /// Serialized origin (`scheme://host[:port]`) allowed by CORS.
    pub allowed_origin: String,
    /// Name of the session cookie; the session lookup is off when unset.
    pub session_cookie: Option<String>,
}

impl Config {
    pub const DEFAULT_PORT: u16 = 8787;
    pub const DEFAULT_DB_URL: &'static str = "sqlite://quiz.sqlite3?mode=rwc";

    /// Load from process environment variables.
    #[must_use]
    pub fn load() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load through `lookup`, which maps a variable name to its value.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let environment: Environment = try_load(&lookup, "QUIZ_ENV", Environment::Development);

        let cookie_domain = lookup("QUIZ_COOKIE_DOMAIN")
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| environment.default_cookie_domain().to_string());

        let allowed_origin = lookup("QUIZ_ALLOWED_ORIGIN")
            .and_then(|raw| {
                parse_origin(&raw)
                    .map_err(|e| warn!("Invalid QUIZ_ALLOWED_ORIGIN value {raw}: {e}"))
                    .ok()
            })
            .unwrap_or_else(|| environment.default_allowed_origin().to_string());

        let session_cookie = lookup("QUIZ_SESSION_COOKIE")
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty());

        Self {
            environment,
            port: try_load(&lookup, "QUIZ_PORT", Self::DEFAULT_PORT),
            db_url: lookup("QUIZ_DB_URL").unwrap_or_else(|| Self::DEFAULT_DB_URL.to_string()),
            cookie_domain,
            allowed_origin,
            session_cookie,
        }
    }
}

/// Reduces a URL to its serialized origin, e.g. `https://example.com`.
fn parse_origin(raw: &str) -> Result<String, String> {
    let url = Url::parse(raw.trim()).map_err(|e| e.to_string())?;
    let origin = url.origin();
    if !origin.is_tuple() {
        return Err("opaque origin".to_string());
    }
    Ok(origin.ascii_serialization())
}

fn try_load<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T
where
    T: FromStr + Display,
    T::Err: Display,
{
    let Some(raw) = lookup(key) else {
        info!("{key} not set, using default: {default}");
        return default;
    };

    raw.parse().unwrap_or_else(|e| {
        warn!("Invalid {key} value: {e}, using default: {default}");
        default
    })
}

use std::time::Duration;

use axum::http::{HeaderValue, Method, header::CONTENT_TYPE};
use tower_http::cors::CorsLayer;
use tracing::warn;

use crate::config::Config;

/// Pre-flight responses may be cached for a day.
const MAX_AGE: Duration = Duration::from_secs(60 * 60 * 24);

/// CORS for the single configured origin, with credentials so the progress
/// cookie travels cross-site.
pub fn create_cors_layer(config: &Config) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::HEAD, Method::PUT, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .allow_credentials(true)
        .max_age(MAX_AGE);

    match config.allowed_origin.parse::<HeaderValue>() {
        Ok(origin) => cors.allow_origin(origin),
        Err(e) => {
            warn!("Allowed origin {} is not a header value: {e}", config.allowed_origin);
            cors
        }
    }
}

use quiz_core::ProgressCookie;
use services::QuizServices;

use crate::config::Config;

/// Shared, read-only request state.
#[derive(Clone)]
pub struct AppState {
    pub services: QuizServices,
    pub cookie: ProgressCookie,
}

impl AppState {
    #[must_use]
    pub fn new(config: &Config, services: QuizServices) -> Self {
        Self {
            services,
            cookie: ProgressCookie::new(config.cookie_domain.clone()),
        }
    }
}

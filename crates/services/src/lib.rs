#![forbid(unsafe_code)]

pub mod app_services;
pub mod error;
pub mod quiz_service;
pub mod session_service;

pub use app_services::QuizServices;
pub use error::{QuizError, ServicesError, SessionError};
pub use quiz_service::QuizSequencer;
pub use session_service::{Session, SessionService};

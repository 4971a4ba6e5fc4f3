#![forbid(unsafe_code)]

pub mod codec;
pub mod cookie;
pub mod error;
pub mod model;

pub use codec::{
    PROGRESS_COOKIE, PROGRESS_MAX_AGE_SECS, ProgressCookie, decode_progress, encode_progress,
};
pub use cookie::parse_cookies;
pub use error::{CodecError, QuestionError};

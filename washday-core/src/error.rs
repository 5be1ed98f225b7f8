//! Error type shared by every engine entry point.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Settings that would make the decay curve or cycle math undefined.
    #[error("invalid settings: {0}")]
    InvalidSettings(String),

    #[error("invalid date '{input}': {reason}")]
    InvalidDate { input: String, reason: String },
}

pub type Result<T> = std::result::Result<T, Error>;

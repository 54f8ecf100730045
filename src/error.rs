use thiserror::Error;

/// Errors surfaced while building a bank or addressing its ports.
///
/// Musical input never produces an error: unknown status bytes, redundant
/// note-offs and unknown controllers are ignored.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    #[error("signal graph has no output destination")]
    NoDestination,
    #[error("port count {0} is outside 1..=99")]
    InvalidPortCount(usize),
    #[error("{name} must be finite and non-negative, got {value}")]
    InvalidGain { name: &'static str, value: f64 },
    #[error("no port at index {0}")]
    UnknownPort(usize),
}

pub type Result<T> = core::result::Result<T, Error>;

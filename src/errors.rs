//! Error types for psafe3-rs

pub use crate::binary::errors::{
    ConfigurationError, IntegrityError, OpenError, PatternError, RecordError, UnlockError,
};
use crate::binary::FailedUnlock;
use thiserror::Error;

#[derive(Error, Debug)]
/// Wrapper error type for this library
pub enum Error {
    /// Failed to open a database
    #[error("Could not open database: {0}")]
    Open(#[from] OpenError),
    /// Failed unlocking a database
    #[error("Could not unlock database: {0}")]
    Unlock(#[from] UnlockError),
    /// Search expression could not be compiled
    #[error("Could not search database: {0}")]
    Pattern(#[from] PatternError),
}

impl From<FailedUnlock> for Error {
    fn from(funlock: FailedUnlock) -> Error {
        Error::Unlock(funlock.1)
    }
}

//! Strategy error types.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MmError {
    #[error("Invalid strategy parameter: {0}")]
    InvalidParams(String),

    #[error("Invalid history configuration: {0}")]
    InvalidHistory(String),
}

pub type MmResult<T> = Result<T, MmError>;

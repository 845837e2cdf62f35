//! Core error type.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("velocity must be finite and positive, got {0}")]
    InvalidVelocity(f64),
}

pub type CoreResult<T> = Result<T, CoreError>;

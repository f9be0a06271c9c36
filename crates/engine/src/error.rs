//! Error handling for the reference engine

use isokex_api::Error as CoreError;
use thiserror::Error;

/// Failures raised inside the reference engine
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("{context}: expected {expected} bytes, got {actual}")]
    Length {
        context: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("curve {id} is not supported by the reference engine")]
    Unsupported { id: &'static str },

    #[error("{0}: context is not initialized")]
    Uninitialized(&'static str),

    #[error("{context}: {reason}")]
    InvalidInput {
        context: &'static str,
        reason: &'static str,
    },

    #[error("public key rejected: {0}")]
    Validation(&'static str),

    #[error("{context}: no acceptable sample after {limit} draws")]
    SamplingExhausted { context: &'static str, limit: usize },

    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Result type for engine internals
pub type Result<T> = core::result::Result<T, EngineError>;

impl From<EngineError> for CoreError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::Length { context, expected, actual } => CoreError::InvalidLength {
                context,
                expected,
                actual,
            },
            EngineError::Unsupported { .. } => CoreError::NotImplemented {
                feature: "curve parameter set",
            },
            EngineError::Uninitialized(context) => CoreError::InvalidParameter {
                context,
                message: "context is not initialized".into(),
            },
            EngineError::InvalidInput { context, reason } => CoreError::InvalidParameter {
                context,
                message: reason.into(),
            },
            EngineError::Validation(reason) => CoreError::PublicKeyValidation {
                context: "agree",
                message: reason.into(),
            },
            EngineError::SamplingExhausted { context, limit } => {
                CoreError::TooManyIterations { context, limit }
            }
            EngineError::Core(err) => err,
        }
    }
}

/// Check an exact buffer length
pub(crate) fn length(context: &'static str, actual: usize, expected: usize) -> Result<()> {
    if actual != expected {
        return Err(EngineError::Length { context, expected, actual });
    }
    Ok(())
}

/// Check a public key condition
pub(crate) fn public_key(condition: bool, reason: &'static str) -> Result<()> {
    if !condition {
        return Err(EngineError::Validation(reason));
    }
    Ok(())
}

//! Validation helpers for harness inputs

use super::{Error, Result};

/// Validate a parameter condition
pub fn parameter(condition: bool, context: &'static str, message: &'static str) -> Result<()> {
    if !condition {
        return Err(Error::InvalidParameter {
            context,
            message: message.into(),
        });
    }
    Ok(())
}

/// Validate an exact buffer length
pub fn length(context: &'static str, actual: usize, expected: usize) -> Result<()> {
    if actual != expected {
        return Err(Error::InvalidLength {
            context,
            expected,
            actual,
        });
    }
    Ok(())
}

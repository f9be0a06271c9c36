//! Error type definitions for engine and harness operations

use super::status::Status;

/// Primary error type for engine and harness operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Generic engine failure
    Engine {
        context: &'static str,
        message: String,
    },

    /// Failure raised by the harness itself while a test was running
    DuringTest {
        context: &'static str,
        message: String,
    },

    /// Engine reported a failure it could not classify
    Unknown {
        context: &'static str,
    },

    /// Operation or parameter set not supported by the engine
    NotImplemented {
        feature: &'static str,
    },

    /// Context or buffer allocation failed
    NoMemory {
        context: &'static str,
    },

    /// Invalid parameter error
    InvalidParameter {
        context: &'static str,
        message: String,
    },

    /// Invalid length error with context
    InvalidLength {
        context: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Random generation error
    RandomGenerationError {
        context: &'static str,
        message: String,
    },

    /// The two parties derived different shared secrets
    SharedKeyMismatch {
        context: &'static str,
    },

    /// A peer public key was rejected by validation
    PublicKeyValidation {
        context: &'static str,
        message: String,
    },

    /// Rejection sampling gave up
    TooManyIterations {
        context: &'static str,
        limit: usize,
    },
}

/// Result type for engine and harness operations
pub type Result<T> = core::result::Result<T, Error>;

impl Error {
    /// Engine status code this error reports as
    pub fn status(&self) -> Status {
        match self {
            Self::Engine { .. } => Status::Error,
            Self::DuringTest { .. } => Status::ErrorDuringTest,
            Self::Unknown { .. } => Status::Unknown,
            Self::NotImplemented { .. } => Status::NotImplemented,
            Self::NoMemory { .. } => Status::NoMemory,
            Self::InvalidParameter { .. } | Self::InvalidLength { .. } => Status::InvalidParameter,
            Self::RandomGenerationError { .. } => Status::Error,
            Self::SharedKeyMismatch { .. } => Status::SharedKey,
            Self::PublicKeyValidation { .. } => Status::PublicKeyValidation,
            Self::TooManyIterations { .. } => Status::TooManyIterations,
        }
    }

    /// Lift a non-success status into an error
    ///
    /// Returns `None` for [`Status::Success`].
    pub fn from_status(status: Status, context: &'static str) -> Option<Self> {
        let err = match status {
            Status::Success => return None,
            Status::Error => Self::Engine { context, message: String::new() },
            Status::ErrorDuringTest => Self::DuringTest { context, message: String::new() },
            Status::Unknown => Self::Unknown { context },
            Status::NotImplemented => Self::NotImplemented { feature: context },
            Status::NoMemory => Self::NoMemory { context },
            Status::InvalidParameter => Self::InvalidParameter { context, message: String::new() },
            Status::SharedKey => Self::SharedKeyMismatch { context },
            Status::PublicKeyValidation => {
                Self::PublicKeyValidation { context, message: String::new() }
            }
            Status::TooManyIterations => Self::TooManyIterations { context, limit: 0 },
        };
        Some(err)
    }

    /// Whether this is a public key validation rejection
    pub fn is_validation_failure(&self) -> bool {
        matches!(self, Self::PublicKeyValidation { .. })
    }

    /// Replace the context, keeping every other field
    pub fn with_context(self, context: &'static str) -> Self {
        match self {
            Self::Engine { message, .. } => Self::Engine { context, message },
            Self::DuringTest { message, .. } => Self::DuringTest { context, message },
            Self::Unknown { .. } => Self::Unknown { context },
            Self::NotImplemented { feature } => Self::NotImplemented { feature },
            Self::NoMemory { .. } => Self::NoMemory { context },
            Self::InvalidParameter { message, .. } => Self::InvalidParameter { context, message },
            Self::InvalidLength { expected, actual, .. } => Self::InvalidLength {
                context,
                expected,
                actual,
            },
            Self::RandomGenerationError { message, .. } => {
                Self::RandomGenerationError { context, message }
            }
            Self::SharedKeyMismatch { .. } => Self::SharedKeyMismatch { context },
            Self::PublicKeyValidation { message, .. } => {
                Self::PublicKeyValidation { context, message }
            }
            Self::TooManyIterations { limit, .. } => Self::TooManyIterations { context, limit },
        }
    }

    /// Attach a message to variants that carry one
    pub fn with_message(self, message: impl Into<String>) -> Self {
        let message = message.into();
        match self {
            Self::Engine { context, .. } => Self::Engine { context, message },
            Self::DuringTest { context, .. } => Self::DuringTest { context, message },
            Self::InvalidParameter { context, .. } => Self::InvalidParameter { context, message },
            Self::RandomGenerationError { context, .. } => {
                Self::RandomGenerationError { context, message }
            }
            Self::PublicKeyValidation { context, .. } => {
                Self::PublicKeyValidation { context, message }
            }
            other => other,
        }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let status = self.status();
        match self {
            Self::Engine { context, message }
            | Self::DuringTest { context, message }
            | Self::InvalidParameter { context, message }
            | Self::RandomGenerationError { context, message }
            | Self::PublicKeyValidation { context, message } => {
                if message.is_empty() {
                    write!(f, "{}: {}", status, context)
                } else {
                    write!(f, "{}: {}: {}", status, context, message)
                }
            }
            Self::Unknown { context }
            | Self::NoMemory { context }
            | Self::SharedKeyMismatch { context } => {
                write!(f, "{}: {}", status, context)
            }
            Self::NotImplemented { feature } => {
                write!(f, "{}: {} is not implemented", status, feature)
            }
            Self::InvalidLength { context, expected, actual } => {
                write!(
                    f,
                    "{}: {}: invalid length (expected {}, got {})",
                    status, context, expected, actual
                )
            }
            Self::TooManyIterations { context, limit } => {
                write!(f, "{}: {} (gave up after {} draws)", status, context, limit)
            }
        }
    }
}

//! Error handling for the isokex ecosystem

pub mod status;
pub mod traits;
pub mod types;
pub mod validate;

// Re-export the primary error type and result
pub use types::{Error, Result};

pub use status::{message_for_code, Status, UNRECOGNIZED_STATUS};

// Re-export error traits
pub use traits::ResultExt;

pub use validate as validation;

impl std::error::Error for Error {}

impl From<std::collections::TryReserveError> for Error {
    fn from(_: std::collections::TryReserveError) -> Self {
        Self::NoMemory {
            context: "buffer reservation",
        }
    }
}

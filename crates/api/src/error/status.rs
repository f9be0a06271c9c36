//! Engine status codes
//!
//! Every engine call resolves to one of these codes. The numeric values and
//! the diagnostic strings are stable so that results can be compared with
//! engines that report plain integers.

use core::fmt;

/// Message reported for a code outside the known set
pub const UNRECOGNIZED_STATUS: &str = "Unrecognized CRYPTO_STATUS";

/// Result code of an engine call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Status {
    Success = 0,
    Error = 1,
    ErrorDuringTest = 2,
    Unknown = 3,
    NotImplemented = 4,
    NoMemory = 5,
    InvalidParameter = 6,
    SharedKey = 7,
    PublicKeyValidation = 8,
    TooManyIterations = 9,
}

impl Status {
    /// All codes in numeric order
    pub const ALL: [Status; 10] = [
        Status::Success,
        Status::Error,
        Status::ErrorDuringTest,
        Status::Unknown,
        Status::NotImplemented,
        Status::NoMemory,
        Status::InvalidParameter,
        Status::SharedKey,
        Status::PublicKeyValidation,
        Status::TooManyIterations,
    ];

    /// Numeric code
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Look up a status by numeric code
    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.get(code as usize).copied()
    }

    pub fn is_success(self) -> bool {
        self == Status::Success
    }

    /// Diagnostic message for this status
    pub fn message(self) -> &'static str {
        match self {
            Status::Success => "CRYPTO_SUCCESS",
            Status::Error => "CRYPTO_ERROR",
            Status::ErrorDuringTest => "CRYPTO_ERROR_DURING_TEST",
            Status::Unknown => "CRYPTO_ERROR_UNKNOWN",
            Status::NotImplemented => "CRYPTO_ERROR_NOT_IMPLEMENTED",
            Status::NoMemory => "CRYPTO_ERROR_NO_MEMORY",
            Status::InvalidParameter => "CRYPTO_ERROR_INVALID_PARAMETER",
            Status::SharedKey => "CRYPTO_ERROR_SHARED_KEY",
            Status::PublicKeyValidation => "CRYPTO_ERROR_PUBLIC_KEY_VALIDATION",
            Status::TooManyIterations => "CRYPTO_ERROR_TOO_MANY_ITERATIONS",
        }
    }
}

/// Diagnostic message for a raw status code
pub fn message_for_code(code: u8) -> &'static str {
    Status::from_code(code).map_or(UNRECOGNIZED_STATUS, Status::message)
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

use serde::{Deserialize, Serialize};
use std::fmt;

/// Platform-wide error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    // Generic
    Internal,
    InvalidArgument,
    AlreadyExists,

    // Key generation
    UnsupportedAlgorithm,
    InvalidKeySize,
    UnsupportedParameter,
}

impl ErrorCode {
    /// Returns a short string code suitable for API responses.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::Internal => "INTERNAL",
            ErrorCode::InvalidArgument => "INVALID_ARGUMENT",
            ErrorCode::AlreadyExists => "ALREADY_EXISTS",
            ErrorCode::UnsupportedAlgorithm => "UNSUPPORTED_ALGORITHM",
            ErrorCode::InvalidKeySize => "INVALID_KEY_SIZE",
            ErrorCode::UnsupportedParameter => "UNSUPPORTED_PARAMETER",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

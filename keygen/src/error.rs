use crate::config::ConfigError;
use symkey_types::ErrorCode;
use thiserror::Error;

/// Errors produced by key generator initialization, generation and lookup.
#[derive(Debug, Error)]
pub enum KeyGenError {
    #[error("invalid key size for {algorithm}: {reason}")]
    InvalidKeySize { algorithm: String, reason: String },

    #[error("{algorithm} key generation does not take any parameters")]
    UnsupportedParameter { algorithm: String },

    #[error("unknown algorithm: {0}")]
    UnknownAlgorithm(String),

    #[error("algorithm already registered: {0}")]
    DuplicateAlgorithm(String),

    #[error("factory registered as {registered} generates {generated} keys")]
    AlgorithmMismatch { registered: String, generated: String },

    #[error("rng error: {0}")]
    Rng(String),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl KeyGenError {
    /// Map to a platform error code.
    pub fn error_code(&self) -> ErrorCode {
        match self {
            KeyGenError::InvalidKeySize { .. } => ErrorCode::InvalidKeySize,
            KeyGenError::UnsupportedParameter { .. } => ErrorCode::UnsupportedParameter,
            KeyGenError::UnknownAlgorithm(_) => ErrorCode::UnsupportedAlgorithm,
            KeyGenError::DuplicateAlgorithm(_) => ErrorCode::AlreadyExists,
            KeyGenError::AlgorithmMismatch { .. } => ErrorCode::InvalidArgument,
            KeyGenError::Rng(_) => ErrorCode::Internal,
            KeyGenError::Config(_) => ErrorCode::InvalidArgument,
        }
    }

    pub(crate) fn invalid_key_size(algorithm: &str, reason: impl Into<String>) -> Self {
        KeyGenError::InvalidKeySize {
            algorithm: algorithm.to_string(),
            reason: reason.into(),
        }
    }
}

pub type KeyGenResult<T> = Result<T, KeyGenError>;

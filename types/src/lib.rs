pub mod algorithm;
pub mod error_code;

pub use algorithm::{KeySizeConstraint, ParseAlgorithmError, SecretKeyAlgorithm, MIN_KEY_SIZE_BITS};
pub use error_code::ErrorCode;

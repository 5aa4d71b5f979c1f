use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Smallest key size, in bits, any generator in this family will accept.
pub const MIN_KEY_SIZE_BITS: u32 = 40;

/// Secret-key algorithms served by the shared generator core.
///
/// Serialized as the canonical name (`HmacSHA256`); deserialization goes
/// through `FromStr`, so it is case-insensitive and accepts `RC4`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SecretKeyAlgorithm {
    ChaCha20,
    HmacSha224,
    HmacSha256,
    HmacSha384,
    HmacSha512,
    Rc2,
    Arcfour,
}

/// Restriction an algorithm places on explicitly requested key sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeySizeConstraint {
    /// Only the generic minimum applies.
    Any,
    /// The key size must equal this many bits.
    Exactly(u32),
    /// The key size must fall within `min..=max` bits.
    Range { min: u32, max: u32 },
}

impl KeySizeConstraint {
    /// Whether `bits` satisfies this constraint.
    pub fn permits(&self, bits: u32) -> bool {
        match *self {
            KeySizeConstraint::Any => true,
            KeySizeConstraint::Exactly(n) => bits == n,
            KeySizeConstraint::Range { min, max } => (min..=max).contains(&bits),
        }
    }

    /// Same constraint with range bounds in ascending order.
    pub fn normalized(self) -> Self {
        match self {
            KeySizeConstraint::Range { min, max } if min > max => {
                KeySizeConstraint::Range { min: max, max: min }
            }
            other => other,
        }
    }

    /// Human-readable requirement for `algorithm`, or `None` when unconstrained.
    pub fn requirement(&self, algorithm: &str) -> Option<String> {
        match *self {
            KeySizeConstraint::Any => None,
            KeySizeConstraint::Exactly(n) => {
                Some(format!("Key length for {algorithm} must be {n} bits"))
            }
            KeySizeConstraint::Range { min, max } => Some(format!(
                "Key length for {algorithm} must be between {min} and {max} bits"
            )),
        }
    }
}

impl SecretKeyAlgorithm {
    /// Every algorithm, in catalogue order.
    pub const ALL: [SecretKeyAlgorithm; 7] = [
        SecretKeyAlgorithm::ChaCha20,
        SecretKeyAlgorithm::HmacSha224,
        SecretKeyAlgorithm::HmacSha256,
        SecretKeyAlgorithm::HmacSha384,
        SecretKeyAlgorithm::HmacSha512,
        SecretKeyAlgorithm::Rc2,
        SecretKeyAlgorithm::Arcfour,
    ];

    /// Canonical algorithm name attached to generated keys.
    pub fn name(&self) -> &'static str {
        match self {
            SecretKeyAlgorithm::ChaCha20 => "ChaCha20",
            SecretKeyAlgorithm::HmacSha224 => "HmacSHA224",
            SecretKeyAlgorithm::HmacSha256 => "HmacSHA256",
            SecretKeyAlgorithm::HmacSha384 => "HmacSHA384",
            SecretKeyAlgorithm::HmacSha512 => "HmacSHA512",
            SecretKeyAlgorithm::Rc2 => "RC2",
            SecretKeyAlgorithm::Arcfour => "ARCFOUR",
        }
    }

    /// Key size used when the caller does not request one.
    pub fn default_key_size_bits(&self) -> u32 {
        match self {
            SecretKeyAlgorithm::ChaCha20 => 256,
            SecretKeyAlgorithm::HmacSha224 => 224,
            SecretKeyAlgorithm::HmacSha256 => 256,
            SecretKeyAlgorithm::HmacSha384 => 384,
            SecretKeyAlgorithm::HmacSha512 => 512,
            SecretKeyAlgorithm::Rc2 | SecretKeyAlgorithm::Arcfour => 128,
        }
    }

    pub fn key_size_constraint(&self) -> KeySizeConstraint {
        match self {
            SecretKeyAlgorithm::ChaCha20 => KeySizeConstraint::Exactly(256),
            SecretKeyAlgorithm::HmacSha224
            | SecretKeyAlgorithm::HmacSha256
            | SecretKeyAlgorithm::HmacSha384
            | SecretKeyAlgorithm::HmacSha512 => KeySizeConstraint::Any,
            SecretKeyAlgorithm::Rc2 | SecretKeyAlgorithm::Arcfour => KeySizeConstraint::Range {
                min: MIN_KEY_SIZE_BITS,
                max: 1024,
            },
        }
    }

    /// Broken or deprecated ciphers that must be opted into explicitly.
    pub fn is_legacy(&self) -> bool {
        matches!(self, SecretKeyAlgorithm::Rc2 | SecretKeyAlgorithm::Arcfour)
    }
}

impl fmt::Display for SecretKeyAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when a name does not identify any known algorithm.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown secret-key algorithm: {0}")]
pub struct ParseAlgorithmError(pub String);

impl FromStr for SecretKeyAlgorithm {
    type Err = ParseAlgorithmError;

    /// Case-insensitive; `RC4` is accepted as an alias for ARCFOUR.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("RC4") {
            return Ok(SecretKeyAlgorithm::Arcfour);
        }
        SecretKeyAlgorithm::ALL
            .into_iter()
            .find(|alg| alg.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseAlgorithmError(s.to_string()))
    }
}

impl TryFrom<String> for SecretKeyAlgorithm {
    type Error = ParseAlgorithmError;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        name.parse()
    }
}

impl From<SecretKeyAlgorithm> for String {
    fn from(algorithm: SecretKeyAlgorithm) -> Self {
        algorithm.name().to_string()
    }
}

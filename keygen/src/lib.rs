pub mod config;
pub mod core;
pub mod error;
pub mod generator;
pub mod key;
pub mod registry;
pub mod rng;

pub use config::{ConfigError, RegistryConfig};
pub use crate::core::GeneratorCore;
pub use error::{KeyGenError, KeyGenResult};
pub use generator::{KeyGenerator, KeyGeneratorBuilder};
pub use key::GeneratedKey;
pub use registry::{GeneratorFactory, ProviderRegistry};
pub use rng::{CryptoRngSource, OsRandom, RandomSource, SharedRandom};
pub use symkey_types::{KeySizeConstraint, SecretKeyAlgorithm, MIN_KEY_SIZE_BITS};

use crate::core::GeneratorCore;
use crate::error::{KeyGenError, KeyGenResult};
use crate::key::GeneratedKey;
use crate::rng::SharedRandom;
use symkey_types::{KeySizeConstraint, SecretKeyAlgorithm};

/// Secret-key generator for one algorithm.
///
/// Wraps a [`GeneratorCore`] and narrows explicit key sizes with the
/// algorithm's own [`KeySizeConstraint`]. That check runs before the core is
/// touched; a rejected size never reaches the core's generic minimum.
#[derive(Debug)]
pub struct KeyGenerator {
    core: GeneratorCore,
    constraint: KeySizeConstraint,
}

/// Builder for [`KeyGenerator`] instances with custom constraints.
#[derive(Debug, Clone)]
pub struct KeyGeneratorBuilder {
    name: String,
    default_key_size_bits: u32,
    constraint: KeySizeConstraint,
}

impl KeyGeneratorBuilder {
    /// Only `key_size_bits` will be accepted by `init_with_size`.
    pub fn fixed_size(mut self, key_size_bits: u32) -> Self {
        self.constraint = KeySizeConstraint::Exactly(key_size_bits);
        self
    }

    /// Accept sizes within `min..=max` bits. Reversed bounds are swapped.
    pub fn size_range(mut self, min: u32, max: u32) -> Self {
        self.constraint = KeySizeConstraint::Range { min, max };
        self
    }

    pub fn constraint(mut self, constraint: KeySizeConstraint) -> Self {
        self.constraint = constraint;
        self
    }

    pub fn build(self) -> KeyGenerator {
        KeyGenerator {
            core: GeneratorCore::new(self.name, self.default_key_size_bits),
            constraint: self.constraint.normalized(),
        }
    }
}

impl KeyGenerator {
    pub fn builder(name: impl Into<String>, default_key_size_bits: u32) -> KeyGeneratorBuilder {
        KeyGeneratorBuilder {
            name: name.into(),
            default_key_size_bits,
            constraint: KeySizeConstraint::Any,
        }
    }

    /// Generator configured with a catalogue algorithm's name, default size
    /// and constraint.
    pub fn for_algorithm(algorithm: SecretKeyAlgorithm) -> Self {
        Self::builder(algorithm.name(), algorithm.default_key_size_bits())
            .constraint(algorithm.key_size_constraint())
            .build()
    }

    pub fn init(&mut self, random: Option<SharedRandom>) {
        self.core.init(random);
    }

    pub fn init_with_params<P: ?Sized>(
        &mut self,
        params: Option<&P>,
        random: Option<SharedRandom>,
    ) -> KeyGenResult<()> {
        self.core.init_with_params(params, random)
    }

    pub fn init_with_size(
        &mut self,
        key_size_bits: u32,
        random: Option<SharedRandom>,
    ) -> KeyGenResult<()> {
        if !self.constraint.permits(key_size_bits) {
            let algorithm = self.core.algorithm();
            tracing::debug!(
                algorithm = %algorithm,
                requested_bits = key_size_bits,
                constraint = ?self.constraint,
                "rejected key size for algorithm"
            );
            let reason = self
                .constraint
                .requirement(algorithm)
                .unwrap_or_else(|| format!("{key_size_bits} bits is not permitted"));
            return Err(KeyGenError::invalid_key_size(algorithm, reason));
        }
        self.core.init_with_size(key_size_bits, random)
    }

    pub fn generate(&mut self) -> KeyGenResult<GeneratedKey> {
        self.core.generate()
    }

    pub fn algorithm(&self) -> &str {
        self.core.algorithm()
    }

    pub fn default_key_size_bits(&self) -> u32 {
        self.core.default_key_size_bits()
    }

    pub fn key_size_bits(&self) -> u32 {
        self.core.key_size_bits()
    }

    pub fn key_size_constraint(&self) -> KeySizeConstraint {
        self.constraint
    }

    pub fn random_source(&self) -> Option<&SharedRandom> {
        self.core.random_source()
    }
}

use crate::error::{KeyGenError, KeyGenResult};
use crate::key::GeneratedKey;
use crate::rng::SharedRandom;
use symkey_types::MIN_KEY_SIZE_BITS;

/// Shared key generation state for a single algorithm.
///
/// Holds the current key size and the randomness source. Construction
/// performs an implicit default initialization, so a fresh core can
/// generate keys straight away. Every `init*` call that succeeds replaces
/// both the size and the source; a failed call leaves them untouched.
#[derive(Debug)]
pub struct GeneratorCore {
    name: String,
    default_key_size_bits: u32,
    key_size_bits: u32,
    random: Option<SharedRandom>,
}

impl GeneratorCore {
    /// The default size is trusted and not checked against the minimum.
    pub fn new(name: impl Into<String>, default_key_size_bits: u32) -> Self {
        Self {
            name: name.into(),
            default_key_size_bits,
            key_size_bits: default_key_size_bits,
            random: None,
        }
    }

    /// Reset to the default key size. With `random == None` an OS source is
    /// created on the next `generate`.
    pub fn init(&mut self, random: Option<SharedRandom>) {
        self.key_size_bits = self.default_key_size_bits;
        self.random = random;
    }

    /// This generator family takes no algorithm parameters, so this always
    /// fails, whatever `params` holds.
    pub fn init_with_params<P: ?Sized>(
        &mut self,
        _params: Option<&P>,
        _random: Option<SharedRandom>,
    ) -> KeyGenResult<()> {
        tracing::debug!(algorithm = %self.name, "rejected parameter-based initialization");
        Err(KeyGenError::UnsupportedParameter {
            algorithm: self.name.clone(),
        })
    }

    /// Set an explicit key size, enforcing the general 40 bit minimum.
    pub fn init_with_size(
        &mut self,
        key_size_bits: u32,
        random: Option<SharedRandom>,
    ) -> KeyGenResult<()> {
        if key_size_bits < MIN_KEY_SIZE_BITS {
            tracing::debug!(
                algorithm = %self.name,
                requested_bits = key_size_bits,
                "rejected key size below minimum"
            );
            return Err(KeyGenError::invalid_key_size(
                &self.name,
                format!("Key length must be at least {MIN_KEY_SIZE_BITS} bits"),
            ));
        }
        self.key_size_bits = key_size_bits;
        self.random = random;
        Ok(())
    }

    /// Draw `ceil(key_size_bits / 8)` bytes and wrap them in a key.
    ///
    /// When the size is not a multiple of 8 the high bits of the last byte
    /// are left as drawn.
    pub fn generate(&mut self) -> KeyGenResult<GeneratedKey> {
        let name = &self.name;
        let random = self.random.get_or_insert_with(|| {
            tracing::trace!(algorithm = %name, "creating default OS randomness source");
            SharedRandom::os()
        });

        let mut key_bytes = vec![0u8; key_size_bytes(self.key_size_bits)];
        random.fill_bytes(&mut key_bytes)?;

        tracing::debug!(
            algorithm = %name,
            key_bits = self.key_size_bits,
            key_bytes = key_bytes.len(),
            "generated secret key"
        );
        Ok(GeneratedKey::new(name.as_str(), key_bytes))
    }

    pub fn algorithm(&self) -> &str {
        &self.name
    }

    pub fn default_key_size_bits(&self) -> u32 {
        self.default_key_size_bits
    }

    pub fn key_size_bits(&self) -> u32 {
        self.key_size_bits
    }

    /// The source the next `generate` will draw from, if one is set yet.
    pub fn random_source(&self) -> Option<&SharedRandom> {
        self.random.as_ref()
    }
}

fn key_size_bytes(bits: u32) -> usize {
    bits.div_ceil(8) as usize
}

//! Randomness sources consumed by the generator core.
//!
//! A generator never seeds or inspects its source; it only asks for bytes.
//! `OsRandom` is the default, backed by `getrandom::fill()`. Any
//! `rand_core` CSPRNG can be plugged in through `CryptoRngSource`, which is
//! what tests use to get reproducible key material.

use crate::error::{KeyGenError, KeyGenResult};
use rand_core::{CryptoRng, RngCore};
use std::fmt;
use std::sync::{Arc, Mutex};

/// A cryptographically secure source of random bytes.
pub trait RandomSource {
    /// Fill `dest` entirely with random bytes.
    fn fill_bytes(&mut self, dest: &mut [u8]) -> KeyGenResult<()>;

    /// Draw `len` fresh random bytes.
    fn generate(&mut self, len: usize) -> KeyGenResult<Vec<u8>> {
        let mut buf = vec![0u8; len];
        self.fill_bytes(&mut buf)?;
        Ok(buf)
    }
}

/// OS-backed CSPRNG. This is the source a generator creates when the caller
/// did not supply one.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsRandom;

impl RandomSource for OsRandom {
    fn fill_bytes(&mut self, dest: &mut [u8]) -> KeyGenResult<()> {
        getrandom::fill(dest).map_err(|e| KeyGenError::Rng(format!("OS entropy source: {e}")))
    }
}

/// Adapter exposing any `rand_core` CSPRNG as a [`RandomSource`].
#[derive(Debug, Clone)]
pub struct CryptoRngSource<R>(R);

impl<R: RngCore + CryptoRng> CryptoRngSource<R> {
    pub fn new(rng: R) -> Self {
        Self(rng)
    }

    pub fn into_inner(self) -> R {
        self.0
    }
}

impl<R: RngCore + CryptoRng> RandomSource for CryptoRngSource<R> {
    fn fill_bytes(&mut self, dest: &mut [u8]) -> KeyGenResult<()> {
        self.0
            .try_fill_bytes(dest)
            .map_err(|e| KeyGenError::Rng(e.to_string()))
    }
}

/// Shared handle to a randomness source.
///
/// Cloning the handle does not clone the source: every clone draws from the
/// same underlying generator, serialized by an internal lock.
#[derive(Clone)]
pub struct SharedRandom(Arc<Mutex<dyn RandomSource + Send>>);

impl SharedRandom {
    pub fn new<S: RandomSource + Send + 'static>(source: S) -> Self {
        Self(Arc::new(Mutex::new(source)))
    }

    /// A fresh handle over the OS CSPRNG.
    pub fn os() -> Self {
        Self::new(OsRandom)
    }

    pub fn fill_bytes(&self, dest: &mut [u8]) -> KeyGenResult<()> {
        let mut source = self
            .0
            .lock()
            .map_err(|_| KeyGenError::Rng("randomness source lock poisoned".into()))?;
        source.fill_bytes(dest)
    }

    /// Whether both handles refer to the same source instance.
    pub fn ptr_eq(&self, other: &SharedRandom) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for SharedRandom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SharedRandom")
            .field(&Arc::as_ptr(&self.0).cast::<()>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    struct Exhausted;

    impl RandomSource for Exhausted {
        fn fill_bytes(&mut self, _dest: &mut [u8]) -> KeyGenResult<()> {
            Err(KeyGenError::Rng("entropy exhausted".into()))
        }
    }

    struct Panicking;

    impl RandomSource for Panicking {
        fn fill_bytes(&mut self, _dest: &mut [u8]) -> KeyGenResult<()> {
            panic!("source blew up");
        }
    }

    #[test]
    fn os_random_fills_buffer() {
        let a = OsRandom.generate(32).unwrap();
        let b = OsRandom.generate(32).unwrap();
        assert_eq!(a.len(), 32);
        assert_ne!(a, b);
    }

    #[test]
    fn seeded_source_is_reproducible() {
        let mut a = CryptoRngSource::new(StdRng::seed_from_u64(7));
        let mut b = CryptoRngSource::new(StdRng::seed_from_u64(7));
        assert_eq!(a.generate(16).unwrap(), b.generate(16).unwrap());
    }

    #[test]
    fn clones_share_one_source() {
        let shared = SharedRandom::new(CryptoRngSource::new(StdRng::seed_from_u64(1)));
        let clone = shared.clone();
        assert!(shared.ptr_eq(&clone));
        assert!(!shared.ptr_eq(&SharedRandom::os()));

        let mut first = [0u8; 16];
        let mut second = [0u8; 16];
        shared.fill_bytes(&mut first).unwrap();
        clone.fill_bytes(&mut second).unwrap();

        let mut reference = CryptoRngSource::new(StdRng::seed_from_u64(1));
        assert_eq!(first.to_vec(), reference.generate(16).unwrap());
        assert_eq!(second.to_vec(), reference.generate(16).unwrap());
    }

    #[test]
    fn source_failure_propagates() {
        let shared = SharedRandom::new(Exhausted);
        let err = shared.fill_bytes(&mut [0u8; 8]).unwrap_err();
        assert!(matches!(err, KeyGenError::Rng(ref msg) if msg == "entropy exhausted"));
    }

    #[test]
    fn poisoned_lock_is_an_rng_error() {
        let shared = SharedRandom::new(Panicking);
        let worker = shared.clone();
        let joined = std::thread::spawn(move || worker.fill_bytes(&mut [0u8; 4])).join();
        assert!(joined.is_err());

        let err = shared.fill_bytes(&mut [0u8; 4]).unwrap_err();
        assert!(matches!(err, KeyGenError::Rng(_)));
    }
}

use serde::{Serialize, Serializer};
use std::fmt;
use zeroize::{Zeroize, Zeroizing};

/// Raw secret key material tagged with the algorithm it was generated for.
///
/// The key bytes are zeroized when dropped, never appear in `Debug` output,
/// and serialize as their length only, so just the algorithm and length can
/// leak through logs or JSON. There is no `Deserialize`: a key cannot be
/// rebuilt without its material.
#[derive(Clone, Serialize)]
pub struct GeneratedKey {
    algorithm: String,
    #[serde(rename = "length", serialize_with = "serialize_len")]
    key_bytes: Vec<u8>,
}

fn serialize_len<S: Serializer>(key_bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(key_bytes.len() as u64)
}

impl GeneratedKey {
    pub(crate) fn new(algorithm: impl Into<String>, key_bytes: Vec<u8>) -> Self {
        Self {
            algorithm: algorithm.into(),
            key_bytes,
        }
    }

    /// Algorithm name the key was generated for.
    pub fn algorithm(&self) -> &str {
        &self.algorithm
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.key_bytes
    }

    /// Length of the key material in bytes.
    pub fn len(&self) -> usize {
        self.key_bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.key_bytes.is_empty()
    }

    /// Take the key material out, leaving this value empty.
    pub fn into_bytes(mut self) -> Zeroizing<Vec<u8>> {
        Zeroizing::new(std::mem::take(&mut self.key_bytes))
    }
}

impl fmt::Debug for GeneratedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeneratedKey")
            .field("algorithm", &self.algorithm)
            .field("length", &self.key_bytes.len())
            .field("key_bytes", &"<redacted>")
            .finish()
    }
}

impl Drop for GeneratedKey {
    fn drop(&mut self) {
        self.key_bytes.zeroize();
    }
}

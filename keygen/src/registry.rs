use crate::config::RegistryConfig;
use crate::error::{KeyGenError, KeyGenResult};
use crate::generator::KeyGenerator;
use std::fmt;
use symkey_types::SecretKeyAlgorithm;

/// Zero-argument constructor for a fresh generator.
pub type GeneratorFactory = Box<dyn Fn() -> KeyGenerator + Send + Sync>;

/// Maps algorithm names to generator factories.
///
/// Names compare ASCII case-insensitively. Lookups hand out a new,
/// independent generator every time, so callers never share state through
/// the registry.
#[derive(Default)]
pub struct ProviderRegistry {
    entries: Vec<(String, GeneratorFactory)>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry serving the non-legacy catalogue in declaration order.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        for alg in RegistryConfig::default().algorithms {
            registry.insert_algorithm(alg);
        }
        registry
    }

    pub fn from_config(config: &RegistryConfig) -> KeyGenResult<Self> {
        config.validate()?;
        let mut registry = Self::new();
        for alg in &config.algorithms {
            registry.insert_algorithm(*alg);
        }
        tracing::debug!(algorithms = registry.len(), "built provider registry from config");
        Ok(registry)
    }

    /// Register `factory` under `name`. The generators it builds must tag
    /// their keys with `name` (ASCII case-insensitively).
    pub fn register<F>(&mut self, name: impl Into<String>, factory: F) -> KeyGenResult<()>
    where
        F: Fn() -> KeyGenerator + Send + Sync + 'static,
    {
        let name = name.into();
        if self.contains(&name) {
            return Err(KeyGenError::DuplicateAlgorithm(name));
        }
        let generator = factory();
        if !generator.algorithm().eq_ignore_ascii_case(&name) {
            return Err(KeyGenError::AlgorithmMismatch {
                registered: name,
                generated: generator.algorithm().to_string(),
            });
        }
        tracing::debug!(algorithm = %name, "registered key generator");
        self.entries.push((name, Box::new(factory)));
        Ok(())
    }

    pub fn register_algorithm(&mut self, algorithm: SecretKeyAlgorithm) -> KeyGenResult<()> {
        self.register(algorithm.name(), move || KeyGenerator::for_algorithm(algorithm))
    }

    /// A fresh generator for `name`.
    pub fn key_generator(&self, name: &str) -> KeyGenResult<KeyGenerator> {
        self.entries
            .iter()
            .find(|(registered, _)| registered.eq_ignore_ascii_case(name))
            .map(|(_, factory)| factory())
            .ok_or_else(|| KeyGenError::UnknownAlgorithm(name.to_string()))
    }

    /// Registered names, in registration order.
    pub fn algorithms(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries
            .iter()
            .any(|(registered, _)| registered.eq_ignore_ascii_case(name))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // Callers guarantee uniqueness (validated config or the built-in catalogue).
    fn insert_algorithm(&mut self, algorithm: SecretKeyAlgorithm) {
        self.entries.push((
            algorithm.name().to_string(),
            Box::new(move || KeyGenerator::for_algorithm(algorithm)),
        ));
    }
}

impl fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.algorithms()).finish()
    }
}

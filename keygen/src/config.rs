use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use symkey_types::SecretKeyAlgorithm;

/// Which algorithms a [`ProviderRegistry`](crate::ProviderRegistry) serves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Algorithms to register, in registration order.
    pub algorithms: Vec<SecretKeyAlgorithm>,
    /// Whether legacy ciphers (RC2, ARCFOUR) may be listed.
    pub allow_legacy: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            algorithms: SecretKeyAlgorithm::ALL
                .into_iter()
                .filter(|alg| !alg.is_legacy())
                .collect(),
            allow_legacy: false,
        }
    }
}

impl RegistryConfig {
    /// Every catalogue algorithm, legacy ciphers included.
    pub fn with_legacy() -> Self {
        Self {
            algorithms: SecretKeyAlgorithm::ALL.to_vec(),
            allow_legacy: true,
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate that the configuration is self-consistent.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.algorithms.is_empty() {
            return Err(ConfigError::NoAlgorithms);
        }

        let mut seen = HashSet::new();
        for alg in &self.algorithms {
            if alg.is_legacy() && !self.allow_legacy {
                return Err(ConfigError::LegacyNotAllowed(alg.name().into()));
            }
            if !seen.insert(*alg) {
                return Err(ConfigError::DuplicateAlgorithm(alg.name().into()));
            }
        }

        Ok(())
    }
}

/// Errors arising from registry configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("no algorithms specified")]
    NoAlgorithms,
    #[error("legacy algorithm {0} requires allow_legacy")]
    LegacyNotAllowed(String),
    #[error("algorithm listed twice: {0}")]
    DuplicateAlgorithm(String),
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let cfg = RegistryConfig::default();
        assert!(cfg.validate().is_ok());
        assert!(!cfg.allow_legacy);
        assert_eq!(cfg.algorithms[0], SecretKeyAlgorithm::ChaCha20);
        assert!(cfg.algorithms.iter().all(|alg| !alg.is_legacy()));
    }

    #[test]
    fn empty_algorithms_is_invalid() {
        let cfg = RegistryConfig {
            algorithms: vec![],
            ..RegistryConfig::default()
        };
        assert!(matches!(cfg.validate(), Err(ConfigError::NoAlgorithms)));
    }

    #[test]
    fn legacy_requires_opt_in() {
        let cfg = RegistryConfig {
            algorithms: vec![SecretKeyAlgorithm::HmacSha256, SecretKeyAlgorithm::Arcfour],
            allow_legacy: false,
        };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::LegacyNotAllowed(ref name)) if name == "ARCFOUR"
        ));
        assert!(RegistryConfig::with_legacy().validate().is_ok());
    }

    #[test]
    fn duplicates_are_invalid() {
        let cfg = RegistryConfig {
            algorithms: vec![SecretKeyAlgorithm::ChaCha20, SecretKeyAlgorithm::ChaCha20],
            allow_legacy: false,
        };
        assert!(matches!(cfg.validate(), Err(ConfigError::DuplicateAlgorithm(_))));
    }

    #[test]
    fn parses_json() {
        let cfg = RegistryConfig::from_json_str(
            r#"{ "algorithms": ["HmacSHA512", "RC2"], "allow_legacy": true }"#,
        )
        .unwrap();
        assert_eq!(
            cfg.algorithms,
            vec![SecretKeyAlgorithm::HmacSha512, SecretKeyAlgorithm::Rc2]
        );

        let cfg = RegistryConfig::from_json_str("{}").unwrap();
        assert_eq!(cfg, RegistryConfig::default());

        assert!(matches!(
            RegistryConfig::from_json_str("{ \"algorithms\": 3 }"),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            RegistryConfig::from_json_str(r#"{ "algorithms": ["RC2"] }"#),
            Err(ConfigError::LegacyNotAllowed(_))
        ));
    }

    #[test]
    fn accepts_the_names_the_registry_reports() {
        let registry = crate::ProviderRegistry::with_defaults();
        let names: Vec<&str> = registry.algorithms().collect();
        let json = serde_json::json!({ "algorithms": names }).to_string();
        assert_eq!(
            RegistryConfig::from_json_str(&json).unwrap(),
            RegistryConfig::default()
        );

        let cfg = RegistryConfig::from_json_str(
            r#"{ "algorithms": ["hmacsha256", "rc4"], "allow_legacy": true }"#,
        )
        .unwrap();
        assert_eq!(
            cfg.algorithms,
            vec![SecretKeyAlgorithm::HmacSha256, SecretKeyAlgorithm::Arcfour]
        );

        assert!(matches!(
            RegistryConfig::from_json_str(r#"{ "algorithms": ["AES"] }"#),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn serializes_canonical_names() {
        let json = serde_json::to_value(RegistryConfig::with_legacy()).unwrap();
        assert_eq!(json["algorithms"][0], "ChaCha20");
        assert_eq!(json["algorithms"][6], "ARCFOUR");
    }
}

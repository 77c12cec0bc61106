//! Configuration types for scoring and memoization.

use serde::{Deserialize, Serialize};

/// Default memo cache capacity in entries.
fn default_capacity() -> usize {
    1_000_000
}

/// Memoized-scorer configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Maximum number of cached canonical trees. Insertion past capacity
    /// evicts the least recently accessed entry.
    #[serde(default = "default_capacity")]
    pub capacity: usize,
    /// Offset for the parsimony bonus: the memoized scorer returns
    /// `base_count - active_fields(instance)` as its second objective.
    #[serde(default)]
    pub base_count: i64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: default_capacity(),
            base_count: 0,
        }
    }
}

impl CacheConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        Ok(())
    }
}

/// Occam-penalty configuration for likelihood-based scoring.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OccamConfig {
    /// Assumed variance of the Gaussian noise on the model's outputs.
    /// Non-positive values are accepted and make the likelihood term
    /// degrade to a zero contribution.
    pub variance: f64,
    /// Size of the program alphabet; the complexity penalty scales with
    /// its logarithm.
    pub alphabet_size: f64,
}

impl Default for OccamConfig {
    fn default() -> Self {
        Self {
            variance: 1.0,
            alphabet_size: 8.0,
        }
    }
}

impl OccamConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.variance.is_finite() {
            return Err(ConfigError::InvalidVariance);
        }
        if !self.alphabet_size.is_finite() || self.alphabet_size <= 1.0 {
            return Err(ConfigError::InvalidAlphabetSize);
        }
        Ok(())
    }
}

/// Configuration validation errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cache capacity must be non-zero")]
    ZeroCapacity,
    #[error("variance must be finite")]
    InvalidVariance,
    #[error("alphabet size must be finite and greater than 1")]
    InvalidAlphabetSize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        assert!(CacheConfig::default().validate().is_ok());
        assert!(OccamConfig::default().validate().is_ok());
        assert_eq!(CacheConfig::default().capacity, 1_000_000);
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let config = CacheConfig {
            capacity: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::ZeroCapacity)));
    }

    #[test]
    fn test_zero_variance_is_valid() {
        // variance = 0 is a defined fallback, not a config error
        let config = OccamConfig {
            variance: 0.0,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_bad_alphabet_rejected() {
        let config = OccamConfig {
            alphabet_size: 1.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidAlphabetSize)
        ));
    }

    #[test]
    fn test_serde_round_trip() {
        let config = CacheConfig {
            capacity: 4096,
            base_count: 12,
        };
        let json = serde_json::to_string(&config).unwrap();
        let back: CacheConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.capacity, 4096);
        assert_eq!(back.base_count, 12);

        // capacity falls back to the default when omitted
        let sparse: CacheConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(sparse.capacity, 1_000_000);
    }
}

use config::{Config, ConfigError, Environment};
use serde::Deserialize;

/// Default feature vector dimensionality (MFCC coefficients per frame).
pub const DEFAULT_DIM: usize = 20;

/// Default minimum evidence count for a match to be reported.
pub const DEFAULT_MIN_EVIDENCE: u32 = 2;

/// Engine configuration loaded from environment variables.
///
/// All settings can be configured via environment variables with the `TASTE_`
/// prefix, using double underscores for nested values:
/// - `TASTE_PROFILE__DIM` -> profile.dim
/// - `TASTE_MATCHING__MIN_EVIDENCE` -> matching.min_evidence
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    /// Profile and track vector configuration
    #[serde(default)]
    pub profile: ProfileConfig,

    /// Match ranking configuration
    #[serde(default)]
    pub matching: MatchingConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            profile: ProfileConfig::default(),
            matching: MatchingConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProfileConfig {
    /// Feature vector dimensionality, fixed for the whole deployment.
    /// Changing it invalidates every persisted track vector and profile.
    #[serde(default = "default_dim")]
    pub dim: usize,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self { dim: default_dim() }
    }
}

fn default_dim() -> usize {
    DEFAULT_DIM
}

#[derive(Debug, Clone, Deserialize)]
pub struct MatchingConfig {
    /// Minimum evidence count (tracks on the smaller side of a pair) for a
    /// match to be reported instead of excluded.
    #[serde(default = "default_min_evidence")]
    pub min_evidence: u32,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            min_evidence: default_min_evidence(),
        }
    }
}

fn default_min_evidence() -> u32 {
    DEFAULT_MIN_EVIDENCE
}

impl EngineConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("TASTE")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.profile.dim, 20);
        assert_eq!(config.matching.min_evidence, 2);
    }

    #[test]
    fn test_components_pick_up_config() {
        let config = EngineConfig::default();
        let normalizer = crate::normalizer::FrameNormalizer::from_config(&config);
        assert_eq!(normalizer.dim(), config.profile.dim);
    }
}

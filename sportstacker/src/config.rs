//! Engine configuration.

use crate::bracket::seeding::SeedPolicy;
use serde::{Deserialize, Serialize};

/// How new sessions are seeded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Draw policy used for the first draw and every reseed
    pub seed_policy: SeedPolicy,

    /// Token of the first draw (token policy only)
    pub initial_token: u64,
}

impl EngineConfig {
    /// Reproducible draws starting from `token`
    pub fn reproducible(token: u64) -> Self {
        Self {
            seed_policy: SeedPolicy::Token,
            initial_token: token,
        }
    }

    /// Fresh shuffle on every draw
    pub fn random() -> Self {
        Self {
            seed_policy: SeedPolicy::Random,
            initial_token: 0,
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::reproducible(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_reproducible() {
        let config = EngineConfig::default();
        assert_eq!(config.seed_policy, SeedPolicy::Token);
        assert_eq!(config.initial_token, 0);
    }

    #[test]
    fn test_config_deserializes_policy_names() {
        let config: EngineConfig =
            serde_json::from_str(r#"{"seed_policy": "random", "initial_token": 9}"#).unwrap();
        assert_eq!(config.seed_policy, SeedPolicy::Random);
        assert_eq!(config.initial_token, 9);
    }
}

//! Console configuration management.
//!
//! Consolidates all environment variable reads and provides validated configuration.

use sportstacker::{EngineConfig, SeedPolicy};
use std::path::PathBuf;

/// Complete console configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Roster export to load
    pub roster_path: PathBuf,
    /// Seeding configuration for new brackets
    pub engine: EngineConfig,
    /// Group to open first (first group in the roster if unset)
    pub group: Option<String>,
}

impl CliConfig {
    /// Load configuration from environment variables
    ///
    /// # Arguments
    ///
    /// * `roster_override` - Optional roster path (from CLI args)
    /// * `policy_override` - Optional seeding policy (from CLI args)
    /// * `token_override` - Optional reseed token (from CLI args)
    /// * `group_override` - Optional group key (from CLI args)
    ///
    /// # Errors
    ///
    /// Returns error if the roster path is missing or a variable is invalid
    pub fn from_env(
        roster_override: Option<PathBuf>,
        policy_override: Option<SeedPolicy>,
        token_override: Option<u64>,
        group_override: Option<String>,
    ) -> Result<Self, ConfigError> {
        let roster_path = roster_override
            .or_else(|| std::env::var("STACKER_ROSTER").ok().map(PathBuf::from))
            .ok_or_else(|| ConfigError::MissingRequired {
                var: "STACKER_ROSTER".to_string(),
                hint: "Pass --roster FILE or export the players list as JSON".to_string(),
            })?;

        let seed_policy = match policy_override {
            Some(policy) => policy,
            None => parse_env::<SeedPolicy>("STACKER_SEED_POLICY")?.unwrap_or_default(),
        };

        let initial_token = match token_override {
            Some(token) => token,
            None => parse_env::<u64>("STACKER_SEED_TOKEN")?.unwrap_or(0),
        };

        let group = group_override.or_else(|| std::env::var("STACKER_GROUP").ok());

        let config = CliConfig {
            roster_path,
            engine: EngineConfig {
                seed_policy,
                initial_token,
            },
            group,
        };
        config.validate()?;

        Ok(config)
    }

    /// Validate configuration after loading
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.roster_path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid {
                var: "STACKER_ROSTER".to_string(),
                reason: "Must not be empty".to_string(),
            });
        }

        if self.group.as_deref().is_some_and(|g| g.trim().is_empty()) {
            return Err(ConfigError::Invalid {
                var: "STACKER_GROUP".to_string(),
                reason: "Must not be blank".to_string(),
            });
        }

        Ok(())
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {var}\nHint: {hint}")]
    MissingRequired { var: String, hint: String },

    #[error("Invalid configuration for {var}: {reason}")]
    Invalid { var: String, reason: String },
}

/// Helper to parse an optional environment variable
///
/// Unset yields `None`; a value that does not parse is an error.
fn parse_env<T>(key: &str) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e: T::Err| ConfigError::Invalid {
                var: key.to_string(),
                reason: format!("{raw:?}: {e}"),
            }),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: [&str; 4] = [
        "STACKER_ROSTER",
        "STACKER_SEED_POLICY",
        "STACKER_SEED_TOKEN",
        "STACKER_GROUP",
    ];

    fn clear_env() {
        for var in VARS {
            // SAFETY: tests touching the environment run serially
            unsafe { std::env::remove_var(var) };
        }
    }

    fn set_env(key: &str, value: &str) {
        // SAFETY: tests touching the environment run serially
        unsafe { std::env::set_var(key, value) };
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::MissingRequired {
            var: "STACKER_ROSTER".to_string(),
            hint: "Pass --roster".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("STACKER_ROSTER"));
        assert!(msg.contains("Pass --roster"));
    }

    #[test]
    #[serial]
    fn test_missing_roster_is_error() {
        clear_env();
        let err = CliConfig::from_env(None, None, None, None).unwrap_err();
        assert!(matches!(err, ConfigError::MissingRequired { .. }));
    }

    #[test]
    #[serial]
    fn test_env_values_are_read() {
        clear_env();
        set_env("STACKER_ROSTER", "/tmp/players.json");
        set_env("STACKER_SEED_POLICY", "random");
        set_env("STACKER_SEED_TOKEN", "17");
        set_env("STACKER_GROUP", "Boys-Open-No Weight");

        let config = CliConfig::from_env(None, None, None, None).unwrap();
        assert_eq!(config.roster_path, PathBuf::from("/tmp/players.json"));
        assert_eq!(config.engine.seed_policy, SeedPolicy::Random);
        assert_eq!(config.engine.initial_token, 17);
        assert_eq!(config.group.as_deref(), Some("Boys-Open-No Weight"));
        clear_env();
    }

    #[test]
    #[serial]
    fn test_overrides_beat_env() {
        clear_env();
        set_env("STACKER_ROSTER", "/tmp/env.json");
        set_env("STACKER_SEED_POLICY", "random");
        set_env("STACKER_SEED_TOKEN", "17");

        let config = CliConfig::from_env(
            Some(PathBuf::from("cli.json")),
            Some(SeedPolicy::Token),
            Some(3),
            None,
        )
        .unwrap();
        assert_eq!(config.roster_path, PathBuf::from("cli.json"));
        assert_eq!(config.engine, EngineConfig::reproducible(3));
        clear_env();
    }

    #[test]
    #[serial]
    fn test_invalid_policy_is_error() {
        clear_env();
        set_env("STACKER_SEED_POLICY", "ranked");

        let err = CliConfig::from_env(Some(PathBuf::from("r.json")), None, None, None).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { ref var, .. } if var == "STACKER_SEED_POLICY"));
        clear_env();
    }

    #[test]
    #[serial]
    fn test_invalid_token_is_error() {
        clear_env();
        set_env("STACKER_SEED_TOKEN", "soon");

        let err = CliConfig::from_env(Some(PathBuf::from("r.json")), None, None, None).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { ref var, .. } if var == "STACKER_SEED_TOKEN"));

        // A flag value wins over a broken env value
        let config =
            CliConfig::from_env(Some(PathBuf::from("r.json")), None, Some(8), None).unwrap();
        assert_eq!(config.engine.initial_token, 8);
        clear_env();
    }

    #[test]
    #[serial]
    fn test_unset_token_defaults_to_zero() {
        clear_env();
        let config = CliConfig::from_env(Some(PathBuf::from("r.json")), None, None, None).unwrap();
        assert_eq!(config.engine, EngineConfig::default());
    }

    #[test]
    fn test_blank_group_is_invalid() {
        let config = CliConfig {
            roster_path: PathBuf::from("r.json"),
            engine: EngineConfig::default(),
            group: Some("  ".to_string()),
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid { .. })));
    }
}

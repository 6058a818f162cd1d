//! Platform Configuration
//!
//! Defaults match the deployed platform: a 1 ether registration fee, exact
//! fee matching for factory deployments, and the BasicCoin base hint.
//!
//! ```toml
//! [registry]
//! registration_fee = 1000000000000000000
//!
//! [manager]
//! fee_policy = "exact"
//! coin_base = 1000000
//!
//! [executor]
//! max_call_depth = 10
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use lib_tokens::DEFAULT_BASE;
use lib_types::{Amount, ETHER};

use crate::contracts::coin_manager::FeePolicy;
use crate::contracts::executor::DEFAULT_MAX_CALL_DEPTH;

/// Complete platform configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlatformConfig {
    pub registry: RegistryConfig,
    pub manager: ManagerConfig,
    pub executor: ExecutorConfig,
}

/// Settings applied to newly deployed registries
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Registration fee in base units
    pub registration_fee: u64,
}

impl RegistryConfig {
    pub fn fee(&self) -> Amount {
        Amount::from(self.registration_fee)
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            registration_fee: ETHER as u64,
        }
    }
}

/// Settings applied to newly deployed factories
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManagerConfig {
    pub fee_policy: FeePolicy,
    /// Base hint passed to the registry for every deployed coin
    pub coin_base: u64,
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            fee_policy: FeePolicy::Exact,
            coin_base: DEFAULT_BASE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutorConfig {
    pub max_call_depth: u32,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
        }
    }
}

/// Configuration validation error
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("manager.coin_base must be greater than zero")]
    ZeroCoinBase,

    #[error("executor.max_call_depth must be greater than zero")]
    ZeroCallDepth,
}

impl PlatformConfig {
    /// Parse a TOML document; missing sections fall back to defaults
    pub fn from_toml_str(input: &str) -> Result<Self> {
        let config: PlatformConfig = toml::from_str(input).context("Failed to parse platform config")?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML config file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = Self::from_toml_str(&contents)?;
        tracing::info!(
            "Loaded platform config from {}: fee={}, policy={}",
            path.display(),
            config.registry.registration_fee,
            config.manager.fee_policy
        );
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.manager.coin_base == 0 {
            return Err(ConfigError::ZeroCoinBase);
        }
        if self.executor.max_call_depth == 0 {
            return Err(ConfigError::ZeroCallDepth);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = PlatformConfig::default();
        assert_eq!(config.registry.fee(), ETHER);
        assert_eq!(config.manager.fee_policy, FeePolicy::Exact);
        assert_eq!(config.manager.coin_base, 1_000_000);
        assert_eq!(config.executor.max_call_depth, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = PlatformConfig::from_toml_str(
            r#"
            [manager]
            fee_policy = "at_least"
            "#,
        )
        .unwrap();

        assert_eq!(config.manager.fee_policy, FeePolicy::AtLeast);
        assert_eq!(config.manager.coin_base, 1_000_000);
        assert_eq!(config.registry.fee(), ETHER);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = PlatformConfig::from_toml_str("[manager]\ncoin_base = 0\n").unwrap_err();
        assert!(err.to_string().contains("coin_base"));

        let err = PlatformConfig::from_toml_str("[executor]\nmax_call_depth = 0\n").unwrap_err();
        assert!(err.to_string().contains("max_call_depth"));

        assert!(PlatformConfig::from_toml_str("[manager]\nfee_policy = \"sometimes\"\n").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[registry]\nregistration_fee = 2000000000000000000").unwrap();

        let config = PlatformConfig::load(file.path()).unwrap();
        assert_eq!(config.registry.fee(), 2 * ETHER);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = PlatformConfig::load(&dir.path().join("absent.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}

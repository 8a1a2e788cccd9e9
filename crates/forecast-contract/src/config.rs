//! Contract configuration.
//!
//! The authorization policy keys on two organization short-names: the
//! producer (may create forecasts) and the consumer (may acknowledge them).
//! Both default to the deployed trading pair and can be overridden through
//! the environment for other deployments.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default producer organization short-name.
pub const DEFAULT_PRODUCER_ORG: &str = "walmart";
/// Default consumer organization short-name.
pub const DEFAULT_CONSUMER_ORG: &str = "unilever";

/// Environment variable overriding the producer organization.
pub const ENV_PRODUCER_ORG: &str = "FORECAST_PRODUCER_ORG";
/// Environment variable overriding the consumer organization.
pub const ENV_CONSUMER_ORG: &str = "FORECAST_CONSUMER_ORG";

/// Errors raised while building or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An organization name is empty.
    #[error("{name} organization must not be empty (set {var})")]
    EmptyOrganization {
        /// Which role the organization plays.
        name: &'static str,
        /// The environment variable that configures it.
        var: &'static str,
    },

    /// Producer and consumer resolve to the same organization.
    #[error("producer and consumer organizations must differ (both are {org:?})")]
    IndistinctOrganizations {
        /// The duplicated organization name.
        org: String,
    },
}

/// Authorization policy configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractConfig {
    /// Organization allowed to create forecasts.
    pub producer_org: String,
    /// Organization allowed to acknowledge forecasts.
    pub consumer_org: String,
}

impl Default for ContractConfig {
    fn default() -> Self {
        Self {
            producer_org: DEFAULT_PRODUCER_ORG.to_string(),
            consumer_org: DEFAULT_CONSUMER_ORG.to_string(),
        }
    }
}

impl ContractConfig {
    /// Builds configuration from the environment, falling back to defaults.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when an override is empty or the two
    /// organizations collide.
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = Self {
            producer_org: env_or(ENV_PRODUCER_ORG, DEFAULT_PRODUCER_ORG),
            consumer_org: env_or(ENV_CONSUMER_ORG, DEFAULT_CONSUMER_ORG),
        };
        config.validate()?;
        Ok(config)
    }

    /// Validates the configured organization names.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when a name is empty or the producer and
    /// consumer are the same organization.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.producer_org.trim().is_empty() {
            return Err(ConfigError::EmptyOrganization {
                name: "producer",
                var: ENV_PRODUCER_ORG,
            });
        }
        if self.consumer_org.trim().is_empty() {
            return Err(ConfigError::EmptyOrganization {
                name: "consumer",
                var: ENV_CONSUMER_ORG,
            });
        }
        if self.producer_org == self.consumer_org {
            return Err(ConfigError::IndistinctOrganizations {
                org: self.producer_org.clone(),
            });
        }
        Ok(())
    }
}

fn env_or(var: &str, default: &str) -> String {
    std::env::var(var)
        .ok()
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_name_the_trading_pair() {
        let config = ContractConfig::default();
        assert_eq!(config.producer_org, "walmart");
        assert_eq!(config.consumer_org, "unilever");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn empty_organization_is_rejected() {
        let config = ContractConfig {
            producer_org: String::new(),
            consumer_org: "unilever".to_string(),
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::EmptyOrganization { name: "producer", .. })
        ));
    }

    #[test]
    fn identical_organizations_are_rejected() {
        let config = ContractConfig {
            producer_org: "acme".to_string(),
            consumer_org: "acme".to_string(),
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::IndistinctOrganizations { .. })
        ));
    }

    #[test]
    fn env_overrides_apply() {
        std::env::set_var(ENV_PRODUCER_ORG, "retailer");
        std::env::set_var(ENV_CONSUMER_ORG, "supplier");
        let config = ContractConfig::from_env().expect("config");
        assert_eq!(config.producer_org, "retailer");
        assert_eq!(config.consumer_org, "supplier");
        std::env::remove_var(ENV_PRODUCER_ORG);
        std::env::remove_var(ENV_CONSUMER_ORG);
    }
}

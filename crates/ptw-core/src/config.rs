//! Configuration types and loading
//!
//! Defaults first, then environment overrides.

use serde::{Deserialize, Serialize};

/// Main application configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct AppConfig {
    /// Lifecycle policy switches
    #[serde(default)]
    pub policy: LifecyclePolicy,

    /// Permit numbering
    #[serde(default)]
    pub permits: PermitConfig,
}

/// Product decisions the permit lifecycle leaves open
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct LifecyclePolicy {
    /// Reject approvals where the approver is also the requester
    pub forbid_self_approval: bool,
    /// Let the requester withdraw a pending permit
    pub allow_withdraw: bool,
}

impl Default for LifecyclePolicy {
    fn default() -> Self {
        Self {
            forbid_self_approval: false,
            allow_withdraw: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct PermitConfig {
    /// Prefix of generated permit ids ("PTW" gives PTW-001, PTW-002, ...)
    pub id_prefix: String,
}

impl Default for PermitConfig {
    fn default() -> Self {
        Self {
            id_prefix: "PTW".to_string(),
        }
    }
}

/// Configuration error
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(v) = lookup("PTW_FORBID_SELF_APPROVAL") {
            config.policy.forbid_self_approval = parse_bool("PTW_FORBID_SELF_APPROVAL", &v)?;
        }
        if let Some(v) = lookup("PTW_ALLOW_WITHDRAW") {
            config.policy.allow_withdraw = parse_bool("PTW_ALLOW_WITHDRAW", &v)?;
        }
        if let Some(prefix) = lookup("PTW_PERMIT_ID_PREFIX") {
            let prefix = prefix.trim();
            if prefix.is_empty() {
                return Err(ConfigError::InvalidValue {
                    key: "PTW_PERMIT_ID_PREFIX".to_string(),
                    message: "must not be empty".to_string(),
                });
            }
            config.permits.id_prefix = prefix.to_string();
        }

        Ok(config)
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        other => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            message: format!("expected a boolean, got {:?}", other),
        }),
    }
}

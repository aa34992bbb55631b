//! Configuration types for the routing pipeline.
//!
//! [`RouterConfig`] controls how payloads are interpreted at runtime. It is
//! cheap to clone and serializes cleanly from external configuration formats
//! such as JSON, TOML, or YAML.
//!
//! What is deliberately *not* configurable: the three partition key strings
//! and the allow/block decision tokens. Retention policies downstream are
//! bound to exact partition names, so those live as compile-time constants
//! next to [`assign_key`](crate::assign_key()) and [`classify`](crate::classify()),
//! the only places they may be derived.
//!
//! ```rust
//! use fwlog::RouterConfig;
//!
//! // Use defaults for development
//! let config = RouterConfig::default();
//!
//! // Validate at startup, before handling live traffic
//! config.validate().expect("invalid configuration");
//! assert_eq!(config.decision_field, "action");
//! ```
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Runtime configuration for the router.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RouterConfig {
    /// Semantic version of the router configuration.
    ///
    /// Increment when making breaking changes to routing behavior.
    ///
    /// Default: `1`
    pub version: u32,

    /// Name of the JSON field holding the firewall decision.
    ///
    /// Firewall decision events carry their verdict in a top-level field
    /// (`"action"` for the log source this router was built for). The lookup
    /// is by exact field name; the *value* comparison is case-insensitive.
    ///
    /// Default: `"action"`
    pub decision_field: String,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            version: 1,
            decision_field: "action".to_owned(),
        }
    }
}

impl RouterConfig {
    /// Validates the configuration.
    ///
    /// Intended to be called once at startup; a failure here is a deployment
    /// mistake, not a data problem.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::InvalidVersion`] if `version` is `0`
    /// - [`ConfigError::EmptyDecisionField`] if `decision_field` is empty or
    ///   whitespace-only
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.version == 0 {
            return Err(ConfigError::InvalidVersion);
        }
        if self.decision_field.trim().is_empty() {
            return Err(ConfigError::EmptyDecisionField);
        }
        Ok(())
    }
}

/// Errors that can occur when validating a [`RouterConfig`].
///
/// These are configuration-time issues and are intended to be surfaced during
/// service start-up rather than at request time.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    /// `version` must be at least 1.
    #[error("config version must be at least 1")]
    InvalidVersion,

    /// `decision_field` must name a JSON field.
    #[error("decision_field must not be empty or whitespace-only")]
    EmptyDecisionField,
}

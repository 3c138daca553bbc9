//! HTTP request execution configuration.
//!
//! The subset of [`RestClientConfig`] a transport needs, so transports don't
//! depend on the preview and history settings.

use crate::config::{get_config, RestClientConfig};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for HTTP request execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionConfig {
    /// Request timeout in milliseconds.
    pub timeout_ms: u64,

    /// Whether redirects are followed.
    pub follow_redirects: bool,

    /// Maximum number of redirects to follow when `follow_redirects` is set.
    pub max_redirects: u32,
}

impl ExecutionConfig {
    /// Creates a new ExecutionConfig with the given timeout and redirect policy.
    pub fn new(timeout_ms: u64, follow_redirects: bool, max_redirects: u32) -> Self {
        Self {
            timeout_ms,
            follow_redirects,
            max_redirects,
        }
    }

    /// Returns the timeout as a `std::time::Duration`.
    pub fn timeout_duration(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Creates an ExecutionConfig from the global configuration.
    pub fn from_global_config() -> Self {
        Self::from(&get_config())
    }
}

impl From<&RestClientConfig> for ExecutionConfig {
    fn from(config: &RestClientConfig) -> Self {
        Self {
            timeout_ms: config.timeout_in_milliseconds,
            follow_redirects: config.follow_redirects,
            max_redirects: config.max_redirects,
        }
    }
}

impl Default for ExecutionConfig {
    /// Reads the execution settings from the global configuration.
    fn default() -> Self {
        Self::from_global_config()
    }
}

//! Configuration schema for the request runner.
//!
//! This module defines the configuration structure and validation logic for all
//! user-configurable settings.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Main configuration structure.
///
/// All settings live under the "rest-client" key of the settings JSON.
/// Missing settings fall back to sensible defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestClientConfig {
    /// Request timeout in milliseconds.
    ///
    /// Maximum time to wait for a complete response. Also quoted back to the
    /// user when a request times out. Defaults to 30000ms.
    ///
    /// Must be greater than 0.
    #[serde(default = "default_timeout")]
    pub timeout_in_milliseconds: u64,

    /// Whether to automatically follow HTTP redirects. Defaults to true.
    #[serde(default = "default_follow_redirects")]
    pub follow_redirects: bool,

    /// Maximum number of redirects to follow. Defaults to 10.
    #[serde(default = "default_max_redirects")]
    pub max_redirects: u32,

    /// Where responses are previewed relative to the request document.
    ///
    /// Valid values: "current", "beside". Defaults to "beside".
    #[serde(default = "default_preview_column")]
    pub preview_column: PreviewColumn,

    /// Show responses as plain untitled text documents instead of panels.
    ///
    /// Defaults to false.
    #[serde(default = "default_preview_in_untitled_document")]
    pub preview_response_in_untitled_document: bool,

    /// Maximum number of requests kept in history. Defaults to 50.
    ///
    /// Must be > 0.
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,

    /// Headers added to every request that doesn't define them itself.
    #[serde(default = "default_headers")]
    pub default_headers: HashMap<String, String>,
}

/// Column used for the response preview.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PreviewColumn {
    /// Same column as the request document.
    Current,
    /// The column right of the request document.
    Beside,
}

impl Default for RestClientConfig {
    fn default() -> Self {
        Self {
            timeout_in_milliseconds: default_timeout(),
            follow_redirects: default_follow_redirects(),
            max_redirects: default_max_redirects(),
            preview_column: default_preview_column(),
            preview_response_in_untitled_document: default_preview_in_untitled_document(),
            history_limit: default_history_limit(),
            default_headers: default_headers(),
        }
    }
}

impl RestClientConfig {
    /// Validates the configuration.
    ///
    /// # Returns
    ///
    /// `Ok(())` if all settings are valid, or `Err` with a descriptive error message.
    pub fn validate(&self) -> Result<(), String> {
        if self.timeout_in_milliseconds == 0 {
            return Err("timeoutInMilliseconds must be greater than 0".to_string());
        }

        if self.history_limit == 0 {
            return Err("historyLimit must be greater than 0".to_string());
        }

        Ok(())
    }

    /// Returns the timeout as a `std::time::Duration`.
    pub fn timeout_duration(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.timeout_in_milliseconds)
    }

    /// Merges this configuration with another, using values from `other`.
    ///
    /// Default headers are merged key by key so a user can add a header
    /// without losing the built-in `User-Agent`.
    pub fn merge(&self, other: &RestClientConfig) -> Self {
        let mut default_headers = self.default_headers.clone();
        default_headers.extend(other.default_headers.clone());

        Self {
            timeout_in_milliseconds: other.timeout_in_milliseconds,
            follow_redirects: other.follow_redirects,
            max_redirects: other.max_redirects,
            preview_column: other.preview_column,
            preview_response_in_untitled_document: other.preview_response_in_untitled_document,
            history_limit: other.history_limit,
            default_headers,
        }
    }
}

// Default value functions for serde

fn default_timeout() -> u64 {
    30000
}

fn default_follow_redirects() -> bool {
    true
}

fn default_max_redirects() -> u32 {
    10
}

fn default_preview_column() -> PreviewColumn {
    PreviewColumn::Beside
}

fn default_preview_in_untitled_document() -> bool {
    false
}

fn default_history_limit() -> usize {
    50
}

fn default_headers() -> HashMap<String, String> {
    let mut headers = HashMap::new();
    headers.insert(
        "User-Agent".to_string(),
        format!("rest-runner/{}", env!("CARGO_PKG_VERSION")),
    );
    headers
}

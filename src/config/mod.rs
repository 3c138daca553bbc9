//! Configuration management.
//!
//! This module provides configuration loading, validation, and access through a singleton pattern.
//! Configuration is read from the "rest-client" key of a settings JSON value and merged with
//! defaults. [`RequestController::new`](crate::controller::RequestController::new) snapshots the
//! global configuration; pass one explicitly with `with_config` to bypass it.

pub mod schema;

pub use schema::{PreviewColumn, RestClientConfig};

use once_cell::sync::Lazy;
use serde_json::Value;
use std::sync::RwLock;

/// Global configuration instance.
///
/// This is lazily initialized on first access and can be updated when settings change.
static CONFIG: Lazy<RwLock<RestClientConfig>> =
    Lazy::new(|| RwLock::new(RestClientConfig::default()));

/// Loads configuration from a settings JSON value.
///
/// Reads the "rest-client" settings, merges them with defaults, validates the
/// result, and updates the global configuration. Settings that fail to
/// deserialize are ignored with a warning.
///
/// # Arguments
///
/// * `settings_json` - Optional JSON value containing user settings under "rest-client" key
///
/// # Returns
///
/// `Ok(RestClientConfig)` with the loaded configuration, or `Err` if validation
/// fails. On error the global configuration is left untouched.
///
/// # Example
///
/// ```no_run
/// use rest_runner::config::load_config;
/// use serde_json::json;
///
/// let settings = json!({
///     "rest-client": {
///         "timeoutInMilliseconds": 60000,
///         "previewColumn": "current"
///     }
/// });
///
/// let config = load_config(Some(settings)).unwrap();
/// assert_eq!(config.timeout_in_milliseconds, 60000);
/// ```
pub fn load_config(settings_json: Option<Value>) -> Result<RestClientConfig, String> {
    let mut config = RestClientConfig::default();

    if let Some(rest_client_settings) = settings_json.as_ref().and_then(|s| s.get("rest-client")) {
        match serde_json::from_value::<RestClientConfig>(rest_client_settings.clone()) {
            Ok(user_config) => {
                config = config.merge(&user_config);
            }
            Err(e) => {
                log::warn!(
                    "Failed to parse rest-client settings: {}. Using defaults.",
                    e
                );
            }
        }
    }

    if let Err(e) = config.validate() {
        log::warn!("Invalid configuration: {}. Keeping previous settings.", e);
        return Err(format!("Invalid configuration: {}", e));
    }

    if let Ok(mut global_config) = CONFIG.write() {
        *global_config = config.clone();
    }

    Ok(config)
}

/// Gets the current global configuration.
///
/// Returns a clone; if configuration has not been loaded yet this is the default
/// configuration.
pub fn get_config() -> RestClientConfig {
    CONFIG
        .read()
        .map(|c| c.clone())
        .unwrap_or_else(|_| RestClientConfig::default())
}

/// Updates the global configuration in place.
///
/// If the update leaves the configuration invalid it is reset to defaults.
///
/// # Example
///
/// ```no_run
/// use rest_runner::config::update_config;
///
/// update_config(|config| {
///     config.history_limit = 200;
/// });
/// ```
pub fn update_config<F>(updater: F)
where
    F: FnOnce(&mut RestClientConfig),
{
    if let Ok(mut config) = CONFIG.write() {
        updater(&mut config);

        if let Err(e) = config.validate() {
            log::warn!("Configuration validation failed after update: {}", e);
            *config = RestClientConfig::default();
        }
    }
}

/// Resets the configuration to defaults.
pub fn reset_config() {
    if let Ok(mut config) = CONFIG.write() {
        *config = RestClientConfig::default();
    }
}

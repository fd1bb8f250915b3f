// SPDX-FileCopyrightText: 2026 Yannt Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde attributes,
//! such as the shape of the discovery group and known log levels.

use crate::diagnostic::ConfigError;
use crate::model::YanntConfig;

/// Log levels accepted by `log.level`.
pub const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error", "off"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &YanntConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    let level = config.log.level.trim().to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "log.level `{}` is not one of: {}",
                config.log.level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    let group = &config.plugins.discovery_group;
    if group.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "plugins.discovery_group must not be empty".to_string(),
        });
    } else if group.chars().any(char::is_whitespace) {
        errors.push(ConfigError::Validation {
            message: format!("plugins.discovery_group `{group}` must not contain whitespace"),
        });
    }

    for (i, path) in config.plugins.search_paths.iter().enumerate() {
        if path.trim().is_empty() {
            errors.push(ConfigError::Validation {
                message: format!("plugins.search_paths[{i}] must not be empty"),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

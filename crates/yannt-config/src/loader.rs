// SPDX-FileCopyrightText: 2026 Yannt Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./yannt.toml` > `~/.config/yannt/yannt.toml` > `/etc/yannt/yannt.toml`
//! with environment variable overrides via `YANNT_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::YanntConfig;

/// System-wide config file.
pub const SYSTEM_CONFIG: &str = "/etc/yannt/yannt.toml";

/// Config file looked up in the working directory.
pub const LOCAL_CONFIG: &str = "yannt.toml";

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/yannt/yannt.toml` (system-wide)
/// 3. `~/.config/yannt/yannt.toml` (user XDG config)
/// 4. `./yannt.toml` (local directory)
/// 5. `YANNT_*` environment variables
pub fn load_config() -> Result<YanntConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env vars).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<YanntConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(YanntConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<YanntConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(YanntConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used internally for config loading.
///
/// Returns the Figment before extraction so callers can inspect metadata.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(YanntConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG))
        .merge(Toml::file(user_config_path().unwrap_or_default()))
        .merge(Toml::file(LOCAL_CONFIG))
        .merge(env_provider())
}

/// Path of the per-user config file, if the platform has a config directory.
pub fn user_config_path() -> Option<std::path::PathBuf> {
    dirs::config_dir().map(|d| d.join("yannt/yannt.toml"))
}

/// Create the environment variable provider using explicit `map()` for section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` because key names contain
/// underscores: `YANNT_PLUGINS_DISCOVERY_GROUP` must map to
/// `plugins.discovery_group`, not `plugins.discovery.group`.
fn env_provider() -> Env {
    Env::prefixed("YANNT_").map(|key| {
        let mapped = key
            .as_str()
            .replacen("log_", "log.", 1)
            .replacen("plugins_", "plugins.", 1);
        mapped.into()
    })
}

// SPDX-FileCopyrightText: 2026 Yannt Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for yannt.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use yannt_core::DEFAULT_DISCOVERY_GROUP;

/// Top-level yannt configuration.
///
/// Loaded from TOML files following the XDG hierarchy, with environment variable overrides.
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct YanntConfig {
    /// Diagnostic logging settings.
    #[serde(default)]
    pub log: LogConfig,

    /// Plugin discovery settings.
    #[serde(default)]
    pub plugins: PluginsConfig,
}

/// Diagnostic logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LogConfig {
    /// Logging level (trace, debug, info, warn, error, off).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

/// Plugin discovery configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PluginsConfig {
    /// Discovery group under which packages advertise commands.
    #[serde(default = "default_discovery_group")]
    pub discovery_group: String,

    /// Extra package directories, scanned before the defaults. `~/` is expanded.
    #[serde(default)]
    pub search_paths: Vec<String>,

    /// Also scan the per-user and system-wide plugin directories.
    #[serde(default = "default_true")]
    pub include_default_paths: bool,
}

impl Default for PluginsConfig {
    fn default() -> Self {
        Self {
            discovery_group: default_discovery_group(),
            search_paths: Vec::new(),
            include_default_paths: true,
        }
    }
}

impl PluginsConfig {
    /// Directories to scan for installed packages, in priority order.
    ///
    /// Configured paths come first, then `<data_dir>/yannt/plugins`,
    /// `/usr/local/share/yannt/plugins` and `/usr/share/yannt/plugins`.
    pub fn resolved_search_paths(&self) -> Vec<PathBuf> {
        let mut paths: Vec<PathBuf> = self.search_paths.iter().map(|p| expand_home(p)).collect();

        if self.include_default_paths {
            if let Some(data_dir) = dirs::data_dir() {
                paths.push(data_dir.join("yannt/plugins"));
            }
            paths.push(PathBuf::from("/usr/local/share/yannt/plugins"));
            paths.push(PathBuf::from("/usr/share/yannt/plugins"));
        }

        paths
    }
}

fn default_discovery_group() -> String {
    DEFAULT_DISCOVERY_GROUP.to_string()
}

fn default_true() -> bool {
    true
}

fn expand_home(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}

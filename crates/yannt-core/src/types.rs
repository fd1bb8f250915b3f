// SPDX-FileCopyrightText: 2026 Yannt Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared by the plugin loader and the binaries.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::YanntError;

/// Discovery group under which packages advertise yannt subcommands.
pub const DEFAULT_DISCOVERY_GROUP: &str = "yannt.commands";

/// Which metadata file a descriptor was read from.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum MetadataFormat {
    /// `yannt-plugin.toml` with an `[entry-points."<group>"]` table.
    Manifest,
    /// Legacy INI-style `entry_points.txt`.
    Legacy,
    /// Descriptor constructed in code (tests, embedders).
    InMemory,
}

/// An unresolved plugin declaration: a named entry under a discovery group.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PluginDescriptor {
    /// Discovery group the entry was declared under.
    pub group: String,
    /// Command name the entry registers.
    pub name: String,
    /// Loadable reference, e.g. `bin/yannt-weather` or `yannt-weather`.
    pub target: String,
    /// Name of the declaring package, when known.
    pub package: Option<String>,
    /// Directory holding the declaring package's metadata, used to resolve relative targets.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_dir: Option<PathBuf>,
    /// Metadata format the entry came from.
    pub format: MetadataFormat,
    /// Oldest yannt release the declaring package works with.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_yannt_version: Option<semver::Version>,
}

impl PluginDescriptor {
    /// Build an in-memory descriptor with no declaring package.
    pub fn new(group: impl Into<String>, name: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            name: name.into(),
            target: target.into(),
            package: None,
            base_dir: None,
            format: MetadataFormat::InMemory,
            min_yannt_version: None,
        }
    }

    /// Fail if the declaring package requires a newer yannt than `running`.
    pub fn check_compatible(&self, running: &semver::Version) -> Result<(), YanntError> {
        match &self.min_yannt_version {
            Some(min) if min > running => Err(YanntError::PluginLoad {
                name: self.name.clone(),
                target: self.target.clone(),
                reason: format!(
                    "package {} requires yannt >= {min}, running {running}",
                    self.package.as_deref().unwrap_or("<unknown>")
                ),
            }),
            _ => Ok(()),
        }
    }
}

// SPDX-FileCopyrightText: 2026 Yannt Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plugin loader: discovery, resolution, and registration in one pass.

use yannt_core::YanntError;

use crate::registry::CommandRegistry;
use crate::resolver::ResolveRegistrar;
use crate::source::{PluginSource, normalize};

/// Feeds registrars discovered through a `PluginSource` into a `CommandRegistry`.
pub struct PluginLoader<S, R> {
    source: S,
    resolver: R,
    running_version: Option<semver::Version>,
}

impl<S: PluginSource, R: ResolveRegistrar> PluginLoader<S, R> {
    /// Create a loader over `source`, resolving descriptors with `resolver`.
    ///
    /// Plugins are checked against this crate's version unless
    /// [`with_running_version`](Self::with_running_version) says otherwise.
    pub fn new(source: S, resolver: R) -> Self {
        Self {
            source,
            resolver,
            running_version: None,
        }
    }

    /// Check plugins' `min_yannt_version` against `version`.
    pub fn with_running_version(mut self, version: semver::Version) -> Self {
        self.running_version = Some(version);
        self
    }

    fn running_version(&self) -> Result<semver::Version, YanntError> {
        match &self.running_version {
            Some(version) => Ok(version.clone()),
            None => semver::Version::parse(env!("CARGO_PKG_VERSION"))
                .map_err(|e| YanntError::Internal(format!("invalid crate version: {e}"))),
        }
    }

    /// Register every plugin advertised under `group`.
    ///
    /// Incompatible packages, resolution failures and registration failures
    /// abort the load; a broken plugin is never skipped. Packages that only
    /// advertise other groups are never checked. Returns the number of descriptors registered
    /// (identical re-registrations included).
    pub fn load_external_plugins(
        &mut self,
        registry: &mut CommandRegistry,
        group: &str,
    ) -> Result<usize, YanntError> {
        let descriptors = normalize(self.source.entry_points(group)?, group);
        if descriptors.is_empty() {
            tracing::debug!(group, "no external plugins found");
            return Ok(0);
        }

        let running = self.running_version()?;
        for descriptor in &descriptors {
            descriptor.check_compatible(&running)?;
            let registrar = self.resolver.resolve(descriptor)?;
            registry.register(descriptor.name.clone(), registrar)?;
            tracing::info!(
                command = %descriptor.name,
                target = %descriptor.target,
                package = descriptor.package.as_deref().unwrap_or("-"),
                "plugin loaded"
            );
        }

        Ok(descriptors.len())
    }
}

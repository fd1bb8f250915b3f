// SPDX-FileCopyrightText: 2026 Yannt Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Command registry, plugin discovery, and the plugin loader.
//!
//! Commands reach the CLI through a registry pattern: built-in code and the
//! plugin loader register named registrars, and the orchestrator drains the
//! registry into the root parser. External commands are advertised by
//! installed packages under a discovery group and resolved to executables.

pub mod loader;
pub mod metadata;
pub mod registry;
pub mod resolver;
pub mod source;

pub use loader::PluginLoader;
pub use metadata::{PackageMetadata, parse_legacy_entry_points, parse_package_manifest};
pub use registry::{CommandRegistry, RegistryEntry};
pub use resolver::{ExecutableResolver, ExternalCommand, ResolveRegistrar};
pub use source::{
    EntryPointListing, InstalledPackages, MemorySource, PluginSource, list_descriptors, normalize,
};

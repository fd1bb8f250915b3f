// SPDX-FileCopyrightText: 2026 Yannt Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plugin descriptor sources.
//!
//! A `PluginSource` answers one question: which entry points exist for a
//! discovery group. Sources may answer in either of two listing shapes; the
//! loader flattens both through [`normalize`].

use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

use yannt_core::{PluginDescriptor, YanntError};

use crate::metadata;

/// The raw answer of a `PluginSource`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryPointListing {
    /// Entries already filtered to the requested group.
    Selected(Vec<PluginDescriptor>),
    /// Entries of every group the source knows about, keyed by group.
    Grouped(BTreeMap<String, Vec<PluginDescriptor>>),
}

/// Lists plugin descriptors advertised under a discovery group.
pub trait PluginSource {
    /// Return the entry points for `group`, in whichever shape the source produces.
    fn entry_points(&self, group: &str) -> Result<EntryPointListing, YanntError>;
}

impl<S: PluginSource + ?Sized> PluginSource for &S {
    fn entry_points(&self, group: &str) -> Result<EntryPointListing, YanntError> {
        (**self).entry_points(group)
    }
}

/// Flatten a listing into the descriptors of `group`.
///
/// Order is preserved. A descriptor repeated with the same group, name,
/// target and package directory is kept once. Relative targets of different
/// packages name different executables, so they are all kept and collide at
/// registration.
pub fn normalize(listing: EntryPointListing, group: &str) -> Vec<PluginDescriptor> {
    let candidates = match listing {
        EntryPointListing::Selected(descriptors) => descriptors,
        EntryPointListing::Grouped(mut groups) => groups.remove(group).unwrap_or_default(),
    };

    let mut seen = HashSet::new();
    let mut descriptors = Vec::with_capacity(candidates.len());
    for descriptor in candidates {
        if descriptor.group != group {
            continue;
        }
        let key = (
            descriptor.group.clone(),
            descriptor.name.clone(),
            descriptor.target.clone(),
            descriptor.base_dir.clone(),
        );
        if seen.insert(key) {
            descriptors.push(descriptor);
        } else {
            tracing::debug!(
                group,
                name = %descriptor.name,
                target = %descriptor.target,
                "dropping repeated entry point"
            );
        }
    }
    descriptors
}

/// List the normalized descriptors of `group` without resolving them.
pub fn list_descriptors(
    source: &dyn PluginSource,
    group: &str,
) -> Result<Vec<PluginDescriptor>, YanntError> {
    Ok(normalize(source.entry_points(group)?, group))
}

/// In-memory source serving a fixed listing.
#[derive(Debug, Clone)]
pub struct MemorySource {
    listing: EntryPointListing,
}

impl MemorySource {
    /// A source with no entry points at all.
    pub fn empty() -> Self {
        Self::selected(Vec::new())
    }

    /// A source answering in the filtered shape.
    ///
    /// The list is returned as-is, so entries of other groups are still
    /// dropped by normalization.
    pub fn selected(descriptors: Vec<PluginDescriptor>) -> Self {
        Self {
            listing: EntryPointListing::Selected(descriptors),
        }
    }

    /// A source answering with every group, keyed by the descriptors' groups.
    pub fn grouped(descriptors: Vec<PluginDescriptor>) -> Self {
        let mut groups: BTreeMap<String, Vec<PluginDescriptor>> = BTreeMap::new();
        for descriptor in descriptors {
            groups
                .entry(descriptor.group.clone())
                .or_default()
                .push(descriptor);
        }
        Self {
            listing: EntryPointListing::Grouped(groups),
        }
    }
}

impl PluginSource for MemorySource {
    fn entry_points(&self, group: &str) -> Result<EntryPointListing, YanntError> {
        Ok(match &self.listing {
            EntryPointListing::Selected(descriptors) => EntryPointListing::Selected(
                descriptors
                    .iter()
                    .filter(|d| d.group == group)
                    .cloned()
                    .collect(),
            ),
            grouped => grouped.clone(),
        })
    }
}

/// Packages installed as directories under one or more search paths.
///
/// Each immediate subdirectory of a search path is a package carrying a
/// `yannt-plugin.toml` or a legacy `entry_points.txt`. Missing search paths
/// are skipped; malformed metadata is an error. Version requirements are
/// left on the descriptors for the loader to check.
#[derive(Debug, Clone)]
pub struct InstalledPackages {
    search_paths: Vec<PathBuf>,
}

impl InstalledPackages {
    /// Scan `search_paths` in order.
    pub fn new(search_paths: Vec<PathBuf>) -> Self {
        Self { search_paths }
    }

    /// Directories this source scans, in order.
    pub fn search_paths(&self) -> &[PathBuf] {
        &self.search_paths
    }

    fn package_dirs(root: &Path) -> Result<Vec<PathBuf>, YanntError> {
        let read_dir = match std::fs::read_dir(root) {
            Ok(read_dir) => read_dir,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %root.display(), "plugin search path does not exist");
                return Ok(Vec::new());
            }
            Err(e) => {
                return Err(YanntError::io(
                    format!("failed to list plugin directory {}", root.display()),
                    e,
                ));
            }
        };

        let mut dirs = Vec::new();
        for entry in read_dir {
            let entry = entry.map_err(|e| {
                YanntError::io(format!("failed to list plugin directory {}", root.display()), e)
            })?;
            let path = entry.path();
            if path.is_dir() {
                dirs.push(path);
            }
        }
        dirs.sort();
        Ok(dirs)
    }
}

impl PluginSource for InstalledPackages {
    fn entry_points(&self, _group: &str) -> Result<EntryPointListing, YanntError> {
        let mut groups: BTreeMap<String, Vec<PluginDescriptor>> = BTreeMap::new();

        for root in &self.search_paths {
            for package_dir in Self::package_dirs(root)? {
                let Some(meta) = metadata::read_package_dir(&package_dir)? else {
                    tracing::warn!(
                        path = %package_dir.display(),
                        "skipping plugin directory without package metadata"
                    );
                    continue;
                };

                for (group, descriptors) in meta.grouped_descriptors(&package_dir) {
                    groups.entry(group).or_default().extend(descriptors);
                }
            }
        }

        Ok(EntryPointListing::Grouped(groups))
    }
}

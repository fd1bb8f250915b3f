// SPDX-FileCopyrightText: 2026 Yannt Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Installed package metadata parsing.
//!
//! A plugin package describes its entry points in one of two files:
//! - `yannt-plugin.toml`, the current format, with a `[package]` section and
//!   `[entry-points."<group>"]` tables;
//! - `entry_points.txt`, the legacy INI format with `[group]` headers and
//!   `name = target` lines.
//!
//! Both parse into the same `PackageMetadata`.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use yannt_core::{MetadataFormat, PluginDescriptor, YanntError};

/// File name of the current metadata format.
pub const MANIFEST_FILE: &str = "yannt-plugin.toml";

/// File name of the legacy metadata format.
pub const LEGACY_FILE: &str = "entry_points.txt";

/// Parsed metadata of one installed package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageMetadata {
    /// Package name.
    pub name: String,
    /// Package version, when the format records one.
    pub version: Option<semver::Version>,
    /// Human-readable description, when the format records one.
    pub description: Option<String>,
    /// Oldest yannt release the package works with.
    pub min_yannt_version: Option<semver::Version>,
    /// Entry points keyed by group, each a list of `(name, target)` pairs.
    pub entry_points: BTreeMap<String, Vec<(String, String)>>,
    /// Which file the metadata came from.
    pub format: MetadataFormat,
}

impl PackageMetadata {
    /// Descriptors for every group, with relative targets anchored at `base_dir`.
    ///
    /// Each descriptor carries the package's `min_yannt_version`; the loader
    /// checks it, so listing never fails on an incompatible package.
    pub fn grouped_descriptors(&self, base_dir: &Path) -> BTreeMap<String, Vec<PluginDescriptor>> {
        self.entry_points
            .iter()
            .map(|(group, entries)| {
                let descriptors = entries
                    .iter()
                    .map(|(name, target)| PluginDescriptor {
                        group: group.clone(),
                        name: name.clone(),
                        target: target.clone(),
                        package: Some(self.name.clone()),
                        base_dir: Some(base_dir.to_path_buf()),
                        format: self.format,
                        min_yannt_version: self.min_yannt_version.clone(),
                    })
                    .collect();
                (group.clone(), descriptors)
            })
            .collect()
    }
}

/// Intermediate TOML deserialization struct for `yannt-plugin.toml`.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ManifestFile {
    package: PackageSection,
    #[serde(default, rename = "entry-points")]
    entry_points: BTreeMap<String, BTreeMap<String, String>>,
}

/// The `[package]` section of a `yannt-plugin.toml` file.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PackageSection {
    name: String,
    version: String,
    #[serde(default)]
    description: Option<String>,
    min_yannt_version: Option<String>,
}

/// Parse a `yannt-plugin.toml` manifest.
///
/// Validates that name and version are non-empty, that versions are valid
/// semver, and that every entry has a non-empty name and target.
pub fn parse_package_manifest(
    toml_content: &str,
    path: &Path,
) -> Result<PackageMetadata, YanntError> {
    let invalid = |message: String| YanntError::Metadata {
        path: path.to_path_buf(),
        message,
    };

    let file: ManifestFile =
        toml::from_str(toml_content).map_err(|e| invalid(format!("invalid manifest: {e}")))?;
    let section = file.package;

    if section.name.trim().is_empty() {
        return Err(invalid("package name must not be empty".to_string()));
    }
    if section.version.trim().is_empty() {
        return Err(invalid("package version must not be empty".to_string()));
    }

    let version = semver::Version::parse(&section.version)
        .map_err(|e| invalid(format!("invalid version `{}`: {e}", section.version)))?;
    let min_yannt_version = section
        .min_yannt_version
        .map(|v| {
            semver::Version::parse(&v)
                .map_err(|e| invalid(format!("invalid min_yannt_version `{v}`: {e}")))
        })
        .transpose()?;

    let mut entry_points = BTreeMap::new();
    for (group, entries) in file.entry_points {
        let mut pairs = Vec::with_capacity(entries.len());
        for (name, target) in entries {
            validate_entry(&group, &name, &target).map_err(&invalid)?;
            pairs.push((name, target));
        }
        entry_points.insert(group, pairs);
    }

    Ok(PackageMetadata {
        name: section.name,
        version: Some(version),
        description: section.description,
        min_yannt_version,
        entry_points,
        format: MetadataFormat::Manifest,
    })
}

/// Parse a legacy `entry_points.txt` file for the package named `package`.
///
/// Lines are `[group]` headers or `name = target` pairs. Blank lines and
/// lines starting with `#` or `;` are ignored.
pub fn parse_legacy_entry_points(
    content: &str,
    package: &str,
    path: &Path,
) -> Result<PackageMetadata, YanntError> {
    let invalid = |line_no: usize, message: String| YanntError::Metadata {
        path: path.to_path_buf(),
        message: format!("line {line_no}: {message}"),
    };

    let mut entry_points: BTreeMap<String, Vec<(String, String)>> = BTreeMap::new();
    let mut current: Option<String> = None;

    for (idx, raw) in content.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
            continue;
        }

        if let Some(header) = line.strip_prefix('[') {
            let group = header
                .strip_suffix(']')
                .map(str::trim)
                .filter(|g| !g.is_empty())
                .ok_or_else(|| invalid(line_no, format!("malformed section header `{line}`")))?;
            entry_points.entry(group.to_string()).or_default();
            current = Some(group.to_string());
            continue;
        }

        let group = current
            .as_ref()
            .ok_or_else(|| invalid(line_no, "entry outside of any [group] section".to_string()))?;
        let (name, target) = line
            .split_once('=')
            .ok_or_else(|| invalid(line_no, format!("expected `name = target`, got `{line}`")))?;
        let (name, target) = (name.trim(), target.trim());
        validate_entry(group, name, target).map_err(|m| invalid(line_no, m))?;

        entry_points
            .entry(group.clone())
            .or_default()
            .push((name.to_string(), target.to_string()));
    }

    Ok(PackageMetadata {
        name: package.to_string(),
        version: None,
        description: None,
        min_yannt_version: None,
        entry_points,
        format: MetadataFormat::Legacy,
    })
}

/// Read whichever metadata file `package_dir` carries.
///
/// The current manifest wins when both exist. Returns `Ok(None)` for a
/// directory with no metadata at all.
pub fn read_package_dir(package_dir: &Path) -> Result<Option<PackageMetadata>, YanntError> {
    let manifest = package_dir.join(MANIFEST_FILE);
    if manifest.is_file() {
        let content = read(&manifest)?;
        return parse_package_manifest(&content, &manifest).map(Some);
    }

    let legacy = package_dir.join(LEGACY_FILE);
    if legacy.is_file() {
        let content = read(&legacy)?;
        let package = package_dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        return parse_legacy_entry_points(&content, &package, &legacy).map(Some);
    }

    Ok(None)
}

fn read(path: &Path) -> Result<String, YanntError> {
    std::fs::read_to_string(path)
        .map_err(|e| YanntError::io(format!("failed to read {}", path.display()), e))
}

fn validate_entry(group: &str, name: &str, target: &str) -> Result<(), String> {
    if name.is_empty() || name.starts_with('-') || name.chars().any(char::is_whitespace) {
        return Err(format!("entry `{name}` in group `{group}` has an invalid name"));
    }
    if target.is_empty() {
        return Err(format!("entry `{name}` in group `{group}` has an empty target"));
    }
    Ok(())
}

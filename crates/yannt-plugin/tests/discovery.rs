// SPDX-FileCopyrightText: 2026 Yannt Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for on-disk plugin discovery and loading.

use std::path::Path;

use yannt_core::{MetadataFormat, YanntError};
use yannt_plugin::{
    CommandRegistry, ExecutableResolver, InstalledPackages, PluginLoader, list_descriptors,
};

const GROUP: &str = "yannt.commands";

fn running() -> semver::Version {
    semver::Version::new(0, 1, 0)
}

fn write(path: &Path, content: &str) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
}

#[cfg(unix)]
fn write_executable(path: &Path) {
    use std::os::unix::fs::PermissionsExt;
    write(path, "#!/bin/sh\nexit 0\n");
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755)).unwrap();
}

/// Manifest and legacy packages are both discovered, in directory order.
#[test]
fn discovers_both_metadata_formats() {
    let root = tempfile::tempdir().unwrap();
    write(
        &root.path().join("a-weather/yannt-plugin.toml"),
        r#"
[package]
name = "yannt-weather"
version = "0.3.1"

[entry-points."yannt.commands"]
weather = "bin/yannt-weather"
"#,
    );
    write(
        &root.path().join("b-tides/entry_points.txt"),
        "[yannt.commands]\ntides = bin/yannt-tides\n\n[other.group]\nstray = x\n",
    );

    let source = InstalledPackages::new(vec![root.path().to_path_buf()]);
    let descriptors = list_descriptors(&source, GROUP).unwrap();

    assert_eq!(descriptors.len(), 2);
    assert_eq!(descriptors[0].name, "weather");
    assert_eq!(descriptors[0].package.as_deref(), Some("yannt-weather"));
    assert_eq!(descriptors[0].format, MetadataFormat::Manifest);
    assert_eq!(descriptors[1].name, "tides");
    assert_eq!(descriptors[1].package.as_deref(), Some("b-tides"));
    assert_eq!(descriptors[1].format, MetadataFormat::Legacy);
}

/// Directories without metadata are skipped rather than failing discovery.
#[test]
fn directories_without_metadata_are_skipped() {
    let root = tempfile::tempdir().unwrap();
    std::fs::create_dir(root.path().join("not-a-package")).unwrap();
    write(&root.path().join("stray-file.txt"), "ignored");

    let source = InstalledPackages::new(vec![root.path().to_path_buf()]);
    assert!(list_descriptors(&source, GROUP).unwrap().is_empty());
}

/// A malformed metadata file stops discovery with the file named.
#[test]
fn malformed_metadata_is_reported() {
    let root = tempfile::tempdir().unwrap();
    write(
        &root.path().join("broken/entry_points.txt"),
        "weather = bin/yannt-weather\n",
    );

    let source = InstalledPackages::new(vec![root.path().to_path_buf()]);
    let err = list_descriptors(&source, GROUP).unwrap_err();
    match err {
        YanntError::Metadata { path, .. } => assert!(path.ends_with("broken/entry_points.txt")),
        other => panic!("expected metadata error, got {other:?}"),
    }
}

/// Packages requiring a newer yannt still list, but fail to load.
#[test]
fn incompatible_package_lists_but_does_not_load() {
    let root = tempfile::tempdir().unwrap();
    write(
        &root.path().join("future/yannt-plugin.toml"),
        r#"
[package]
name = "future"
version = "1.0.0"
min_yannt_version = "99.0.0"

[entry-points."yannt.commands"]
warp = "bin/warp"
"#,
    );

    let source = InstalledPackages::new(vec![root.path().to_path_buf()]);
    let descriptors = list_descriptors(&source, GROUP).unwrap();
    assert_eq!(descriptors.len(), 1);
    assert_eq!(descriptors[0].min_yannt_version, Some(semver::Version::new(99, 0, 0)));

    let mut loader = PluginLoader::new(source, ExecutableResolver::with_path_var(None))
        .with_running_version(running());
    let mut registry = CommandRegistry::new();
    let err = loader.load_external_plugins(&mut registry, GROUP).unwrap_err();
    assert!(matches!(err, YanntError::PluginLoad { ref name, ref reason, .. }
        if name == "warp" && reason.contains("future")));
    assert!(registry.is_empty());
}

/// An incompatible package advertising only another group does not block loading.
#[cfg(unix)]
#[test]
fn incompatible_package_in_other_group_is_ignored() {
    let root = tempfile::tempdir().unwrap();
    write(
        &root.path().join("future/yannt-plugin.toml"),
        "[package]\nname = \"future\"\nversion = \"1.0.0\"\nmin_yannt_version = \"99.0.0\"\n\n[entry-points.\"other.group\"]\nwarp = \"bin/warp\"\n",
    );
    write(
        &root.path().join("weather/yannt-plugin.toml"),
        "[package]\nname = \"w\"\nversion = \"0.1.0\"\n\n[entry-points.\"yannt.commands\"]\nweather = \"bin/yannt-weather\"\n",
    );
    write_executable(&root.path().join("weather/bin/yannt-weather"));

    let source = InstalledPackages::new(vec![root.path().to_path_buf()]);
    let mut loader = PluginLoader::new(source, ExecutableResolver::with_path_var(None))
        .with_running_version(running());
    let mut registry = CommandRegistry::new();

    assert_eq!(loader.load_external_plugins(&mut registry, GROUP).unwrap(), 1);
    assert_eq!(registry.names().collect::<Vec<_>>(), vec!["weather"]);
}

/// The same package installed under two search paths registers once when
/// both copies point at the same absolute executable.
#[cfg(unix)]
#[test]
fn duplicate_installs_of_same_target_collapse() {
    let bin = tempfile::tempdir().unwrap();
    let program = bin.path().join("yannt-weather");
    write_executable(&program);

    let manifest = format!(
        "[package]\nname = \"yannt-weather\"\nversion = \"0.3.1\"\n\n[entry-points.\"yannt.commands\"]\nweather = \"{}\"\n",
        program.display()
    );
    let user = tempfile::tempdir().unwrap();
    let system = tempfile::tempdir().unwrap();
    write(&user.path().join("weather/yannt-plugin.toml"), &manifest);
    write(&system.path().join("weather/yannt-plugin.toml"), &manifest);

    let source =
        InstalledPackages::new(vec![user.path().to_path_buf(), system.path().to_path_buf()]);
    let mut loader = PluginLoader::new(source, ExecutableResolver::with_path_var(None));
    let mut registry = CommandRegistry::new();

    assert_eq!(loader.load_external_plugins(&mut registry, GROUP).unwrap(), 1);
    assert_eq!(registry.names().collect::<Vec<_>>(), vec!["weather"]);
}

/// Relative targets resolve inside the package; a missing binary is fatal.
#[cfg(unix)]
#[test]
fn relative_targets_resolve_inside_package() {
    let root = tempfile::tempdir().unwrap();
    write(
        &root.path().join("weather/yannt-plugin.toml"),
        "[package]\nname = \"w\"\nversion = \"0.1.0\"\n\n[entry-points.\"yannt.commands\"]\nweather = \"bin/yannt-weather\"\n",
    );
    write_executable(&root.path().join("weather/bin/yannt-weather"));
    write(
        &root.path().join("zz-broken/yannt-plugin.toml"),
        "[package]\nname = \"b\"\nversion = \"0.1.0\"\n\n[entry-points.\"yannt.commands\"]\nbroken = \"bin/missing\"\n",
    );

    let source = InstalledPackages::new(vec![root.path().to_path_buf()]);
    let mut loader = PluginLoader::new(source, ExecutableResolver::with_path_var(None));
    let mut registry = CommandRegistry::new();

    let err = loader.load_external_plugins(&mut registry, GROUP).unwrap_err();
    assert!(matches!(err, YanntError::PluginLoad { ref name, .. } if name == "broken"));
    assert!(registry.contains("weather"));
}

/// Two packages declaring the same name with their own relative executables
/// collide instead of one shadowing the other.
#[cfg(unix)]
#[test]
fn same_relative_target_in_two_packages_is_a_duplicate() {
    let root = tempfile::tempdir().unwrap();
    for package in ["a-pkg", "b-pkg"] {
        write(
            &root.path().join(package).join("entry_points.txt"),
            "[yannt.commands]\nweather = bin/weather\n",
        );
        write_executable(&root.path().join(package).join("bin/weather"));
    }

    let source = InstalledPackages::new(vec![root.path().to_path_buf()]);
    assert_eq!(list_descriptors(&source, GROUP).unwrap().len(), 2);

    let mut loader = PluginLoader::new(source, ExecutableResolver::with_path_var(None));
    let mut registry = CommandRegistry::new();
    let err = loader.load_external_plugins(&mut registry, GROUP).unwrap_err();
    assert!(matches!(err, YanntError::DuplicateCommand { ref name } if name == "weather"));
    assert_eq!(registry.len(), 1);
}

/// A plugin cannot take over the parser's own `help` subcommand.
#[cfg(unix)]
#[test]
fn plugin_named_help_is_rejected() {
    let root = tempfile::tempdir().unwrap();
    write(
        &root.path().join("helpful/entry_points.txt"),
        "[yannt.commands]\nhelp = bin/helpful\n",
    );
    write_executable(&root.path().join("helpful/bin/helpful"));

    let source = InstalledPackages::new(vec![root.path().to_path_buf()]);
    let mut loader = PluginLoader::new(source, ExecutableResolver::with_path_var(None));
    let mut registry = CommandRegistry::new();

    let err = loader.load_external_plugins(&mut registry, GROUP).unwrap_err();
    assert!(matches!(err, YanntError::DuplicateCommand { ref name } if name == "help"));
    assert!(registry.is_empty());
}

// SPDX-FileCopyrightText: 2026 Yannt Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end tests driving the built binaries.
//!
//! Every run gets its own home, config, data, and working directories so the
//! host's installed plugins and config files never leak in.

use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

struct Sandbox {
    home: TempDir,
    cwd: TempDir,
}

impl Sandbox {
    fn new() -> Self {
        Self {
            home: tempfile::tempdir().unwrap(),
            cwd: tempfile::tempdir().unwrap(),
        }
    }

    fn command(&self, program: &str) -> Command {
        let home = self.home.path();
        let mut cmd = Command::new(program);
        cmd.current_dir(self.cwd.path())
            .env("HOME", home)
            .env("XDG_CONFIG_HOME", home.join(".config"))
            .env("XDG_DATA_HOME", home.join(".local/share"))
            .env("YANNT_PLUGINS_INCLUDE_DEFAULT_PATHS", "false")
            .env_remove("RUST_LOG")
            .env_remove("YANNT_LOG_LEVEL")
            .env_remove("YANNT_PLUGINS_DISCOVERY_GROUP")
            .env_remove("YANNT_PLUGINS_SEARCH_PATHS");
        cmd
    }

    fn yannt(&self, args: &[&str]) -> Output {
        self.command(env!("CARGO_BIN_EXE_yannt"))
            .args(args)
            .output()
            .unwrap()
    }

    fn eps(&self, args: &[&str]) -> Output {
        self.command(env!("CARGO_BIN_EXE_yannt-eps"))
            .args(args)
            .output()
            .unwrap()
    }

    /// Point `./yannt.toml` at `plugins_dir`.
    fn use_plugins_dir(&self, plugins_dir: &Path) {
        std::fs::write(
            self.cwd.path().join("yannt.toml"),
            format!(
                "[plugins]\nsearch_paths = [\"{}\"]\n",
                plugins_dir.display()
            ),
        )
        .unwrap();
    }
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[cfg(unix)]
fn install_weather_plugin(plugins_dir: &Path) {
    use std::os::unix::fs::PermissionsExt;

    let package = plugins_dir.join("yannt-weather");
    std::fs::create_dir_all(package.join("bin")).unwrap();
    std::fs::write(
        package.join("yannt-plugin.toml"),
        "[package]\nname = \"yannt-weather\"\nversion = \"0.1.0\"\n\n[entry-points.\"yannt.commands\"]\nweather = \"bin/yannt-weather\"\n",
    )
    .unwrap();

    let script = package.join("bin/yannt-weather");
    std::fs::write(
        &script,
        "#!/bin/sh\nif [ \"$1\" = \"--fail\" ]; then exit 3; fi\necho \"weather: $*\"\n",
    )
    .unwrap();
    std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();
}

#[test]
fn greet_with_name() {
    let output = Sandbox::new().yannt(&["greet", "--name", "Ada"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "Hello, Ada!\n");
}

#[test]
fn greet_defaults_to_world() {
    let output = Sandbox::new().yannt(&["greet"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "Hello, world!\n");
}

#[test]
fn unknown_subcommand_exits_nonzero() {
    let output = Sandbox::new().yannt(&["frobnicate"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stdout(&output).is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("frobnicate"));
}

#[test]
fn help_lists_builtins() {
    let output = Sandbox::new().yannt(&["--help"]);
    assert!(output.status.success());
    let help = stdout(&output);
    assert!(help.contains("greet"));
    assert!(help.contains("completions"));
}

#[test]
fn completions_emit_a_script() {
    let output = Sandbox::new().yannt(&["completions", "bash"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("yannt"));
}

#[test]
fn invalid_config_exits_one() {
    let sandbox = Sandbox::new();
    std::fs::write(
        sandbox.cwd.path().join("yannt.toml"),
        "[plugins]\ndiscovery_grup = \"x\"\n",
    )
    .unwrap();
    let output = sandbox.yannt(&["greet"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("discovery_grup"));
}

#[cfg(unix)]
#[test]
fn external_plugin_runs_with_forwarded_args() {
    let sandbox = Sandbox::new();
    let plugins = tempfile::tempdir().unwrap();
    install_weather_plugin(plugins.path());
    sandbox.use_plugins_dir(plugins.path());

    let output = sandbox.yannt(&["weather", "--city", "Oslo"]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(stdout(&output), "weather: --city Oslo\n");
}

#[cfg(unix)]
#[test]
fn external_plugin_exit_code_is_propagated() {
    let sandbox = Sandbox::new();
    let plugins = tempfile::tempdir().unwrap();
    install_weather_plugin(plugins.path());
    sandbox.use_plugins_dir(plugins.path());

    let output = sandbox.yannt(&["weather", "--fail"]);
    assert_eq!(output.status.code(), Some(3));
}

#[cfg(unix)]
#[test]
fn broken_plugin_fails_startup() {
    let sandbox = Sandbox::new();
    let plugins = tempfile::tempdir().unwrap();
    let package = plugins.path().join("broken");
    std::fs::create_dir_all(&package).unwrap();
    std::fs::write(
        package.join("entry_points.txt"),
        "[yannt.commands]\nbroken = bin/not-there\n",
    )
    .unwrap();
    sandbox.use_plugins_dir(plugins.path());

    let output = sandbox.yannt(&["greet"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("broken"));
}

#[cfg(unix)]
#[test]
fn eps_lists_entry_points() {
    let sandbox = Sandbox::new();
    let plugins = tempfile::tempdir().unwrap();
    install_weather_plugin(plugins.path());
    sandbox.use_plugins_dir(plugins.path());

    let output = sandbox.eps(&["--plain"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "weather -> bin/yannt-weather\n");

    let output = sandbox.eps(&["--json"]);
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["entry_points"][0]["package"], "yannt-weather");
}

#[test]
fn eps_with_nothing_installed_prints_nothing() {
    let output = Sandbox::new().eps(&["--group", "acme.commands"]);
    assert!(output.status.success());
    assert!(stdout(&output).is_empty());
}

#[test]
fn eps_lists_incompatible_package_that_yannt_refuses() {
    let sandbox = Sandbox::new();
    let plugins = tempfile::tempdir().unwrap();
    let package = plugins.path().join("future");
    std::fs::create_dir_all(&package).unwrap();
    std::fs::write(
        package.join("yannt-plugin.toml"),
        "[package]\nname = \"future\"\nversion = \"1.0.0\"\nmin_yannt_version = \"99.0.0\"\n\n[entry-points.\"yannt.commands\"]\nwarp = \"bin/warp\"\n",
    )
    .unwrap();
    sandbox.use_plugins_dir(plugins.path());

    let output = sandbox.eps(&["--plain"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "warp -> bin/warp\n");

    let output = sandbox.yannt(&["greet"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("requires yannt >= 99.0.0"));
}

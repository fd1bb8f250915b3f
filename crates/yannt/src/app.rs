// SPDX-FileCopyrightText: 2026 Yannt Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Startup orchestration: registry population, parser assembly, dispatch.
//!
//! The sequence is strictly linear: root parser, built-ins, external
//! plugins, registry drain, argument parsing, handler. Any failure stops
//! it; nothing is retried.

use std::ffi::OsString;
use std::io::Write;

use clap::Command;
use thiserror::Error;
use yannt_config::YanntConfig;
use yannt_core::{CommandContext, Subcommands, YanntError};
use yannt_plugin::{
    CommandRegistry, ExecutableResolver, InstalledPackages, PluginLoader, PluginSource,
    ResolveRegistrar,
};

use crate::builtin;

/// Program name of the dispatcher.
pub const BIN_NAME: &str = "yannt";

/// Why a run did not complete.
#[derive(Debug, Error)]
pub enum RunError {
    /// Arguments did not match the assembled parser (or help/version was requested).
    #[error(transparent)]
    Usage(#[from] clap::Error),
    /// Registration, plugin, or command failure.
    #[error(transparent)]
    Command(#[from] YanntError),
}

impl RunError {
    /// Process exit code for this outcome.
    pub fn exit_code(&self) -> i32 {
        match self {
            RunError::Usage(e) => e.exit_code(),
            RunError::Command(e) => e.exit_code(),
        }
    }
}

/// The root parser, before any subcommand is attached.
pub fn root_command() -> Command {
    Command::new(BIN_NAME)
        .version(env!("CARGO_PKG_VERSION"))
        .about("A plugin-based command-line dispatcher")
        .subcommand_required(true)
        .arg_required_else_help(true)
}

/// Version of this binary, checked against plugins' `min_yannt_version`.
pub fn running_version() -> Result<semver::Version, YanntError> {
    semver::Version::parse(env!("CARGO_PKG_VERSION"))
        .map_err(|e| YanntError::Internal(format!("invalid crate version: {e}")))
}

/// Source over the installed package directories named by `config`.
pub fn installed_packages(config: &YanntConfig) -> InstalledPackages {
    InstalledPackages::new(config.plugins.resolved_search_paths())
}

/// Fill a fresh registry with the built-ins, then with external plugins.
pub fn populate_registry<S: PluginSource, R: ResolveRegistrar>(
    loader: &mut PluginLoader<S, R>,
    discovery_group: &str,
) -> Result<CommandRegistry, YanntError> {
    let mut registry = CommandRegistry::new();
    builtin::register_builtins(&mut registry)?;
    let builtins = registry.len();
    loader.load_external_plugins(&mut registry, discovery_group)?;
    tracing::debug!(builtins, plugins = registry.len() - builtins, "registry populated");
    Ok(registry)
}

/// Drain `registry` into `root`.
pub fn assemble(
    root: Command,
    registry: &CommandRegistry,
) -> Result<(Command, Subcommands), YanntError> {
    let subcommands = registry.build_subcommands()?;
    Ok((subcommands.attach(root), subcommands))
}

/// Parse `args` against the assembled parser and run the selected command.
pub fn run<I, T>(
    root: &Command,
    subcommands: &Subcommands,
    args: I,
    out: &mut dyn Write,
) -> Result<(), RunError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let matches = root.clone().try_get_matches_from(args)?;
    let mut ctx = CommandContext::new(root, out);
    subcommands.dispatch(&matches, &mut ctx)?;
    Ok(())
}

/// The production startup: installed packages resolved to executables on `PATH`.
pub fn startup(config: &YanntConfig) -> Result<(Command, Subcommands), YanntError> {
    let root = root_command();
    let mut loader = PluginLoader::new(installed_packages(config), ExecutableResolver::new())
        .with_running_version(running_version()?);
    let registry = populate_registry(&mut loader, &config.plugins.discovery_group)?;
    assemble(root, &registry)
}

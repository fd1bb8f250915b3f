// SPDX-FileCopyrightText: 2026 Yannt Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Resolution of plugin descriptors into registrars.
//!
//! The production resolver treats a descriptor target as an executable.
//! Targets containing a path separator are files, relative to the declaring
//! package's directory. Bare names are looked up on `PATH`.

use std::collections::HashMap;
use std::ffi::OsString;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Arg, ArgMatches, Command, value_parser};
use yannt_core::{CommandContext, CommandHandler, PluginDescriptor, Registrar, Subcommands, YanntError};

/// Turns a descriptor into the registrar it refers to.
pub trait ResolveRegistrar {
    /// Resolve `descriptor`, failing with `PluginLoad` when the target cannot be located.
    fn resolve(&mut self, descriptor: &PluginDescriptor) -> Result<Arc<dyn Registrar>, YanntError>;
}

/// Resolves descriptor targets to external executables.
///
/// Results are cached per command name and resolved path, so resolving the
/// same entry twice yields the identical registrar.
#[derive(Default)]
pub struct ExecutableResolver {
    path_var: Option<OsString>,
    cache: HashMap<(String, PathBuf), Arc<dyn Registrar>>,
}

impl ExecutableResolver {
    /// A resolver searching the process `PATH`.
    pub fn new() -> Self {
        Self::with_path_var(std::env::var_os("PATH"))
    }

    /// A resolver searching the given `PATH`-style value instead of the environment.
    pub fn with_path_var(path_var: Option<OsString>) -> Self {
        Self {
            path_var,
            cache: HashMap::new(),
        }
    }

    fn locate(&self, descriptor: &PluginDescriptor) -> Result<PathBuf, String> {
        let target = Path::new(&descriptor.target);

        if target.is_absolute() || descriptor.target.contains(['/', '\\']) {
            let candidate = match (&descriptor.base_dir, target.is_absolute()) {
                (Some(base), false) => base.join(target),
                _ => target.to_path_buf(),
            };
            return if is_executable(&candidate) {
                Ok(candidate)
            } else {
                Err(format!("{} is not an executable file", candidate.display()))
            };
        }

        let file_name = format!("{}{}", descriptor.target, std::env::consts::EXE_SUFFIX);
        self.path_var
            .as_ref()
            .into_iter()
            .flat_map(std::env::split_paths)
            .map(|dir| dir.join(&file_name))
            .find(|candidate| is_executable(candidate))
            .ok_or_else(|| format!("`{file_name}` was not found on PATH"))
    }
}

impl ResolveRegistrar for ExecutableResolver {
    fn resolve(&mut self, descriptor: &PluginDescriptor) -> Result<Arc<dyn Registrar>, YanntError> {
        let program = self.locate(descriptor).map_err(|reason| YanntError::PluginLoad {
            name: descriptor.name.clone(),
            target: descriptor.target.clone(),
            reason,
        })?;

        let key = (descriptor.name.clone(), program.clone());
        let registrar = self
            .cache
            .entry(key)
            .or_insert_with(|| Arc::new(ExternalCommand::new(descriptor, program)));
        Ok(Arc::clone(registrar))
    }
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    std::fs::metadata(path)
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

/// Registrar for a subcommand implemented by an external executable.
///
/// Every argument after the subcommand name is forwarded untouched,
/// including `--help`.
#[derive(Debug, Clone)]
pub struct ExternalCommand {
    name: String,
    about: String,
    program: PathBuf,
}

impl ExternalCommand {
    /// Build the registrar for `descriptor`, running `program`.
    pub fn new(descriptor: &PluginDescriptor, program: PathBuf) -> Self {
        let about = match &descriptor.package {
            Some(package) => format!("Run `{}` from the {package} plugin", descriptor.target),
            None => format!("Run `{}`", descriptor.target),
        };
        Self {
            name: descriptor.name.clone(),
            about,
            program,
        }
    }

    /// Path of the executable this command runs.
    pub fn program(&self) -> &Path {
        &self.program
    }
}

impl Registrar for ExternalCommand {
    fn register(&self, commands: &mut Subcommands) -> Result<(), YanntError> {
        let command = Command::new(self.name.clone())
            .about(self.about.clone())
            .disable_help_flag(true)
            .arg(
                Arg::new("args")
                    .num_args(0..)
                    .trailing_var_arg(true)
                    .allow_hyphen_values(true)
                    .value_parser(value_parser!(OsString)),
            );
        commands.add(
            command,
            ExternalHandler {
                name: self.name.clone(),
                program: self.program.clone(),
            },
        )
    }
}

struct ExternalHandler {
    name: String,
    program: PathBuf,
}

impl CommandHandler for ExternalHandler {
    fn run(&self, matches: &ArgMatches, ctx: &mut CommandContext<'_>) -> Result<(), YanntError> {
        let args: Vec<&OsString> = matches
            .get_many::<OsString>("args")
            .map(|values| values.collect())
            .unwrap_or_default();

        ctx.out()
            .flush()
            .map_err(|e| YanntError::io("failed to flush output", e))?;

        tracing::debug!(command = %self.name, program = %self.program.display(), "running external command");
        let status = std::process::Command::new(&self.program)
            .args(args)
            .status()
            .map_err(|e| YanntError::io(format!("failed to run {}", self.program.display()), e))?;

        if status.success() {
            Ok(())
        } else {
            Err(YanntError::CommandFailed {
                name: self.name.clone(),
                code: status.code().unwrap_or(1),
            })
        }
    }
}

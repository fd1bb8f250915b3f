// SPDX-FileCopyrightText: 2026 Yannt Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Subcommand builder handed to registrars, and the context handlers run in.
//!
//! `Subcommands` collects `clap::Command` definitions together with the
//! handler bound to each one. The orchestrator attaches the definitions to the
//! root parser, parses arguments, then dispatches to the matching handler.

use std::collections::HashMap;
use std::io::Write;

use clap::{ArgMatches, Command};

use crate::error::YanntError;
use crate::traits::CommandHandler;

/// Names the root parser already claims for its own subcommands.
pub const RESERVED_COMMAND_NAMES: &[&str] = &["help"];

/// Check that `name` can be attached to the root parser as a subcommand.
///
/// Names must be non-empty, free of whitespace, and must not start with `-`.
/// A reserved name is reported as a `DuplicateCommand` since the root parser
/// already owns it.
pub fn validate_command_name(name: &str) -> Result<(), YanntError> {
    if name.is_empty() || name.starts_with('-') || name.chars().any(char::is_whitespace) {
        return Err(YanntError::InvalidCommandName(name.to_string()));
    }
    if RESERVED_COMMAND_NAMES.contains(&name) {
        return Err(YanntError::DuplicateCommand {
            name: name.to_string(),
        });
    }
    Ok(())
}

/// Collected subcommand definitions and their bound handlers.
#[derive(Default)]
pub struct Subcommands {
    definitions: Vec<Command>,
    handlers: HashMap<String, Box<dyn CommandHandler>>,
}

impl Subcommands {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a subcommand definition with its execution behavior.
    ///
    /// The name is checked with [`validate_command_name`]. Fails with `DuplicateCommand` when a definition with the same name was
    /// already added, so one registrar can never shadow another's subcommand.
    pub fn add(
        &mut self,
        command: Command,
        handler: impl CommandHandler + 'static,
    ) -> Result<(), YanntError> {
        let name = command.get_name().to_string();
        validate_command_name(&name)?;
        if self.handlers.contains_key(&name) {
            return Err(YanntError::DuplicateCommand { name });
        }
        tracing::trace!(command = %name, "subcommand definition added");
        self.handlers.insert(name, Box::new(handler));
        self.definitions.push(command);
        Ok(())
    }

    /// Names of the collected subcommands, in the order they were added.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.definitions.iter().map(|c| c.get_name())
    }

    /// Returns true if a subcommand with this name was added.
    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// Returns the number of collected subcommands.
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Returns true if no subcommands were added.
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Install every collected definition on `root`.
    pub fn attach(&self, root: Command) -> Command {
        root.subcommands(self.definitions.iter().cloned())
    }

    /// Run the handler bound to the subcommand selected in `matches`.
    pub fn dispatch(
        &self,
        matches: &ArgMatches,
        ctx: &mut CommandContext<'_>,
    ) -> Result<(), YanntError> {
        let (name, sub_matches) = matches
            .subcommand()
            .ok_or_else(|| YanntError::Internal("no subcommand was selected".to_string()))?;
        let handler = self
            .handlers
            .get(name)
            .ok_or_else(|| YanntError::Internal(format!("no handler bound to `{name}`")))?;
        tracing::debug!(command = %name, "dispatching");
        handler.run(sub_matches, ctx)
    }
}

impl std::fmt::Debug for Subcommands {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subcommands")
            .field("names", &self.names().collect::<Vec<_>>())
            .finish()
    }
}

/// Everything a handler may touch while it runs.
pub struct CommandContext<'a> {
    root: &'a Command,
    out: &'a mut dyn Write,
}

impl<'a> CommandContext<'a> {
    /// Build a context around the fully assembled root parser and an output sink.
    pub fn new(root: &'a Command, out: &'a mut dyn Write) -> Self {
        Self { root, out }
    }

    /// The assembled root parser (used by completion generation).
    pub fn root(&self) -> &Command {
        self.root
    }

    /// Where command output goes; stdout in the binary, a buffer in tests.
    pub fn out(&mut self) -> &mut dyn Write {
        &mut *self.out
    }

    /// Write one line of output, mapping I/O failures into `YanntError`.
    pub fn println(&mut self, line: &str) -> Result<(), YanntError> {
        writeln!(self.out, "{line}").map_err(|e| YanntError::io("failed to write output", e))
    }
}

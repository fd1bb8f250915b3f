// SPDX-FileCopyrightText: 2026 Yannt Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the yannt command dispatcher.

use std::path::PathBuf;

use thiserror::Error;

/// The primary error type used by the registry, the plugin loader, and command handlers.
#[derive(Debug, Error)]
pub enum YanntError {
    /// A registrar was offered under a name the root parser cannot accept.
    #[error("invalid command name `{0}`: names must be non-empty without whitespace or a leading `-`")]
    InvalidCommandName(String),

    /// Two distinct registrars (or subcommand definitions) claim the same name.
    #[error("command `{name}` is already registered")]
    DuplicateCommand { name: String },

    /// A plugin descriptor could not be resolved into a registrar.
    #[error("failed to load plugin `{name}` ({target}): {reason}")]
    PluginLoad {
        name: String,
        target: String,
        reason: String,
    },

    /// Installed plugin metadata could not be read or parsed.
    #[error("invalid plugin metadata in {}: {message}", path.display())]
    Metadata { path: PathBuf, message: String },

    /// An external command ran but exited unsuccessfully.
    #[error("command `{name}` exited with status {code}")]
    CommandFailed { name: String, code: i32 },

    /// Configuration errors that are not reported through the diagnostic renderer.
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O failures while reading metadata, spawning plugins, or writing output.
    #[error("{context}: {source}")]
    Io {
        context: String,
        source: std::io::Error,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl YanntError {
    /// Wrap an I/O error with a short description of what was being attempted.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        YanntError::Io {
            context: context.into(),
            source,
        }
    }

    /// Process exit code for this error when it reaches a binary's `main`.
    ///
    /// External command failures propagate the plugin's own status.
    pub fn exit_code(&self) -> i32 {
        match self {
            YanntError::CommandFailed { code, .. } if *code != 0 => *code,
            _ => 1,
        }
    }
}

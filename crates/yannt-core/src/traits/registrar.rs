// SPDX-FileCopyrightText: 2026 Yannt Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The registrar contract: one capability, one subcommand.

use crate::command::Subcommands;
use crate::error::YanntError;

/// Attaches a single named subcommand (flags and execution behavior) to a
/// [`Subcommands`] builder.
///
/// Plain functions with the matching signature are registrars, so a built-in
/// command can be registered as `Arc::new(greet::register)`.
pub trait Registrar {
    /// Add this registrar's subcommand definition and handler to `commands`.
    fn register(&self, commands: &mut Subcommands) -> Result<(), YanntError>;
}

impl<F> Registrar for F
where
    F: Fn(&mut Subcommands) -> Result<(), YanntError>,
{
    fn register(&self, commands: &mut Subcommands) -> Result<(), YanntError> {
        self(commands)
    }
}

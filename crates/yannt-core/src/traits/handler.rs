// SPDX-FileCopyrightText: 2026 Yannt Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Execution behavior bound to a subcommand.

use clap::ArgMatches;

use crate::command::CommandContext;
use crate::error::YanntError;

/// Runs a subcommand once argument parsing has selected it.
pub trait CommandHandler {
    /// Execute with the subcommand's own matches.
    fn run(&self, matches: &ArgMatches, ctx: &mut CommandContext<'_>) -> Result<(), YanntError>;
}

impl<F> CommandHandler for F
where
    F: Fn(&ArgMatches, &mut CommandContext<'_>) -> Result<(), YanntError>,
{
    fn run(&self, matches: &ArgMatches, ctx: &mut CommandContext<'_>) -> Result<(), YanntError> {
        self(matches, ctx)
    }
}

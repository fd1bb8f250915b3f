// SPDX-FileCopyrightText: 2026 Yannt Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `yannt completions` prints a completion script for the assembled parser,
//! so plugin commands complete alongside the built-ins.

use clap::{Arg, ArgMatches, Command, value_parser};
use clap_complete::Shell;
use yannt_core::{CommandContext, Subcommands, YanntError};

/// Command name.
pub const NAME: &str = "completions";

/// Attach `completions <SHELL>`.
pub fn register(commands: &mut Subcommands) -> Result<(), YanntError> {
    let command = Command::new(NAME)
        .about("Print a shell completion script")
        .arg(
            Arg::new("shell")
                .required(true)
                .value_parser(value_parser!(Shell))
                .help("Target shell"),
        );
    commands.add(command, run)
}

fn run(matches: &ArgMatches, ctx: &mut CommandContext<'_>) -> Result<(), YanntError> {
    let shell = *matches
        .get_one::<Shell>("shell")
        .ok_or_else(|| YanntError::Internal("completions: shell is required".to_string()))?;

    let mut root = ctx.root().clone();
    let bin_name = root.get_name().to_string();
    clap_complete::generate(shell, &mut root, bin_name, ctx.out());
    Ok(())
}

// SPDX-FileCopyrightText: 2026 Yannt Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `yannt greet` command implementation.

use clap::{Arg, ArgMatches, Command};
use yannt_core::{CommandContext, Subcommands, YanntError};

/// Command name.
pub const NAME: &str = "greet";

const DEFAULT_NAME: &str = "world";

/// Attach `greet [--name <NAME>]`.
pub fn register(commands: &mut Subcommands) -> Result<(), YanntError> {
    let command = Command::new(NAME).about("Print a greeting").arg(
        Arg::new("name")
            .long("name")
            .value_name("NAME")
            .default_value(DEFAULT_NAME)
            .help("Who to greet"),
    );
    commands.add(command, run)
}

fn run(matches: &ArgMatches, ctx: &mut CommandContext<'_>) -> Result<(), YanntError> {
    let name = matches
        .get_one::<String>("name")
        .map(String::as_str)
        .unwrap_or(DEFAULT_NAME);
    ctx.println(&greeting(name))
}

fn greeting(name: &str) -> String {
    format!("Hello, {name}!")
}

// SPDX-FileCopyrightText: 2026 Yannt Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! yannt - a plugin-based command-line dispatcher.
//!
//! This is the binary entry point.

use yannt::{app, logging};

fn main() {
    let config = match yannt_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            yannt_config::render_errors(&errors);
            std::process::exit(1);
        }
    };
    logging::init_tracing(&config.log.level);

    let (root, subcommands) = match app::startup(&config) {
        Ok(assembled) => assembled,
        Err(e) => {
            eprintln!("{}: {e}", app::BIN_NAME);
            std::process::exit(e.exit_code());
        }
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match app::run(&root, &subcommands, std::env::args_os(), &mut out) {
        Ok(()) => {}
        // clap prints its own diagnostic (or help/version) and picks the exit code.
        Err(app::RunError::Usage(e)) => e.exit(),
        Err(app::RunError::Command(e)) => {
            tracing::debug!(error = ?e, "command failed");
            if !matches!(e, yannt_core::YanntError::CommandFailed { .. }) {
                eprintln!("{}: {e}", app::BIN_NAME);
            }
            std::process::exit(e.exit_code());
        }
    }
}

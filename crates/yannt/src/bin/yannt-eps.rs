// SPDX-FileCopyrightText: 2026 Yannt Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Lists discoverable plugin entry points (name and target) without loading
//! or registering them.

use std::io::IsTerminal;

use clap::Parser;
use yannt::eps::{EpsArgs, selected_group, write_listing};
use yannt::{app, logging};
use yannt_plugin::list_descriptors;

fn main() {
    let args = EpsArgs::parse();

    let config = match yannt_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            yannt_config::render_errors(&errors);
            std::process::exit(1);
        }
    };
    logging::init_tracing(&config.log.level);

    let use_color = !args.plain && std::io::stdout().is_terminal();

    let result = selected_group(&args, &config.plugins.discovery_group).and_then(|group| {
        list_descriptors(&app::installed_packages(&config), group).and_then(|descriptors| {
            write_listing(
                group,
                &descriptors,
                args.json,
                use_color,
                &mut std::io::stdout().lock(),
            )
        })
    });

    if let Err(e) = result {
        eprintln!("yannt-eps: {e}");
        std::process::exit(e.exit_code());
    }
}

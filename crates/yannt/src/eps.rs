// SPDX-FileCopyrightText: 2026 Yannt Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `yannt-eps`: list discoverable entry points without loading them.

use std::io::Write;

use clap::Parser;
use serde::Serialize;
use yannt_core::{PluginDescriptor, YanntError};

/// List the plugin entry points yannt would load.
#[derive(Parser, Debug)]
#[command(name = "yannt-eps", version, about, long_about = None)]
pub struct EpsArgs {
    /// Discovery group to inspect (defaults to `plugins.discovery_group`).
    #[arg(long)]
    pub group: Option<String>,

    /// Print JSON for scripting.
    #[arg(long)]
    pub json: bool,

    /// Disable colors.
    #[arg(long)]
    pub plain: bool,
}

/// The group to list: `--group` when given, else the configured one.
pub fn selected_group<'a>(args: &'a EpsArgs, configured: &'a str) -> Result<&'a str, YanntError> {
    match args.group.as_deref() {
        Some(group) if group.trim().is_empty() || group.contains(char::is_whitespace) => Err(
            YanntError::Config(format!("invalid --group `{group}`: must be non-empty without whitespace")),
        ),
        Some(group) => Ok(group),
        None => Ok(configured),
    }
}

/// Structured listing for `--json` mode.
#[derive(Debug, Serialize)]
pub struct EntryPointsResponse<'a> {
    pub group: &'a str,
    pub entry_points: &'a [PluginDescriptor],
}

/// Write `descriptors` as `name -> target` lines, or as JSON.
pub fn write_listing(
    group: &str,
    descriptors: &[PluginDescriptor],
    json: bool,
    use_color: bool,
    out: &mut dyn Write,
) -> Result<(), YanntError> {
    let write_err = |e| YanntError::io("failed to write listing", e);

    if json {
        let response = EntryPointsResponse {
            group,
            entry_points: descriptors,
        };
        let body = serde_json::to_string_pretty(&response)
            .map_err(|e| YanntError::Internal(format!("failed to serialize listing: {e}")))?;
        return writeln!(out, "{body}").map_err(write_err);
    }

    for descriptor in descriptors {
        let line = if use_color {
            use colored::Colorize;
            format!("{} -> {}", descriptor.name.bold(), descriptor.target.cyan())
        } else {
            format!("{} -> {}", descriptor.name, descriptor.target)
        };
        writeln!(out, "{line}").map_err(write_err)?;
    }
    Ok(())
}

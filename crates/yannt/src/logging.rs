// SPDX-FileCopyrightText: 2026 Yannt Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tracing subscriber setup shared by both binaries.

use tracing_subscriber::EnvFilter;

/// Initializes the tracing subscriber with the given log level.
///
/// Call once per process. `RUST_LOG` takes precedence. Logs go to stderr so
/// command output on stdout stays clean.
pub fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(log_level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .without_time()
        .init();
}

fn default_directives(log_level: &str) -> String {
    let level = log_level.trim().to_ascii_lowercase();
    format!("yannt={level},yannt_plugin={level},yannt_core={level},warn")
}

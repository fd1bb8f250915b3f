// SPDX-FileCopyrightText: 2026 Yannt Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! yannt - a plugin-based command-line dispatcher.
//!
//! The binaries are thin wrappers over this library: [`app`] runs the startup
//! sequence, [`builtin`] holds the compiled-in commands, and [`eps`] backs the
//! entry-point listing tool.

pub mod app;
pub mod builtin;
pub mod eps;
pub mod logging;

// SPDX-FileCopyrightText: 2026 Yannt Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Extension traits implemented by built-in commands and resolved plugins.

pub mod handler;
pub mod registrar;

pub use handler::CommandHandler;
pub use registrar::Registrar;

// SPDX-FileCopyrightText: 2026 Yannt Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the yannt command dispatcher.
//!
//! This crate provides the registrar and handler traits, the subcommand
//! builder registrars write into, the shared error type, and the plugin
//! descriptor type produced by discovery.

pub mod command;
pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use command::{CommandContext, RESERVED_COMMAND_NAMES, Subcommands, validate_command_name};
pub use error::YanntError;
pub use traits::{CommandHandler, Registrar};
pub use types::{DEFAULT_DISCOVERY_GROUP, MetadataFormat, PluginDescriptor};

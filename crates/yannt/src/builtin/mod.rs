// SPDX-FileCopyrightText: 2026 Yannt Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Commands compiled into the yannt binary.
//!
//! Nothing registers itself on import; the orchestrator calls
//! [`register_builtins`] explicitly during startup.

pub mod completions;
pub mod greet;

use std::sync::Arc;

use yannt_core::YanntError;
use yannt_plugin::CommandRegistry;

/// Register every built-in command.
pub fn register_builtins(registry: &mut CommandRegistry) -> Result<(), YanntError> {
    registry.register(greet::NAME, Arc::new(greet::register))?;
    registry.register(completions::NAME, Arc::new(completions::register))?;
    Ok(())
}

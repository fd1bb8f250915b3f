// SPDX-FileCopyrightText: 2026 Yannt Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Command registry mapping command names to registrars.
//!
//! The `CommandRegistry` is built once at startup, filled by built-in
//! registration and the plugin loader, then drained into a `Subcommands`
//! builder. It only grows; there is no removal.

use std::collections::HashMap;
use std::sync::Arc;

use yannt_core::{Registrar, Subcommands, YanntError, validate_command_name};

/// A single registration: the command name and the registrar that owns it.
pub struct RegistryEntry {
    /// Command name the registrar was registered under.
    pub name: String,
    /// Shared reference to the registrar.
    pub registrar: Arc<dyn Registrar>,
}

impl std::fmt::Debug for RegistryEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistryEntry")
            .field("name", &self.name)
            .field("registrar", &Arc::as_ptr(&self.registrar))
            .finish()
    }
}

/// Registry of command registrars, keyed by command name.
///
/// Each name maps to at most one registrar. Registering the identical
/// registrar (same `Arc` allocation) again is a no-op; registering a
/// different one under a taken name fails with `DuplicateCommand`.
#[derive(Debug, Default)]
pub struct CommandRegistry {
    entries: Vec<RegistryEntry>,
    index: HashMap<String, usize>,
}

impl CommandRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `registrar` under `name`.
    ///
    /// Names the root parser reserves, such as `help`, are rejected as duplicates.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        registrar: Arc<dyn Registrar>,
    ) -> Result<(), YanntError> {
        let name = name.into();
        validate_command_name(&name)?;

        if let Some(&slot) = self.index.get(&name) {
            if Arc::ptr_eq(&self.entries[slot].registrar, &registrar) {
                tracing::debug!(command = %name, "registrar already registered, ignoring");
                return Ok(());
            }
            return Err(YanntError::DuplicateCommand { name });
        }

        tracing::debug!(command = %name, "command registered");
        self.index.insert(name.clone(), self.entries.len());
        self.entries.push(RegistryEntry { name, registrar });
        Ok(())
    }

    /// Every registered registrar, in insertion order.
    pub fn list_registered(&self) -> impl Iterator<Item = &Arc<dyn Registrar>> {
        self.entries.iter().map(|e| &e.registrar)
    }

    /// Every registration with its name, in insertion order.
    pub fn entries(&self) -> &[RegistryEntry] {
        &self.entries
    }

    /// Get the registrar registered under `name`.
    pub fn get(&self, name: &str) -> Option<&Arc<dyn Registrar>> {
        self.index.get(name).map(|&slot| &self.entries[slot].registrar)
    }

    /// Returns true if `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Registered command names, in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    /// Invoke every registrar against a fresh `Subcommands` builder.
    ///
    /// The first registrar error aborts the build.
    pub fn build_subcommands(&self) -> Result<Subcommands, YanntError> {
        let mut subcommands = Subcommands::new();
        for entry in &self.entries {
            entry.registrar.register(&mut subcommands)?;
        }
        Ok(subcommands)
    }

    /// Returns the number of registered commands.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

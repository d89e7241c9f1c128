//! The command registry.
//!
//! A [`Registry`] maps dotted paths (`name` or `namespace.name`) to
//! [`CommandSpec`]s. There is no global registry: create one, fill it at
//! startup, and hand it to the dispatcher. Several registries can coexist and
//! be combined with [`Registry::merge`].
//!
//! ```rust
//! use subcmd_dispatch::{Arguments, Registry, Signature};
//!
//! let mut db = Registry::new();
//! db.command("migrate", Signature::new().opt("dry_run", false), |_: &Arguments| {
//!     Ok::<_, anyhow::Error>("migrated")
//! })?;
//!
//! let mut app = Registry::new();
//! app.merge(db, Some("db"));
//! assert!(app.lookup("db.migrate").is_ok());
//! # Ok::<(), subcmd_dispatch::RegistrationError>(())
//! ```

use serde::Serialize;
use std::collections::hash_map::Entry;
use std::collections::HashMap;

use crate::arg::ArgSpec;
use crate::command::{CommandBuilder, CommandSpec};
use crate::error::{RegistrationError, RegistryError, UnknownCommandError};
use crate::handler::{Arguments, Command};
use crate::signature::Signature;

/// Commands keyed by dotted path.
#[derive(Debug, Default)]
pub struct Registry {
    commands: HashMap<String, CommandSpec>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a command at its path, replacing any previous entry.
    ///
    /// Returns the replaced command, if any.
    pub fn register(&mut self, command: CommandSpec) -> Option<CommandSpec> {
        let path = command.path();
        let replaced = self.commands.insert(path.clone(), command);
        if replaced.is_some() {
            tracing::debug!(%path, "replaced registered command");
        } else {
            tracing::debug!(%path, "registered command");
        }
        replaced
    }

    /// Inserts a command, failing if its path is taken.
    pub fn try_register(&mut self, command: CommandSpec) -> Result<(), RegistryError> {
        let path = command.path();
        if self.commands.contains_key(&path) {
            return Err(RegistryError::DuplicateCommand(path));
        }
        self.register(command);
        Ok(())
    }

    /// Registers a closure-backed command.
    pub fn command<F, T, E>(
        &mut self,
        name: &str,
        signature: Signature,
        f: F,
    ) -> Result<&mut CommandSpec, RegistrationError>
    where
        F: FnMut(&Arguments) -> Result<T, E> + 'static,
        T: Serialize + 'static,
        E: Into<anyhow::Error> + 'static,
    {
        self.command_with(name, signature, f, |cfg| cfg)
    }

    /// Registers a closure-backed command with inline configuration.
    ///
    /// ```rust,ignore
    /// registry.command_with("namespaced", Signature::new().arg("name"), handler, |cfg| cfg
    ///     .namespace("my_namespace")
    ///     .description("namespaced command")
    ///     .arg(ArgSpec::new("name").help("who")))?;
    /// ```
    pub fn command_with<F, T, E, C>(
        &mut self,
        name: &str,
        signature: Signature,
        f: F,
        configure: C,
    ) -> Result<&mut CommandSpec, RegistrationError>
    where
        F: FnMut(&Arguments) -> Result<T, E> + 'static,
        T: Serialize + 'static,
        E: Into<anyhow::Error> + 'static,
        C: FnOnce(CommandBuilder) -> CommandBuilder,
    {
        let spec = configure(CommandBuilder::new(name, signature)).build(f)?;
        Ok(self.insert(spec))
    }

    /// Registers an instance of a [`Command`] type.
    pub fn add_command<C: Command>(&mut self, command: C) -> Result<&mut CommandSpec, RegistrationError> {
        let spec = CommandSpec::from_command(command)?;
        Ok(self.insert(spec))
    }

    fn insert(&mut self, spec: CommandSpec) -> &mut CommandSpec {
        let path = spec.path();
        tracing::debug!(%path, "registered command");
        match self.commands.entry(path) {
            Entry::Occupied(mut entry) => {
                entry.insert(spec);
                entry.into_mut()
            }
            Entry::Vacant(entry) => entry.insert(spec),
        }
    }

    /// Attaches an argument override to a registered command.
    pub fn arg(&mut self, path: &str, arg: ArgSpec) -> Result<(), RegistrationError> {
        self.lookup_mut(path)?.add_argument(arg)?;
        Ok(())
    }

    /// Moves every command of `other` into this registry.
    ///
    /// When `namespace` is given it replaces the namespace of each merged
    /// command before it is registered. `other` is consumed: a command lives
    /// in exactly one registry.
    ///
    /// Commands move in sorted path order, so when several land on the same
    /// path the one with the greatest source path wins.
    pub fn merge(&mut self, other: Registry, namespace: Option<&str>) {
        let mut incoming: Vec<(String, CommandSpec)> = other.commands.into_iter().collect();
        incoming.sort_by(|(a, _), (b, _)| a.cmp(b));
        for (_, mut command) in incoming {
            if let Some(ns) = namespace {
                command.set_namespace(Some(ns.to_string()));
            }
            self.register(command);
        }
    }

    pub fn lookup(&self, path: &str) -> Result<&CommandSpec, UnknownCommandError> {
        self.commands
            .get(path)
            .ok_or_else(|| UnknownCommandError::new(path))
    }

    pub fn lookup_mut(&mut self, path: &str) -> Result<&mut CommandSpec, UnknownCommandError> {
        self.commands
            .get_mut(path)
            .ok_or_else(|| UnknownCommandError::new(path))
    }

    /// Removes and returns the command at `path`.
    pub fn remove(&mut self, path: &str) -> Option<CommandSpec> {
        self.commands.remove(path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.commands.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Registered paths, in no particular order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.commands.keys().map(String::as_str)
    }

    /// Commands ordered for help display: top-level first, then by namespace
    /// depth, then by path.
    pub fn list_sorted(&self) -> Vec<&CommandSpec> {
        let mut commands: Vec<(&String, &CommandSpec)> = self.commands.iter().collect();
        commands.sort_by(|(a, _), (b, _)| {
            let depth = |p: &str| p.matches('.').count();
            depth(a).cmp(&depth(b)).then_with(|| a.cmp(b))
        });
        commands.into_iter().map(|(_, c)| c).collect()
    }
}

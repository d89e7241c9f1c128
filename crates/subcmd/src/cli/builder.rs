//! Builder for [`App`].

use std::path::PathBuf;

use serde::Serialize;
use subcmd_dispatch::{
    ArgSpec, Arguments, Command, CommandBuilder, CommandSpec, RegistrationError, Registry,
    Signature,
};
use subcmd_render::{ColorChoice, Theme};

use super::app::App;

/// Configures commands and output before building an [`App`].
///
/// ```rust
/// use subcmd::cli::App;
/// use subcmd::{Arguments, Signature};
///
/// let app = App::builder()
///     .prog_name("manage")
///     .load_env(false)
///     .command("ping", Signature::new(), |_: &Arguments| Ok::<_, anyhow::Error>("pong"))?
///     .build();
///
/// assert!(app.registry().contains("ping"));
/// # Ok::<(), subcmd::RegistrationError>(())
/// ```
#[derive(Debug, Default)]
pub struct AppBuilder {
    registry: Registry,
    prog: Option<String>,
    skip_env: bool,
    env_file: Option<PathBuf>,
    color: ColorChoice,
    theme: Option<Theme>,
}

impl AppBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from an existing registry instead of an empty one.
    pub fn with_registry(mut self, registry: Registry) -> Self {
        self.registry = registry;
        self
    }

    /// Registers a closure-backed command.
    pub fn command<F, T, E>(
        mut self,
        name: &str,
        signature: Signature,
        f: F,
    ) -> Result<Self, RegistrationError>
    where
        F: FnMut(&Arguments) -> Result<T, E> + 'static,
        T: Serialize + 'static,
        E: Into<anyhow::Error> + 'static,
    {
        self.registry.command(name, signature, f)?;
        Ok(self)
    }

    /// Registers a closure-backed command with inline configuration.
    pub fn command_with<F, T, E, C>(
        mut self,
        name: &str,
        signature: Signature,
        f: F,
        configure: C,
    ) -> Result<Self, RegistrationError>
    where
        F: FnMut(&Arguments) -> Result<T, E> + 'static,
        T: Serialize + 'static,
        E: Into<anyhow::Error> + 'static,
        C: FnOnce(CommandBuilder) -> CommandBuilder,
    {
        self.registry.command_with(name, signature, f, configure)?;
        Ok(self)
    }

    /// Registers an instance of a [`Command`] type.
    pub fn add_command<C: Command>(mut self, command: C) -> Result<Self, RegistrationError> {
        self.registry.add_command(command)?;
        Ok(self)
    }

    /// Registers a prepared command, such as one generated by `#[command]`.
    /// A command already registered at the same path is replaced.
    pub fn register(mut self, command: CommandSpec) -> Self {
        self.registry.register(command);
        self
    }

    /// Attaches an argument override to a registered command.
    pub fn arg(mut self, path: &str, arg: ArgSpec) -> Result<Self, RegistrationError> {
        self.registry.arg(path, arg)?;
        Ok(self)
    }

    /// Moves every command of `other` in, optionally under `namespace`.
    pub fn merge(mut self, other: Registry, namespace: Option<&str>) -> Self {
        self.registry.merge(other, namespace);
        self
    }

    /// Program name shown in the usage line. Defaults to the file name of
    /// the first argument.
    pub fn prog_name(mut self, prog: impl Into<String>) -> Self {
        self.prog = Some(prog.into());
        self
    }

    /// Whether to load an env file before executing a command (default on).
    pub fn load_env(mut self, enabled: bool) -> Self {
        self.skip_env = !enabled;
        self
    }

    /// Env file to load instead of `.env` in the working directory.
    pub fn env_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.env_file = Some(path.into());
        self
    }

    pub fn color(mut self, color: ColorChoice) -> Self {
        self.color = color;
        self
    }

    pub fn theme(mut self, theme: Theme) -> Self {
        self.theme = Some(theme);
        self
    }

    pub fn build(self) -> App {
        App::from_parts(
            self.registry,
            self.prog,
            !self.skip_env,
            self.env_file,
            self.color,
            self.theme.unwrap_or_default(),
        )
    }
}

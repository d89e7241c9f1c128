//! Command descriptors.
//!
//! A [`CommandSpec`] pairs a handler with the argument specs derived from its
//! signature. It is built once at registration time; afterwards only
//! [`CommandSpec::add_argument`] may change it, and only for parameters the
//! signature actually declares.
//!
//! ```rust
//! use subcmd_dispatch::{ArgSpec, Arguments, CommandSpec, Signature};
//!
//! let mut greet = CommandSpec::builder("greet", Signature::new().arg("name").opt("loud", false))
//!     .description("Say hello")
//!     .build(|args: &Arguments| {
//!         let name: String = args.get("name")?;
//!         Ok::<_, anyhow::Error>(format!("hello {}", name))
//!     })?;
//!
//! greet.add_argument(ArgSpec::new("name").help("who to greet"))?;
//! assert_eq!(greet.arguments()[0].options().help, "who to greet");
//! # Ok::<(), subcmd_dispatch::RegistrationError>(())
//! ```

use clap::Command as ClapCommand;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

use crate::arg::{ArgSpec, NO_DESCRIPTION};
use crate::error::{ArgumentError, RegistrationError, SignatureError};
use crate::handler::{Arguments, CallResult, Command, CommandHandler, FnHandler, Handler, Outcome};
use crate::parser::{ArgDirective, ParserConfig};
use crate::signature::Signature;

static CAMEL_BOUNDARY: Lazy<Regex> = Lazy::new(|| Regex::new("(.)([A-Z])").unwrap());

/// Converts a type identifier to the command name it registers under.
///
/// `ClassBased` becomes `class_based`. Module paths are stripped first, so
/// `std::any::type_name` output can be passed directly.
pub fn command_name_for(type_name: &str) -> String {
    let ident = type_name
        .split('<')
        .next()
        .unwrap_or(type_name)
        .rsplit("::")
        .next()
        .unwrap_or(type_name);
    CAMEL_BOUNDARY
        .replace_all(ident, "${1}_${2}")
        .to_lowercase()
}

/// Joins an optional namespace and a name into a dotted path.
pub fn command_path(namespace: Option<&str>, name: &str) -> String {
    match namespace {
        Some(ns) => format!("{}.{}", ns, name),
        None => name.to_string(),
    }
}

/// A registered command: name, namespace, description, argument specs and
/// the handler that runs it.
pub struct CommandSpec {
    name: String,
    namespace: Option<String>,
    description: String,
    parameter_order: Vec<String>,
    arguments: Vec<ArgSpec>,
    defaults: BTreeMap<String, Value>,
    handler: Box<dyn Handler>,
}

impl CommandSpec {
    /// Builds a command from a signature and a handler.
    pub fn new(
        name: impl Into<String>,
        signature: &Signature,
        handler: Box<dyn Handler>,
    ) -> Result<Self, SignatureError> {
        let inspected = signature.inspect()?;

        let arguments = inspected
            .names
            .iter()
            .map(|name| ArgSpec::from_param(name.clone(), inspected.defaults.get(name).cloned()))
            .collect();

        let spec = Self {
            name: name.into(),
            namespace: None,
            description: NO_DESCRIPTION.to_string(),
            parameter_order: inspected.names.clone(),
            arguments,
            defaults: inspected
                .defaults
                .iter()
                .map(|(name, default)| (name.clone(), default.value().clone()))
                .collect(),
            handler,
        };

        tracing::debug!(
            command = %spec.name,
            params = ?spec.parameter_order,
            "built command"
        );
        Ok(spec)
    }

    /// Starts building a command backed by a closure.
    pub fn builder(name: impl Into<String>, signature: Signature) -> CommandBuilder {
        CommandBuilder::new(name, signature)
    }

    /// Builds a command from a [`Command`] implementation.
    ///
    /// Name, namespace and description come from the trait methods; the name
    /// falls back to the snake-case type name.
    pub fn from_command<C: Command>(command: C) -> Result<Self, SignatureError> {
        let name = command
            .name()
            .unwrap_or_else(|| command_name_for(std::any::type_name::<C>()));
        let namespace = command.namespace();
        let description = command.description();
        let signature = command.signature();

        let mut spec = Self::new(name, &signature, Box::new(CommandHandler::new(command)))?;
        spec.namespace = namespace;
        if let Some(description) = description {
            spec.description = description;
        }
        Ok(spec)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    pub fn set_namespace(&mut self, namespace: Option<String>) {
        self.namespace = namespace;
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    /// The dotted path the command registers under.
    pub fn path(&self) -> String {
        command_path(self.namespace(), &self.name)
    }

    pub fn parameter_order(&self) -> &[String] {
        &self.parameter_order
    }

    pub fn arguments(&self) -> &[ArgSpec] {
        &self.arguments
    }

    pub fn argument(&self, name: &str) -> Option<&ArgSpec> {
        self.arguments.iter().find(|a| a.name() == name)
    }

    pub fn has_argument(&self, name: &str) -> bool {
        self.argument(name).is_some()
    }

    /// Attaches an override for an existing parameter.
    ///
    /// The override replaces the current spec at the same position.
    pub fn add_argument(&mut self, arg: ArgSpec) -> Result<(), ArgumentError> {
        self.register_argument(arg)
    }

    fn register_argument(&mut self, arg: ArgSpec) -> Result<(), ArgumentError> {
        if !self.parameter_order.iter().any(|n| n == arg.name()) {
            return Err(ArgumentError::UnknownParameter {
                name: arg.name().to_string(),
                command: self.path(),
            });
        }

        match self.arguments.iter().position(|a| a.name() == arg.name()) {
            Some(slot) => {
                tracing::trace!(command = %self.name, arg = arg.name(), slot, "replaced argument");
                self.arguments[slot] = arg;
            }
            None => self.arguments.push(arg),
        }
        Ok(())
    }

    /// Renders the argument specs into a parser configuration.
    pub fn render(&self) -> ParserConfig {
        ParserConfig {
            name: self.path(),
            about: self.description.clone(),
            args: self.arguments.iter().map(ArgDirective::from_spec).collect(),
        }
    }

    /// The clap command for this spec.
    pub fn parser(&self) -> ClapCommand {
        self.render().to_command()
    }

    /// Parses raw arguments (without the command path) into [`Arguments`].
    ///
    /// Required arguments are collected positionally in parameter order.
    /// Optional ones are bound by name, and only when the parser saw an
    /// explicit value or applied a default.
    pub fn parse<I, S>(&self, raw: I) -> Result<Arguments, clap::Error>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let config = self.render();
        let argv = std::iter::once(config.name.clone()).chain(raw.into_iter().map(Into::into));
        let matches = config.to_command().try_get_matches_from(argv)?;

        let mut args =
            Arguments::new(self.parameter_order.clone()).with_defaults(self.defaults.clone());
        for (spec, directive) in self.arguments.iter().zip(&config.args) {
            let value = directive.extract(&matches);
            if spec.is_required() {
                args.push_positional(spec.name(), value.unwrap_or(Value::Null));
            } else if let Some(value) = value {
                args.insert_keyword(spec.name(), value);
            }
        }

        tracing::trace!(command = %config.name, ?args, "parsed arguments");
        Ok(args)
    }

    /// Runs the handler. Domain errors become [`Outcome::DomainFailure`];
    /// any other error is returned as-is.
    pub fn execute(&mut self, args: &Arguments) -> CallResult<Outcome> {
        Outcome::from_result(self.handler.call(args))
    }
}

impl fmt::Debug for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandSpec")
            .field("name", &self.name)
            .field("namespace", &self.namespace)
            .field("description", &self.description)
            .field("parameter_order", &self.parameter_order)
            .field("arguments", &self.arguments)
            .finish_non_exhaustive()
    }
}

/// Fluent construction of a closure-backed [`CommandSpec`].
///
/// Argument overrides are applied after the signature-derived specs exist,
/// so they are validated against the signature.
pub struct CommandBuilder {
    name: String,
    signature: Signature,
    namespace: Option<String>,
    description: Option<String>,
    overrides: Vec<ArgSpec>,
}

impl CommandBuilder {
    pub fn new(name: impl Into<String>, signature: Signature) -> Self {
        Self {
            name: name.into(),
            signature,
            namespace: None,
            description: None,
            overrides: Vec::new(),
        }
    }

    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Sets the description. Empty text leaves the default in place.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        let description = description.into();
        if !description.trim().is_empty() {
            self.description = Some(description);
        }
        self
    }

    /// Adds an argument override.
    pub fn arg(mut self, arg: ArgSpec) -> Self {
        self.overrides.push(arg);
        self
    }

    /// Finishes the command with a closure handler.
    pub fn build<F, T, E>(self, f: F) -> Result<CommandSpec, RegistrationError>
    where
        F: FnMut(&Arguments) -> Result<T, E> + 'static,
        T: Serialize + 'static,
        E: Into<anyhow::Error> + 'static,
    {
        self.build_with_handler(Box::new(FnHandler::new(f)))
    }

    /// Finishes the command with an already boxed handler.
    pub fn build_with_handler(
        self,
        handler: Box<dyn Handler>,
    ) -> Result<CommandSpec, RegistrationError> {
        let mut spec = CommandSpec::new(self.name, &self.signature, handler)?;
        spec.namespace = self.namespace;
        if let Some(description) = self.description {
            spec.description = description;
        }
        for arg in self.overrides {
            spec.add_argument(arg)?;
        }
        Ok(spec)
    }
}

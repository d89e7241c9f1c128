//! Error types for registration and dispatch.
//!
//! Registration-time errors ([`SignatureError`], [`ArgumentError`]) fail fast
//! while the registry is being built. Dispatch-time errors are either
//! recoverable ([`UnknownCommandError`], [`DomainError`]) or faults carried as
//! plain `anyhow::Error` values that propagate to the caller.

use thiserror::Error;

/// A declared signature has a shape the pipeline cannot turn into arguments.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignatureError {
    /// The callable accepts a variadic positional parameter.
    #[error("variadic parameter `{0}` is not supported")]
    Variadic(String),

    /// The callable accepts a variadic keyword parameter.
    #[error("keyword-variadic parameter `{0}` is not supported")]
    KeywordVariadic(String),

    /// A parameter without a default follows one that has a default.
    #[error("required parameter `{name}` follows optional parameter `{after}`")]
    RequiredAfterOptional { name: String, after: String },

    /// The same parameter name was declared twice.
    #[error("parameter `{0}` is declared more than once")]
    DuplicateParameter(String),

    /// A bound signature is missing its receiver parameter.
    #[error("bound signature has no receiver parameter")]
    MissingReceiver,
}

/// An argument override references a parameter the command does not have.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArgumentError {
    #[error("invalid argument `{name}`: `{command}` has no such parameter")]
    UnknownParameter { name: String, command: String },
}

/// Dispatch asked for a command path that is not registered.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid command `{path}`")]
pub struct UnknownCommandError {
    pub path: String,
}

impl UnknownCommandError {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

/// An expected, displayable failure raised by command logic.
///
/// Handlers return it through `anyhow` (`Err(DomainError::new("..").into())`
/// or `?`); the dispatcher recognises it by downcasting and turns it into an
/// [`Outcome::DomainFailure`](crate::Outcome::DomainFailure) instead of
/// propagating it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct DomainError {
    pub message: String,
}

impl DomainError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Errors raised by guarded registry operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("duplicate command: {0}")]
    DuplicateCommand(String),

    #[error(transparent)]
    UnknownCommand(#[from] UnknownCommandError),
}

/// Any failure while building and registering a command.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    #[error(transparent)]
    Signature(#[from] SignatureError),

    #[error(transparent)]
    Argument(#[from] ArgumentError),

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

impl From<UnknownCommandError> for RegistrationError {
    fn from(e: UnknownCommandError) -> Self {
        RegistrationError::Registry(RegistryError::UnknownCommand(e))
    }
}

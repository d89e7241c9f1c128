//! Command dispatch.
//!
//! The [`Dispatcher`] takes a raw argument vector (program name already
//! removed), resolves the first token to a registered command, parses the
//! rest through that command's parser and runs its handler:
//!
//! ```text
//! AwaitingCommand ── resolve ──► Executing ── execute ──► Succeeded | Failed
//!        │
//!        └── empty / -h / --help / unknown path ──► usage listing
//! ```
//!
//! An unknown path is never an error at this level: it is reported as
//! [`Dispatch::Usage`] so the caller can print the command listing. Domain
//! errors come back inside [`Outcome::DomainFailure`]. Parse errors (which
//! include a command's own `--help`) come back as [`Dispatch::Rejected`].
//! Only faults raised by handlers leave [`Dispatcher::dispatch`] as `Err`.

use crate::command::CommandSpec;
use crate::error::UnknownCommandError;
use crate::handler::{Arguments, CallResult, Outcome};
use crate::registry::Registry;

/// Tokens that request the global usage listing.
pub const HELP_FLAGS: [&str; 2] = ["-h", "--help"];

/// Where the dispatcher is in its lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchState {
    AwaitingCommand,
    Executing { path: String },
    Succeeded,
    Failed,
}

/// What the first token of the argument vector selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// No command, or an explicit help request.
    Usage,
    /// A registered command and the arguments that follow it.
    Command { path: String, rest: Vec<String> },
}

/// Result of a full dispatch.
#[derive(Debug)]
pub enum Dispatch {
    /// Show the usage listing; `unknown` is set when an unregistered path
    /// was requested.
    Usage { unknown: Option<UnknownCommandError> },
    /// The command's parser refused the arguments (or printed its help).
    Rejected { path: String, error: clap::Error },
    /// The command ran.
    Completed { path: String, outcome: Outcome },
}

/// Resolves, parses and executes commands from a [`Registry`].
#[derive(Debug)]
pub struct Dispatcher<'r> {
    registry: &'r mut Registry,
    state: DispatchState,
}

impl<'r> Dispatcher<'r> {
    pub fn new(registry: &'r mut Registry) -> Self {
        Self {
            registry,
            state: DispatchState::AwaitingCommand,
        }
    }

    pub fn state(&self) -> &DispatchState {
        &self.state
    }

    pub fn registry(&self) -> &Registry {
        self.registry
    }

    /// Selects the command named by the first token.
    pub fn resolve<S: AsRef<str>>(&self, raw: &[S]) -> Result<Resolution, UnknownCommandError> {
        let Some((first, rest)) = raw.split_first() else {
            return Ok(Resolution::Usage);
        };
        let path = first.as_ref();
        if HELP_FLAGS.contains(&path) {
            return Ok(Resolution::Usage);
        }

        self.registry.lookup(path)?;
        tracing::debug!(%path, "resolved command");
        Ok(Resolution::Command {
            path: path.to_string(),
            rest: rest.iter().map(|s| s.as_ref().to_string()).collect(),
        })
    }

    /// Parses `rest` through the command's rendered parser.
    pub fn parse(command: &CommandSpec, rest: &[String]) -> Result<Arguments, clap::Error> {
        command.parse(rest.iter().cloned())
    }

    /// Runs the command's handler on parsed arguments.
    pub fn execute(command: &mut CommandSpec, args: &Arguments) -> CallResult<Outcome> {
        command.execute(args)
    }

    /// Parses and executes an already resolved command.
    pub fn run(&mut self, path: &str, rest: &[String]) -> CallResult<Dispatch> {
        let command = self.registry.lookup_mut(path)?;

        let args = match Self::parse(command, rest) {
            Ok(args) => args,
            Err(error) => {
                tracing::debug!(%path, kind = ?error.kind(), "arguments rejected");
                self.state = DispatchState::Failed;
                return Ok(Dispatch::Rejected {
                    path: path.to_string(),
                    error,
                });
            }
        };

        self.state = DispatchState::Executing {
            path: path.to_string(),
        };
        tracing::debug!(%path, "executing command");

        match Self::execute(command, &args) {
            Ok(outcome) => {
                if let Outcome::DomainFailure(err) = &outcome {
                    tracing::debug!(%path, error = %err, "command reported a domain error");
                }
                self.state = DispatchState::Succeeded;
                Ok(Dispatch::Completed {
                    path: path.to_string(),
                    outcome,
                })
            }
            Err(fault) => {
                self.state = DispatchState::Failed;
                Err(fault)
            }
        }
    }

    /// Resolves, parses and executes in one step.
    pub fn dispatch<S: AsRef<str>>(&mut self, raw: &[S]) -> CallResult<Dispatch> {
        match self.resolve(raw) {
            Ok(Resolution::Usage) => Ok(Dispatch::Usage { unknown: None }),
            Ok(Resolution::Command { path, rest }) => self.run(&path, &rest),
            Err(unknown) => {
                tracing::debug!(path = %unknown.path, "unknown command");
                Ok(Dispatch::Usage {
                    unknown: Some(unknown),
                })
            }
        }
    }
}

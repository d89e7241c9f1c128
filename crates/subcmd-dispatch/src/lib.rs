//! Function-backed subcommands for clap-based CLIs.
//!
//! `subcmd-dispatch` turns ordinary callables into subcommands. Each command
//! declares a [`Signature`]; the crate derives one [`ArgSpec`] per parameter,
//! merges user overrides, renders the result as a clap parser, and routes
//! argument vectors to the right handler.
//!
//! # Pipeline
//!
//! ```text
//! Signature ─ inspect ─► ArgSpec* ─ overrides ─► ParserConfig ─► clap::Command
//!                                                                      │
//! raw args ─► Dispatcher::resolve ─► CommandSpec::parse ─► Arguments ──┘
//!                                              │
//!                                              └─► Handler::call ─► Outcome
//! ```
//!
//! # Derivation rules
//!
//! - a parameter without a default is required and renders as a bare
//!   positional
//! - a default wrapped with [`positional`] renders as an optional positional
//! - a default of `false` renders as a `--name` switch
//! - any other default renders as `--name VALUE` with the default's type
//!
//! # Errors
//!
//! Handlers return [`CallResult`]. A [`DomainError`] is a normal, displayable
//! result and comes back as [`Outcome::DomainFailure`]; any other error is a
//! fault and propagates to the caller.
//!
//! # Example
//!
//! ```rust
//! use subcmd_dispatch::{Arguments, Dispatch, Dispatcher, Outcome, Registry, Signature};
//! use serde_json::json;
//!
//! let mut registry = Registry::new();
//! registry.command(
//!     "greet",
//!     Signature::new().arg("name").opt("loud", false),
//!     |args: &Arguments| {
//!         let name: String = args.get("name")?;
//!         let loud: bool = args.get("loud")?;
//!         Ok::<_, anyhow::Error>(if loud { name.to_uppercase() } else { name })
//!     },
//! )?;
//!
//! let mut dispatcher = Dispatcher::new(&mut registry);
//! match dispatcher.dispatch(&["greet", "ada", "--loud"])? {
//!     Dispatch::Completed { outcome, .. } => assert_eq!(outcome, Outcome::Value(json!("ADA"))),
//!     other => panic!("unexpected {:?}", other),
//! }
//! # Ok::<(), anyhow::Error>(())
//! ```

mod arg;
mod command;
mod dispatch;
mod error;
mod handler;
mod parser;
mod registry;
mod signature;
mod value;

pub use arg::{ArgOptions, ArgSpec, NO_DESCRIPTION};
pub use command::{command_name_for, command_path, CommandBuilder, CommandSpec};
pub use dispatch::{Dispatch, DispatchState, Dispatcher, Resolution, HELP_FLAGS};
pub use error::{
    ArgumentError, DomainError, RegistrationError, RegistryError, SignatureError,
    UnknownCommandError,
};
pub use handler::{Arguments, CallResult, Command, CommandHandler, FnHandler, Handler, Outcome};
pub use parser::{ArgDirective, ArgShape, ParserConfig};
pub use registry::Registry;
pub use signature::{Inspected, Param, ParamKind, Signature, RECEIVER};
pub use value::{positional, DefaultValue, TypeHint};

// Re-export for the `#[command]` macro's generated code and for callers that
// build values by hand.
pub use serde_json::{json, Value};

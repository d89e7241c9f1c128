//! # Subcmd - Functions as subcommands
//!
//! `subcmd` turns plain functions and [`Command`] types into subcommands of
//! one program. Each command's arguments are derived from its parameters,
//! commands are addressed by dotted paths (`namespace.name`), and the
//! program prints a grouped listing of everything it can do.
//!
//! ## Crates
//!
//! - [`subcmd_dispatch`]: signatures, argument derivation, the registry and
//!   the dispatcher
//! - [`subcmd_render`]: plain-text output of results
//! - [`subcmd_input`]: `.env` loading
//! - [`subcmd_macros`]: the [`command`] attribute
//!
//! This crate re-exports all of them and adds [`cli::App`], which wires a
//! registry to the process arguments.
//!
//! ## Quick Start
//!
//! ```rust
//! use subcmd::cli::{App, RunResult};
//! use subcmd::{command, ColorChoice};
//!
//! /// Say hello
//! #[command]
//! fn greet(name: String, #[arg(default = false)] loud: bool) -> String {
//!     let line = format!("hello {}", name);
//!     if loud { line.to_uppercase() } else { line }
//! }
//!
//! let mut app = App::builder()
//!     .load_env(false)
//!     .color(ColorChoice::Never)
//!     .register(greet__command()?)
//!     .build();
//!
//! let result = app.run_to_string(["prog", "greet", "ada", "--loud"])?;
//! assert!(matches!(result, RunResult::Handled(ref s) if s == "HELLO ADA\n"));
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! ## Argument derivation
//!
//! | parameter                      | command-line form          |
//! |--------------------------------|----------------------------|
//! | no default                     | required positional        |
//! | default `false`                | `--name` switch            |
//! | any other default              | `--name <value>` option    |
//! | default wrapped in `positional`| optional positional        |

pub mod cli;

pub use subcmd_dispatch::{
    command_name_for, command_path, json, positional, ArgDirective, ArgOptions, ArgShape, ArgSpec,
    ArgumentError, Arguments, CallResult, Command, CommandBuilder, CommandHandler, CommandSpec,
    DefaultValue, Dispatch, DispatchState, Dispatcher, DomainError, FnHandler, Handler, Inspected,
    Outcome, Param, ParamKind, ParserConfig, RegistrationError, Registry, RegistryError,
    Resolution, Signature, SignatureError, TypeHint, UnknownCommandError, Value, HELP_FLAGS,
    NO_DESCRIPTION, RECEIVER,
};
pub use subcmd_input::{update_env, DotEnv, EnvError, DEFAULT_ENV_FILE};
pub use subcmd_macros::command;
pub use subcmd_render::{ColorChoice, Output, Theme};

//! Running a registry as a command-line program.
//!
//! [`App`] owns a [`Registry`](subcmd_dispatch::Registry) and turns an
//! argument vector into printed output:
//!
//! ```text
//! argv → resolve → (.env) → parse → execute → render → stdout
//! ```
//!
//! 1. Resolve: the first token selects a command by its dotted path. No
//!    token, `-h` or `--help` prints the usage listing; an unknown path
//!    prints an error line followed by the listing.
//! 2. Environment: unless disabled, `.env` is loaded into the process
//!    environment once a command has been selected.
//! 3. Parse: the rest of the vector goes through the command's own clap
//!    parser. Parse errors and per-command help are printed by clap.
//! 4. Execute and render: the return value is printed line by line, and a
//!    [`DomainError`](subcmd_dispatch::DomainError) prints as a single
//!    highlighted line. Other errors propagate to the caller.
//!
//! [`App::run_to_string`] performs the same steps without printing, which is
//! what tests use.

mod app;
mod builder;
pub mod help;

pub use app::{App, RunResult};
pub use builder::AppBuilder;
pub use help::render_usage;

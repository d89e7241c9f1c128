//! Environment loading for subcmd applications.
//!
//! Before a resolved command runs, `subcmd` loads a `.env` file from the
//! working directory into the process environment. This crate holds that
//! logic:
//!
//! - [`parse_env`] turns `KEY=value` lines into a map, stripping matching
//!   single or double quotes around values
//! - [`DotEnv`] locates, reads and applies a file; a missing file is not an
//!   error
//! - [`EnvReader`]/[`EnvWriter`] abstract the process environment so tests
//!   can use [`MockEnv`]
//!
//! ```
//! use subcmd_input::{parse_env, EnvReader, EnvWriter, MockEnv};
//!
//! let vars = parse_env("key=\"value\"\nother=plain");
//! let mut env = MockEnv::new();
//! for (k, v) in &vars {
//!     env.set_var(k, v);
//! }
//! assert_eq!(env.var("key").as_deref(), Some("value"));
//! assert_eq!(env.var("other").as_deref(), Some("plain"));
//! ```

pub mod env;
mod error;

pub use env::{
    parse_env, strip_quotes, update_env, DotEnv, EnvReader, EnvWriter, MockEnv, RealEnv,
    DEFAULT_ENV_FILE,
};
pub use error::EnvError;

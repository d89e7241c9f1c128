//! `manage`: a small management CLI built on subcmd.
//!
//! ```text
//! manage greet ada --loud
//! manage word_count "some text"
//! manage math.add 2 --b 40
//! manage config.get HOME
//! ```
//!
//! Set `SUBCMD_LOG=debug` to see dispatch logs on stderr.

mod commands;

use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "SUBCMD_LOG";

fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let mut app = commands::app()?;
    app.run_env()
}

//! The runnable application.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use console::Term;
use subcmd_dispatch::{Dispatch, Dispatcher, Outcome, Registry, Resolution};
use subcmd_input::{DotEnv, EnvError};
use subcmd_render::{ColorChoice, Output, Theme, ERROR};

use super::builder::AppBuilder;
use super::help::render_usage;

const DEFAULT_PROG: &str = "subcmd";

/// What one invocation produced.
#[derive(Debug)]
pub enum RunResult {
    /// A command ran and rendered this text (a domain error included).
    Handled(String),
    /// A command ran and returned nothing to print.
    Silent,
    /// The usage listing was requested.
    Usage(String),
    /// The requested path is not registered; the text holds the error line
    /// followed by the usage listing.
    InvalidCommand(String),
    /// The command's parser refused its arguments, or printed its own help.
    Rejected(clap::Error),
}

impl RunResult {
    /// Text to write to stdout, if any.
    pub fn output(&self) -> Option<&str> {
        match self {
            RunResult::Handled(text) | RunResult::Usage(text) | RunResult::InvalidCommand(text) => {
                Some(text)
            }
            RunResult::Silent | RunResult::Rejected(_) => None,
        }
    }

    pub fn is_handled(&self) -> bool {
        matches!(self, RunResult::Handled(_) | RunResult::Silent)
    }
}

/// A registry of commands wired to argv, `.env` and stdout.
#[derive(Debug)]
pub struct App {
    registry: Registry,
    prog: Option<String>,
    load_env: bool,
    env_file: Option<PathBuf>,
    color: ColorChoice,
    theme: Theme,
}

impl App {
    pub fn builder() -> AppBuilder {
        AppBuilder::new()
    }

    pub(crate) fn from_parts(
        registry: Registry,
        prog: Option<String>,
        load_env: bool,
        env_file: Option<PathBuf>,
        color: ColorChoice,
        theme: Theme,
    ) -> Self {
        Self {
            registry,
            prog,
            load_env,
            env_file,
            color,
            theme,
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    /// The env file loaded before execution, or `None` when loading is off.
    pub fn dot_env(&self) -> Result<Option<DotEnv>, EnvError> {
        if !self.load_env {
            return Ok(None);
        }
        match &self.env_file {
            Some(path) => Ok(Some(DotEnv::new(path))),
            None => DotEnv::in_current_dir().map(Some),
        }
    }

    fn styled(&self) -> bool {
        self.color.styled()
    }

    fn output(&self) -> Output {
        Output::new(self.theme.clone(), self.styled())
    }

    /// The usage listing for `prog`.
    pub fn usage(&self, prog: &str) -> String {
        render_usage(&self.registry, prog, &self.theme, self.styled())
    }

    fn prog_name(&self, argv0: Option<&OsString>) -> String {
        if let Some(prog) = &self.prog {
            return prog.clone();
        }
        argv0
            .and_then(|arg| Path::new(arg).file_name())
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| DEFAULT_PROG.to_string())
    }

    /// Runs one invocation and returns what would be printed.
    ///
    /// `args` includes the program name, as from [`std::env::args_os`].
    /// Errors are failures of the command itself (anything but a
    /// [`DomainError`](subcmd_dispatch::DomainError)) and of env loading.
    pub fn run_to_string<I, T>(&mut self, args: I) -> anyhow::Result<RunResult>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let mut args = args.into_iter().map(Into::<OsString>::into);
        let prog = self.prog_name(args.next().as_ref());
        let raw: Vec<String> = args.map(|arg| arg.to_string_lossy().into_owned()).collect();

        let resolution = Dispatcher::new(&mut self.registry).resolve(&raw);
        let (path, rest) = match resolution {
            Ok(Resolution::Command { path, rest }) => (path, rest),
            Ok(Resolution::Usage) => return Ok(RunResult::Usage(self.usage(&prog))),
            Err(unknown) => {
                tracing::debug!(path = %unknown.path, "unknown command");
                let line = self.theme.paint(ERROR, &unknown.to_string(), self.styled());
                return Ok(RunResult::InvalidCommand(format!(
                    "{}\n\n{}",
                    line,
                    self.usage(&prog)
                )));
            }
        };

        if let Some(env) = self.dot_env()? {
            env.load()
                .with_context(|| format!("failed to load {}", env.path().display()))?;
        }

        let output = self.output();
        let dispatched = Dispatcher::new(&mut self.registry)
            .run(&path, &rest)
            .with_context(|| format!("command `{}` failed", path))?;

        match dispatched {
            Dispatch::Completed { outcome, .. } => Ok(match outcome {
                Outcome::Value(value) => {
                    let text = output.render(&value);
                    if text.is_empty() {
                        RunResult::Silent
                    } else {
                        RunResult::Handled(text)
                    }
                }
                Outcome::DomainFailure(err) => {
                    RunResult::Handled(output.render_error(&err.to_string()))
                }
            }),
            Dispatch::Rejected { error, .. } => Ok(RunResult::Rejected(error)),
            Dispatch::Usage { .. } => Ok(RunResult::Usage(self.usage(&prog))),
        }
    }

    /// Runs one invocation and prints its output.
    ///
    /// The exit code is success except when the command's parser rejected
    /// its arguments.
    pub fn run<I, T>(&mut self, args: I) -> anyhow::Result<ExitCode>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let result = self.run_to_string(args)?;
        if let Some(text) = result.output() {
            Term::stdout()
                .write_str(text)
                .context("failed to write output")?;
        }
        match result {
            RunResult::Rejected(err) => {
                let code = err.exit_code();
                err.print().context("failed to write parser message")?;
                Ok(ExitCode::from(u8::try_from(code).unwrap_or(1)))
            }
            _ => Ok(ExitCode::SUCCESS),
        }
    }

    /// Runs with the process arguments.
    pub fn run_env(&mut self) -> anyhow::Result<ExitCode> {
        self.run(std::env::args_os())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use subcmd_dispatch::{Arguments, DomainError, Signature};

    fn app() -> App {
        App::builder()
            .prog_name("manage")
            .load_env(false)
            .color(ColorChoice::Never)
            .command("echo", Signature::new().arg("text"), |args: &Arguments| {
                args.get::<String>("text")
            })
            .unwrap()
            .command("quiet", Signature::new(), |_: &Arguments| Ok::<_, anyhow::Error>(()))
            .unwrap()
            .command("refuse", Signature::new(), |_: &Arguments| {
                Err::<(), _>(DomainError::new("not allowed"))
            })
            .unwrap()
            .command("boom", Signature::new(), |_: &Arguments| {
                Err::<(), _>(anyhow::anyhow!("kaput"))
            })
            .unwrap()
            .build()
    }

    #[test]
    fn test_handled_output() {
        let result = app().run_to_string(["manage", "echo", "hi"]).unwrap();
        assert!(matches!(result, RunResult::Handled(ref s) if s == "hi\n"));
    }

    #[test]
    fn test_silent_output() {
        let result = app().run_to_string(["manage", "quiet"]).unwrap();
        assert!(matches!(result, RunResult::Silent));
        assert!(result.is_handled());
    }

    #[test]
    fn test_domain_error_is_output() {
        let result = app().run_to_string(["manage", "refuse"]).unwrap();
        assert!(matches!(result, RunResult::Handled(ref s) if s == "not allowed\n"));
    }

    #[test]
    fn test_fault_propagates_with_context() {
        let err = app().run_to_string(["manage", "boom"]).unwrap_err();
        assert_eq!(err.to_string(), "command `boom` failed");
        assert_eq!(err.root_cause().to_string(), "kaput");
    }

    #[test]
    fn test_usage_requests() {
        for argv in [vec!["manage"], vec!["manage", "-h"], vec!["manage", "--help"]] {
            let result = app().run_to_string(argv).unwrap();
            let RunResult::Usage(text) = result else {
                panic!("expected usage");
            };
            assert!(text.contains("manage [<namespace>.]<command> [<args>]"));
            assert!(text.contains("available commands:"));
        }
    }

    #[test]
    fn test_invalid_command() {
        let result = app().run_to_string(["manage", "nope"]).unwrap();
        let RunResult::InvalidCommand(text) = result else {
            panic!("expected invalid command");
        };
        assert!(text.starts_with("Invalid command `nope`\n\n"));
        assert!(text.contains("available commands:"));
    }

    #[test]
    fn test_rejected_arguments() {
        let result = app().run_to_string(["manage", "echo"]).unwrap();
        assert!(result.output().is_none());
        let RunResult::Rejected(err) = result else {
            panic!("expected rejection");
        };
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_prog_name_from_argv0() {
        let app = App::builder().load_env(false).build();
        assert_eq!(app.prog_name(Some(&OsString::from("/usr/bin/tool"))), "tool");
        assert_eq!(app.prog_name(None), DEFAULT_PROG);
    }
}

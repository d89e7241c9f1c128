//! The commands of `manage`.

#![allow(non_snake_case)] // #[command] constructors use the __command suffix

use serde::Serialize;
use subcmd::cli::App;
use subcmd::{Arguments, CallResult, Command, DomainError, Registry, Signature};
use subcmd_macros::command;

/// Say hello
#[command]
pub fn greet(
    name: String,
    #[arg(default = "hello".to_string(), positional)] greeting: String,
    #[arg(default = false, help = "shout the greeting")] loud: bool,
) -> String {
    let line = format!("{} {}", greeting, name);
    if loud {
        line.to_uppercase()
    } else {
        line
    }
}

#[derive(Debug, Serialize)]
pub struct Counts {
    characters: usize,
    words: usize,
}

/// Counts characters and words of a text.
#[derive(Debug, Default)]
pub struct WordCount {
    runs: usize,
}

impl Command for WordCount {
    type Output = Counts;

    fn signature(&self) -> Signature {
        Signature::method().arg("text")
    }

    fn description(&self) -> Option<String> {
        Some("Count characters and words".into())
    }

    fn run(&mut self, args: &Arguments) -> CallResult<Counts> {
        self.runs += 1;
        tracing::debug!(runs = self.runs, "counting");
        let text: String = args.get("text")?;
        Ok(Counts {
            characters: text.chars().count(),
            words: text.split_whitespace().count(),
        })
    }
}

/// Add two numbers
#[command]
pub fn add(a: i64, #[arg(default = 1, short = 'b')] b: i64) -> i64 {
    a + b
}

/// Divide two numbers
#[command]
pub fn divide(a: f64, b: f64) -> Result<f64, DomainError> {
    if b == 0.0 {
        return Err(DomainError::new("cannot divide by zero"));
    }
    Ok(a / b)
}

/// Print an environment variable
#[command(namespace = "config")]
pub fn get(name: String) -> Option<String> {
    std::env::var(name).ok()
}

fn math() -> anyhow::Result<Registry> {
    let mut math = Registry::new();
    math.register(add__command()?);
    math.register(divide__command()?);
    Ok(math)
}

pub fn app() -> anyhow::Result<App> {
    let app = App::builder()
        .prog_name("manage")
        .register(greet__command()?)
        .add_command(WordCount::default())?
        .register(get__command()?)
        .merge(math()?, Some("math"))
        .build();
    Ok(app)
}

//! End-to-end tests of `App`: usage listing, invalid commands, output and
//! `.env` loading.
//!
//! Tests that touch the process environment or the working directory are
//! marked `#[serial]`.

#![allow(non_snake_case)] // #[command] constructors use the __command suffix

use serial_test::serial;
use std::fs;
use subcmd::cli::{App, RunResult};
use subcmd::{
    command, ArgSpec, Arguments, CallResult, ColorChoice, Command, DomainError, Registry,
    Signature, TypeHint,
};
use tempfile::TempDir;

struct ClassBased;

impl Command for ClassBased {
    type Output = String;

    fn signature(&self) -> Signature {
        Signature::method().arg("name").opt("capitalyze", false)
    }

    fn run(&mut self, args: &Arguments) -> CallResult<String> {
        let name: String = args.get("name")?;
        Ok(if args.get::<bool>("capitalyze")? {
            name.to_uppercase()
        } else {
            name
        })
    }
}

/// namespaced command
#[command(namespace = "my_namespace")]
fn namespaced(name: String) -> String {
    name
}

#[command]
fn raises() -> Result<(), DomainError> {
    Err(DomainError::new("No way dude!"))
}

/// Print an environment variable
#[command]
fn getenv(name: String) -> Option<String> {
    std::env::var(name).ok()
}

fn math() -> Registry {
    let mut math = Registry::new();
    math.command_with(
        "add",
        Signature::new().arg("a").opt("b", 1),
        |args: &Arguments| -> CallResult<i64> { Ok(args.get::<i64>("a")? + args.get::<i64>("b")?) },
        |cfg| cfg.description("Add two numbers"),
    )
    .unwrap();
    math
}

fn app() -> App {
    App::builder()
        .prog_name("manage")
        .load_env(false)
        .color(ColorChoice::Never)
        .add_command(ClassBased)
        .unwrap()
        .register(namespaced__command().unwrap())
        .register(raises__command().unwrap())
        .register(getenv__command().unwrap())
        .merge(math(), Some("math"))
        .arg("math.add", ArgSpec::new("a").type_hint(TypeHint::Int))
        .unwrap()
        .build()
}

fn text(result: RunResult) -> String {
    match result {
        RunResult::Handled(text) | RunResult::Usage(text) | RunResult::InvalidCommand(text) => text,
        other => panic!("expected text, got {:?}", other),
    }
}

#[test]
fn usage_lists_commands_by_namespace() {
    let out = text(app().run_to_string(["manage"]).unwrap());

    let listing = out.split("available commands:\n").nth(1).unwrap();
    let expected = [
        format!("  {:<25}no description", "class_based"),
        format!("  {:<25}Print an environment variable", "getenv"),
        format!("  {:<25}no description", "raises"),
        String::new(),
        "  [math]".to_string(),
        format!("    {:<23}Add two numbers", "add"),
        String::new(),
        "  [my_namespace]".to_string(),
        format!("    {:<23}namespaced command", "namespaced"),
    ]
    .join("\n")
        + "\n";
    assert_eq!(listing, expected);
}

#[test]
fn invalid_command_prints_error_then_usage() {
    let out = text(app().run_to_string(["manage", "my_namespace"]).unwrap());
    assert!(out.starts_with("Invalid command `my_namespace`\n\n"));
    assert!(out.contains("manage [<namespace>.]<command> [<args>]"));
    assert!(out.contains("available commands:"));
}

#[test]
fn commands_render_their_results() {
    let mut app = app();
    assert_eq!(text(app.run_to_string(["manage", "class_based", "ada"]).unwrap()), "ada\n");
    assert_eq!(
        text(app.run_to_string(["manage", "class_based", "ada", "--capitalyze"]).unwrap()),
        "ADA\n"
    );
    assert_eq!(
        text(app.run_to_string(["manage", "my_namespace.namespaced", "x"]).unwrap()),
        "x\n"
    );
    assert_eq!(
        text(app.run_to_string(["manage", "math.add", "2", "--b", "40"]).unwrap()),
        "42\n"
    );
}

#[test]
fn domain_error_prints_message() {
    let out = text(app().run_to_string(["manage", "raises"]).unwrap());
    assert_eq!(out, "No way dude!\n");
}

#[test]
fn domain_error_is_styled_when_color_forced() {
    let mut app = App::builder()
        .load_env(false)
        .color(ColorChoice::Always)
        .register(raises__command().unwrap())
        .build();
    let out = text(app.run_to_string(["manage", "raises"]).unwrap());
    assert_ne!(out, "No way dude!\n");
    assert_eq!(console::strip_ansi_codes(&out), "No way dude!\n");
}

#[test]
fn bad_arguments_are_rejected() {
    let result = app().run_to_string(["manage", "math.add", "two"]).unwrap();
    assert!(matches!(result, RunResult::Rejected(_)));
}

#[test]
#[serial]
fn env_file_is_loaded_before_the_command_runs() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("app.env");
    fs::write(&path, "SUBCMD_APP_TEST_FILE=\"from file\"\n").unwrap();

    let mut app = App::builder()
        .env_file(&path)
        .register(getenv__command().unwrap())
        .build();
    let out = text(app.run_to_string(["manage", "getenv", "SUBCMD_APP_TEST_FILE"]).unwrap());
    std::env::remove_var("SUBCMD_APP_TEST_FILE");

    assert_eq!(out, "from file\n");
}

#[test]
#[serial]
fn dot_env_in_working_directory_is_loaded() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join(".env"), "SUBCMD_APP_TEST_CWD='here'\n").unwrap();

    let previous = std::env::current_dir().unwrap();
    std::env::set_current_dir(dir.path()).unwrap();
    let mut app = App::builder().register(getenv__command().unwrap()).build();
    let result = app.run_to_string(["manage", "getenv", "SUBCMD_APP_TEST_CWD"]);
    std::env::set_current_dir(previous).unwrap();
    std::env::remove_var("SUBCMD_APP_TEST_CWD");

    assert_eq!(text(result.unwrap()), "here\n");
}

#[test]
#[serial]
fn env_is_not_loaded_for_usage() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("app.env");
    fs::write(&path, "SUBCMD_APP_TEST_USAGE=1\n").unwrap();

    let mut app = App::builder()
        .env_file(&path)
        .register(getenv__command().unwrap())
        .build();
    app.run_to_string(["manage"]).unwrap();

    assert!(std::env::var("SUBCMD_APP_TEST_USAGE").is_err());
}

#[test]
#[serial]
fn env_loading_can_be_disabled() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("app.env");
    fs::write(&path, "SUBCMD_APP_TEST_OFF=1\n").unwrap();

    let mut app = App::builder()
        .env_file(&path)
        .load_env(false)
        .register(getenv__command().unwrap())
        .build();
    let result = app.run_to_string(["manage", "getenv", "SUBCMD_APP_TEST_OFF"]).unwrap();

    assert!(matches!(result, RunResult::Silent));
}

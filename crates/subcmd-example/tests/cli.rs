//! End-to-end tests of the `manage` binary.

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// `manage` run in an empty directory so no stray `.env` is picked up.
fn manage(dir: &TempDir) -> Command {
    let mut cmd = cargo_bin_cmd!("manage");
    cmd.current_dir(dir.path()).env("NO_COLOR", "1");
    cmd
}

#[test]
fn no_arguments_prints_usage() {
    let dir = TempDir::new().unwrap();
    manage(&dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("manage [<namespace>.]<command> [<args>]"))
        .stdout(predicate::str::contains("available commands:"))
        .stdout(predicate::str::contains("  [math]\n"))
        .stdout(predicate::str::contains(format!("    {:<23}Add two numbers", "add")));
}

#[test]
fn help_flag_prints_usage() {
    let dir = TempDir::new().unwrap();
    manage(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("  {:<25}Say hello", "greet")));
}

#[test]
fn unknown_command_prints_error_and_usage() {
    let dir = TempDir::new().unwrap();
    manage(&dir)
        .arg("math")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Invalid command `math`\n\n"))
        .stdout(predicate::str::contains("available commands:"));
}

#[test]
fn greet_with_switch_and_positional_default() {
    let dir = TempDir::new().unwrap();
    manage(&dir)
        .args(["greet", "ada"])
        .assert()
        .success()
        .stdout("hello ada\n");
    manage(&dir)
        .args(["greet", "ada", "hi", "--loud"])
        .assert()
        .success()
        .stdout("HI ADA\n");
}

#[test]
fn command_type_renders_mapping() {
    let dir = TempDir::new().unwrap();
    manage(&dir)
        .args(["word_count", "one two three"])
        .assert()
        .success()
        .stdout(format!("{:<25}13\n{:<25}3\n", "characters", "words"));
}

#[test]
fn merged_namespace_commands() {
    let dir = TempDir::new().unwrap();
    manage(&dir)
        .args(["math.add", "2", "-b", "40"])
        .assert()
        .success()
        .stdout("42\n");
    manage(&dir)
        .args(["math.divide", "1", "4"])
        .assert()
        .success()
        .stdout("0.25\n");
}

#[test]
fn negative_numbers_are_accepted() {
    let dir = TempDir::new().unwrap();
    manage(&dir)
        .args(["math.add", "-5", "-b", "-3"])
        .assert()
        .success()
        .stdout("-8\n");
}

#[test]
fn domain_error_prints_message_and_succeeds() {
    let dir = TempDir::new().unwrap();
    manage(&dir)
        .args(["math.divide", "1", "0"])
        .assert()
        .success()
        .stdout("cannot divide by zero\n");
}

#[test]
fn invalid_arguments_fail_with_parser_message() {
    let dir = TempDir::new().unwrap();
    manage(&dir)
        .args(["math.add", "two"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("invalid value 'two'"));
}

#[test]
fn dot_env_is_loaded() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join(".env"), "MANAGE_TEST_GREETING=\"from dotenv\"\n").unwrap();
    manage(&dir)
        .args(["config.get", "MANAGE_TEST_GREETING"])
        .assert()
        .success()
        .stdout("from dotenv\n");
}

#[test]
fn logs_go_to_stderr() {
    let dir = TempDir::new().unwrap();
    manage(&dir)
        .env("SUBCMD_LOG", "debug")
        .args(["greet", "ada"])
        .assert()
        .success()
        .stdout("hello ada\n")
        .stderr(predicate::str::contains("executing command"));
}

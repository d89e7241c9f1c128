//! Integration tests for subcmd-input.
//!
//! Tests that touch the process environment or the working directory are
//! marked `#[serial]`.

use serial_test::serial;
use std::fs;
use subcmd_input::{update_env, DotEnv, EnvError, EnvReader, MockEnv, RealEnv};
use tempfile::TempDir;

fn write_env(dir: &TempDir, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(".env");
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn load_into_mock() {
    let dir = TempDir::new().unwrap();
    let path = write_env(&dir, "key=\"value\"\nother=plain\n# ignored\n");

    let mut env = MockEnv::new();
    let count = DotEnv::new(&path).load_into(&mut env).unwrap();

    assert_eq!(count, 2);
    assert_eq!(env.var("key").as_deref(), Some("value"));
    assert_eq!(env.var("other").as_deref(), Some("plain"));
}

#[test]
fn missing_file_is_not_an_error() {
    let dir = TempDir::new().unwrap();
    let dotenv = DotEnv::new(dir.path().join(".env"));

    assert_eq!(dotenv.read().unwrap(), None);
    let mut env = MockEnv::new();
    assert_eq!(dotenv.load_into(&mut env).unwrap(), 0);
    assert!(env.is_empty());
}

#[test]
fn directory_is_skipped_like_a_missing_file() {
    let dir = TempDir::new().unwrap();
    fs::create_dir(dir.path().join(".env")).unwrap();
    let dotenv = DotEnv::new(dir.path().join(".env"));

    assert_eq!(dotenv.read().unwrap(), None);
    let mut env = MockEnv::new();
    assert_eq!(dotenv.load_into(&mut env).unwrap(), 0);
}

#[test]
fn read_error_names_the_path() {
    let err = EnvError::read(
        "/tmp/app.env",
        std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
    );
    assert!(matches!(err, EnvError::Read { .. }));
    assert!(err.to_string().contains("/tmp/app.env"));
}

#[test]
#[serial]
fn load_sets_process_env() {
    let dir = TempDir::new().unwrap();
    let path = write_env(&dir, "SUBCMD_INPUT_TEST_LOAD='loaded'");

    DotEnv::new(&path).load().unwrap();
    assert_eq!(
        RealEnv.var("SUBCMD_INPUT_TEST_LOAD").as_deref(),
        Some("loaded")
    );
    std::env::remove_var("SUBCMD_INPUT_TEST_LOAD");
}

#[test]
#[serial]
fn update_env_reads_working_directory() {
    let dir = TempDir::new().unwrap();
    write_env(&dir, "SUBCMD_INPUT_TEST_CWD=from cwd");

    let previous = std::env::current_dir().unwrap();
    std::env::set_current_dir(dir.path()).unwrap();
    let result = update_env();
    std::env::set_current_dir(previous).unwrap();

    assert_eq!(result.unwrap(), 1);
    assert_eq!(
        std::env::var("SUBCMD_INPUT_TEST_CWD").as_deref(),
        Ok("from cwd")
    );
    std::env::remove_var("SUBCMD_INPUT_TEST_CWD");
}

#[test]
#[serial]
fn update_env_without_file_is_a_no_op() {
    let dir = TempDir::new().unwrap();

    let previous = std::env::current_dir().unwrap();
    std::env::set_current_dir(dir.path()).unwrap();
    let result = update_env();
    std::env::set_current_dir(previous).unwrap();

    assert_eq!(result.unwrap(), 0);
}

//! `.env` parsing and loading.
//!
//! Process environment access goes through the [`EnvReader`] and
//! [`EnvWriter`] traits so tests can load into a [`MockEnv`] instead of
//! mutating the real environment.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{BTreeMap, HashMap};
use std::io;
use std::path::{Path, PathBuf};

use crate::EnvError;

/// Default env file name, looked up in the working directory.
pub const DEFAULT_ENV_FILE: &str = ".env";

/// One `KEY=value` assignment per line. Keys are ASCII word characters; the
/// value is the rest of the line. Anything else is ignored.
static ASSIGNMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?mR)^([A-Za-z_0-9]+)=(.*)$").unwrap());

const QUOTES: [char; 2] = ['\'', '"'];

/// Removes matching surrounding quotes.
///
/// Only applies when the value starts and ends with the same quote
/// character; every leading and trailing occurrence of that character is
/// then trimmed. Mismatched quotes are left alone.
pub fn strip_quotes(value: &str) -> &str {
    for quote in QUOTES {
        if value.starts_with(quote) && value.ends_with(quote) {
            return value.trim_matches(quote);
        }
    }
    value
}

/// Parses env file content into a key/value map.
///
/// Lines that are not assignments (comments, blanks, `export` prefixes) are
/// skipped. When a key repeats, the last assignment wins.
pub fn parse_env(content: &str) -> BTreeMap<String, String> {
    ASSIGNMENT
        .captures_iter(content)
        .map(|caps| (caps[1].to_string(), strip_quotes(&caps[2]).to_string()))
        .collect()
}

/// Abstraction over reading environment variables.
pub trait EnvReader {
    fn var(&self, name: &str) -> Option<String>;
}

/// Abstraction over setting environment variables.
pub trait EnvWriter {
    fn set_var(&mut self, name: &str, value: &str);
}

// === Real implementation ===

/// The process environment.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealEnv;

impl EnvReader for RealEnv {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

impl EnvWriter for RealEnv {
    fn set_var(&mut self, name: &str, value: &str) {
        std::env::set_var(name, value);
    }
}

// === Mock implementation for testing ===

/// In-memory environment for testing.
#[derive(Debug, Clone, Default)]
pub struct MockEnv {
    vars: HashMap<String, String>,
}

impl MockEnv {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an environment variable.
    pub fn with_var(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl EnvReader for MockEnv {
    fn var(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }
}

impl EnvWriter for MockEnv {
    fn set_var(&mut self, name: &str, value: &str) {
        self.vars.insert(name.to_string(), value.to_string());
    }
}

/// An env file to load before running a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DotEnv {
    path: PathBuf,
}

impl DotEnv {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `.env` in the current working directory.
    pub fn in_current_dir() -> Result<Self, EnvError> {
        let cwd = std::env::current_dir().map_err(EnvError::CurrentDir)?;
        Ok(Self::new(cwd.join(DEFAULT_ENV_FILE)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads and parses the file. A missing path, or one that is not a
    /// regular file, yields `None`.
    pub fn read(&self) -> Result<Option<BTreeMap<String, String>>, EnvError> {
        if self.path.exists() && !self.path.is_file() {
            tracing::trace!(path = %self.path.display(), "env path is not a file");
            return Ok(None);
        }
        match std::fs::read_to_string(&self.path) {
            Ok(content) => Ok(Some(parse_env(&content))),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                tracing::trace!(path = %self.path.display(), "no env file");
                Ok(None)
            }
            Err(err) => Err(EnvError::read(&self.path, err)),
        }
    }

    /// Sets every assignment of the file on `env`.
    ///
    /// Returns the number of variables set; a missing file sets none.
    pub fn load_into<W: EnvWriter + ?Sized>(&self, env: &mut W) -> Result<usize, EnvError> {
        let Some(vars) = self.read()? else {
            return Ok(0);
        };
        for (key, value) in &vars {
            env.set_var(key, value);
        }
        tracing::debug!(path = %self.path.display(), count = vars.len(), "loaded env file");
        Ok(vars.len())
    }

    /// Sets every assignment of the file on the process environment.
    pub fn load(&self) -> Result<usize, EnvError> {
        self.load_into(&mut RealEnv)
    }
}

/// Loads `.env` from the working directory into the process environment.
///
/// A missing file is not an error.
pub fn update_env() -> Result<usize, EnvError> {
    DotEnv::in_current_dir()?.load()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_parse_env_simple() {
        assert_eq!(parse_env("key=value"), map(&[("key", "value")]));
    }

    #[test]
    fn test_parse_env_quote() {
        assert_eq!(parse_env("key='value'"), map(&[("key", "value")]));
    }

    #[test]
    fn test_parse_env_double_quote() {
        assert_eq!(parse_env("key=\"value\""), map(&[("key", "value")]));
    }

    #[test]
    fn test_parse_env_multiline() {
        let env = "key=\"value\"\nanother_key=another value";
        assert_eq!(
            parse_env(env),
            map(&[("key", "value"), ("another_key", "another value")])
        );
    }

    #[test]
    fn test_parse_env_skips_noise() {
        let env = "# comment\n\nexport SKIPPED=1\nBAD KEY=x\nGOOD=1\r\nEMPTY=\n";
        assert_eq!(parse_env(env), map(&[("GOOD", "1"), ("EMPTY", "")]));
    }

    #[test]
    fn test_parse_env_last_wins() {
        assert_eq!(parse_env("a=1\na=2"), map(&[("a", "2")]));
    }

    #[test]
    fn test_parse_env_keeps_equals_in_value() {
        assert_eq!(parse_env("url=a=b"), map(&[("url", "a=b")]));
    }

    #[test]
    fn test_strip_quotes() {
        assert_eq!(strip_quotes("'v'"), "v");
        assert_eq!(strip_quotes("\"v\""), "v");
        assert_eq!(strip_quotes("''v''"), "v");
        assert_eq!(strip_quotes("'v\""), "'v\"");
        assert_eq!(strip_quotes("v'"), "v'");
        assert_eq!(strip_quotes("plain"), "plain");
    }

    #[test]
    fn test_mock_env() {
        let mut env = MockEnv::new().with_var("A", "1");
        env.set_var("B", "2");
        assert_eq!(env.var("A").as_deref(), Some("1"));
        assert_eq!(env.var("B").as_deref(), Some("2"));
        assert_eq!(env.var("C"), None);
        assert_eq!(env.len(), 2);
    }
}

//! Plain-text output of command results.
//!
//! Results arrive as `serde_json::Value`s and render line by line:
//!
//! | value          | output                                             |
//! |----------------|----------------------------------------------------|
//! | `null`         | nothing                                            |
//! | `""`           | one empty line                                     |
//! | array          | each item rendered in turn                         |
//! | object         | `key` padded to [`KEY_WIDTH`] and styled, then value |
//! | anything else  | its string form on one line                        |
//!
//! Domain errors render as one line in the error style.

use console::Term;
use serde::Serialize;
use serde_json::Value;
use std::io;

use crate::theme::{Theme, ERROR, KEY};

/// Column width for mapping keys.
pub const KEY_WIDTH: usize = 25;

/// Renders command results with a theme.
#[derive(Debug, Clone)]
pub struct Output {
    theme: Theme,
    styled: bool,
}

impl Output {
    pub fn new(theme: Theme, styled: bool) -> Self {
        Self { theme, styled }
    }

    /// Default theme, no styling.
    pub fn plain() -> Self {
        Self::new(Theme::default(), false)
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn is_styled(&self) -> bool {
        self.styled
    }

    /// Renders a result. Every emitted line ends with `\n`.
    pub fn render(&self, value: &Value) -> String {
        let mut out = String::new();
        self.render_into(&mut out, value);
        out
    }

    fn render_into(&self, out: &mut String, value: &Value) {
        match value {
            Value::Null => {}
            Value::Array(items) => {
                for item in items {
                    self.render_into(out, item);
                }
            }
            Value::Object(map) => {
                for (key, item) in map {
                    out.push_str(&self.theme.paint_padded(KEY, key, KEY_WIDTH, self.styled));
                    out.push_str(&scalar_text(item));
                    out.push('\n');
                }
            }
            other => {
                out.push_str(&scalar_text(other));
                out.push('\n');
            }
        }
    }

    /// Serializes `data` and renders it.
    pub fn render_data<T: Serialize + ?Sized>(&self, data: &T) -> Result<String, serde_json::Error> {
        Ok(self.render(&serde_json::to_value(data)?))
    }

    /// Renders a domain error message as one highlighted line.
    pub fn render_error(&self, message: &str) -> String {
        format!("{}\n", self.theme.paint(ERROR, message, self.styled))
    }

    /// Writes a rendered result to stdout.
    pub fn print(&self, value: &Value) -> io::Result<()> {
        Term::stdout().write_str(&self.render(value))
    }

    /// Writes a domain error line to stdout.
    pub fn print_error(&self, message: &str) -> io::Result<()> {
        Term::stdout().write_str(&self.render_error(message))
    }
}

impl Default for Output {
    fn default() -> Self {
        Self::plain()
    }
}

/// The one-line text of a value: strings raw, everything else as JSON.
pub fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

//! Named styles and colour choice.
//!
//! Output uses three roles: mapping keys, domain errors and namespace headers
//! in the usage listing. A [`Theme`] maps role names to `console` styles;
//! [`Theme::default`] gives keys blue and the other two red.
//!
//! ```rust
//! use subcmd_render::{Theme, KEY};
//! use console::Style;
//!
//! let theme = Theme::default().add(KEY, Style::new().cyan().bold());
//! assert!(theme.get(KEY).is_some());
//! ```

use console::Style;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::util::display_width;

/// Style name for mapping keys.
pub const KEY: &str = "key";
/// Style name for domain error lines.
pub const ERROR: &str = "error";
/// Style name for namespace headers in the usage listing.
pub const NAMESPACE: &str = "namespace";

/// A named collection of styles.
#[derive(Debug, Clone)]
pub struct Theme {
    styles: HashMap<String, Style>,
}

impl Theme {
    /// An empty theme. Unknown names render unstyled.
    pub fn new() -> Self {
        Self {
            styles: HashMap::new(),
        }
    }

    pub fn add(mut self, name: &str, style: Style) -> Self {
        self.styles.insert(name.to_string(), style);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Style> {
        self.styles.get(name)
    }

    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    /// Applies the named style to `text`.
    ///
    /// With `styled` off, or when the name is unknown, the text comes back
    /// unchanged.
    pub fn paint(&self, name: &str, text: &str, styled: bool) -> String {
        match self.get(name) {
            Some(style) if styled => style.apply_to(text).force_styling(true).to_string(),
            _ => text.to_string(),
        }
    }

    /// Paints `text` and pads it to `width` columns.
    ///
    /// Padding is measured on the visible text and placed after the escape
    /// sequence, so columns line up whether or not styling is on.
    pub fn paint_padded(&self, name: &str, text: &str, width: usize, styled: bool) -> String {
        let pad = width.saturating_sub(display_width(text));
        format!("{}{}", self.paint(name, text, styled), " ".repeat(pad))
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::new()
            .add(KEY, Style::new().blue())
            .add(ERROR, Style::new().red())
            .add(NAMESPACE, Style::new().red())
    }
}

/// Whether output should carry ANSI styling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ColorChoice {
    /// Style when the terminal supports it.
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorChoice {
    /// Resolves the choice against stdout.
    pub fn styled(self) -> bool {
        match self {
            ColorChoice::Auto => console::colors_enabled(),
            ColorChoice::Always => true,
            ColorChoice::Never => false,
        }
    }
}

impl fmt::Display for ColorChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ColorChoice::Auto => "auto",
            ColorChoice::Always => "always",
            ColorChoice::Never => "never",
        })
    }
}

impl FromStr for ColorChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "auto" => Ok(ColorChoice::Auto),
            "always" => Ok(ColorChoice::Always),
            "never" => Ok(ColorChoice::Never),
            other => Err(format!(
                "invalid color choice `{}` (expected auto, always or never)",
                other
            )),
        }
    }
}

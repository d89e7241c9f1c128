//! Argument descriptors.
//!
//! An [`ArgSpec`] describes one parameter of a command: whether it is
//! required, its default, the coercion applied to it, and auxiliary parser
//! options such as help text. Specs are derived from an inspected
//! [`Signature`](crate::Signature) and can be overridden afterwards, e.g. to
//! attach help text:
//!
//! ```rust
//! use subcmd_dispatch::ArgSpec;
//!
//! let name = ArgSpec::new("name").help("who to greet");
//! assert!(name.is_required());
//! assert!(name.is_positional());
//!
//! let loud = ArgSpec::new("loud").default(false).help("shout it");
//! assert!(!loud.is_required());
//! assert_eq!(loud.display_name(), "--loud");
//! ```

use serde_json::Value;

use crate::value::{DefaultValue, TypeHint};

/// Help text used when none is given.
pub const NO_DESCRIPTION: &str = "no description";

/// Auxiliary parser directives for one argument.
#[derive(Debug, Clone, PartialEq)]
pub struct ArgOptions {
    pub help: String,
    pub short: Option<char>,
    pub metavar: Option<String>,
    pub choices: Vec<String>,
}

impl Default for ArgOptions {
    fn default() -> Self {
        Self {
            help: NO_DESCRIPTION.to_string(),
            short: None,
            metavar: None,
            choices: Vec::new(),
        }
    }
}

/// Specification of a single command argument.
#[derive(Debug, Clone, PartialEq)]
pub struct ArgSpec {
    name: String,
    required: bool,
    default: Option<DefaultValue>,
    type_hint: Option<TypeHint>,
    options: ArgOptions,
}

impl ArgSpec {
    /// A required argument. Becomes optional once a default is set.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            required: true,
            default: None,
            type_hint: None,
            options: ArgOptions::default(),
        }
    }

    /// Builds the spec for an inspected parameter.
    ///
    /// Required parameters carry no default and no type hint; optional ones
    /// keep their default (positional marker included) and infer the hint
    /// from it.
    pub fn from_param(name: impl Into<String>, default: Option<DefaultValue>) -> Self {
        let spec = Self::new(name);
        match default {
            Some(default) => spec.default(default),
            None => spec,
        }
    }

    /// Sets the default, making the argument optional.
    ///
    /// The type hint is inferred from the unwrapped default unless one was
    /// already set explicitly.
    pub fn default(mut self, default: impl Into<DefaultValue>) -> Self {
        let default = default.into();
        if self.type_hint.is_none() {
            self.type_hint = TypeHint::of(default.value());
        }
        self.required = false;
        self.default = Some(default);
        self
    }

    pub fn type_hint(mut self, hint: TypeHint) -> Self {
        self.type_hint = Some(hint);
        self
    }

    pub fn help(mut self, help: impl Into<String>) -> Self {
        self.options.help = help.into();
        self
    }

    pub fn short(mut self, short: char) -> Self {
        self.options.short = Some(short);
        self
    }

    pub fn metavar(mut self, metavar: impl Into<String>) -> Self {
        self.options.metavar = Some(metavar.into());
        self
    }

    pub fn choices<I, S>(mut self, choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options.choices = choices.into_iter().map(Into::into).collect();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    /// The default as declared, positional marker included.
    pub fn default_value(&self) -> Option<&DefaultValue> {
        self.default.as_ref()
    }

    /// The default with the positional marker removed.
    pub fn unwrapped_default(&self) -> Option<&Value> {
        self.default.as_ref().map(DefaultValue::value)
    }

    pub fn get_type_hint(&self) -> Option<TypeHint> {
        self.type_hint
    }

    pub fn options(&self) -> &ArgOptions {
        &self.options
    }

    /// True if the argument is consumed positionally.
    pub fn is_positional(&self) -> bool {
        self.required
            || self
                .default
                .as_ref()
                .is_some_and(DefaultValue::is_positional)
    }

    /// True if the argument renders as a zero-argument switch.
    pub fn is_switch(&self) -> bool {
        !self.is_positional()
            && self.type_hint == Some(TypeHint::Bool)
            && self.unwrapped_default() == Some(&Value::Bool(false))
    }

    /// The name shown to the parser: bare when positional, `--name` otherwise.
    pub fn display_name(&self) -> String {
        if self.is_positional() {
            self.name.clone()
        } else {
            format!("--{}", self.name)
        }
    }
}

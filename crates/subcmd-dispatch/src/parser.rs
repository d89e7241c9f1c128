//! Parser configuration rendered from argument specs.
//!
//! [`CommandSpec::render`](crate::CommandSpec::render) turns each [`ArgSpec`]
//! into an [`ArgDirective`]: a flat description of how the parser should
//! treat the argument. The shape follows from requiredness and the default:
//!
//! | required | default            | shape                                   |
//! |----------|--------------------|-----------------------------------------|
//! | yes      | none               | [`ArgShape::Positional`]                |
//! | no       | positional marker  | [`ArgShape::OptionalPositional`]        |
//! | no       | `false`            | [`ArgShape::Switch`] (no type directive) |
//! | no       | anything else      | [`ArgShape::Flag`]                      |
//!
//! [`ParserConfig::to_command`] materializes the directives as a
//! `clap::Command`, and [`ArgDirective::extract`] reads a parsed value back
//! out of the resulting `ArgMatches`.

use clap::builder::{PossibleValuesParser, TypedValueParser};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use serde_json::Value;

use crate::arg::{ArgOptions, ArgSpec};
use crate::value::{value_to_arg_string, TypeHint};

/// The rendered shape of an argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgShape {
    /// Bare positional, exactly one occurrence.
    Positional,
    /// Bare positional, zero or one occurrence, default when absent.
    OptionalPositional,
    /// `--name` with no value; presence sets `true`.
    Switch,
    /// `--name VALUE`, default when absent.
    Flag,
}

impl ArgShape {
    pub fn is_positional(&self) -> bool {
        matches!(self, ArgShape::Positional | ArgShape::OptionalPositional)
    }
}

/// Parser directive for one argument.
#[derive(Debug, Clone, PartialEq)]
pub struct ArgDirective {
    /// Parameter name, used as the parser id.
    pub id: String,
    /// `name` for positionals, `--name` for flags.
    pub display_name: String,
    pub shape: ArgShape,
    /// Unwrapped default, if any.
    pub default: Option<Value>,
    /// Coercion; always `None` for switches.
    pub type_hint: Option<TypeHint>,
    pub options: ArgOptions,
}

impl ArgDirective {
    /// Renders one spec.
    pub fn from_spec(spec: &ArgSpec) -> Self {
        let shape = if spec.is_required() {
            ArgShape::Positional
        } else if spec.is_positional() {
            ArgShape::OptionalPositional
        } else if spec.is_switch() {
            ArgShape::Switch
        } else {
            ArgShape::Flag
        };

        let type_hint = match shape {
            ArgShape::Switch => None,
            _ => spec.get_type_hint(),
        };

        Self {
            id: spec.name().to_string(),
            display_name: spec.display_name(),
            shape,
            default: spec.unwrapped_default().cloned(),
            type_hint,
            options: spec.options().clone(),
        }
    }

    /// Builds the clap argument for this directive.
    pub fn to_arg(&self) -> Arg {
        let mut arg = Arg::new(self.id.clone()).help(self.options.help.clone());

        arg = match self.shape {
            ArgShape::Positional => arg.required(true).action(ArgAction::Set),
            ArgShape::OptionalPositional => arg.required(false).action(ArgAction::Set),
            ArgShape::Switch => arg.long(self.id.clone()).action(ArgAction::SetTrue),
            ArgShape::Flag => arg.long(self.id.clone()).action(ArgAction::Set),
        };

        if self.shape == ArgShape::Switch {
            return match self.options.short {
                Some(short) => arg.short(short),
                None => arg,
            };
        }

        if let Some(short) = self.options.short.filter(|_| !self.shape.is_positional()) {
            arg = arg.short(short);
        }
        if let Some(metavar) = &self.options.metavar {
            arg = arg.value_name(metavar.clone());
        }
        if let Some(default) = self.default.as_ref().and_then(value_to_arg_string) {
            arg = arg.default_value(default);
        }

        if matches!(self.type_hint, Some(TypeHint::Int | TypeHint::Float)) {
            arg = arg.allow_negative_numbers(true);
        }

        let choices = &self.options.choices;
        if choices.is_empty() {
            return match self.type_hint {
                Some(TypeHint::Int) => arg.value_parser(value_parser!(i64)),
                Some(TypeHint::Float) => arg.value_parser(value_parser!(f64)),
                Some(TypeHint::Bool) => arg.value_parser(value_parser!(bool)),
                Some(TypeHint::Str) | None => arg.value_parser(value_parser!(String)),
            };
        }

        // Choices are matched as text, then converted like the unrestricted
        // parser would.
        let allowed = PossibleValuesParser::new(choices.clone());
        match self.type_hint {
            Some(TypeHint::Int) => arg.value_parser(allowed.try_map(|s| s.parse::<i64>())),
            Some(TypeHint::Float) => arg.value_parser(allowed.try_map(|s| s.parse::<f64>())),
            Some(TypeHint::Bool) => arg.value_parser(allowed.try_map(|s| s.parse::<bool>())),
            Some(TypeHint::Str) | None => arg.value_parser(allowed),
        }
    }

    /// Reads the parsed value, coerced according to the type hint.
    ///
    /// Returns `None` when the parser observed neither an explicit value nor
    /// a default.
    pub fn extract(&self, matches: &ArgMatches) -> Option<Value> {
        let id = self.id.as_str();
        if self.shape == ArgShape::Switch {
            return Some(Value::Bool(matches.get_flag(id)));
        }
        match self.type_hint {
            Some(TypeHint::Int) => matches.get_one::<i64>(id).map(|v| Value::from(*v)),
            Some(TypeHint::Float) => matches.get_one::<f64>(id).map(|v| Value::from(*v)),
            Some(TypeHint::Bool) => matches.get_one::<bool>(id).map(|v| Value::Bool(*v)),
            Some(TypeHint::Str) | None => matches
                .get_one::<String>(id)
                .map(|v| Value::String(v.clone())),
        }
    }
}

/// A complete parser configuration for one command.
#[derive(Debug, Clone, PartialEq)]
pub struct ParserConfig {
    pub name: String,
    pub about: String,
    pub args: Vec<ArgDirective>,
}

impl ParserConfig {
    pub fn directive(&self, id: &str) -> Option<&ArgDirective> {
        self.args.iter().find(|d| d.id == id)
    }

    /// Builds the clap command, adding arguments in directive order.
    pub fn to_command(&self) -> Command {
        self.args.iter().fold(
            Command::new(self.name.clone())
                .about(self.about.clone())
                .disable_version_flag(true),
            |cmd, directive| cmd.arg(directive.to_arg()),
        )
    }
}

//! Handler types.
//!
//! A handler is the callable behind a command. It receives the parsed
//! [`Arguments`] and returns a serializable value, or an error. Errors that
//! downcast to [`DomainError`](crate::DomainError) are normal, displayable
//! results; everything else is a fault.
//!
//! Two registration forms are supported:
//!
//! - closures, wrapped in [`FnHandler`]
//! - types implementing [`Command`], wrapped in [`CommandHandler`]
//!
//! # Argument binding
//!
//! [`Arguments`] holds what the parser produced: required arguments in a
//! positional list, observed optional arguments in a keyword map. Lookups
//! bind like a call: the parameter's positional slot, then keyword, then
//! the signature's own default.
//!
//! ```rust
//! use subcmd_dispatch::Arguments;
//! use serde_json::json;
//!
//! let args = Arguments::new(vec!["name".into(), "loud".into()])
//!     .with_positional(vec![json!("Ada")])
//!     .with_keyword("loud", json!(true));
//!
//! let name: String = args.get("name")?;
//! let loud: bool = args.get("loud")?;
//! assert_eq!((name.as_str(), loud), ("Ada", true));
//! # Ok::<(), anyhow::Error>(())
//! ```

use anyhow::{anyhow, Context};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

use crate::error::DomainError;
use crate::signature::Signature;

/// The result type handlers return.
pub type CallResult<T> = Result<T, anyhow::Error>;

/// Parsed arguments for one invocation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Arguments {
    names: Vec<String>,
    slots: Vec<String>,
    positional: Vec<Value>,
    keyword: BTreeMap<String, Value>,
    defaults: BTreeMap<String, Value>,
}

impl Arguments {
    /// Empty arguments for a parameter list.
    pub fn new(names: Vec<String>) -> Self {
        Self {
            names,
            ..Self::default()
        }
    }

    /// Fills the positional slots with the leading parameters.
    pub fn with_positional(mut self, values: Vec<Value>) -> Self {
        self.slots = self.names.iter().take(values.len()).cloned().collect();
        self.positional = values;
        self
    }

    pub fn with_keyword(mut self, name: impl Into<String>, value: Value) -> Self {
        self.keyword.insert(name.into(), value);
        self
    }

    /// Declared defaults used when nothing else binds a parameter.
    pub fn with_defaults(mut self, defaults: BTreeMap<String, Value>) -> Self {
        self.defaults = defaults;
        self
    }

    pub(crate) fn push_positional(&mut self, name: impl Into<String>, value: Value) {
        self.slots.push(name.into());
        self.positional.push(value);
    }

    pub(crate) fn insert_keyword(&mut self, name: impl Into<String>, value: Value) {
        self.keyword.insert(name.into(), value);
    }

    /// Parameter names in signature order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Values supplied positionally, in parameter order.
    pub fn positional(&self) -> &[Value] {
        &self.positional
    }

    /// Values supplied by name.
    pub fn keyword(&self) -> &BTreeMap<String, Value> {
        &self.keyword
    }

    /// The value bound to `name`, if any.
    pub fn value(&self, name: &str) -> Option<&Value> {
        if !self.names.iter().any(|n| n == name) {
            return None;
        }
        self.slots
            .iter()
            .position(|n| n == name)
            .and_then(|slot| self.positional.get(slot))
            .or_else(|| self.keyword.get(name))
            .or_else(|| self.defaults.get(name))
    }

    /// The bound value deserialized as `T`.
    pub fn get<T: DeserializeOwned>(&self, name: &str) -> CallResult<T> {
        let value = self
            .value(name)
            .ok_or_else(|| anyhow!("missing argument `{}`", name))?;
        serde_json::from_value(value.clone())
            .with_context(|| format!("argument `{}` has an unexpected type", name))
    }

    /// Every bound parameter, by name.
    pub fn bind(&self) -> BTreeMap<String, Value> {
        self.names
            .iter()
            .filter_map(|name| self.value(name).map(|v| (name.clone(), v.clone())))
            .collect()
    }
}

/// What executing a command produced.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The handler returned normally.
    Value(Value),
    /// The handler signalled a [`DomainError`].
    DomainFailure(DomainError),
}

impl Outcome {
    /// Classifies a handler result. Non-domain errors are handed back.
    pub fn from_result(result: CallResult<Value>) -> CallResult<Outcome> {
        match result {
            Ok(value) => Ok(Outcome::Value(value)),
            Err(err) => match err.downcast::<DomainError>() {
                Ok(domain) => Ok(Outcome::DomainFailure(domain)),
                Err(fault) => Err(fault),
            },
        }
    }

    pub fn is_domain_failure(&self) -> bool {
        matches!(self, Outcome::DomainFailure(_))
    }

    pub fn value(&self) -> Option<&Value> {
        match self {
            Outcome::Value(v) => Some(v),
            Outcome::DomainFailure(_) => None,
        }
    }
}

/// Trait for the callable behind a command.
///
/// Handlers take `&mut self`: dispatch is single-threaded and runs one
/// command per invocation.
pub trait Handler {
    fn call(&mut self, args: &Arguments) -> CallResult<Value>;
}

impl fmt::Debug for dyn Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Handler")
    }
}

/// Serializes a handler's return value.
fn to_value<T: Serialize>(data: T) -> CallResult<Value> {
    serde_json::to_value(data).context("command result is not serializable")
}

/// A [`Handler`] backed by an `FnMut` closure.
///
/// The closure may return any `Result<T, E>` where `T: Serialize` and `E`
/// converts into `anyhow::Error`.
pub struct FnHandler<F, T, E> {
    f: F,
    _phantom: std::marker::PhantomData<fn() -> (T, E)>,
}

impl<F, T, E> FnHandler<F, T, E>
where
    F: FnMut(&Arguments) -> Result<T, E>,
    T: Serialize,
    E: Into<anyhow::Error>,
{
    pub fn new(f: F) -> Self {
        Self {
            f,
            _phantom: std::marker::PhantomData,
        }
    }
}

impl<F, T, E> Handler for FnHandler<F, T, E>
where
    F: FnMut(&Arguments) -> Result<T, E>,
    T: Serialize,
    E: Into<anyhow::Error>,
{
    fn call(&mut self, args: &Arguments) -> CallResult<Value> {
        (self.f)(args).map_err(Into::into).and_then(to_value)
    }
}

/// A command defined as a type.
///
/// This is the trait-based registration form: implement it, then hand an
/// instance to [`Registry::add_command`](crate::Registry::add_command). The
/// command's name defaults to the snake-case form of the type name.
///
/// ```rust
/// use subcmd_dispatch::{Arguments, CallResult, Command, Signature};
///
/// struct ClassBased;
///
/// impl Command for ClassBased {
///     type Output = String;
///
///     fn signature(&self) -> Signature {
///         Signature::method().arg("name").opt("capitalyze", false)
///     }
///
///     fn run(&mut self, args: &Arguments) -> CallResult<String> {
///         let name: String = args.get("name")?;
///         Ok(if args.get::<bool>("capitalyze")? { name.to_uppercase() } else { name })
///     }
/// }
/// ```
pub trait Command: 'static {
    type Output: Serialize;

    /// The declared parameters of [`run`](Command::run).
    fn signature(&self) -> Signature;

    fn run(&mut self, args: &Arguments) -> CallResult<Self::Output>;

    /// Explicit name; `None` derives it from the type name.
    fn name(&self) -> Option<String> {
        None
    }

    fn namespace(&self) -> Option<String> {
        None
    }

    fn description(&self) -> Option<String> {
        None
    }
}

/// Adapts a [`Command`] to the [`Handler`] trait.
pub struct CommandHandler<C: Command> {
    command: C,
}

impl<C: Command> CommandHandler<C> {
    pub fn new(command: C) -> Self {
        Self { command }
    }

    pub fn inner(&self) -> &C {
        &self.command
    }
}

impl<C: Command> Handler for CommandHandler<C> {
    fn call(&mut self, args: &Arguments) -> CallResult<Value> {
        self.command.run(args).and_then(to_value)
    }
}

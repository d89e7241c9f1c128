//! Declared signatures and their inspection.
//!
//! Rust has no runtime reflection over parameter lists, so a callable's shape
//! is declared once at registration time with [`Signature`] (or generated by
//! the `#[command]` macro). [`Signature::inspect`] then yields the ordered
//! parameter names and default mapping the rest of the pipeline works from.
//!
//! ```rust
//! use subcmd_dispatch::Signature;
//!
//! // fn greet(name, loud = false)
//! let inspected = Signature::new().arg("name").opt("loud", false).inspect()?;
//! assert_eq!(inspected.names, vec!["name", "loud"]);
//! assert_eq!(inspected.required(), &["name".to_string()]);
//! # Ok::<(), subcmd_dispatch::SignatureError>(())
//! ```

use std::collections::{BTreeMap, HashSet};

use crate::error::SignatureError;
use crate::value::DefaultValue;

/// The name given to the receiver of a bound signature.
pub const RECEIVER: &str = "self";

/// How a parameter accepts values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    /// A single named value (the only supported kind).
    Named,
    /// Collects any number of extra positional values.
    Variadic,
    /// Collects any number of extra keyword values.
    KeywordVariadic,
}

/// One declared parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: String,
    pub kind: ParamKind,
    pub default: Option<DefaultValue>,
}

impl Param {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ParamKind::Named,
            default: None,
        }
    }
}

/// The declared parameter list of a callable.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Signature {
    params: Vec<Param>,
    bound: bool,
}

impl Signature {
    /// A free callable with no parameters yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// An instance-bound callable. Its first declared parameter is the
    /// receiver, which inspection drops.
    pub fn method() -> Self {
        Self {
            params: vec![Param::new(RECEIVER)],
            bound: true,
        }
    }

    /// Adds a required parameter.
    pub fn arg(mut self, name: impl Into<String>) -> Self {
        self.params.push(Param::new(name));
        self
    }

    /// Adds a parameter with a default value.
    pub fn opt(mut self, name: impl Into<String>, default: impl Into<DefaultValue>) -> Self {
        let mut param = Param::new(name);
        param.default = Some(default.into());
        self.params.push(param);
        self
    }

    /// Adds a variadic positional parameter. Inspection rejects it.
    pub fn variadic(mut self, name: impl Into<String>) -> Self {
        let mut param = Param::new(name);
        param.kind = ParamKind::Variadic;
        self.params.push(param);
        self
    }

    /// Adds a variadic keyword parameter. Inspection rejects it.
    pub fn keyword_variadic(mut self, name: impl Into<String>) -> Self {
        let mut param = Param::new(name);
        param.kind = ParamKind::KeywordVariadic;
        self.params.push(param);
        self
    }

    /// Adds a fully described parameter.
    pub fn param(mut self, param: Param) -> Self {
        self.params.push(param);
        self
    }

    /// True if the callable carries a receiver.
    pub fn is_bound(&self) -> bool {
        self.bound
    }

    /// Every declared parameter, receiver included.
    pub fn params(&self) -> &[Param] {
        &self.params
    }

    /// Extracts the ordered names and defaults.
    pub fn inspect(&self) -> Result<Inspected, SignatureError> {
        let params = if self.bound {
            match self.params.split_first() {
                Some((_receiver, rest)) => rest,
                None => return Err(SignatureError::MissingReceiver),
            }
        } else {
            &self.params[..]
        };

        let mut seen = HashSet::new();
        let mut names = Vec::with_capacity(params.len());
        let mut defaults = BTreeMap::new();
        let mut first_optional: Option<&str> = None;

        for param in params {
            match param.kind {
                ParamKind::Named => {}
                ParamKind::Variadic => return Err(SignatureError::Variadic(param.name.clone())),
                ParamKind::KeywordVariadic => {
                    return Err(SignatureError::KeywordVariadic(param.name.clone()))
                }
            }
            if !seen.insert(param.name.as_str()) {
                return Err(SignatureError::DuplicateParameter(param.name.clone()));
            }
            match (&param.default, first_optional) {
                (Some(default), _) => {
                    first_optional.get_or_insert(param.name.as_str());
                    defaults.insert(param.name.clone(), default.clone());
                }
                (None, Some(after)) => {
                    return Err(SignatureError::RequiredAfterOptional {
                        name: param.name.clone(),
                        after: after.to_string(),
                    })
                }
                (None, None) => {}
            }
            names.push(param.name.clone());
        }

        tracing::trace!(?names, bound = self.bound, "inspected signature");

        Ok(Inspected {
            names,
            defaults,
            bound: self.bound,
        })
    }
}

/// The result of inspecting a [`Signature`].
#[derive(Debug, Clone, PartialEq)]
pub struct Inspected {
    /// Parameter names in declaration order, receiver excluded.
    pub names: Vec<String>,
    /// Default for every parameter that has one.
    pub defaults: BTreeMap<String, DefaultValue>,
    /// Whether the receiver was dropped.
    pub bound: bool,
}

impl Inspected {
    /// The leading parameters without defaults.
    pub fn required(&self) -> &[String] {
        &self.names[..self.split()]
    }

    /// The trailing parameters with defaults.
    pub fn optional(&self) -> &[String] {
        &self.names[self.split()..]
    }

    fn split(&self) -> usize {
        self.names.len().saturating_sub(self.defaults.len())
    }

    pub fn is_required(&self, name: &str) -> bool {
        !self.defaults.contains_key(name)
    }
}

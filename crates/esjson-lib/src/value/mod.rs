//! Parsed value graph.
//!
//! Every JSON value (and every parameter placeholder) in a body becomes one
//! [`ValueInfo`] in a [`ValueTree`] arena. Parents own their children by id;
//! children keep a non-owning `parent` id for upward traversal. Ids are
//! assigned in pre-order, so a subtree always occupies a contiguous tail of the
//! arena while it is being built. The parser relies on that to drop an
//! incomplete subtree with a single truncate.

mod tree;


use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::parser::lexer::Token;

pub use tree::{Ancestors, ValueTree};

/// Handle to a node in a [`ValueTree`].
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct ValueId(u32);

impl ValueId {
    /// Raw index for debugging.
    #[inline]
    pub fn as_u32(self) -> u32 {
        self.0
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// A named runtime substitution point: `{{#toJson}}NAME{{/toJson}}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
}

impl Parameter {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// The JSON type of a node, with `Parameter` as the one extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JsonType {
    Null,
    Boolean,
    Number,
    String,
    Array,
    Object,
    Parameter,
}

impl std::fmt::Display for JsonType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            JsonType::Null => "null",
            JsonType::Boolean => "boolean",
            JsonType::Number => "number",
            JsonType::String => "string",
            JsonType::Array => "array",
            JsonType::Object => "object",
            JsonType::Parameter => "parameter",
        };
        f.write_str(name)
    }
}

/// A numeric literal as written in the body.
///
/// The lexer only accepts JSON number syntax, so the one way a literal can fail
/// to become a [`serde_json::Number`] is by exceeding the `f64` range (`1e400`).
/// Such literals keep their source text.
#[derive(Debug, Clone, PartialEq)]
pub enum Number {
    Finite(serde_json::Number),
    OutOfRange(String),
}

impl Number {
    pub(crate) fn from_literal(text: &str) -> Self {
        match text.parse::<serde_json::Number>() {
            Ok(number) => Number::Finite(number),
            Err(_) => Number::OutOfRange(text.to_string()),
        }
    }

    pub fn as_json(&self) -> Option<&serde_json::Number> {
        match self {
            Number::Finite(n) => Some(n),
            Number::OutOfRange(_) => None,
        }
    }
}

impl std::fmt::Display for Number {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Number::Finite(n) => n.fmt(f),
            Number::OutOfRange(text) => f.write_str(text),
        }
    }
}

/// One object entry.
///
/// `value` is `None` when the pair's value failed to parse. Such a pair can
/// still be inspected, but cannot be turned into a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertyInfo {
    pub(crate) name: ValueId,
    pub(crate) value: Option<ValueId>,
}

impl PropertyInfo {
    /// The string-typed node holding the key.
    pub fn name(&self) -> ValueId {
        self.name
    }

    pub fn value(&self) -> Option<ValueId> {
        self.value
    }
}

/// Payload of a node. Each variant carries only what is valid for its type.
#[derive(Debug, Clone, PartialEq)]
pub enum ValueKind {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Array(Vec<ValueId>),
    /// Insertion-ordered. A repeated key replaces the earlier value in place.
    Object(IndexMap<String, PropertyInfo>),
    Parameter(Parameter),
}

impl ValueKind {
    pub fn json_type(&self) -> JsonType {
        match self {
            ValueKind::Null => JsonType::Null,
            ValueKind::Bool(_) => JsonType::Boolean,
            ValueKind::Number(_) => JsonType::Number,
            ValueKind::String(_) => JsonType::String,
            ValueKind::Array(_) => JsonType::Array,
            ValueKind::Object(_) => JsonType::Object,
            ValueKind::Parameter(_) => JsonType::Parameter,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValueInfo {
    pub(crate) kind: ValueKind,
    pub(crate) token: Option<Token>,
    pub(crate) parent: Option<ValueId>,
}

impl ValueInfo {
    pub fn kind(&self) -> &ValueKind {
        &self.kind
    }

    pub fn json_type(&self) -> JsonType {
        self.kind.json_type()
    }

    /// First token of the value (`{`, `[`, `{{#toJson}}`, or the scalar itself).
    pub fn token(&self) -> Option<Token> {
        self.token
    }

    pub fn parent(&self) -> Option<ValueId> {
        self.parent
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self.kind {
            ValueKind::Bool(b) => Some(b),
            _ => None,
        }
    }

    /// The numeric value, or `None` for non-numbers and out-of-range literals.
    pub fn as_number(&self) -> Option<&serde_json::Number> {
        match &self.kind {
            ValueKind::Number(n) => n.as_json(),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match &self.kind {
            ValueKind::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_parameter(&self) -> Option<&Parameter> {
        match &self.kind {
            ValueKind::Parameter(p) => Some(p),
            _ => None,
        }
    }

    pub fn array_children(&self) -> Option<&[ValueId]> {
        match &self.kind {
            ValueKind::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn object_children(&self) -> Option<&IndexMap<String, PropertyInfo>> {
        match &self.kind {
            ValueKind::Object(props) => Some(props),
            _ => None,
        }
    }
}

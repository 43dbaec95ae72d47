//! Runtime values.
//!
//! Strings and lists are reference counted so that copying a value between
//! frames (assignment, argument binding, import) never deep-copies. Lists are
//! immutable; there is no in-place mutation primitive.

use std::fmt;
use std::rc::Rc;

use argon_ir::{Line, Literal};

use crate::render::to_text;

/// An unresolved reference to a function, used when a function is passed or
/// returned as data. Calls through it re-resolve `name` at call time.
#[derive(Clone, Debug)]
pub struct FunctionRef {
    pub name: Rc<str>,
    pub line: Line,
}

/// A dynamically typed runtime value.
#[derive(Clone, Debug)]
pub enum Value {
    String(Rc<str>),
    Number(f64),
    Boolean(bool),
    Nil,
    List(Rc<[Value]>),
    FunctionRef(FunctionRef),
}

impl Value {
    /// Create a string value.
    #[inline]
    pub fn string(s: impl AsRef<str>) -> Self {
        Value::String(Rc::from(s.as_ref()))
    }

    /// Create a list value.
    #[inline]
    pub fn list(items: Vec<Value>) -> Self {
        Value::List(Rc::from(items))
    }

    /// Create a function reference value.
    #[inline]
    pub fn function_ref(name: &str, line: Line) -> Self {
        Value::FunctionRef(FunctionRef {
            name: Rc::from(name),
            line,
        })
    }

    /// Convert a parsed literal.
    pub fn from_literal(lit: &Literal) -> Self {
        match lit {
            Literal::String(s) => Value::string(s),
            Literal::Number(n) => Value::Number(*n),
            Literal::Boolean(b) => Value::Boolean(*b),
            Literal::Nil => Value::Nil,
        }
    }

    /// Truthiness used by conditions and the logical operators.
    ///
    /// Falsy values are exactly `false`, `nil`, numeric zero and the empty
    /// string. Everything else, including an empty list, is truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Boolean(b) => *b,
            Value::Nil => false,
            Value::Number(n) => *n != 0.0,
            Value::String(s) => !s.is_empty(),
            Value::List(_) | Value::FunctionRef(_) => true,
        }
    }

    /// Numeric coercion.
    ///
    /// Numbers pass through and booleans become `1`/`0`. Anything else is
    /// rendered to its plain text and parsed as a float. `None` means the
    /// text is not a number.
    pub fn to_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            Value::Boolean(b) => Some(if *b { 1.0 } else { 0.0 }),
            other => to_text(other, false).parse::<f64>().ok(),
        }
    }

    /// Whether this is a string (the trigger for `+` concatenation).
    #[inline]
    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    /// Borrow the string contents, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Borrow the list items, if this is a list.
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Get the type name of this value.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::String(_) => "string",
            Value::Number(_) => "number",
            Value::Boolean(_) => "boolean",
            Value::Nil => "unknown",
            Value::List(_) => "list",
            Value::FunctionRef(_) => "function",
        }
    }
}

/// Raw dynamic equality: no coercion across types.
///
/// Numbers follow IEEE rules (`NaN != NaN`), lists compare element-wise,
/// and function references compare by name only.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Nil, Value::Nil) => true,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::FunctionRef(a), Value::FunctionRef(b)) => a.name == b.name,
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&to_text(self, false))
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(Rc::from(s))
    }
}

//! Evaluation errors.
//!
//! Every failure the evaluator can raise is an [`EvalErrorKind`] located at a
//! module and line. The constructors below are the only way the rest of the
//! crate builds errors, so message wording lives in one place.
//!
//! Errors never unwind: an [`EvalError`] is converted into an error
//! [`Outcome`](crate::Outcome) whose value is the rendered diagnostic, and
//! from there it is catchable like any user-raised error.

use std::fmt;

use argon_ir::Line;

use crate::environment::BindingKind;
use crate::registry::ModuleId;
use crate::render::to_text;
use crate::signal::Signal;
use crate::Value;

/// What went wrong.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EvalErrorKind {
    #[error("undeclared variable {name}")]
    UndeclaredVariable { name: String },

    #[error("undeclared function '{name}'")]
    UndeclaredFunction { name: String },

    #[error("'{name}' is not a function")]
    NotAFunction { name: String },

    #[error("cannot edit {kind} variable")]
    CannotEdit { kind: BindingKind },

    /// `text` is the quoted rendering of the offending value.
    #[error("{text} is not a number")]
    NotANumber { text: String },

    #[error("{text} is not a list")]
    NotAList { text: String },

    #[error("{text} is not a scalar")]
    NotAScalar { text: String },

    #[error("invalid value")]
    InvalidListElement,

    #[error("return statement must return a value")]
    MissingReturnValue,

    #[error("{signal} is not allowed in function")]
    IllegalControlFlowInFunction { signal: Signal },

    #[error("import path must be a string, got {text}")]
    InvalidImportPath { text: String },

    #[error("import failed: {reason}")]
    ImportFailure { reason: String },

    #[error("native function '{name}' failed: {message}")]
    NativeFunctionError { name: String, message: String },

    #[error("maximum call depth exceeded (limit: {limit})")]
    RecursionLimit { limit: usize },

    #[error("alias chain for '{name}' is longer than {limit}")]
    AliasDepthExceeded { name: String, limit: usize },
}

/// Where an error is reported: the module whose code is running and the
/// line of the node that failed, when the node has one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Location {
    pub module: ModuleId,
    pub line: Option<Line>,
}

impl Location {
    pub fn new(module: impl Into<ModuleId>, line: Line) -> Self {
        Location {
            module: module.into(),
            line: Some(line),
        }
    }

    pub fn unlined(module: impl Into<ModuleId>) -> Self {
        Location {
            module: module.into(),
            line: None,
        }
    }
}

/// A located evaluation error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvalError {
    pub kind: EvalErrorKind,
    pub module: ModuleId,
    pub line: Option<Line>,
}

impl EvalError {
    pub fn new(kind: EvalErrorKind, loc: &Location) -> Self {
        EvalError {
            kind,
            module: loc.module.clone(),
            line: loc.line,
        }
    }
}

/// Renders as `<message>: <module>:<line>` with a one-based line.
impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "{}: {}:{}", self.kind, self.module, line),
            None => write!(f, "{}: {}", self.kind, self.module),
        }
    }
}

impl std::error::Error for EvalError {}

pub type EvalResult<T> = Result<T, EvalError>;

/// Failure of a whole program run, as seen by a driver.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum RunError {
    /// An error signal reached the top level without being caught.
    #[error("uncaught error: {0}")]
    Uncaught(Value),

    /// `break` or `continue` escaped every loop.
    #[error("{signal} outside of a loop")]
    StrayLoopControl { signal: Signal },
}

// Name resolution

#[cold]
pub fn undeclared_variable(name: &str, loc: &Location) -> EvalError {
    EvalError::new(
        EvalErrorKind::UndeclaredVariable {
            name: name.to_string(),
        },
        loc,
    )
}

#[cold]
pub fn undeclared_function(name: &str, loc: &Location) -> EvalError {
    EvalError::new(
        EvalErrorKind::UndeclaredFunction {
            name: name.to_string(),
        },
        loc,
    )
}

#[cold]
pub fn not_a_function(name: &str, loc: &Location) -> EvalError {
    EvalError::new(
        EvalErrorKind::NotAFunction {
            name: name.to_string(),
        },
        loc,
    )
}

#[cold]
pub fn alias_depth_exceeded(name: &str, limit: usize, loc: &Location) -> EvalError {
    EvalError::new(
        EvalErrorKind::AliasDepthExceeded {
            name: name.to_string(),
            limit,
        },
        loc,
    )
}

// Assignment

#[cold]
pub fn cannot_edit(kind: BindingKind, loc: &Location) -> EvalError {
    EvalError::new(EvalErrorKind::CannotEdit { kind }, loc)
}

// Operand coercion

#[cold]
pub fn not_a_number(value: &Value, loc: &Location) -> EvalError {
    EvalError::new(
        EvalErrorKind::NotANumber {
            text: to_text(value, true),
        },
        loc,
    )
}

#[cold]
pub fn not_a_list(value: &Value, loc: &Location) -> EvalError {
    EvalError::new(
        EvalErrorKind::NotAList {
            text: to_text(value, true),
        },
        loc,
    )
}

#[cold]
pub fn not_a_scalar(value: &Value, loc: &Location) -> EvalError {
    EvalError::new(
        EvalErrorKind::NotAScalar {
            text: to_text(value, true),
        },
        loc,
    )
}

#[cold]
pub fn invalid_list_element(loc: &Location) -> EvalError {
    EvalError::new(EvalErrorKind::InvalidListElement, loc)
}

// Control flow

#[cold]
pub fn missing_return_value(loc: &Location) -> EvalError {
    EvalError::new(EvalErrorKind::MissingReturnValue, loc)
}

#[cold]
pub fn illegal_control_flow(signal: Signal, loc: &Location) -> EvalError {
    EvalError::new(EvalErrorKind::IllegalControlFlowInFunction { signal }, loc)
}

#[cold]
pub fn recursion_limit(limit: usize, loc: &Location) -> EvalError {
    EvalError::new(EvalErrorKind::RecursionLimit { limit }, loc)
}

// Modules and natives

#[cold]
pub fn invalid_import_path(value: &Value, loc: &Location) -> EvalError {
    EvalError::new(
        EvalErrorKind::InvalidImportPath {
            text: to_text(value, true),
        },
        loc,
    )
}

#[cold]
pub fn import_failure(reason: impl fmt::Display, loc: &Location) -> EvalError {
    EvalError::new(
        EvalErrorKind::ImportFailure {
            reason: reason.to_string(),
        },
        loc,
    )
}

#[cold]
pub fn native_function_error(name: &str, message: &str, loc: &Location) -> EvalError {
    EvalError::new(
        EvalErrorKind::NativeFunctionError {
            name: name.to_string(),
            message: message.to_string(),
        },
        loc,
    )
}

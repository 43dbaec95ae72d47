//! Control-flow signals.
//!
//! Every evaluation step returns an [`Outcome`]: a value tagged with the
//! [`Signal`] that tells the enclosing construct whether to keep going.
//! Errors, early returns and loop exits all travel this way; nothing in the
//! evaluator unwinds.

use std::fmt;

use crate::errors::EvalError;
use crate::Value;

/// The control-flow tag carried with every evaluated value.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Signal {
    /// Keep going with the next statement.
    Normal,
    Return,
    Break,
    Continue,
    Error,
}

impl Signal {
    /// Whether a statement sequence must stop when it sees this signal.
    #[inline]
    pub fn is_terminal(self) -> bool {
        !matches!(self, Signal::Normal)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Signal::Normal => "normal",
            Signal::Return => "return",
            Signal::Break => "break",
            Signal::Continue => "continue",
            Signal::Error => "error",
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A value together with its control-flow signal.
#[derive(Clone, Debug, PartialEq)]
pub struct Outcome {
    pub signal: Signal,
    pub value: Value,
}

impl Outcome {
    #[inline]
    pub fn normal(value: Value) -> Self {
        Outcome {
            signal: Signal::Normal,
            value,
        }
    }

    /// `Normal` with no meaningful value (statements).
    #[inline]
    pub fn nil() -> Self {
        Outcome::normal(Value::Nil)
    }

    #[inline]
    pub fn returned(value: Value) -> Self {
        Outcome {
            signal: Signal::Return,
            value,
        }
    }

    #[inline]
    pub fn break_loop() -> Self {
        Outcome {
            signal: Signal::Break,
            value: Value::Nil,
        }
    }

    #[inline]
    pub fn continue_loop() -> Self {
        Outcome {
            signal: Signal::Continue,
            value: Value::Nil,
        }
    }

    /// Raise `value` as an error.
    #[inline]
    pub fn error(value: Value) -> Self {
        Outcome {
            signal: Signal::Error,
            value,
        }
    }

    #[inline]
    pub fn is_error(&self) -> bool {
        self.signal == Signal::Error
    }

    /// Split off an error so callers can propagate it with `?`.
    ///
    /// Only `Error` aborts; other signals hand back their value, matching the
    /// operand and argument rules ("abort on first error").
    #[inline]
    pub fn value_unless_error(self) -> Result<Value, Outcome> {
        if self.is_error() {
            Err(self)
        } else {
            Ok(self.value)
        }
    }
}

impl From<EvalError> for Outcome {
    fn from(err: EvalError) -> Self {
        tracing::debug!(error = %err, "raising evaluation error");
        Outcome::error(Value::string(err.to_string()))
    }
}

/// Collapse a `Result` built with `?` back into an outcome.
pub(crate) fn settle(result: Result<Outcome, Outcome>) -> Outcome {
    result.unwrap_or_else(|terminal| terminal)
}

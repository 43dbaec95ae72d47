//! Native function calling convention.

use std::fmt;
use std::rc::Rc;

use crate::Value;

/// How a native function reports failure.
#[derive(Clone, Debug, PartialEq)]
pub enum NativeError {
    /// Raise this value as-is, exactly like a user `error(..)`.
    Raise(Value),
    /// A host-side failure; reported as a located diagnostic naming the
    /// function.
    Message(String),
}

impl NativeError {
    pub fn message(msg: impl Into<String>) -> Self {
        NativeError::Message(msg.into())
    }
}

pub type NativeResult = Result<Value, NativeError>;

/// Host callable. Receives the already-evaluated arguments.
pub type NativeFn = Rc<dyn Fn(&[Value]) -> NativeResult>;

/// A named native function as stored in a binding.
#[derive(Clone)]
pub struct NativeFunction {
    pub name: Rc<str>,
    func: NativeFn,
}

impl NativeFunction {
    pub fn new<F>(name: &str, func: F) -> Self
    where
        F: Fn(&[Value]) -> NativeResult + 'static,
    {
        NativeFunction {
            name: Rc::from(name),
            func: Rc::new(func),
        }
    }

    #[inline]
    pub fn call(&self, args: &[Value]) -> NativeResult {
        (self.func)(args)
    }
}

impl fmt::Debug for NativeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<native {}>", self.name)
    }
}

//! `InterpreterBuilder` for configuring an [`Interpreter`].

use super::Interpreter;
use crate::limits::EvalLimits;
use crate::loader::{ModuleLoader, NoLoader};
use crate::native::{NativeFunction, NativeResult};
use crate::Value;

/// Builder for interpreters.
///
/// Defaults: [`EvalLimits::default`], no natives, and [`NoLoader`] (every
/// import fails).
pub struct InterpreterBuilder {
    limits: EvalLimits,
    loader: Box<dyn ModuleLoader>,
    natives: Vec<NativeFunction>,
}

impl InterpreterBuilder {
    pub fn new() -> Self {
        InterpreterBuilder {
            limits: EvalLimits::default(),
            loader: Box::new(NoLoader),
            natives: Vec::new(),
        }
    }

    #[must_use]
    pub fn limits(mut self, limits: EvalLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Maximum nesting of user function calls before `RecursionLimit`.
    #[must_use]
    pub fn max_call_depth(mut self, depth: usize) -> Self {
        self.limits.max_call_depth = depth;
        self
    }

    /// Maximum alias hops when resolving a call target.
    #[must_use]
    pub fn max_alias_depth(mut self, depth: usize) -> Self {
        self.limits.max_alias_depth = depth;
        self
    }

    /// Set the loader imports resolve through.
    #[must_use]
    pub fn loader(mut self, loader: impl ModuleLoader + 'static) -> Self {
        self.loader = Box::new(loader);
        self
    }

    /// Add a native function.
    #[must_use]
    pub fn native<F>(mut self, name: &str, func: F) -> Self
    where
        F: Fn(&[Value]) -> NativeResult + 'static,
    {
        self.natives.push(NativeFunction::new(name, func));
        self
    }

    pub fn build(self) -> Interpreter {
        let mut interpreter = Interpreter::from_parts(self.limits, self.loader);
        for native in self.natives {
            interpreter.install_native(native);
        }
        interpreter
    }
}

impl Default for InterpreterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

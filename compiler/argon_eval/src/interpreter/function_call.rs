//! Function call evaluation.

use std::rc::Rc;

use argon_ir::{FunctionDef, Line, Node, VariableRef};

use super::Interpreter;
use crate::environment::{BindingSlot, ScopeChain};
use crate::errors::{
    illegal_control_flow, native_function_error, not_a_function, recursion_limit, Location,
};
use crate::exec::call::{bind_parameters, resolve_callee};
use crate::native::{NativeError, NativeFunction};
use crate::registry::ModuleId;
use crate::signal::{settle, Outcome, Signal};
use crate::Value;

impl Interpreter {
    /// Evaluate `target(args..)`.
    ///
    /// The target is resolved before any argument is evaluated; arguments
    /// then run left to right in the caller's chain.
    pub(super) fn eval_call(&mut self, target: &VariableRef, args: &[Node], line: Line) -> Outcome {
        settle(self.eval_call_inner(target, args, line))
    }

    fn eval_call_inner(
        &mut self,
        target: &VariableRef,
        args: &[Node],
        line: Line,
    ) -> Result<Outcome, Outcome> {
        let loc = self.loc(line);
        let binding = resolve_callee(&self.env, &target.name, self.limits.max_alias_depth, &loc)?;

        let mut values = Vec::with_capacity(args.len());
        for arg in args {
            values.push(self.eval_node(arg).value_unless_error()?);
        }

        Ok(match binding.slot {
            BindingSlot::Native(func) => call_native(&func, &values, &loc),
            BindingSlot::Function(def) => self.call_function(&def, &binding.module, values, &loc),
            BindingSlot::Value(_) => not_a_function(&target.name, &loc).into(),
        })
    }

    /// Invoke a user function.
    ///
    /// The body runs over `[natives, defining module's top frame, arguments]`
    /// with the defining module as the current module, so free names resolve
    /// where the function was written rather than where it is called.
    #[tracing::instrument(level = "debug", skip_all, fields(function = %def.name, module = %module))]
    pub(crate) fn call_function(
        &mut self,
        def: &Rc<FunctionDef>,
        module: &ModuleId,
        args: Vec<Value>,
        loc: &Location,
    ) -> Outcome {
        if self.call_depth >= self.limits.max_call_depth {
            return recursion_limit(self.limits.max_call_depth, loc).into();
        }

        let params = bind_parameters(def, args, module);
        // Code run through `run_in` under an unregistered identity has no
        // top frame to close over.
        let chain = match self.registry.get(module) {
            Some(top) => ScopeChain::with_frames(self.natives.clone(), [top, params]),
            None => ScopeChain::with_frames(self.natives.clone(), [params]),
        };

        let outcome = self.with_call_activation(module.clone(), chain, |active| {
            active.exec_block(&def.body)
        });

        match outcome.signal {
            Signal::Return => Outcome::normal(outcome.value),
            Signal::Error => outcome,
            Signal::Normal => Outcome::nil(),
            signal @ (Signal::Break | Signal::Continue) => illegal_control_flow(signal, loc).into(),
        }
    }

    /// Call a function value from host code, resolving `name` in the active
    /// chain exactly like a call node would.
    pub fn call(&mut self, name: &str, args: Vec<Value>) -> Outcome {
        let loc = Location::unlined(self.module.clone());
        let binding = match resolve_callee(&self.env, name, self.limits.max_alias_depth, &loc) {
            Ok(binding) => binding,
            Err(err) => return err.into(),
        };
        match binding.slot {
            BindingSlot::Native(func) => call_native(&func, &args, &loc),
            BindingSlot::Function(def) => self.call_function(&def, &binding.module, args, &loc),
            BindingSlot::Value(_) => not_a_function(name, &loc).into(),
        }
    }
}

/// Invoke a native function.
///
/// A raised value propagates unchanged; a message becomes a located
/// diagnostic naming the function.
fn call_native(func: &NativeFunction, args: &[Value], loc: &Location) -> Outcome {
    match func.call(args) {
        Ok(value) => Outcome::normal(value),
        Err(NativeError::Raise(value)) => Outcome::error(value),
        Err(NativeError::Message(message)) => {
            native_function_error(&func.name, &message, loc).into()
        }
    }
}

//! Call-target resolution and parameter binding.

use argon_ir::FunctionDef;

use crate::environment::{Binding, Frame, LocalScope, ScopeChain};
use crate::errors::{alias_depth_exceeded, not_a_function, undeclared_function, EvalResult, Location};
use crate::registry::ModuleId;
use crate::Value;

/// Resolve the binding a call to `name` invokes.
///
/// A plain binding holding a function reference is an alias: the referenced
/// name is looked up again, through the same chain, at most `max_hops`
/// times.
pub fn resolve_callee(
    chain: &ScopeChain,
    name: &str,
    max_hops: usize,
    loc: &Location,
) -> EvalResult<Binding> {
    let mut binding = chain
        .lookup(name)
        .ok_or_else(|| undeclared_function(name, loc))?;
    let mut hops = 0;
    loop {
        if binding.kind().is_callable() {
            return Ok(binding);
        }
        let Some(Value::FunctionRef(target)) = binding.value() else {
            return Err(not_a_function(name, loc));
        };
        if hops == max_hops {
            return Err(alias_depth_exceeded(name, max_hops, loc));
        }
        hops += 1;
        let target = target.name.clone();
        binding = chain
            .lookup(&target)
            .ok_or_else(|| undeclared_function(&target, loc))?;
    }
}

/// Build the argument frame for a user function.
///
/// Parameters bind positionally. Extra arguments are dropped; parameters
/// without an argument stay unbound.
pub fn bind_parameters(def: &FunctionDef, args: Vec<Value>, module: &ModuleId) -> LocalScope<Frame> {
    let frame: Frame = def
        .params
        .iter()
        .zip(args)
        .map(|(param, value)| (param.clone(), Binding::plain(value, module.clone())))
        .collect();
    LocalScope::new(frame)
}

//! Assignment and function definition.

use std::rc::Rc;

use argon_ir::{AssignKind, FunctionDef, Node, VariableRef};

use crate::errors::cannot_edit;
use crate::interpreter::Interpreter;
use crate::signal::Outcome;

impl Interpreter {
    /// `name = value` (`Plain`) or the preset form.
    ///
    /// The target is checked before `value` is evaluated, so assigning to a
    /// function never runs the right-hand side.
    pub(crate) fn eval_assign(
        &mut self,
        target: &VariableRef,
        value: &Node,
        mode: AssignKind,
    ) -> Outcome {
        if let Err(kind) = self.env.check_assignable(&target.name, mode) {
            return cannot_edit(kind, &self.loc(target.line)).into();
        }
        let value = match self.eval_node(value).value_unless_error() {
            Ok(value) => value,
            Err(error) => return error,
        };
        match self.env.assign(&target.name, value, mode, &self.module) {
            Ok(()) => Outcome::nil(),
            Err(kind) => cannot_edit(kind, &self.loc(target.line)).into(),
        }
    }

    /// Bind a function definition, recording the current module as its
    /// defining module.
    pub(crate) fn eval_function_def(&mut self, def: &Rc<FunctionDef>) -> Outcome {
        match self.env.define_function(Rc::clone(def), &self.module) {
            Ok(()) => {
                tracing::trace!(function = %def.name, module = %self.module, "defined function");
                Outcome::nil()
            }
            Err(kind) => cannot_edit(kind, &self.loc(def.line)).into(),
        }
    }
}

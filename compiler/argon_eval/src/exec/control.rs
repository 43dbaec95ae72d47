//! Control flow: if-chains, while loops and try/catch.
//!
//! Bodies run in their own frame; conditions run in the enclosing chain.
//! A loop keeps one frame for all of its passes, so body locals persist
//! from one pass to the next without being visible to the condition.

use argon_ir::{IfClause, Node};

use crate::environment::{Binding, Frame, LocalScope};
use crate::interpreter::Interpreter;
use crate::signal::{Outcome, Signal};

/// Variable the catch handler binds the error value to.
pub const ERROR_BINDING: &str = "err";

/// What a loop does with the outcome of one body pass.
#[derive(Clone, Debug, PartialEq)]
pub enum LoopAction {
    /// Re-check the condition (normal completion or `continue`).
    Next,
    /// Leave the loop normally.
    Exit,
    /// Leave the loop and hand this outcome to the enclosing block.
    Propagate(Outcome),
}

/// Classify a body outcome.
pub fn to_loop_action(outcome: Outcome) -> LoopAction {
    match outcome.signal {
        Signal::Normal | Signal::Continue => LoopAction::Next,
        Signal::Break => LoopAction::Exit,
        Signal::Return | Signal::Error => LoopAction::Propagate(outcome),
    }
}

impl Interpreter {
    /// Run the body of the first clause whose condition is truthy, or the
    /// else body when none is.
    ///
    /// A condition that raises stops the chain with its error.
    pub(crate) fn eval_if(&mut self, clauses: &[IfClause], else_body: &[Node]) -> Outcome {
        for clause in clauses {
            let condition = self.eval_node(&clause.condition);
            if condition.is_error() {
                return condition;
            }
            if condition.value.is_truthy() {
                return self.exec_scoped_block(&clause.body);
            }
        }
        self.exec_scoped_block(else_body)
    }

    /// Loop while `condition` is truthy.
    ///
    /// One frame lives for the whole loop and is pushed around each body
    /// pass. The condition is evaluated in the enclosing chain, before entry
    /// and after every pass. The result is always `Normal` with `nil` unless
    /// a `return` or error escapes the body.
    pub(crate) fn eval_while(&mut self, condition: &Node, body: &[Node]) -> Outcome {
        let frame = LocalScope::new(Frame::default());
        loop {
            let check = self.eval_node(condition);
            if check.is_error() {
                return check;
            }
            if !check.value.is_truthy() {
                return Outcome::nil();
            }
            let pass = self.with_frame_scope(&frame, |scoped| scoped.exec_block(body));
            match to_loop_action(pass) {
                LoopAction::Next => {}
                LoopAction::Exit => return Outcome::nil(),
                LoopAction::Propagate(outcome) => return outcome,
            }
        }
    }

    /// Run `body`; if it raises, run `handler` with the error bound to `err`.
    pub(crate) fn eval_try(&mut self, body: &[Node], handler: &[Node]) -> Outcome {
        let outcome = self.exec_scoped_block(body);
        if !outcome.is_error() {
            return outcome;
        }
        tracing::debug!(module = %self.module, error = %outcome.value, "caught error");
        self.with_env_scope(|scoped| {
            let module = scoped.module.clone();
            scoped
                .env
                .declare(ERROR_BINDING, Binding::plain(outcome.value, module));
            scoped.exec_block(handler)
        })
    }
}

//! Node dispatch.
//!
//! One exhaustive `match` over [`Node`]. Expression forms are handled here;
//! statements with their own scoping rules delegate to `exec`.

use argon_ir::{Line, Node, OperatorKind, VariableRef};

use super::Interpreter;
use crate::environment::BindingSlot;
use crate::errors::{invalid_list_element, missing_return_value, undeclared_variable};
use crate::operators::{self, Fold};
use crate::signal::{settle, Outcome};
use crate::stack::ensure_sufficient_stack;
use crate::Value;

impl Interpreter {
    /// Evaluate one node.
    pub(crate) fn eval_node(&mut self, node: &Node) -> Outcome {
        ensure_sufficient_stack(|| self.eval_node_inner(node))
    }

    fn eval_node_inner(&mut self, node: &Node) -> Outcome {
        match node {
            Node::Empty => Outcome::nil(),
            Node::Literal(lit) => Outcome::normal(Value::from_literal(lit)),
            Node::Variable(var) => self.eval_variable(var),
            Node::Operator {
                kind,
                operands,
                line,
            } => settle(self.eval_operator(*kind, operands, *line)),
            Node::Call { target, args, line } => self.eval_call(target, args, *line),
            Node::ErrorWrap(inner) => Outcome::error(self.eval_node(inner).value),
            Node::List { elements, line } => self.eval_list(elements, *line),
            Node::TryCatch { body, handler } => self.eval_try(body, handler),
            Node::While { condition, body } => self.eval_while(condition, body),
            Node::If { clauses, else_body } => self.eval_if(clauses, else_body),
            Node::Import {
                path,
                selected,
                line,
            } => self.eval_import(path, selected.as_deref(), *line),
            Node::Assign {
                target,
                value,
                kind,
            } => self.eval_assign(target, value, *kind),
            Node::FunctionDef(def) => self.eval_function_def(def),
            Node::Return { value, line } => self.eval_return(value.as_deref(), *line),
            Node::Break => Outcome::break_loop(),
            Node::Continue => Outcome::continue_loop(),
        }
    }

    /// Execute statements in order against the active chain.
    ///
    /// `Empty` statements are skipped. The first non-`Normal` outcome ends
    /// the sequence and is returned; otherwise the result is the last
    /// statement's value.
    pub(crate) fn exec_sequence(
        &mut self,
        block: &[Node],
        mut trace: Option<&mut Vec<Outcome>>,
    ) -> Outcome {
        let mut last = Value::Nil;
        for node in block {
            if matches!(node, Node::Empty) {
                continue;
            }
            tracing::trace!(module = %self.module, line = ?node.line(), "statement");
            let outcome = self.eval_node(node);
            if let Some(trace) = trace.as_deref_mut() {
                trace.push(outcome.clone());
            }
            if outcome.signal.is_terminal() {
                return outcome;
            }
            last = outcome.value;
        }
        Outcome::normal(last)
    }

    /// Execute a block body in the active chain, without a trace.
    #[inline]
    pub(crate) fn exec_block(&mut self, block: &[Node]) -> Outcome {
        self.exec_sequence(block, None)
    }

    /// Execute a block body in a fresh innermost frame.
    pub(crate) fn exec_scoped_block(&mut self, block: &[Node]) -> Outcome {
        self.with_env_scope(|scoped| scoped.exec_block(block))
    }

    fn eval_variable(&mut self, var: &VariableRef) -> Outcome {
        match self.env.lookup(&var.name) {
            Some(binding) => match binding.slot {
                BindingSlot::Value(value) => Outcome::normal(value),
                BindingSlot::Function(_) | BindingSlot::Native(_) => {
                    Outcome::normal(Value::function_ref(&var.name, var.line))
                }
            },
            None => undeclared_variable(&var.name, &self.loc(var.line)).into(),
        }
    }

    fn eval_operator(
        &mut self,
        kind: OperatorKind,
        operands: &[Node],
        line: Line,
    ) -> Result<Outcome, Outcome> {
        let Some((first, rest)) = operands.split_first() else {
            return Ok(Outcome::nil());
        };
        let first = self.eval_node(first).value_unless_error()?;
        let mut acc = match operators::seed(kind, first) {
            Fold::Continue(v) => v,
            Fold::Stop(v) => return Ok(Outcome::normal(v)),
        };
        let loc = self.loc(line);
        for operand in rest {
            let next = self.eval_node(operand).value_unless_error()?;
            match operators::combine(kind, acc, next, &loc)? {
                Fold::Continue(v) => acc = v,
                Fold::Stop(v) => return Ok(Outcome::normal(v)),
            }
        }
        Ok(Outcome::normal(acc))
    }

    fn eval_list(&mut self, elements: &[Node], line: Line) -> Outcome {
        let mut items = Vec::with_capacity(elements.len());
        for element in elements {
            let outcome = self.eval_node(element);
            if outcome.is_error() {
                return invalid_list_element(&self.loc(line)).into();
            }
            items.push(outcome.value);
        }
        Outcome::normal(Value::list(items))
    }

    fn eval_return(&mut self, value: Option<&Node>, line: Line) -> Outcome {
        let Some(node) = value else {
            return Outcome::returned(Value::Nil);
        };
        let outcome = self.eval_node(node);
        if outcome.signal.is_terminal() {
            return outcome;
        }
        if !node.yields_value() {
            return missing_return_value(&self.loc(line)).into();
        }
        Outcome::returned(outcome.value)
    }
}

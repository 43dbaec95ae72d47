//! Operator folding.
//!
//! Operators take an operand list and fold it left to right: the first
//! operand seeds the accumulator, and each later operand is combined into it.
//! The operator set is fixed, so dispatch is a plain `match` over
//! [`OperatorKind`].
//!
//! Evaluating the operands is the interpreter's job. This module only decides
//! how two already-evaluated values combine and whether the fold stops early.

use argon_ir::OperatorKind;

use crate::errors::{not_a_list, not_a_number, not_a_scalar, EvalError, EvalResult, Location};
use crate::render::to_text;
use crate::Value;

/// What the fold does after one step.
#[derive(Clone, Debug, PartialEq)]
pub enum Fold {
    /// Keep folding with this accumulator.
    Continue(Value),
    /// The result is final; remaining operands are not evaluated.
    Stop(Value),
}

impl Fold {
    pub fn into_value(self) -> Value {
        match self {
            Fold::Continue(v) | Fold::Stop(v) => v,
        }
    }
}

/// Seed the accumulator with the first operand.
///
/// `Or` stops straight away on a truthy first operand. Everything else
/// starts folding.
pub fn seed(kind: OperatorKind, first: Value) -> Fold {
    if kind == OperatorKind::Or && first.is_truthy() {
        Fold::Stop(first)
    } else {
        Fold::Continue(first)
    }
}

/// Combine the accumulator with the next operand.
pub fn combine(kind: OperatorKind, acc: Value, new: Value, loc: &Location) -> EvalResult<Fold> {
    use OperatorKind as Op;

    let value = match kind {
        Op::And => {
            return Ok(if acc.is_truthy() && new.is_truthy() {
                Fold::Continue(new)
            } else {
                Fold::Stop(Value::Boolean(false))
            });
        }
        Op::Or => {
            return Ok(if new.is_truthy() {
                Fold::Stop(new)
            } else {
                Fold::Continue(new)
            });
        }
        Op::In => Value::Boolean(contains(&acc, &new, loc)?),
        Op::NotIn => Value::Boolean(!contains(&acc, &new, loc)?),
        Op::Eq => Value::Boolean(acc == new),
        Op::Ne => Value::Boolean(acc != new),
        Op::Add => add(&acc, &new, loc)?,
        Op::Le | Op::Ge | Op::Lt | Op::Gt => {
            let (a, b) = numbers(&acc, &new, loc)?;
            Value::Boolean(compare(kind, a, b))
        }
        Op::Sub | Op::Mul | Op::Mod | Op::FloorDiv | Op::Div | Op::Root | Op::Pow => {
            let (a, b) = numbers(&acc, &new, loc)?;
            Value::Number(arithmetic(kind, a, b))
        }
    };
    Ok(Fold::Continue(value))
}

/// Membership test for `in` / `not in`.
fn contains(needle: &Value, haystack: &Value, loc: &Location) -> Result<bool, EvalError> {
    if matches!(needle, Value::List(_)) {
        return Err(not_a_scalar(needle, loc));
    }
    let Some(items) = haystack.as_list() else {
        return Err(not_a_list(haystack, loc));
    };
    Ok(items.iter().any(|item| item == needle))
}

/// `+`: string concatenation if either side is a string, else numeric sum.
fn add(a: &Value, b: &Value, loc: &Location) -> EvalResult<Value> {
    if a.is_string() || b.is_string() {
        let mut text = to_text(a, false);
        text.push_str(&to_text(b, false));
        return Ok(Value::from(text));
    }
    let (a, b) = numbers(a, b, loc)?;
    Ok(Value::Number(a + b))
}

fn numbers(a: &Value, b: &Value, loc: &Location) -> EvalResult<(f64, f64)> {
    let a = a.to_number().ok_or_else(|| not_a_number(a, loc))?;
    let b = b.to_number().ok_or_else(|| not_a_number(b, loc))?;
    Ok((a, b))
}

fn compare(kind: OperatorKind, a: f64, b: f64) -> bool {
    match kind {
        OperatorKind::Le => a <= b,
        OperatorKind::Ge => a >= b,
        OperatorKind::Lt => a < b,
        OperatorKind::Gt => a > b,
        _ => false,
    }
}

/// IEEE semantics throughout: division by zero gives an infinity or NaN.
fn arithmetic(kind: OperatorKind, a: f64, b: f64) -> f64 {
    match kind {
        OperatorKind::Sub => a - b,
        OperatorKind::Mul => a * b,
        OperatorKind::Mod => a % b,
        OperatorKind::FloorDiv => (a / b).floor(),
        OperatorKind::Div => a / b,
        OperatorKind::Root => a.powf(1.0 / b),
        OperatorKind::Pow => a.powf(b),
        _ => f64::NAN,
    }
}

/// Fold a list of already-evaluated operands. Used where operands need no
/// interpreter (tests, constant folding by embedders).
pub fn fold_values(
    kind: OperatorKind,
    operands: impl IntoIterator<Item = Value>,
    loc: &Location,
) -> EvalResult<Value> {
    let mut operands = operands.into_iter();
    let Some(first) = operands.next() else {
        return Ok(Value::Nil);
    };
    let mut acc = match seed(kind, first) {
        Fold::Continue(v) => v,
        Fold::Stop(v) => return Ok(v),
    };
    for operand in operands {
        match combine(kind, acc, operand, loc)? {
            Fold::Continue(v) => acc = v,
            Fold::Stop(v) => return Ok(v),
        }
    }
    Ok(acc)
}

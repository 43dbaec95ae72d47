//! Syntax tree nodes.
//!
//! `Node` is a closed sum type: adding a variant forces every evaluator
//! `match` to handle it.

use std::rc::Rc;

use crate::{Line, OperatorKind};

/// A statement sequence (block body, loop body, module top level).
pub type Block = Vec<Node>;

/// A scalar literal as written in source.
///
/// Lists are built by `Node::List`, not literals.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum Literal {
    String(String),
    Number(f64),
    Boolean(bool),
    Nil,
}

/// A use of a name.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct VariableRef {
    pub name: String,
    pub line: Line,
}

impl VariableRef {
    pub fn new(name: impl Into<String>, line: Line) -> Self {
        VariableRef {
            name: name.into(),
            line,
        }
    }
}

/// How an assignment statement picks its target frame.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum AssignKind {
    /// Writes the innermost frame only.
    Plain,
    /// Writes the nearest frame that already holds the name, else the
    /// innermost frame.
    Preset,
}

/// A user-defined function.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct FunctionDef {
    pub name: String,
    pub params: Vec<String>,
    pub body: Block,
    pub line: Line,
}

/// One `if` / `else if` arm.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct IfClause {
    pub condition: Node,
    pub body: Block,
}

/// A syntax tree node.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum Node {
    /// Blank statement slot; skipped when a block runs.
    Empty,
    Literal(Literal),
    Variable(VariableRef),
    Operator {
        kind: OperatorKind,
        operands: Vec<Node>,
        line: Line,
    },
    Call {
        target: VariableRef,
        args: Vec<Node>,
        line: Line,
    },
    /// Evaluates `inner` and raises its value as an error.
    ErrorWrap(Box<Node>),
    List {
        elements: Vec<Node>,
        line: Line,
    },
    TryCatch {
        body: Block,
        handler: Block,
    },
    While {
        condition: Box<Node>,
        body: Block,
    },
    If {
        clauses: Vec<IfClause>,
        else_body: Block,
    },
    Import {
        path: Box<Node>,
        /// `None` imports every top-level binding.
        selected: Option<Vec<String>>,
        line: Line,
    },
    Assign {
        target: VariableRef,
        value: Box<Node>,
        kind: AssignKind,
    },
    FunctionDef(Rc<FunctionDef>),
    Return {
        value: Option<Box<Node>>,
        line: Line,
    },
    Break,
    Continue,
}

impl Node {
    pub fn string(s: impl Into<String>) -> Self {
        Node::Literal(Literal::String(s.into()))
    }

    pub fn number(n: f64) -> Self {
        Node::Literal(Literal::Number(n))
    }

    pub fn boolean(b: bool) -> Self {
        Node::Literal(Literal::Boolean(b))
    }

    pub fn nil() -> Self {
        Node::Literal(Literal::Nil)
    }

    pub fn var(name: impl Into<String>, line: u32) -> Self {
        Node::Variable(VariableRef::new(name, Line(line)))
    }

    pub fn op(kind: OperatorKind, operands: Vec<Node>) -> Self {
        Node::Operator {
            kind,
            operands,
            line: Line::DUMMY,
        }
    }

    pub fn op_at(kind: OperatorKind, operands: Vec<Node>, line: u32) -> Self {
        Node::Operator {
            kind,
            operands,
            line: Line(line),
        }
    }

    pub fn call(name: impl Into<String>, args: Vec<Node>, line: u32) -> Self {
        let line = Line(line);
        Node::Call {
            target: VariableRef::new(name, line),
            args,
            line,
        }
    }

    pub fn error(inner: Node) -> Self {
        Node::ErrorWrap(Box::new(inner))
    }

    pub fn list(elements: Vec<Node>, line: u32) -> Self {
        Node::List {
            elements,
            line: Line(line),
        }
    }

    pub fn assign(name: impl Into<String>, value: Node, line: u32) -> Self {
        Node::Assign {
            target: VariableRef::new(name, Line(line)),
            value: Box::new(value),
            kind: AssignKind::Plain,
        }
    }

    pub fn preset(name: impl Into<String>, value: Node, line: u32) -> Self {
        Node::Assign {
            target: VariableRef::new(name, Line(line)),
            value: Box::new(value),
            kind: AssignKind::Preset,
        }
    }

    pub fn function(
        name: impl Into<String>,
        params: &[&str],
        body: Block,
        line: u32,
    ) -> Self {
        Node::FunctionDef(Rc::new(FunctionDef {
            name: name.into(),
            params: params.iter().map(|p| (*p).to_string()).collect(),
            body,
            line: Line(line),
        }))
    }

    pub fn ret(value: Option<Node>, line: u32) -> Self {
        Node::Return {
            value: value.map(Box::new),
            line: Line(line),
        }
    }

    pub fn while_loop(condition: Node, body: Block) -> Self {
        Node::While {
            condition: Box::new(condition),
            body,
        }
    }

    pub fn if_else(clauses: Vec<(Node, Block)>, else_body: Block) -> Self {
        Node::If {
            clauses: clauses
                .into_iter()
                .map(|(condition, body)| IfClause { condition, body })
                .collect(),
            else_body,
        }
    }

    pub fn try_catch(body: Block, handler: Block) -> Self {
        Node::TryCatch { body, handler }
    }

    pub fn import(path: Node, selected: Option<&[&str]>, line: u32) -> Self {
        Node::Import {
            path: Box::new(path),
            selected: selected.map(|names| names.iter().map(|n| (*n).to_string()).collect()),
            line: Line(line),
        }
    }

    /// Whether this node produces a value usable as an expression.
    ///
    /// Statement forms evaluate for their effect only; `return` of one is
    /// rejected by the evaluator.
    pub fn yields_value(&self) -> bool {
        !matches!(
            self,
            Node::Empty
                | Node::Assign { .. }
                | Node::FunctionDef(_)
                | Node::Import { .. }
                | Node::While { .. }
                | Node::If { .. }
                | Node::TryCatch { .. }
        )
    }

    /// Best-known source line, for diagnostics on nodes without their own.
    pub fn line(&self) -> Option<Line> {
        match self {
            Node::Variable(v) => Some(v.line),
            Node::Operator { line, .. }
            | Node::Call { line, .. }
            | Node::List { line, .. }
            | Node::Import { line, .. }
            | Node::Return { line, .. } => Some(*line),
            Node::Assign { target, .. } => Some(target.line),
            Node::FunctionDef(def) => Some(def.line),
            Node::ErrorWrap(inner) => inner.line(),
            Node::While { condition, .. } => condition.line(),
            Node::If { clauses, .. } => clauses.first().and_then(|c| c.condition.line()),
            Node::Empty
            | Node::Literal(_)
            | Node::TryCatch { .. }
            | Node::Break
            | Node::Continue => None,
        }
    }
}

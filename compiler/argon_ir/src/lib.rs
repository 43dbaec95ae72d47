//! Argon IR - syntax tree types.
//!
//! This crate contains the data structures the parser hands to the evaluator:
//! - `Line` for source locations
//! - `OperatorKind` for the binary-fold operators
//! - `Node` and its payload structs (`VariableRef`, `FunctionDef`, `IfClause`)
//!
//! The tree is plain owned data (`Box`/`Vec`). Function definitions are
//! reference counted so the evaluator can store them in bindings without
//! copying their bodies.

mod line;
mod node;
mod operators;

pub use line::Line;
pub use node::{AssignKind, Block, FunctionDef, IfClause, Literal, Node, VariableRef};
pub use operators::OperatorKind;

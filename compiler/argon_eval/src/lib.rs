//! Argon Eval - evaluator for the Argon scripting language.
//!
//! Takes parsed programs (`argon_ir::Node` sequences) and runs them.
//!
//! # Architecture
//!
//! - `Value` / `Outcome`: dynamically typed values tagged with a control-flow
//!   `Signal`. Errors, returns and loop exits are ordinary outcomes.
//! - `ScopeChain`: ordered shared frames; natives at the root, then a
//!   module's top frame, then call and block frames.
//! - `ModuleRegistry`: module identity to top-level frame. User functions
//!   run against the top frame of the module that defined them.
//! - `ModuleLoader`: pluggable import resolution.
//! - `Interpreter`: node dispatch, calls and imports.
//!
//! # Example
//!
//! ```
//! use argon_eval::{Interpreter, Value};
//! use argon_ir::{Node, OperatorKind};
//!
//! let program = vec![
//!     Node::assign("x", Node::number(2.0), 0),
//!     Node::op(OperatorKind::Add, vec![Node::var("x", 1), Node::string(" apples")]),
//! ];
//! let mut interp = Interpreter::new();
//! assert_eq!(interp.run_main("main.ar", &program), Ok(Value::string("2 apples")));
//! ```

pub mod environment;
pub mod errors;
pub mod exec;
pub mod interpreter;
pub mod limits;
pub mod loader;
pub mod native;
pub mod operators;
pub mod registry;
pub mod render;
pub mod signal;
mod stack;
mod value;

pub use environment::{Binding, BindingKind, BindingSlot, Frame, LocalScope, ScopeChain};
pub use errors::{EvalError, EvalErrorKind, EvalResult, Location, RunError};
pub use interpreter::{Interpreter, InterpreterBuilder, Run};
pub use limits::EvalLimits;
pub use loader::{ImportError, MemoryLoader, ModuleLoader, ModuleSource, NoLoader, SourceLoader};
pub use native::{NativeError, NativeFn, NativeFunction, NativeResult};
pub use registry::{ModuleId, ModuleRegistry};
pub use render::to_text;
pub use signal::{Outcome, Signal};
pub use value::{FunctionRef, Value};

#[cfg(test)]
mod tests;

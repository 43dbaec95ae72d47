//! Statement execution.
//!
//! - `control`: if-chains, while loops, try/catch
//! - `assign`: assignment and function definition
//! - `call`: call-target resolution and argument handling

pub mod assign;
pub mod call;
pub mod control;

//! Interpreter-level tests, grouped by feature.

#![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

mod control_tests;

use std::sync::Once;

use argon_ir::Node;

use crate::{Interpreter, InterpreterBuilder, NativeError, Outcome, Value};

static TRACING_INIT: Once = Once::new();

/// Install a subscriber when `RUST_LOG` is set, e.g.
/// `RUST_LOG=argon_eval=trace cargo test`.
pub(crate) fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            tracing_subscriber::registry()
                .with(fmt::layer().with_test_writer())
                .with(EnvFilter::from_default_env())
                .init();
        }
    });
}

/// Builder with the natives the tests lean on: `len(list)` and `fail(msg)`.
pub(crate) fn builder() -> InterpreterBuilder {
    init_tracing();
    Interpreter::builder()
        .native("len", |args| match args.first() {
            Some(Value::List(items)) => {
                #[expect(clippy::cast_precision_loss, reason = "test lists are tiny")]
                let len = items.len() as f64;
                Ok(Value::Number(len))
            }
            _ => Err(NativeError::message("expected a list")),
        })
        .native("fail", |args| {
            Err(NativeError::Raise(args.first().cloned().unwrap_or(Value::Nil)))
        })
}

/// Run `program` as `main.ar` and return the final outcome.
pub(crate) fn run(program: &[Node]) -> Outcome {
    builder().build().run_module("main.ar", program).outcome
}

/// Run `program` and return its value, panicking on any uncaught error.
pub(crate) fn eval(program: &[Node]) -> Value {
    builder().build().run_main("main.ar", program).unwrap()
}

/// Run `program` and return the error value it raised.
pub(crate) fn eval_err(program: &[Node]) -> String {
    let outcome = run(program);
    assert!(outcome.is_error(), "expected an error, got {outcome:?}");
    outcome.value.to_string()
}

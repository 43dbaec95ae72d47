//! Blocks, conditionals, loops, try/catch and signal propagation.

use argon_ir::{Node, OperatorKind as Op};
use pretty_assertions::assert_eq;

use super::{builder, eval, eval_err, run};
use crate::{ModuleId, Outcome, RunError, Signal, Value};

fn n(x: f64) -> Value {
    Value::Number(x)
}

fn lt(name: &str, bound: f64) -> Node {
    Node::op(Op::Lt, vec![Node::var(name, 0), Node::number(bound)])
}

fn incr(name: &str, by: Node, line: u32) -> Node {
    Node::preset(name, Node::op(Op::Add, vec![Node::var(name, line), by]), line)
}

#[test]
fn test_empty_program_yields_nil() {
    assert_eq!(run(&[]), Outcome::nil());
    assert_eq!(run(&[Node::Empty, Node::Empty]), Outcome::nil());
}

#[test]
fn test_value_is_last_statement() {
    let program = [Node::number(1.0), Node::Empty, Node::string("last")];
    assert_eq!(eval(&program), Value::from("last"));
}

#[test]
fn test_trace_records_each_statement() {
    let program = [
        Node::assign("x", Node::number(1.0), 0),
        Node::Empty,
        Node::var("x", 2),
        Node::Break,
        Node::number(99.0),
    ];
    let run = builder().build().run_module("main.ar", &program);
    assert_eq!(
        run.trace,
        vec![Outcome::nil(), Outcome::normal(n(1.0)), Outcome::break_loop()]
    );
    assert_eq!(run.outcome, Outcome::break_loop());
}

#[test]
fn test_plain_assignment_round_trip() {
    let program = [
        Node::assign("x", Node::number(1.0), 0),
        Node::assign("x", Node::string("two"), 1),
        Node::var("x", 2),
    ];
    assert_eq!(eval(&program), Value::from("two"));
}

#[test]
fn test_bounded_while_loop() {
    let program = [
        Node::assign("i", Node::number(0.0), 0),
        Node::while_loop(lt("i", 3.0), vec![incr("i", Node::number(1.0), 1)]),
        Node::var("i", 2),
    ];
    assert_eq!(eval(&program), n(3.0));
}

#[test]
fn test_while_result_is_nil() {
    let program = [
        Node::assign("i", Node::number(0.0), 0),
        Node::while_loop(lt("i", 2.0), vec![incr("i", Node::number(1.0), 1)]),
    ];
    assert_eq!(run(&program), Outcome::nil());
}

#[test]
fn test_while_false_never_runs_body() {
    let program = [
        Node::while_loop(Node::boolean(false), vec![Node::error(Node::string("ran"))]),
        Node::string("done"),
    ];
    assert_eq!(eval(&program), Value::from("done"));
}

#[test]
fn test_break_exits_loop() {
    // while true { i += 1; if i >= 4 { break } }
    let program = [
        Node::assign("i", Node::number(0.0), 0),
        Node::while_loop(
            Node::boolean(true),
            vec![
                incr("i", Node::number(1.0), 2),
                Node::if_else(
                    vec![(
                        Node::op(Op::Ge, vec![Node::var("i", 3), Node::number(4.0)]),
                        vec![Node::Break],
                    )],
                    vec![],
                ),
            ],
        ),
        Node::var("i", 5),
    ];
    assert_eq!(eval(&program), n(4.0));
}

#[test]
fn test_continue_rechecks_condition() {
    // Sum the odd numbers below 6.
    let program = [
        Node::assign("i", Node::number(0.0), 0),
        Node::assign("sum", Node::number(0.0), 1),
        Node::while_loop(
            lt("i", 6.0),
            vec![
                incr("i", Node::number(1.0), 3),
                Node::if_else(
                    vec![(
                        Node::op(
                            Op::Eq,
                            vec![
                                Node::op(Op::Mod, vec![Node::var("i", 4), Node::number(2.0)]),
                                Node::number(0.0),
                            ],
                        ),
                        vec![Node::Continue],
                    )],
                    vec![],
                ),
                incr("sum", Node::var("i", 5), 5),
            ],
        ),
        Node::var("sum", 7),
    ];
    assert_eq!(eval(&program), n(9.0));
}

#[test]
fn test_loop_frame_persists_across_passes() {
    // `seen` is declared local to the loop frame on the first pass and still
    // there on the next.
    let program = [
        Node::assign("i", Node::number(0.0), 0),
        Node::assign("out", Node::nil(), 0),
        Node::while_loop(
            lt("i", 2.0),
            vec![
                Node::if_else(
                    vec![(
                        Node::op(Op::Eq, vec![Node::var("i", 1), Node::number(1.0)]),
                        vec![Node::preset("out", Node::var("seen", 1), 1)],
                    )],
                    vec![],
                ),
                Node::assign("seen", Node::string("kept"), 2),
                incr("i", Node::number(1.0), 3),
            ],
        ),
        Node::var("out", 4),
    ];
    assert_eq!(eval(&program), Value::from("kept"));
}

#[test]
fn test_while_condition_reads_enclosing_scope() {
    // The plain `flag = false` declares a loop local; the condition keeps
    // reading the outer `flag`, so only the break ends the loop.
    let program = [
        Node::assign("flag", Node::boolean(true), 0),
        Node::assign("n", Node::number(0.0), 1),
        Node::while_loop(
            Node::var("flag", 2),
            vec![
                Node::assign("flag", Node::boolean(false), 3),
                incr("n", Node::number(1.0), 4),
                Node::if_else(
                    vec![(
                        Node::op(Op::Ge, vec![Node::var("n", 5), Node::number(3.0)]),
                        vec![Node::Break],
                    )],
                    vec![],
                ),
            ],
        ),
        Node::list(vec![Node::var("flag", 7), Node::var("n", 7)], 7),
    ];
    assert_eq!(eval(&program), Value::list(vec![Value::Boolean(true), n(3.0)]));
}

#[test]
fn test_condition_error_propagates() {
    let program = [Node::while_loop(Node::var("nope", 3), vec![])];
    assert_eq!(eval_err(&program), "undeclared variable nope: main.ar:4");
}

#[test]
fn test_if_chain_picks_first_truthy() {
    let program = [
        Node::assign("x", Node::number(2.0), 0),
        Node::if_else(
            vec![
                (
                    Node::op(Op::Eq, vec![Node::var("x", 1), Node::number(1.0)]),
                    vec![Node::string("one")],
                ),
                (
                    Node::op(Op::Eq, vec![Node::var("x", 2), Node::number(2.0)]),
                    vec![Node::string("two")],
                ),
                (Node::boolean(true), vec![Node::string("fallback")]),
            ],
            vec![Node::string("else")],
        ),
    ];
    assert_eq!(eval(&program), Value::from("two"));
}

#[test]
fn test_if_else_branch_and_locals() {
    let program = [
        Node::assign("x", Node::number(1.0), 0),
        Node::if_else(
            vec![(Node::boolean(false), vec![Node::string("then")])],
            vec![Node::assign("x", Node::number(50.0), 2)],
        ),
        Node::var("x", 3),
    ];
    // The plain assignment declared a local of the else frame.
    assert_eq!(eval(&program), n(1.0));
}

#[test]
fn test_if_condition_error_propagates() {
    let program = [Node::if_else(
        vec![(Node::error(Node::string("cond")), vec![Node::string("then")])],
        vec![Node::string("else")],
    )];
    assert_eq!(eval_err(&program), "cond");
}

#[test]
fn test_try_binds_err() {
    let program = [Node::try_catch(
        vec![Node::error(Node::string("boom"))],
        vec![Node::var("err", 1)],
    )];
    assert_eq!(run(&program), Outcome::normal(Value::from("boom")));
}

#[test]
fn test_try_catches_eval_errors_as_strings() {
    let program = [
        Node::assign("msg", Node::nil(), 0),
        Node::try_catch(
            vec![Node::var("missing", 4)],
            vec![Node::preset("msg", Node::var("err", 5), 5)],
        ),
        Node::var("msg", 6),
    ];
    assert_eq!(eval(&program), Value::from("undeclared variable missing: main.ar:5"));
}

#[test]
fn test_try_passes_other_outcomes_through() {
    let handler = vec![Node::string("handled")];
    assert_eq!(
        run(&[Node::try_catch(vec![Node::number(3.0)], handler.clone())]),
        Outcome::normal(n(3.0))
    );
    assert_eq!(
        run(&[Node::try_catch(vec![Node::Break], handler)]),
        Outcome::break_loop()
    );
}

#[test]
fn test_handler_error_propagates() {
    let program = [Node::try_catch(
        vec![Node::error(Node::string("first"))],
        vec![Node::error(Node::op(
            Op::Add,
            vec![Node::string("again: "), Node::var("err", 1)],
        ))],
    )];
    assert_eq!(eval_err(&program), "again: first");
}

#[test]
fn test_err_is_local_to_handler() {
    let program = [
        Node::try_catch(vec![Node::error(Node::number(1.0))], vec![]),
        Node::var("err", 3),
    ];
    assert_eq!(eval_err(&program), "undeclared variable err: main.ar:4");
}

#[test]
fn test_list_literal() {
    let program = [Node::list(
        vec![Node::number(1.0), Node::string("a"), Node::list(vec![], 0)],
        0,
    )];
    assert_eq!(
        eval(&program),
        Value::list(vec![n(1.0), Value::from("a"), Value::list(vec![])])
    );
}

#[test]
fn test_list_element_error() {
    let program = [Node::list(vec![Node::number(1.0), Node::var("nope", 8)], 8)];
    assert_eq!(eval_err(&program), "invalid value: main.ar:9");
}

#[test]
fn test_error_wrap_forces_error_signal() {
    let outcome = run(&[Node::error(Node::list(vec![Node::number(1.0)], 0))]);
    assert_eq!(outcome.signal, Signal::Error);
    assert_eq!(outcome.value, Value::list(vec![n(1.0)]));
}

#[test]
fn test_error_stops_the_sequence() {
    let program = [
        Node::assign("x", Node::number(1.0), 0),
        Node::error(Node::string("stop")),
        Node::assign("x", Node::number(2.0), 2),
    ];
    let mut interp = builder().build();
    let run = interp.run_module("main.ar", &program);
    assert!(run.outcome.is_error());
    assert_eq!(run.trace.len(), 2);
    assert_eq!(interp.module_value(&ModuleId::new("main.ar"), "x"), Some(n(1.0)));
}

#[test]
fn test_run_main_reports_uncaught_and_stray_signals() {
    let mut interp = builder().build();
    assert_eq!(
        interp.run_main("a.ar", &[Node::error(Node::string("bad"))]),
        Err(RunError::Uncaught(Value::from("bad")))
    );
    assert_eq!(
        interp.run_main("b.ar", &[Node::Continue]),
        Err(RunError::StrayLoopControl {
            signal: Signal::Continue
        })
    );
    assert_eq!(
        interp.run_main("c.ar", &[Node::ret(Some(Node::number(7.0)), 0), Node::number(8.0)]),
        Ok(n(7.0))
    );
}

#[test]
fn test_return_without_value() {
    assert_eq!(run(&[Node::ret(None, 0)]), Outcome::returned(Value::Nil));
}

#[test]
fn test_return_of_statement_form_is_rejected() {
    let program = [Node::ret(Some(Node::assign("x", Node::number(1.0), 3)), 3)];
    assert_eq!(eval_err(&program), "return statement must return a value: main.ar:4");
}

#[test]
fn test_return_escapes_nested_blocks() {
    let program = [
        Node::while_loop(
            Node::boolean(true),
            vec![Node::if_else(
                vec![(Node::boolean(true), vec![Node::ret(Some(Node::string("out")), 2)])],
                vec![],
            )],
        ),
        Node::string("unreachable"),
    ];
    assert_eq!(run(&program), Outcome::returned(Value::from("out")));
}

#[test]
fn test_assigning_to_a_function_fails_before_evaluating() {
    let program = [
        Node::function("f", &[], vec![], 0),
        Node::assign("f", Node::var("nope", 1), 1),
    ];
    assert_eq!(eval_err(&program), "cannot edit func variable: main.ar:2");

    let program = [Node::preset("len", Node::number(1.0), 4)];
    assert_eq!(eval_err(&program), "cannot edit native variable: main.ar:5");
}

#[test]
fn test_plain_assignment_cannot_shadow_native() {
    let program = [
        Node::assign("len", Node::number(1.0), 0),
        Node::var("len", 1),
    ];
    assert_eq!(eval_err(&program), "cannot edit native variable: main.ar:1");

    // Also from inside a nested block.
    let program = [Node::if_else(
        vec![(Node::boolean(true), vec![Node::assign("len", Node::nil(), 2)])],
        vec![],
    )];
    assert_eq!(eval_err(&program), "cannot edit native variable: main.ar:3");
}

use std::{cell::RefCell, rc::Rc};

use egg_interpreter::{
    global_environment, parse, run, Environment, Evaluator, Expression, InterpreterError,
    PrintHandler, RuntimeError, SyntaxError, Value,
};
use pretty_assertions::assert_eq;

fn run_captured(source: &str) -> (Result<Value, InterpreterError>, String) {
    let printer = Rc::new(PrintHandler::buffer());
    let root = global_environment();
    let result = Evaluator::with_print_handler(Rc::clone(&printer)).run(source, &root);
    (result, printer.output())
}

fn run_ok(source: &str) -> Value {
    match run_captured(source).0 {
        Ok(value) => value,
        Err(error) => panic!("expected {} to evaluate but got error: {}", source, error),
    }
}

fn run_err(source: &str) -> InterpreterError {
    match run_captured(source).0 {
        Err(error) => error,
        Ok(value) => panic!("expected {} to fail but got {}", source, value),
    }
}

#[test]
fn literals_round_trip() {
    assert_eq!(run_ok("\"abc\""), Value::String("abc".into()));
    assert_eq!(run_ok("123"), Value::Number(123.0));
}

#[test]
fn parsing_is_deterministic() {
    let source = "do(define(x, 1), print(+(x, 2)))";
    assert_eq!(parse(source), parse(source));

    let invalid = "do(define(x 1))";
    assert_eq!(parse(invalid), parse(invalid));
    assert!(matches!(
        parse(invalid),
        Err(SyntaxError::ExpectedSeparator { found: '1', .. })
    ));
}

#[test]
fn set_mutates_rather_than_shadows() {
    assert_eq!(run_ok("do(define(x, 1), set(x, 2), x)"), Value::Number(2.0));
}

#[test]
fn only_false_is_falsy() {
    assert_eq!(run_ok("if(false, 1, 2)"), Value::Number(2.0));
    assert_eq!(run_ok("if(0, 1, 2)"), Value::Number(1.0));
}

#[test]
fn closure_application() {
    assert_eq!(run_ok("fun(a, b, +(a, b))(3, 4)"), Value::Number(7.0));
    assert_eq!(
        run_err("fun(a, b, +(a, b))(3)"),
        InterpreterError::Runtime(RuntimeError::UndefinedBinding("b".into()))
    );
}

#[test]
fn undefined_names() {
    assert_eq!(
        run_err("set(y, 1)"),
        InterpreterError::Runtime(RuntimeError::UndefinedAssignment("y".into()))
    );
    assert_eq!(
        run_err("y"),
        InterpreterError::Runtime(RuntimeError::UndefinedBinding("y".into()))
    );
}

#[test]
fn while_false_never_runs_body() {
    let (result, output) = run_captured("while(false, print(1))");
    assert_eq!(result, Ok(Value::Boolean(false)));
    assert_eq!(output, "");
}

#[test]
fn nested_closures_capture_lexically() {
    let source = "
    do(define(make_adder, fun(base, fun(n, +(base, n)))),
       define(add_ten, make_adder(10)),
       # `base` is still reachable after make_adder has returned
       add_ten(5))
    ";
    assert_eq!(run_ok(source), Value::Number(15.0));
}

#[test]
fn array_primitives() {
    assert_eq!(
        run_ok("do(define(xs, array(1, 2, 3)), length(xs))"),
        Value::Number(3.0)
    );
    assert_eq!(
        run_ok("do(define(xs, array(1, 2, 3)), element(xs, 1))"),
        Value::Number(2.0)
    );
}

#[test]
fn print_writes_to_the_injected_handler() {
    let (result, output) = run_captured(
        "do(define(total, 0),
            define(count, 1),
            while(<(count, 11),
                  do(set(total, +(total, count)),
                     set(count, +(count, 1)))),
            print(total),
            print(\"done\"),
            print(array(1, \"a\")))",
    );

    assert_eq!(result, Ok(Value::array(vec![Value::Number(1.0), Value::String("a".into())])));
    assert_eq!(output, "55\ndone\n[1, \"a\"]\n");
}

#[test]
fn syntax_errors_surface_through_run() {
    assert!(matches!(
        run_err("print(1"),
        InterpreterError::Syntax(SyntaxError::UnclosedApplication { .. })
    ));
    assert!(matches!(
        run_err("x y"),
        InterpreterError::Syntax(SyntaxError::TrailingText { .. })
    ));
    assert!(matches!(
        run_err(")"),
        InterpreterError::Syntax(SyntaxError::UnexpectedSyntax { .. })
    ));
}

#[test]
fn evaluate_and_run_entry_points() {
    let root = global_environment();
    let session = Rc::new(std::cell::RefCell::new(Environment::new_enclosed(Rc::clone(&root))));

    let define = parse("define(greeting, \"hi\")").unwrap();
    assert_eq!(
        egg_interpreter::evaluate(&define, &session),
        Ok(Value::String("hi".into()))
    );
    assert_eq!(
        egg_interpreter::evaluate(&Expression::reference("greeting"), &session),
        Ok(Value::String("hi".into()))
    );

    // `run` never sees the session's bindings
    assert_eq!(
        run("greeting", &root),
        Err(InterpreterError::Runtime(RuntimeError::UndefinedBinding(
            "greeting".into()
        )))
    );
    assert_eq!(run("+(1, 1)", &root), Ok(Value::Number(2.0)));
}

#[test]
fn error_messages() {
    assert_eq!(run_err("y").to_string(), "undefined binding: y");
    assert_eq!(
        run_err("set(y, 1)").to_string(),
        "setting undefined binding: y"
    );
    assert_eq!(
        run_err("1(2)").to_string(),
        "applying a non-function: `number` (1)"
    );
    assert_eq!(
        run_err("element(array(), 0)").to_string(),
        "index 0 out of bounds for array of length 0"
    );
    assert_eq!(
        run_err("+(1)").to_string(),
        "+ expected 2 argument(s) but got 1"
    );
    assert_eq!(
        run_err("f(1 2)").to_string(),
        "expected `,` or `)` but found `2` at 4"
    );
}

#[test]
fn deeply_nested_array_is_built_and_released() {
    let source = "do(define(e, 0),
                     define(i, 0),
                     while(<(i, 200000), do(set(e, array(e)), set(i, +(i, 1)))),
                     length(e))";
    assert_eq!(run_ok(source), Value::Number(1.0));
}

#[test]
fn deeply_nested_array_prints() {
    let depth = 100_000;
    let (result, output) = run_captured(&format!(
        "do(define(e, 0),
            define(i, 0),
            while(<(i, {}), do(set(e, array(e)), set(i, +(i, 1)))),
            print(e),
            1)",
        depth
    ));

    assert_eq!(result, Ok(Value::Number(1.0)));
    assert_eq!(output.len(), depth * 2 + 2);
    assert!(output.starts_with("[[["));
    assert!(output.ends_with("0]]]\n"));
}

#[test]
fn deeply_nested_source_fails_cleanly() {
    let depth = 200_000;
    let source = format!("{}x{}", "f(".repeat(depth), ")".repeat(depth));

    assert_eq!(
        run(&source, &global_environment()),
        Err(InterpreterError::Runtime(RuntimeError::UndefinedBinding(
            "f".into()
        )))
    );
}

#[test]
fn deeply_nested_function_body_is_captured() {
    let depth = 50_000;
    let body = format!("{}x{}", "+(1, ".repeat(depth), ")".repeat(depth));
    let source = format!("do(define(g, fun(x, {})), g(0))", body);

    assert_eq!(run_ok(&source), Value::Number(depth as f64));
}

#[test]
fn custom_print_handler_receives_printed_values() {
    let lines = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&lines);
    let printer = Rc::new(PrintHandler::custom(move |msg| {
        sink.borrow_mut().push(msg.to_owned())
    }));
    let root = global_environment();

    let result = Evaluator::with_print_handler(printer)
        .run("do(print(\"a\"), print(array(1, \"b\")))", &root);

    assert_eq!(result, Ok(Value::array(vec![Value::Number(1.0), Value::String("b".into())])));
    assert_eq!(*lines.borrow(), vec!["a".to_owned(), "[1, \"b\"]".to_owned()]);
}

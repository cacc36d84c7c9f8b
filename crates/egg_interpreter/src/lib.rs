//! Tree-walking evaluator for the egg language.
//!
//! [`run`] is the usual entry point: it parses a program and evaluates it in
//! a fresh environment enclosed by a root environment built with
//! [`global_environment`]. Hosts that need to redirect `print` output or
//! change limits build an [`Evaluator`] directly.

use std::{cell::RefCell, rc::Rc};

pub mod builtin;
pub mod config;
pub mod environment;
pub mod error;
mod evaluator;
pub mod print_handler;
pub mod special_form;
pub mod value;

pub use config::EvalConfig;
pub use egg_parser::{parse, Expression, SyntaxError};
pub use environment::Environment;
pub use error::{InterpreterError, RuntimeError};
pub use evaluator::Evaluator;
pub use print_handler::PrintHandler;
pub use value::Value;

/// A root environment pre-populated with `true`, `false` and the builtin functions.
pub fn global_environment() -> Rc<RefCell<Environment>> {
    Rc::new(RefCell::new(Environment::global()))
}

/// Evaluate an already parsed expression in `env`, printing to stdout.
pub fn evaluate(expr: &Expression, env: &Rc<RefCell<Environment>>) -> Result<Value, RuntimeError> {
    Evaluator::new().eval(expr, env)
}

/// Parse and evaluate `source` in a fresh environment enclosed by `root`, printing to stdout.
pub fn run(source: &str, root: &Rc<RefCell<Environment>>) -> Result<Value, InterpreterError> {
    Evaluator::new().run(source, root)
}

use std::{cell::RefCell, rc::Rc};

use egg_parser::ast::{Application, Expression};
use egg_parser::stack::ensure_sufficient_stack;

use crate::{
    config::EvalConfig,
    environment::Environment,
    error::{EvalResult, InterpreterError, RuntimeError},
    print_handler::PrintHandler,
    special_form::SpecialForm,
    value::{Callable, Closure, Value},
};

/// Tree-walking evaluator.
///
/// Holds what is shared across one evaluation: where `print` writes, the
/// configured limits, and the current depth of nested closure calls.
pub struct Evaluator {
    printer: Rc<PrintHandler>,
    config: EvalConfig,
    depth: usize,
}

impl Evaluator {
    pub fn new() -> Self {
        Self::with_print_handler(Rc::new(PrintHandler::default()))
    }

    pub fn with_print_handler(printer: Rc<PrintHandler>) -> Self {
        Evaluator {
            printer,
            config: EvalConfig::default(),
            depth: 0,
        }
    }

    pub fn with_config(mut self, config: EvalConfig) -> Self {
        self.config = config;
        self
    }

    /// Parse and evaluate `source` in a fresh environment enclosed by `root`.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn run(
        &mut self,
        source: &str,
        root: &Rc<RefCell<Environment>>,
    ) -> Result<Value, InterpreterError> {
        let program = egg_parser::parse(source)?;
        tracing::trace!(%program, "parsed");

        let env = Rc::new(RefCell::new(Environment::new_enclosed(Rc::clone(root))));
        Ok(self.eval(&program, &env)?)
    }

    pub fn eval(&mut self, expr: &Expression, env: &Rc<RefCell<Environment>>) -> EvalResult {
        ensure_sufficient_stack(|| match expr {
            Expression::Literal(literal) => Ok(Value::from(literal)),
            Expression::Reference(name) => env.borrow().lookup(name),
            Expression::Application(application) => self.eval_application(application, env),
        })
    }

    fn eval_application(
        &mut self,
        application: &Application,
        env: &Rc<RefCell<Environment>>,
    ) -> EvalResult {
        let special_form = application
            .operator
            .as_reference()
            .and_then(SpecialForm::lookup);
        if let Some(form) = special_form {
            return self.eval_special_form(form, &application.arguments, env);
        }

        let callable = match self.eval(&application.operator, env)? {
            Value::Callable(callable) => callable,
            value => return Err(RuntimeError::NotCallable(value)),
        };

        let args = self.eval_expressions(&application.arguments, env)?;
        self.apply(&callable, args)
    }

    /// Evaluate each expression in order, stopping at the first error.
    fn eval_expressions(
        &mut self,
        exprs: &[Expression],
        env: &Rc<RefCell<Environment>>,
    ) -> Result<Vec<Value>, RuntimeError> {
        let mut result = Vec::with_capacity(exprs.len());
        for expr in exprs {
            result.push(self.eval(expr, env)?);
        }
        Ok(result)
    }

    /// Call a function value with already evaluated arguments.
    pub fn apply(&mut self, callable: &Callable, args: Vec<Value>) -> EvalResult {
        match callable {
            Callable::Builtin(builtin) => builtin.apply(args, &self.printer),
            Callable::Closure(closure) => self.call_closure(closure, args),
        }
    }

    fn call_closure(&mut self, closure: &Closure, args: Vec<Value>) -> EvalResult {
        if self.depth >= self.config.max_call_depth {
            return Err(RuntimeError::StackOverflow {
                depth: self.config.max_call_depth,
            });
        }

        // Missing trailing arguments leave their parameters unbound; extra arguments are dropped
        let mut local = Environment::new_enclosed(Rc::clone(&closure.env));
        for (parameter, value) in closure.parameters.iter().zip(args) {
            local.define(parameter.as_str(), value);
        }
        let local = Rc::new(RefCell::new(local));

        self.depth += 1;
        tracing::trace!(depth = self.depth, "calling closure");
        let result = self.eval(&closure.body, &local);
        self.depth -= 1;

        result
    }
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}

use std::{cell::RefCell, fmt::Display, rc::Rc};

use egg_parser::ast::Expression;

use crate::environment::Environment;
use crate::error::{EvalResult, RuntimeError};
use crate::evaluator::Evaluator;
use crate::value::{Callable, Closure, Value};

/// Constructs that receive their arguments unevaluated.
///
/// A call whose operator is a bare reference to one of these names is
/// dispatched here before any environment lookup happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecialForm {
    If,
    While,
    Do,
    Define,
    Fun,
    Set,
}

impl SpecialForm {
    pub const ALL: [SpecialForm; 6] = [
        SpecialForm::If,
        SpecialForm::While,
        SpecialForm::Do,
        SpecialForm::Define,
        SpecialForm::Fun,
        SpecialForm::Set,
    ];

    pub fn lookup(name: &str) -> Option<SpecialForm> {
        Self::ALL.iter().copied().find(|form| form.name() == name)
    }

    pub fn name(&self) -> &'static str {
        match self {
            SpecialForm::If => "if",
            SpecialForm::While => "while",
            SpecialForm::Do => "do",
            SpecialForm::Define => "define",
            SpecialForm::Fun => "fun",
            SpecialForm::Set => "set",
        }
    }

    fn malformed(self, reason: impl Into<String>) -> RuntimeError {
        RuntimeError::MalformedSpecialForm {
            form: self,
            reason: reason.into(),
        }
    }

    fn expect_arity(self, args: &[Expression], expected: usize) -> Result<(), RuntimeError> {
        if args.len() != expected {
            return Err(self.malformed(format!(
                "expected {} argument(s) but got {}",
                expected,
                args.len()
            )));
        }
        Ok(())
    }

    fn expect_name(self, expr: &Expression) -> Result<&str, RuntimeError> {
        expr.as_reference()
            .ok_or_else(|| self.malformed(format!("expected a name but got `{}`", expr)))
    }
}

impl Display for SpecialForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl Evaluator {
    pub(crate) fn eval_special_form(
        &mut self,
        form: SpecialForm,
        args: &[Expression],
        env: &Rc<RefCell<Environment>>,
    ) -> EvalResult {
        match form {
            SpecialForm::If => {
                form.expect_arity(args, 3)?;
                if self.eval(&args[0], env)?.is_truthy() {
                    self.eval(&args[1], env)
                } else {
                    self.eval(&args[2], env)
                }
            }
            SpecialForm::While => {
                form.expect_arity(args, 2)?;
                while self.eval(&args[0], env)?.is_truthy() {
                    self.eval(&args[1], env)?;
                }
                Ok(Value::Boolean(false))
            }
            SpecialForm::Do => {
                let mut result = Value::Boolean(false);
                for arg in args {
                    result = self.eval(arg, env)?;
                }
                Ok(result)
            }
            SpecialForm::Define => {
                form.expect_arity(args, 2)?;
                let name = form.expect_name(&args[0])?;
                let value = self.eval(&args[1], env)?;

                tracing::trace!(name, "define");
                env.borrow_mut().define(name, value.clone());
                Ok(value)
            }
            SpecialForm::Fun => {
                let (body, params) = match args.split_last() {
                    Some(split) => split,
                    None => return Err(form.malformed("expected a body")),
                };
                let parameters = params
                    .iter()
                    .map(|param| form.expect_name(param).map(str::to_owned))
                    .collect::<Result<Vec<String>, RuntimeError>>()?;

                Ok(Value::Callable(Callable::Closure(Rc::new(Closure {
                    parameters,
                    body: Rc::new(body.clone()),
                    env: Rc::clone(env),
                }))))
            }
            SpecialForm::Set => {
                form.expect_arity(args, 2)?;
                let name = form.expect_name(&args[0])?;
                let value = self.eval(&args[1], env)?;

                tracing::trace!(name, "set");
                env.borrow_mut().assign(name, value.clone())?;
                Ok(value)
            }
        }
    }
}

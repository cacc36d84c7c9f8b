use std::fmt::{Debug, Display};
use std::mem;

use crate::stack::ensure_sufficient_stack;

/// A node of the parsed program.
///
/// The tree is owned top-down: every `Application` owns its operator and
/// arguments, and no node is shared between two parses.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// A constant written directly in the source (`123`, `"abc"`)
    Literal(Literal),
    /// A name to be resolved against the environment chain
    Reference(String),
    /// `operator(arguments...)`, where the operator may itself be any expression
    Application(Box<Application>),
}

impl Expression {
    pub fn number(value: f64) -> Self {
        Expression::Literal(Literal::Number(value))
    }

    pub fn string(value: impl Into<String>) -> Self {
        Expression::Literal(Literal::String(value.into()))
    }

    pub fn reference(name: impl Into<String>) -> Self {
        Expression::Reference(name.into())
    }

    pub fn apply(operator: Expression, arguments: Vec<Expression>) -> Self {
        Expression::Application(Box::new(Application {
            operator,
            arguments,
        }))
    }

    /// The name of this expression if it is a bare `Reference`.
    pub fn as_reference(&self) -> Option<&str> {
        match self {
            Expression::Reference(name) => Some(name),
            _ => None,
        }
    }
}

impl Display for Expression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use Expression::*;

        match self {
            Literal(literal) => write!(f, "{}", literal),
            Reference(name) => write!(f, "{}", name),
            Application(application) => write!(f, "{}", application),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Number(f64),
    String(String),
}

impl Display for Literal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Literal::Number(value) => write!(f, "{}", value),
            Literal::String(value) => write!(f, "\"{}\"", value),
        }
    }
}

pub struct Application {
    pub operator: Expression,
    pub arguments: Vec<Expression>,
}

// The impls below recurse once per nesting level, so they go through
// `ensure_sufficient_stack` like the parser does.

impl Clone for Application {
    fn clone(&self) -> Self {
        ensure_sufficient_stack(|| Application {
            operator: self.operator.clone(),
            arguments: self.arguments.clone(),
        })
    }
}

impl PartialEq for Application {
    fn eq(&self, other: &Application) -> bool {
        ensure_sufficient_stack(|| {
            self.operator == other.operator && self.arguments == other.arguments
        })
    }
}

impl Debug for Application {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        ensure_sufficient_stack(|| {
            f.debug_struct("Application")
                .field("operator", &self.operator)
                .field("arguments", &self.arguments)
                .finish()
        })
    }
}

impl Display for Application {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        ensure_sufficient_stack(|| {
            write!(f, "{}(", self.operator)?;
            for (i, argument) in self.arguments.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", argument)?;
            }
            write!(f, ")")
        })
    }
}

impl Drop for Application {
    /// Tear down nested applications with a worklist instead of recursion.
    fn drop(&mut self) {
        let mut pending = vec![mem::replace(
            &mut self.operator,
            Expression::Reference(String::new()),
        )];
        pending.append(&mut self.arguments);

        while let Some(expr) = pending.pop() {
            if let Expression::Application(mut application) = expr {
                pending.push(mem::replace(
                    &mut application.operator,
                    Expression::Reference(String::new()),
                ));
                pending.append(&mut application.arguments);
            }
        }
    }
}

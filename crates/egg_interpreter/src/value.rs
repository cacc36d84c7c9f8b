use std::{cell::RefCell, fmt::Display, ops::Deref, rc::Rc};

use egg_parser::ast::{Expression, Literal};
use egg_parser::stack::ensure_sufficient_stack;

use crate::{builtin::Builtin, environment::Environment};

/// The result of evaluating an expression.
///
/// Arrays and callables are reference-like: cloning a `Value` shares them.
#[derive(Debug, Clone)]
pub enum Value {
    Boolean(bool),
    Number(f64),
    String(String),
    Array(Rc<Elements>),
    Callable(Callable),
}

/// The contents of an array value.
///
/// Arrays can nest as deep as a loop cares to build them, so dropping,
/// comparing and printing never recurse on the native stack unchecked.
#[derive(Default)]
pub struct Elements(Vec<Value>);

impl Deref for Elements {
    type Target = [Value];

    fn deref(&self) -> &[Value] {
        &self.0
    }
}

impl From<Vec<Value>> for Elements {
    fn from(values: Vec<Value>) -> Self {
        Elements(values)
    }
}

impl PartialEq for Elements {
    fn eq(&self, other: &Elements) -> bool {
        ensure_sufficient_stack(|| self.0 == other.0)
    }
}

impl std::fmt::Debug for Elements {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        ensure_sufficient_stack(|| f.debug_list().entries(self.0.iter()).finish())
    }
}

impl Drop for Elements {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.0);

        while let Some(value) = pending.pop() {
            // Only unwrap arrays nobody else holds; shared ones just lose a reference
            if let Value::Array(elements) = value {
                if let Ok(mut elements) = Rc::try_unwrap(elements) {
                    pending.append(&mut elements.0);
                }
            }
        }
    }
}

/// Anything that can appear in operator position of an ordinary call.
#[derive(Debug, Clone)]
pub enum Callable {
    Closure(Rc<Closure>),
    Builtin(Builtin),
}

impl Value {
    pub fn typename(&self) -> &'static str {
        match self {
            Value::Boolean(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Callable(Callable::Closure(_)) => "function",
            Value::Callable(Callable::Builtin(_)) => "builtin",
        }
    }

    /// Only the boolean `false` is falsy; `0`, `""` and empty arrays are all truthy.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Boolean(false))
    }

    /// Equality as seen by the `==` builtin: primitives by value, everything else by identity.
    pub fn same_as(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => Rc::ptr_eq(a, b),
            (Value::Callable(Callable::Closure(a)), Value::Callable(Callable::Closure(b))) => {
                Rc::ptr_eq(a, b)
            }
            (Value::Callable(Callable::Builtin(a)), Value::Callable(Callable::Builtin(b))) => a == b,
            _ => false,
        }
    }

    pub fn array(elements: Vec<Value>) -> Self {
        Value::Array(Rc::new(Elements::from(elements)))
    }

    /// Converts the given value to a string in the format of source code.
    ///
    /// Use this anywhere a programmer expects to see the code-version of a value (e.g. in the REPL).
    /// # Examples
    /// ```rust
    /// use egg_interpreter::value::Value;
    ///
    /// let value = Value::String("hello world".to_string());
    ///
    /// assert_eq!(value.to_code_string(), "\"hello world\"");
    /// ```
    pub fn to_code_string(&self) -> String {
        match self {
            Value::String(value) => format!("\"{}\"", value),
            value => value.to_string(),
        }
    }
}

impl From<&Literal> for Value {
    fn from(literal: &Literal) -> Self {
        match literal {
            Literal::Number(value) => Value::Number(*value),
            Literal::String(value) => Value::String(value.clone()),
        }
    }
}

/// Structural equality, used by tests and error comparisons.
/// Callables still compare by identity.
impl PartialEq for Value {
    fn eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Array(a), Value::Array(b)) => a == b,
            _ => self.same_as(other),
        }
    }
}

impl Display for Value {
    /// Runtime string form, as written by `print`
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Boolean(value) => write!(f, "{}", value),
            Value::Number(value) => write!(f, "{}", format_number(*value)),
            Value::String(value) => write!(f, "{}", value),
            Value::Array(elements) => ensure_sufficient_stack(|| {
                write!(f, "[")?;
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    match element {
                        Value::String(value) => write!(f, "\"{}\"", value)?,
                        value => write!(f, "{}", value)?,
                    }
                }
                write!(f, "]")
            }),
            Value::Callable(Callable::Closure(closure)) => write!(f, "{}", closure),
            Value::Callable(Callable::Builtin(builtin)) => write!(f, "builtin {}", builtin),
        }
    }
}

fn format_number(value: f64) -> String {
    if value.is_nan() {
        "NaN".into()
    } else if value.is_infinite() {
        let sign = if value < 0.0 { "-" } else { "" };
        format!("{}Infinity", sign)
    } else if value == 0.0 {
        // Also covers -0
        "0".into()
    } else {
        value.to_string()
    }
}

/// A function value created by `fun`.
pub struct Closure {
    pub parameters: Vec<String>,
    pub body: Rc<Expression>,
    /// The environment that was active when `fun` was evaluated
    pub env: Rc<RefCell<Environment>>,
}

impl std::fmt::Debug for Closure {
    // The captured environment may contain this closure, so it is left out
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Closure")
            .field("parameters", &self.parameters)
            .field("body", &self.body)
            .finish()
    }
}

impl Display for Closure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "fun(")?;
        for parameter in &self.parameters {
            write!(f, "{}, ", parameter)?;
        }
        write!(f, "{})", self.body)
    }
}

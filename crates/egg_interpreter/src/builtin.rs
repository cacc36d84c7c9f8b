use std::fmt::Display;

use crate::error::{EvalResult, RuntimeError};
use crate::print_handler::PrintHandler;
use crate::value::Value;

/// The primitive functions bound in the global environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    Add,
    Subtract,
    Multiply,
    Divide,
    Equal,
    LessThan,
    GreaterThan,
    Print,
    Array,
    Length,
    Element,
}

impl Builtin {
    pub const ALL: [Builtin; 11] = [
        Builtin::Add,
        Builtin::Subtract,
        Builtin::Multiply,
        Builtin::Divide,
        Builtin::Equal,
        Builtin::LessThan,
        Builtin::GreaterThan,
        Builtin::Print,
        Builtin::Array,
        Builtin::Length,
        Builtin::Element,
    ];

    pub fn lookup(name: &str) -> Option<Builtin> {
        Self::ALL.iter().copied().find(|builtin| builtin.name() == name)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Builtin::Add => "+",
            Builtin::Subtract => "-",
            Builtin::Multiply => "*",
            Builtin::Divide => "/",
            Builtin::Equal => "==",
            Builtin::LessThan => "<",
            Builtin::GreaterThan => ">",
            Builtin::Print => "print",
            Builtin::Array => "array",
            Builtin::Length => "length",
            Builtin::Element => "element",
        }
    }

    /// Apply the builtin to already evaluated arguments.
    pub fn apply(&self, args: Vec<Value>, printer: &PrintHandler) -> EvalResult {
        match self {
            Builtin::Add => {
                self.expect_arity(&args, 2)?;
                match (&args[0], &args[1]) {
                    (Value::Number(left), Value::Number(right)) => Ok(Value::Number(left + right)),
                    (Value::String(_), _) | (_, Value::String(_)) => {
                        Ok(Value::String(format!("{}{}", args[0], args[1])))
                    }
                    _ => Err(self.first_non_number(&args)),
                }
            }
            Builtin::Subtract | Builtin::Multiply | Builtin::Divide => {
                let (left, right) = self.numbers(&args)?;
                Ok(Value::Number(match self {
                    Builtin::Subtract => left - right,
                    Builtin::Multiply => left * right,
                    _ => left / right,
                }))
            }
            Builtin::Equal => {
                self.expect_arity(&args, 2)?;
                Ok(Value::Boolean(args[0].same_as(&args[1])))
            }
            Builtin::LessThan | Builtin::GreaterThan => {
                self.expect_arity(&args, 2)?;
                let ordering = match (&args[0], &args[1]) {
                    (Value::Number(left), Value::Number(right)) => left.partial_cmp(right),
                    (Value::String(left), Value::String(right)) => Some(left.cmp(right)),
                    // Report the operand that broke the pairing
                    (Value::Number(_), other) | (Value::String(_), other) | (other, _) => {
                        return Err(RuntimeError::InvalidArgumentType {
                            builtin: *self,
                            value: other.clone(),
                        })
                    }
                };
                let expected = match self {
                    Builtin::LessThan => std::cmp::Ordering::Less,
                    _ => std::cmp::Ordering::Greater,
                };
                // NaN compares as neither
                Ok(Value::Boolean(ordering == Some(expected)))
            }
            Builtin::Print => {
                self.expect_arity(&args, 1)?;
                let value = args[0].clone();
                printer.println(&value.to_string());
                Ok(value)
            }
            Builtin::Array => Ok(Value::array(args)),
            Builtin::Length => {
                self.expect_arity(&args, 1)?;
                match &args[0] {
                    Value::Array(elements) => Ok(Value::Number(elements.len() as f64)),
                    Value::String(value) => Ok(Value::Number(value.chars().count() as f64)),
                    other => Err(RuntimeError::InvalidArgumentType {
                        builtin: *self,
                        value: other.clone(),
                    }),
                }
            }
            Builtin::Element => {
                self.expect_arity(&args, 2)?;
                let elements = match &args[0] {
                    Value::Array(elements) => elements,
                    other => {
                        return Err(RuntimeError::InvalidArgumentType {
                            builtin: *self,
                            value: other.clone(),
                        })
                    }
                };
                let index = match args[1] {
                    Value::Number(index) if index.fract() == 0.0 => index,
                    ref other => {
                        return Err(RuntimeError::InvalidArgumentType {
                            builtin: *self,
                            value: other.clone(),
                        })
                    }
                };

                if index < 0.0 || index >= elements.len() as f64 {
                    return Err(RuntimeError::IndexOutOfBounds {
                        index: args[1].clone(),
                        length: elements.len(),
                    });
                }
                Ok(elements[index as usize].clone())
            }
        }
    }

    fn expect_arity(&self, args: &[Value], expected: usize) -> Result<(), RuntimeError> {
        if args.len() != expected {
            return Err(RuntimeError::BadArity {
                builtin: *self,
                expected,
                got: args.len(),
            });
        }
        Ok(())
    }

    fn numbers(&self, args: &[Value]) -> Result<(f64, f64), RuntimeError> {
        self.expect_arity(args, 2)?;
        match (&args[0], &args[1]) {
            (Value::Number(left), Value::Number(right)) => Ok((*left, *right)),
            _ => Err(self.first_non_number(args)),
        }
    }

    fn first_non_number(&self, args: &[Value]) -> RuntimeError {
        let value = args
            .iter()
            .find(|arg| !matches!(arg, Value::Number(_)))
            .cloned()
            .unwrap_or(Value::Boolean(false));

        RuntimeError::InvalidArgumentType {
            builtin: *self,
            value,
        }
    }
}

impl Display for Builtin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

use egg_parser::SyntaxError;

use crate::{builtin::Builtin, special_form::SpecialForm, value::Value};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RuntimeError {
    /// When referencing a name that no environment in the chain binds
    #[error("undefined binding: {0}")]
    UndefinedBinding(String),
    /// When `set` targets a name that no environment in the chain binds
    #[error("setting undefined binding: {0}")]
    UndefinedAssignment(String),
    /// When a value that is not a function is used with call syntax
    #[error("applying a non-function: `{}` ({})", .0.typename(), .0.to_code_string())]
    NotCallable(Value),
    /// Wrong number or wrong shape of arguments to a special form
    #[error("malformed {form}: {reason}")]
    MalformedSpecialForm { form: SpecialForm, reason: String },
    /// When a call's argument count does not match what a builtin expects
    #[error("{builtin} expected {expected} argument(s) but got {got}")]
    BadArity {
        builtin: Builtin,
        expected: usize,
        got: usize,
    },
    /// When a builtin is passed an argument of an unsupported type
    #[error("unsupported argument type for {builtin}: `{}` ({})", .value.typename(), .value.to_code_string())]
    InvalidArgumentType { builtin: Builtin, value: Value },
    /// When `element` is asked for an index outside the array
    #[error("index {index} out of bounds for array of length {length}")]
    IndexOutOfBounds { index: Value, length: usize },
    /// When nested function calls exceed the configured limit
    #[error("stack overflow: more than {depth} nested calls")]
    StackOverflow { depth: usize },
}

/// Anything `run` can fail with.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InterpreterError {
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

pub type EvalResult = Result<Value, RuntimeError>;

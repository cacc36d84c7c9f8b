pub mod ast;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod span;
pub mod stack;

pub use ast::{Application, Expression, Literal};
pub use error::SyntaxError;
pub use parser::Parser;

/// Parse `source` into a single expression.
pub fn parse(source: &str) -> Result<Expression, SyntaxError> {
    Parser::new(source).parse_program()
}

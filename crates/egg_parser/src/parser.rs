use crate::ast::Expression;
use crate::error::SyntaxError;
use crate::lexer::{self, LexError, Lexeme};
use crate::span::BytePos;
use crate::stack::ensure_sufficient_stack;

pub type ParseResult<T> = Result<T, SyntaxError>;

/// Recursive-descent parser working directly on the source text.
///
/// Each step strips skippable text itself before looking at the next
/// character, so there is no separate tokenization pass.
pub struct Parser<'a> {
    source: &'a str,
    position: BytePos,
}

impl<'a> Parser<'a> {
    pub fn new(source: &'a str) -> Parser<'a> {
        Parser {
            source,
            position: BytePos::new(0),
        }
    }

    /// Parse the whole input as exactly one expression followed only by skippable text.
    pub fn parse_program(&mut self) -> ParseResult<Expression> {
        let expr = self.parse_expression()?;

        self.skip();
        if !self.rest().is_empty() {
            return Err(SyntaxError::TrailingText {
                position: self.position,
            });
        }

        Ok(expr)
    }

    /// Parse a primary expression followed by any number of `(...)` suffixes.
    fn parse_expression(&mut self) -> ParseResult<Expression> {
        ensure_sufficient_stack(|| {
            self.skip();
            let start = self.position;

            let lexeme = lexer::next_lexeme(self.rest()).map_err(|error| match error {
                LexError::UnterminatedString => SyntaxError::UnterminatedString { position: start },
                LexError::Unexpected => SyntaxError::UnexpectedSyntax { position: start },
            })?;
            self.advance(lexeme.len());

            let expr = match lexeme {
                Lexeme::String(contents) => Expression::string(contents),
                Lexeme::Number(digits) => {
                    let value = digits
                        .parse::<f64>()
                        .map_err(|_| SyntaxError::UnexpectedSyntax { position: start })?;
                    Expression::number(value)
                }
                Lexeme::Word(name) => Expression::reference(name),
            };

            self.parse_applications(expr)
        })
    }

    /// Wrap `expr` in an `Application` for every argument list that immediately follows it,
    /// so `f(x)(y)` becomes `Application(Application(f, [x]), [y])`.
    fn parse_applications(&mut self, mut expr: Expression) -> ParseResult<Expression> {
        loop {
            self.skip();
            if self.peek_char() != Some('(') {
                return Ok(expr);
            }

            let open = self.position;
            self.advance(1);
            let arguments = self.parse_arguments(open)?;

            expr = Expression::apply(expr, arguments);
        }
    }

    /// Parse comma separated arguments up to and including the closing `)`.
    fn parse_arguments(&mut self, open: BytePos) -> ParseResult<Vec<Expression>> {
        let mut arguments = Vec::new();

        self.skip();
        loop {
            match self.peek_char() {
                Some(')') => {
                    self.advance(1);
                    return Ok(arguments);
                }
                None => return Err(SyntaxError::UnclosedApplication { position: open }),
                _ => {}
            }

            arguments.push(self.parse_expression()?);

            self.skip();
            match self.peek_char() {
                Some(',') => {
                    self.advance(1);
                    self.skip();
                }
                Some(')') => {}
                Some(found) => {
                    return Err(SyntaxError::ExpectedSeparator {
                        found,
                        position: self.position,
                    })
                }
                None => return Err(SyntaxError::UnclosedApplication { position: open }),
            }
        }
    }

    fn rest(&self) -> &'a str {
        &self.source[self.position.offset()..]
    }

    fn peek_char(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn advance(&mut self, len: usize) {
        self.position = self.position.advance(len);
    }

    fn skip(&mut self) {
        let rest = self.rest();
        let skipped = rest.len() - lexer::skip(rest).len();
        self.advance(skipped);
    }
}

use crate::span::BytePos;

/// Every way a piece of source text can fail to reduce to a single expression.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SyntaxError {
    /// The next character cannot start a string, number or word (e.g. `)` or `,` on their own)
    #[error("unexpected syntax at {position}")]
    UnexpectedSyntax { position: BytePos },
    /// A `"` was opened but the input ended before the closing `"`
    #[error("unterminated string literal starting at {position}")]
    UnterminatedString { position: BytePos },
    /// The input ended inside an argument list
    #[error("missing closing `)` for application at {position}")]
    UnclosedApplication { position: BytePos },
    /// An argument was followed by something other than `,` or `)`
    #[error("expected `,` or `)` but found `{found}` at {position}")]
    ExpectedSeparator { found: char, position: BytePos },
    /// A complete expression was parsed but non-skippable text follows it
    #[error("unexpected text after program at {position}")]
    TrailingText { position: BytePos },
}

impl SyntaxError {
    pub fn position(&self) -> BytePos {
        use SyntaxError::*;

        match self {
            UnexpectedSyntax { position }
            | UnterminatedString { position }
            | UnclosedApplication { position }
            | ExpectedSeparator { position, .. }
            | TrailingText { position } => *position,
        }
    }
}

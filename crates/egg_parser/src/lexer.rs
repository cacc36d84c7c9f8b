//! Lexical helpers for the parser.
//!
//! There is no token stream: the parser asks for one lexeme at a time from
//! whatever source text remains, after stripping skippable text with [`skip`].

/// Strip any leading run of whitespace and `#` line comments.
///
/// A comment runs up to (not including) the end of its line; the line break
/// itself is then consumed as whitespace.
pub fn skip(input: &str) -> &str {
    let mut rest = input;

    loop {
        let trimmed = rest.trim_start_matches(is_space);

        match trimmed.strip_prefix('#') {
            Some(comment) => {
                rest = match comment.find(is_line_terminator) {
                    Some(end) => &comment[end..],
                    None => "",
                }
            }
            None => return trimmed,
        }
    }
}

/// The ECMAScript `\s` class: `char::is_whitespace` minus U+0085, plus U+FEFF.
fn is_space(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n'
            | '\u{b}'
            | '\u{c}'
            | '\r'
            | ' '
            | '\u{a0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200a}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{202f}'
            | '\u{205f}'
            | '\u{3000}'
            | '\u{feff}'
    )
}

fn is_line_terminator(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

/// Characters that may continue a word, used for the number boundary rule.
fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Characters that can never be part of a word.
fn is_delimiter(c: char) -> bool {
    is_space(c) || matches!(c, '(' | ')' | ',' | '#' | '"')
}

/// A single primary lexeme, borrowed from the source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Lexeme<'a> {
    /// The contents between the quotes (quotes excluded)
    String(&'a str),
    /// A run of ASCII digits
    Number(&'a str),
    /// Any other run of non-delimiter characters
    Word(&'a str),
}

impl<'a> Lexeme<'a> {
    /// Number of source bytes this lexeme occupies.
    pub fn len(&self) -> usize {
        match self {
            Lexeme::String(contents) => contents.len() + 2,
            Lexeme::Number(digits) => digits.len(),
            Lexeme::Word(name) => name.len(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LexError {
    /// An opening `"` with no closing `"` before the end of input
    UnterminatedString,
    /// The input does not start with any lexeme
    Unexpected,
}

/// Read the lexeme at the very start of `input`. Skippable text must already be removed.
///
/// Strings have no escape sequences, so the first `"` after the opening one closes it.
/// Numbers must end on a word boundary: `12abc` is read as the word `12abc`.
pub fn next_lexeme(input: &str) -> Result<Lexeme<'_>, LexError> {
    if let Some(body) = input.strip_prefix('"') {
        return match body.find('"') {
            Some(end) => Ok(Lexeme::String(&body[..end])),
            None => Err(LexError::UnterminatedString),
        };
    }

    let digits = input
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(input.len());
    if digits > 0 {
        let at_boundary = match input[digits..].chars().next() {
            Some(next) => !is_word_char(next),
            None => true,
        };
        if at_boundary {
            return Ok(Lexeme::Number(&input[..digits]));
        }
    }

    let word = input.find(is_delimiter).unwrap_or(input.len());
    if word > 0 {
        return Ok(Lexeme::Word(&input[..word]));
    }

    Err(LexError::Unexpected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_skip_whitespace() {
        assert_eq!(skip("   \t\n  hello "), "hello ");
        assert_eq!(skip("hello"), "hello");
        assert_eq!(skip(""), "");
        assert_eq!(skip(" \n\t "), "");
    }

    #[test]
    fn test_skip_comments() {
        assert_eq!(skip("# a comment\nx"), "x");
        assert_eq!(skip("  # one\n   # two\n\n  y(1)"), "y(1)");
        assert_eq!(skip("# comment to end of input"), "");
        assert_eq!(skip("#first\r\nsecond"), "second");
    }

    #[test]
    fn test_skip_keeps_hash_inside_text() {
        // Only leading comments are removed
        assert_eq!(skip("a # b"), "a # b");
    }

    #[test]
    fn test_skip_uses_ecmascript_whitespace() {
        assert_eq!(skip("\u{feff}\u{a0}\u{3000}x"), "x");
        assert_eq!(skip("\u{b}\u{c}\u{2028}x"), "x");
        // NEL is Unicode whitespace but not `\s`
        assert_eq!(skip("\u{85}x"), "\u{85}x");
    }

    #[test]
    fn test_word_delimited_by_ecmascript_whitespace() {
        assert_eq!(next_lexeme("ab\u{feff}cd"), Ok(Lexeme::Word("ab")));
        assert_eq!(next_lexeme("ab\u{85}cd"), Ok(Lexeme::Word("ab\u{85}cd")));
    }

    #[test]
    fn test_string() {
        assert_eq!(next_lexeme("\"hello world\" rest"), Ok(Lexeme::String("hello world")));
        assert_eq!(next_lexeme("\"\""), Ok(Lexeme::String("")));
        assert_eq!(next_lexeme("\"a # b\""), Ok(Lexeme::String("a # b")));
        assert_eq!(next_lexeme("\"not closed"), Err(LexError::UnterminatedString));
        assert_eq!(Lexeme::String("abc").len(), 5);
    }

    #[test]
    fn test_string_has_no_escapes() {
        assert_eq!(next_lexeme(r#""a\"b""#), Ok(Lexeme::String("a\\")));
    }

    #[test]
    fn test_number() {
        assert_eq!(next_lexeme("123"), Ok(Lexeme::Number("123")));
        assert_eq!(next_lexeme("42)"), Ok(Lexeme::Number("42")));
        assert_eq!(next_lexeme("7, 8"), Ok(Lexeme::Number("7")));
        assert_eq!(next_lexeme("1.5"), Ok(Lexeme::Number("1")));
        assert_eq!(next_lexeme("0012"), Ok(Lexeme::Number("0012")));
    }

    #[test]
    fn test_number_word_boundary() {
        assert_eq!(next_lexeme("12abc"), Ok(Lexeme::Word("12abc")));
        assert_eq!(next_lexeme("1_000"), Ok(Lexeme::Word("1_000")));
        // `+` is not a word character, so the number ends there
        assert_eq!(next_lexeme("1+"), Ok(Lexeme::Number("1")));
    }

    #[test]
    fn test_word() {
        assert_eq!(next_lexeme("define(x, 1)"), Ok(Lexeme::Word("define")));
        assert_eq!(next_lexeme("+(1, 2)"), Ok(Lexeme::Word("+")));
        assert_eq!(next_lexeme("=="), Ok(Lexeme::Word("==")));
        assert_eq!(next_lexeme("x#comment"), Ok(Lexeme::Word("x")));
        assert_eq!(next_lexeme("a\"b\""), Ok(Lexeme::Word("a")));
    }

    #[test]
    fn test_unexpected() {
        assert_eq!(next_lexeme(")"), Err(LexError::Unexpected));
        assert_eq!(next_lexeme(",x"), Err(LexError::Unexpected));
        assert_eq!(next_lexeme("(x)"), Err(LexError::Unexpected));
        assert_eq!(next_lexeme(""), Err(LexError::Unexpected));
    }

    proptest! {
        #[test]
        fn skip_is_idempotent(input in any::<String>()) {
            let once = skip(&input);
            prop_assert_eq!(skip(once), once);
        }

        #[test]
        fn skip_only_removes_a_prefix(input in "[ \t\n#a-z()]{0,40}") {
            prop_assert!(input.ends_with(skip(&input)));
        }
    }
}

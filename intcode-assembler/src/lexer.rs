//! # Lexer for Intcode Program Text
//!
//! Program text is decimal words separated by commas. Whitespace is not
//! skipped: anything other than a number, a comma or a line terminator is a
//! lexing error, which the loader treats as the end of the program.

use logos::Logos;

/// Tokens of the program text format
#[derive(Logos, Debug, Clone, PartialEq)]
pub enum Token {
    /// Decimal word, optionally negative
    #[regex(r"-?[0-9]+", |lex| lex.slice().parse().ok())]
    Number(i64),

    /// Word separator
    #[token(",")]
    Comma,

    /// Line terminator
    #[regex(r"\r?\n")]
    Newline,
}

/// Check whether an unlexable slice was a number that failed to fit a word
pub(crate) fn is_numeric(slice: &str) -> bool {
    let digits = slice.strip_prefix('-').unwrap_or(slice);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lexer_numbers() {
        let mut lex = Token::lexer("1,-22,333");
        assert_eq!(lex.next(), Some(Ok(Token::Number(1))));
        assert_eq!(lex.next(), Some(Ok(Token::Comma)));
        assert_eq!(lex.next(), Some(Ok(Token::Number(-22))));
        assert_eq!(lex.next(), Some(Ok(Token::Comma)));
        assert_eq!(lex.next(), Some(Ok(Token::Number(333))));
        assert_eq!(lex.next(), None);
    }

    #[test]
    fn test_lexer_newlines() {
        let mut lex = Token::lexer("5\n6\r\n");
        assert_eq!(lex.next(), Some(Ok(Token::Number(5))));
        assert_eq!(lex.next(), Some(Ok(Token::Newline)));
        assert_eq!(lex.next(), Some(Ok(Token::Number(6))));
        assert_eq!(lex.next(), Some(Ok(Token::Newline)));
        assert_eq!(lex.next(), None);
    }

    #[test]
    fn test_lexer_rejects_whitespace() {
        let mut lex = Token::lexer("1 2");
        assert_eq!(lex.next(), Some(Ok(Token::Number(1))));
        assert_eq!(lex.next(), Some(Err(())));
    }

    #[test]
    fn test_lexer_overflow_is_error() {
        let mut lex = Token::lexer("99999999999999999999");
        assert_eq!(lex.next(), Some(Err(())));
        assert!(is_numeric(lex.slice()));
    }

    #[test]
    fn test_is_numeric() {
        assert!(is_numeric("123"));
        assert!(is_numeric("-9"));
        assert!(!is_numeric("-"));
        assert!(!is_numeric("x"));
        assert!(!is_numeric(""));
    }
}

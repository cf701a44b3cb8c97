//! Program loader
//!
//! Parses comma-separated program text into a [`Program`]. Loading stops at
//! the first line terminator, at end of input, or at the first character that
//! cannot continue the word list. Opcodes are not validated here; a bad
//! instruction is only discovered when a machine executes it.

use std::fs;
use std::path::Path;

use intcode_spec::Program;
use logos::Logos;

use crate::error::LoaderError;
use crate::lexer::{is_numeric, Token};

/// Parse program text
pub fn load(text: &str) -> Result<Program, LoaderError> {
    let mut lex = Token::lexer(text);
    let mut words = Vec::new();
    let mut expect_word = true;

    while let Some(token) = lex.next() {
        match token {
            Ok(Token::Number(word)) if expect_word => {
                words.push(word);
                expect_word = false;
            }
            Ok(Token::Comma) if !expect_word => expect_word = true,
            Err(()) if is_numeric(lex.slice()) => {
                return Err(LoaderError::NumberOutOfRange {
                    offset: lex.span().start,
                    text: lex.slice().to_string(),
                });
            }
            _ => break,
        }
    }

    tracing::debug!(words = words.len(), "loaded program");
    Ok(Program::new(words))
}

/// Read and parse a program file
pub fn load_file(path: impl AsRef<Path>) -> Result<Program, LoaderError> {
    let text = fs::read_to_string(path)?;
    load(&text)
}

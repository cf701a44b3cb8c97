//! # Error Types for Intcode

use crate::Word;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntcodeError {
    #[error("Invalid opcode in instruction word {0}")]
    InvalidOpcode(Word),

    #[error("Invalid addressing mode {digit} for parameter {param} of instruction word {word}")]
    InvalidMode { word: Word, param: usize, digit: u8 },

    #[error("Truncated instruction: expected {expected} words, found {found}")]
    Truncated { expected: usize, found: usize },
}

impl IntcodeError {
    /// The offending instruction word, when there is one
    pub fn word(&self) -> Option<Word> {
        match self {
            IntcodeError::InvalidOpcode(word) | IntcodeError::InvalidMode { word, .. } => {
                Some(*word)
            }
            IntcodeError::Truncated { .. } => None,
        }
    }
}

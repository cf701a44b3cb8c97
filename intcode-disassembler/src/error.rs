//! Disassembler errors

use intcode_spec::{IntcodeError, Word};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DisassemblerError {
    #[error("Invalid instruction: {0}")]
    Decode(#[from] IntcodeError),

    #[error("Non-canonical instruction word {word} (canonical form is {canonical})")]
    NonCanonical { word: Word, canonical: Word },
}

pub type Result<T> = std::result::Result<T, DisassemblerError>;

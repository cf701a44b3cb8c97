//! Strict instruction decoder
//!
//! The machine decodes leniently: unused mode digits and digits above the
//! ten-thousands place are ignored. A listing must re-assemble to the same
//! words, so here an instruction is only accepted when its opcode word is the
//! exact encoding the assembler would produce.

use intcode_spec::{Instruction, Word};

use crate::error::{DisassemblerError, Result};

/// Decode the instruction at the start of `words`
pub fn decode(words: &[Word]) -> Result<Instruction> {
    let instr = Instruction::from_words(words)?;
    let canonical = instr.header();
    if canonical != words[0] {
        return Err(DisassemblerError::NonCanonical {
            word: words[0],
            canonical,
        });
    }
    Ok(instr)
}

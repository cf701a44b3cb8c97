//! Assembly parser
//!
//! One instruction per line: a mnemonic followed by comma-separated operands.
//!
//! ```text
//! add [9], [10], [3]     ; position operands
//! mul [4], 3, [4]        ; immediate operand
//! out [rb-1]             ; relative to the base register
//! ```

use intcode_spec::{Instruction, Opcode, Param, Word};

use crate::error::{AssemblerError, Result};

/// Parse a single instruction from assembly text
pub fn parse_instruction(text: &str) -> Result<Instruction> {
    let text = text.trim();

    let (mnemonic, operands) = match text.split_once(char::is_whitespace) {
        Some((m, rest)) => (m, rest.trim()),
        None => (text, ""),
    };
    if mnemonic.is_empty() {
        return Err(AssemblerError::SyntaxError {
            line: 0,
            column: 0,
            message: "Empty instruction".to_string(),
        });
    }

    let opcode = Opcode::from_mnemonic(mnemonic)
        .ok_or_else(|| AssemblerError::UnknownInstruction(mnemonic.to_string()))?;

    let params = if operands.is_empty() {
        Vec::new()
    } else {
        operands
            .split(',')
            .map(parse_operand)
            .collect::<Result<Vec<Param>>>()?
    };

    if params.len() != opcode.param_count() {
        return Err(AssemblerError::OperandCount {
            mnemonic: opcode.mnemonic().to_string(),
            expected: opcode.param_count(),
            found: params.len(),
        });
    }

    Instruction::from_parts(opcode, &params)
        .map_err(|e| AssemblerError::InvalidOperand(e.to_string()))
}

/// Parse one operand: `[n]`, `n`, or `[rb+n]` / `[rb-n]` / `[rb]`
pub fn parse_operand(text: &str) -> Result<Param> {
    let text = text.trim();

    let Some(inner) = text.strip_prefix('[') else {
        return parse_word(text).map(Param::immediate);
    };
    let inner = inner
        .strip_suffix(']')
        .ok_or_else(|| AssemblerError::InvalidOperand(text.to_string()))?
        .trim();

    match inner.strip_prefix("rb") {
        Some("") => Ok(Param::relative(0)),
        Some(offset) => {
            let offset = offset.trim();
            let value = if let Some(rest) = offset.strip_prefix('+') {
                parse_word(rest.trim())?
            } else if offset.starts_with('-') {
                parse_word(&offset.replace(' ', ""))?
            } else {
                return Err(AssemblerError::InvalidOperand(text.to_string()));
            };
            Ok(Param::relative(value))
        }
        None => parse_word(inner).map(Param::position),
    }
}

fn parse_word(text: &str) -> Result<Word> {
    text.parse::<Word>()
        .map_err(|_| AssemblerError::InvalidOperand(text.to_string()))
}

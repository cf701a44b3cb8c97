//! Instruction formatting to assembly text
//!
//! The output is accepted back by the assembler's parser.

use intcode_spec::{Instruction, Mode, Param};

/// Format instruction as assembly text
pub fn format(instr: &Instruction) -> String {
    let params = instr.params();
    let mnemonic = instr.opcode().mnemonic();
    if params.is_empty() {
        return mnemonic.to_string();
    }

    let operands: Vec<String> = params.iter().map(|p| format_param(*p)).collect();
    format!("{} {}", mnemonic, operands.join(", "))
}

/// Format a single operand
pub fn format_param(param: Param) -> String {
    match param.mode {
        Mode::Position => format!("[{}]", param.value),
        Mode::Immediate => param.value.to_string(),
        Mode::Relative if param.value < 0 => format!("[rb-{}]", param.value.unsigned_abs()),
        Mode::Relative => format!("[rb+{}]", param.value),
    }
}

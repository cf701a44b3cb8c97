//! Main disassembler logic
//!
//! Intcode does not separate code from data, so the listing is a linear
//! sweep from address zero. Any word that does not start a canonical
//! instruction is emitted as `.word` and the sweep moves on by one.

use intcode_spec::{Instruction, Program, Word};

use crate::decoder::decode;
use crate::formatter::format;

/// One entry of a listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    /// Address of the first word
    pub address: usize,
    /// Decoded instruction, or `None` for a raw data word
    pub instruction: Option<Instruction>,
    /// The words this line covers
    pub words: Vec<Word>,
}

impl Line {
    /// Assembly text for this line, without the address
    pub fn text(&self) -> String {
        match &self.instruction {
            Some(instr) => format(instr),
            None => format!(".word {}", self.words[0]),
        }
    }
}

/// Sweep a program into listing lines
pub fn listing(words: &[Word]) -> Vec<Line> {
    let mut lines = Vec::new();
    let mut address = 0;

    while address < words.len() {
        let line = match decode(&words[address..]) {
            Ok(instr) => Line {
                address,
                instruction: Some(instr),
                words: words[address..address + instr.width()].to_vec(),
            },
            Err(_) => Line {
                address,
                instruction: None,
                words: vec![words[address]],
            },
        };
        address += line.words.len();
        lines.push(line);
    }

    lines
}

/// Disassemble a program into assembly text.
///
/// Addresses are written as trailing comments, so the output assembles back
/// to the same program.
pub fn disassemble(program: &Program) -> String {
    let mut output = String::new();
    output.push_str(&format!("; Intcode disassembly: {} words\n", program.len()));

    for line in listing(program.words()) {
        output.push_str(&format!("{:<40}; {:>5}\n", line.text(), line.address));
    }

    output
}

//! Intcode Instruction Set
//!
//! Instructions are variable width: one opcode word followed by zero to three
//! parameter words. Each parameter carries its own addressing mode.

use crate::error::IntcodeError;
use crate::opcode::{Mode, Opcode};
use crate::Word;
use serde::{Deserialize, Serialize};

/// A single instruction parameter: raw word plus addressing mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Param {
    pub mode: Mode,
    pub value: Word,
}

impl Param {
    pub const fn new(mode: Mode, value: Word) -> Self {
        Self { mode, value }
    }

    /// `[address]`
    pub const fn position(address: Word) -> Self {
        Self::new(Mode::Position, address)
    }

    /// Literal operand
    pub const fn immediate(value: Word) -> Self {
        Self::new(Mode::Immediate, value)
    }

    /// `[rb + offset]`
    pub const fn relative(offset: Word) -> Self {
        Self::new(Mode::Relative, offset)
    }
}

/// Decoded Intcode instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Instruction {
    /// ADD: dest = a + b
    Add { a: Param, b: Param, dest: Param },

    /// MUL: dest = a * b
    Mul { a: Param, b: Param, dest: Param },

    /// IN: dest = next input word
    In { dest: Param },

    /// OUT: emit src
    Out { src: Param },

    /// JNZ: if cond != 0 then pc = target
    JumpIfTrue { cond: Param, target: Param },

    /// JZ: if cond == 0 then pc = target
    JumpIfFalse { cond: Param, target: Param },

    /// LT: dest = (a < b) ? 1 : 0
    LessThan { a: Param, b: Param, dest: Param },

    /// EQ: dest = (a == b) ? 1 : 0
    Equals { a: Param, b: Param, dest: Param },

    /// ADJ: base += delta
    AdjustBase { delta: Param },

    /// HLT
    Halt,
}

impl Instruction {
    /// Decode an instruction from its words.
    ///
    /// `words[0]` is the opcode word; the following `param_count` words are
    /// the parameters. Mode digits beyond the opcode's parameter count, and
    /// any digits above the ten-thousands place, are ignored.
    pub fn from_words(words: &[Word]) -> Result<Self, IntcodeError> {
        let word = *words.first().ok_or(IntcodeError::Truncated {
            expected: 1,
            found: 0,
        })?;
        let opcode = Opcode::from_word(word)?;
        if words.len() < opcode.width() {
            return Err(IntcodeError::Truncated {
                expected: opcode.width(),
                found: words.len(),
            });
        }

        let mut params = [Param::position(0); 3];
        for (index, param) in params.iter_mut().enumerate().take(opcode.param_count()) {
            *param = Param::new(Mode::of_param(word, index)?, words[index + 1]);
        }
        Self::from_parts(opcode, &params[..opcode.param_count()])
    }

    /// Build an instruction from its opcode and parameters
    pub fn from_parts(opcode: Opcode, params: &[Param]) -> Result<Self, IntcodeError> {
        if params.len() != opcode.param_count() {
            return Err(IntcodeError::Truncated {
                expected: opcode.width(),
                found: params.len() + 1,
            });
        }

        let p = |index: usize| params[index];
        let instr = match opcode {
            Opcode::Add => Instruction::Add { a: p(0), b: p(1), dest: p(2) },
            Opcode::Mul => Instruction::Mul { a: p(0), b: p(1), dest: p(2) },
            Opcode::In => Instruction::In { dest: p(0) },
            Opcode::Out => Instruction::Out { src: p(0) },
            Opcode::JumpIfTrue => Instruction::JumpIfTrue { cond: p(0), target: p(1) },
            Opcode::JumpIfFalse => Instruction::JumpIfFalse { cond: p(0), target: p(1) },
            Opcode::LessThan => Instruction::LessThan { a: p(0), b: p(1), dest: p(2) },
            Opcode::Equals => Instruction::Equals { a: p(0), b: p(1), dest: p(2) },
            Opcode::AdjustBase => Instruction::AdjustBase { delta: p(0) },
            Opcode::Halt => Instruction::Halt,
        };
        Ok(instr)
    }

    /// Get the opcode of this instruction
    pub const fn opcode(&self) -> Opcode {
        match self {
            Instruction::Add { .. } => Opcode::Add,
            Instruction::Mul { .. } => Opcode::Mul,
            Instruction::In { .. } => Opcode::In,
            Instruction::Out { .. } => Opcode::Out,
            Instruction::JumpIfTrue { .. } => Opcode::JumpIfTrue,
            Instruction::JumpIfFalse { .. } => Opcode::JumpIfFalse,
            Instruction::LessThan { .. } => Opcode::LessThan,
            Instruction::Equals { .. } => Opcode::Equals,
            Instruction::AdjustBase { .. } => Opcode::AdjustBase,
            Instruction::Halt => Opcode::Halt,
        }
    }

    /// Width in words
    #[inline]
    pub const fn width(&self) -> usize {
        self.opcode().width()
    }

    /// Parameters in encoding order
    pub fn params(&self) -> Vec<Param> {
        match *self {
            Instruction::Add { a, b, dest }
            | Instruction::Mul { a, b, dest }
            | Instruction::LessThan { a, b, dest }
            | Instruction::Equals { a, b, dest } => vec![a, b, dest],
            Instruction::In { dest } => vec![dest],
            Instruction::Out { src } => vec![src],
            Instruction::JumpIfTrue { cond, target }
            | Instruction::JumpIfFalse { cond, target } => vec![cond, target],
            Instruction::AdjustBase { delta } => vec![delta],
            Instruction::Halt => Vec::new(),
        }
    }

    /// Canonical opcode word: opcode plus the mode digit of each parameter
    pub fn header(&self) -> Word {
        self.params()
            .iter()
            .enumerate()
            .fold(self.opcode().to_u8() as Word, |word, (i, p)| {
                word + p.mode.digit() as Word * Mode::FIRST_PLACE * 10_i64.pow(i as u32)
            })
    }

    /// The destination parameter, for instructions that write memory
    pub fn dest(&self) -> Option<Param> {
        match *self {
            Instruction::Add { dest, .. }
            | Instruction::Mul { dest, .. }
            | Instruction::LessThan { dest, .. }
            | Instruction::Equals { dest, .. }
            | Instruction::In { dest } => Some(dest),
            _ => None,
        }
    }
}

//! # Intcode Opcode and Addressing Mode Definitions
//!
//! An instruction word packs a two-digit opcode and up to three mode digits
//! in decimal:
//!
//! ```text
//!   ABCDE
//!   ││└┴── opcode      (word % 100)
//!   │└──── mode of parameter 1   (word / 100 % 10)
//!   └───── mode of parameter 2   (word / 1000 % 10)
//!  (A)──── mode of parameter 3   (word / 10000 % 10)
//! ```
//!
//! Missing leading digits are zero, so `1002` is MUL with modes
//! (position, immediate, position).

use crate::error::IntcodeError;
use crate::Word;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Instruction opcode (two decimal digits)
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Opcode {
    /// ADD: dest = a + b
    Add = 1,
    /// MUL: dest = a * b
    Mul = 2,
    /// IN: dest = next input word (suspends when none is queued)
    In = 3,
    /// OUT: emit a
    Out = 4,
    /// JNZ: if a != 0 then pc = target
    JumpIfTrue = 5,
    /// JZ: if a == 0 then pc = target
    JumpIfFalse = 6,
    /// LT: dest = (a < b) ? 1 : 0
    LessThan = 7,
    /// EQ: dest = (a == b) ? 1 : 0
    Equals = 8,
    /// ADJ: base += a
    AdjustBase = 9,
    /// HLT: stop the machine
    Halt = 99,
}

impl Opcode {
    /// Every opcode, in numeric order
    pub const ALL: [Opcode; 10] = [
        Opcode::Add,
        Opcode::Mul,
        Opcode::In,
        Opcode::Out,
        Opcode::JumpIfTrue,
        Opcode::JumpIfFalse,
        Opcode::LessThan,
        Opcode::Equals,
        Opcode::AdjustBase,
        Opcode::Halt,
    ];

    /// Try to convert from the two-digit opcode value
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            1 => Some(Opcode::Add),
            2 => Some(Opcode::Mul),
            3 => Some(Opcode::In),
            4 => Some(Opcode::Out),
            5 => Some(Opcode::JumpIfTrue),
            6 => Some(Opcode::JumpIfFalse),
            7 => Some(Opcode::LessThan),
            8 => Some(Opcode::Equals),
            9 => Some(Opcode::AdjustBase),
            99 => Some(Opcode::Halt),
            _ => None,
        }
    }

    /// Convert to u8
    #[inline]
    pub const fn to_u8(self) -> u8 {
        self as u8
    }

    /// Extract the opcode from an instruction word (`word % 100`)
    pub fn from_word(word: Word) -> Result<Self, IntcodeError> {
        if word < 0 {
            return Err(IntcodeError::InvalidOpcode(word));
        }
        Self::from_u8((word % 100) as u8).ok_or(IntcodeError::InvalidOpcode(word))
    }

    /// Number of parameter words following the opcode word
    #[inline]
    pub const fn param_count(self) -> usize {
        match self {
            Opcode::Add | Opcode::Mul | Opcode::LessThan | Opcode::Equals => 3,
            Opcode::JumpIfTrue | Opcode::JumpIfFalse => 2,
            Opcode::In | Opcode::Out | Opcode::AdjustBase => 1,
            Opcode::Halt => 0,
        }
    }

    /// Instruction width in words, opcode word included
    #[inline]
    pub const fn width(self) -> usize {
        self.param_count() + 1
    }

    /// Index of the parameter written by this opcode, if any
    #[inline]
    pub const fn dest_index(self) -> Option<usize> {
        match self {
            Opcode::Add | Opcode::Mul | Opcode::LessThan | Opcode::Equals => Some(2),
            Opcode::In => Some(0),
            _ => None,
        }
    }

    /// Check if this opcode may redirect the program counter
    #[inline]
    pub const fn is_jump(self) -> bool {
        matches!(self, Opcode::JumpIfTrue | Opcode::JumpIfFalse)
    }

    /// Check if this opcode touches a device
    #[inline]
    pub const fn is_io(self) -> bool {
        matches!(self, Opcode::In | Opcode::Out)
    }

    /// Assembly mnemonic
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Opcode::Add => "add",
            Opcode::Mul => "mul",
            Opcode::In => "in",
            Opcode::Out => "out",
            Opcode::JumpIfTrue => "jnz",
            Opcode::JumpIfFalse => "jz",
            Opcode::LessThan => "lt",
            Opcode::Equals => "eq",
            Opcode::AdjustBase => "adj",
            Opcode::Halt => "hlt",
        }
    }

    /// Look up an opcode by mnemonic (case-insensitive)
    pub fn from_mnemonic(name: &str) -> Option<Self> {
        let name = name.to_ascii_lowercase();
        Self::ALL.into_iter().find(|op| op.mnemonic() == name)
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

/// Parameter addressing mode (one decimal digit)
#[repr(u8)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mode {
    /// Parameter is an absolute address
    #[default]
    Position = 0,
    /// Parameter is the operand itself
    Immediate = 1,
    /// Parameter is an offset from the relative base
    Relative = 2,
}

impl Mode {
    /// Decimal place value of the first mode digit
    pub const FIRST_PLACE: Word = 100;

    /// Try to convert from a mode digit
    pub fn from_digit(digit: u8) -> Option<Self> {
        match digit {
            0 => Some(Mode::Position),
            1 => Some(Mode::Immediate),
            2 => Some(Mode::Relative),
            _ => None,
        }
    }

    /// Convert to the mode digit
    #[inline]
    pub const fn digit(self) -> u8 {
        self as u8
    }

    /// Extract the mode digit of parameter `index` (0-based) from a word
    pub fn of_param(word: Word, index: usize) -> Result<Self, IntcodeError> {
        let digit = (word / (Self::FIRST_PLACE * 10_i64.pow(index as u32)) % 10) as u8;
        Self::from_digit(digit).ok_or(IntcodeError::InvalidMode {
            word,
            param: index,
            digit,
        })
    }

    /// Check if this mode may name a destination
    #[inline]
    pub const fn is_writable(self) -> bool {
        !matches!(self, Mode::Immediate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opcode_roundtrip() {
        for op in Opcode::ALL {
            assert_eq!(Opcode::from_u8(op.to_u8()), Some(op));
            assert_eq!(Opcode::from_mnemonic(op.mnemonic()), Some(op));
        }
    }

    #[test]
    fn test_opcode_from_word_ignores_modes() {
        assert_eq!(Opcode::from_word(1002).unwrap(), Opcode::Mul);
        assert_eq!(Opcode::from_word(21107).unwrap(), Opcode::LessThan);
        assert_eq!(Opcode::from_word(99).unwrap(), Opcode::Halt);
        assert_eq!(Opcode::from_word(109).unwrap(), Opcode::AdjustBase);
    }

    #[test]
    fn test_opcode_from_word_rejects_unknown() {
        assert!(matches!(Opcode::from_word(0), Err(IntcodeError::InvalidOpcode(0))));
        assert!(matches!(Opcode::from_word(42), Err(IntcodeError::InvalidOpcode(42))));
        assert!(matches!(Opcode::from_word(-1), Err(IntcodeError::InvalidOpcode(-1))));
    }

    #[test]
    fn test_widths() {
        assert_eq!(Opcode::Add.width(), 4);
        assert_eq!(Opcode::Mul.width(), 4);
        assert_eq!(Opcode::LessThan.width(), 4);
        assert_eq!(Opcode::Equals.width(), 4);
        assert_eq!(Opcode::JumpIfTrue.width(), 3);
        assert_eq!(Opcode::JumpIfFalse.width(), 3);
        assert_eq!(Opcode::In.width(), 2);
        assert_eq!(Opcode::Out.width(), 2);
        assert_eq!(Opcode::AdjustBase.width(), 2);
        assert_eq!(Opcode::Halt.width(), 1);
    }

    #[test]
    fn test_dest_index() {
        assert_eq!(Opcode::Add.dest_index(), Some(2));
        assert_eq!(Opcode::In.dest_index(), Some(0));
        assert_eq!(Opcode::Out.dest_index(), None);
        assert_eq!(Opcode::JumpIfFalse.dest_index(), None);
    }

    #[test]
    fn test_mode_digits() {
        assert_eq!(Mode::of_param(1002, 0).unwrap(), Mode::Position);
        assert_eq!(Mode::of_param(1002, 1).unwrap(), Mode::Immediate);
        assert_eq!(Mode::of_param(1002, 2).unwrap(), Mode::Position);
        assert_eq!(Mode::of_param(21101, 2).unwrap(), Mode::Relative);
        assert_eq!(Mode::of_param(204, 0).unwrap(), Mode::Relative);
    }

    #[test]
    fn test_mode_invalid_digit() {
        let err = Mode::of_param(301, 0).unwrap_err();
        assert!(matches!(
            err,
            IntcodeError::InvalidMode { word: 301, param: 0, digit: 3 }
        ));
    }

    #[test]
    fn test_mode_writable() {
        assert!(Mode::Position.is_writable());
        assert!(!Mode::Immediate.is_writable());
        assert!(Mode::Relative.is_writable());
    }
}

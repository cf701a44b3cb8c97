//! # Intcode Specification
//!
//! Core types shared by the loader, the disassembler and the virtual machine.
//!
//! ## Key Features
//! - 64-bit signed words for memory cells, registers, and ports
//! - Ten opcodes with variable instruction width (1 to 4 words)
//! - Three addressing modes: position, immediate, relative-to-base
//! - Programs are plain comma-separated decimal text

pub mod opcode;
pub mod instruction;
pub mod error;
pub mod program;

pub use opcode::{Mode, Opcode};
pub use instruction::{Instruction, Param};
pub use error::IntcodeError;
pub use program::Program;

/// Memory cell, register, and port value
pub type Word = i64;

/// ASCII newline as a word, terminating text-protocol lines
pub const NEWLINE: Word = b'\n' as Word;

/// Largest word that the text protocol treats as a character
pub const MAX_ASCII: Word = 0x7F;

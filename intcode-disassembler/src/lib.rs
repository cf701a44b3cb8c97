//! # Intcode Disassembler
//!
//! Turn Intcode words back into assembly text accepted by
//! `intcode-assembler`. The runtime also uses [`format`] to render
//! instructions in its execution trace.
//!
//! ## Example
//!
//! ```rust
//! use intcode_spec::Program;
//! use intcode_disassembler::disassemble;
//!
//! let program = Program::new(vec![104, 1125899906842624, 99]);
//! let asm = disassemble(&program);
//! assert!(asm.contains("out 1125899906842624"));
//! ```

pub mod decoder;
pub mod disassembler;
pub mod error;
pub mod formatter;

pub use decoder::decode;
pub use disassembler::{disassemble, listing, Line};
pub use error::{DisassemblerError, Result};
pub use formatter::{format, format_param};

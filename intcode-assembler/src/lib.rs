//! Intcode Assembler and Program Loader
//!
//! Two front ends produce a [`Program`](intcode_spec::Program):
//!
//! - [`load`] reads the comma-separated program text that puzzle inputs ship in.
//! - [`assemble`] turns a small mnemonic language into words, which is how
//!   hand-written test programs are built.
//!
//! ## Example
//!
//! ```rust
//! use intcode_assembler::{assemble, load};
//!
//! let source = r#"
//!     in [0]
//!     out [0]
//!     hlt
//! "#;
//!
//! let program = assemble(source).unwrap();
//! assert_eq!(program, load("3,0,4,0,99").unwrap());
//! ```

pub mod assembler;
pub mod encoder;
pub mod error;
pub mod lexer;
pub mod loader;
pub mod parser;

pub use assembler::assemble;
pub use encoder::{encode, encode_program};
pub use error::{AssemblerError, LoaderError, Result};
pub use loader::{load, load_file};
pub use parser::{parse_instruction, parse_operand};

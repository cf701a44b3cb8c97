//! # Intcode Runtime
//!
//! A suspendable Intcode machine and the drivers that compose several of
//! them.
//!
//! ## Features
//!
//! - **Sparse memory**: the program image plus an unbounded zero-filled tail
//! - **Suspendable I/O**: run operations stop at output, input or a blocked IN
//!   and resume where they left off
//! - **Drivers**: amplifier pipelines and feedback loops, a packet-switched
//!   network with a NAT, and a line-oriented ASCII terminal
//!
//! ## Example
//!
//! ```rust
//! use intcode_runtime::{Machine, Status};
//! use intcode_spec::Program;
//!
//! // Double the input
//! let program = Program::new(vec![3, 9, 1002, 9, 2, 9, 4, 9, 99, 0]);
//! let mut machine = Machine::new(&program);
//! assert_eq!(machine.run_to_output().unwrap(), Status::PendingInput);
//!
//! machine.push_input(21);
//! assert_eq!(machine.run_to_output().unwrap(), Status::Paused);
//! assert_eq!(machine.pop_output().unwrap(), 42);
//! ```

pub mod ascii;
pub mod error;
pub mod execute;
pub mod io;
pub mod memory;
pub mod network;
pub mod pipeline;
pub mod state;
pub mod vm;

pub use ascii::{AsciiOutput, AsciiTerminal};
pub use error::{Result, RuntimeError};
pub use execute::Effect;
pub use io::Device;
pub use memory::Memory;
pub use network::{Network, NetworkConfig, NetworkError, NetworkOutcome, Packet};
pub use pipeline::{feedback_loop, max_thrust, pipeline, PipelineError, Thrust, Topology};
pub use state::{MachineState, Status};
pub use vm::{Machine, MachineConfig, PortPolicy};

use intcode_spec::{Program, Word};

/// Run a program to completion and collect every output
pub fn run(program: &Program, inputs: &[Word]) -> Result<Vec<Word>> {
    let mut machine = Machine::new(program);
    machine.push_inputs(inputs.iter().copied());
    machine.run_until_halt()?;
    Ok(machine.drain_output())
}

/// Run a program until its first output
pub fn first_output(program: &Program, inputs: &[Word]) -> Result<Word> {
    let mut machine = Machine::new(program);
    machine.push_inputs(inputs.iter().copied());
    machine.run_to_output()?;
    machine.pop_output()
}

//! The Intcode machine
//!
//! A [`Machine`] owns its memory and two I/O devices and is advanced by the
//! caller through one of the run operations. Each run operation stops at a
//! suspension point and reports the resulting [`Status`]:
//!
//! | operation              | stops after                         |
//! |------------------------|-------------------------------------|
//! | [`Machine::step`]      | one instruction                     |
//! | [`Machine::run_to_output`] | an OUT                          |
//! | [`Machine::run_to_any_io`] | an OUT or an IN that consumed a word |
//! | [`Machine::run_to_completion`] | nothing but HLT or a blocked IN |
//!
//! A blocked IN never advances pc, so resuming after pushing input
//! re-executes the same IN.

use intcode_spec::{Instruction, Opcode, Program, Word};

use crate::error::{Result, RuntimeError};
use crate::execute::{execute, Effect};
use crate::io::Device;
use crate::memory::Memory;
use crate::state::{MachineState, Status};

/// Machine configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MachineConfig {
    /// Emit a `trace!` event with the disassembly of every instruction
    pub trace: bool,
}

/// What happens to queued port contents when a program is (re)loaded
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PortPolicy {
    #[default]
    Clear,
    Preserve,
}

/// Intcode machine
#[derive(Debug, Clone)]
pub struct Machine {
    /// Registers, memory, status
    state: MachineState,

    input: Device,

    output: Device,

    config: MachineConfig,
}

impl Machine {
    /// Create a machine with `program` loaded at address zero
    pub fn new(program: &Program) -> Self {
        Self::with_config(program, MachineConfig::default())
    }

    pub fn with_config(program: &Program, config: MachineConfig) -> Self {
        Machine {
            state: MachineState::new(program.words().to_vec()),
            input: Device::new(),
            output: Device::new(),
            config,
        }
    }

    /// Reset registers, status and memory to a fresh copy of `program`
    pub fn load_program(&mut self, program: &Program, ports: PortPolicy) {
        self.state = MachineState::new(program.words().to_vec());
        if ports == PortPolicy::Clear {
            self.input.clear();
            self.output.clear();
        }
    }

    // ========================================================================
    // Run operations
    // ========================================================================

    /// Execute exactly one instruction
    pub fn step(&mut self) -> Result<Status> {
        if self.state.is_halted() {
            return Ok(Status::Halted);
        }
        self.state.status = Status::Running;
        let status = match self.cycle()? {
            Effect::Blocked => Status::PendingInput,
            Effect::Halt => Status::Halted,
            _ => Status::Paused,
        };
        self.state.status = status;
        Ok(status)
    }

    /// Run until an OUT executes, HLT, or an IN blocks
    pub fn run_to_output(&mut self) -> Result<Status> {
        self.run_until(|effect| effect == Effect::Output)
    }

    /// Run until an OUT executes, an IN consumes a word, HLT, or an IN blocks
    pub fn run_to_any_io(&mut self) -> Result<Status> {
        self.run_until(|effect| matches!(effect, Effect::Output | Effect::Input))
    }

    /// Run until HLT or an IN blocks
    pub fn run_to_completion(&mut self) -> Result<Status> {
        self.run_until(|_| false)
    }

    /// Run until HLT; running out of input is an error
    pub fn run_until_halt(&mut self) -> Result<Status> {
        match self.run_to_completion()? {
            Status::PendingInput => Err(RuntimeError::InputExhausted { pc: self.state.pc }),
            status => Ok(status),
        }
    }

    fn run_until(&mut self, stop: impl Fn(Effect) -> bool) -> Result<Status> {
        if self.state.is_halted() {
            return Ok(Status::Halted);
        }
        self.state.status = Status::Running;

        let status = loop {
            match self.cycle()? {
                Effect::Blocked => break Status::PendingInput,
                Effect::Halt => break Status::Halted,
                effect if stop(effect) => break Status::Paused,
                _ => {}
            }
        };
        self.state.status = status;
        Ok(status)
    }

    /// Fetch, decode and execute one instruction. A failure halts the
    /// machine and comes back wrapped with the failing location.
    fn cycle(&mut self) -> Result<Effect> {
        let pc = self.state.pc;
        match self.fetch_and_execute() {
            Ok(effect) => {
                if effect != Effect::Blocked {
                    self.state.steps += 1;
                }
                Ok(effect)
            }
            Err(source) => {
                let word = self.state.memory.read(pc).unwrap_or_default();
                self.state.status = Status::Halted;
                tracing::warn!(pc, word, error = %source, "machine faulted");
                Err(RuntimeError::Fault {
                    pc,
                    word,
                    source: Box::new(source),
                })
            }
        }
    }

    fn fetch_and_execute(&mut self) -> Result<Effect> {
        let instr = self.fetch_and_decode()?;
        self.state.last_opcode = Some(instr.opcode());

        if self.config.trace {
            tracing::trace!(
                pc = self.state.pc,
                base = self.state.base,
                step = self.state.steps,
                "{}",
                intcode_disassembler::format(&instr)
            );
        }

        execute(&instr, &mut self.state, &mut self.input, &mut self.output)
    }

    /// Fetch and decode the instruction at pc
    fn fetch_and_decode(&self) -> Result<Instruction> {
        let pc = self.state.pc;
        let header = self.state.memory.read(pc)?;
        let opcode = Opcode::from_word(header)?;

        let mut words = [header, 0, 0, 0];
        for (offset, slot) in (1..).zip(words.iter_mut().skip(1).take(opcode.param_count())) {
            let address = pc.checked_add(offset).ok_or(RuntimeError::AddressOverflow {
                base: pc,
                offset,
            })?;
            *slot = self.state.memory.read(address)?;
        }

        Ok(Instruction::from_words(&words[..opcode.width()])?)
    }

    // ========================================================================
    // Ports
    // ========================================================================

    pub fn push_input(&mut self, word: Word) {
        self.input.push(word);
    }

    pub fn push_inputs(&mut self, words: impl IntoIterator<Item = Word>) {
        self.input.extend(words);
    }

    /// Queue one input word per character
    pub fn push_str(&mut self, text: &str) {
        self.input.push_str(text);
    }

    /// Queue `text` followed by a newline
    pub fn push_line(&mut self, text: &str) {
        self.input.push_str(text);
        self.input.push(intcode_spec::NEWLINE);
    }

    pub fn has_input(&self) -> bool {
        !self.input.is_empty()
    }

    pub fn input_len(&self) -> usize {
        self.input.len()
    }

    pub fn has_output(&self) -> bool {
        !self.output.is_empty()
    }

    pub fn output_len(&self) -> usize {
        self.output.len()
    }

    /// Take the oldest queued output word
    pub fn pop_output(&mut self) -> Result<Word> {
        self.output.pop().ok_or(RuntimeError::EmptyOutput)
    }

    /// Take every queued output word
    pub fn drain_output(&mut self) -> Vec<Word> {
        self.output.drain()
    }

    // ========================================================================
    // Memory access and introspection
    // ========================================================================

    pub fn peek(&self, address: Word) -> Result<Word> {
        self.state.memory.read(address)
    }

    pub fn poke(&mut self, address: Word, word: Word) -> Result<()> {
        self.state.memory.write(address, word)
    }

    pub fn status(&self) -> Status {
        self.state.status
    }

    pub fn is_halted(&self) -> bool {
        self.state.is_halted()
    }

    pub fn pc(&self) -> Word {
        self.state.pc
    }

    pub fn base(&self) -> Word {
        self.state.base
    }

    /// Instructions executed since the program was loaded
    pub fn steps(&self) -> u64 {
        self.state.steps
    }

    pub fn last_opcode(&self) -> Option<Opcode> {
        self.state.last_opcode
    }

    pub fn memory(&self) -> &Memory {
        &self.state.memory
    }

    pub fn config(&self) -> &MachineConfig {
        &self.config
    }
}

//! Machine state: registers, memory and the status register

use std::fmt;

use intcode_spec::{Mode, Opcode, Param, Word};

use crate::error::{Result, RuntimeError};
use crate::memory::Memory;

/// Run status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Status {
    /// Safe to resume
    #[default]
    Paused,
    /// Inside a run operation; never observed by callers
    Running,
    /// Blocked on IN with an empty input device; pc still points at the IN
    PendingInput,
    /// Terminal: HLT executed or a fault aborted the machine
    Halted,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Status::Paused => "paused",
            Status::Running => "running",
            Status::PendingInput => "pending input",
            Status::Halted => "halted",
        };
        f.write_str(name)
    }
}

/// Machine state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MachineState {
    /// Memory
    pub memory: Memory,

    /// Program counter
    pub pc: Word,

    /// Relative base register
    pub base: Word,

    /// Status register
    pub status: Status,

    /// Instructions executed (a blocked IN is not counted)
    pub steps: u64,

    /// Opcode of the most recently decoded instruction
    pub last_opcode: Option<Opcode>,
}

impl MachineState {
    pub fn new(words: Vec<Word>) -> Self {
        MachineState {
            memory: Memory::new(words),
            pc: 0,
            base: 0,
            status: Status::Paused,
            steps: 0,
            last_opcode: None,
        }
    }

    /// Effective address of a position or relative parameter
    #[inline]
    pub fn address(&self, param: Param) -> Result<Word> {
        match param.mode {
            Mode::Position => Ok(param.value),
            Mode::Relative => self
                .base
                .checked_add(param.value)
                .ok_or(RuntimeError::AddressOverflow {
                    base: self.base,
                    offset: param.value,
                }),
            Mode::Immediate => Err(RuntimeError::ImmediateDestination),
        }
    }

    /// Operand value of a parameter
    #[inline]
    pub fn operand(&self, param: Param) -> Result<Word> {
        match param.mode {
            Mode::Immediate => Ok(param.value),
            _ => self.memory.read(self.address(param)?),
        }
    }

    /// Write through a destination parameter
    #[inline]
    pub fn store(&mut self, dest: Param, word: Word) -> Result<()> {
        let address = self.address(dest)?;
        self.memory.write(address, word)
    }

    /// Move pc past an instruction of `width` words
    #[inline]
    pub fn advance(&mut self, width: usize) -> Result<()> {
        let offset = width as Word;
        self.pc = self
            .pc
            .checked_add(offset)
            .ok_or(RuntimeError::AddressOverflow {
                base: self.pc,
                offset,
            })?;
        Ok(())
    }

    pub fn is_halted(&self) -> bool {
        self.status == Status::Halted
    }
}

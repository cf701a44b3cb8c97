//! Instruction execution

use intcode_spec::{Instruction, Word};

use crate::error::{Result, RuntimeError};
use crate::io::Device;
use crate::state::MachineState;

/// What an executed instruction means to the run loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Plain instruction, keep going
    Continue,
    /// IN consumed a word
    Input,
    /// OUT produced a word
    Output,
    /// IN found the input device empty; pc is unchanged
    Blocked,
    /// HLT
    Halt,
}

#[inline]
fn checked(op: char, a: Word, b: Word, result: Option<Word>) -> Result<Word> {
    result.ok_or(RuntimeError::ArithmeticOverflow { op, a, b })
}

/// Execute single instruction
pub fn execute(
    instr: &Instruction,
    state: &mut MachineState,
    input: &mut Device,
    output: &mut Device,
) -> Result<Effect> {
    let width = instr.width();

    match *instr {
        Instruction::Add { a, b, dest } => {
            let (a, b) = (state.operand(a)?, state.operand(b)?);
            state.store(dest, checked('+', a, b, a.checked_add(b))?)?;
        }

        Instruction::Mul { a, b, dest } => {
            let (a, b) = (state.operand(a)?, state.operand(b)?);
            state.store(dest, checked('*', a, b, a.checked_mul(b))?)?;
        }

        Instruction::In { dest } => {
            // Resolve first so a bad destination does not swallow a word
            let address = state.address(dest)?;
            let Some(word) = input.pop() else {
                return Ok(Effect::Blocked);
            };
            state.memory.write(address, word)?;
            tracing::debug!(pc = state.pc, value = word, "IN");
            state.advance(width)?;
            return Ok(Effect::Input);
        }

        Instruction::Out { src } => {
            let word = state.operand(src)?;
            output.push(word);
            tracing::debug!(pc = state.pc, value = word, "OUT");
            state.advance(width)?;
            return Ok(Effect::Output);
        }

        Instruction::JumpIfTrue { cond, target } => {
            if state.operand(cond)? != 0 {
                state.pc = state.operand(target)?;
                return Ok(Effect::Continue);
            }
        }

        Instruction::JumpIfFalse { cond, target } => {
            if state.operand(cond)? == 0 {
                state.pc = state.operand(target)?;
                return Ok(Effect::Continue);
            }
        }

        Instruction::LessThan { a, b, dest } => {
            let flag = state.operand(a)? < state.operand(b)?;
            state.store(dest, flag as Word)?;
        }

        Instruction::Equals { a, b, dest } => {
            let flag = state.operand(a)? == state.operand(b)?;
            state.store(dest, flag as Word)?;
        }

        Instruction::AdjustBase { delta } => {
            let delta = state.operand(delta)?;
            state.base = state
                .base
                .checked_add(delta)
                .ok_or(RuntimeError::AddressOverflow {
                    base: state.base,
                    offset: delta,
                })?;
        }

        Instruction::Halt => {
            tracing::debug!(pc = state.pc, "HLT");
            return Ok(Effect::Halt);
        }
    }

    state.advance(width)?;
    Ok(Effect::Continue)
}

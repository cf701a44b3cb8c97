//! Instruction encoding to Intcode words
//!
//! An instruction encodes as its canonical opcode word (opcode plus one mode
//! digit per parameter) followed by the raw parameter words.

use intcode_spec::{Instruction, Program, Word};

/// Encode instruction to its words
pub fn encode(instr: &Instruction) -> Vec<Word> {
    let mut words = Vec::with_capacity(instr.width());
    words.push(instr.header());
    words.extend(instr.params().iter().map(|p| p.value));
    words
}

/// Encode a straight-line instruction sequence into a program image
pub fn encode_program(instructions: &[Instruction]) -> Program {
    instructions.iter().flat_map(encode).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use intcode_spec::Param;

    #[test]
    fn test_encode_add() {
        let instr = Instruction::Add {
            a: Param::position(9),
            b: Param::position(10),
            dest: Param::position(3),
        };
        assert_eq!(encode(&instr), vec![1, 9, 10, 3]);
    }

    #[test]
    fn test_encode_modes() {
        let instr = Instruction::Mul {
            a: Param::position(4),
            b: Param::immediate(3),
            dest: Param::position(4),
        };
        assert_eq!(encode(&instr), vec![1002, 4, 3, 4]);

        let instr = Instruction::Out { src: Param::relative(-1) };
        assert_eq!(encode(&instr), vec![204, -1]);

        let instr = Instruction::LessThan {
            a: Param::immediate(1),
            b: Param::immediate(2),
            dest: Param::relative(0),
        };
        assert_eq!(encode(&instr), vec![21107, 1, 2, 0]);
    }

    #[test]
    fn test_encode_halt() {
        assert_eq!(encode(&Instruction::Halt), vec![99]);
    }

    #[test]
    fn test_encode_decode_roundtrip() {
        let instr = Instruction::JumpIfFalse {
            cond: Param::relative(5),
            target: Param::immediate(42),
        };
        let words = encode(&instr);
        assert_eq!(words, vec![1206, 5, 42]);
        assert_eq!(Instruction::from_words(&words).unwrap(), instr);
    }

    #[test]
    fn test_encode_program() {
        let program = encode_program(&[
            Instruction::In { dest: Param::position(0) },
            Instruction::Out { src: Param::position(0) },
            Instruction::Halt,
        ]);
        assert_eq!(program.words(), &[3, 0, 4, 0, 99]);
    }
}
